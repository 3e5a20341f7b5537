use std::{env, io::Write, path::Path};

use eyre::{eyre, Result};

/// build a standardized output path for the given parameters. follows the following cases:
/// - if `output` is a relative directory, return `{cwd}/{output}/{filename}`
/// - if `output` is an absolute directory, return `{output}/{filename}`
pub fn build_output_path(output: &str, filename: &str) -> Result<String> {
    if Path::new(output).is_absolute() {
        return Ok(format!("{}/{}", output.trim_end_matches('/'), filename));
    }

    let cwd = env::current_dir()?
        .into_os_string()
        .into_string()
        .map_err(|_| eyre!("Unable to get current working directory"))?;

    Ok(format!("{}/{}/{}", cwd, output.trim_end_matches('/'), filename))
}

/// pass the input to the `less` command
pub async fn print_with_less(input: &str) -> Result<()> {
    let mut child =
        std::process::Command::new("less").stdin(std::process::Stdio::piped()).spawn()?;

    let stdin = child.stdin.as_mut().ok_or_else(|| eyre!("unable to get stdin for less"))?;
    stdin.write_all(input.as_bytes())?;

    child.wait()?;
    Ok(())
}
