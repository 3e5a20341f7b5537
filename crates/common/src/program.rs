use crate::{constants::PROGRAM_REGEX, Error};
use tracing::{debug, error};

/// Given a target, determines whether it is inline program text or a file path, and returns the
/// program text for the target.
///
/// The returned text is validated against [`PROGRAM_REGEX`], so it can be handed to the VM's
/// program parser directly.
pub async fn get_program_from_target(target: &str) -> Result<String, Error> {
    if PROGRAM_REGEX.is_match(target).unwrap_or(false) {
        debug!("target is inline program text");
        return Ok(target.to_string());
    }

    // target is a file path, so we need to read the program from the file.
    let contents = tokio::fs::read_to_string(target).await.map_err(|e| {
        error!("failed to open file '{}' .", &target);
        Error::FilesystemError(e)
    })?;

    if PROGRAM_REGEX.is_match(&contents).unwrap_or(false) {
        debug!("read {} bytes of program text from '{}'", contents.len(), target);
        Ok(contents)
    } else {
        error!("file '{}' doesn't contain a valid program.", &target);
        Err(Error::ParseError(format!("file '{}' doesn't contain a valid program.", &target)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_get_program_from_inline_target() {
        let program = get_program_from_target("1,0,0,0,99").await.expect("failed to resolve");
        assert_eq!(program, "1,0,0,0,99");
    }

    #[tokio::test]
    async fn test_get_program_from_file_target() {
        let path = "/tmp/tapenet_test_program.txt";
        fs::write(path, "104,7,99\n").expect("unable to write file");

        let program = get_program_from_target(path).await.expect("failed to resolve");
        assert_eq!(program, "104,7,99\n");

        fs::remove_file(path).expect("unable to remove file");
    }

    #[tokio::test]
    async fn test_get_program_from_invalid_file() {
        let path = "/tmp/tapenet_test_not_a_program.txt";
        fs::write(path, "hello world").expect("unable to write file");

        let result = get_program_from_target(path).await;
        assert!(matches!(result, Err(Error::ParseError(_))));

        fs::remove_file(path).expect("unable to remove file");
    }

    #[tokio::test]
    async fn test_get_program_from_missing_file() {
        let result = get_program_from_target("/nonexistent/program.txt").await;
        assert!(matches!(result, Err(Error::FilesystemError(_))));
    }
}
