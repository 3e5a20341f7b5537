use std::{env, fs, path::Path};

use eyre::{eyre, Result};

/// Convert a long path to a path relative to the current working directory.
///
/// ```no_run
/// use tapenet_common::utils::io::file::short_path;
///
/// let path = "/some/long/path/that/is/cwd/disassembled.asm";
/// let short_path = short_path(path);
/// assert_eq!(short_path, "./disassembled.asm");
/// ```
pub fn short_path(path: &str) -> String {
    match env::current_dir() {
        Ok(dir) => path.replace(&dir.into_os_string().into_string().unwrap_or_default(), "."),
        Err(_) => path.to_owned(),
    }
}

/// Write contents to a file on the disc, creating parent directories as needed.
///
/// ```no_run
/// use tapenet_common::utils::io::file::write_file;
///
/// let result = write_file("/tmp/output/disassembled.asm", "000000 HALT\n");
/// ```
pub fn write_file(path_str: &str, contents: &str) -> Result<()> {
    let path = Path::new(path_str);

    fs::create_dir_all(path.parent().ok_or_else(|| eyre!("unable to create directory"))?)?;
    fs::write(path, contents)?;

    Ok(())
}

/// Read contents from a file on the disc
///
/// ```no_run
/// use tapenet_common::utils::io::file::read_file;
///
/// let contents = read_file("/tmp/program.txt");
/// ```
pub fn read_file(path: &str) -> Result<String> {
    Ok(fs::read_to_string(Path::new(path))?)
}

/// Delete a file or directory from the disc. Returns whether the path is gone afterwards.
///
/// ```no_run
/// use tapenet_common::utils::io::file::delete_path;
///
/// let result = delete_path("/tmp/output");
/// ```
pub fn delete_path(path: &str) -> bool {
    let path = Path::new(path);
    let removed = if path.is_dir() { fs::remove_dir_all(path) } else { fs::remove_file(path) };

    removed.is_ok() || !path.exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_file_successful() {
        let path = "/tmp/tapenet_io/test.txt";
        let result = write_file(path, "1,0,0,0,99");
        assert!(result.is_ok());
    }

    #[test]
    fn test_write_file_failure() {
        let path = "/proc/tapenet/test.txt";
        let result = write_file(path, "1,0,0,0,99");
        assert!(result.is_err());
    }

    #[test]
    fn test_read_file_successful() {
        let path = "/tmp/tapenet_io/read.txt";
        write_file(path, "104,1,99").expect("unable to write file");

        let result = read_file(path);
        assert_eq!(result.expect("unable to read file"), "104,1,99");
    }

    #[test]
    fn test_read_file_failure() {
        let result = read_file("/nonexistent/test.txt");
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_path() {
        let path = "/tmp/tapenet_io_delete";
        write_file(&format!("{path}/nested.txt"), "99").expect("unable to write file");

        assert!(delete_path(path));
        assert!(!Path::new(path).exists());

        // a missing path is already deleted
        assert!(delete_path("/nonexistent/test_dir"));
    }
}
