use fancy_regex::Regex;
use lazy_static::lazy_static;

/// Default number of instances in a simulated network.
pub const DEFAULT_POOL_SIZE: usize = 50;

/// Default destination address of the rendezvous point.
pub const DEFAULT_NAT_ADDRESS: i64 = 255;

/// Default value delivered to an instance that has no pending packets.
pub const DEFAULT_IDLE_SENTINEL: i64 = -1;

/// Default directory for files written by the CLI.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "output";

lazy_static! {
    /// Matches a complete program: comma separated signed integers, optionally followed by a
    /// single line ending.
    pub static ref PROGRAM_REGEX: Regex =
        Regex::new(r"^-?[0-9]+(?:,-?[0-9]+)*(?:\r?\n)?$").expect("failed to compile regex");

    /// Matches a memory patch of the form `ADDR=VALUE`.
    pub static ref ASSIGNMENT_REGEX: Regex =
        Regex::new(r"^([0-9]+)=(-?[0-9]+)$").expect("failed to compile regex");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_regex() {
        assert!(PROGRAM_REGEX.is_match("1,0,0,0,99").unwrap_or(false));
        assert!(PROGRAM_REGEX.is_match("104,-1,99\n").unwrap_or(false));
        assert!(PROGRAM_REGEX.is_match("99\r\n").unwrap_or(false));

        assert!(!PROGRAM_REGEX.is_match("").unwrap_or(false));
        assert!(!PROGRAM_REGEX.is_match("1, 0").unwrap_or(false));
        assert!(!PROGRAM_REGEX.is_match("1,,0").unwrap_or(false));
        assert!(!PROGRAM_REGEX.is_match("./program.txt").unwrap_or(false));
        assert!(!PROGRAM_REGEX.is_match("99\n\n").unwrap_or(false));
    }

    #[test]
    fn test_assignment_regex() {
        assert!(ASSIGNMENT_REGEX.is_match("1=12").unwrap_or(false));
        assert!(ASSIGNMENT_REGEX.is_match("0=-2").unwrap_or(false));
        assert!(!ASSIGNMENT_REGEX.is_match("-1=2").unwrap_or(false));
        assert!(!ASSIGNMENT_REGEX.is_match("1 = 2").unwrap_or(false));
    }
}
