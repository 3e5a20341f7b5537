use crate::{constants::ASSIGNMENT_REGEX, Error};

/// Parses a comma separated list of signed integers. Whitespace around each value is ignored and
/// an empty string is an empty list.
///
/// ```
/// use tapenet_common::utils::strings::parse_integer_list;
///
/// assert_eq!(parse_integer_list("1, -2,3").expect("valid list"), vec![1, -2, 3]);
/// assert!(parse_integer_list("").expect("valid list").is_empty());
/// ```
pub fn parse_integer_list(s: &str) -> Result<Vec<i64>, Error> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }

    s.split(',')
        .map(|token| {
            token
                .trim()
                .parse::<i64>()
                .map_err(|_| Error::ParseError(format!("invalid integer '{}'", token.trim())))
        })
        .collect()
}

/// Parses a memory patch of the form `ADDR=VALUE`.
///
/// ```
/// use tapenet_common::utils::strings::parse_assignment;
///
/// assert_eq!(parse_assignment("1=12").expect("valid assignment"), (1, 12));
/// assert!(parse_assignment("x=1").is_err());
/// ```
pub fn parse_assignment(s: &str) -> Result<(usize, i64), Error> {
    let invalid = || Error::ParseError(format!("invalid assignment '{s}', expected ADDR=VALUE"));

    let captures = ASSIGNMENT_REGEX.captures(s.trim()).map_err(|_| invalid())?.ok_or_else(invalid)?;
    let address = captures
        .get(1)
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .ok_or_else(invalid)?;
    let value =
        captures.get(2).and_then(|m| m.as_str().parse::<i64>().ok()).ok_or_else(invalid)?;

    Ok((address, value))
}

/// Joins values into a comma separated string.
///
/// ```
/// use tapenet_common::utils::strings::join_values;
///
/// assert_eq!(join_values(&[3, -1, 99]), "3,-1,99");
/// ```
pub fn join_values(values: &[i64]) -> String {
    values.iter().map(i64::to_string).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_list_rejects_garbage() {
        assert!(matches!(parse_integer_list("1,,2"), Err(Error::ParseError(_))));
        assert!(matches!(parse_integer_list("1,a"), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_parse_assignment_values() {
        assert_eq!(parse_assignment("0=-5").expect("valid assignment"), (0, -5));
        assert_eq!(parse_assignment(" 2=2 ").expect("valid assignment"), (2, 2));
        assert!(parse_assignment("-1=2").is_err());
        assert!(parse_assignment("1=").is_err());
        assert!(parse_assignment("99999999999999999999999=1").is_err());
    }
}
