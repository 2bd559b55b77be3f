use std::sync::LazyLock;

use regex::Regex;

// Innermost parenthesised run: after the last unmatched "(" up to the next ")".
static PARENS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^()]+)\)").unwrap());

/// Country named in a reviewer status line such as `"John D (United Kingdom) 4th May 2024"`.
pub fn from_status(status: &str) -> Option<String> {
    PARENS_RE
        .captures(status)
        .map(|caps| caps[1].trim().to_string())
        .filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple() {
        assert_eq!(from_status("John D (United Kingdom)").as_deref(), Some("United Kingdom"));
    }

    #[test]
    fn trailing_date() {
        assert_eq!(
            from_status("A Smith (Australia) 12th March 2024").as_deref(),
            Some("Australia")
        );
    }

    #[test]
    fn no_parentheses() {
        assert_eq!(from_status("John D"), None);
    }

    #[test]
    fn unclosed_parenthesis() {
        assert_eq!(from_status("John D (United Kingdom"), None);
    }

    #[test]
    fn innermost_group() {
        assert_eq!(from_status("J (x (Canada)").as_deref(), Some("Canada"));
    }

    #[test]
    fn blank_group() {
        assert_eq!(from_status("J (  )"), None);
    }
}
