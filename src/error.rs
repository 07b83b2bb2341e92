use std::fmt;

/// Errors that can occur while building a [`Filter`](crate::Filter).
///
/// Request handling itself never fails: malformed headers degrade to
/// defaults and break-in attempts are reported as an
/// [`Outcome`](crate::Outcome), not as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A reserved-path pattern failed to compile
    InvalidPattern {
        /// The pattern source as given to the builder
        pattern: String,
        /// The regex compiler's message
        message: String,
    },
}

impl Error {
    pub(crate) fn invalid_pattern(pattern: impl Into<String>, source: &regex::Error) -> Self {
        Error::InvalidPattern {
            pattern: pattern.into(),
            message: source.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPattern { pattern, message } => {
                write!(f, "Invalid reserved pattern '{}': {}", pattern, message)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_pattern() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = Error::invalid_pattern("(", &source);

        let text = err.to_string();
        assert!(text.starts_with("Invalid reserved pattern '('"));
    }
}
