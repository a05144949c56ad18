//! Error types returned by pattern compilation and matching.

use thiserror::Error;

/// Errors surfaced while compiling a pattern or matching it against a
/// subject.
///
/// The `Display` text of each variant is the exact reason string documented
/// by the matcher's external contract; callers relying on the wording (e.g.
/// tests ported from the reference implementation) may compare
/// `.to_string()` output directly, while callers wanting to branch on the
/// failure kind should match on the variant itself.
///
/// # Examples
/// ```
/// use byteregex::error::MatchError;
///
/// assert_eq!(MatchError::NoMatch.to_string(), "No match");
/// assert_eq!(
///     MatchError::UnexpectedQuantifier.to_string(),
///     "Unexpected quantifier",
/// );
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// The pattern is syntactically valid but did not match the subject
    /// at any offset (or a sub-match within a larger attempt failed).
    #[error("No match")]
    NoMatch,
    /// A quantifier (`?`, `+`, `*`) appeared with no preceding atom to
    /// repeat.
    #[error("Unexpected quantifier")]
    UnexpectedQuantifier,
    /// Parentheses do not balance across the whole pattern.
    #[error("Unbalanced brackets")]
    UnbalancedBrackets,
    /// An invariant the matcher relies on was violated; reaching this
    /// indicates a bug rather than a malformed pattern or subject.
    #[error("Internal error")]
    Internal,
    /// A backslash escape names a character that has no recognised
    /// meaning.
    #[error("Invalid metacharacter")]
    InvalidMetacharacter,
    /// The pattern contains more `(` groups than `limits::MAX_BRACKETS`.
    #[error("Too many (. Increase MAX_BRACKETS")]
    TooManyBrackets,
    /// The pattern contains more `|` alternations than
    /// `limits::MAX_BRANCHES`.
    #[error("Too many |. Increase MAX_BRANCHES")]
    TooManyBranches,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_strings_match_the_external_contract() {
        assert_eq!(MatchError::NoMatch.to_string(), "No match");
        assert_eq!(
            MatchError::UnexpectedQuantifier.to_string(),
            "Unexpected quantifier"
        );
        assert_eq!(
            MatchError::UnbalancedBrackets.to_string(),
            "Unbalanced brackets"
        );
        assert_eq!(MatchError::Internal.to_string(), "Internal error");
        assert_eq!(
            MatchError::InvalidMetacharacter.to_string(),
            "Invalid metacharacter"
        );
        assert_eq!(
            MatchError::TooManyBrackets.to_string(),
            "Too many (. Increase MAX_BRACKETS"
        );
        assert_eq!(
            MatchError::TooManyBranches.to_string(),
            "Too many |. Increase MAX_BRANCHES"
        );
    }
}
