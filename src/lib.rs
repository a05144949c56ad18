//! A minimalist, byte-oriented backtracking regular-expression matcher.
//!
//! Patterns are scanned once into a bracket/branch analysis, then matched
//! against a subject with a recursive backtracker — no compilation to an
//! automaton, no Unicode-aware classes (character classes test ASCII byte
//! ranges only). See [`Pattern`] for the compile-once, match-many API, or
//! [`try_match`] to compile and match in one call.

pub mod capture;
pub mod error;
pub mod limits;
mod matcher;
pub mod pattern;
mod syntax;

pub use capture::Capture;
pub use error::MatchError;
pub use limits::Flags;
pub use pattern::{MatchOutcome, Pattern};

/// Compile `pattern` and match it against `subject` in one call.
///
/// For matching the same pattern against many subjects, compile once with
/// [`Pattern::compile`] and call [`Pattern::find_at`] repeatedly instead.
///
/// # Errors
/// Returns [`MatchError::NoMatch`] if the pattern is well-formed but does
/// not match, or another [`MatchError`] variant if the pattern is
/// malformed or matching hits a structural problem.
///
/// # Examples
/// ```
/// use byteregex::try_match;
///
/// let outcome = try_match("(bc)", b"abcdef").unwrap();
/// assert_eq!(outcome.end, 3);
/// assert_eq!(
///     outcome.captures.first().unwrap().unwrap().as_bytes(b"abcdef"),
///     b"bc",
/// );
/// ```
pub fn try_match(pattern: &str, subject: &[u8]) -> Result<MatchOutcome, MatchError> {
    Pattern::compile(pattern)?.find_at(subject)
}
