//! Ties the analyzer and resolver together into a reusable compiled
//! pattern.

use crate::capture::Capture;
use crate::error::MatchError;
use crate::limits::Flags;
use crate::matcher::{self, MatchContext};

use super::analyzer::{self, Analysis};
use super::resolver;

/// The outcome of a successful match: the subject span it covers and the
/// capture groups it populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Offset in the subject where the match begins.
    pub start: usize,
    /// Offset in the subject one past the end of the match.
    pub end: usize,
    /// One slot per `(` in the pattern, in pattern order. `None` where
    /// that group never participated in the winning match.
    pub captures: Vec<Option<Capture>>,
}

/// A pattern that has been scanned and resolved, ready to be matched
/// against any number of subjects.
///
/// Borrows the source pattern text for its lifetime, since bracket and
/// branch offsets in the analysis record point back into it.
///
/// # Examples
/// ```
/// use byteregex::pattern::Pattern;
///
/// let pattern = Pattern::compile("(bc)").expect("valid pattern");
/// let outcome = pattern.find_at(b"abcdef").expect("match exists");
/// assert_eq!(outcome.end, 3);
/// ```
#[derive(Debug, Clone)]
pub struct Pattern<'p> {
    text: &'p [u8],
    analysis: Analysis,
    flags: Flags,
}

impl<'p> Pattern<'p> {
    /// Compile `pattern` with default (case-sensitive) flags.
    ///
    /// # Errors
    /// Returns `Err` if the pattern is malformed: unbalanced brackets, an
    /// empty group, or more brackets/branches than `limits` allows.
    pub fn compile(pattern: &'p str) -> Result<Self, MatchError> {
        Self::compile_with_flags(pattern, Flags::default())
    }

    /// Compile `pattern` with explicit matching flags.
    ///
    /// # Errors
    /// Returns `Err` under the same conditions as [`Pattern::compile`].
    pub fn compile_with_flags(pattern: &'p str, flags: Flags) -> Result<Self, MatchError> {
        let text = pattern.as_bytes();
        let mut analysis = analyzer::analyze(text)?;
        resolver::resolve(&mut analysis);
        Ok(Self {
            text,
            analysis,
            flags,
        })
    }

    /// Find the first match of this pattern in `subject`, scanning
    /// successive start offsets until one succeeds (or the pattern is
    /// anchored with `^`, in which case only offset 0 is tried).
    ///
    /// **Alternation quirk:** when a bracket pair contains `|`, the
    /// branch-dispatcher tries every alternative and keeps the result of
    /// the *last* one tried, not the first that succeeds. This is a
    /// documented peculiarity reproduced from the reference
    /// implementation; see `DESIGN.md` for the worked example.
    ///
    /// # Errors
    /// Returns `Err(MatchError::NoMatch)` if no match is found (including
    /// against an empty subject, which is never attempted), or another
    /// `MatchError` variant if matching itself hits a structural problem
    /// (an invalid escape, a bare quantifier, or an internal invariant
    /// violation).
    pub fn find_at(&self, subject: &[u8]) -> Result<MatchOutcome, MatchError> {
        log::debug!(
            "find_at: pattern_len={} subject_len={}",
            self.text.len(),
            subject.len()
        );
        let ctx = MatchContext {
            pattern: self.text,
            analysis: &self.analysis,
            flags: self.flags,
        };
        let result = matcher::search(&ctx, subject);
        match &result {
            Ok((start, end, _)) => log::debug!("find_at: matched [{start}, {end})"),
            Err(err) => log::debug!("find_at: {err}"),
        }
        result.map(|(start, end, captures)| MatchOutcome {
            start,
            end,
            captures,
        })
    }
}
