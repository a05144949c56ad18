//! One-pass scan over a pattern: records bracket-pair spans and alternation
//! points, and validates that brackets balance.

use crate::error::MatchError;
use crate::limits::{MAX_BRACKETS, MAX_BRANCHES};
use crate::syntax::atom_len;

/// A parenthesised group, or the implicit outermost group spanning the
/// whole pattern (always present at index 0).
#[derive(Debug, Clone, Copy)]
pub(crate) struct BracketPair {
    /// Offset in the pattern of the first byte after `(` (0 for the
    /// implicit outer pair).
    pub(crate) ptr: usize,
    /// Bytes between the matching `(` and `)`. `None` while the pair is
    /// still open during the scan.
    pub(crate) len: Option<usize>,
    /// Index into the branch list where this pair's alternatives begin.
    pub(crate) branches: usize,
    /// Count of `|` directly inside this pair, not counting nested pairs.
    pub(crate) num_branches: usize,
}

/// One `|` alternation point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Branch {
    /// The bracket pair this branch belongs to.
    pub(crate) bracket_index: usize,
    /// Offset in the pattern of the `|` byte.
    pub(crate) offset: usize,
}

/// The output of scanning a pattern: its bracket pairs and alternation
/// points, before the [`crate::pattern::resolver`] stage assigns branch
/// ranges.
#[derive(Debug, Clone)]
pub(crate) struct Analysis {
    pub(crate) brackets: Vec<BracketPair>,
    pub(crate) branches: Vec<Branch>,
}

/// Scan `pattern` and record its bracket pairs and alternation points.
///
/// Bracket 0 is pre-populated to span the whole pattern before the scan
/// begins. Bracket and branch indices are assigned in strict left-to-right
/// order of the pattern text, which the matcher later relies on to
/// reconstruct capture-group numbering during recursion.
pub(crate) fn analyze(pattern: &[u8]) -> Result<Analysis, MatchError> {
    let mut brackets = vec![BracketPair {
        ptr: 0,
        len: Some(pattern.len()),
        branches: 0,
        num_branches: 0,
    }];
    let mut branches = Vec::new();
    let mut depth = 0usize;

    let mut i = 0usize;
    while i < pattern.len() {
        let step = atom_len(pattern, i);
        match pattern.get(i) {
            Some(b'|') => record_branch(&brackets, &mut branches, depth, i)?,
            Some(b'(') => open_bracket(&mut brackets, &mut depth, i)?,
            Some(b')') => close_bracket(&mut brackets, &mut depth, pattern, i)?,
            _ => {}
        }
        i += step;
    }

    if depth != 0 {
        return Err(MatchError::UnbalancedBrackets);
    }

    Ok(Analysis { brackets, branches })
}

/// The bracket a branch at the current scan position belongs to: the most
/// recently opened bracket if it is still open, otherwise the current
/// nesting depth.
fn owning_bracket(brackets: &[BracketPair], depth: usize) -> Result<usize, MatchError> {
    match brackets.last() {
        Some(last) if last.len.is_none() => Ok(brackets.len() - 1),
        _ => Ok(depth),
    }
}

fn record_branch(
    brackets: &[BracketPair],
    branches: &mut Vec<Branch>,
    depth: usize,
    offset: usize,
) -> Result<(), MatchError> {
    if branches.len() >= MAX_BRANCHES {
        return Err(MatchError::TooManyBranches);
    }
    let bracket_index = owning_bracket(brackets, depth)?;
    branches.push(Branch {
        bracket_index,
        offset,
    });
    Ok(())
}

fn open_bracket(
    brackets: &mut Vec<BracketPair>,
    depth: &mut usize,
    offset: usize,
) -> Result<(), MatchError> {
    if brackets.len() >= MAX_BRACKETS {
        return Err(MatchError::TooManyBrackets);
    }
    *depth += 1;
    brackets.push(BracketPair {
        ptr: offset + 1,
        len: None,
        branches: 0,
        num_branches: 0,
    });
    Ok(())
}

fn close_bracket(
    brackets: &mut [BracketPair],
    depth: &mut usize,
    pattern: &[u8],
    offset: usize,
) -> Result<(), MatchError> {
    let ind = owning_bracket(brackets, *depth)?;
    let bracket = brackets.get_mut(ind).ok_or(MatchError::Internal)?;
    bracket.len = Some(offset - bracket.ptr);

    if *depth == 0 {
        return Err(MatchError::UnbalancedBrackets);
    }
    *depth -= 1;

    if offset > 0 && pattern.get(offset - 1) == Some(&b'(') {
        return Err(MatchError::NoMatch);
    }
    Ok(())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise analyzer fallibility")]
mod tests {
    use super::*;

    fn lens(analysis: &Analysis) -> Vec<Option<usize>> {
        analysis.brackets.iter().map(|b| b.len).collect()
    }

    #[test]
    fn pattern_with_no_brackets_has_only_the_outer_pair() {
        let analysis = analyze(b"foo").unwrap();
        assert_eq!(analysis.brackets.len(), 1);
        assert_eq!(lens(&analysis), vec![Some(3)]);
        assert!(analysis.branches.is_empty());
    }

    #[test]
    fn nested_groups_are_recorded_in_open_order() {
        let analysis = analyze(b"(a(b)c)").unwrap();
        assert_eq!(analysis.brackets.len(), 3);
        assert_eq!(analysis.brackets.get(1).unwrap().ptr, 1);
        assert_eq!(analysis.brackets.get(2).unwrap().ptr, 3);
        assert_eq!(lens(&analysis), vec![Some(7), Some(5), Some(1)]);
    }

    #[test]
    fn branch_at_top_level_belongs_to_the_outer_bracket() {
        let analysis = analyze(b"ca|bc").unwrap();
        assert_eq!(analysis.branches.len(), 1);
        let branch = analysis.branches.first().unwrap();
        assert_eq!(branch.bracket_index, 0);
        assert_eq!(branch.offset, 2);
    }

    #[test]
    fn branch_inside_a_group_belongs_to_that_group() {
        let analysis = analyze(b"k(xx|yy)|ca|bc").unwrap();
        let owners: Vec<usize> = analysis.branches.iter().map(|b| b.bracket_index).collect();
        assert_eq!(owners, vec![1, 0, 0]);
    }

    #[test]
    fn escaped_bytes_are_not_mistaken_for_metacharacters() {
        let analysis = analyze(br"\(a\)").unwrap();
        assert_eq!(analysis.brackets.len(), 1);
        assert!(analysis.branches.is_empty());
    }

    #[test]
    fn unmatched_open_bracket_is_unbalanced() {
        assert_eq!(analyze(b"(").unwrap_err(), MatchError::UnbalancedBrackets);
    }

    #[test]
    fn unmatched_close_bracket_is_unbalanced() {
        assert_eq!(analyze(b"a)").unwrap_err(), MatchError::UnbalancedBrackets);
    }

    #[test]
    fn empty_group_is_rejected_as_no_match() {
        assert_eq!(analyze(b"()").unwrap_err(), MatchError::NoMatch);
    }

    #[test]
    fn too_many_brackets_is_rejected() {
        let pattern: String = "(".repeat(MAX_BRACKETS);
        assert_eq!(
            analyze(pattern.as_bytes()).unwrap_err(),
            MatchError::TooManyBrackets
        );
    }

    #[test]
    fn too_many_branches_is_rejected() {
        let pattern: String = std::iter::repeat_n("a|", MAX_BRANCHES + 1).collect();
        assert_eq!(
            analyze(pattern.as_bytes()).unwrap_err(),
            MatchError::TooManyBranches
        );
    }
}
