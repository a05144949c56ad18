//! Assigns each bracket pair its range of owning branches.
//!
//! Runs once, after [`super::analyzer::analyze`] and before any matching
//! begins, so that every bracket pair knows its alternatives up front.

use super::analyzer::{Analysis, BracketPair, Branch};

/// Stable-sort the branch list by owning bracket, then record each
/// bracket's branch range.
pub(crate) fn resolve(analysis: &mut Analysis) {
    stable_sort_by_bracket(&mut analysis.branches);
    assign_branch_ranges(&mut analysis.brackets, &analysis.branches);
}

/// Adjacent-swap stable sort. A comparison sort with better asymptotics
/// would work just as well, but the bound of 100 branches makes the
/// difference academic, and a bubble pass is the simplest thing that is
/// obviously stable.
fn stable_sort_by_bracket(branches: &mut [Branch]) {
    let len = branches.len();
    for i in 0..len {
        for j in (i + 1)..len {
            let should_swap = match (branches.get(i), branches.get(j)) {
                (Some(a), Some(b)) => a.bracket_index > b.bracket_index,
                _ => false,
            };
            if should_swap {
                branches.swap(i, j);
            }
        }
    }
}

fn assign_branch_ranges(brackets: &mut [BracketPair], branches: &[Branch]) {
    let mut cursor = 0usize;
    for (index, bracket) in brackets.iter_mut().enumerate() {
        bracket.branches = cursor;
        let mut count = 0usize;
        while branches
            .get(cursor + count)
            .is_some_and(|branch| branch.bracket_index == index)
        {
            count += 1;
        }
        bracket.num_branches = count;
        cursor += count;
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise resolver fallibility")]
mod tests {
    use super::super::analyzer::analyze;
    use super::*;

    #[test]
    fn single_bracket_with_no_branches_gets_an_empty_range() {
        let mut analysis = analyze(b"foo").unwrap();
        resolve(&mut analysis);
        let outer = analysis.brackets.first().unwrap();
        assert_eq!(outer.branches, 0);
        assert_eq!(outer.num_branches, 0);
    }

    #[test]
    fn branches_are_grouped_under_their_owning_bracket() {
        let mut analysis = analyze(b"k(xx|yy)|ca|bc").unwrap();
        resolve(&mut analysis);

        let inner = analysis.brackets.get(1).unwrap();
        assert_eq!(inner.num_branches, 1);

        let outer = analysis.brackets.first().unwrap();
        assert_eq!(outer.num_branches, 2);
        assert_eq!(outer.branches, 1);
    }

    #[test]
    fn sort_preserves_left_to_right_order_within_a_bracket() {
        let mut analysis = analyze(b"a|b|c").unwrap();
        resolve(&mut analysis);
        let offsets: Vec<usize> = analysis.branches.iter().map(|b| b.offset).collect();
        assert_eq!(offsets, vec![1, 3]);
    }
}
