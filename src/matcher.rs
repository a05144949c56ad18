//! The recursive backtracker: a branch-dispatcher that tries each
//! alternative of a bracket pair, and an atom-sequencer that walks a
//! linear sub-pattern against a subject window.

use crate::capture::Capture;
use crate::error::MatchError;
use crate::limits::Flags;
use crate::pattern::analyzer::{Analysis, BracketPair};
use crate::syntax::{atom_len, is_quantifier_byte};

/// Borrowed view of a compiled pattern, threaded unchanged through every
/// recursive call. Carrying this by reference (rather than passing
/// `pattern`/`analysis`/`flags` separately) keeps the recursive signatures
/// manageable without giving up anything — nothing here is mutated.
pub(crate) struct MatchContext<'p> {
    pub(crate) pattern: &'p [u8],
    pub(crate) analysis: &'p Analysis,
    pub(crate) flags: Flags,
}

/// Try `pattern` against `subject` at every anchor offset, in order,
/// returning the first match. If the pattern begins with `^`, only offset
/// 0 is attempted.
///
/// Mirrors the source's outer scanning loop, including its sharpest edge
/// case: an empty subject is never attempted at all (the loop simply does
/// not run), so it always reports `NoMatch` regardless of pattern.
pub(crate) fn search(
    ctx: &MatchContext<'_>,
    subject: &[u8],
) -> Result<(usize, usize, Vec<Option<Capture>>), MatchError> {
    let anchored = ctx.pattern.first() == Some(&b'^');
    let num_captures = ctx.analysis.brackets.len().saturating_sub(1);
    let s_len = subject.len();

    let mut start = 0usize;
    while start < s_len {
        log::trace!("search: trying anchor {start}");
        let mut caps: Vec<Option<Capture>> = vec![None; num_captures];
        let window = subject.get(start..).ok_or(MatchError::Internal)?;
        let result = branch_dispatch(ctx, 0, window, start, &mut caps);

        if anchored {
            return result.map(|consumed| (start, start + consumed, caps));
        }
        if let Ok(consumed) = result {
            return Ok((start, start + consumed, caps));
        }
        start += 1;
    }

    Err(MatchError::NoMatch)
}

/// Try each alternative of bracket `bi` against `subject`, in pattern
/// order. `base` is the absolute offset of `subject[0]` in the original
/// subject, used to record capture positions.
///
/// Returns the result of the *last* alternative tried, not the first
/// success — a documented peculiarity of the source this crate reproduces
/// deliberately (see `DESIGN.md`). Callers wanting conventional
/// first-success alternation must not rely on this function directly.
fn branch_dispatch(
    ctx: &MatchContext<'_>,
    bi: usize,
    subject: &[u8],
    base: usize,
    caps: &mut [Option<Capture>],
) -> Result<usize, MatchError> {
    log::trace!("branch_dispatch: bracket={bi} subject_len={}", subject.len());
    let bracket = *ctx.analysis.brackets.get(bi).ok_or(MatchError::Internal)?;
    let bracket_len = bracket.len.ok_or(MatchError::Internal)?;

    let mut last = Err(MatchError::NoMatch);
    for alt in 0..=bracket.num_branches {
        let (start, end) = alternative_span(ctx, &bracket, bracket_len, alt)?;
        let re = ctx.pattern.get(start..end).ok_or(MatchError::Internal)?;
        last = atom_sequence(ctx, re, subject, base, bi, caps);
    }
    last
}

/// Compute the `[start, end)` pattern span of alternative `alt` of
/// `bracket`, where `alt` ranges over `0..=bracket.num_branches`.
fn alternative_span(
    ctx: &MatchContext<'_>,
    bracket: &BracketPair,
    bracket_len: usize,
    alt: usize,
) -> Result<(usize, usize), MatchError> {
    if bracket.num_branches == 0 {
        return Ok((bracket.ptr, bracket.ptr + bracket_len));
    }

    let start = if alt == 0 {
        bracket.ptr
    } else {
        let previous = ctx
            .analysis
            .branches
            .get(bracket.branches + alt - 1)
            .ok_or(MatchError::Internal)?;
        previous.offset + 1
    };
    let end = if alt == bracket.num_branches {
        bracket.ptr + bracket_len
    } else {
        let branch = ctx
            .analysis
            .branches
            .get(bracket.branches + alt)
            .ok_or(MatchError::Internal)?;
        branch.offset
    };
    Ok((start, end))
}

/// Walk `re` against `subject`, matching one atom per iteration and
/// applying quantifier/optional lookahead where present. `bi` is the
/// bracket index in scope; it is threaded by value and incremented
/// locally each time a `(` atom is encountered, reconstructing the global
/// bracket numbering the analyzer assigned during its own left-to-right
/// scan.
///
/// Returns the number of subject bytes consumed on success.
fn atom_sequence(
    ctx: &MatchContext<'_>,
    re: &[u8],
    subject: &[u8],
    base: usize,
    mut bi: usize,
    caps: &mut [Option<Capture>],
) -> Result<usize, MatchError> {
    log::trace!(
        "atom_sequence: re_len={} subject_len={} bracket={bi}",
        re.len(),
        subject.len()
    );
    let re_len = re.len();
    let s_len = subject.len();
    let mut i = 0usize;
    let mut j = 0usize;

    while i < re_len && j < s_len {
        let step = atom_len(re, i);
        if re.get(i).is_some_and(|&b| is_quantifier_byte(b)) {
            return Err(MatchError::UnexpectedQuantifier);
        }

        match re.get(i + step) {
            Some(&b'?') => {
                let atom = re.get(i..i + step).ok_or(MatchError::Internal)?;
                let remaining = subject.get(j..).ok_or(MatchError::Internal)?;
                let n = soft(atom_sequence(ctx, atom, remaining, base + j, bi, caps))?.unwrap_or(0);
                j += n;
                i += step + 1;
            }
            Some(&quant @ (b'+' | b'*')) => {
                return quantified_match(ctx, re, i, step, quant, subject, j, base, bi, caps);
            }
            _ => {
                let (consumed, extra) = match_atom(ctx, re, i, step, subject, j, base, &mut bi, caps)?;
                j += consumed;
                i += step + extra;
            }
        }
    }

    if i < re_len {
        let trailing_dollar = re.get(i) == Some(&b'$') && i + 1 == re_len;
        if !trailing_dollar {
            return Err(MatchError::NoMatch);
        }
    }

    Ok(j)
}

/// Treat `MatchError::NoMatch` as a soft failure (`Ok(None)`), propagating
/// every other variant as a hard error via `?`. Used by the optional and
/// quantifier loops, which need to distinguish "this attempt just didn't
/// match" from "the pattern itself is malformed".
fn soft(result: Result<usize, MatchError>) -> Result<Option<usize>, MatchError> {
    match result {
        Ok(n) => Ok(Some(n)),
        Err(MatchError::NoMatch) => Ok(None),
        Err(other) => Err(other),
    }
}

/// Match the single atom at `re[i..i+step]` against `subject[j..]`.
///
/// Returns `(bytes consumed in subject, extra pattern bytes to skip)`. The
/// second element is nonzero only for `(` atoms, which consume their
/// entire group body plus the closing `)` on top of `step`.
#[expect(
    clippy::too_many_arguments,
    reason = "mirrors the source's single recursive matcher frame; splitting \
              these into a struct would not make any of them less essential"
)]
fn match_atom(
    ctx: &MatchContext<'_>,
    re: &[u8],
    i: usize,
    step: usize,
    subject: &[u8],
    j: usize,
    base: usize,
    bi: &mut usize,
    caps: &mut [Option<Capture>],
) -> Result<(usize, usize), MatchError> {
    let byte = *re.get(i).ok_or(MatchError::Internal)?;
    let remaining = subject.get(j..).ok_or(MatchError::Internal)?;

    match byte {
        b'\\' => match_escape(ctx, re, i, remaining).map(|n| (n, 0)),
        b'(' => match_group(ctx, bi, subject, j, base, caps),
        b'^' => {
            if j == 0 {
                Ok((0, 0))
            } else {
                Err(MatchError::NoMatch)
            }
        }
        b'|' => Err(MatchError::Internal),
        b'$' => Err(MatchError::NoMatch),
        b'.' => consume_if(remaining, |_| true).map(|n| (n, 0)),
        other => consume_if(remaining, |b| ctx.flags.bytes_eq(b, other)).map(|n| (n, 0)),
    }
}

fn match_escape(
    ctx: &MatchContext<'_>,
    re: &[u8],
    i: usize,
    remaining: &[u8],
) -> Result<usize, MatchError> {
    let escaped = *re.get(i + 1).ok_or(MatchError::InvalidMetacharacter)?;
    match escaped {
        b'S' => consume_if(remaining, |b| !(b as char).is_ascii_whitespace()),
        b's' => consume_if(remaining, |b| (b as char).is_ascii_whitespace()),
        b'd' => consume_if(remaining, |b| b.is_ascii_digit()),
        b'+' | b'?' | b'*' | b'\\' | b'(' | b')' | b'^' | b'$' | b'.' | b'[' | b']' => {
            consume_if(remaining, |b| ctx.flags.bytes_eq(b, escaped))
        }
        _ => Err(MatchError::InvalidMetacharacter),
    }
}

fn match_group(
    ctx: &MatchContext<'_>,
    bi: &mut usize,
    subject: &[u8],
    j: usize,
    base: usize,
    caps: &mut [Option<Capture>],
) -> Result<(usize, usize), MatchError> {
    *bi += 1;
    let bracket = *ctx.analysis.brackets.get(*bi).ok_or(MatchError::Internal)?;
    let bracket_len = bracket.len.ok_or(MatchError::Internal)?;
    let remaining = subject.get(j..).ok_or(MatchError::Internal)?;

    let n = branch_dispatch(ctx, *bi, remaining, base + j, caps)?;
    if let Some(slot) = caps.get_mut(bi.checked_sub(1).ok_or(MatchError::Internal)?) {
        *slot = Some(Capture::new(base + j, n));
    }
    Ok((n, bracket_len + 1))
}

fn consume_if(subject: &[u8], predicate: impl FnOnce(u8) -> bool) -> Result<usize, MatchError> {
    match subject.first() {
        Some(&b) if predicate(b) => Ok(1),
        _ => Err(MatchError::NoMatch),
    }
}

/// Handle a `+`/`*` quantifier (with optional trailing `?` for
/// non-greedy) applied to the atom at `re[i..i+step]`.
#[expect(
    clippy::too_many_arguments,
    reason = "mirrors the source's single recursive matcher frame; splitting \
              these into a struct would not make any of them less essential"
)]
fn quantified_match(
    ctx: &MatchContext<'_>,
    re: &[u8],
    i: usize,
    step: usize,
    quant: u8,
    subject: &[u8],
    j: usize,
    base: usize,
    bi: usize,
    caps: &mut [Option<Capture>],
) -> Result<usize, MatchError> {
    let re_len = re.len();
    let mut quant_len = atom_len(re, i + step);
    let mut non_greedy = false;
    if re.get(i + step + quant_len) == Some(&b'?') {
        non_greedy = true;
        quant_len += 1;
    }
    let ni = i + step + quant_len;

    let atom = re.get(i..i + step).ok_or(MatchError::Internal)?;

    let mut j2 = j;
    let mut nj = 0usize;
    loop {
        let remaining = subject.get(j2..).ok_or(MatchError::Internal)?;
        let n1 = match soft(atom_sequence(ctx, atom, remaining, base, bi, caps))? {
            Some(n) => n,
            None => break,
        };
        if n1 == 0 {
            break;
        }

        if ni >= re_len {
            nj = j2 + n1;
        } else {
            let tail = re.get(ni..).ok_or(MatchError::Internal)?;
            let tail_subject = subject.get(j2 + n1..).ok_or(MatchError::Internal)?;
            if let Some(n2) = soft(atom_sequence(ctx, tail, tail_subject, base, bi, caps))? {
                if n2 > 0 {
                    nj = j2 + n1 + n2;
                }
            }
        }

        if nj > 0 && non_greedy {
            break;
        }
        j2 += n1;
    }

    if quant == b'+' && nj == 0 {
        return Err(MatchError::NoMatch);
    }
    Ok(nj)
}
