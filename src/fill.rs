//! Score and traceback matrix construction.
//!
//! Both builders evaluate the candidates of a cell in a fixed order and
//! keep the first maximum; with `all_ties` the step additionally records
//! every later candidate that ties with it. Cells are `i64` so that any
//! `i32` scoring scheme fits for any sequence shorter than `u32::MAX`.

use crate::scoring::ScoreMatrix;
use crate::step::{resolve, Step};
use crate::traceback::TracebackMatrix;
use crate::ScoreParams;

/// Index and value of the first maximal candidate.
fn first_best(candidates: &[i64]) -> (usize, i64) {
    candidates
        .iter()
        .copied()
        .enumerate()
        .fold((0, i64::MIN), |best, (idx, value)| {
            if value > best.1 {
                (idx, value)
            } else {
                best
            }
        })
}

fn substitution(params: &ScoreParams, a: u8, b: u8) -> i64 {
    if a == b {
        i64::from(params.match_score)
    } else {
        i64::from(params.mismatch)
    }
}

/// Needleman-Wunsch matrices for `seq1` (rows) against `seq2` (columns).
pub fn build_global(
    params: &ScoreParams,
    seq1: &[u8],
    seq2: &[u8],
    all_ties: bool,
) -> (ScoreMatrix, TracebackMatrix) {
    let (rows, cols) = (seq1.len() + 1, seq2.len() + 1);
    let mut scores = ScoreMatrix::new(rows, cols);
    let mut steps = TracebackMatrix::new(rows, cols);
    let gap = i64::from(params.gap);

    for i in 1..rows {
        scores.set(i, 0, i as i64 * gap);
        steps.set(i, 0, Step::Up);
    }
    for j in 1..cols {
        scores.set(0, j, j as i64 * gap);
        steps.set(0, j, Step::Left);
    }

    for (i, &a) in seq1.iter().enumerate() {
        for (j, &b) in seq2.iter().enumerate() {
            let diag = scores.get(i, j) + substitution(params, a, b);
            let up = scores.get(i, j + 1) + gap;
            let left = scores.get(i + 1, j) + gap;

            let (best, value) = first_best(&[diag, up, left]);
            // Candidate indices are shifted past the zero floor slot.
            let step = if all_ties {
                resolve(best + 1, diag, up, left)
            } else {
                Step::from_index(best + 1)
            };
            scores.set(i + 1, j + 1, value);
            steps.set(i + 1, j + 1, step);
        }
    }

    log::debug!(
        "global matrices {}x{}, end score {}",
        rows,
        cols,
        scores.get(rows - 1, cols - 1)
    );
    (scores, steps)
}

/// Smith-Waterman matrices for `seq1` (rows) against `seq2` (columns).
///
/// A cell whose best candidate ties with the zero floor is a stop cell,
/// even when a non-zero predecessor reaches the same score.
pub fn build_local(
    params: &ScoreParams,
    seq1: &[u8],
    seq2: &[u8],
    all_ties: bool,
) -> (ScoreMatrix, TracebackMatrix) {
    let (rows, cols) = (seq1.len() + 1, seq2.len() + 1);
    let mut scores = ScoreMatrix::new(rows, cols);
    let mut steps = TracebackMatrix::new(rows, cols);
    let gap = i64::from(params.gap);

    for (i, &a) in seq1.iter().enumerate() {
        for (j, &b) in seq2.iter().enumerate() {
            let diag = scores.get(i, j) + substitution(params, a, b);
            let up = scores.get(i, j + 1) + gap;
            let left = scores.get(i + 1, j) + gap;

            let (best, value) = first_best(&[0, diag, up, left]);
            let step = if all_ties {
                resolve(best, diag, up, left)
            } else {
                Step::from_index(best)
            };
            scores.set(i + 1, j + 1, value);
            steps.set(i + 1, j + 1, step);
        }
    }

    log::debug!(
        "local matrices {}x{}, best score {}",
        rows,
        cols,
        scores.max()
    );
    (scores, steps)
}
