use crate::scoring::{Position, ScoreMatrix};
use crate::traceback::{Alignment, Traceback, TracebackMatrix};
use crate::Result;
use std::io::Write;

/// All global alignments, traced from the bottom-right cell and labelled
/// with `score`.
pub fn trace_global<'a>(
    seq1: &'a [u8],
    seq2: &'a [u8],
    steps: &'a TracebackMatrix,
    score: i64,
) -> Traceback<'a> {
    Traceback::new(
        seq1,
        seq2,
        steps,
        Position::new(seq1.len(), seq2.len()),
        score,
    )
}

/// Local alignments traced from every cell holding the matrix maximum, in
/// row-major order. Each is labelled with its seed's score.
///
/// Without `all_ties` at most one alignment is produced and later seeds
/// are never traced. A matrix whose maximum is not positive has no local
/// alignment.
pub fn trace_local<'a>(
    seq1: &'a [u8],
    seq2: &'a [u8],
    scores: &'a ScoreMatrix,
    steps: &'a TracebackMatrix,
    all_ties: bool,
) -> impl Iterator<Item = Alignment> + 'a {
    let seeds = if scores.max() > 0 {
        scores.max_positions()
    } else {
        Vec::new()
    };
    log::debug!("{} local seed cells with score {}", seeds.len(), scores.max());

    let limit = if all_ties { usize::MAX } else { 1 };
    seeds
        .into_iter()
        .flat_map(move |seed| Traceback::new(seq1, seq2, steps, seed, scores.at(seed)))
        .take(limit)
}

/// Writes each alignment as a score header followed by its two rows and
/// returns how many were written.
pub fn write_alignments<W, I>(writer: &mut W, alignments: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Alignment>,
{
    let mut written = 0;
    for alignment in alignments {
        writeln!(writer, "{alignment}")?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}
