use crate::scoring::{AlignmentStats, Position};
use crate::step::Step;
use crate::{ScoreParams, GAP};
use itertools::Itertools;
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracebackOperation {
    Match,
    Mismatch,
    /// Gap in the first sequence.
    Insertion,
    /// Gap in the second sequence.
    Deletion,
}

impl TracebackOperation {
    fn cigar_char(self) -> char {
        match self {
            TracebackOperation::Match => 'M',
            TracebackOperation::Mismatch => 'X',
            TracebackOperation::Insertion => 'I',
            TracebackOperation::Deletion => 'D',
        }
    }
}

/// One optimal alignment. `aligned_seq1` and `aligned_seq2` have equal
/// length and use `-` for gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub score: i64,
    pub aligned_seq1: Vec<u8>,
    pub aligned_seq2: Vec<u8>,
    /// Cell where the traceback stopped.
    pub start_position: Position,
    /// Seed cell the traceback started from.
    pub end_position: Position,
}

impl Alignment {
    pub fn len(&self) -> usize {
        self.aligned_seq1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_seq1.is_empty()
    }

    pub fn top(&self) -> String {
        String::from_utf8_lossy(&self.aligned_seq1).into_owned()
    }

    pub fn bottom(&self) -> String {
        String::from_utf8_lossy(&self.aligned_seq2).into_owned()
    }

    pub fn operations(&self) -> Vec<TracebackOperation> {
        self.aligned_seq1
            .iter()
            .zip(&self.aligned_seq2)
            .map(|(&a, &b)| match (a, b) {
                (GAP, _) => TracebackOperation::Insertion,
                (_, GAP) => TracebackOperation::Deletion,
                (a, b) if a == b => TracebackOperation::Match,
                _ => TracebackOperation::Mismatch,
            })
            .collect()
    }

    pub fn stats(&self) -> AlignmentStats {
        self.operations()
            .into_iter()
            .fold(AlignmentStats::default(), |mut acc, op| {
                match op {
                    TracebackOperation::Match => acc.matches += 1,
                    TracebackOperation::Mismatch => acc.mismatches += 1,
                    TracebackOperation::Insertion | TracebackOperation::Deletion => acc.gaps += 1,
                }
                acc
            })
    }

    /// Run-length encoded operations, e.g. `2M1D2M`.
    pub fn cigar(&self) -> String {
        self.operations()
            .into_iter()
            .dedup_with_count()
            .map(|(n, op)| format!("{}{}", n, op.cigar_char()))
            .collect()
    }

    /// Recomputes the score column by column from the aligned strings.
    pub fn rescore(&self, params: &ScoreParams) -> i64 {
        self.operations()
            .into_iter()
            .map(|op| match op {
                TracebackOperation::Match => i64::from(params.match_score),
                TracebackOperation::Mismatch => i64::from(params.mismatch),
                TracebackOperation::Insertion | TracebackOperation::Deletion => {
                    i64::from(params.gap)
                }
            })
            .sum()
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Alignment with score {}:", self.score)?;
        writeln!(f, "{}", self.top())?;
        write!(f, "{}", self.bottom())
    }
}

/// Dense row-major grid of [`Step`]s, same shape as the score matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracebackMatrix {
    data: Vec<Step>,
    rows: usize,
    cols: usize,
}

impl TracebackMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![Step::Stop; rows * cols],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn set(&mut self, row: usize, col: usize, value: Step) {
        self.data[row * self.cols + col] = value;
    }

    pub fn get(&self, row: usize, col: usize) -> Step {
        self.data[row * self.cols + col]
    }

    pub fn at(&self, pos: Position) -> Step {
        self.get(pos.i, pos.j)
    }

    /// Step codes row by row.
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.data
            .chunks(self.cols.max(1))
            .map(|row| row.iter().map(|step| step.code()).collect())
            .collect()
    }
}

impl fmt::Display for TracebackMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_codes() {
            writeln!(f, "{}", row.iter().map(|v| format!("{v:>2}")).join(""))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Move {
    Diag,
    Left,
    Up,
}

/// Partial alignment on the work-list. Columns are pushed back to front
/// and reversed when the path reaches a stop cell.
#[derive(Debug, Clone)]
struct Partial {
    rev_seq1: Vec<u8>,
    rev_seq2: Vec<u8>,
    pos: Position,
}

/// Lazily enumerates every alignment reachable from one seed cell by
/// following the steps of a [`TracebackMatrix`] back to a stop cell.
///
/// Branches are explored in the order diagonal, left, up: the first move
/// of a composite step continues the current path, the others are queued
/// at the back of the work-list.
pub struct Traceback<'a> {
    seq1: &'a [u8],
    seq2: &'a [u8],
    matrix: &'a TracebackMatrix,
    end: Position,
    score: i64,
    pending: VecDeque<Partial>,
}

impl<'a> Traceback<'a> {
    pub fn new(
        seq1: &'a [u8],
        seq2: &'a [u8],
        matrix: &'a TracebackMatrix,
        start: Position,
        score: i64,
    ) -> Self {
        assert!(
            start.i < matrix.rows() && start.j < matrix.cols(),
            "traceback seed {start:?} outside {}x{} matrix",
            matrix.rows(),
            matrix.cols()
        );
        let mut pending = VecDeque::new();
        pending.push_back(Partial {
            rev_seq1: Vec::new(),
            rev_seq2: Vec::new(),
            pos: start,
        });
        Self {
            seq1,
            seq2,
            matrix,
            end: start,
            score,
            pending,
        }
    }

    fn advance(&self, partial: &Partial, mv: Move) -> Partial {
        let Position { i, j } = partial.pos;
        let mut next = partial.clone();
        match mv {
            Move::Diag => {
                assert!(i > 0 && j > 0, "diagonal step out of matrix at {i},{j}");
                next.rev_seq1.push(self.seq1[i - 1]);
                next.rev_seq2.push(self.seq2[j - 1]);
                next.pos = Position::new(i - 1, j - 1);
            }
            Move::Left => {
                assert!(j > 0, "left step out of matrix at {i},{j}");
                next.rev_seq1.push(GAP);
                next.rev_seq2.push(self.seq2[j - 1]);
                next.pos = Position::new(i, j - 1);
            }
            Move::Up => {
                assert!(i > 0, "up step out of matrix at {i},{j}");
                next.rev_seq1.push(self.seq1[i - 1]);
                next.rev_seq2.push(GAP);
                next.pos = Position::new(i - 1, j);
            }
        }
        next
    }

    fn finish(&self, partial: Partial) -> Alignment {
        let Partial {
            mut rev_seq1,
            mut rev_seq2,
            pos,
        } = partial;
        rev_seq1.reverse();
        rev_seq2.reverse();
        Alignment {
            score: self.score,
            aligned_seq1: rev_seq1,
            aligned_seq2: rev_seq2,
            start_position: pos,
            end_position: self.end,
        }
    }
}

impl Iterator for Traceback<'_> {
    type Item = Alignment;

    fn next(&mut self) -> Option<Alignment> {
        loop {
            let partial = self.pending.pop_front()?;
            let step = self.matrix.at(partial.pos);
            if step.is_stop() {
                return Some(self.finish(partial));
            }

            let fork = step.branches();
            if fork > 1 {
                log::trace!("{}-way branch at {:?} ({:?})", fork, partial.pos, step);
            }
            let moves = [
                (step.has_diag(), Move::Diag),
                (step.has_left(), Move::Left),
                (step.has_up(), Move::Up),
            ];
            let mut successors = Vec::with_capacity(fork);
            successors.extend(
                moves
                    .iter()
                    .filter(|(flagged, _)| *flagged)
                    .map(|&(_, mv)| self.advance(&partial, mv)),
            );

            let mut successors = successors.into_iter();
            if let Some(first) = successors.next() {
                self.pending.push_front(first);
                self.pending.extend(successors);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_from_codes(codes: &[&[u8]]) -> TracebackMatrix {
        let mut matrix = TracebackMatrix::new(codes.len(), codes[0].len());
        for (i, row) in codes.iter().enumerate() {
            for (j, &code) in row.iter().enumerate() {
                matrix.set(i, j, Step::try_from(code).unwrap());
            }
        }
        matrix
    }

    fn pairs(traceback: Traceback) -> Vec<(String, String)> {
        traceback.map(|a| (a.top(), a.bottom())).collect()
    }

    #[test]
    fn follows_single_path() {
        // Global steps for AATCG / AACG in single mode.
        let matrix = matrix_from_codes(&[
            &[0, 3, 3, 3, 3],
            &[2, 1, 1, 3, 3],
            &[2, 1, 1, 3, 3],
            &[2, 2, 2, 1, 1],
            &[2, 2, 2, 1, 1],
            &[2, 2, 2, 2, 1],
        ]);
        let traceback = Traceback::new(b"AATCG", b"AACG", &matrix, Position::new(5, 4), 2);
        assert_eq!(
            pairs(traceback),
            vec![("AATCG".to_string(), "AA-CG".to_string())]
        );
    }

    #[test]
    fn branches_in_diag_left_up_order() {
        let matrix = matrix_from_codes(&[
            &[0, 3, 3, 3],
            &[2, 1, 3, 5],
            &[2, 2, 1, 3],
            &[2, 4, 2, 1],
            &[2, 2, 4, 2],
            &[2, 4, 2, 4],
            &[2, 2, 4, 2],
            &[2, 2, 4, 2],
        ]);
        let traceback = Traceback::new(b"ACACACC", b"ACA", &matrix, Position::new(7, 3), 5);
        let bottoms: Vec<String> = pairs(traceback).into_iter().map(|(_, b)| b).collect();
        assert_eq!(bottoms, vec!["--ACA--", "ACA----", "AC--A--", "A--CA--"]);
    }

    #[test]
    fn three_way_cell_forks_once_per_branch() {
        let matrix = matrix_from_codes(&[&[0, 3], &[2, 7]]);
        let seed = Position::new(1, 1);
        let forks = matrix.at(seed).branches();
        let found = pairs(Traceback::new(b"A", b"C", &matrix, seed, -1));
        assert_eq!(found.len(), forks);
        assert_eq!(
            found,
            vec![
                ("A".to_string(), "C".to_string()),
                ("A-".to_string(), "-C".to_string()),
                ("-A".to_string(), "C-".to_string()),
            ]
        );
    }

    #[test]
    fn seed_on_stop_cell_yields_empty_alignment() {
        let matrix = TracebackMatrix::new(2, 2);
        let mut traceback = Traceback::new(b"A", b"C", &matrix, Position::new(1, 1), 0);
        let alignment = traceback.next().unwrap();
        assert!(alignment.is_empty());
        assert_eq!(alignment.start_position, Position::new(1, 1));
        assert!(traceback.next().is_none());
    }

    #[test]
    #[should_panic(expected = "out of matrix")]
    fn step_off_the_matrix_panics() {
        let mut matrix = TracebackMatrix::new(2, 2);
        matrix.set(0, 1, Step::Up);
        let _ = Traceback::new(b"A", b"C", &matrix, Position::new(0, 1), 0).count();
    }

    #[test]
    fn alignment_helpers() {
        let alignment = Alignment {
            score: 2,
            aligned_seq1: b"AATCG".to_vec(),
            aligned_seq2: b"AA-CG".to_vec(),
            start_position: Position::new(0, 0),
            end_position: Position::new(5, 4),
        };
        assert_eq!(alignment.cigar(), "2M1D2M");
        assert_eq!(alignment.rescore(&ScoreParams::new(1, -1, -2)), 2);
        let stats = alignment.stats();
        assert_eq!((stats.matches, stats.mismatches, stats.gaps), (4, 0, 1));
        assert_eq!(
            alignment.to_string(),
            "Alignment with score 2:\nAATCG\nAA-CG"
        );

        let mismatched = Alignment {
            aligned_seq1: b"-GT".to_vec(),
            aligned_seq2: b"CAT".to_vec(),
            ..alignment
        };
        assert_eq!(
            mismatched.operations(),
            vec![
                TracebackOperation::Insertion,
                TracebackOperation::Mismatch,
                TracebackOperation::Match
            ]
        );
        assert_eq!(mismatched.cigar(), "1I1X1M");
    }
}
