//! Optimal pairwise alignment of two nucleotide sequences with a linear
//! gap score: global (Needleman-Wunsch) and local (Smith-Waterman), with
//! enumeration of every co-optimal alignment.
//!
//! ```
//! use pairwise_aligner::{Aligner, AlignmentMode, ScoreParams, Sequence};
//!
//! let aligner = Aligner::default()
//!     .with_alignment_mode(AlignmentMode::Local)
//!     .with_scores(ScoreParams::new(1, -1, -2));
//! let alignments = aligner.align(&Sequence::new(b"AATCG"), &Sequence::new(b"AACG"));
//! assert_eq!(alignments.len(), 2);
//! assert_eq!(alignments[1].top(), "CG");
//! ```

use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

pub mod alignment_mode;
pub mod cli;
pub mod fill;
pub mod report;
pub mod scoring;
pub mod step;
pub mod traceback;

pub use alignment_mode::{AlignmentMode, AlignmentParams, TracebackMode};
pub use fill::{build_global, build_local};
pub use report::{trace_global, trace_local, write_alignments};
pub use scoring::{AlignmentStats, Position, ScoreMatrix};
pub use step::Step;
pub use traceback::{Alignment, Traceback, TracebackMatrix, TracebackOperation};

// Default DNA scoring
pub const DNA_MATCH: i32 = 1;
pub const DNA_MISMATCH: i32 = -1;
pub const DNA_GAP: i32 = -2;

/// Gap symbol in aligned strings.
pub const GAP: u8 = b'-';

#[derive(Debug, Error)]
pub enum AlignerError {
    #[error("Invalid scoring input: {0}")]
    InvalidScoringInput(String),
    #[error("Unknown alignment mode '{0}', expected 'local' or 'global'")]
    AmbiguousMode(String),
    #[error("Unknown traceback mode '{0}', expected 0 (one alignment) or 1 (all alignments)")]
    InvalidTracebackMode(String),
    #[error("Invalid sequence '{0}': only ASCII symbols can be aligned")]
    InvalidSequence(String),
    #[error("Failed to write alignments: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AlignerError>;

/// Linear scoring scheme: every column scores `match_score`, `mismatch`
/// or `gap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreParams {
    pub match_score: i32,
    pub mismatch: i32,
    pub gap: i32,
}

impl ScoreParams {
    pub fn new(match_score: i32, mismatch: i32, gap: i32) -> Self {
        Self {
            match_score,
            mismatch,
            gap,
        }
    }
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            match_score: DNA_MATCH,
            mismatch: DNA_MISMATCH,
            gap: DNA_GAP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    data: Vec<u8>,
}

impl Sequence {
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One symbol per byte, so text input must be ASCII. A multi-byte
/// character would otherwise be split across several columns.
impl FromStr for Sequence {
    type Err = AlignerError;

    fn from_str(s: &str) -> Result<Self> {
        if !s.is_ascii() {
            return Err(AlignerError::InvalidSequence(s.to_string()));
        }
        Ok(Self::new(s.as_bytes()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Aligner {
    params: AlignmentParams,
}

impl Aligner {
    pub fn new(params: AlignmentParams) -> Self {
        Self { params }
    }

    pub fn with_alignment_mode(mut self, mode: AlignmentMode) -> Self {
        self.params.mode = mode;
        self
    }

    pub fn with_traceback_mode(mut self, traceback: TracebackMode) -> Self {
        self.params.traceback = traceback;
        self
    }

    pub fn with_scores(mut self, scores: ScoreParams) -> Self {
        self.params.scores = scores;
        self
    }

    pub fn params(&self) -> &AlignmentParams {
        &self.params
    }

    /// Score and traceback matrices for the configured mode.
    pub fn matrices(&self, seq1: &Sequence, seq2: &Sequence) -> (ScoreMatrix, TracebackMatrix) {
        let all_ties = self.params.traceback.all_ties();
        match self.params.mode {
            AlignmentMode::Global => build_global(
                &self.params.scores,
                seq1.as_bytes(),
                seq2.as_bytes(),
                all_ties,
            ),
            AlignmentMode::Local => build_local(
                &self.params.scores,
                seq1.as_bytes(),
                seq2.as_bytes(),
                all_ties,
            ),
        }
    }

    /// Builds the matrices and hands the lazily traced alignments to `f`.
    fn with_alignments<T>(
        &self,
        seq1: &Sequence,
        seq2: &Sequence,
        f: impl FnOnce(&mut dyn Iterator<Item = Alignment>) -> T,
    ) -> T {
        let (scores, steps) = self.matrices(seq1, seq2);
        let (a, b) = (seq1.as_bytes(), seq2.as_bytes());
        match self.params.mode {
            AlignmentMode::Global => {
                let score = scores.get(a.len(), b.len());
                f(&mut trace_global(a, b, &steps, score))
            }
            AlignmentMode::Local => f(&mut trace_local(
                a,
                b,
                &scores,
                &steps,
                self.params.traceback.all_ties(),
            )),
        }
    }

    /// Every reported alignment, in traceback order.
    pub fn align(&self, seq1: &Sequence, seq2: &Sequence) -> Vec<Alignment> {
        self.with_alignments(seq1, seq2, |alignments| alignments.collect())
    }

    /// Streams the reported alignments to `writer` without collecting
    /// them; returns how many were written.
    pub fn report<W: Write>(&self, seq1: &Sequence, seq2: &Sequence, writer: &mut W) -> Result<usize> {
        log::debug!(
            "{} alignment of {} x {} symbols, {:?}",
            self.params.mode,
            seq1.len(),
            seq2.len(),
            self.params.scores
        );
        self.with_alignments(seq1, seq2, |alignments| {
            write_alignments(writer, alignments)
        })
    }
}
