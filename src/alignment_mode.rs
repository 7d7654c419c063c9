use crate::{AlignerError, ScoreParams};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentMode {
    #[default]
    Global, // Needleman-Wunsch
    Local, // Smith-Waterman
}

impl FromStr for AlignmentMode {
    type Err = AlignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "global" => Ok(AlignmentMode::Global),
            "local" => Ok(AlignmentMode::Local),
            _ => Err(AlignerError::AmbiguousMode(s.to_string())),
        }
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentMode::Global => write!(f, "global"),
            AlignmentMode::Local => write!(f, "local"),
        }
    }
}

/// Whether ties are kept while building and every optimal alignment is
/// reported, or a single alignment is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TracebackMode {
    One,
    #[default]
    All,
}

impl TracebackMode {
    pub fn all_ties(self) -> bool {
        self == TracebackMode::All
    }
}

impl FromStr for TracebackMode {
    type Err = AlignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(TracebackMode::One),
            "1" => Ok(TracebackMode::All),
            _ => Err(AlignerError::InvalidTracebackMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlignmentParams {
    pub mode: AlignmentMode,
    pub traceback: TracebackMode,
    pub scores: ScoreParams,
}
