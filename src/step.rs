/// Traceback step stored in every cell of a [`crate::TracebackMatrix`].
///
/// A step is the set of predecessor moves that reach the cell with its
/// optimal score. The numeric codes are fixed and part of the type:
///
/// | code | step         | moves            |
/// |------|--------------|------------------|
/// | 0    | `Stop`       | none             |
/// | 1    | `Diag`       | diag             |
/// | 2    | `Up`         | up               |
/// | 3    | `Left`       | left             |
/// | 4    | `DiagUp`     | diag, up         |
/// | 5    | `DiagLeft`   | diag, left       |
/// | 6    | `UpLeft`     | up, left         |
/// | 7    | `DiagUpLeft` | diag, up, left   |
///
/// Diagonal consumes a symbol of both sequences, up consumes a symbol of
/// sequence 1 against a gap, left consumes a symbol of sequence 2 against
/// a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Step {
    #[default]
    Stop = 0,
    Diag = 1,
    Up = 2,
    Left = 3,
    DiagUp = 4,
    DiagLeft = 5,
    UpLeft = 6,
    DiagUpLeft = 7,
}

impl Step {
    /// Single move for a first-found argmax index in evaluation order
    /// (0 = zero floor, 1 = diag, 2 = up, 3 = left).
    pub fn from_index(best: usize) -> Self {
        match best {
            0 => Step::Stop,
            1 => Step::Diag,
            2 => Step::Up,
            3 => Step::Left,
            _ => panic!("invalid candidate index {best}"),
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_stop(self) -> bool {
        self == Step::Stop
    }

    pub fn has_diag(self) -> bool {
        matches!(
            self,
            Step::Diag | Step::DiagUp | Step::DiagLeft | Step::DiagUpLeft
        )
    }

    pub fn has_up(self) -> bool {
        matches!(
            self,
            Step::Up | Step::DiagUp | Step::UpLeft | Step::DiagUpLeft
        )
    }

    pub fn has_left(self) -> bool {
        matches!(
            self,
            Step::Left | Step::DiagLeft | Step::UpLeft | Step::DiagUpLeft
        )
    }

    /// Number of predecessor moves, i.e. how many branches the walker opens.
    pub fn branches(self) -> usize {
        [self.has_diag(), self.has_up(), self.has_left()]
            .iter()
            .filter(|&&flag| flag)
            .count()
    }
}

impl TryFrom<u8> for Step {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Step::Stop,
            1 => Step::Diag,
            2 => Step::Up,
            3 => Step::Left,
            4 => Step::DiagUp,
            5 => Step::DiagLeft,
            6 => Step::UpLeft,
            7 => Step::DiagUpLeft,
            other => return Err(other),
        })
    }
}

/// Turns the first-found best candidate into a step carrying every tie.
///
/// `best` is the index of the first maximal candidate in evaluation order
/// (0 = zero floor, 1 = diag, 2 = up, 3 = left). Candidates evaluated
/// before `best` are strictly smaller, so only later ones are compared.
pub fn resolve(best: usize, diag: i64, up: i64, left: i64) -> Step {
    match best {
        0 => Step::Stop,
        1 => {
            if diag == up && diag == left {
                Step::DiagUpLeft
            } else if diag == up {
                Step::DiagUp
            } else if diag == left {
                Step::DiagLeft
            } else {
                Step::Diag
            }
        }
        2 => {
            if up == left {
                Step::UpLeft
            } else {
                Step::Up
            }
        }
        3 => Step::Left,
        _ => panic!("invalid candidate index {best}"),
    }
}
