use itertools::Itertools;
use std::fmt;

/// Cell coordinates: `i` indexes sequence 1 (rows), `j` sequence 2 (columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub i: usize,
    pub j: usize,
}

impl Position {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlignmentStats {
    pub matches: u32,
    pub mismatches: u32,
    pub gaps: u32,
}

impl AlignmentStats {
    pub fn columns(&self) -> u32 {
        self.matches + self.mismatches + self.gaps
    }

    /// Fraction of columns that are matches; 0 for an empty alignment.
    pub fn identity(&self) -> f64 {
        match self.columns() {
            0 => 0.0,
            n => self.matches as f64 / n as f64,
        }
    }
}

/// Dense row-major `(len1 + 1) x (len2 + 1)` grid of cell scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    data: Vec<i64>,
    rows: usize,
    cols: usize,
}

impl ScoreMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0; rows * cols],
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

    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        self.data[row * self.cols + col] = value;
    }

    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.cols + col]
    }

    pub fn at(&self, pos: Position) -> i64 {
        self.get(pos.i, pos.j)
    }

    /// Matrix-wide maximum. The matrix always has at least cell `(0, 0)`.
    pub fn max(&self) -> i64 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Every cell holding the matrix-wide maximum, in row-major order.
    pub fn max_positions(&self) -> Vec<Position> {
        let max = self.max();
        self.data
            .iter()
            .positions(|&score| score == max)
            .map(|idx| Position::new(idx / self.cols, idx % self.cols))
            .collect()
    }

    /// Cells row by row, for comparing against literal tables.
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.data
            .chunks(self.cols.max(1))
            .map(|row| row.to_vec())
            .collect()
    }
}

impl fmt::Display for ScoreMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols.max(1)) {
            writeln!(f, "{}", row.iter().map(|v| format!("{v:>4}")).join(""))?;
        }
        Ok(())
    }
}
