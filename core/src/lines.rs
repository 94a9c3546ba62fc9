use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Full rows and columns found on a board snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineClear {
    pub rows: Vec<Coord>,
    pub columns: Vec<Coord>,
}

impl LineClear {
    /// Scans every row and column of `board` as it is now. Nothing is cleared.
    pub fn detect(board: &Board) -> Self {
        let size = board.size();
        Self {
            rows: (0..size).filter(|&row| board.is_row_full(row)).collect(),
            columns: (0..size).filter(|&col| board.is_column_full(col)).collect(),
        }
    }

    /// Rows and columns together, each line counted once.
    pub fn line_count(&self) -> usize {
        self.rows.len() + self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        self.rows.contains(&row) || self.columns.contains(&col)
    }

    /// Clears every detected line at once and returns the number of cells emptied. A cell on a
    /// full row and a full column is emptied once.
    pub fn apply(&self, board: &mut Board) -> CellCount {
        if self.is_empty() {
            return 0;
        }
        let cells: Vec<Coord2> = iter_coords(board.size())
            .filter(|&coords| self.contains(coords))
            .collect();
        board.clear(cells.iter().copied());
        // bounded by the board area
        cells.len() as CellCount
    }

    pub fn bonus(&self, unit: Score) -> Score {
        clear_bonus(self.line_count(), unit)
    }
}

/// Combo bonus for clearing `lines` lines in one placement: `n(n+1)/2 * unit`.
/// Saturates at `Score::MAX`.
pub const fn clear_bonus(lines: usize, unit: Score) -> Score {
    let n = if lines > Score::MAX as usize {
        Score::MAX
    } else {
        lines as Score
    };
    // halve the even factor first so n + 1 never overflows
    let triangle = if n % 2 == 0 {
        (n / 2).saturating_mul(n + 1)
    } else {
        n.saturating_mul(n / 2 + 1)
    };
    triangle.saturating_mul(unit)
}
