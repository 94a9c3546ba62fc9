use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Largest bounding box side of any shape.
pub const MAX_SHAPE_SIDE: usize = 4;

/// Bounding-box occupancy matrix of a polyomino, indexed `[row, column]`.
///
/// Always between 1×1 and 4×4 with at least one occupied cell. Deserialization goes through the
/// same validation as [`Shape::from_mask`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Array2<bool>", into = "Array2<bool>")]
pub struct Shape {
    mask: Array2<bool>,
}

impl Shape {
    pub fn from_mask(mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mask.dim();
        if !(1..=MAX_SHAPE_SIDE).contains(&rows)
            || !(1..=MAX_SHAPE_SIDE).contains(&cols)
            || !mask.iter().any(|&occupied| occupied)
        {
            return Err(GameError::InvalidShape);
        }
        Ok(Self { mask })
    }

    pub(crate) fn from_mask_unchecked(mask: Array2<bool>) -> Self {
        Self { mask }
    }

    /// Builds a shape from text rows where `#` is occupied and `.` is empty.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if height == 0 || width == 0 || rows.iter().any(|row| row.len() != width) {
            return Err(GameError::InvalidShape);
        }

        let mut mask = Array2::from_elem([height, width], false);
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.bytes().enumerate() {
                mask[[r, c]] = match ch {
                    b'#' => true,
                    b'.' => false,
                    _ => return Err(GameError::InvalidShape),
                };
            }
        }

        Self::from_mask(mask)
    }

    pub fn mask(&self) -> &Array2<bool> {
        &self.mask
    }

    /// `(rows, columns)` of the bounding box.
    pub fn dim(&self) -> (usize, usize) {
        self.mask.dim()
    }

    pub fn is_occupied(&self, offset: (usize, usize)) -> bool {
        self.mask.get(offset).copied().unwrap_or(false)
    }

    /// Occupied `(row, column)` offsets in row-major order.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mask
            .indexed_iter()
            .filter(|&(_, &occupied)| occupied)
            .map(|(offset, _)| offset)
    }

    pub fn cell_count(&self) -> CellCount {
        // at most 16 cells
        self.mask.iter().filter(|&&occupied| occupied).count() as CellCount
    }

    /// Rotates a quarter turn clockwise: an `R×C` shape becomes `C×R` with
    /// `new[c][R-1-r] = old[r][c]`.
    pub fn rotated(&self) -> Self {
        let (rows, cols) = self.dim();
        let mask = Array2::from_shape_fn((cols, rows), |(c, nr)| self.mask[[rows - 1 - nr, c]]);
        Self { mask }
    }

    /// The shape in all four orientations, starting with itself. Symmetric shapes repeat.
    pub fn rotations(&self) -> [Self; 4] {
        let once = self.rotated();
        let twice = once.rotated();
        let thrice = twice.rotated();
        [self.clone(), once, twice, thrice]
    }
}

impl TryFrom<Array2<bool>> for Shape {
    type Error = GameError;

    fn try_from(mask: Array2<bool>) -> Result<Self> {
        Self::from_mask(mask)
    }
}

impl From<Shape> for Array2<bool> {
    fn from(shape: Shape) -> Self {
        shape.mask
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.mask.rows().into_iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for &occupied in row {
                f.write_str(if occupied { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}
