use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square occupancy grid. The size never changes after construction.
///
/// Indexing outside the grid panics. Callers are expected to go through [`check_placement`]
/// before mutating, which is the only gate for coordinates coming from the outside.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Array2<Cell>", into = "Array2<Cell>")]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub fn new(size: Coord) -> Self {
        Self {
            cells: Array2::default((size, size).to_nd_index()),
        }
    }

    pub fn from_cells(cells: Array2<Cell>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows != cols || rows == 0 || rows > usize::from(MAX_BOARD_SIZE) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { cells })
    }

    pub fn size(&self) -> Coord {
        // square and bounded by MAX_BOARD_SIZE, see constructors
        self.cells.nrows() as Coord
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// Rows top to bottom, each left to right.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Cell> + '_> + '_ {
        self.cells.rows().into_iter().map(|row| row.into_iter().copied())
    }

    pub fn cell(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn is_occupied(&self, coords: Coord2) -> bool {
        self.cell(coords).is_filled()
    }

    pub fn occupy(&mut self, cells: impl IntoIterator<Item = Coord2>, color: ColorTag) {
        for coords in cells {
            self.cells[coords.to_nd_index()] = Cell::Filled(color);
        }
    }

    pub fn clear(&mut self, cells: impl IntoIterator<Item = Coord2>) {
        for coords in cells {
            self.cells[coords.to_nd_index()] = Cell::Empty;
        }
    }

    pub fn filled_count(&self) -> CellCount {
        // at most MAX_BOARD_SIZE squared, fits
        self.cells.iter().filter(|cell| cell.is_filled()).count() as CellCount
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_filled())
    }

    pub fn is_row_full(&self, row: Coord) -> bool {
        self.cells
            .row(row.into())
            .iter()
            .all(|cell| cell.is_filled())
    }

    pub fn is_column_full(&self, col: Coord) -> bool {
        self.cells
            .column(col.into())
            .iter()
            .all(|cell| cell.is_filled())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

impl TryFrom<Array2<Cell>> for Board {
    type Error = GameError;

    fn try_from(cells: Array2<Cell>) -> Result<Self> {
        Self::from_cells(cells)
    }
}

impl From<Board> for Array2<Cell> {
    fn from(board: Board) -> Self {
        board.cells
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn deserializing_checks_the_grid() {
        let json = serde_json::to_string(&Array2::<Cell>::default((3, 2))).unwrap();
        assert_eq!(
            serde_json::from_str::<Board>(&json).unwrap_err().to_string(),
            GameError::InvalidBoardShape.to_string()
        );

        let json = serde_json::to_string(&Array2::<Cell>::default((33, 33))).unwrap();
        assert!(serde_json::from_str::<Board>(&json).is_err());

        let mut board = Board::new(4);
        board.occupy([(1, 2)], ColorTag::Indigo);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);
    }

    #[test]
    fn rows_walk_the_grid_in_order() {
        let mut board = Board::new(2);
        board.occupy([(1, 0)], ColorTag::Red);

        let rows: Vec<Vec<Cell>> = board.rows().map(|row| row.collect()).collect();

        assert_eq!(
            rows,
            [
                [Cell::Empty, Cell::Empty],
                [Cell::Filled(ColorTag::Red), Cell::Empty]
            ]
        );
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(8);

        assert_eq!(board.size(), 8);
        assert!(board.is_empty());
        assert_eq!(board.filled_count(), 0);
        assert!(iter_coords(8).all(|coords| !board.is_occupied(coords)));
    }

    #[test]
    fn occupy_and_clear_round_trip_cells() {
        let mut board = Board::new(8);

        board.occupy([(0, 0), (0, 1), (7, 7)], ColorTag::Cyan);
        assert_eq!(board.filled_count(), 3);
        assert_eq!(board[(7, 7)], Cell::Filled(ColorTag::Cyan));

        board.clear([(0, 1), (7, 7)]);
        assert_eq!(board.filled_count(), 1);
        assert_eq!(board.cell((0, 1)), Cell::Empty);
        assert!(board.is_occupied((0, 0)));
    }

    #[test]
    fn clone_is_independent() {
        let mut board = Board::new(4);
        let snapshot = board.clone();

        board.occupy([(1, 1)], ColorTag::Red);

        assert!(!snapshot.is_occupied((1, 1)));
        assert_ne!(board, snapshot);
    }

    #[test]
    fn get_out_of_range_is_none() {
        let board = Board::new(8);

        assert_eq!(board.get((8, 0)), None);
        assert_eq!(board.get((0, 8)), None);
        assert_eq!(board.get((3, 3)), Some(Cell::Empty));
    }

    #[test]
    #[should_panic]
    fn out_of_range_read_panics() {
        Board::new(8).is_occupied((8, 8));
    }

    #[test]
    fn full_row_and_column_detection() {
        let mut board = Board::new(4);
        board.occupy((0..4).map(|col| (2, col)), ColorTag::Amber);

        assert!(board.is_row_full(2));
        assert!(!board.is_row_full(1));
        assert!(!board.is_column_full(0));

        board.occupy((0..4).map(|row| (row, 0)), ColorTag::Amber);
        assert!(board.is_column_full(0));
    }

    #[test]
    fn from_cells_rejects_non_square() {
        assert_eq!(
            Board::from_cells(Array2::default([3, 4])),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            Board::from_cells(Array2::default([0, 0])),
            Err(GameError::InvalidBoardShape)
        );
        assert!(Board::from_cells(Array2::default([5, 5])).is_ok());
    }
}
