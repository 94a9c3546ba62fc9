use alloc::vec::Vec;

use crate::*;

/// Whether `shape` anchored at `origin` fits on `board`.
///
/// Every occupied offset must land inside the board on an empty cell. This is the only legality
/// check in the crate: placement, ghost preview and the game-over search all go through it.
pub fn check_placement(board: &Board, origin: Coord2, shape: &Shape) -> bool {
    let size = board.size();
    shape.occupied_offsets().all(|offset| {
        offset_within(origin, offset, size).is_some_and(|coords| !board.is_occupied(coords))
    })
}

/// Board cells that placing `shape` at `origin` would fill, or `None` when the placement is
/// illegal. Used for ghost previews and for the placement itself.
pub fn ghost_cells(board: &Board, origin: Coord2, shape: &Shape) -> Option<Vec<Coord2>> {
    if !check_placement(board, origin, shape) {
        return None;
    }
    let size = board.size();
    shape
        .occupied_offsets()
        .map(|offset| offset_within(origin, offset, size))
        .collect()
}

/// All origins at which `shape` can be placed, in row-major order.
pub fn legal_origins<'a>(board: &'a Board, shape: &'a Shape) -> impl Iterator<Item = Coord2> + 'a {
    iter_coords(board.size()).filter(move |&origin| check_placement(board, origin, shape))
}
