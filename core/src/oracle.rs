use alloc::vec::Vec;
use core::iter;
use serde::{Deserialize, Serialize};

use crate::*;

/// A legal placement: rotate the piece in `slot` clockwise `rotations` times, then place it at
/// `origin`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub slot: usize,
    pub rotations: u8,
    pub origin: Coord2,
}

impl Move {
    /// Actions that carry out this move: the rotations first, then the placement.
    pub fn actions(self) -> impl Iterator<Item = Action> {
        let slot = self.slot;
        iter::repeat_n(Action::Rotate { slot }, self.rotations.into()).chain(iter::once(
            Action::Place {
                slot,
                origin: self.origin,
            },
        ))
    }
}

/// Every legal move for every queued piece, all four rotations each, in slot, rotation and
/// row-major origin order. Symmetric shapes produce duplicate placements under different
/// rotation counts.
pub fn legal_moves(board: &Board, queue: &PieceQueue) -> Vec<Move> {
    let mut moves = Vec::new();
    for (slot, piece) in queue.iter() {
        for (rotations, shape) in (0..).zip(piece.shape.rotations().iter()) {
            moves.extend(legal_origins(board, shape).map(|origin| Move {
                slot,
                rotations,
                origin,
            }));
        }
    }
    moves
}

/// First legal move found by an exhaustive scan, or `None` when no queued piece fits anywhere in
/// any rotation.
pub fn find_any_move(board: &Board, queue: &PieceQueue) -> Option<Move> {
    queue.iter().find_map(|(slot, piece)| {
        (0..)
            .zip(piece.shape.rotations().iter())
            .find_map(|(rotations, shape)| {
                legal_origins(board, shape).next().map(|origin| Move {
                    slot,
                    rotations,
                    origin,
                })
            })
    })
}

/// The game is over when at least one piece is queued and none of them can be placed. An
/// exhausted queue is never game over, it gets refilled.
pub fn is_game_over(board: &Board, queue: &PieceQueue) -> bool {
    if queue.is_exhausted() {
        return false;
    }
    match find_any_move(board, queue) {
        Some(found) => {
            log::trace!("placement still possible: {found:?}");
            false
        }
        None => true,
    }
}
