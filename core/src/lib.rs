#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use catalog::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use lines::*;
pub use oracle::*;
pub use placement::*;
pub use queue::*;
pub use random::*;
pub use shape::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod catalog;
mod cell;
mod engine;
mod error;
mod lines;
mod oracle;
mod placement;
mod queue;
mod random;
mod shape;
mod snapshot;
mod types;

pub const DEFAULT_BOARD_SIZE: Coord = 8;
pub const MAX_BOARD_SIZE: Coord = 32;
pub const DEFAULT_SWAP_COST: Score = 100;
pub const DEFAULT_CLEAR_BONUS_UNIT: Score = 10;

/// Rules of a game. Travels with the state so a restored game keeps playing by its own rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: Coord,
    pub swap_cost: Score,
    pub clear_bonus_unit: Score,
}

impl GameConfig {
    pub const fn new_unchecked(
        board_size: Coord,
        swap_cost: Score,
        clear_bonus_unit: Score,
    ) -> Self {
        Self {
            board_size,
            swap_cost,
            clear_bonus_unit,
        }
    }

    pub fn new(board_size: Coord, swap_cost: Score, clear_bonus_unit: Score) -> Self {
        let board_size = board_size.clamp(1, MAX_BOARD_SIZE);
        Self::new_unchecked(board_size, swap_cost, clear_bonus_unit)
    }

    /// Same rules with the board size clamped into the supported range.
    pub fn normalized(self) -> Self {
        Self::new(self.board_size, self.swap_cost, self.clear_bonus_unit)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.board_size, self.board_size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_BOARD_SIZE, DEFAULT_SWAP_COST, DEFAULT_CLEAR_BONUS_UNIT)
    }
}
