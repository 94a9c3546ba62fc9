use alloc::string::String;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Queued piece as plain data: shape rows drawn with `#` and `.`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub rows: Vec<String>,
    pub color: ColorTag,
}

/// Plain nested-array view of a [`GameState`], meant for hosts that store or ship the state.
///
/// Restoring goes through [`GameSnapshot::validate`], so a hand-edited or truncated snapshot is
/// rejected instead of producing a state that breaks board invariants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub config: GameConfig,
    pub board: Vec<Vec<Option<ColorTag>>>,
    pub queue: [Option<PieceSnapshot>; QUEUE_SLOTS],
    pub score: Score,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let board = state
            .board()
            .cells()
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|cell| cell.color()).collect::<Vec<_>>())
            .collect();
        let queue = state.queue().slots().clone().map(|slot| slot.map(PieceSnapshot::from));

        Self {
            config: *state.config(),
            board,
            queue,
            score: state.score(),
            game_over: state.is_game_over(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let size = usize::from(self.config.board_size);
        if self.config.normalized() != self.config
            || self.board.len() != size
            || self.board.iter().any(|row| row.len() != size)
        {
            return Err(GameError::InvalidBoardShape);
        }
        for piece in self.queue.iter().flatten() {
            piece.to_piece()?;
        }
        Ok(())
    }

    pub fn to_state(&self) -> Result<GameState> {
        self.validate().inspect_err(|err| {
            log::warn!("Rejected game snapshot: {err}");
        })?;

        let size = usize::from(self.config.board_size);
        let cells = Array2::from_shape_fn((size, size), |(r, c)| Cell::from(self.board[r][c]));
        let board = Board::from_cells(cells)?;

        let mut slots: [Option<Piece>; QUEUE_SLOTS] = Default::default();
        for (slot, piece) in slots.iter_mut().zip(&self.queue) {
            *slot = piece.as_ref().map(PieceSnapshot::to_piece).transpose()?;
        }

        GameState::restore(
            self.config,
            board,
            PieceQueue::from_slots(slots),
            self.score,
            self.game_over,
        )
    }
}

impl PieceSnapshot {
    pub fn to_piece(&self) -> Result<Piece> {
        let rows: Vec<&str> = self.rows.iter().map(String::as_str).collect();
        Ok(Piece::new(Shape::from_rows(&rows)?, self.color))
    }
}

impl From<Piece> for PieceSnapshot {
    fn from(piece: Piece) -> Self {
        let rows = piece
            .shape
            .mask()
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(|&occupied| if occupied { '#' } else { '.' })
                    .collect::<String>()
            })
            .collect();
        Self {
            rows,
            color: piece.color,
        }
    }
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        Self::from_state(state)
    }
}

impl TryFrom<GameSnapshot> for GameState {
    type Error = GameError;

    fn try_from(snapshot: GameSnapshot) -> Result<Self> {
        snapshot.to_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn sample_state() -> GameState {
        let mut rng = SequenceSource::new([8, 2, 10, 4, 16, 7, 0, 0]);
        let state = GameState::new(&mut rng);
        state
            .try_apply(Action::Place { slot: 0, origin: (5, 0) }, &mut rng)
            .unwrap()
            .state
    }

    #[test]
    fn snapshot_is_plain_nested_data() {
        let state = sample_state();

        let snapshot = GameSnapshot::from_state(&state);

        assert_eq!(snapshot.board.len(), 8);
        assert_eq!(snapshot.board[5][0], Some(ColorTag::Yellow));
        assert_eq!(snapshot.board[7][1], Some(ColorTag::Yellow));
        assert_eq!(snapshot.board[0][0], None);
        assert!(snapshot.queue[0].is_none());
        assert_eq!(
            snapshot.queue[1].as_ref().unwrap().rows,
            ["###".to_string(), ".#.".to_string()]
        );
        assert_eq!(snapshot.score, 4);
    }

    #[test]
    fn json_round_trip_restores_equal_state() {
        let state = sample_state();

        let json = serde_json::to_string(&GameSnapshot::from(&state)).unwrap();
        let restored: GameSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(GameState::try_from(restored).unwrap(), state);
    }

    #[test]
    fn ragged_board_is_rejected() {
        let mut snapshot = GameSnapshot::from_state(&sample_state());
        snapshot.board[3].pop();

        assert_eq!(snapshot.to_state(), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn board_not_matching_config_is_rejected() {
        let mut snapshot = GameSnapshot::from_state(&sample_state());
        snapshot.board.push(vec![None; 8]);

        assert_eq!(snapshot.validate(), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn broken_piece_is_rejected() {
        let mut snapshot = GameSnapshot::from_state(&sample_state());
        snapshot.queue[2] = Some(PieceSnapshot {
            rows: vec!["..".to_string()],
            color: ColorTag::Red,
        });

        assert_eq!(snapshot.to_state(), Err(GameError::InvalidShape));
    }
}
