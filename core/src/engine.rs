use serde::{Deserialize, Serialize};

use crate::*;

/// A discrete player action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Rotate the queued piece in `slot` a quarter turn clockwise.
    Rotate { slot: usize },
    /// Place the queued piece in `slot` with its top-left bounding-box corner at `origin`.
    Place { slot: usize, origin: Coord2 },
    /// Pay the swap cost to replace the whole queue.
    Swap,
}

/// What an accepted action did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Rotated {
        slot: usize,
    },
    Placed {
        slot: usize,
        cells: CellCount,
        lines: LineClear,
        score_delta: Score,
        refilled: bool,
        game_over: bool,
    },
    Swapped {
        cost: Score,
        game_over: bool,
    },
}

impl Outcome {
    pub const fn ends_game(&self) -> bool {
        match self {
            Self::Rotated { .. } => false,
            Self::Placed { game_over, .. } | Self::Swapped { game_over, .. } => *game_over,
        }
    }
}

/// Next state together with the outcome that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    pub outcome: Outcome,
}

/// Complete state of one game: board, ready queue, score and the terminal flag.
///
/// Transitions never mutate `self`; an accepted action yields a new value and a rejected one
/// leaves the caller holding the same state it had.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredState")]
pub struct GameState {
    config: GameConfig,
    board: Board,
    queue: PieceQueue,
    score: Score,
    game_over: bool,
}

/// Deserialized fields, checked by [`GameState::restore`] before use.
#[derive(Deserialize)]
struct StoredState {
    config: GameConfig,
    board: Board,
    queue: PieceQueue,
    score: Score,
    game_over: bool,
}

impl TryFrom<StoredState> for GameState {
    type Error = GameError;

    fn try_from(stored: StoredState) -> Result<Self> {
        Self::restore(
            stored.config,
            stored.board,
            stored.queue,
            stored.score,
            stored.game_over,
        )
    }
}

impl GameState {
    /// Default rules: 8×8 board, swap cost 100.
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        initialize(GameConfig::default(), rng)
    }

    /// Assembles a state from parts and recomputes the game-over flag.
    pub fn from_parts(
        config: GameConfig,
        board: Board,
        queue: PieceQueue,
        score: Score,
    ) -> Result<Self> {
        let game_over = is_game_over(&board, &queue);
        Self::restore(config, board, queue, score, game_over)
    }

    /// Assembles a state from parts, trusting the given game-over flag.
    pub fn restore(
        config: GameConfig,
        board: Board,
        queue: PieceQueue,
        score: Score,
        game_over: bool,
    ) -> Result<Self> {
        if board.size() != config.board_size {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self {
            config,
            board,
            queue,
            score,
            game_over,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_swap(&self) -> bool {
        !self.game_over && self.score >= self.config.swap_cost
    }

    /// Cells the piece in `slot` would fill at `origin`, for previews. `None` when the slot is
    /// empty or the placement is illegal.
    pub fn ghost(&self, slot: usize, origin: Coord2) -> Option<alloc::vec::Vec<Coord2>> {
        let piece = self.queue.get(slot)?;
        ghost_cells(&self.board, origin, &piece.shape)
    }

    /// Every legal placement for the current queue. Empty once the game is over.
    pub fn legal_moves(&self) -> alloc::vec::Vec<Move> {
        if self.game_over {
            return alloc::vec::Vec::new();
        }
        legal_moves(&self.board, &self.queue)
    }

    /// Applies `action`, returning the next state or the reason it was rejected.
    pub fn try_apply<R: RandomSource + ?Sized>(
        &self,
        action: Action,
        rng: &mut R,
    ) -> Result<Transition> {
        let transition = match action {
            Action::Rotate { slot } => self.rotate(slot),
            Action::Place { slot, origin } => self.place(slot, origin, rng),
            Action::Swap => self.swap(rng),
        };
        match &transition {
            Ok(Transition { state, outcome }) => {
                log::debug!("{action:?} accepted, score {}: {outcome:?}", state.score);
                if outcome.ends_game() {
                    log::debug!("game over with score {}", state.score);
                }
            }
            Err(err) => log::debug!("{action:?} rejected: {err}"),
        }
        transition
    }

    fn rotate(&self, slot: usize) -> Result<Transition> {
        self.queue.piece(slot)?;

        let mut next = self.clone();
        next.queue.rotate(slot)?;
        Ok(Transition {
            state: next,
            outcome: Outcome::Rotated { slot },
        })
    }

    fn place<R: RandomSource + ?Sized>(
        &self,
        slot: usize,
        origin: Coord2,
        rng: &mut R,
    ) -> Result<Transition> {
        self.check_not_finished()?;
        let piece = self.queue.piece(slot)?;
        let cells =
            ghost_cells(&self.board, origin, &piece.shape).ok_or(GameError::InvalidPlacement)?;

        let mut next = self.clone();
        let piece = next.queue.take(slot)?;
        next.board.occupy(cells, piece.color);
        let placed = piece.cell_count();

        let lines = LineClear::detect(&next.board);
        lines.apply(&mut next.board);

        let bonus = lines.bonus(self.config.clear_bonus_unit);
        let score_delta = Score::from(placed).saturating_add(bonus);
        next.score = next.score.saturating_add(score_delta);

        let refilled = next.queue.refill_if_exhausted(rng);
        if refilled {
            log::debug!("queue exhausted, drew a new batch");
        }
        next.game_over = is_game_over(&next.board, &next.queue);

        let game_over = next.game_over;
        Ok(Transition {
            state: next,
            outcome: Outcome::Placed {
                slot,
                cells: placed,
                lines,
                score_delta,
                refilled,
                game_over,
            },
        })
    }

    fn swap<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Transition> {
        self.check_not_finished()?;
        let cost = self.config.swap_cost;
        let score = self
            .score
            .checked_sub(cost)
            .ok_or(GameError::InsufficientScore)?;

        let mut next = self.clone();
        next.score = score;
        next.queue.refill(rng);
        next.game_over = is_game_over(&next.board, &next.queue);

        let game_over = next.game_over;
        Ok(Transition {
            state: next,
            outcome: Outcome::Swapped { cost, game_over },
        })
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.game_over {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Starts a game: empty board, a full queue, zero score.
pub fn initialize<R: RandomSource + ?Sized>(config: GameConfig, rng: &mut R) -> GameState {
    let config = config.normalized();
    let board = Board::new(config.board_size);
    let queue = PieceQueue::drawn(rng);
    let game_over = is_game_over(&board, &queue);
    GameState {
        config,
        board,
        queue,
        score: 0,
        game_over,
    }
}

/// Consuming form of [`GameState::try_apply`]: always hands back a state, plus the rejection
/// reason when the action was refused. A rejected action returns `state` as it came in.
pub fn apply<R: RandomSource + ?Sized>(
    state: GameState,
    action: Action,
    rng: &mut R,
) -> (GameState, Option<GameError>) {
    match state.try_apply(action, rng) {
        Ok(transition) => (transition.state, None),
        Err(err) => (state, Some(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(rows: &[&str]) -> Option<Piece> {
        Some(Piece::new(Shape::from_rows(rows).unwrap(), ColorTag::Amber))
    }

    fn state_with(board: Board, slots: [Option<Piece>; 3], score: Score) -> GameState {
        GameState::from_parts(GameConfig::default(), board, PieceQueue::from_slots(slots), score)
            .unwrap()
    }

    #[test]
    fn initialize_draws_full_queue_on_empty_board() {
        let mut rng = SequenceSource::new([0, 1, 2, 3, 4, 5]);

        let state = GameState::new(&mut rng);

        assert!(state.board().is_empty());
        assert_eq!(state.board().size(), 8);
        assert_eq!(state.queue().len(), 3);
        assert_eq!(state.score(), 0);
        assert!(!state.is_game_over());
        assert_eq!(rng.draws(), 6);
    }

    #[test]
    fn place_scores_cells_and_empties_slot() {
        let state = state_with(Board::new(8), [piece(&["##", "##"]), piece(&["#"]), None], 0);
        let mut rng = SequenceSource::new([0]);

        let Transition { state: next, outcome } = state
            .try_apply(Action::Place { slot: 0, origin: (2, 2) }, &mut rng)
            .unwrap();

        assert_eq!(next.score(), 4);
        assert_eq!(next.board().filled_count(), 4);
        assert!(next.queue().get(0).is_none());
        assert_eq!(rng.draws(), 0);
        assert!(matches!(
            outcome,
            Outcome::Placed { cells: 4, score_delta: 4, refilled: false, game_over: false, .. }
        ));
        assert!(state.board().is_empty());
    }

    #[test]
    fn invalid_placement_leaves_state_unchanged() {
        let state = state_with(Board::new(8), [piece(&["####"]), None, None], 0);
        let mut rng = SequenceSource::new([0]);

        let action = Action::Place { slot: 0, origin: (0, 5) };

        let (next, err) = apply(state.clone(), action, &mut rng);

        assert_eq!(err, Some(GameError::InvalidPlacement));
        assert_eq!(next, state);
    }

    #[test]
    fn empty_or_missing_slot_is_rejected() {
        let state = state_with(Board::new(8), [piece(&["#"]), None, None], 0);
        let mut rng = SequenceSource::new([0]);

        for action in [
            Action::Place { slot: 1, origin: (0, 0) },
            Action::Place { slot: 3, origin: (0, 0) },
            Action::Rotate { slot: 2 },
            Action::Rotate { slot: 9 },
        ] {
            assert_eq!(
                state.try_apply(action, &mut rng),
                Err(GameError::InvalidQueueIndex)
            );
        }
    }

    #[test]
    fn rotate_changes_only_the_piece() {
        let state = state_with(Board::new(8), [None, piece(&["###"]), None], 40);
        let mut rng = SequenceSource::new([0]);

        let next = state.try_apply(Action::Rotate { slot: 1 }, &mut rng).unwrap().state;

        assert_eq!(next.queue().piece(1).unwrap().shape.dim(), (3, 1));
        assert_eq!(next.score(), 40);
        assert_eq!(next.board(), state.board());
    }

    #[test]
    fn last_piece_triggers_refill() {
        let state = state_with(Board::new(8), [None, None, piece(&["#"])], 0);
        let mut rng = SequenceSource::new([0, 0, 5, 1, 6, 2]);

        let transition = state
            .try_apply(Action::Place { slot: 2, origin: (7, 7) }, &mut rng)
            .unwrap();

        assert_eq!(transition.state.queue().len(), 3);
        assert!(matches!(transition.outcome, Outcome::Placed { refilled: true, .. }));
    }

    #[test]
    fn swap_is_gated_on_score() {
        let slots = [piece(&["#"]), piece(&["##"]), None];
        let mut rng = SequenceSource::new([5, 0]);

        let poor = state_with(Board::new(8), slots.clone(), 99);
        let (same, err) = apply(poor.clone(), Action::Swap, &mut rng);
        assert_eq!(err, Some(GameError::InsufficientScore));
        assert_eq!(same, poor);
        assert_eq!(rng.draws(), 0);

        let rich = state_with(Board::new(8), slots, 100);
        let next = rich.try_apply(Action::Swap, &mut rng).unwrap().state;
        assert_eq!(next.score(), 0);
        assert_eq!(next.queue().len(), 3);
        assert_eq!(next.queue().piece(2).unwrap().shape, catalog_shape(5).unwrap());
    }

    #[test]
    fn finished_game_rejects_place_and_swap_but_allows_rotate() {
        let mut board = Board::new(8);
        board.occupy(
            iter_coords(8).filter(|&(row, col)| (row + col) % 2 == 1),
            ColorTag::Red,
        );
        let state = state_with(board, [piece(&["##"]), None, None], 500);
        assert!(state.is_game_over());
        let mut rng = SequenceSource::new([0]);

        assert_eq!(
            state.try_apply(Action::Place { slot: 0, origin: (0, 0) }, &mut rng),
            Err(GameError::GameOver)
        );
        assert_eq!(state.try_apply(Action::Swap, &mut rng), Err(GameError::GameOver));
        let rotated = state.try_apply(Action::Rotate { slot: 0 }, &mut rng).unwrap();
        assert!(rotated.state.is_game_over());
        assert!(state.legal_moves().is_empty());
    }

    #[test]
    fn ghost_matches_placement_legality() {
        let state = state_with(Board::new(8), [piece(&["#.", "##"]), None, None], 0);

        assert_eq!(state.ghost(0, (6, 6)), Some(alloc::vec![(6, 6), (7, 6), (7, 7)]));
        assert_eq!(state.ghost(0, (7, 7)), None);
        assert_eq!(state.ghost(1, (0, 0)), None);
    }

    #[test]
    fn restore_rejects_mismatched_board() {
        let result = GameState::restore(
            GameConfig::default(),
            Board::new(6),
            PieceQueue::default(),
            0,
            false,
        );

        assert_eq!(result, Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn deserializing_rejects_malformed_boards() {
        let state = GameState::new(&mut SequenceSource::new([0]));
        let stored = serde_json::to_value(&state).unwrap();
        assert_eq!(serde_json::from_value::<GameState>(stored.clone()).unwrap(), state);

        let mut narrow = stored.clone();
        narrow["board"]["dim"] = serde_json::Value::from(alloc::vec![8, 4]);
        narrow["board"]["data"].as_array_mut().unwrap().truncate(32);
        assert!(serde_json::from_value::<GameState>(narrow).is_err());

        let mut resized = stored;
        resized["config"]["board_size"] = serde_json::Value::from(10);
        assert!(serde_json::from_value::<GameState>(resized).is_err());
    }
}
