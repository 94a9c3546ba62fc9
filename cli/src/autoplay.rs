use serde::Serialize;
use woodblock_core::{
    GameConfig, GameState, Move, Outcome, RandomSource, SequenceSource, Transition, initialize,
};

use crate::render;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSummary {
    pub score: u32,
    pub placements: u32,
    pub lines_cleared: u32,
    pub game_over: bool,
    #[serde(skip)]
    pub final_state: GameState,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub games: Vec<GameSummary>,
    pub best_score: u32,
}

impl Summary {
    pub fn print(&self, show_boards: bool) {
        for (index, game) in self.games.iter().enumerate() {
            println!(
                "game {}: score {}, {} placements, {} lines{}",
                index + 1,
                game.score,
                game.placements,
                game.lines_cleared,
                if game.game_over { "" } else { " (move limit)" }
            );
            if show_boards {
                print!("{}", render::board(game.final_state.board()));
                print!("{}", render::queue(game.final_state.queue()));
                println!();
            }
        }
        println!("best: {}", self.best_score);
    }
}

/// Plays `games` games back to back with the same random source.
pub fn run<R: RandomSource + ?Sized>(
    config: GameConfig,
    rng: &mut R,
    games: u32,
    max_moves: u32,
) -> Summary {
    let games: Vec<_> = (0..games)
        .map(|_| play_game(initialize(config, rng), rng, max_moves))
        .collect();
    let best_score = games.iter().map(|game| game.score).max().unwrap_or(0);
    Summary { games, best_score }
}

/// Plays one game with the greedy policy until it ends or `max_moves` placements were made.
pub fn play_game<R: RandomSource + ?Sized>(
    mut state: GameState,
    rng: &mut R,
    max_moves: u32,
) -> GameSummary {
    let mut placements = 0;
    let mut lines_cleared = 0;

    'game: while !state.is_game_over() && placements < max_moves {
        let Some(chosen) = choose_move(&state, rng) else {
            break;
        };
        for action in chosen.actions() {
            match state.try_apply(action, rng) {
                Ok(Transition { state: next, outcome }) => {
                    if let Outcome::Placed { lines, .. } = &outcome {
                        placements += 1;
                        lines_cleared += lines.line_count() as u32;
                    }
                    state = next;
                }
                Err(err) => {
                    // legal moves come from the same state, so this is a bug in the engine
                    log::error!("legal move {chosen:?} rejected with {err}");
                    break 'game;
                }
            }
        }
    }

    log::info!(
        "game finished: score {}, {placements} placements",
        state.score()
    );
    GameSummary {
        score: state.score(),
        placements,
        lines_cleared,
        game_over: state.is_game_over(),
        final_state: state,
    }
}

/// Greedy policy: prefer moves that keep the game alive, then the largest immediate score.
/// Ties are broken uniformly with `rng`.
pub fn choose_move<R: RandomSource + ?Sized>(state: &GameState, rng: &mut R) -> Option<Move> {
    let mut best: Vec<Move> = Vec::new();
    let mut best_key = None;

    for candidate in state.legal_moves() {
        let Some(key) = evaluate(state, candidate) else {
            continue;
        };
        match best_key {
            Some(current) if key < current => {}
            Some(current) if key == current => best.push(candidate),
            _ => {
                best_key = Some(key);
                best.clear();
                best.push(candidate);
            }
        }
    }

    if best.is_empty() {
        return None;
    }
    let pick = rng.next_index(best.len());
    log::trace!("{} equally good moves, key {best_key:?}", best.len());
    Some(best[pick])
}

/// `(survives, score_delta)` of a move, simulated with a throwaway source so the lookahead does
/// not consume draws from the real one.
///
/// Survival is only judged within the current batch: a move that empties the queue refills it
/// with pieces the real source has not drawn yet, so it always counts as surviving.
fn evaluate(state: &GameState, candidate: Move) -> Option<(bool, u32)> {
    let mut lookahead = SequenceSource::new(vec![0]);
    let mut current = state.clone();
    let mut key = None;
    for action in candidate.actions() {
        let transition = current.try_apply(action, &mut lookahead).ok()?;
        if let Outcome::Placed {
            score_delta,
            refilled,
            game_over,
            ..
        } = transition.outcome
        {
            key = Some((refilled || !game_over, score_delta));
        }
        current = transition.state;
    }
    key
}
