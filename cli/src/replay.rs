use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use woodblock_core::{Action, GameState, RandomSource, apply};

pub fn load_script(path: &Path) -> Result<Vec<Action>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read script {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid script {}", path.display()))
}

/// Applies every action in order. Rejected actions are logged and skipped, the way a player's
/// invalid tap would be.
pub fn run<R: RandomSource + ?Sized>(
    mut state: GameState,
    actions: &[Action],
    rng: &mut R,
) -> GameState {
    for (step, &action) in actions.iter().enumerate() {
        let (next, err) = apply(state, action, rng);
        if let Some(err) = err {
            log::warn!("step {step}: {action:?} rejected: {err}");
        }
        state = next;
    }
    log::info!(
        "replayed {} actions, score {}{}",
        actions.len(),
        state.score(),
        if state.is_game_over() { ", game over" } else { "" }
    );
    state
}
