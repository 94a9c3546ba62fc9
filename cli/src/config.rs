use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use woodblock_core::GameConfig;

/// Reads rules from a TOML file. Missing keys keep their defaults; the board size is clamped into
/// the supported range.
pub fn load(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read rules file {}", path.display()))?;
    parse(&text).with_context(|| format!("invalid rules file {}", path.display()))
}

pub fn parse(text: &str) -> Result<GameConfig> {
    let raw: GameConfig = toml::from_str(text)?;
    let config = raw.normalized();
    if config != raw {
        log::warn!(
            "board size {} out of range, using {}",
            raw.board_size,
            config.board_size
        );
    }
    Ok(config)
}
