use serde::{Deserialize, Serialize};

use crate::ColorTag;

/// State of a single board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Filled(ColorTag),
}

impl Cell {
    pub const fn is_filled(self) -> bool {
        matches!(self, Self::Filled(_))
    }

    pub const fn color(self) -> Option<ColorTag> {
        match self {
            Self::Empty => None,
            Self::Filled(color) => Some(color),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<Option<ColorTag>> for Cell {
    fn from(color: Option<ColorTag>) -> Self {
        color.map_or(Self::Empty, Self::Filled)
    }
}
