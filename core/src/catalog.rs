use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Canonical shapes, `#` marks an occupied cell. Every pattern is a valid [`Shape`].
pub const SHAPE_PATTERNS: [&[&str]; 17] = [
    // dot
    &["#"],
    // lines
    &["##"],
    &["#", "#"],
    &["###"],
    &["#", "#", "#"],
    // box
    &["##", "##"],
    &["####"],
    &["#", "#", "#", "#"],
    // L and reverse L
    &["#.", "#.", "##"],
    &[".#", ".#", "##"],
    // T
    &["###", ".#."],
    // Z and S
    &["##.", ".##"],
    &[".##", "##."],
    // big L and big J
    &["###", "#.."],
    &["###", "..#"],
    // long L and long J
    &["##", "#.", "#."],
    &["##", ".#", ".#"],
];

/// Finite palette of color tags a piece can carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTag {
    Amber,
    Orange,
    Yellow,
    Red,
    Emerald,
    Cyan,
    Indigo,
    Rose,
}

impl ColorTag {
    pub const ALL: [Self; 8] = [
        Self::Amber,
        Self::Orange,
        Self::Yellow,
        Self::Red,
        Self::Emerald,
        Self::Cyan,
        Self::Indigo,
        Self::Rose,
    ];

    pub const fn name(self) -> &'static str {
        use ColorTag::*;
        match self {
            Amber => "amber",
            Orange => "orange",
            Yellow => "yellow",
            Red => "red",
            Emerald => "emerald",
            Cyan => "cyan",
            Indigo => "indigo",
            Rose => "rose",
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A shape with a color. Value object, identified only by the queue slot holding it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub shape: Shape,
    pub color: ColorTag,
}

impl Piece {
    pub fn new(shape: Shape, color: ColorTag) -> Self {
        Self { shape, color }
    }

    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            color: self.color,
        }
    }

    pub fn cell_count(&self) -> CellCount {
        self.shape.cell_count()
    }
}

/// Number of shapes in the catalog.
pub const fn shape_count() -> usize {
    SHAPE_PATTERNS.len()
}

/// Catalog shape at `index`, or `None` past the end.
pub fn catalog_shape(index: usize) -> Option<Shape> {
    SHAPE_PATTERNS.get(index).map(|&pattern| pattern_shape(pattern))
}

pub fn catalog_shapes() -> impl Iterator<Item = Shape> {
    SHAPE_PATTERNS.iter().map(|&pattern| pattern_shape(pattern))
}

/// Draws a shape then a color, one uniform draw each.
pub fn draw_piece<R: RandomSource + ?Sized>(rng: &mut R) -> Piece {
    let shape_index = rng.next_index(SHAPE_PATTERNS.len()) % SHAPE_PATTERNS.len();
    let color_index = rng.next_index(ColorTag::ALL.len()) % ColorTag::ALL.len();
    Piece {
        shape: pattern_shape(SHAPE_PATTERNS[shape_index]),
        color: ColorTag::ALL[color_index],
    }
}

fn pattern_shape(pattern: &[&str]) -> Shape {
    let rows = pattern.len();
    let cols = pattern[0].len();
    let mask = Array2::from_shape_fn((rows, cols), |(r, c)| pattern[r].as_bytes()[c] == b'#');
    Shape::from_mask_unchecked(mask)
}
