/// Single coordinate axis used for board size and positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

/// Count type used for occupied-cell counts.
pub type CellCount = u16;

/// Game score. Never negative.
pub type Score = u32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Applies an `(dr, dc)` offset to `origin`, returning a value only when it remains inside a
/// `size`×`size` grid.
pub fn offset_within(origin: Coord2, offset: (usize, usize), size: Coord) -> Option<Coord2> {
    let row = usize::from(origin.0).checked_add(offset.0)?;
    let col = usize::from(origin.1).checked_add(offset.1)?;
    let size = usize::from(size);
    if row >= size || col >= size {
        return None;
    }
    Some((row as Coord, col as Coord))
}

/// Iterates every coordinate of a `size`×`size` grid in row-major order.
pub fn iter_coords(size: Coord) -> impl Iterator<Item = Coord2> {
    (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
}
