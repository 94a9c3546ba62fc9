use woodblock_core::{Board, Cell, ColorTag, PieceQueue};

fn color_glyph(color: ColorTag) -> char {
    // first letter of the color name, uppercased
    color
        .name()
        .chars()
        .next()
        .map_or('#', |c| c.to_ascii_uppercase())
}

/// Board as text, one line per row: `.` for empty cells, a color initial for filled ones.
pub fn board(board: &Board) -> String {
    let mut out = String::new();
    for row in board.rows() {
        for cell in row {
            out.push(match cell {
                Cell::Empty => '.',
                Cell::Filled(color) => color_glyph(color),
            });
        }
        out.push('\n');
    }
    out
}

/// Queue slots, each shape on its own block of lines.
pub fn queue(queue: &PieceQueue) -> String {
    let mut out = String::new();
    for (slot, piece) in queue.slots().iter().enumerate() {
        match piece {
            Some(piece) => out.push_str(&format!("[{slot}] {}\n{}\n", piece.color, piece.shape)),
            None => out.push_str(&format!("[{slot}] -\n")),
        }
    }
    out
}
