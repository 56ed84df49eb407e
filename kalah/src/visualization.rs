use crate::{Board, Side, PITS_PER_SIDE};

/// Draws the board as seen from the south player.
///
/// North's pits run right to left along the top, south's pits left to right
/// along the bottom. North's store is on the left, south's on the right.
pub fn visualize_board(board: &Board) -> String {
    let north = pit_row(board, Side::North.pit_indices().rev());
    let south = pit_row(board, Side::South.pit_indices());
    let width = PITS_PER_SIDE * 4;

    let mut result = format!("    ╭{}╮\n", "─".repeat(width));
    result += &format!("    │{}│\n", north);
    result += &format!(
        "{:>3} │{}│ {}\n",
        board.store(Side::North),
        " ".repeat(width),
        board.store(Side::South)
    );
    result += &format!("    │{}│\n", south);
    result += &format!("    ╰{}╯", "─".repeat(width));
    result
}

fn pit_row(board: &Board, indices: impl Iterator<Item = usize>) -> String {
    indices.map(|i| format!(" {:>3}", board[i])).collect()
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", visualize_board(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_and_stores() {
        let board = Board::from_slots([1, 2, 3, 4, 5, 6, 10, 7, 8, 9, 10, 11, 12, 20]);
        let drawing = board.to_string();
        let lines: Vec<&str> = drawing.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "    │  12  11  10   9   8   7│");
        assert_eq!(lines[2], " 20 │                        │ 10");
        assert_eq!(lines[3], "    │   1   2   3   4   5   6│");
    }
}
