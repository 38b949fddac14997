use super::board::Board;
use super::types::{Player, Position, WinningLine, BOARD_SIZE};

const fn p(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

/// Rows, then columns, then the two diagonals.
const LINES: [[Position; BOARD_SIZE]; 8] = [
    [p(0, 0), p(0, 1), p(0, 2)],
    [p(1, 0), p(1, 1), p(1, 2)],
    [p(2, 0), p(2, 1), p(2, 2)],
    [p(0, 0), p(1, 0), p(2, 0)],
    [p(0, 1), p(1, 1), p(2, 1)],
    [p(0, 2), p(1, 2), p(2, 2)],
    [p(0, 0), p(1, 1), p(2, 2)],
    [p(0, 2), p(1, 1), p(2, 0)],
];

pub fn check_win(board: &Board) -> Option<Player> {
    check_win_with_line(board).map(|line| line.player)
}

/// First completed line in check order. A position reached by legal play
/// has at most one winner, so later lines are not inspected.
pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    LINES.iter().find_map(|&[a, b, c]| {
        let player = board[a].player()?;
        if board[b] == board[a] && board[c] == board[a] {
            Some(WinningLine::new(player, [a, b, c]))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(notation: &str) -> Board {
        notation.parse().unwrap()
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        assert_eq!(check_win(&Board::new()), None);
    }

    #[test]
    fn test_every_row_wins() {
        for notation in ["XXX/OO./...", "OO./XXX/...", "OO./.../XXX"] {
            assert_eq!(check_win(&board(notation)), Some(Player::X), "{}", notation);
        }
    }

    #[test]
    fn test_every_column_wins() {
        for notation in ["OXX/O../O.X", "XOX/.O./XO.", "XXO/..O/X.O"] {
            assert_eq!(check_win(&board(notation)), Some(Player::O), "{}", notation);
        }
    }

    #[test]
    fn test_both_diagonals_win() {
        let down_right = check_win_with_line(&board("XO./OX./..X")).unwrap();
        assert_eq!(down_right.player, Player::X);
        assert_eq!(down_right.start(), Position::new(0, 0));
        assert_eq!(down_right.end(), Position::new(2, 2));

        let down_left = check_win_with_line(&board("XXO/XO./O..")).unwrap();
        assert_eq!(down_left.player, Player::O);
        assert_eq!(down_left.start(), Position::new(0, 2));
        assert_eq!(down_left.end(), Position::new(2, 0));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        assert_eq!(check_win(&board("XXO/.../...")), None);
    }

    #[test]
    fn test_full_board_with_line_is_a_win() {
        let full = board("XXX/OOX/XOO");

        assert_eq!(check_win(&full), Some(Player::X));
        assert_eq!(full.empty_cell_count(), 0);
    }
}
