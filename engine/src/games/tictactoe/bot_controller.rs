use serde::{Deserialize, Serialize};

use super::board::Board;
use super::errors::NoMovesAvailable;
use super::types::{BOARD_SIZE, Player, Position};

const MAX_PLIES: i32 = (BOARD_SIZE * BOARD_SIZE) as i32;

/// How the root of the search picks among scored candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayStyle {
    /// X takes the highest score, O the lowest. Faster wins and slower
    /// losses are preferred among lines with the same result.
    #[default]
    TrueOptimal,
    /// Every candidate is followed by an O reply and the highest score is
    /// taken, whoever is moving. Reproduces the behavior of the first
    /// release of the bot, including its weak play as O.
    LegacyGreedy,
}

/// Best move for `player` under [`PlayStyle::TrueOptimal`].
pub fn choose_move(board: &Board, player: Player) -> Result<Position, NoMovesAvailable> {
    calculate_move(board, player, PlayStyle::default())
}

/// Scores every empty cell in row-major order and returns the first one with
/// the best score. The caller's board is left untouched.
pub fn calculate_move(
    board: &Board,
    player: Player,
    style: PlayStyle,
) -> Result<Position, NoMovesAvailable> {
    let outcome = board.outcome();
    let available_moves = board.available_moves();

    if outcome.is_terminal() || available_moves.is_empty() {
        return Err(NoMovesAvailable { outcome });
    }

    let mut board = *board;
    let mut best: Option<(Position, i32)> = None;

    for position in available_moves {
        let score = {
            let mut speculation = board.speculate(position, player);
            match style {
                PlayStyle::TrueOptimal => {
                    minimax(&mut speculation, 1, player.opponent() == Player::X, true)
                }
                PlayStyle::LegacyGreedy => minimax(&mut speculation, 1, false, false),
            }
        };

        let improves = match best {
            None => true,
            Some((_, best_score)) => match (style, player) {
                (PlayStyle::TrueOptimal, Player::O) => score < best_score,
                _ => score > best_score,
            },
        };

        if improves {
            best = Some((position, score));
        }
    }

    best.map(|(position, _)| position)
        .ok_or(NoMovesAvailable { outcome })
}

/// Plain minimax value of `board`: `1` if X can force a win, `-1` if O can,
/// `0` otherwise. `is_maximizing` says whether X is to move.
pub fn evaluate(board: &Board, is_maximizing: bool) -> i32 {
    let mut board = *board;
    minimax(&mut board, 0, is_maximizing, false)
}

fn minimax(board: &mut Board, depth: i32, is_maximizing: bool, weight_by_depth: bool) -> i32 {
    let outcome = board.outcome();
    if outcome.is_terminal() {
        return if weight_by_depth {
            outcome.score() * (MAX_PLIES + 1 - depth)
        } else {
            outcome.score()
        };
    }

    let mover = if is_maximizing { Player::X } else { Player::O };
    let mut best_score = if is_maximizing { i32::MIN } else { i32::MAX };

    for position in board.available_moves() {
        let mut speculation = board.speculate(position, mover);
        let score = minimax(&mut speculation, depth + 1, !is_maximizing, weight_by_depth);

        best_score = if is_maximizing {
            best_score.max(score)
        } else {
            best_score.min(score)
        };
    }

    best_score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Mark, Outcome};

    fn board(notation: &str) -> Board {
        notation.parse().unwrap()
    }

    fn to_move(board: &Board) -> Player {
        if board.count(Mark::X) == board.count(Mark::O) {
            Player::X
        } else {
            Player::O
        }
    }

    fn play_out(mut board: Board, style: PlayStyle) -> Outcome {
        while !board.outcome().is_terminal() {
            let player = to_move(&board);
            let position = calculate_move(&board, player, style).unwrap();
            board.place(position, player).unwrap();
            let difference = board.count(Mark::X) as i32 - board.count(Mark::O) as i32;
            assert!(difference == 0 || difference == 1);
        }
        board.outcome()
    }

    /// Walks every line of play where `engine` answers with the search and
    /// the other side tries every legal move.
    fn assert_engine_never_loses(board: Board, engine: Player) {
        let outcome = board.outcome();
        if outcome.is_terminal() {
            assert_ne!(outcome.winner(), Some(engine.opponent()), "lost on\n{}", board);
            return;
        }

        let player = to_move(&board);
        if player == engine {
            let mut next = board;
            next.place(choose_move(&board, player).unwrap(), player).unwrap();
            assert_engine_never_loses(next, engine);
        } else {
            for position in board.empty_cells() {
                let mut next = board;
                next.place(position, player).unwrap();
                assert_engine_never_loses(next, engine);
            }
        }
    }

    #[test]
    fn test_empty_board_first_move_is_top_left() {
        assert_eq!(choose_move(&Board::new(), Player::X), Ok(Position::new(0, 0)));
    }

    #[test]
    fn test_legacy_empty_board_first_move_is_top_left() {
        let result = calculate_move(&Board::new(), Player::X, PlayStyle::LegacyGreedy);

        assert_eq!(result, Ok(Position::new(0, 0)));
    }

    #[test]
    fn test_second_player_completes_row() {
        let position = choose_move(&board("XX./OO./..."), Player::O).unwrap();

        assert_eq!(position, Position::new(1, 2));
    }

    #[test]
    fn test_legacy_second_player_takes_first_cell() {
        let position =
            calculate_move(&board("XX./OO./..."), Player::O, PlayStyle::LegacyGreedy).unwrap();

        assert_eq!(position, Position::new(0, 2));
    }

    #[test]
    fn test_prefers_immediate_win_over_slower_win() {
        let position = choose_move(&board("OO./XX./..."), Player::X).unwrap();

        assert_eq!(position, Position::new(1, 2));
    }

    #[test]
    fn test_second_player_blocks_row() {
        let position = choose_move(&board("XX./.O./..."), Player::O).unwrap();

        assert_eq!(position, Position::new(0, 2));
    }

    #[test]
    fn test_choose_move_is_deterministic_and_pure() {
        let board = board("X../.O./..X");
        let before = board;

        let first = choose_move(&board, Player::O);
        let second = choose_move(&board, Player::O);

        assert_eq!(first, second);
        assert_eq!(board, before);
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let full = board("XOX/XOO/OXX");

        let result = choose_move(&full, Player::X);

        assert_eq!(result, Err(NoMovesAvailable { outcome: Outcome::Draw }));
    }

    #[test]
    fn test_decided_board_has_no_moves() {
        let won = board("XXX/OO./...");

        let result = calculate_move(&won, Player::O, PlayStyle::LegacyGreedy);

        assert_eq!(result, Err(NoMovesAvailable { outcome: Outcome::XWon }));
    }

    #[test]
    fn test_evaluate_values() {
        assert_eq!(evaluate(&Board::new(), true), 0);
        assert_eq!(evaluate(&board("XX./OO./..."), true), 1);
        assert_eq!(evaluate(&board("XX./OO./..."), false), -1);
        assert_eq!(evaluate(&board("XXX/OO./..."), false), 1);
    }

    #[test]
    fn test_optimal_self_play_is_a_draw() {
        assert_eq!(play_out(Board::new(), PlayStyle::TrueOptimal), Outcome::Draw);
    }

    #[test]
    fn test_first_player_engine_never_loses() {
        assert_engine_never_loses(Board::new(), Player::X);
    }

    #[test]
    fn test_second_player_engine_never_loses() {
        assert_engine_never_loses(Board::new(), Player::O);
    }
}
