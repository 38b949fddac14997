//! 3×3 tic-tac-toe: board, exhaustive minimax search and two-handle sessions.

mod board;
mod bot_controller;
mod errors;
mod session;
mod types;
mod win_detector;

pub use board::{Board, ParseBoardError};
pub use bot_controller::{PlayStyle, calculate_move, choose_move, evaluate};
pub use errors::{IllegalMove, MoveError, NoMovesAvailable, SessionError};
pub use session::{Handle, HandleRequest, Session, SessionState};
pub use types::{BOARD_SIZE, Mark, Outcome, Player, Position, WinningLine};
pub use win_detector::{check_win, check_win_with_line};
