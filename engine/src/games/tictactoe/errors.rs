use crate::SessionId;
use super::types::{Mark, Outcome, Player, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    Occupied { position: Position, mark: Mark },
    OutOfBounds { position: Position },
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::Occupied { position, mark } => {
                write!(f, "Cell {} is already marked with {}", position, mark)
            }
            IllegalMove::OutOfBounds { position } => {
                write!(f, "Position {} is out of bounds", position)
            }
        }
    }
}

impl std::error::Error for IllegalMove {}

/// The search was asked for a move on a board that has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoMovesAvailable {
    pub outcome: Outcome,
}

impl std::fmt::Display for NoMovesAvailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No moves available, game is {}", self.outcome)
    }
}

impl std::error::Error for NoMovesAvailable {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    SymbolAlreadyTaken { player: Player },
    SessionFull,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::SymbolAlreadyTaken { player } => {
                write!(f, "Symbol {} is already taken", player)
            }
            SessionError::SessionFull => write!(f, "Session already has two players"),
        }
    }
}

impl std::error::Error for SessionError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    ForeignHandle { session_id: SessionId },
    GameFinished { outcome: Outcome },
    NotYourTurn { player: Player },
    IllegalMove(IllegalMove),
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::ForeignHandle { session_id } => {
                write!(f, "Handle belongs to session {}", session_id)
            }
            MoveError::GameFinished { outcome } => write!(f, "Game is already over: {}", outcome),
            MoveError::NotYourTurn { player } => write!(f, "Not your turn, {}", player),
            MoveError::IllegalMove(e) => write!(f, "Illegal move: {}", e),
        }
    }
}

impl std::error::Error for MoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveError::IllegalMove(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IllegalMove> for MoveError {
    fn from(e: IllegalMove) -> Self {
        MoveError::IllegalMove(e)
    }
}
