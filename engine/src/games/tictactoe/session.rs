use crate::{SessionId, id_generator::generate_session_id, log};
use super::board::Board;
use super::bot_controller::{PlayStyle, calculate_move};
use super::errors::{MoveError, NoMovesAvailable, SessionError};
use super::types::{Outcome, Player, Position, WinningLine};

/// Which symbol a participant asks for when joining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleRequest {
    Specific(Player),
    /// X while both symbols are free, otherwise whichever one is left.
    WhateverIsLeft,
}

/// A participant's right to move for one symbol in one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handle {
    session_id: SessionId,
    player: Player,
}

impl Handle {
    pub fn player(&self) -> Player {
        self.player
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingMove(Player),
    Finished(Outcome),
}

/// One game between two handles. The outcome is always read off the board,
/// so there is no separate game-over flag to keep in sync.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    board: Board,
    current_turn: Player,
    available_players: Vec<Player>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(generate_session_id())
    }

    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            board: Board::new(),
            current_turn: Player::X,
            available_players: vec![Player::X, Player::O],
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.board.winning_line()
    }

    pub fn state(&self) -> SessionState {
        match self.board.outcome() {
            Outcome::InProgress => SessionState::AwaitingMove(self.current_turn),
            outcome => SessionState::Finished(outcome),
        }
    }

    pub fn is_my_turn(&self, handle: &Handle) -> bool {
        handle.session_id == self.id && self.state() == SessionState::AwaitingMove(handle.player)
    }

    pub fn assign_handle(&mut self, request: HandleRequest) -> Result<Handle, SessionError> {
        if self.available_players.is_empty() {
            return Err(SessionError::SessionFull);
        }

        let player = match request {
            HandleRequest::Specific(player) => {
                if !self.available_players.contains(&player) {
                    return Err(SessionError::SymbolAlreadyTaken { player });
                }
                player
            }
            HandleRequest::WhateverIsLeft => self.available_players[0],
        };

        self.available_players.retain(|&p| p != player);
        log!("[session:{}] Handle assigned for {}", self.id, player);

        Ok(Handle {
            session_id: self.id.clone(),
            player,
        })
    }

    pub fn submit_move(
        &mut self,
        handle: &Handle,
        position: Position,
    ) -> Result<SessionState, MoveError> {
        if handle.session_id != self.id {
            return Err(MoveError::ForeignHandle {
                session_id: handle.session_id.clone(),
            });
        }

        let player = match self.state() {
            SessionState::Finished(outcome) => return Err(MoveError::GameFinished { outcome }),
            SessionState::AwaitingMove(player) => player,
        };

        if handle.player != player {
            return Err(MoveError::NotYourTurn { player: handle.player });
        }

        if let Err(e) = self.board.place(position, player) {
            log!("[session:{}] {} failed to place mark at {}: {}", self.id, player, position, e);
            return Err(e.into());
        }

        let state = self.state();
        match state {
            SessionState::AwaitingMove(_) => {
                self.current_turn = player.opponent();
            }
            SessionState::Finished(outcome) => {
                log!("[session:{}] Game finished: {}", self.id, outcome);
            }
        }

        Ok(self.state())
    }

    /// Runs the search for the handle's symbol on the current board.
    pub fn suggest_move(
        &self,
        handle: &Handle,
        style: PlayStyle,
    ) -> Result<Position, NoMovesAvailable> {
        calculate_move(&self.board, handle.player, style)
    }
}
