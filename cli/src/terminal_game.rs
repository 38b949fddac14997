use std::time::Duration;

use tictactoe_engine::games::SessionRng;
use tictactoe_engine::games::tictactoe::{
    Handle, HandleRequest, Outcome, PlayStyle, Player, Session, SessionState, calculate_move,
};
use tictactoe_engine::log;

use crate::cli_config::{CliConfig, GameMode, MarkChoice};
use crate::input::{Console, parse_move};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seat {
    Human,
    Bot,
}

struct Participant {
    handle: Handle,
    seat: Seat,
}

pub fn resolve_mark(choice: MarkChoice, rng: &mut SessionRng) -> Player {
    match choice {
        MarkChoice::X => Player::X,
        MarkChoice::O => Player::O,
        MarkChoice::Random => {
            if rng.random_bool() {
                Player::X
            } else {
                Player::O
            }
        }
    }
}

fn seat_participants(
    session: &mut Session,
    config: &CliConfig,
    rng: &mut SessionRng,
) -> Result<Vec<Participant>, Box<dyn std::error::Error>> {
    let seats = match config.mode {
        GameMode::Singleplayer => {
            let human = resolve_mark(config.mark, rng);
            vec![
                (HandleRequest::Specific(human), Seat::Human),
                (HandleRequest::WhateverIsLeft, Seat::Bot),
            ]
        }
        GameMode::Multiplayer => vec![
            (HandleRequest::WhateverIsLeft, Seat::Human),
            (HandleRequest::WhateverIsLeft, Seat::Human),
        ],
        GameMode::Watch => vec![
            (HandleRequest::WhateverIsLeft, Seat::Bot),
            (HandleRequest::WhateverIsLeft, Seat::Bot),
        ],
    };

    let mut participants = Vec::with_capacity(seats.len());
    for (request, seat) in seats {
        let handle = session.assign_handle(request)?;
        participants.push(Participant { handle, seat });
    }
    Ok(participants)
}

async fn play_bot_turn(
    session: &mut Session,
    handle: &Handle,
    style: PlayStyle,
    delay: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    tokio::time::sleep(delay).await;

    let board = *session.board();
    let player = handle.player();
    let position = tokio::task::spawn_blocking(move || calculate_move(&board, player, style)).await??;

    session.submit_move(handle, position)?;
    println!("Bot ({}) plays {}{}", player, position.row, position.col);
    Ok(())
}

/// `Ok(false)` when stdin closed before a valid move was read.
async fn play_human_turn(
    session: &mut Session,
    handle: &Handle,
    console: &mut Console,
) -> Result<bool, Box<dyn std::error::Error>> {
    let message = format!("{} to move. Enter row and column, e.g. 11:", handle.player());

    loop {
        let Some(line) = console.prompt(&message).await? else {
            return Ok(false);
        };

        let Some(position) = parse_move(&line) else {
            println!("Could not read a move from '{}'", line.trim());
            continue;
        };

        match session.submit_move(handle, position) {
            Ok(_) => return Ok(true),
            Err(e) => println!("{}", e),
        }
    }
}

fn announce(session: &Session, participants: &[Participant], mode: GameMode) {
    let Some(line) = session.winning_line() else {
        println!("The game has ended in a draw.");
        return;
    };
    let winner = line.player;

    let winner_seat = participants
        .iter()
        .find(|p| p.handle.player() == winner)
        .map(|p| p.seat);

    match (mode, winner_seat) {
        (GameMode::Singleplayer, Some(Seat::Human)) => println!("The game has ended. You won as {}!", winner),
        (GameMode::Singleplayer, Some(Seat::Bot)) => println!("The game has ended. The bot won as {}.", winner),
        _ => println!("The game has ended. Winner: {}", winner),
    }
    println!("Winning line: {} to {}", line.start(), line.end());
}

/// Plays one game to the end. Returns `None` if the player walked away.
pub async fn run_game(
    config: &CliConfig,
    rng: &mut SessionRng,
    console: &mut Console,
) -> Result<Option<Outcome>, Box<dyn std::error::Error>> {
    let mut session = Session::new();
    let participants = seat_participants(&mut session, config, rng)?;
    let delay = Duration::from_millis(config.bot_delay_ms);

    log!("[session:{}] Started {:?} game with {:?} play", session.id(), config.mode, config.play_style);
    println!("{}", session.board());

    let outcome = loop {
        let player = match session.state() {
            SessionState::Finished(outcome) => break outcome,
            SessionState::AwaitingMove(player) => player,
        };

        let Some(participant) = participants.iter().find(|p| p.handle.player() == player) else {
            return Err(format!("No participant holds {}", player).into());
        };

        match participant.seat {
            Seat::Bot => play_bot_turn(&mut session, &participant.handle, config.play_style, delay).await?,
            Seat::Human => {
                if !play_human_turn(&mut session, &participant.handle, console).await? {
                    log!("[session:{}] Abandoned", session.id());
                    return Ok(None);
                }
            }
        }

        println!("{}", session.board());
    };

    announce(&session, &participants, config.mode);
    Ok(Some(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_fixed_marks() {
        let mut rng = SessionRng::new(1);

        assert_eq!(resolve_mark(MarkChoice::X, &mut rng), Player::X);
        assert_eq!(resolve_mark(MarkChoice::O, &mut rng), Player::O);
    }

    #[test]
    fn test_resolve_random_mark_is_reproducible() {
        let picks = |seed| {
            let mut rng = SessionRng::new(seed);
            (0..16)
                .map(|_| resolve_mark(MarkChoice::Random, &mut rng))
                .collect::<Vec<_>>()
        };

        assert_eq!(picks(99), picks(99));
    }

    #[test]
    fn test_singleplayer_seats_bot_on_remaining_mark() {
        let mut session = Session::new();
        let config = CliConfig {
            mark: MarkChoice::O,
            ..CliConfig::default()
        };

        let participants = seat_participants(&mut session, &config, &mut SessionRng::new(3)).unwrap();

        assert_eq!(participants[0].handle.player(), Player::O);
        assert_eq!(participants[0].seat, Seat::Human);
        assert_eq!(participants[1].handle.player(), Player::X);
        assert_eq!(participants[1].seat, Seat::Bot);
    }

    #[tokio::test]
    async fn test_watch_mode_game_ends_in_draw() {
        let config = CliConfig {
            mode: GameMode::Watch,
            bot_delay_ms: 0,
            ..CliConfig::default()
        };
        let mut rng = SessionRng::new(5);
        let mut console = Console::new();

        let outcome = run_game(&config, &mut rng, &mut console).await.unwrap();

        assert_eq!(outcome, Some(Outcome::Draw));
    }
}
