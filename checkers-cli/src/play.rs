//! Play command - interactive game in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: game loop (human turn, automated turn)
//! - Level 3: command parsing, event reporting
//! - Level 4: configuration

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};

use checkers_core::{Game, GameConfig, GameMode, HeuristicOpponent, Move, Side, Square};

use crate::render::{describe_event, render_board};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Human vs the heuristic opponent
    Single,
    /// Two humans sharing the terminal
    Hotseat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    Red,
    Black,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Red => Side::Red,
            SideArg::Black => Side::Black,
        }
    }
}

#[derive(Args)]
pub struct PlayArgs {
    /// Who controls the sides
    #[arg(long, value_enum, default_value_t = ModeArg::Single)]
    pub mode: ModeArg,

    /// Side played by the human in single-player mode
    #[arg(long, value_enum, default_value_t = SideArg::Red)]
    pub side: SideArg,

    /// Pause before each opponent move, in milliseconds
    #[arg(long, default_value = "500")]
    pub ai_delay_ms: u64,
}

/// A line of user input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Move(Move),
    Select(Square),
    Moves,
    Board,
    Forfeit,
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  <r,c> <r,c>   move a piece, e.g. `5,0 4,1`
  <r,c>         show where a piece can go
  moves         list every legal move
  board         redraw the board
  forfeit       concede the game
  help          show this text
  quit          leave";

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the game from arguments
/// 2. Alternate human input and opponent moves until the game ends
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed);
    let mut game = config.new_game();
    let mut opponent = config.opponent();
    let delay = Duration::from_millis(args.ai_delay_ms);

    tracing::info!("Starting {:?} game", config.mode);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{}", HELP);
    println!("{}", render_board(game.board(), &[]));
    report_events(&mut game);

    while game.is_in_progress() {
        if game.is_automated_turn() {
            play_automated_turn(&mut game, &mut opponent, delay)?;
            continue;
        }

        prompt(&game)?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => handle_command(&mut game, command),
            Err(e) => println!("{}", e),
        }
    }

    if let Some(outcome) = game.outcome() {
        tracing::info!("Finished after {} plies: {}", game.plies(), outcome);
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - TURNS
// ============================================================================

/// Let the opponent play its full turn, pausing before each hop
fn play_automated_turn(
    game: &mut Game,
    opponent: &mut HeuristicOpponent,
    delay: Duration,
) -> Result<()> {
    let side = game.side_to_move();

    while game.is_in_progress() && game.side_to_move() == side {
        thread::sleep(delay);
        let mv = opponent
            .choose_move(game)
            .context("Opponent could not choose a move")?;
        game.submit_move(mv);
        println!("{}", render_board(game.board(), &[]));
        report_events(game);
    }

    Ok(())
}

/// Apply one human command
fn handle_command(game: &mut Game, command: Command) {
    match command {
        Command::Move(mv) => {
            if game.submit_move(mv) {
                println!("{}", render_board(game.board(), game.destinations()));
                report_events(game);
            } else {
                println!("Illegal move: {} - {}", mv.from, mv.to);
            }
        }
        Command::Select(sq) => {
            if game.select_piece(sq) {
                println!("{}", render_board(game.board(), game.destinations()));
                if game.destinations().is_empty() {
                    println!("{} cannot move.", sq);
                }
            } else {
                println!("You cannot select {}.", sq);
            }
        }
        Command::Moves => {
            for mv in game.legal_moves() {
                println!("  {} {}", mv.from, mv.to);
            }
        }
        Command::Board => println!("{}", render_board(game.board(), game.destinations())),
        Command::Forfeit => {
            game.forfeit();
            report_events(game);
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn parse_command(line: &str) -> Result<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();

    let command = match words.as_slice() {
        ["moves"] => Command::Moves,
        ["board"] => Command::Board,
        ["forfeit"] => Command::Forfeit,
        ["help"] | [] => Command::Help,
        ["quit"] | ["exit"] => Command::Quit,
        [sq] => Command::Select(parse_square(sq)?),
        [from, to] => Command::Move(Move::new(parse_square(from)?, parse_square(to)?)),
        _ => bail!("Unrecognised input, try `help`"),
    };

    Ok(command)
}

fn parse_square(text: &str) -> Result<Square> {
    text.parse::<Square>()
        .with_context(|| format!("Expected a square like `5,0`, got `{}`", text))
}

fn prompt(game: &Game) -> Result<()> {
    let mut out = io::stdout();
    write!(out, "{:?}> ", game.side_to_move())?;
    out.flush().context("Failed to flush stdout")
}

/// Print and discard pending events
fn report_events(game: &mut Game) {
    for event in game.drain_events() {
        println!("{}", describe_event(&event));
    }
}

fn build_config(args: &PlayArgs, seed: Option<u64>) -> GameConfig {
    let mode = match args.mode {
        ModeArg::Single => GameMode::SinglePlayer {
            automated: Side::from(args.side).opponent(),
        },
        ModeArg::Hotseat => GameMode::TwoPlayer,
    };

    GameConfig {
        mode,
        opponent_seed: seed,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(
            parse_command("5,0 4,1").unwrap(),
            Command::Move(Move::new(sq(5, 0), sq(4, 1)))
        );
        assert_eq!(parse_command(" 5,2 ").unwrap(), Command::Select(sq(5, 2)));
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_command("moves").unwrap(), Command::Moves);
        assert_eq!(parse_command("").unwrap(), Command::Help);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_command("9,9 1,1").is_err());
        assert!(parse_command("a b c").is_err());
    }

    #[test]
    fn test_build_config_single_player() {
        let args = PlayArgs {
            mode: ModeArg::Single,
            side: SideArg::Black,
            ai_delay_ms: 0,
        };
        let config = build_config(&args, Some(5));
        assert_eq!(config.mode, GameMode::SinglePlayer { automated: Side::Red });
        assert_eq!(config.opponent_seed, Some(5));
    }

    #[test]
    fn test_handle_move_command() {
        let mut game = Game::start(GameMode::TwoPlayer);
        handle_command(&mut game, Command::Move(Move::new(sq(5, 0), sq(4, 1))));
        assert_eq!(game.side_to_move(), Side::Black);
        // Events were reported and drained
        assert!(game.events().is_empty());
    }

    #[test]
    fn test_automated_turn_moves_opponent() {
        let mut game = Game::start(GameMode::SinglePlayer { automated: Side::Red });
        let mut opponent = HeuristicOpponent::with_seed(1);
        play_automated_turn(&mut game, &mut opponent, Duration::ZERO).unwrap();
        assert_eq!(game.side_to_move(), Side::Black);
        assert_eq!(game.plies(), 1);
    }
}
