//! Match command - heuristic opponent against itself
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use checkers_core::{Game, GameMode, HeuristicOpponent, Move, Outcome, Side};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Turns after which an unfinished game is abandoned
    #[arg(long, default_value = "200")]
    pub max_plies: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    /// `None` when the ply limit was reached first
    outcome: Option<Outcome>,
    plies: u32,
    #[allow(dead_code)] // Kept for replaying interesting games
    moves: Vec<Move>,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    red_wins: usize,
    black_wins: usize,
    draws: usize,
    unfinished: usize,
    avg_plies: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Play the games
/// 2. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting self-play match: {} games, max {} plies",
        args.games,
        args.max_plies
    );

    let results = play_match(&args, seed);

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games, each with its own opponent seed drawn from the match RNG
fn play_match(args: &MatchArgs, seed: Option<u64>) -> MatchResults {
    let mut rng = create_rng(seed);
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        let record = play_single_game(game_num + 1, rng.gen(), args.max_plies);

        tracing::info!(
            "Game {}: {} ({} plies)",
            record.game_number,
            outcome_label(record.outcome),
            record.plies
        );

        games.push(record);
    }

    compute_match_statistics(games)
}

fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        print_json_results(results)
    } else {
        print_text_results(results);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_game(game_number: usize, seed: u64, max_plies: u32) -> GameRecord {
    let mut opponent = HeuristicOpponent::with_seed(seed);
    let (game, moves) = opponent.play_game(Game::start(GameMode::SelfPlay), max_plies);

    GameRecord {
        game_number,
        outcome: game.outcome(),
        plies: game.plies(),
        moves,
    }
}

fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let count = |wanted: Option<Outcome>| games.iter().filter(|g| g.outcome == wanted).count();

    let red_wins = count(Some(Outcome::Win(Side::Red)));
    let black_wins = count(Some(Outcome::Win(Side::Black)));
    let draws = count(Some(Outcome::Draw));
    let unfinished = count(None);

    let total_plies: u32 = games.iter().map(|g| g.plies).sum();
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f32 / games.len() as f32
    };

    MatchResults {
        games,
        red_wins,
        black_wins,
        draws,
        unfinished,
        avg_plies,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn outcome_label(outcome: Option<Outcome>) -> String {
    match outcome {
        Some(outcome) => outcome.to_string(),
        None => "Unfinished".to_string(),
    }
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        outcome: Option<Outcome>,
        plies: u32,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        red_wins: usize,
        black_wins: usize,
        draws: usize,
        unfinished: usize,
        avg_plies: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        red_wins: results.red_wins,
        black_wins: results.black_wins,
        draws: results.draws,
        unfinished: results.unfinished,
        avg_plies: results.avg_plies,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                outcome: g.outcome,
                plies: g.plies,
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!("Red wins:    {} ({:.1}%)", results.red_wins, percent(results.red_wins, total));
    println!("Black wins:  {} ({:.1}%)", results.black_wins, percent(results.black_wins, total));
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Unfinished:  {} ({:.1}%)", results.unfinished, percent(results.unfinished, total));
    println!("Avg plies:   {:.1}", results.avg_plies);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {} in {} plies",
            game.game_number,
            outcome_label(game.outcome),
            game.plies
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
