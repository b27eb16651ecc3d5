//! tictactoe_arcade - terminal front end.
//!
//! Plays games on stdin/stdout and prints statistics and the leaderboard.

#![warn(missing_docs)]

mod cli;

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tictactoe_arcade::{
    ArcadeConfig, HttpRatingService, LeaderboardService, MatchRepository, MemoryStore,
    PlayerStats, RecordStore, SessionController, format_clock, format_duration,
};
use tictactoe_engine::{Difficulty, Engine, InvalidMove, Outcome};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the board
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,tictactoe_arcade=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ArcadeConfig::load_or_default(&cli.config)?;
    if let Some(db_path) = cli.db_path {
        config.set_db_path(db_path);
    }
    if let Some(rating_url) = cli.rating_url {
        config.set_rating_url(Some(rating_url));
    }

    let store = open_store(&config);
    let leaderboard = build_leaderboard_service(&config, Arc::clone(&store));

    match cli.command {
        Command::Play { name, difficulty } => {
            if let Some(name) = name {
                config.set_player_name(name);
            }
            if let Some(difficulty) = difficulty {
                config.set_difficulty(difficulty);
            }
            run_play(&config, store, &leaderboard).await
        }
        Command::Leaderboard => run_leaderboard(&leaderboard).await,
        Command::Stats { name } => {
            let name = name.unwrap_or_else(|| config.player_name().clone());
            run_stats(&leaderboard, &name).await
        }
    }
}

/// Opens the SQLite store, falling back to memory so play is never blocked.
#[instrument(skip(config), fields(db_path = %config.db_path()))]
fn open_store(config: &ArcadeConfig) -> Arc<dyn RecordStore> {
    match MatchRepository::open(config.db_path().clone()) {
        Ok(repository) => Arc::new(repository),
        Err(e) => {
            warn!(error = %e, "Database unavailable, games will not be kept after exit");
            Arc::new(MemoryStore::new())
        }
    }
}

#[instrument(skip_all)]
fn build_leaderboard_service(
    config: &ArcadeConfig,
    store: Arc<dyn RecordStore>,
) -> LeaderboardService {
    let service = LeaderboardService::new(store);
    let Some(url) = config.rating_url() else {
        return service;
    };

    match HttpRatingService::new(url.clone(), config.request_timeout()) {
        Ok(remote) => {
            info!(url = %remote.url(), "Remote rating service enabled");
            service.with_remote(Arc::new(remote))
        }
        Err(e) => {
            warn!(error = %e, "Remote rating service disabled");
            service
        }
    }
}

/// Interactive game loop.
#[instrument(skip_all, fields(player = %config.player_name(), difficulty = %config.difficulty()))]
async fn run_play(
    config: &ArcadeConfig,
    store: Arc<dyn RecordStore>,
    leaderboard: &LeaderboardService,
) -> Result<()> {
    let engine = Engine::new(config.difficulty().profile());
    let mut controller = SessionController::new(engine, store);
    controller.set_player_name(config.player_name());
    controller.on_submit(|status| match &status.error {
        None => println!("Game saved."),
        Some(error) => println!("Could not save the game: {}", error),
    });

    controller.start();
    println!(
        "{} vs the computer ({})",
        controller.player_name(),
        config.difficulty()
    );
    print_board(&controller);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&format!(
            "[{}] Cell 1-9, n for a new game, d <difficulty> to switch, q to quit: ",
            format_clock(controller.elapsed_seconds())
        ))?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let input = line.trim();
        match input {
            "q" | "quit" => break,
            "n" | "new" => {
                controller.start();
                print_board(&controller);
                continue;
            }
            _ => {}
        }

        if let Some(name) = input.strip_prefix("d ") {
            match name.trim().parse::<Difficulty>() {
                Ok(difficulty) => {
                    controller.start_with_profile(difficulty.profile());
                    println!("New game against the {} computer.", difficulty);
                    print_board(&controller);
                }
                Err(_) => println!("Difficulties: hard, medium, easy, stupid."),
            }
            continue;
        }

        let cell = match input.parse::<usize>() {
            Ok(cell) if (1..=9).contains(&cell) => cell,
            _ => {
                println!("Enter a cell number from 1 to 9.");
                continue;
            }
        };

        match controller.play_on_runtime(cell - 1) {
            Ok(turn) => {
                if let Some(ai_move) = turn.report.ai_move {
                    println!("Computer plays {}.", ai_move.index + 1);
                }
                print_board(&controller);

                let Some(record) = turn.record else {
                    continue;
                };
                println!(
                    "{} ({})",
                    outcome_message(*record.winner()),
                    format_duration(*record.duration_seconds())
                );

                if let Some(status) = leaderboard.publish(&record).await {
                    match status.error {
                        None => println!("Result shared with the rating service."),
                        Some(error) => println!("Rating service unavailable: {}", error),
                    }
                }

                let stats = leaderboard.player_stats(controller.player_name()).await;
                print_stats(controller.player_name(), &stats);
                println!("Press n for a new game or q to quit.");
            }
            Err(InvalidMove::Occupied { .. }) => println!("Cell {} is taken.", cell),
            Err(InvalidMove::GameOver) => println!("This game is over. Press n for a new game."),
            Err(e) => println!("{}", e),
        }
    }

    info!("Leaving play");
    Ok(())
}

#[instrument(skip(leaderboard))]
async fn run_leaderboard(leaderboard: &LeaderboardService) -> Result<()> {
    let view = leaderboard.leaderboard().await;

    if let Some(error) = view.remote_error() {
        println!("Rating service unavailable ({}), showing local games.", error);
    }
    if let Some(error) = view.storage_error() {
        println!("Local history unavailable ({}).", error);
    }
    if view.entries().is_empty() {
        println!("No games recorded yet.");
        return Ok(());
    }

    println!("Leaderboard ({})", view.source());
    println!(
        "{:<4} {:<20} {:>5} {:>5} {:>6} {:>6} {:>6} {:>10}",
        "#", "Player", "Games", "Wins", "Losses", "Ratio", "Streak", "Time"
    );
    for (rank, entry) in view.entries().iter().enumerate() {
        println!(
            "{:<4} {:<20} {:>5} {:>5} {:>6} {:>5.0}% {:>6} {:>10}",
            rank + 1,
            entry.name(),
            entry.games(),
            entry.wins(),
            entry.losses(),
            *entry.ratio() * 100.0,
            entry.longest_win_streak(),
            format_duration(*entry.total_duration()),
        );
    }
    Ok(())
}

#[instrument(skip(leaderboard))]
async fn run_stats(leaderboard: &LeaderboardService, name: &str) -> Result<()> {
    let stats = leaderboard.player_stats(name).await;
    print_stats(name, &stats);
    Ok(())
}

fn print_board<D>(controller: &SessionController<D>)
where
    D: tictactoe_engine::Dice,
{
    println!("\n{}\n", controller.engine().current_board().display());
}

fn print_stats(name: &str, stats: &PlayerStats) {
    println!(
        "{}: {} games, {} wins, {} losses, {} draws, {} played",
        name,
        stats.games(),
        stats.wins(),
        stats.losses(),
        stats.draws(),
        format_duration(*stats.total_duration()),
    );
}

fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Human => "You win!",
        Outcome::Opponent => "The computer wins.",
        Outcome::Draw => "It's a draw.",
    }
}

fn prompt(text: &str) -> Result<()> {
    print!("{}", text);
    std::io::stdout().flush()?;
    Ok(())
}
