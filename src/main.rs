//! Command-line entry point for the team balancer
//!
//! Loads the match log and roster, replays every match into fresh ratings and
//! either prints the standings or suggests balanced teams for today's players.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use team_balancer::balance::{select_players, team_ratings, PartitionSearch};
use team_balancer::config::AppConfig;
use team_balancer::leaderboard::standings;
use team_balancer::rating::{RatingEngine, RatingSnapshot, WengLinModel};
use team_balancer::store::{load_matches, load_roster};
use team_balancer::types::{BalanceMode, BalancePlayer, BalanceResult, Roster};
use tracing::{error, info};

/// Team Balancer - pickup match ratings and fair team suggestions
#[derive(Parser)]
#[command(
    name = "team-balancer",
    version,
    about = "Rates pickup-match players from their history and suggests balanced teams",
    long_about = "Team Balancer replays the whole match log through a Weng-Lin (OpenSkill) \
                 rating model, giving reduced credit to players of the bigger side in \
                 rotation matches, and searches for the two-team split of a group with the \
                 smallest rating-sum gap."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Match log override
    #[arg(long, value_name = "FILE", help = "Override match log path")]
    matches: Option<PathBuf>,

    /// Roster override
    #[arg(long, value_name = "FILE", help = "Override roster path")]
    roster: Option<PathBuf>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current standings
    Standings {
        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },
    /// Suggest balanced teams for the given players
    Balance {
        #[arg(required = true, value_name = "PLAYER")]
        players: Vec<String>,

        #[arg(long, help = "Let everyone play, teams may differ in size by one")]
        powerplay: bool,

        #[arg(long, value_name = "N", help = "Override the enumeration budget")]
        budget: Option<usize>,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },
    /// Validate configuration and data sources and exit
    Check,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(matches) = &args.matches {
        config.data.matches_path = matches.clone();
    }

    if let Some(roster) = &args.roster {
        config.data.roster_path = roster.clone();
    }

    team_balancer::config::validate_config(&config)?;
    Ok(config)
}

/// Load both data sources and replay the history
fn recompute(config: &AppConfig) -> Result<(RatingSnapshot, Roster)> {
    let matches = load_matches(&config.data.matches_path)?;
    let roster = load_roster(&config.data.roster_path)?;

    let engine = RatingEngine::from_config(config.rating.clone())?;
    let snapshot = engine.recompute(&matches, &roster)?;

    Ok((snapshot, roster))
}

fn print_standings(config: &AppConfig, json: bool) -> Result<()> {
    let (snapshot, roster) = recompute(config)?;
    let table = standings(&snapshot, &roster);

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!(
        "{:<5} {:<14} {:>6} {:>7} {:>6}  {:<11} Full name",
        "Rank", "Name", "Rating", "±", "Games", "Last"
    );
    println!("{}", "-".repeat(72));
    for row in &table {
        let last = row
            .last_played
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<5} {:<14} {:>6} {:>7.1} {:>6}  {:<11} {}",
            row.rank,
            row.player_id,
            row.rating,
            row.uncertainty,
            row.games_played,
            last,
            row.full_name.as_deref().unwrap_or("")
        );
    }

    Ok(())
}

fn print_team(label: &str, team: &[BalancePlayer], total: f64, roster: &Roster) {
    println!("{} ({:.0})", label, total);
    println!("{}", "-".repeat(50));
    for player in team {
        let mut details = Vec::new();
        if let Some(name) = roster.get(&player.id).and_then(|e| e.full_name.as_deref()) {
            details.push(name.to_string());
        }
        if let Some(age) = player.age {
            details.push(format!("{:.0}y", age));
        }
        let details = if details.is_empty() {
            String::new()
        } else {
            format!(" | {}", details.join(", "))
        };
        println!("  {:<12} {:>5.0}{}", player.id, player.rating, details);
    }
    println!();
}

fn print_balance(
    config: &AppConfig,
    players: &[String],
    mode: BalanceMode,
    budget: Option<usize>,
    json: bool,
) -> Result<()> {
    let (snapshot, roster) = recompute(config)?;

    let mut balance_config = config.balance.clone();
    if let Some(budget) = budget {
        balance_config.enumeration_budget = budget;
    }
    let search = PartitionSearch::new(balance_config)?;

    let selection = select_players(players, &snapshot, &roster, config.rating.initial_rating);
    let result: BalanceResult = search.balance(&selection, mode)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let model = WengLinModel::new(config.rating.clone())?;
    let fallback = config.rating.default_rating();
    let (win_a, win_b) = model.expected_score(
        &team_ratings(&result.team_a, &snapshot, fallback),
        &team_ratings(&result.team_b, &snapshot, fallback),
    );

    println!("{}", "=".repeat(50));
    println!("BALANCED TEAMS ({}, diff: {:.0})", result.mode, result.diff);
    println!("{}", "=".repeat(50));
    print_team("TEAM A", &result.team_a, result.sum_a, &roster);
    print_team("TEAM B", &result.team_b, result.sum_b, &roster);

    if let Some(deferred) = &result.deferred {
        println!(
            "Rotating player: {} joins {}",
            deferred.player.id, deferred.assigned_to
        );
    }
    println!(
        "Win chance: Team A {:.0}% / Team B {:.0}%",
        win_a * 100.0,
        win_b * 100.0
    );
    if result.possibly_suboptimal {
        println!(
            "Note: only {} of the possible splits were checked, a closer split may exist",
            result.combinations_evaluated
        );
    }

    Ok(())
}

fn check(config: &AppConfig) -> Result<()> {
    let (snapshot, roster) = recompute(config)?;
    info!("Configuration validation successful");
    println!(
        "OK: {} matches, {} roster entries, {} rated players",
        snapshot.matches_replayed(),
        roster.len(),
        snapshot.len()
    );
    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting {} v{}", config.service.name, team_balancer::VERSION);

    let outcome = match &args.command {
        Command::Standings { json } => print_standings(&config, *json),
        Command::Balance {
            players,
            powerplay,
            budget,
            json,
        } => {
            let mode = if *powerplay {
                BalanceMode::PlayAll
            } else {
                config.balance.default_mode
            };
            print_balance(&config, players, mode, *budget, *json)
        }
        Command::Check => check(&config),
    };

    if let Err(e) = outcome {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
