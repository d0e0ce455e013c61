//! Math Trainer - arithmetic practice on the terminal
//!
//! Plays timed rounds and tracks score, skill tier and achievements.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mathtrainer::ui::{self, colors};
use mathtrainer::{display, Session};
use mathtrainer_core::levels::{self, LevelId};
use mathtrainer_core::{Round, TrainerConfig, MAX_RANGE, MIXED_RANGE, VERSION};
use std::io;
use tracing_subscriber::EnvFilter;

/// Env var holding the log filter
const LOG_ENV: &str = "MATHTRAINER_LOG";

#[derive(Parser)]
#[command(name = "mathtrainer")]
#[command(about = "Math Trainer - timed addition and subtraction practice", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play rounds at a level
    Play {
        /// Level 1-6
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
        level: LevelId,

        /// Largest operand up to 99999, or -1 for a mixed range (defaults to the level's top range)
        #[arg(
            long,
            allow_negative_numbers = true,
            value_parser = clap::value_parser!(i32).range(i64::from(MIXED_RANGE)..=i64::from(MAX_RANGE))
        )]
        range: Option<i32>,

        /// Number of rounds to play
        #[arg(long, default_value_t = 1)]
        rounds: usize,
    },

    /// Show player stats and skill tier
    Stats,

    /// List achievements and progress
    Achievements,

    /// List levels and their ranges
    Levels,

    /// Change the player name
    Rename { name: String },

    /// Change the avatar
    Avatar { id: u32 },

    /// Erase all progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = TrainerConfig::load().context("failed to load configuration")?;

    let mut session = Session::open(&config)?;
    let result = run(&mut session, cli.command);
    session.close();
    result
}

fn run(session: &mut Session, command: Commands) -> Result<()> {
    match command {
        Commands::Play { level, range, rounds } => play(session, level, range, rounds),
        Commands::Stats => {
            println!("{}", ui::header("Math Trainer", VERSION));
            println!("{}", display::render_stats(session.progress().stats()));
            Ok(())
        }
        Commands::Achievements => {
            println!("{}", display::render_achievements(session.progress().stats()));
            Ok(())
        }
        Commands::Levels => {
            println!("{}", display::render_levels());
            Ok(())
        }
        Commands::Rename { name } => {
            let name = name.trim();
            if name.is_empty() {
                bail!("player name cannot be empty");
            }
            let unlocked = session.progress_mut().update_name(name);
            announce(session, &unlocked)?;
            println!("player name set to {}", name);
            Ok(())
        }
        Commands::Avatar { id } => {
            let unlocked = session.progress_mut().update_avatar(id);
            announce(session, &unlocked)?;
            println!("avatar set to {}", id);
            Ok(())
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("reset erases all progress; pass --yes to confirm");
            }
            session.progress_mut().reset();
            println!("{}progress reset{}", colors::WARN, colors::RESET);
            Ok(())
        }
    }
}

fn play(session: &mut Session, level: LevelId, range: Option<i32>, rounds: usize) -> Result<()> {
    let range = range.unwrap_or_else(|| levels::default_range(level));
    let mut round = Round::start(level, range, session.progress());

    println!("{}", ui::header("Math Trainer", VERSION));
    println!("{}enter p to pause{}", colors::DIM, colors::RESET);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let summaries = session.play(&mut round, rounds, stdin.lock(), &mut stdout)?;
    if summaries.is_empty() {
        println!("no rounds finished");
    }
    Ok(())
}

fn announce(session: &mut Session, unlocked: &[mathtrainer_core::AchievementId]) -> Result<()> {
    let mut stdout = io::stdout();
    session.notify(unlocked, std::time::Instant::now(), &mut stdout)?;
    session.flush_notifications(&mut stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("mathtrainer").chain(args.iter().copied()))
    }

    #[test]
    fn test_play_range_bounds() {
        assert!(parse(&["play", "--level", "6", "--range", "2147483647"]).is_err());
        assert!(parse(&["play", "--level", "6", "--range", "-2"]).is_err());

        match parse(&["play", "--level", "3", "--range", "-1"]).unwrap().command {
            Commands::Play { level, range, rounds } => {
                assert_eq!((level, range, rounds), (3, Some(-1), 1));
            }
            _ => panic!("expected play"),
        }
        assert!(parse(&["play", "--level", "6", "--range", "99999"]).is_ok());
    }

    #[test]
    fn test_play_level_bounds() {
        assert!(parse(&["play", "--level", "0"]).is_err());
        assert!(parse(&["play", "--level", "7"]).is_err());
    }
}
