//! Sheen CLI
//!
//! Drives the site runtime without a window:
//! - `simulate` runs the site on a 60fps clock, optionally from a scenario
//! - `routes` lists the pages and their sections
//! - `theme` reads or flips the stored theme preference
//! - `contact` sends a message through the configured relay
//! - `config` prints the effective configuration

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "sheen")]
#[command(author, version, about = "Headless runner for the Sheen site runtime")]
struct Cli {
    /// Config file (TOML). Defaults apply when it does not exist.
    #[arg(short, long, global = true, default_value = "sheen.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the site headlessly and print the final state as JSON
    Simulate {
        /// Path to open
        #[arg(short, long, default_value = "/")]
        route: String,
        /// Frames to run at 60fps
        #[arg(short, long, default_value = "300")]
        frames: u32,
        /// Wheel delta in pixels, sent at evenly spaced frames (repeatable)
        #[arg(short, long, allow_negative_numbers = true)]
        wheel: Vec<f32>,
        /// Replay a JSON scenario instead
        #[arg(short, long, conflicts_with_all = ["route", "frames", "wheel"])]
        scenario: Option<PathBuf>,
    },
    /// List routes and the sections they mount
    Routes,
    /// Show or toggle the stored theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Send a contact form message
    Contact {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        message: String,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum ThemeAction {
    Show,
    Toggle,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(&cli.config)?;

    match cli.command {
        Commands::Simulate {
            route,
            frames,
            wheel,
            scenario,
        } => match scenario {
            Some(path) => commands::simulate::scenario(config, &path),
            None => commands::simulate::run(config, &route, frames, &wheel),
        },
        Commands::Routes => commands::routes::run(&config),
        Commands::Theme { action } => match action {
            ThemeAction::Show => commands::theme::show(&config),
            ThemeAction::Toggle => commands::theme::toggle(&config),
        },
        Commands::Contact {
            name,
            email,
            message,
        } => commands::contact::run(&config, name, email, message).await,
        Commands::Config => commands::config::run(&config),
    }
}
