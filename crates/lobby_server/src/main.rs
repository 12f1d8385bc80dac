//! Lobby Server - CLI entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use lobby_games::GameStatus;
use lobby_server::{GameFilter, GameRepository, LobbyConfig, describe, http, seed};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = LobbyConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.database_url {
        config = config.with_database_url(url);
    }

    let repository = GameRepository::new(config.database_url().clone())?;
    repository.run_migrations()?;

    match cli.command {
        Command::Seed => run_seed(&repository),
        Command::List { status, player } => run_list(&repository, status, player),
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config = config.with_host(host);
            }
            if let Some(port) = port {
                config = config.with_port(port);
            }
            run_server(repository, &config).await
        }
    }
}

/// Seed demo data
#[instrument(skip(repository))]
fn run_seed(repository: &GameRepository) -> Result<()> {
    let summary = seed(repository)?;
    println!(
        "Seeded user '{}' with {} idle games",
        summary.user().login(),
        summary.game_ids().len()
    );
    Ok(())
}

/// Print matching games
#[instrument(skip(repository))]
fn run_list(
    repository: &GameRepository,
    status: Option<String>,
    player: Option<String>,
) -> Result<()> {
    let status = status
        .map(|s| {
            s.parse::<GameStatus>()
                .with_context(|| format!("Unknown game status: '{}'", s))
        })
        .transpose()?;

    let games = repository.list_games(&GameFilter::new(status, player))?;
    if games.is_empty() {
        println!("No games");
    }
    for game in &games {
        println!("{}", describe(game));
    }
    Ok(())
}

/// Run the HTTP API
#[instrument(skip(repository, config))]
async fn run_server(repository: GameRepository, config: &LobbyConfig) -> Result<()> {
    let app = http::router(repository);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(host = %config.host(), port = config.port(), "Lobby API listening");

    axum::serve(listener, app).await?;
    Ok(())
}
