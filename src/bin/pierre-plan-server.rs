// ABOUTME: Server binary for the Pierre plan generation API
// ABOUTME: Runs the HTTP server or generates a single plan from a profile file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pierre Plan Server Binary
//!
//! - `serve` (default): HTTP API on `HTTP_PORT`
//! - `generate --profile <file>`: run the pipeline once and print the JSON
//!   response to stdout (`-` reads the profile from stdin)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pierre_plan_server::{
    cli,
    config::ServerConfig,
    generation::{GenerationSettings, PlanGenerator},
    llm::HttpCompletionClient,
    logging::{self, LoggingConfig},
    routes::build_router,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pierre-plan-server")]
#[command(about = "Pierre Plan Server - LLM-generated weekly training and meal plans")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server
    Serve {
        /// Override HTTP port
        #[arg(long)]
        http_port: Option<u16>,
    },
    /// Generate one plan and print it as JSON
    Generate {
        /// Profile JSON file, or `-` for stdin
        #[arg(short, long)]
        profile: PathBuf,

        /// Pretty-print the response
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command.unwrap_or(Command::Serve { http_port: None }) {
        Command::Serve { http_port } => serve(http_port).await,
        Command::Generate { profile, pretty } => generate(&profile, pretty).await,
    }
}

fn build_generator(config: &ServerConfig) -> Result<Arc<PlanGenerator>> {
    let client = HttpCompletionClient::new(config.llm.clone())?;
    Ok(Arc::new(PlanGenerator::new(
        Arc::new(client),
        GenerationSettings::from_config(&config.llm),
    )))
}

async fn serve(http_port: Option<u16>) -> Result<()> {
    let mut config = ServerConfig::from_env()?;
    if let Some(port) = http_port {
        config.http_port = port;
    }

    logging::init_from_env()?;

    info!("Starting Pierre Plan Server");
    info!("{}", config.summary());
    if !config.llm.has_api_key() {
        info!("No completion credential configured; every request will receive the fallback plan");
    }

    let generator = build_generator(&config)?;
    let app = build_router(generator, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{addr}");
    info!("  POST /api/plan");
    info!("  GET  /health");
    info!("  GET  /ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Pierre Plan Server shut down");
    Ok(())
}

async fn generate(profile_path: &Path, pretty: bool) -> Result<()> {
    LoggingConfig::from_env().with_stderr().init()?;
    let config = ServerConfig::from_env()?;

    let body = cli::read_profile(profile_path).await?;
    let generator = build_generator(&config)?;
    let rendered = cli::render_plan(&generator, config.failure_policy, &body, pretty).await?;
    println!("{rendered}");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
