//! Clubhouse site server.
//!
//! Usage:
//!   clubhouse serve --config config/server.toml
//!   clubhouse check-policy --policy config/policy.toml
//!
//! Environment:
//!   CLUBHOUSE_BIND_ADDR     listen address (overrides the config file)
//!   CLUBHOUSE_JWT_SECRET    session-token secret (overrides the config file)
//!   CLUBHOUSE_ADMIN_EMAILS  comma-separated allow-list (replaces the policy file's)
//!   RUST_LOG                log filter (default: info)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use clubhouse_api::{build_router, AppState, ServerConfig};
use clubhouse_auth::{JwtIdentityProvider, UnconfiguredIdentityProvider};
use clubhouse_contracts::operation::Operation;
use clubhouse_core::traits::{IdentityProvider, ResourceStore};
use clubhouse_policy::{load, load_or_deny_all, ADMIN_EMAILS_ENV};
use clubhouse_store::{InMemoryResourceStore, SeedData};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Rugby club site: public fixtures, training and galleries plus an admin
/// back-office behind an explicit access gate.
#[derive(Parser)]
#[command(name = "clubhouse", about = "Clubhouse rugby club site")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve {
        /// Server config file (TOML). Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Load a policy strictly and print the allow-list and operation table.
    CheckPolicy {
        /// Policy file (TOML).
        #[arg(long)]
        policy: Option<PathBuf>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Set RUST_LOG=debug to see every access decision.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config } => serve(config.as_deref()).await,
        Command::CheckPolicy { policy } => check_policy(policy.as_deref()),
    }
}

// ── serve ─────────────────────────────────────────────────────────────────────

async fn serve(config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    }
    .with_overrides(|key| std::env::var(key).ok());

    // A broken policy must not take the public site down: fall back to an
    // empty allow-list instead.
    let env_list = std::env::var(ADMIN_EMAILS_ENV).ok();
    let bundle = load_or_deny_all(config.policy_path.as_deref(), env_list.as_deref());

    let identity = identity_provider(&config)?;

    let store = InMemoryResourceStore::new();
    if let Some(seed_path) = &config.seed_path {
        store
            .seed(SeedData::from_file(seed_path)?)
            .context("failed to seed the store")?;
    }
    let store: Arc<dyn ResourceStore> = Arc::new(store);

    let state = Arc::new(AppState::new(&config, bundle, identity, store));
    let app = build_router(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "clubhouse listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("clubhouse shut down");
    Ok(())
}

fn identity_provider(config: &ServerConfig) -> Result<Arc<dyn IdentityProvider>> {
    match config.jwt_secret.as_deref() {
        Some(secret) => {
            let provider = JwtIdentityProvider::new(secret, config.audience())?;
            Ok(Arc::new(provider))
        }
        None => {
            warn!("no session-token secret configured; every caller is anonymous");
            Ok(Arc::new(UnconfiguredIdentityProvider))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = terminate => info!("received SIGTERM"),
    }
}

// ── check-policy ──────────────────────────────────────────────────────────────

fn check_policy(policy_path: Option<&Path>) -> Result<()> {
    let env_list = std::env::var(ADMIN_EMAILS_ENV).ok();
    let bundle = load(policy_path, env_list.as_deref()).context("policy is invalid")?;

    println!("Allow-listed principals ({}):", bundle.policy.len());
    if bundle.policy.is_empty() {
        println!("  (none: allow-listed operations are denied for everyone)");
    }
    for principal in bundle.policy.principals() {
        println!("  {}", principal);
    }

    println!();
    println!("{:<26} requirement", "operation");
    for operation in Operation::ALL {
        println!(
            "{:<26} {}",
            operation.name(),
            bundle.catalog.requirement(operation)
        );
    }
    Ok(())
}
