use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use roster::{
    core::{query::DEFAULT_PAGE_SIZE, store::PersonStore},
    runtime::handle::{RuntimeConfig, spawn_roster},
    serve::{ServeConfig, serve},
};

/// Serve the personnel roster over HTTP.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "ROSTER_BIND", default_value = "127.0.0.1:5000")]
    bind: SocketAddr,
    /// Page size used when a request does not specify one
    #[arg(long, env = "ROSTER_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE as u16,
          value_parser = clap::value_parser!(u16).range(1..))]
    page_size: u16,
    /// Maximum accepted request body size in bytes
    #[arg(long, env = "ROSTER_MAX_BODY_BYTES", default_value_t = 64 * 1024)]
    max_body_bytes: usize,
    /// Start with an empty roster instead of the sample records
    #[arg(long, env = "ROSTER_EMPTY")]
    empty: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; explicit env vars and flags still apply.
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    init_tracing();

    let store = if args.empty {
        PersonStore::new()
    } else {
        PersonStore::seeded()
    };
    tracing::info!(records = store.len(), "roster loaded");

    let handle = spawn_roster(store, RuntimeConfig::default());
    let config = ServeConfig {
        bind: args.bind,
        default_page_size: usize::from(args.page_size),
        max_body_bytes: args.max_body_bytes,
    };

    serve(config, handle.clone())
        .await
        .with_context(|| format!("serving on {}", args.bind))?;

    handle.shutdown().await.context("stopping roster runtime")?;
    Ok(())
}
