//! chorewheel server binary.
//!
//! Reads `chorewheel.toml` (or the path specified with `--config`), layers
//! `CHOREWHEEL_*` environment variables over it, opens the SQLite store, and
//! serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use chorewheel_api::HouseholdService;
use chorewheel_server::{ServerConfig, app, expand_tilde, seed_if_empty};
use chorewheel_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Chorewheel household chore server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "chorewheel.toml")]
  config: PathBuf,

  /// Seed an empty household with sample data, overriding the config file.
  #[arg(long)]
  seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("CHOREWHEEL"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  server_cfg.seed_sample_data |= cli.seed;

  let store_path = expand_tilde(&server_cfg.store_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let service = HouseholdService::open(store)
    .await
    .context("failed to load household")?;

  if server_cfg.seed_sample_data {
    seed_if_empty(&service)
      .await
      .context("failed to seed sample data")?;
  }

  let app = app(Arc::new(service));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
