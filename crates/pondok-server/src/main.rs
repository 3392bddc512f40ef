//! pondok-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the registry API over HTTP.
//!
//! # Rebuilding the map views
//!
//! The `*_map` tables are pure projections. To regenerate them (and every
//! score row) from the source-of-truth tables:
//!
//! ```text
//! pondok-server --recompute-all
//! ```

mod settings;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use pondok_core::{engine, store::RegistryStore};
use pondok_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Pondok registry server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Re-run the scoring engine over every subject, then exit.
  #[arg(long)]
  recompute_all: bool,
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
    .add_source(config::Environment::with_prefix("PONDOK"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  // Maintenance mode: rescore everything and exit.
  if cli.recompute_all {
    return recompute_all(store.as_ref()).await;
  }

  let app = pondok_api::api_router(store).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Re-run the engine over every pesantren and santri. Failures are logged
/// and counted; one bad subject does not stop the sweep.
async fn recompute_all(store: &SqliteStore) -> anyhow::Result<()> {
  let mut scored = 0usize;
  let mut failed = 0usize;

  let pesantren = store
    .list_pesantren()
    .await
    .context("failed to list pesantren")?;
  for p in &pesantren {
    match engine::compute_pesantren_score(store, p.pesantren_id).await {
      Ok(score) => {
        scored += 1;
        tracing::debug!(
          pesantren_id = %p.pesantren_id,
          skor_total = score.skor_total,
          "rescored pesantren"
        );
      }
      Err(e) => {
        failed += 1;
        tracing::error!(
          pesantren_id = %p.pesantren_id,
          error = %e,
          "rescore failed"
        );
      }
    }
  }

  let santri = store
    .list_santri(None)
    .await
    .context("failed to list santri")?;
  for s in &santri {
    match engine::compute_santri_score(store, s.santri_id).await {
      Ok(score) => {
        scored += 1;
        tracing::debug!(
          santri_id = %s.santri_id,
          skor_total = score.skor_total,
          "rescored santri"
        );
      }
      Err(e) => {
        failed += 1;
        tracing::error!(santri_id = %s.santri_id, error = %e, "rescore failed");
      }
    }
  }

  tracing::info!(scored, failed, "recompute-all finished");
  if failed > 0 {
    anyhow::bail!("{failed} subject(s) failed to rescore");
  }
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
