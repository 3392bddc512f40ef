//! Runtime server configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Deserialised from `config.toml` layered with `PONDOK_*` environment
/// variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".into() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("pondok.db") }
