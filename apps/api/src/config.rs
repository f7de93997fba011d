use std::path::PathBuf;

use anyhow::{Context, Result};
use strum::{Display, EnumString};

use crate::digest::DEFAULT_DIGEST_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum StorageBackend {
    #[strum(ascii_case_insensitive, serialize = "memory")]
    Memory,
    #[strum(ascii_case_insensitive, serialize = "redis")]
    Redis,
}

/// Application configuration loaded from environment variables.
/// Startup fails if a value is present but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub storage_backend: StorageBackend,
    pub redis_url: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub digest_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let storage_backend = optional_env("STORAGE_BACKEND")
            .unwrap_or_else(|| "memory".to_string())
            .parse::<StorageBackend>()
            .context("STORAGE_BACKEND must be 'memory' or 'redis'")?;

        let redis_url = optional_env("REDIS_URL");
        if storage_backend == StorageBackend::Redis && redis_url.is_none() {
            anyhow::bail!("REDIS_URL is required when STORAGE_BACKEND=redis");
        }

        Ok(Config {
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            storage_backend,
            redis_url,
            catalog_path: optional_env("CATALOG_PATH").map(PathBuf::from),
            digest_size: match optional_env("DIGEST_SIZE") {
                Some(v) => parse_digest_size(&v)?,
                None => DEFAULT_DIGEST_SIZE,
            },
        })
    }
}

fn parse_digest_size(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) => anyhow::bail!("DIGEST_SIZE must be a positive integer, got 0"),
        Ok(size) => Ok(size),
        Err(e) => Err(e).context("DIGEST_SIZE must be a positive integer"),
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
