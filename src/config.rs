use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:5173";
const DEFAULT_DATA_DIR: &str = ".data";
const STORE_FILE: &str = "comunidad.db";

/// Where the gateway lives and where local files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    /// Base of the links encoded in attendance QR codes.
    pub public_url: String,
    pub data_dir: PathBuf,
}

impl Config {
    /// Reads `COMUNIDAD_API_URL`, `COMUNIDAD_PUBLIC_URL`, `COMUNIDAD_DATA_DIR`,
    /// after loading a `.env` file if one exists.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Ignoring .env: {}", e);
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_url: non_empty("COMUNIDAD_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            public_url: non_empty("COMUNIDAD_PUBLIC_URL").unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string()),
            data_dir: non_empty("COMUNIDAD_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        }
    }

    /// SQLite file standing in for browser local storage.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.data_dir.join("downloads")
    }

    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = dir.to_path_buf();
        self
    }
}
