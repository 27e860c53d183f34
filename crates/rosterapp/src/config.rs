//! # Configuration
//!
//! Roster configuration is loaded with [`confique`] from, in priority order:
//!
//! 1. **Environment variables**: `ROSTER_BIND_ADDR`, `ROSTER_DATA_FILE`, `ROSTER_LOG`.
//! 2. **Config file**: an optional TOML file passed with `--config`.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! Command-line flags of the `roster` binary are applied on top of the loaded value.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `bind_addr` | `127.0.0.1:5000` | Address the HTTP listener binds to |
//! | `data_file` | platform data dir + `users.txt` | Flat file holding the records |
//! | `log_filter` | `info` | `tracing` filter used when `RUST_LOG` is unset |

use crate::error::{RosterError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DATA_FILENAME: &str = "users.txt";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// Address for the HTTP listener, e.g. "127.0.0.1:5000".
    #[config(env = "ROSTER_BIND_ADDR", default = "127.0.0.1:5000")]
    pub bind_addr: String,

    /// Path of the flat data file. When absent, the platform data directory is used.
    #[config(env = "ROSTER_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Default log filter.
    #[config(env = "ROSTER_LOG", default = "info")]
    pub log_filter: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            data_file: None,
            log_filter: "info".to_string(),
        }
    }
}

impl RosterConfig {
    /// Load from the environment and, if given, a TOML file. A missing file is ignored.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|err| RosterError::Config(err.to_string()))
    }

    /// The data file to use, resolving the platform default when unset.
    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(default_data_file)
    }
}

fn default_data_file() -> PathBuf {
    ProjectDirs::from("com", "roster", "roster")
        .map(|dirs| dirs.data_dir().join(DATA_FILENAME))
        .unwrap_or_else(|| PathBuf::from(DATA_FILENAME))
}
