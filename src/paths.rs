//! Project path functions - single source of truth for local file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//!
//! This allows keeping several logged-in identities side by side:
//! ```bash
//! DATA_DIR=data/alice flashdeck whoami
//! DATA_DIR=data/bob flashdeck whoami
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// Persistent auth storage (bearer token + logged-in user)
pub fn auth_store_path() -> PathBuf {
    PathBuf::from(data_dir()).join("auth.json")
}

/// Default configuration file, relative to the working directory
pub const CONFIG_FILE: &str = "config.toml";
