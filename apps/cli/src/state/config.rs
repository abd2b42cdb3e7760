//! # Configuration State
//!
//! Application configuration resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`, `--persistent`)
//! 2. Environment variables (`MADANG_*`)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Serialize;

use madang_core::validation::normalize_phone;
use madang_core::{StoreIdentity, DEFAULT_RECENT_ORDERS};
use madang_db::StoreMode;

/// File name of the store inside the data directory.
pub const DB_FILE_NAME: &str = "madang.db";

/// Application configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigState {
    /// SQLite file backing the store
    pub database_path: PathBuf,

    /// Reset every start (demo) or keep rows between runs
    #[serde(serialize_with = "serialize_mode")]
    pub mode: StoreMode,

    /// The user seeded as customer 6 and preselected on the order form
    pub identity: StoreIdentity,

    /// Rows in the dashboard's recent-orders table
    pub recent_limit: u32,
}

fn serialize_mode<S: serde::Serializer>(mode: &StoreMode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(mode.as_str())
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: `madang.db` in the platform data directory
    /// - Mode: ephemeral
    /// - Identity: 최혜원 / 대한민국 인천시 / 010-1234-5678
    /// - Recent orders: 10
    fn default() -> Self {
        ConfigState {
            database_path: default_database_path(),
            mode: StoreMode::Ephemeral,
            identity: StoreIdentity::default(),
            recent_limit: DEFAULT_RECENT_ORDERS,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MADANG_DB_PATH`: Store file
    /// - `MADANG_PERSISTENT`: `true`/`1`/`yes` keeps data between runs
    /// - `MADANG_USER_NAME`, `MADANG_USER_ADDRESS`, `MADANG_USER_PHONE`: Identity
    /// - `MADANG_RECENT_LIMIT`: Dashboard recent-order rows
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(path) = lookup("MADANG_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.database_path = PathBuf::from(path);
        }

        if let Some(flag) = lookup("MADANG_PERSISTENT") {
            if parse_flag(&flag) {
                config.mode = StoreMode::Persistent;
            }
        }

        if let Some(name) = lookup("MADANG_USER_NAME").filter(|n| !n.trim().is_empty()) {
            config.identity.name = name;
        }

        if let Some(address) = lookup("MADANG_USER_ADDRESS").filter(|a| !a.trim().is_empty()) {
            config.identity.address = address;
        }

        // An empty value clears the phone
        if let Some(phone) = lookup("MADANG_USER_PHONE") {
            config.identity.phone = normalize_phone(&phone);
        }

        if let Some(limit) = lookup("MADANG_RECENT_LIMIT") {
            match limit.trim().parse::<u32>() {
                Ok(n) if n > 0 => config.recent_limit = n,
                _ => tracing::warn!(value = %limit, "Ignoring invalid MADANG_RECENT_LIMIT"),
            }
        }

        config
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, database_path: Option<PathBuf>, persistent: bool) -> Self {
        if let Some(path) = database_path {
            self.database_path = path;
        }
        if persistent {
            self.mode = StoreMode::Persistent;
        }
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Determines the store path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.madang.bookstore/madang.db`
/// - **Windows**: `%APPDATA%\madang\bookstore\data\madang.db`
/// - **Linux**: `~/.local/share/bookstore/madang.db`
///
/// Falls back to the working directory when no home directory is known.
pub fn default_database_path() -> PathBuf {
    match ProjectDirs::from("com", "madang", "bookstore") {
        Some(dirs) => dirs.data_dir().join(DB_FILE_NAME),
        None => PathBuf::from(DB_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_lookup(|_| None);

        assert_eq!(config.mode, StoreMode::Ephemeral);
        assert_eq!(config.identity.name, "최혜원");
        assert_eq!(config.identity.address, "대한민국 인천시");
        assert_eq!(config.identity.phone.as_deref(), Some("010-1234-5678"));
        assert_eq!(config.recent_limit, 10);
        assert!(config.database_path.ends_with(DB_FILE_NAME));
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("MADANG_DB_PATH", "/tmp/shop.db"),
            ("MADANG_PERSISTENT", "TRUE"),
            ("MADANG_USER_NAME", "홍길동"),
            ("MADANG_USER_ADDRESS", "서울특별시 강남구"),
            ("MADANG_USER_PHONE", ""),
            ("MADANG_RECENT_LIMIT", "5"),
        ]));

        assert_eq!(config.database_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.mode, StoreMode::Persistent);
        assert_eq!(config.identity.name, "홍길동");
        assert_eq!(config.identity.address, "서울특별시 강남구");
        assert_eq!(config.identity.phone, None);
        assert_eq!(config.recent_limit, 5);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("MADANG_PERSISTENT", "nope"),
            ("MADANG_USER_NAME", "   "),
            ("MADANG_RECENT_LIMIT", "0"),
        ]));

        assert_eq!(config.mode, StoreMode::Ephemeral);
        assert_eq!(config.identity.name, "최혜원");
        assert_eq!(config.recent_limit, 10);
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = ConfigState::from_lookup(lookup_from(&[("MADANG_DB_PATH", "/tmp/env.db")]))
            .with_overrides(Some(PathBuf::from("/tmp/flag.db")), true);

        assert_eq!(config.database_path, PathBuf::from("/tmp/flag.db"));
        assert_eq!(config.mode, StoreMode::Persistent);
    }
}
