//! Process configuration, read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_RECENT_SALES: usize = 5;
const DEV_EDITOR_SECRET: &str = "change-me";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    JsonFile,
}

#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageBackend,
    pub data_dir: PathBuf,
    pub editor_secret: String,
    pub recent_sales: usize,
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("storage", &self.storage)
            .field("data_dir", &self.data_dir)
            .field("editor_secret", &"<redacted>")
            .field("recent_sales", &self.recent_sales)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = match get("SALESREWARD_BIND_ADDR") {
            Some(raw) => raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "SALESREWARD_BIND_ADDR",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let storage = match get("SALESREWARD_STORAGE").as_deref() {
            None | Some("json") => StorageBackend::JsonFile,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "SALESREWARD_STORAGE",
                    value: other.to_string(),
                    reason: "expected `memory` or `json`".to_string(),
                });
            }
        };

        let data_dir = get("SALESREWARD_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let editor_secret = match get("SALESREWARD_EDITOR_SECRET") {
            Some(secret) => secret,
            None => {
                tracing::warn!(
                    "SALESREWARD_EDITOR_SECRET is not set; using the development default"
                );
                DEV_EDITOR_SECRET.to_string()
            }
        };

        let recent_sales = match get("SALESREWARD_RECENT_SALES") {
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                key: "SALESREWARD_RECENT_SALES",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_RECENT_SALES,
        };

        Ok(Self {
            bind_addr,
            storage,
            data_dir,
            editor_secret,
            recent_sales,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.storage, StorageBackend::JsonFile);
        assert_eq!(cfg.data_dir, PathBuf::from("./data"));
        assert_eq!(cfg.editor_secret, DEV_EDITOR_SECRET);
        assert_eq!(cfg.recent_sales, 5);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg = config(&[
            ("SALESREWARD_BIND_ADDR", "127.0.0.1:9000"),
            ("SALESREWARD_STORAGE", "memory"),
            ("SALESREWARD_DATA_DIR", "/var/lib/salesreward"),
            ("SALESREWARD_EDITOR_SECRET", "s3cret"),
            ("SALESREWARD_RECENT_SALES", "10"),
        ])
        .unwrap();
        assert_eq!(cfg.storage, StorageBackend::Memory);
        assert_eq!(cfg.editor_secret, "s3cret");
        assert_eq!(cfg.recent_sales, 10);
        assert!(!format!("{cfg:?}").contains("s3cret"));
    }

    #[test]
    fn invalid_values_are_reported_with_their_key() {
        let err = config(&[("SALESREWARD_STORAGE", "postgres")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SALESREWARD_STORAGE", .. }));

        let err = config(&[("SALESREWARD_RECENT_SALES", "many")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SALESREWARD_RECENT_SALES", .. }));
    }
}
