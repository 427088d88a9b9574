//! Process configuration from the environment.

use std::net::SocketAddr;

use pokerforge_room::StoreConfig;

use crate::ConfigError;

/// Socket address to listen on. Required.
pub const ADDRESS_VAR: &str = "POKER_ADDRESS";

/// `debug` raises the default log level. Anything else, or unset, is
/// release mode.
pub const MODE_VAR: &str = "POKER_MODE";

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: SocketAddr,
    /// Verbosity only; never changes behavior.
    pub debug: bool,
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup` instead of the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup(ADDRESS_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(ADDRESS_VAR))?;
        let address = raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddress {
                var: ADDRESS_VAR,
                value: raw.clone(),
            })?;

        Ok(Self {
            address,
            debug: is_debug(lookup(MODE_VAR).as_deref()),
            store: StoreConfig::default(),
        })
    }
}

fn is_debug(mode: Option<&str>) -> bool {
    mode.is_some_and(|m| m.trim().eq_ignore_ascii_case("debug"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_reads_address_and_mode() {
        let config =
            ServerConfig::from_lookup(lookup(&[(ADDRESS_VAR, "0.0.0.0:8080"), (MODE_VAR, "debug")]))
                .unwrap();
        assert_eq!(config.address, "0.0.0.0:8080".parse().unwrap());
        assert!(config.debug);
    }

    #[test]
    fn test_from_lookup_missing_address_fails() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ADDRESS_VAR)));
    }

    #[test]
    fn test_from_lookup_bad_address_fails() {
        let err = ServerConfig::from_lookup(lookup(&[(ADDRESS_VAR, "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddress { .. }));
    }

    #[test]
    fn test_from_lookup_other_mode_is_release() {
        let config =
            ServerConfig::from_lookup(lookup(&[(ADDRESS_VAR, "127.0.0.1:1"), (MODE_VAR, "release")]))
                .unwrap();
        assert!(!config.debug);
    }
}
