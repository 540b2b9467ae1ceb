//! Service configuration loaded from environment variables.
//!
//! - `HOST` - bind address (default: 0.0.0.0)
//! - `PORT` - listen port (default: 8083)
//! - `CHECKOUT_DELAY_MS` - simulated payment time (default: 2000)
//! - `SEED_CATALOG` - load the sample catalog at startup (default: true)
//! - `NATS_URL` - publish domain events to NATS when set

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::checkout::DEFAULT_PAYMENT_DELAY;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub checkout_delay: Duration,
    pub seed_catalog: bool,
    pub nats_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8083,
            checkout_delay: DEFAULT_PAYMENT_DELAY,
            seed_catalog: true,
            nats_url: None,
        }
    }
}

impl Config {
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: parse_or(&lookup, "HOST", defaults.host)?,
            port: parse_or(&lookup, "PORT", defaults.port)?,
            checkout_delay: Duration::from_millis(parse_or(&lookup, "CHECKOUT_DELAY_MS", defaults.checkout_delay.as_millis() as u64)?),
            seed_catalog: parse_or(&lookup, "SEED_CATALOG", defaults.seed_catalog)?,
            nats_url: lookup("NATS_URL").filter(|s| !s.is_empty()),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr { SocketAddr::new(self.host, self.port) }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Config::from_lookup(lookup(&[])).unwrap(), Config::default());
    }

    #[test]
    fn test_overrides() {
        let cfg = Config::from_lookup(lookup(&[("PORT", "9000"), ("CHECKOUT_DELAY_MS", "0"), ("SEED_CATALOG", "false"), ("NATS_URL", "nats://localhost:4222")])).unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.checkout_delay, Duration::ZERO);
        assert!(!cfg.seed_catalog);
        assert_eq!(cfg.nats_url.as_deref(), Some("nats://localhost:4222"));
        assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:9000");
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "PORT"));
    }
}
