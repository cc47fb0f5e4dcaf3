use std::env;

use thiserror::Error;

pub const DEFAULT_MAX_INFLIGHT: usize = 64;

#[derive(Debug, Clone)]
pub struct Config {
    pub max_inflight: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BRIDGE_MAX_INFLIGHT must be a positive integer")]
    InvalidMaxInflight,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_inflight = env::var("BRIDGE_MAX_INFLIGHT")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(|value| {
                value
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidMaxInflight)
            })
            .transpose()?
            .unwrap_or(DEFAULT_MAX_INFLIGHT);

        if max_inflight == 0 {
            return Err(ConfigError::InvalidMaxInflight);
        }

        Ok(Self { max_inflight })
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn parse_defaults() {
        env::remove_var("BRIDGE_MAX_INFLIGHT");

        let config = Config::from_env().expect("config should parse");
        assert_eq!(config.max_inflight, DEFAULT_MAX_INFLIGHT);
    }

    #[test]
    #[serial]
    fn max_inflight_parses_when_valid() {
        env::set_var("BRIDGE_MAX_INFLIGHT", "8");

        let config = Config::from_env().expect("config should parse");
        assert_eq!(config.max_inflight, 8);

        env::remove_var("BRIDGE_MAX_INFLIGHT");
    }

    #[test]
    #[serial]
    fn zero_max_inflight_fails() {
        env::set_var("BRIDGE_MAX_INFLIGHT", "0");

        let err = Config::from_env().expect_err("expected invalid max inflight");
        assert!(matches!(err, ConfigError::InvalidMaxInflight));

        env::remove_var("BRIDGE_MAX_INFLIGHT");
    }

    #[test]
    #[serial]
    fn non_numeric_max_inflight_fails() {
        env::set_var("BRIDGE_MAX_INFLIGHT", "many");

        let err = Config::from_env().expect_err("expected invalid max inflight");
        assert!(matches!(err, ConfigError::InvalidMaxInflight));

        env::remove_var("BRIDGE_MAX_INFLIGHT");
    }
}
