// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde attributes cannot express, such as
//! probability ranges and URL schemes.

use crate::diagnostic::ConfigError;
use crate::model::CartrecConfig;

/// Upper bound on generated carts.
pub const MAX_CART_COUNT: usize = 1000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &CartrecConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    let level = config.logging.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.log_level `{}` is not one of: {}",
                config.logging.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.seed.cart_count == 0 || config.seed.cart_count > MAX_CART_COUNT {
        errors.push(ConfigError::Validation {
            message: format!(
                "seed.cart_count must be between 1 and {MAX_CART_COUNT}, got {}",
                config.seed.cart_count
            ),
        });
    }

    let rate = config.recovery.success_rate;
    if !(0.0..=1.0).contains(&rate) {
        errors.push(ConfigError::Validation {
            message: format!("recovery.success_rate must be between 0.0 and 1.0, got {rate}"),
        });
    }

    let link = &config.recovery.cart_link_base;
    if !link.starts_with("http://") && !link.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("recovery.cart_link_base `{link}` must start with http:// or https://"),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&CartrecConfig::default()).is_ok());
    }

    #[test]
    fn empty_host_rejected() {
        let mut config = CartrecConfig::default();
        config.server.host = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("server.host"));
    }

    #[test]
    fn malformed_host_rejected() {
        let mut config = CartrecConfig::default();
        config.server.host = "local host!".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn ipv6_and_hostnames_accepted() {
        for host in ["::1", "0.0.0.0", "localhost", "api.example.com"] {
            let mut config = CartrecConfig::default();
            config.server.host = host.to_string();
            assert!(validate_config(&config).is_ok(), "{host} should be valid");
        }
    }

    #[test]
    fn success_rate_out_of_range_rejected() {
        let mut config = CartrecConfig::default();
        config.recovery.success_rate = 1.5;
        assert!(validate_config(&config).is_err());
        config.recovery.success_rate = -0.1;
        assert!(validate_config(&config).is_err());
        config.recovery.success_rate = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = CartrecConfig::default();
        config.seed.cart_count = 0;
        config.logging.log_level = "loud".to_string();
        config.recovery.cart_link_base = "example.com/cart".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
