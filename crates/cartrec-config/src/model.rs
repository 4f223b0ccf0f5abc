// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the cartrec recovery API.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key fails
//! at startup instead of being silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level cartrec configuration.
///
/// Every section is optional and falls back to the demo defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CartrecConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Startup sample data settings.
    #[serde(default)]
    pub seed: SeedConfig,

    /// Simulated recovery pipeline settings.
    #[serde(default)]
    pub recovery: RecoveryConfig,
}

impl CartrecConfig {
    /// Effective log level: `debug` when debug mode is on, otherwise the
    /// configured level.
    pub fn effective_log_level(&self) -> &str {
        if self.server.debug {
            "debug"
        } else {
            &self.logging.log_level
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Debug mode. Raises the log level to `debug`.
    #[serde(default)]
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Log output configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Sample data generated at startup.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SeedConfig {
    /// Number of abandoned carts to generate.
    #[serde(default = "default_cart_count")]
    pub cart_count: usize,

    /// RNG seed. Unset means a fresh random seed on every start.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            cart_count: default_cart_count(),
            seed: None,
        }
    }
}

fn default_cart_count() -> usize {
    8
}

/// Simulated recovery pipeline configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RecoveryConfig {
    /// Simulated WhatsApp provider latency in milliseconds.
    #[serde(default = "default_whatsapp_delay_ms")]
    pub whatsapp_delay_ms: u64,

    /// Probability (0.0-1.0) that a simulated recovery succeeds.
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,

    /// Base URL for cart links in WhatsApp messages. The cart id is appended.
    #[serde(default = "default_cart_link_base")]
    pub cart_link_base: String,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            whatsapp_delay_ms: default_whatsapp_delay_ms(),
            success_rate: default_success_rate(),
            cart_link_base: default_cart_link_base(),
        }
    }
}

fn default_whatsapp_delay_ms() -> u64 {
    1000
}

fn default_success_rate() -> f64 {
    0.7
}

fn default_cart_link_base() -> String {
    "https://example.com/cart".to_string()
}
