// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./cartrec.toml` > `~/.config/cartrec/cartrec.toml` >
//! `/etc/cartrec/cartrec.toml` with environment variable overrides via the
//! `CARTREC_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::CartrecConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/cartrec/cartrec.toml`
/// 3. `~/.config/cartrec/cartrec.toml`
/// 4. `./cartrec.toml`
/// 5. `CARTREC_*` environment variables
pub fn load_config() -> Result<CartrecConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<CartrecConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CartrecConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CartrecConfig, figment::Error> {
    tracing::debug!(path = %path.display(), "loading config file");
    Figment::new()
        .merge(Serialized::defaults(CartrecConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment behind [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(CartrecConfig::default()));
    for path in config_file_candidates() {
        if path.is_file() {
            tracing::debug!(path = %path.display(), "merging config file");
        }
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider())
}

/// Config file locations in merge order, lowest precedence first.
fn config_file_candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/cartrec/cartrec.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("cartrec/cartrec.toml"));
    }
    paths.push(PathBuf::from("cartrec.toml"));
    paths
}

/// Environment provider mapping `CARTREC_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys such as
/// `cart_count` contain underscores: `CARTREC_SEED_CART_COUNT` must become
/// `seed.cart_count`, not `seed.cart.count`.
fn env_provider() -> Env {
    Env::prefixed("CARTREC_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env name such as `SEED_CART_COUNT` to a dotted path.
fn map_env_key(key: &str) -> String {
    key.to_ascii_lowercase()
        .replacen("server_", "server.", 1)
        .replacen("logging_", "logging.", 1)
        .replacen("seed_", "seed.", 1)
        .replacen("recovery_", "recovery.", 1)
}
