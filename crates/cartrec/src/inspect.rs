// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `cartrec seed` and `cartrec config` commands.

use cartrec_config::CartrecConfig;

use crate::error::CliError;
use crate::serve::build_store;

/// Print the carts a `serve` with this configuration would start with.
///
/// Only reproducible when `seed.seed` is set.
pub async fn print_seed(config: &CartrecConfig) -> Result<(), CliError> {
    let carts = build_store(config).list_abandoned_carts().await;
    println!("{}", serde_json::to_string_pretty(&carts)?);
    Ok(())
}

/// Print the effective configuration as TOML.
pub fn print_config(config: &CartrecConfig) -> Result<(), CliError> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
