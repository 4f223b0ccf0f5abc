// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Top-level command errors.

use cartrec_gateway::GatewayError;
use thiserror::Error;

/// Failure of a CLI command. Reported to stderr before exiting with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render TOML: {0}")]
    Toml(#[from] toml::ser::Error),
}
