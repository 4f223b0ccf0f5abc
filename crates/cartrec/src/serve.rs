// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `cartrec serve` command implementation.
//!
//! Seeds the recovery store, serves the HTTP API until a shutdown signal
//! arrives, then logs a final summary and discards the in-memory state.

use std::sync::Arc;
use std::time::Duration;

use cartrec_config::CartrecConfig;
use cartrec_core::{RecoveryStore, StoreOptions};
use cartrec_gateway::{start_server, AppState, ServerConfig};
use tracing::info;

use crate::error::CliError;
use crate::shutdown;

/// Runs the `cartrec serve` command.
pub async fn run_serve(config: CartrecConfig) -> Result<(), CliError> {
    init_tracing(config.effective_log_level());

    info!(debug = config.server.debug, "starting cartrec serve");

    let store = Arc::new(build_store(&config));
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    info!(
        carts = config.seed.cart_count,
        addr = %server_config.addr(),
        whatsapp_delay_ms = config.recovery.whatsapp_delay_ms,
        "recovery API ready"
    );

    let token = shutdown::install_signal_handler();
    start_server(
        &server_config,
        AppState::new(Arc::clone(&store)),
        token.cancelled_owned(),
    )
    .await?;

    let stats = store.dashboard_stats().await;
    info!(
        carts = stats.total_abandoned_carts,
        recovered = stats.recovered_carts,
        whatsapp_messages = stats.whatsapp_messages_sent,
        notifications = stats.calling_team_notifications,
        "shutdown complete, discarding in-memory state"
    );
    Ok(())
}

/// Map configuration onto store options and seed a fresh store.
pub fn build_store(config: &CartrecConfig) -> RecoveryStore {
    RecoveryStore::seeded(
        config.seed.cart_count,
        config.seed.seed,
        store_options(config),
    )
}

fn store_options(config: &CartrecConfig) -> StoreOptions {
    StoreOptions {
        whatsapp_delay: Duration::from_millis(config.recovery.whatsapp_delay_ms),
        success_rate: config.recovery.success_rate,
        cart_link_base: config.recovery.cart_link_base.clone(),
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "cartrec={log_level},cartrec_core={log_level},cartrec_gateway={log_level},tower_http={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
