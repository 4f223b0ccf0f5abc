// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! cartrec - cart abandonment recovery demo API.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod error;
mod inspect;
mod serve;
mod shutdown;

use std::path::PathBuf;

use cartrec_config::CartrecConfig;
use clap::{Parser, Subcommand};

/// cartrec - simulated cart abandonment recovery API.
#[derive(Parser, Debug)]
#[command(name = "cartrec", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Seed the store and serve the HTTP API until interrupted.
    Serve,
    /// Print the sample carts the configured seed would generate.
    Seed,
    /// Validate configuration and print the effective settings.
    Config,
}

fn load_config(path: Option<&PathBuf>) -> CartrecConfig {
    let loaded = match path {
        Some(path) => cartrec_config::load_and_validate_path(path),
        None => cartrec_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            cartrec_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Seed => inspect::print_seed(&config).await,
        Commands::Config => inspect::print_config(&config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
