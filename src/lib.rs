//! # Settings Store
//!
//! Typed access to persisted application settings.
//!
//! - **Accessors**: `Accessor<T>` reads a setting as `T`, returning a default
//!   when the entry is missing, of another type, or unreadable
//! - **Store handle**: builds the backend once, on first use, and shares it
//! - **Backends**: a JSON file per namespace, or an in-memory map
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐    ┌──────────────────┐    ┌──────────────────┐
//! │ Accessor<T>      │ →  │ StoreHandle      │ →  │ Backend          │
//! │ Setting<T>       │    │ (built once)     │    │ (file / memory)  │
//! └──────────────────┘    └──────────────────┘    └──────────────────┘
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod settings;
pub mod storage;

use std::sync::Arc;

use clap::Parser;
use tracing::debug;

use crate::cli::Cli;
use crate::config::AppConfig;

pub use domain::{Scalar, ScalarKind, SettingValue};
pub use error::{BackendError, PersistenceError};
pub use settings::{Accessor, Lookup, Property, Setting};
pub use storage::{Backend, StoreHandle};

/// Run the `settings-store` command-line tool.
///
/// This function:
/// 1. Loads `.env`, then configuration from files and environment
/// 2. Initializes logging
/// 3. Creates the store handle (the backend is built on first access)
/// 4. Executes the requested command and prints its output
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded
/// - A value does not parse as the requested kind
/// - A write cannot be persisted
pub fn run() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = AppConfig::load()?;
    init_logging(&config);

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.store.backend,
        "Starting settings-store"
    );

    let store = Arc::new(StoreHandle::new(config.store));
    let output = cli.command.execute(&store)?;
    println!("{output}");

    Ok(())
}

/// Initialize logging based on configuration.
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_logging(config: &AppConfig) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.observability.log_format == "json" {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
