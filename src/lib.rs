pub mod appointments;
pub mod commands;
pub mod config;
pub mod contacts;
pub mod core_state; // Explicit state handed to commands
pub mod ids;
pub mod models;
pub mod session;
pub mod slots;
pub mod storage;
pub mod validation;

pub use core_state::{ClinicState, CoreError};

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber. `RUST_LOG` overrides the
/// default filter. Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    }
}
