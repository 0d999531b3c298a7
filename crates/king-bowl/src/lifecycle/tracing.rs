//! Subscriber setup for the binary.
//!
//! Every actor logs with an `entity_type` field (`Cart`, `StaffOrder`, ...), so the
//! module path is left out of each line.
//!
//! ```bash
//! RUST_LOG=info cargo run      # one line per committed change
//! RUST_LOG=debug cargo run     # every request
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. `RUST_LOG` wins over `default_filter`.
/// Calling it a second time is a no-op.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
