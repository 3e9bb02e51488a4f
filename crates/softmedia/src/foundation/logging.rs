//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Log levels come from the `RUST_LOG` environment variable. Call once at
/// application startup; a second call panics (see [`try_init`]).
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system, ignoring repeated initialization
///
/// Tests and short-lived tools call this so shared setup code can run more
/// than once per process.
pub fn try_init() {
    let _ = env_logger::try_init();
}
