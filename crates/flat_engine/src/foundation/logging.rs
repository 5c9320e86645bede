//! Logging utilities
//!
//! Thin wrapper over `env_logger`; library code logs through the `log`
//! macros re-exported here and never prints directly.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Call once at application startup; verbosity is controlled through the
/// usual `RUST_LOG` environment variable.
pub fn init() {
    env_logger::init();
}
