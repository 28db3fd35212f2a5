//! Logging setup for hosts embedding the builder
//!
//! The crate itself only logs through the `log` facade. Hosts that have no
//! logger of their own can call [`init_logging`] once at startup.

use env_logger::{Builder, Env};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Install `env_logger`, honouring `RUST_LOG` and defaulting to `info`.
///
/// Returns `false` if a logger was already installed; calling it twice is
/// harmless.
pub fn init_logging() -> bool {
    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .try_init()
        .is_ok()
}
