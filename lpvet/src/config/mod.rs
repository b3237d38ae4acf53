//! Configuration module for lpvet
//!
//! Fixed format limits live in [`constants::compile_time`]; user preferences
//! that may come from the environment or a TOML file live in [`runtime`].

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{ConfigError, RuntimeConfig};

/// Build information
pub mod build_info {
    /// Returns the crate version baked in at compile time
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Returns the build profile the binary was compiled with
    pub fn profile() -> &'static str {
        if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        }
    }
}
