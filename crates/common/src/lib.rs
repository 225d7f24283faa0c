//! Shared types for bealtmian: colors and session configuration.
//!
//! # Invariants
//! - Colors are 8-bit RGB triples and always format as `#rrggbb`.
//! - A `SessionConfig` that passed `validate` never yields a degenerate
//!   viewport, range or interval.

pub mod color;
pub mod config;

pub use color::Rgb;
pub use config::{ConfigError, SessionConfig};

pub fn crate_info() -> &'static str {
    "bealtmian-common v0.1.0"
}
