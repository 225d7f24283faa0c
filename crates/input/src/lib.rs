//! Input: held movement keys mapped to semantic movement actions.
//!
//! # Invariants
//! - Frames read a copied `InputSnapshot`, never the live key set.
//! - Unbound keys are ignored and never reach camera physics.

pub mod action;
mod state;

pub use action::MoveKey;
pub use state::{InputSnapshot, InputState};

pub fn crate_info() -> &'static str {
    "bealtmian-input v0.1.0"
}
