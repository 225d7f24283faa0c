//! Session kernel: camera pose, cube scene, loading phase, and the clock and
//! tick-schedule collaborators that drive frames.
//!
//! # Invariants
//! - Scene geometry is generated once and never mutated afterwards.
//! - The loading phase moves to playing at most once and never reverts.
//! - All randomness flows through a `RandomSource`.

pub mod camera;
pub mod clock;
pub mod phase;
pub mod random;
pub mod scene;
pub mod schedule;
pub mod session;

pub use camera::{CameraMotion, CameraPose};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use phase::{GamePhase, LoadingState};
pub use random::{RandomSource, ScriptedRandom, SessionRng};
pub use scene::{Cube, FloorGrid, FloorQuad, Scene};
pub use schedule::TickSchedule;
pub use session::{FrameParts, Session};

pub fn crate_info() -> &'static str {
    "bealtmian-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}
