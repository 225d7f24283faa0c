use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Loading,
    Playing,
}

/// Pixels the loading pattern scrolls per frame.
pub const LOADING_SCROLL_STEP: i64 = 5;

/// Timed splash before play, plus the frame counter driving its animation.
#[derive(Debug, Clone)]
pub struct LoadingState {
    phase: GamePhase,
    started_at: Duration,
    duration: Duration,
    frame_count: u64,
}

impl LoadingState {
    pub fn new(started_at: Duration, duration: Duration) -> Self {
        Self {
            phase: GamePhase::Loading,
            started_at,
            duration,
            frame_count: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Loading frames drawn so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Scroll offset in pixels for the current loading frame.
    pub fn scroll_offset(&self) -> i64 {
        self.frame_count as i64 * LOADING_SCROLL_STEP
    }

    pub fn advance_frame(&mut self) {
        self.frame_count += 1;
    }

    /// Switch to `Playing` once strictly more than the loading duration has
    /// elapsed. Returns the new phase on the transition tick only.
    pub fn update(&mut self, now: Duration) -> Option<GamePhase> {
        if self.phase != GamePhase::Loading {
            return None;
        }
        let elapsed = now.saturating_sub(self.started_at);
        if elapsed > self.duration {
            self.phase = GamePhase::Playing;
            tracing::info!(
                elapsed_ms = elapsed.as_millis() as u64,
                frames = self.frame_count,
                "loading finished, entering play"
            );
            return Some(GamePhase::Playing);
        }
        None
    }
}
