//! Transport state and the trim-window clamp.

use serde::{Deserialize, Serialize};

use crate::trim::TrimWindow;

/// Preview transport state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Current position (seconds).
    pub position: f64,
    pub is_playing: bool,
    pub is_muted: bool,
}

/// Keep a transport position inside the trim window.
///
/// A position outside `[in, out]` snaps back to `in`, which is what makes
/// the preview loop over the trimmed range. Positions inside are
/// returned unchanged.
pub fn clamp_to_window(position: f64, window: &TrimWindow) -> f64 {
    if position < window.in_point || position > window.out_point {
        window.in_point
    } else {
        position
    }
}
