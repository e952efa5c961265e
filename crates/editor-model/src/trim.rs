//! Trim window and boundary editing.
//!
//! The trim window is the `[in, out]` sub-range of the source media that
//! gets exported. Its two boundaries are always at least [`TRIM_STEP`]
//! apart: an edit that would bring them closer pushes the *other*
//! boundary instead of being rejected.

use serde::{Deserialize, Serialize};

/// Minimum separation between the in and out boundaries (seconds).
pub const TRIM_STEP: f64 = 0.00001;

/// The selected `[in, out]` range, in seconds of source media.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimWindow {
    #[serde(rename = "in")]
    pub in_point: f64,
    #[serde(rename = "out")]
    pub out_point: f64,
}

impl TrimWindow {
    /// Trimmed duration.
    pub fn duration(&self) -> f64 {
        self.out_point - self.in_point
    }

    /// Inclusive containment check.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.in_point && t <= self.out_point
    }

    /// Exclusive containment check, used for timeline clicks.
    pub fn strictly_contains(&self, t: f64) -> bool {
        t > self.in_point && t < self.out_point
    }

    /// Whether the boundaries honour the minimum separation.
    pub fn is_separated(&self) -> bool {
        self.duration() >= TRIM_STEP
    }
}

/// Which boundary an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimBoundary {
    In,
    Out,
}

/// Owns the trim window for one loaded media item.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimRangeController {
    media_duration: f64,
    window: TrimWindow,
}

impl TrimRangeController {
    /// Create a controller spanning the whole media: `{in: 0, out: duration}`.
    pub fn new(media_duration: f64) -> Result<Self, TrimError> {
        if !media_duration.is_finite() || media_duration < TRIM_STEP {
            return Err(TrimError::InvalidDuration {
                duration: media_duration,
            });
        }
        Ok(Self {
            media_duration,
            window: TrimWindow {
                in_point: 0.0,
                out_point: media_duration,
            },
        })
    }

    /// Current window (a copy).
    pub fn window(&self) -> TrimWindow {
        self.window
    }

    /// Full media duration the boundaries are clamped to.
    pub fn media_duration(&self) -> f64 {
        self.media_duration
    }

    /// Trimmed duration (`out - in`).
    pub fn duration(&self) -> f64 {
        self.window.duration()
    }

    /// Move the in boundary. Returns the new in value (the seek target).
    pub fn set_in(&mut self, value: f64) -> f64 {
        let value = self.sanitize(value, self.window.in_point);
        self.window.in_point = value;

        if !self.window.is_separated() {
            let pushed = step_above(value);
            if pushed <= self.media_duration {
                self.window.out_point = pushed;
            } else {
                // No room past the media end: pin out there and back in off.
                self.window.out_point = self.media_duration;
                self.window.in_point = step_below(self.media_duration).unwrap_or(0.0);
            }
        }

        self.window.in_point
    }

    /// Move the out boundary. Returns the new out value (the seek target).
    pub fn set_out(&mut self, value: f64) -> f64 {
        let value = self.sanitize(value, self.window.out_point);
        self.window.out_point = value;

        if !self.window.is_separated() {
            match step_below(value) {
                Some(pushed) => self.window.in_point = pushed,
                None => {
                    self.window.in_point = 0.0;
                    self.window.out_point = step_above(0.0);
                }
            }
        }

        self.window.out_point
    }

    /// Apply an edit to the given boundary. Returns the seek target.
    pub fn apply(&mut self, boundary: TrimBoundary, value: f64) -> f64 {
        match boundary {
            TrimBoundary::In => self.set_in(value),
            TrimBoundary::Out => self.set_out(value),
        }
    }

    fn sanitize(&self, value: f64, current: f64) -> f64 {
        if value.is_nan() {
            current
        } else {
            value.clamp(0.0, self.media_duration)
        }
    }
}

/// Smallest value one step above `x` whose distance from `x` is at least
/// [`TRIM_STEP`] after rounding. `x` must be non-negative.
fn step_above(x: f64) -> f64 {
    let mut y = x + TRIM_STEP;
    while y - x < TRIM_STEP {
        y = f64::from_bits(y.to_bits() + 1);
    }
    y
}

/// Largest non-negative value at least [`TRIM_STEP`] below `x`, if any.
fn step_below(x: f64) -> Option<f64> {
    let mut y = x - TRIM_STEP;
    while y > 0.0 && x - y < TRIM_STEP {
        y = f64::from_bits(y.to_bits() - 1);
    }
    (y >= 0.0 && x - y >= TRIM_STEP).then_some(y)
}

/// Errors that can occur when creating a trim window.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrimError {
    #[error("Media duration {duration} cannot hold a trim window")]
    InvalidDuration { duration: f64 },
}
