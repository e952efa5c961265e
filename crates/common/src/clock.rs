//! Transport clock and media-time formatting.
//!
//! The preview transport position advances in real time while playing and
//! freezes while paused. This module provides:
//! - A monotonic transport clock with seek support
//! - `m:ss` and `m:ss.SS` formatting for elapsed/hover displays

use std::time::Instant;

use chrono::Duration;

/// A transport clock that advances with wall time while running.
///
/// The position is `offset + elapsed since anchor` when running and just
/// `offset` when stopped.
#[derive(Debug, Clone, Default)]
pub struct TransportClock {
    /// The instant the clock was last started; `None` while stopped.
    anchor: Option<Instant>,

    /// Position (seconds) accumulated up to the last start/stop/seek.
    offset_secs: f64,
}

impl TransportClock {
    /// Create a stopped clock at position zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start advancing from the current position. No-op if already running.
    pub fn start(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(Instant::now());
        }
    }

    /// Freeze the clock at its current position.
    pub fn stop(&mut self) {
        self.offset_secs = self.position_secs();
        self.anchor = None;
    }

    /// Whether the clock is advancing.
    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    /// Current position in seconds.
    pub fn position_secs(&self) -> f64 {
        match self.anchor {
            Some(anchor) => self.offset_secs + anchor.elapsed().as_secs_f64(),
            None => self.offset_secs,
        }
    }

    /// Jump to a position, keeping the running state.
    pub fn seek(&mut self, secs: f64) {
        self.offset_secs = secs.max(0.0);
        if self.anchor.is_some() {
            self.anchor = Some(Instant::now());
        }
    }
}

fn to_delta(secs: f64) -> Duration {
    let ms = if secs.is_finite() && secs > 0.0 {
        (secs * 1000.0) as i64
    } else {
        0
    };
    Duration::milliseconds(ms)
}

/// Format seconds as `m:ss` (minutes wrap at the hour).
pub fn format_clock(secs: f64) -> String {
    let delta = to_delta(secs);
    format!(
        "{}:{:02}",
        delta.num_minutes() % 60,
        delta.num_seconds() % 60
    )
}

/// Format seconds as `m:ss.SS` with truncated hundredths.
pub fn format_clock_precise(secs: f64) -> String {
    let delta = to_delta(secs);
    format!(
        "{}:{:02}.{:02}",
        delta.num_minutes() % 60,
        delta.num_seconds() % 60,
        (delta.num_milliseconds() % 1000) / 10
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_clock_holds_position() {
        let mut clock = TransportClock::new();
        clock.seek(2.5);
        assert!(!clock.is_running());
        assert!((clock.position_secs() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_running_clock_advances_from_seek_point() {
        let mut clock = TransportClock::new();
        clock.seek(1.0);
        clock.start();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let pos = clock.position_secs();
        assert!(pos > 1.0);
        assert!(pos < 2.0);

        clock.stop();
        let frozen = clock.position_secs();
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert_eq!(clock.position_secs(), frozen);
    }

    #[test]
    fn test_negative_seek_clamps_to_zero() {
        let mut clock = TransportClock::new();
        clock.seek(-3.0);
        assert_eq!(clock.position_secs(), 0.0);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(7.9), "0:07");
        assert_eq!(format_clock(65.2), "1:05");
        assert_eq!(format_clock(3600.0 + 61.0), "1:01");
        assert_eq!(format_clock(f64::NAN), "0:00");
    }

    #[test]
    fn test_format_clock_precise() {
        assert_eq!(format_clock_precise(0.0), "0:00.00");
        assert_eq!(format_clock_precise(1.256), "0:01.25");
        assert_eq!(format_clock_precise(125.5), "2:05.50");
        assert_eq!(format_clock_precise(-1.0), "0:00.00");
    }
}
