//! The preview media element.

use framecut_common::clock::TransportClock;
use framecut_editor_model::geometry::Resolution;

/// Interface to the element that plays the preview.
///
/// Implementations own decoding and rendering; the editor only reads and
/// moves the transport position.
pub trait MediaElement: Send {
    /// Replace the media source. Resets position and pauses.
    fn set_source(&mut self, src: &str);

    /// Current media source.
    fn source(&self) -> &str;

    /// Media duration in seconds, once known.
    fn duration(&self) -> Option<f64>;

    /// Decoded frame size, once the first frame is available.
    fn video_size(&self) -> Option<Resolution>;

    /// Current transport position in seconds.
    fn current_time(&self) -> f64;

    /// Move the transport position.
    fn set_current_time(&mut self, secs: f64);

    fn play(&mut self);
    fn pause(&mut self);

    /// Mute or unmute audio output.
    fn set_muted(&mut self, muted: bool);

    fn is_muted(&self) -> bool;

    /// Element name for logging.
    fn name(&self) -> &str;
}

/// A headless media element that advances in real time.
///
/// Playback stops advancing at the end of the media, like a player that
/// reached its last frame.
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    source: String,
    duration: f64,
    resolution: Resolution,
    clock: TransportClock,
    muted: bool,
}

impl SimulatedMedia {
    pub fn new(duration: f64, resolution: Resolution) -> Self {
        Self {
            source: String::new(),
            duration,
            resolution,
            clock: TransportClock::new(),
            muted: false,
        }
    }

    /// Whether the transport is advancing.
    pub fn is_playing(&self) -> bool {
        self.clock.is_running()
    }
}

impl MediaElement for SimulatedMedia {
    fn set_source(&mut self, src: &str) {
        self.source = src.to_string();
        self.clock = TransportClock::new();
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn duration(&self) -> Option<f64> {
        (!self.source.is_empty()).then_some(self.duration)
    }

    fn video_size(&self) -> Option<Resolution> {
        (!self.source.is_empty()).then_some(self.resolution)
    }

    fn current_time(&self) -> f64 {
        self.clock.position_secs().min(self.duration)
    }

    fn set_current_time(&mut self, secs: f64) {
        self.clock.seek(secs.clamp(0.0, self.duration));
    }

    fn play(&mut self) {
        if self.clock.position_secs() >= self.duration {
            self.clock.seek(0.0);
        }
        self.clock.start();
    }

    fn pause(&mut self) {
        self.clock.stop();
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
