//! Frame-rate selection and the outbound export request.

use serde::{Deserialize, Serialize};

use crate::geometry::Resolution;
use crate::trim::TrimWindow;

/// Default export frame rate.
pub const DEFAULT_FPS: u32 = 15;

/// Upper bound for the "max" frame-rate choice.
pub const FPS_CEILING: u32 = 30;

/// The two frame-rate buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameRateChoice {
    #[default]
    #[serde(rename = "15")]
    Fifteen,
    Max,
}

/// Frame-rate state: the selected choice and what "max" resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRateSelection {
    choice: FrameRateChoice,
    max_allowed: u32,
}

impl FrameRateSelection {
    /// `max_allowed = min(configured_fps, 30)`; the selection starts at 15.
    pub fn new(configured_fps: u32) -> Self {
        Self {
            choice: FrameRateChoice::Fifteen,
            max_allowed: configured_fps.clamp(1, FPS_CEILING),
        }
    }

    pub fn select(&mut self, choice: FrameRateChoice) {
        self.choice = choice;
    }

    pub fn choice(&self) -> FrameRateChoice {
        self.choice
    }

    pub fn max_allowed(&self) -> u32 {
        self.max_allowed
    }

    /// Frames per second for the current choice.
    pub fn fps(&self) -> u32 {
        match self.choice {
            FrameRateChoice::Fifteen => DEFAULT_FPS,
            FrameRateChoice::Max => self.max_allowed,
        }
    }
}

/// One export action, handed to an export service and not retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Output format, e.g. `gif`.
    pub format: String,

    /// Plugin name of the service this request was dispatched to.
    pub plugin_name: String,

    /// Media source of the preview.
    #[serde(rename = "filePath")]
    pub source_path: String,

    pub width: u32,
    pub height: u32,
    pub fps: u32,

    /// Whether the output loops. Always set for editor exports.
    #[serde(rename = "loop")]
    pub loop_playback: bool,

    /// Trim in (seconds).
    pub start_time: f64,

    /// Trim out (seconds).
    pub end_time: f64,
}

impl ExportRequest {
    pub fn new(
        format: impl Into<String>,
        plugin_name: impl Into<String>,
        source_path: impl Into<String>,
        output: Resolution,
        fps: u32,
        window: TrimWindow,
    ) -> Self {
        Self {
            format: format.into(),
            plugin_name: plugin_name.into(),
            source_path: source_path.into(),
            width: output.width,
            height: output.height,
            fps,
            loop_playback: true,
            start_time: window.in_point,
            end_time: window.out_point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rate_defaults_to_fifteen() {
        let selection = FrameRateSelection::new(60);
        assert_eq!(selection.choice(), FrameRateChoice::Fifteen);
        assert_eq!(selection.fps(), 15);
    }

    #[test]
    fn test_max_is_capped_at_thirty() {
        let mut selection = FrameRateSelection::new(60);
        selection.select(FrameRateChoice::Max);
        assert_eq!(selection.fps(), 30);

        let mut low = FrameRateSelection::new(24);
        low.select(FrameRateChoice::Max);
        assert_eq!(low.fps(), 24);
    }

    #[test]
    fn test_zero_configured_fps_floors_at_one() {
        assert_eq!(FrameRateSelection::new(0).max_allowed(), 1);
    }

    #[test]
    fn test_request_carries_window_and_loops() {
        let request = ExportRequest::new(
            "gif",
            "save-file",
            "/tmp/clip.mp4",
            Resolution::new(320, 240),
            15,
            TrimWindow {
                in_point: 1.0,
                out_point: 4.0,
            },
        );
        assert!(request.loop_playback);
        assert_eq!(request.start_time, 1.0);
        assert_eq!(request.end_time, 4.0);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["loop"], true);
        assert_eq!(json["filePath"], "/tmp/clip.mp4");
        assert_eq!(json["startTime"], 1.0);
        assert_eq!(json["pluginName"], "save-file");
    }

    #[test]
    fn test_frame_rate_choice_wire_names() {
        assert_eq!(
            serde_json::to_string(&FrameRateChoice::Fifteen).unwrap(),
            "\"15\""
        );
        assert_eq!(
            serde_json::from_str::<FrameRateChoice>("\"max\"").unwrap(),
            FrameRateChoice::Max
        );
    }
}
