//! Editor events, inbound host commands, and outbound host messages.
//!
//! Every user interaction with the editor is an [`EditorEvent`]. The host
//! process talks to the editor through [`HostCommand`]s (inbound) and
//! [`HostMessage`]s (outbound), both serialized as JSON objects tagged by
//! their IPC channel name.

use serde::{Deserialize, Serialize};

use crate::export::FrameRateChoice;

/// Keyboard keys the editor window reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    Space,
}

/// A user or host interaction handled by the editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    /// Load a new media source.
    SetSource { src: String },

    /// The media element decoded its first frame.
    MediaReady,

    /// Trim-in slider dragged.
    TrimInChanged { value: f64 },

    /// Trim-out slider dragged.
    TrimOutChanged { value: f64 },

    /// A trim slider was released.
    TrimCommitted,

    /// Width field text changed.
    WidthEdited { raw: String },

    /// Height field text changed.
    HeightEdited { raw: String },

    WidthBlurred,
    HeightBlurred,

    Play,
    Pause,
    TogglePlay,

    SetMuted { muted: bool },

    SelectFrameRate { choice: FrameRateChoice },

    ToggleFullscreen,

    KeyPressed { key: Key },

    /// Timeline clicked at a media time (seconds).
    TimelineClicked { time: f64 },

    /// Pointer hovering the timeline at a media time (seconds).
    TimelineHovered { time: f64 },

    /// Single-service export button for a format.
    ExportButtonPressed { format: String },

    /// Service picked from a format's dropdown, by registry index.
    ExportServiceChosen { format: String, index: usize },

    /// Run a service by plugin name.
    RunPlugin { plugin_name: String, format: String },

    /// Enable or disable the export buttons and dropdowns.
    SetExportControlsEnabled { enabled: bool },
}

/// Commands the host process sends to the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "kebab-case")]
pub enum HostCommand {
    VideoSrc {
        src: String,
    },
    TogglePlay {
        playing: bool,
    },
    RunPlugin {
        #[serde(rename = "pluginName")]
        plugin_name: String,
        format: String,
    },
    ToggleFormatButtons {
        enabled: bool,
    },
}

impl From<HostCommand> for EditorEvent {
    fn from(command: HostCommand) -> Self {
        match command {
            HostCommand::VideoSrc { src } => EditorEvent::SetSource { src },
            HostCommand::TogglePlay { playing: true } => EditorEvent::Play,
            HostCommand::TogglePlay { playing: false } => EditorEvent::Pause,
            HostCommand::RunPlugin {
                plugin_name,
                format,
            } => EditorEvent::RunPlugin {
                plugin_name,
                format,
            },
            HostCommand::ToggleFormatButtons { enabled } => {
                EditorEvent::SetExportControlsEnabled { enabled }
            }
        }
    }
}

/// Fire-and-forget notifications from the editor to the host process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "kebab-case")]
pub enum HostMessage {
    TogglePlay { playing: bool },
    ToggleFullscreenEditorWindow,
    CloseEditorWindow,
}

/// Decode one inbound JSON object into an editor event.
///
/// Objects carrying a `channel` key are host commands; anything else must
/// be a `type`-tagged editor event.
pub fn parse_input(value: serde_json::Value) -> Result<EditorEvent, serde_json::Error> {
    if value.get("channel").is_some() {
        serde_json::from_value::<HostCommand>(value).map(EditorEvent::from)
    } else {
        serde_json::from_value(value)
    }
}
