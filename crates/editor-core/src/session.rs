//! Editor session: the single owner of all clip-editing state.
//!
//! Every interaction arrives as an [`EditorEvent`] and runs to completion
//! before the next one. The playback tick enters through
//! [`EditorSession::on_tick`]. Collaborators only ever receive copies of
//! session state.

use framecut_common::clock::{format_clock, format_clock_precise};
use framecut_common::config::EditorDefaults;
use framecut_common::error::{FramecutError, FramecutResult};
use framecut_editor_model::event::{EditorEvent, HostMessage, Key};
use framecut_editor_model::export::{ExportRequest, FrameRateChoice, FrameRateSelection};
use framecut_editor_model::field::{FieldValue, NumericField};
use framecut_editor_model::geometry::{DimensionEdit, MediaGeometry};
use framecut_editor_model::playback::{clamp_to_window, PlaybackState};
use framecut_editor_model::trim::{TrimBoundary, TrimRangeController, TrimWindow};

use crate::host::HostTransport;
use crate::media::MediaElement;
use crate::services::{dispatch, ExportService, ExportSnapshot, FormatControl, ServiceRegistry};

/// What the runtime should do with the playback tick after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockDirective {
    /// Start (or restart) ticking for freshly loaded media.
    Start,
    /// Stop ticking; the media that was ticking is gone.
    Stop,
}

/// The two dimension inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionField {
    Width,
    Height,
}

/// How an export picks its service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceTarget {
    /// Registry position (button or dropdown).
    Index(usize),
    /// Host-supplied plugin name.
    PluginName(String),
}

/// Values the transport UI shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransportDisplay {
    /// Current position as `m:ss`.
    pub elapsed: String,
    /// Progress bar value (seconds).
    pub progress_value: f64,
    /// Progress bar maximum: the full media duration.
    pub progress_max: f64,
    /// Trimmed duration (`out - in`).
    pub trimmed_duration: f64,
    /// Timeline hover tip, `m:ss.SS (m:ss.SS)`.
    pub hover_tip: Option<String>,
}

/// State that only exists once media is ready.
#[derive(Debug, Clone)]
struct LoadedMedia {
    trim: TrimRangeController,
    geometry: MediaGeometry,
    width: NumericField,
    height: NumericField,
}

/// One clip-editing session.
pub struct EditorSession {
    media: Box<dyn MediaElement>,
    host: Box<dyn HostTransport>,
    registry: ServiceRegistry,
    controls: Vec<FormatControl>,
    controls_enabled: bool,
    loaded: Option<LoadedMedia>,
    playback: PlaybackState,
    frame_rate: FrameRateSelection,
    fullscreen: bool,
    display: TransportDisplay,
    alerts: Vec<DimensionField>,
}

impl EditorSession {
    /// Create a session. One export control is built per configured format.
    pub fn new(
        media: Box<dyn MediaElement>,
        host: Box<dyn HostTransport>,
        registry: ServiceRegistry,
        defaults: &EditorDefaults,
    ) -> Self {
        let controls = defaults
            .export_formats
            .iter()
            .map(|format| FormatControl::from_registry(format.as_str(), &registry))
            .collect();

        tracing::debug!(
            media = media.name(),
            host = host.name(),
            services = registry.len(),
            "Editor session created"
        );

        Self {
            media,
            host,
            registry,
            controls,
            controls_enabled: true,
            loaded: None,
            playback: PlaybackState::default(),
            frame_rate: FrameRateSelection::new(defaults.fps),
            fullscreen: false,
            display: TransportDisplay::default(),
            alerts: Vec::new(),
        }
    }

    /// Handle one event to completion.
    pub fn handle(&mut self, event: EditorEvent) -> FramecutResult<Option<ClockDirective>> {
        match event {
            EditorEvent::SetSource { src } => return Ok(Some(self.set_source(&src))),
            EditorEvent::MediaReady => return self.media_ready(),
            EditorEvent::TrimInChanged { value } => self.edit_trim(TrimBoundary::In, value),
            EditorEvent::TrimOutChanged { value } => self.edit_trim(TrimBoundary::Out, value),
            EditorEvent::TrimCommitted => {
                if self.loaded.is_some() {
                    self.play();
                }
            }
            EditorEvent::WidthEdited { raw } => self.edit_dimension(DimensionField::Width, &raw),
            EditorEvent::HeightEdited { raw } => {
                self.edit_dimension(DimensionField::Height, &raw)
            }
            EditorEvent::WidthBlurred => self.blur_dimension(DimensionField::Width),
            EditorEvent::HeightBlurred => self.blur_dimension(DimensionField::Height),
            EditorEvent::Play => self.play(),
            EditorEvent::Pause => self.pause(),
            EditorEvent::TogglePlay => self.toggle_play(),
            EditorEvent::SetMuted { muted } => self.set_muted(muted),
            EditorEvent::SelectFrameRate { choice } => self.select_frame_rate(choice),
            EditorEvent::ToggleFullscreen => self.toggle_fullscreen(),
            EditorEvent::KeyPressed { key } => self.key_pressed(key),
            EditorEvent::TimelineClicked { time } => self.seek(time),
            EditorEvent::TimelineHovered { time } => self.hover(time),
            EditorEvent::ExportButtonPressed { format } => {
                self.press_export_button(&format)?;
            }
            EditorEvent::ExportServiceChosen { format, index } => {
                self.choose_export_service(&format, index)?;
            }
            EditorEvent::RunPlugin {
                plugin_name,
                format,
            } => {
                self.export(ServiceTarget::PluginName(plugin_name), &format)?;
            }
            EditorEvent::SetExportControlsEnabled { enabled } => {
                tracing::debug!(enabled, "Export controls toggled");
                self.controls_enabled = enabled;
            }
        }
        Ok(None)
    }

    /// One playback tick: keep the transport inside the trim window and
    /// refresh the display.
    pub fn on_tick(&mut self) {
        let Some(loaded) = &self.loaded else {
            return;
        };
        let window = loaded.trim.window();

        let position = self.media.current_time();
        let clamped = clamp_to_window(position, &window);
        if clamped != position {
            tracing::trace!(position, loop_to = clamped, "Looping to trim in");
            self.media.set_current_time(clamped);
        }

        self.playback.position = clamped;
        self.display.progress_value = clamped;
        self.display.elapsed = format_clock(clamped);
    }

    /// Build and dispatch an export request. Returns the request sent.
    ///
    /// Core state is left untouched.
    pub fn export(&self, target: ServiceTarget, format: &str) -> FramecutResult<ExportRequest> {
        let snapshot = self.export_snapshot()?;
        let service: &dyn ExportService = match &target {
            ServiceTarget::Index(index) => self.registry.get(*index).ok_or_else(|| {
                FramecutError::export(format!("No export service at position {index}"))
            })?,
            ServiceTarget::PluginName(name) => {
                self.registry.find_by_plugin(name).ok_or_else(|| {
                    FramecutError::ServiceNotFound {
                        plugin_name: name.clone(),
                    }
                })?
            }
        };
        dispatch(service, format, &snapshot)
    }

    fn export_snapshot(&self) -> FramecutResult<ExportSnapshot> {
        let loaded = self
            .loaded
            .as_ref()
            .ok_or_else(|| FramecutError::not_ready("No media loaded to export"))?;
        Ok(ExportSnapshot {
            source_path: self.media.source().to_string(),
            output: loaded.geometry.output(),
            fps: self.frame_rate.fps(),
            window: loaded.trim.window(),
        })
    }

    fn set_source(&mut self, src: &str) -> ClockDirective {
        tracing::info!(src, "Loading media source");
        self.loaded = None;
        self.display = TransportDisplay::default();
        self.playback.position = 0.0;
        self.alerts.clear();
        self.pause();
        self.media.set_source(src);
        ClockDirective::Stop
    }

    fn media_ready(&mut self) -> FramecutResult<Option<ClockDirective>> {
        if self.loaded.is_some() {
            // The element reports readiness again on every loop.
            return Ok(None);
        }

        let duration = self
            .media
            .duration()
            .ok_or_else(|| FramecutError::not_ready("Media duration is not known yet"))?;
        let base = self
            .media
            .video_size()
            .ok_or_else(|| FramecutError::not_ready("Video size is not known yet"))?;
        if base.width == 0 || base.height == 0 {
            return Err(FramecutError::media(format!("Video has an empty frame ({base})")));
        }
        let trim = TrimRangeController::new(duration)
            .map_err(|e| FramecutError::trim(format!("Cannot trim media: {e}")))?;

        tracing::info!(
            duration,
            width = base.width,
            height = base.height,
            "Media ready"
        );

        self.display.progress_max = duration;
        self.display.trimmed_duration = trim.duration();
        self.loaded = Some(LoadedMedia {
            trim,
            geometry: MediaGeometry::new(base),
            width: NumericField::new(base.width, 1, base.width),
            height: NumericField::new(base.height, 1, base.height),
        });
        Ok(Some(ClockDirective::Start))
    }

    fn edit_trim(&mut self, boundary: TrimBoundary, value: f64) {
        if self.loaded.is_none() {
            tracing::debug!(?boundary, value, "Trim edit before media is ready");
            return;
        }
        self.pause();

        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        let target = loaded.trim.apply(boundary, value);
        self.display.trimmed_duration = loaded.trim.duration();
        self.media.set_current_time(target);
        self.playback.position = target;
    }

    fn edit_dimension(&mut self, field: DimensionField, raw: &str) {
        let Some(loaded) = self.loaded.as_mut() else {
            tracing::debug!(?field, raw, "Dimension edit before media is ready");
            return;
        };

        let mut rejected = false;
        let (edited, companion) = match field {
            DimensionField::Width => (&mut loaded.width, &mut loaded.height),
            DimensionField::Height => (&mut loaded.height, &mut loaded.width),
        };
        let value = edited.input(raw, || rejected = true);

        if let FieldValue::Value(v) = value {
            let edit = match field {
                DimensionField::Width => DimensionEdit::Width(v),
                DimensionField::Height => DimensionEdit::Height(v),
            };
            if let Some(solved) = loaded.geometry.apply(edit) {
                companion.set_solved(solved);
            }
        }

        if rejected {
            self.alerts.push(field);
        }
    }

    fn blur_dimension(&mut self, field: DimensionField) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        let mut rejected = false;
        match field {
            DimensionField::Width => loaded.width.blur(|| rejected = true),
            DimensionField::Height => loaded.height.blur(|| rejected = true),
        };
        if rejected {
            self.alerts.push(field);
        }
    }

    fn play(&mut self) {
        self.media.play();
        self.playback.is_playing = true;
        self.notify(HostMessage::TogglePlay { playing: true });
    }

    fn pause(&mut self) {
        self.media.pause();
        self.playback.is_playing = false;
        self.notify(HostMessage::TogglePlay { playing: false });
    }

    fn toggle_play(&mut self) {
        if self.playback.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.media.set_muted(muted);
        self.playback.is_muted = muted;
    }

    fn select_frame_rate(&mut self, choice: FrameRateChoice) {
        self.frame_rate.select(choice);
        tracing::debug!(fps = self.frame_rate.fps(), "Frame rate selected");
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        self.notify(HostMessage::ToggleFullscreenEditorWindow);
    }

    fn key_pressed(&mut self, key: Key) {
        match key {
            Key::Escape if self.fullscreen => self.toggle_fullscreen(),
            Key::Escape => self.notify(HostMessage::CloseEditorWindow),
            Key::Space => self.toggle_play(),
        }
    }

    fn seek(&mut self, time: f64) {
        let Some(loaded) = &self.loaded else {
            return;
        };
        if loaded.trim.window().strictly_contains(time) {
            self.media.set_current_time(time);
            self.playback.position = time;
        }
    }

    fn hover(&mut self, time: f64) {
        if self.loaded.is_none() {
            return;
        }
        self.display.hover_tip = Some(format!(
            "{} ({})",
            format_clock_precise(time),
            format_clock_precise(self.display.trimmed_duration)
        ));
    }

    fn press_export_button(&self, format: &str) -> FramecutResult<()> {
        if !self.controls_enabled {
            tracing::debug!(format, "Export controls disabled; ignoring button");
            return Ok(());
        }
        let index = self.control(format)?.button_target()?;
        self.export(ServiceTarget::Index(index), format)?;
        Ok(())
    }

    fn choose_export_service(&mut self, format: &str, index: usize) -> FramecutResult<()> {
        if !self.controls_enabled {
            tracing::debug!(format, index, "Export controls disabled; ignoring choice");
            return Ok(());
        }
        self.control_mut(format)?.choose(index)?;
        let result = self.export(ServiceTarget::Index(index), format);
        self.control_mut(format)?.reset_selection();
        result.map(|_| ())
    }

    fn control(&self, format: &str) -> FramecutResult<&FormatControl> {
        self.controls
            .iter()
            .find(|c| c.format() == format)
            .ok_or_else(|| FramecutError::export(format!("Unknown export format '{format}'")))
    }

    fn control_mut(&mut self, format: &str) -> FramecutResult<&mut FormatControl> {
        self.controls
            .iter_mut()
            .find(|c| c.format() == format)
            .ok_or_else(|| FramecutError::export(format!("Unknown export format '{format}'")))
    }

    fn notify(&mut self, message: HostMessage) {
        if let Err(e) = self.host.send(message.clone()) {
            tracing::warn!(error = %e, ?message, "Failed to notify host");
        }
    }

    /// Transport state.
    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    /// Trim window, once media is ready.
    pub fn trim_window(&self) -> Option<TrimWindow> {
        self.loaded.as_ref().map(|l| l.trim.window())
    }

    /// Output geometry, once media is ready.
    pub fn geometry(&self) -> Option<MediaGeometry> {
        self.loaded.as_ref().map(|l| l.geometry)
    }

    /// Text currently shown in a dimension field.
    pub fn field_text(&self, field: DimensionField) -> Option<String> {
        self.loaded.as_ref().map(|l| match field {
            DimensionField::Width => l.width.text(),
            DimensionField::Height => l.height.text(),
        })
    }

    pub fn frame_rate(&self) -> FrameRateSelection {
        self.frame_rate
    }

    pub fn display(&self) -> &TransportDisplay {
        &self.display
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn export_controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn export_controls(&self) -> &[FormatControl] {
        &self.controls
    }

    pub fn media(&self) -> &dyn MediaElement {
        self.media.as_ref()
    }

    /// Drain the fields whose input was rejected since the last call.
    pub fn take_alerts(&mut self) -> Vec<DimensionField> {
        std::mem::take(&mut self.alerts)
    }
}
