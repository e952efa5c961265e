//! Recording fakes for the editor collaborators.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use framecut_common::config::{EditorDefaults, ServiceDescriptor};
use framecut_common::error::FramecutResult;
use framecut_editor_core::host::HostTransport;
use framecut_editor_core::media::MediaElement;
use framecut_editor_core::services::{ExportService, ServiceRegistry};
use framecut_editor_core::session::EditorSession;
use framecut_editor_model::event::{EditorEvent, HostMessage};
use framecut_editor_model::export::ExportRequest;
use framecut_editor_model::geometry::Resolution;

/// Media state shared between the session's element and the test.
#[derive(Debug, Clone, Default)]
pub struct MediaProbe {
    pub source: String,
    pub duration: f64,
    pub resolution: Option<Resolution>,
    pub current_time: f64,
    pub playing: bool,
    pub muted: bool,
    pub seeks: Vec<f64>,
}

pub struct FakeMedia {
    state: Arc<Mutex<MediaProbe>>,
    source: String,
}

impl FakeMedia {
    pub fn new(duration: f64, resolution: Resolution) -> (Self, Arc<Mutex<MediaProbe>>) {
        let state = Arc::new(Mutex::new(MediaProbe {
            duration,
            resolution: Some(resolution),
            ..MediaProbe::default()
        }));
        (
            Self {
                state: Arc::clone(&state),
                source: String::new(),
            },
            state,
        )
    }
}

impl MediaElement for FakeMedia {
    fn set_source(&mut self, src: &str) {
        self.source = src.to_string();
        let mut state = self.state.lock().unwrap();
        state.source = src.to_string();
        state.current_time = 0.0;
        state.playing = false;
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn duration(&self) -> Option<f64> {
        let state = self.state.lock().unwrap();
        (!state.source.is_empty()).then_some(state.duration)
    }

    fn video_size(&self) -> Option<Resolution> {
        let state = self.state.lock().unwrap();
        if state.source.is_empty() {
            None
        } else {
            state.resolution
        }
    }

    fn current_time(&self) -> f64 {
        self.state.lock().unwrap().current_time
    }

    fn set_current_time(&mut self, secs: f64) {
        let mut state = self.state.lock().unwrap();
        state.current_time = secs;
        state.seeks.push(secs);
    }

    fn play(&mut self) {
        self.state.lock().unwrap().playing = true;
    }

    fn pause(&mut self) {
        self.state.lock().unwrap().playing = false;
    }

    fn set_muted(&mut self, muted: bool) {
        self.state.lock().unwrap().muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.state.lock().unwrap().muted
    }

    fn name(&self) -> &str {
        "fake"
    }
}

#[derive(Clone, Default)]
pub struct RecordingHost {
    pub messages: Arc<Mutex<Vec<HostMessage>>>,
}

impl RecordingHost {
    pub fn take(&self) -> Vec<HostMessage> {
        std::mem::take(&mut *self.messages.lock().unwrap())
    }
}

impl HostTransport for RecordingHost {
    fn send(&mut self, message: HostMessage) -> FramecutResult<()> {
        self.messages.lock().unwrap().push(message);
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

pub struct RecordingService {
    descriptor: ServiceDescriptor,
    pub requests: Arc<Mutex<Vec<ExportRequest>>>,
}

impl ExportService for RecordingService {
    fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    fn run(&self, request: ExportRequest) -> FramecutResult<()> {
        self.requests.lock().unwrap().push(request);
        Ok(())
    }
}

/// Everything a test needs to drive and observe a session.
pub struct Harness {
    pub session: EditorSession,
    pub media: Arc<Mutex<MediaProbe>>,
    pub host: RecordingHost,
    pub exports: Arc<Mutex<Vec<ExportRequest>>>,
}

impl Harness {
    pub fn exports(&self) -> Vec<ExportRequest> {
        self.exports.lock().unwrap().clone()
    }

    pub fn set_position(&self, secs: f64) {
        self.media.lock().unwrap().current_time = secs;
    }

    pub fn position(&self) -> f64 {
        self.media.lock().unwrap().current_time
    }

    /// Load a source and report it ready.
    pub fn load(&mut self, src: &str) {
        self.session
            .handle(EditorEvent::SetSource {
                src: src.to_string(),
            })
            .unwrap();
        self.session.handle(EditorEvent::MediaReady).unwrap();
    }
}

/// Services used by most tests: a save service for every format plus an
/// upload service that only takes gif.
pub fn default_services() -> Vec<ServiceDescriptor> {
    vec![
        ServiceDescriptor::new("Save to file", "save-file", ["gif", "mp4", "webm", "apng"]),
        ServiceDescriptor::new("Upload", "upload", ["gif"]),
    ]
}

pub fn harness(duration: f64, resolution: Resolution) -> Harness {
    harness_with(duration, resolution, default_services(), 30)
}

pub fn harness_with(
    duration: f64,
    resolution: Resolution,
    services: Vec<ServiceDescriptor>,
    fps: u32,
) -> Harness {
    let (media, probe) = FakeMedia::new(duration, resolution);
    let host = RecordingHost::default();
    let exports = Arc::new(Mutex::new(Vec::new()));

    let services: Vec<Box<dyn ExportService>> = services
        .into_iter()
        .map(|descriptor| {
            Box::new(RecordingService {
                descriptor,
                requests: Arc::clone(&exports),
            }) as Box<dyn ExportService>
        })
        .collect();

    let defaults = EditorDefaults {
        fps,
        ..EditorDefaults::default()
    };
    let session = EditorSession::new(
        Box::new(media),
        Box::new(host.clone()),
        ServiceRegistry::new(services),
        &defaults,
    );

    Harness {
        session,
        media: probe,
        host,
        exports,
    }
}
