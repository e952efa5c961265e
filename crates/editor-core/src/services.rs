//! Export services, per-format export controls, and request dispatch.

use framecut_common::config::ServiceDescriptor;
use framecut_common::error::{FramecutError, FramecutResult};
use framecut_editor_model::export::ExportRequest;
use framecut_editor_model::geometry::Resolution;
use framecut_editor_model::trim::TrimWindow;

/// A backend that produces output files from export requests.
pub trait ExportService: Send + Sync {
    /// Title, plugin name, and supported formats.
    fn descriptor(&self) -> &ServiceDescriptor;

    /// Hand a request off to the backend. Must not wait for the export
    /// itself to finish.
    fn run(&self, request: ExportRequest) -> FramecutResult<()>;
}

/// The ordered list of export services provided by the host.
///
/// Read-only for the editor. Dropdown choices refer to services by their
/// position in this list.
#[derive(Default)]
pub struct ServiceRegistry {
    services: Vec<Box<dyn ExportService>>,
}

impl ServiceRegistry {
    pub fn new(services: Vec<Box<dyn ExportService>>) -> Self {
        Self { services }
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Service at a registry position.
    pub fn get(&self, index: usize) -> Option<&dyn ExportService> {
        self.services.get(index).map(Box::as_ref)
    }

    /// First service registered under a plugin name.
    pub fn find_by_plugin(&self, plugin_name: &str) -> Option<&dyn ExportService> {
        self.services
            .iter()
            .find(|s| s.descriptor().plugin_name == plugin_name)
            .map(Box::as_ref)
    }

    /// Registry positions of the services that support a format.
    pub fn indices_for_format(&self, format: &str) -> Vec<usize> {
        self.services
            .iter()
            .enumerate()
            .filter(|(_, s)| s.descriptor().supports(format))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.services.iter().map(|s| s.descriptor())
    }
}

/// How a format's export control is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportControlKind {
    /// One action; dispatches to the given registry position.
    Button { service: Option<usize> },
    /// A picker over several registry positions.
    Dropdown { choices: Vec<usize> },
}

/// The export control for one output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatControl {
    format: String,
    kind: ExportControlKind,
    selected: Option<usize>,
}

impl FormatControl {
    /// Build the control for a format from the registry.
    ///
    /// Several matching services give a dropdown. Otherwise a button runs
    /// the single matching service, or the registry's first service when
    /// none matches.
    pub fn from_registry(format: impl Into<String>, registry: &ServiceRegistry) -> Self {
        let format = format.into();
        let choices = registry.indices_for_format(&format);
        let kind = if choices.len() > 1 {
            ExportControlKind::Dropdown { choices }
        } else {
            let service = choices
                .first()
                .copied()
                .or_else(|| (!registry.is_empty()).then_some(0));
            ExportControlKind::Button { service }
        };
        Self {
            format,
            kind,
            selected: None,
        }
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn kind(&self) -> &ExportControlKind {
        &self.kind
    }

    /// Dropdown selection; `None` when nothing is selected.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Registry position behind the button.
    pub fn button_target(&self) -> FramecutResult<usize> {
        match &self.kind {
            ExportControlKind::Button {
                service: Some(index),
            } => Ok(*index),
            ExportControlKind::Button { service: None } => Err(FramecutError::export(format!(
                "No export service available for '{}'",
                self.format
            ))),
            ExportControlKind::Dropdown { .. } => Err(FramecutError::export(format!(
                "'{}' exports are chosen from a service list",
                self.format
            ))),
        }
    }

    /// Select a registry position from the dropdown.
    pub fn choose(&mut self, index: usize) -> FramecutResult<usize> {
        match &self.kind {
            ExportControlKind::Dropdown { choices } if choices.contains(&index) => {
                self.selected = Some(index);
                Ok(index)
            }
            ExportControlKind::Dropdown { .. } => Err(FramecutError::export(format!(
                "Service #{index} is not offered for '{}'",
                self.format
            ))),
            ExportControlKind::Button { .. } => Err(FramecutError::export(format!(
                "'{}' has a single export action",
                self.format
            ))),
        }
    }

    /// Return the dropdown to its unselected state.
    pub fn reset_selection(&mut self) {
        self.selected = None;
    }
}

/// Copy of the editor state an export request is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSnapshot {
    pub source_path: String,
    pub output: Resolution,
    pub fps: u32,
    pub window: TrimWindow,
}

impl ExportSnapshot {
    /// Build the request for a format and a target service.
    pub fn request(&self, format: &str, service: &dyn ExportService) -> ExportRequest {
        ExportRequest::new(
            format,
            service.descriptor().plugin_name.clone(),
            self.source_path.clone(),
            self.output,
            self.fps,
            self.window,
        )
    }
}

/// Build a request from the snapshot and hand it to the service.
///
/// Returns a copy of the request that was sent.
pub fn dispatch(
    service: &dyn ExportService,
    format: &str,
    snapshot: &ExportSnapshot,
) -> FramecutResult<ExportRequest> {
    let request = snapshot.request(format, service);

    tracing::info!(
        service = %service.descriptor().title,
        plugin = %request.plugin_name,
        format = %request.format,
        width = request.width,
        height = request.height,
        fps = request.fps,
        start = request.start_time,
        end = request.end_time,
        "Dispatching export"
    );

    service.run(request.clone())?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct StubService {
        descriptor: ServiceDescriptor,
        received: Mutex<Vec<ExportRequest>>,
    }

    impl StubService {
        fn boxed(title: &str, plugin: &str, formats: &[&str]) -> Box<dyn ExportService> {
            Box::new(Self {
                descriptor: ServiceDescriptor::new(title, plugin, formats.iter().copied()),
                received: Mutex::new(vec![]),
            })
        }
    }

    impl ExportService for StubService {
        fn descriptor(&self) -> &ServiceDescriptor {
            &self.descriptor
        }

        fn run(&self, request: ExportRequest) -> FramecutResult<()> {
            self.received.lock().unwrap().push(request);
            Ok(())
        }
    }

    fn registry() -> ServiceRegistry {
        ServiceRegistry::new(vec![
            StubService::boxed("Save", "save-file", &["gif", "mp4", "webm", "apng"]),
            StubService::boxed("Upload", "upload", &["gif"]),
            StubService::boxed("Clipboard", "clipboard", &["apng"]),
        ])
    }

    #[test]
    fn test_indices_for_format() {
        let registry = registry();
        assert_eq!(registry.indices_for_format("gif"), vec![0, 1]);
        assert_eq!(registry.indices_for_format("mp4"), vec![0]);
        assert!(registry.indices_for_format("avi").is_empty());
    }

    #[test]
    fn test_find_by_plugin() {
        let registry = registry();
        assert_eq!(
            registry.find_by_plugin("upload").unwrap().descriptor().title,
            "Upload"
        );
        assert!(registry.find_by_plugin("missing").is_none());
    }

    #[test]
    fn test_control_kinds() {
        let registry = registry();
        assert_eq!(
            FormatControl::from_registry("gif", &registry).kind(),
            &ExportControlKind::Dropdown {
                choices: vec![0, 1]
            }
        );
        assert_eq!(
            FormatControl::from_registry("mp4", &registry).button_target().unwrap(),
            0
        );
        // No match falls back to the first service.
        assert_eq!(
            FormatControl::from_registry("avi", &registry).button_target().unwrap(),
            0
        );
        // Sole match is used even when it is not first.
        let only_clip = ServiceRegistry::new(vec![
            StubService::boxed("Save", "save-file", &["gif"]),
            StubService::boxed("Clipboard", "clipboard", &["apng"]),
        ]);
        assert_eq!(
            FormatControl::from_registry("apng", &only_clip)
                .button_target()
                .unwrap(),
            1
        );
    }

    #[test]
    fn test_empty_registry_button_has_no_target() {
        let control = FormatControl::from_registry("gif", &ServiceRegistry::default());
        assert!(control.button_target().is_err());
    }

    #[test]
    fn test_choose_validates_and_resets() {
        let registry = registry();
        let mut control = FormatControl::from_registry("gif", &registry);
        assert!(control.choose(2).is_err());
        assert_eq!(control.choose(1).unwrap(), 1);
        assert_eq!(control.selected(), Some(1));
        control.reset_selection();
        assert_eq!(control.selected(), None);
    }

    #[test]
    fn test_dispatch_builds_request_from_snapshot() {
        let registry = registry();
        let snapshot = ExportSnapshot {
            source_path: "file:///clip.mp4".to_string(),
            output: Resolution::new(320, 240),
            fps: 15,
            window: TrimWindow {
                in_point: 1.0,
                out_point: 4.0,
            },
        };
        let service = registry.get(0).unwrap();
        let request = dispatch(service, "gif", &snapshot).unwrap();
        assert_eq!(request.plugin_name, "save-file");
        assert_eq!((request.width, request.height), (320, 240));
        assert!(request.loop_playback);
    }
}
