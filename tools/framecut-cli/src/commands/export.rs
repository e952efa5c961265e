//! Build one export request through an editor session and print it.

use framecut_common::config::AppConfig;
use framecut_editor_core::host::{JsonLinesHost, JsonLinesWriter};
use framecut_editor_core::media::SimulatedMedia;
use framecut_editor_core::services::ExportControlKind;
use framecut_editor_core::{EditorSession, ServiceTarget};
use framecut_editor_model::event::EditorEvent;
use framecut_editor_model::export::FrameRateChoice;
use framecut_editor_model::geometry::Resolution;

use super::print_registry;

/// Options for a one-shot export.
#[derive(Debug, Clone)]
pub struct ExportArgs {
    pub resolution: Resolution,
    pub duration: f64,
    pub in_point: Option<f64>,
    pub out_point: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps_max: bool,
    pub format: String,
    pub plugin: Option<String>,
    pub src: String,
}

pub fn run(args: ExportArgs, config: &AppConfig) -> anyhow::Result<()> {
    let writer = JsonLinesWriter::new(std::io::stdout());
    let mut session = EditorSession::new(
        Box::new(SimulatedMedia::new(args.duration, args.resolution)),
        Box::new(JsonLinesHost::new(writer.clone())),
        print_registry(&config.services, &writer),
        &config.editor,
    );

    let mut events = vec![
        EditorEvent::SetSource { src: args.src },
        EditorEvent::MediaReady,
    ];
    if let Some(value) = args.in_point {
        events.push(EditorEvent::TrimInChanged { value });
    }
    if let Some(value) = args.out_point {
        events.push(EditorEvent::TrimOutChanged { value });
    }
    if let Some(w) = args.width {
        events.push(EditorEvent::WidthEdited { raw: w.to_string() });
    }
    if let Some(h) = args.height {
        events.push(EditorEvent::HeightEdited { raw: h.to_string() });
    }
    if args.fps_max {
        events.push(EditorEvent::SelectFrameRate {
            choice: FrameRateChoice::Max,
        });
    }
    for event in events {
        session.handle(event)?;
    }

    for field in session.take_alerts() {
        tracing::warn!(?field, "Dimension rejected; kept the last valid value");
    }

    let target = match args.plugin {
        Some(name) => ServiceTarget::PluginName(name),
        None => default_target(&session, &args.format)?,
    };
    let request = session.export(target, &args.format)?;

    tracing::info!(
        plugin = %request.plugin_name,
        output = %Resolution::new(request.width, request.height),
        "Export request built"
    );
    Ok(())
}

/// The service a format's control would use without user choice: the
/// button's service, or the first dropdown entry.
fn default_target(session: &EditorSession, format: &str) -> anyhow::Result<ServiceTarget> {
    let control = session
        .export_controls()
        .iter()
        .find(|c| c.format() == format)
        .ok_or_else(|| anyhow::anyhow!("Format '{format}' is not configured"))?;

    let index = match control.kind() {
        ExportControlKind::Dropdown { choices } => choices.first().copied(),
        ExportControlKind::Button { service } => *service,
    };
    index
        .map(ServiceTarget::Index)
        .ok_or_else(|| anyhow::anyhow!("No export service available for '{format}'"))
}
