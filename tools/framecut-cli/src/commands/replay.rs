//! Replay a scripted editing session.
//!
//! Each script line is a JSON object holding either an editor event
//! (tagged by `type`) or a host command (tagged by `channel`), plus an
//! optional `delay_ms` to wait before sending it. Blank lines and lines
//! starting with `#` are skipped.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde_json::{json, Value};

use framecut_common::config::AppConfig;
use framecut_common::error::FramecutError;
use framecut_editor_core::host::{JsonLinesHost, JsonLinesWriter};
use framecut_editor_core::media::SimulatedMedia;
use framecut_editor_core::{EditorRuntime, EditorSession};
use framecut_editor_model::event::{parse_input, EditorEvent};
use framecut_editor_model::geometry::Resolution;

use super::print_registry;

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    pub delay: Duration,
    pub event: EditorEvent,
}

/// Parse script content into steps.
pub fn parse_script(content: &str) -> anyhow::Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step =
            parse_line(line).with_context(|| format!("Invalid script line {}", number + 1))?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_line(line: &str) -> anyhow::Result<ScriptStep> {
    let mut value: Value = serde_json::from_str(line)?;
    let object = value
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("expected a JSON object"))?;

    let delay_ms = match object.remove("delay_ms") {
        Some(v) => v
            .as_u64()
            .ok_or_else(|| anyhow::anyhow!("delay_ms must be a non-negative integer"))?,
        None => 0,
    };

    Ok(ScriptStep {
        delay: Duration::from_millis(delay_ms),
        event: parse_input(value)?,
    })
}

pub async fn run(
    script: PathBuf,
    duration: f64,
    resolution: Resolution,
    src: String,
    config: &AppConfig,
) -> anyhow::Result<()> {
    if !script.exists() {
        return Err(FramecutError::FileNotFound { path: script }.into());
    }
    let content = std::fs::read_to_string(&script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let steps = parse_script(&content)?;

    tracing::info!(
        script = %script.display(),
        steps = steps.len(),
        duration,
        resolution = %resolution,
        "Replaying editor script"
    );

    let writer = JsonLinesWriter::new(std::io::stdout());
    let session = EditorSession::new(
        Box::new(SimulatedMedia::new(duration, resolution)),
        Box::new(JsonLinesHost::new(writer.clone())),
        print_registry(&config.services, &writer),
        &config.editor,
    );
    let runtime = EditorRuntime::new(
        session,
        Duration::from_millis(config.editor.tick_interval_ms),
    );
    let handle = runtime.handle();
    let task = tokio::spawn(runtime.run());

    handle.send(EditorEvent::SetSource { src }).await?;
    handle.send(EditorEvent::MediaReady).await?;

    for step in steps {
        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }
        handle.send(step.event).await?;
    }

    handle.shutdown().await?;
    let session = task.await.context("Editor runtime panicked")?;

    let window = session.trim_window();
    writer.write(&json!({
        "final": {
            "playback": session.playback(),
            "trim": window,
            "output": session.geometry().map(|g| g.output().to_string()),
            "fps": session.frame_rate().fps(),
            "fullscreen": session.is_fullscreen(),
        }
    }))?;

    tracing::info!(lines = writer.lines_written(), "Replay finished");
    Ok(())
}
