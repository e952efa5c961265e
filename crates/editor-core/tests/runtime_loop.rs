//! The runtime loop against a real-time simulated media element.

use std::time::Duration;

use framecut_common::config::EditorDefaults;
use framecut_editor_core::host::{JsonLinesHost, JsonLinesWriter};
use framecut_editor_core::media::SimulatedMedia;
use framecut_editor_core::services::ServiceRegistry;
use framecut_editor_core::{EditorRuntime, EditorSession};
use framecut_editor_model::event::{EditorEvent, HostCommand};
use framecut_editor_model::geometry::Resolution;

fn runtime(duration: f64) -> EditorRuntime {
    let session = EditorSession::new(
        Box::new(SimulatedMedia::new(duration, Resolution::new(320, 240))),
        Box::new(JsonLinesHost::new(JsonLinesWriter::new(Vec::<u8>::new()))),
        ServiceRegistry::default(),
        &EditorDefaults::default(),
    );
    EditorRuntime::new(session, Duration::from_millis(1))
}

async fn load(handle: &framecut_editor_core::EditorHandle) {
    handle
        .send(EditorEvent::SetSource {
            src: "file:///tmp/clip.mp4".into(),
        })
        .await
        .unwrap();
    handle.send(EditorEvent::MediaReady).await.unwrap();
}

#[tokio::test]
async fn test_playback_loops_inside_trim_window() {
    let runtime = runtime(10.0);
    let handle = runtime.handle();
    let task = tokio::spawn(runtime.run());

    load(&handle).await;
    handle
        .send(EditorEvent::TrimOutChanged { value: 0.05 })
        .await
        .unwrap();
    handle.send(EditorEvent::TrimCommitted).await.unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;
    handle.shutdown().await.unwrap();
    let session = task.await.unwrap();

    assert!(session.playback().is_playing);
    let window = session.trim_window().unwrap();
    assert!(window.contains(session.playback().position));
    // Unclamped, the transport would be at 0.3 s by now.
    assert!(session.media().current_time() < 0.25);
}

#[tokio::test]
async fn test_new_source_stops_ticking_until_ready() {
    let runtime = runtime(10.0);
    let handle = runtime.handle();
    let task = tokio::spawn(runtime.run());

    load(&handle).await;
    handle
        .send(HostCommand::VideoSrc {
            src: "file:///tmp/other.mp4".into(),
        }
        .into())
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(20)).await;
    handle.shutdown().await.unwrap();
    let session = task.await.unwrap();

    assert!(session.trim_window().is_none());
    assert_eq!(session.display().elapsed, "");
    assert_eq!(session.media().source(), "file:///tmp/other.mp4");
}

#[tokio::test]
async fn test_failed_event_keeps_loop_running() {
    let runtime = runtime(10.0);
    let handle = runtime.handle();
    let task = tokio::spawn(runtime.run());

    load(&handle).await;
    handle
        .send(HostCommand::RunPlugin {
            plugin_name: "missing".into(),
            format: "gif".into(),
        }
        .into())
        .await
        .unwrap();
    handle
        .send(EditorEvent::SetMuted { muted: true })
        .await
        .unwrap();
    handle.shutdown().await.unwrap();
    let session = task.await.unwrap();

    assert!(session.playback().is_muted);
    assert!(session.trim_window().is_some());
}

#[tokio::test]
async fn test_send_after_shutdown_fails() {
    let runtime = runtime(1.0);
    let handle = runtime.handle();
    let task = tokio::spawn(runtime.run());

    handle.shutdown().await.unwrap();
    task.await.unwrap();

    assert!(handle.send(EditorEvent::Play).await.is_err());
}

#[tokio::test]
async fn test_runtime_stops_when_handles_dropped() {
    let runtime = runtime(10.0);
    let handle = runtime.handle();
    let task = tokio::spawn(runtime.run());

    // Media is loaded so the playback clock is ticking.
    load(&handle).await;
    drop(handle);

    let session = tokio::time::timeout(Duration::from_millis(500), task)
        .await
        .expect("runtime kept running after its handles were dropped")
        .unwrap();
    assert!(session.trim_window().is_some());
}
