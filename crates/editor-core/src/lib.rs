//! Framecut Editor Core
//!
//! Runs one clip-editing session: trim boundaries, output geometry, frame
//! rate, the preview transport, and export dispatch. The core owns all
//! editor state and talks to three collaborators through traits:
//!
//! - **MediaElement:** the preview player (duration, position, play/pause)
//! - **HostTransport:** fire-and-forget notifications to the host process
//! - **ExportService:** backends that turn an export request into a file
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                EditorRuntime                  │
//! │  events ─┐                  ┌─ PlaybackClock  │
//! │          ▼                  ▼   (tick task)   │
//! │  ┌─────────────────────────────────────────┐  │
//! │  │             EditorSession               │  │
//! │  │  trim · geometry · fields · playback    │  │
//! │  └──────┬──────────────┬──────────────┬────┘  │
//! │         ▼              ▼              ▼       │
//! │   MediaElement   HostTransport  ExportService │
//! └──────────────────────────────────────────────┘
//! ```

pub mod host;
pub mod media;
pub mod runtime;
pub mod services;
pub mod session;

pub use runtime::*;
pub use session::*;
