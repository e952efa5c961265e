//! Framecut Editor Model
//!
//! Defines the core data contracts for the clip editor:
//! - **Trim:** The `[in, out]` window and the controller that keeps it valid
//! - **Geometry:** Base resolution, output size, and the aspect-ratio solver
//! - **Field:** Sanitizing free-text numeric input
//! - **Playback:** Transport state and the trim-window clamp
//! - **Export:** Frame-rate selection and the outbound export request
//! - **Event:** Editor events, inbound host commands, outbound host messages
//!
//! Everything here is pure data plus deterministic operations; the editor
//! core wires it to the media element, host transport, and export services.

pub mod event;
pub mod export;
pub mod field;
pub mod geometry;
pub mod playback;
pub mod trim;

pub use event::*;
pub use export::*;
pub use field::*;
pub use geometry::*;
pub use playback::*;
pub use trim::*;
