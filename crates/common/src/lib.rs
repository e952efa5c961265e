//! Framecut Common Utilities
//!
//! Shared infrastructure for all Framecut crates:
//! - Error types and result aliases
//! - Transport clock and media-time formatting
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
