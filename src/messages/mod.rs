//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, Network and Export layers.

pub mod ui_events;
pub mod network;
pub mod export;
pub mod render;

pub use ui_events::UiEvent;
pub use network::{NetworkCommand, NetworkResponse};
pub use export::{ExportCommand, ExportResponse};
pub use render::RenderState;
