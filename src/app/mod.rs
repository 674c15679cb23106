//! App layer - central state management and command processing
//!
//! The App actor receives UI events, query results and export results,
//! updates state, and emits network commands, export commands and render state.

pub mod state;
pub mod actor;
pub mod commands;

pub use state::AppState;
pub use actor::AppActor;
