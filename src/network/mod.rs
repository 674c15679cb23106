//! Network layer - the countries query
//!
//! The Network actor receives fetch commands and sends back the parsed country list.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
