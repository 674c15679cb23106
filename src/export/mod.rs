//! Export layer - spreadsheet serialization
//!
//! The Export actor receives the filtered and sorted rows and writes them
//! as an xlsx workbook on the blocking pool.

pub mod actor;
pub mod xlsx;

pub use actor::ExportActor;
pub use xlsx::{build_rows, write_xlsx};
