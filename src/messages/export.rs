//! Export messages - communication between App and Export layers

use std::path::PathBuf;

use crate::models::Country;

/// Commands sent from App layer to Export layer
#[derive(Debug, Clone)]
pub enum ExportCommand {
    /// Write `rows` (already filtered and sorted) to `path`
    WriteSpreadsheet {
        id: u64,
        rows: Vec<Country>,
        path: PathBuf,
    },
    /// Shutdown the export actor
    Shutdown,
}

/// Responses sent from Export layer to App layer
#[derive(Debug, Clone)]
pub enum ExportResponse {
    Saved {
        id: u64,
        path: PathBuf,
        rows: usize,
    },
    Failed {
        id: u64,
        message: String,
    },
}

impl ExportResponse {
    pub fn id(&self) -> u64 {
        match self {
            ExportResponse::Saved { id, .. } => *id,
            ExportResponse::Failed { id, .. } => *id,
        }
    }
}
