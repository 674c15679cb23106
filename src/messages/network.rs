//! Network messages - communication between App and Network layers

use crate::models::Country;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Run the countries query against `endpoint`
    FetchCountries {
        id: u64,
        endpoint: String,
    },
    /// Abandon a pending fetch; its result is never delivered
    CancelFetch(u64),
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// The query resolved with a country list
    Countries {
        id: u64,
        countries: Vec<Country>,
        time_ms: u64,
    },
    /// Transport or GraphQL failure, message shown verbatim
    Error {
        id: u64,
        message: String,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Countries { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
        }
    }
}
