//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default GraphQL endpoint for the countries query
pub const DEFAULT_ENDPOINT: &str = "https://countries.trevorblades.com/";

/// The single query issued on startup
pub const COUNTRIES_QUERY: &str = "query {
  countries {
    capital
    currency
    name
    native
    emoji
    languages {
      code
      name
    }
  }
}";

/// Selectable rows-per-page values
pub const PAGE_SIZES: [usize; 6] = [5, 10, 25, 50, 100, 251];

/// Rows per page before the user picks another size
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// File name of the spreadsheet export
pub const EXPORT_FILE_NAME: &str = "Countries.xlsx";

/// MIME type of the spreadsheet export
pub const EXPORT_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Header row of the spreadsheet export
pub const EXPORT_HEADER: [&str; 5] = ["Name", "Capital", "Currency", "Languages", "Native"];

/// HTTP client timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Log file written next to the working directory
pub const LOG_FILE_NAME: &str = "countries.log";

/// Application name
pub const APP_NAME: &str = "Countries";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
