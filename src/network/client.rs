//! GraphQL client - executes the countries query and decodes the response

use std::time::{Duration, Instant};

use serde::Deserialize;
use serde_json::json;

use crate::constants::COUNTRIES_QUERY;
use crate::messages::NetworkResponse;
use crate::models::Country;

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<CountriesData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct CountriesData {
    #[serde(default)]
    countries: Vec<Country>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Decode a GraphQL response body.
///
/// Any `errors` entry wins over partial data; their messages are joined
/// and returned as-is.
pub fn parse_countries_response(status: u16, body: &str) -> Result<Vec<Country>, String> {
    let parsed: GraphQlResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) if !(200..300).contains(&status) => return Err(format!("HTTP {}: {}", status, e)),
        Err(e) => return Err(format!("Invalid response: {}", e)),
    };

    if !parsed.errors.is_empty() {
        let messages: Vec<&str> = parsed.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(messages.join("; "));
    }

    if !(200..300).contains(&status) {
        return Err(format!("HTTP {}", status));
    }

    parsed
        .data
        .map(|d| d.countries)
        .ok_or_else(|| String::from("Response contained no data"))
}

/// Run the countries query and turn the outcome into a NetworkResponse
pub async fn fetch_countries(client: &reqwest::Client, endpoint: &str, request_id: u64) -> NetworkResponse {
    let start = Instant::now();
    let body = json!({ "query": COUNTRIES_QUERY });

    let result = client.post(endpoint).json(&body).send().await;

    let outcome = match result {
        Ok(resp) => {
            let status = resp.status().as_u16();
            match resp.text().await {
                Ok(text) => parse_countries_response(status, &text),
                Err(e) => Err(format!("Error reading body: {}", e)),
            }
        }
        Err(e) => Err(describe_error(&e)),
    };
    let elapsed = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(countries) => NetworkResponse::Countries {
            id: request_id,
            countries,
            time_ms: elapsed,
        },
        Err(message) => NetworkResponse::Error {
            id: request_id,
            message,
            time_ms: elapsed,
        },
    }
}

fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timed out".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// Create an HTTP client with the configured timeout
pub fn create_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_countries() {
        let body = r#"{
            "data": {
                "countries": [
                    {
                        "name": "Chad",
                        "native": "Tchad",
                        "capital": "N'Djamena",
                        "currency": "XAF",
                        "emoji": "🇹🇩",
                        "languages": [
                            {"code": "fr", "name": "French"},
                            {"code": "ar", "name": "Arabic"}
                        ]
                    },
                    {
                        "name": "Antarctica",
                        "native": "Antarctica",
                        "capital": null,
                        "currency": null,
                        "emoji": "🇦🇶",
                        "languages": []
                    }
                ]
            }
        }"#;

        let countries = parse_countries_response(200, body).unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0].native, "Tchad");
        assert_eq!(countries[0].language_names(), "French, Arabic");
        assert_eq!(countries[1].capital, None);
        assert_eq!(countries[1].currency, None);
    }

    #[test]
    fn test_graphql_errors_are_verbatim() {
        let body = r#"{"errors": [{"message": "Cannot query field \"foo\""}, {"message": "second"}]}"#;
        let err = parse_countries_response(200, body).unwrap_err();
        assert_eq!(err, "Cannot query field \"foo\"; second");
    }

    #[test]
    fn test_http_error_without_body() {
        let err = parse_countries_response(502, "Bad Gateway").unwrap_err();
        assert!(err.starts_with("HTTP 502"));
    }

    #[test]
    fn test_http_error_with_graphql_errors() {
        let body = r#"{"errors": [{"message": "Syntax Error"}]}"#;
        assert_eq!(parse_countries_response(400, body).unwrap_err(), "Syntax Error");
    }

    #[test]
    fn test_missing_data() {
        let err = parse_countries_response(200, r#"{"data": null}"#).unwrap_err();
        assert_eq!(err, "Response contained no data");
    }
}
