//! Schedules HTTP client.
//!
//! Async wrapper over the journey-planning API: the full station
//! directory and rail segment search. Authentication is an `apikey`
//! query parameter attached to every request.

use tracing::debug;

use crate::domain::StationCode;

use super::error::RaspError;
use super::types::{AllStationsResponse, SearchResponse};

/// Default base URL for the schedules API.
const DEFAULT_BASE_URL: &str = "https://api.rasp.yandex.net/v3.0";

/// Fixed response language for directory and search requests.
const LANG: &str = "ru_RU";

/// Result cap for segment search. The upstream pages past this, but one
/// large page covers a day of rail traffic between any two stations.
const SEARCH_LIMIT: u32 = 1000;

/// Configuration for the schedules client.
#[derive(Debug, Clone)]
pub struct RaspConfig {
    /// API key sent as the `apikey` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RaspConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the schedules API.
#[derive(Debug, Clone)]
pub struct RaspClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RaspClient {
    /// Create a new schedules client with the given configuration.
    pub fn new(config: RaspConfig) -> Result<Self, RaspError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Fetch the full station directory.
    ///
    /// This is a large document (several megabytes). Callers are expected
    /// to go through `DirectoryCache` rather than fetching repeatedly.
    pub async fn stations_list(&self) -> Result<AllStationsResponse, RaspError> {
        let url = format!("{}/stations_list/", self.base_url);
        debug!(%url, "fetching station directory");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("format", "json"),
                ("lang", LANG),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RaspError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RaspError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| RaspError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// Search rail segments between two station codes.
    ///
    /// `transfers` maps the tri-state "transfers wanted" filter onto the
    /// request: `None` leaves the parameter off entirely.
    pub async fn search(
        &self,
        from: &StationCode,
        to: &StationCode,
        transfers: Option<bool>,
    ) -> Result<SearchResponse, RaspError> {
        let url = format!("{}/search/", self.base_url);
        debug!(%url, from = %from, to = %to, "searching segments");

        let limit = SEARCH_LIMIT.to_string();
        let mut query: Vec<(&str, &str)> = vec![
            ("apikey", self.api_key.as_str()),
            ("from", from.as_str()),
            ("to", to.as_str()),
            ("format", "json"),
            ("lang", LANG),
            ("transport_types", "train"),
            ("limit", limit.as_str()),
        ];
        if let Some(transfers) = transfers {
            query.push(("transfers", if transfers { "true" } else { "false" }));
        }

        let response = self.http.get(&url).query(&query).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RaspError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RaspError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| RaspError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = RaspConfig::new("test-api-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn config_builder() {
        let config = RaspConfig::new("test-api-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_creation() {
        let client = RaspClient::new(RaspConfig::new("test-api-key"));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn stations_list_decodes_directory() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/stations_list/")
            .match_query(mockito::Matcher::UrlEncoded(
                "apikey".into(),
                "test-key".into(),
            ))
            .with_header("content-type", "application/json")
            .with_body(r#"{"countries": [{"title": "Россия"}]}"#)
            .create_async()
            .await;

        let client =
            RaspClient::new(RaspConfig::new("test-key").with_base_url(server.url())).unwrap();
        let directory = client.stations_list().await.unwrap();

        mock.assert_async().await;
        assert_eq!(directory.countries.len(), 1);
        assert_eq!(directory.countries[0].title.as_deref(), Some("Россия"));
    }

    #[tokio::test]
    async fn search_passes_transfers_only_when_set() {
        let mut server = mockito::Server::new_async().await;
        let with_transfers = server
            .mock("GET", "/search/")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("from".into(), "s100".into()),
                mockito::Matcher::UrlEncoded("to".into(), "s200".into()),
                mockito::Matcher::UrlEncoded("transport_types".into(), "train".into()),
                mockito::Matcher::UrlEncoded("transfers".into(), "true".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(r#"{"segments": []}"#)
            .create_async()
            .await;

        let client =
            RaspClient::new(RaspConfig::new("test-key").with_base_url(server.url())).unwrap();
        let response = client
            .search(&code("s100"), &code("s200"), Some(true))
            .await
            .unwrap();

        with_transfers.assert_async().await;
        assert!(response.segments.is_empty());
    }

    #[tokio::test]
    async fn unauthorized_status_maps_to_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/stations_list/")
            .match_query(mockito::Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let client =
            RaspClient::new(RaspConfig::new("bad-key").with_base_url(server.url())).unwrap();
        let err = client.stations_list().await.unwrap_err();
        assert!(matches!(err, RaspError::Unauthorized));
    }

    #[tokio::test]
    async fn server_error_maps_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search/")
            .match_query(mockito::Matcher::Any)
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let client =
            RaspClient::new(RaspConfig::new("test-key").with_base_url(server.url())).unwrap();
        let err = client
            .search(&code("s100"), &code("s200"), None)
            .await
            .unwrap_err();

        match &err {
            RaspError::Api { status, message } => {
                assert_eq!(*status, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("expected Api error, got {other}"),
        }
        assert!(!err.is_connectivity());
    }

    #[tokio::test]
    async fn garbage_body_maps_to_json_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/stations_list/")
            .match_query(mockito::Matcher::Any)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client =
            RaspClient::new(RaspConfig::new("test-key").with_base_url(server.url())).unwrap();
        let err = client.stations_list().await.unwrap_err();
        assert!(matches!(err, RaspError::Json { .. }));
    }
}
