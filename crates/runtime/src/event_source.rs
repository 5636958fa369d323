use std::time::Duration;

use async_trait::async_trait;
use game_model::MarketEvent;
use reqwest::{header, Client};
use thiserror::Error;

pub const EVENTS_PATH: &str = "/api/xEvents";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventSourceError {
    #[error("round count must be positive")]
    InvalidRoundCount,
    #[error("Server responded with status: {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
    #[error("invalid event payload: {0}")]
    Decode(String),
    #[error("{0}")]
    Unavailable(String),
}

/// Supplies the ordered events for one game.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_events(&self, rounds: usize) -> Result<Vec<MarketEvent>, EventSourceError>;
}

/// Reads events from `GET {base_url}/api/xEvents?x={rounds}`.
#[derive(Debug, Clone)]
pub struct HttpEventSource {
    client: Client,
    base_url: String,
}

impl HttpEventSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, EventSourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| EventSourceError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn events_url(&self) -> String {
        format!("{}{EVENTS_PATH}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EventSource for HttpEventSource {
    async fn fetch_events(&self, rounds: usize) -> Result<Vec<MarketEvent>, EventSourceError> {
        if rounds == 0 {
            return Err(EventSourceError::InvalidRoundCount);
        }

        let url = self.events_url();
        tracing::debug!(%url, rounds, "fetching events");

        let response = self
            .client
            .get(&url)
            .query(&[("x", rounds)])
            .send()
            .await
            .map_err(|err| EventSourceError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "event source returned an error");
            return Err(EventSourceError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        if !content_type.contains("application/json") {
            tracing::warn!(%content_type, "expected application/json from event source");
        }

        let body = response
            .text()
            .await
            .map_err(|err| EventSourceError::Transport(err.to_string()))?;

        serde_json::from_str(&body).map_err(|err| EventSourceError::Decode(err.to_string()))
    }
}

/// Serves events from memory, truncated to the requested round count.
#[derive(Debug, Clone, Default)]
pub struct StaticEventSource {
    events: Vec<MarketEvent>,
    failure: Option<String>,
}

impl StaticEventSource {
    pub fn new(events: Vec<MarketEvent>) -> Self {
        Self {
            events,
            failure: None,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, EventSourceError> {
        let events =
            serde_json::from_str(raw).map_err(|err| EventSourceError::Decode(err.to_string()))?;
        Ok(Self::new(events))
    }

    /// A source whose every fetch fails with `message`.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            events: Vec::new(),
            failure: Some(message.into()),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[async_trait]
impl EventSource for StaticEventSource {
    async fn fetch_events(&self, rounds: usize) -> Result<Vec<MarketEvent>, EventSourceError> {
        if let Some(message) = &self.failure {
            return Err(EventSourceError::Unavailable(message.clone()));
        }
        if rounds == 0 {
            return Err(EventSourceError::InvalidRoundCount);
        }

        Ok(self.events.iter().take(rounds).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use game_model::MarketEvent;
    use httpmock::prelude::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::{EventSource, EventSourceError, HttpEventSource, StaticEventSource};

    fn source_for(server: &MockServer) -> HttpEventSource {
        HttpEventSource::new(server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn http_source_requests_round_count_and_decodes_events() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/xEvents").query_param("x", "2");
                then.status(200).json_body(json!([
                    {
                        "event_type": "tech",
                        "description": "Chip shortage",
                        "percent_3months": 0.1,
                        "percent_6months": -0.2,
                        "percent_1year": 0.05,
                        "percent_5years": 0.9
                    },
                    {
                        "event_type": "energy",
                        "description": "Pipeline opens",
                        "percent_3months": -0.01,
                        "percent_6months": 0.02,
                        "percent_1year": 0.03,
                        "percent_5years": 0.04
                    }
                ]));
            })
            .await;

        let events = source_for(&server).fetch_events(2).await.unwrap();

        mock.assert_async().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].description, "Chip shortage");
        assert_eq!(events[0].percent_6months, dec!(-0.2));
        assert_eq!(events[1].event_type, "energy");
    }

    #[tokio::test]
    async fn http_source_reports_status_failures() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/xEvents");
                then.status(503).body("maintenance");
            })
            .await;

        let err = source_for(&server).fetch_events(3).await.unwrap_err();

        assert_eq!(err, EventSourceError::Status(503));
        assert_eq!(err.to_string(), "Server responded with status: 503");
    }

    #[tokio::test]
    async fn http_source_reports_malformed_payloads() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/xEvents");
                then.status(200).body("not json");
            })
            .await;

        let err = source_for(&server).fetch_events(3).await.unwrap_err();

        assert!(matches!(err, EventSourceError::Decode(_)));
    }

    #[test]
    fn events_url_tolerates_trailing_slash() {
        let source = HttpEventSource::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();

        assert_eq!(source.events_url(), "http://localhost:3000/api/xEvents");
    }

    #[tokio::test]
    async fn static_source_truncates_to_requested_rounds() {
        let events = (0..4)
            .map(|i| MarketEvent::new(format!("event {i}"), dec!(0), dec!(0), dec!(0), dec!(0)))
            .collect();
        let source = StaticEventSource::new(events);

        assert_eq!(source.fetch_events(2).await.unwrap().len(), 2);
        assert_eq!(source.fetch_events(10).await.unwrap().len(), 4);
        assert_eq!(
            source.fetch_events(0).await.unwrap_err(),
            EventSourceError::InvalidRoundCount
        );
    }

    #[tokio::test]
    async fn unavailable_source_always_fails_with_its_message() {
        let source = StaticEventSource::unavailable("offline");

        let err = source.fetch_events(5).await.unwrap_err();

        assert_eq!(err.to_string(), "offline");
    }
}
