use std::{path::PathBuf, sync::Arc};

use api::AppState;
use axum::{routing::get, Router};
use game_model::GameConfig;
use runtime::{EventSource, EventSourceError, GameEngine, HttpEventSource, StaticEventSource};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("failed to read events file {path}: {source}")]
    EventsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    EventSource(#[from] EventSourceError),
}

pub async fn build_state(config: &Config) -> Result<AppState, WiringError> {
    let source: Arc<dyn EventSource> = match &config.events_file {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| WiringError::EventsFile {
                    path: path.clone(),
                    source,
                })?;
            let source = StaticEventSource::from_json(&raw)?;
            tracing::info!(path = %path.display(), events = source.len(), "serving events from file");
            Arc::new(source)
        }
        None => {
            let source = HttpEventSource::new(config.events_url.clone(), config.fetch_timeout)?;
            tracing::info!(url = %source.events_url(), "fetching events over http");
            Arc::new(source)
        }
    };

    let engine = GameEngine::new(GameConfig {
        default_rounds: config.default_rounds,
        ..GameConfig::default()
    });
    let state = AppState::with_engine(source, engine);

    Ok(match &config.history_output {
        Some(path) => state.with_history_output(path.clone()),
        None => state,
    })
}

pub fn build_app(state: AppState) -> Router {
    api::app(state).route("/health", get(healthcheck))
}

async fn healthcheck() -> &'static str {
    "ok"
}
