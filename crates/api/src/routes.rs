use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json,
    Router,
};
use investment_math::{format_currency, GameSummary};
use runtime::{GameSnapshot, SubmitOutcome};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    state::{AppState, FormUpdate, StartGameError},
    ws,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/game", get(get_game))
        .route("/game/start", post(start_game))
        .route("/game/retry", post(retry_game))
        .route("/game/form", put(update_form))
        .route("/game/submit", post(submit_turn))
        .route("/game/finalize", post(finalize_game))
        .route("/game/summary", get(game_summary))
        .route("/game/history.csv", get(history_csv))
        .route("/ws/events", get(ws::events_socket))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct StartGameRequest {
    rounds: usize,
}

#[derive(Debug, Serialize)]
struct SubmitResponse {
    outcome: SubmitOutcome,
    snapshot: GameSnapshot,
}

#[derive(Debug, Serialize)]
struct SummaryResponse {
    #[serde(flatten)]
    summary: GameSummary,
    final_balance_display: String,
    threshold_offset: Decimal,
}

fn start_error_status(err: StartGameError) -> StatusCode {
    match err {
        StartGameError::InvalidRoundCount => StatusCode::BAD_REQUEST,
    }
}

async fn get_game(State(state): State<AppState>) -> Json<GameSnapshot> {
    Json(state.snapshot().await)
}

async fn start_game(
    State(state): State<AppState>,
    Json(request): Json<StartGameRequest>,
) -> Result<Json<GameSnapshot>, StatusCode> {
    state
        .start_game(request.rounds)
        .await
        .map(Json)
        .map_err(start_error_status)
}

async fn retry_game(State(state): State<AppState>) -> Result<Json<GameSnapshot>, StatusCode> {
    state.retry().await.map(Json).map_err(start_error_status)
}

async fn update_form(
    State(state): State<AppState>,
    Json(update): Json<FormUpdate>,
) -> Result<Json<GameSnapshot>, StatusCode> {
    state
        .update_form(update)
        .await
        .map(Json)
        .map_err(|_| StatusCode::BAD_REQUEST)
}

async fn submit_turn(State(state): State<AppState>) -> Json<SubmitResponse> {
    let (outcome, snapshot) = state.submit().await;
    Json(SubmitResponse { outcome, snapshot })
}

async fn finalize_game(State(state): State<AppState>) -> Json<GameSnapshot> {
    Json(state.finalize().await)
}

async fn game_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let (summary, threshold_offset) = state.summary().await;
    Json(SummaryResponse {
        final_balance_display: format_currency(summary.final_balance),
        summary,
        threshold_offset,
    })
}

async fn history_csv(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        state.history_csv().await,
    )
}
