pub mod routes;
pub mod state;
pub mod ws;

use axum::Router;

pub use state::{AppState, FormUpdate, StartGameError};

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use futures_util::StreamExt;
    use game_model::MarketEvent;
    use runtime::StaticEventSource;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use tokio_tungstenite::tungstenite::Message;
    use tower::ServiceExt;

    use crate::{app, AppState};

    fn test_app() -> Router {
        let events = vec![
            MarketEvent::new("Boom", dec!(0.1), dec!(0.2), dec!(0.3), dec!(0.4)),
            MarketEvent::new("Bust", dec!(-0.1), dec!(-0.2), dec!(-0.3), dec!(-0.4)),
        ];
        app(AppState::new(Arc::new(StaticEventSource::new(events))))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn fresh_game_is_not_started() {
        let app = test_app();

        let (status, body) = send(&app, Request::get("/game").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "not_started");
        assert_eq!(body["balance"].as_f64(), Some(10000.0));
    }

    #[tokio::test]
    async fn start_with_zero_rounds_is_rejected() {
        let app = test_app();

        let (status, _) = send(&app, json_request("POST", "/game/start", json!({ "rounds": 0 }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn play_through_http_surface() {
        let app = test_app();

        let (status, body) =
            send(&app, json_request("POST", "/game/start", json!({ "rounds": 2 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "in_progress");
        assert_eq!(body["current_event"]["description"], "Boom");

        let form = json!({
            "investment_amount": "1000",
            "selected_interval": "3 months",
            "selected_type": "Invest",
        });
        let (status, body) = send(&app, json_request("PUT", "/game/form", form)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["can_submit"], true);

        let (_, body) = send(&app, Request::post("/game/submit").body(Body::empty()).unwrap()).await;
        assert_eq!(body["outcome"], "accepted");
        assert_eq!(body["snapshot"]["balance"].as_f64(), Some(10100.0));
        assert_eq!(body["snapshot"]["current_quarter"], 2);

        let (_, body) = send(&app, Request::post("/game/submit").body(Body::empty()).unwrap()).await;
        assert_eq!(body["outcome"], "rejected_incomplete");

        let form = json!({ "selected_type": "Skip" });
        send(&app, json_request("PUT", "/game/form", form)).await;
        let (_, body) = send(&app, Request::post("/game/submit").body(Body::empty()).unwrap()).await;
        assert_eq!(body["outcome"], "accepted");
        assert_eq!(body["snapshot"]["phase"], "game_over");

        let (_, body) = send(&app, Request::post("/game/finalize").body(Body::empty()).unwrap()).await;
        assert_eq!(body["phase"], "finalized");

        let (_, body) = send(&app, Request::get("/game/summary").body(Body::empty()).unwrap()).await;
        assert_eq!(body["total_decisions"], 2);
        assert_eq!(body["final_balance_display"], "$10100.00");
    }

    #[tokio::test]
    async fn unknown_investment_type_is_a_bad_request() {
        let app = test_app();

        let (status, _) = send(
            &app,
            json_request("PUT", "/game/form", json!({ "selected_type": "Hold" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn history_csv_lists_recorded_turns() {
        let app = test_app();
        send(&app, json_request("POST", "/game/start", json!({ "rounds": 2 }))).await;

        let response = app
            .clone()
            .oneshot(Request::get("/game/history.csv").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"turn,balance\nY1 Q1,10000.00\n");
    }

    #[tokio::test]
    async fn websocket_streams_greeting_then_journal() {
        let state = AppState::new(Arc::new(StaticEventSource::new(vec![MarketEvent::new(
            "Boom",
            dec!(0.1),
            dec!(0),
            dec!(0),
            dec!(0),
        )])));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server_state = state.clone();
        tokio::spawn(async move {
            axum::serve(listener, app(server_state)).await.unwrap();
        });

        let (mut socket, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws/events"))
            .await
            .unwrap();

        let greeting = next_json(&mut socket).await;
        assert_eq!(greeting["event_type"], "connected");
        assert_eq!(greeting["phase"], "not_started");

        state.start_game(1).await.unwrap();
        assert_eq!(next_json(&mut socket).await["event_type"], "start_requested");
        assert_eq!(next_json(&mut socket).await["event_type"], "game_started");
    }

    async fn next_json<S>(socket: &mut S) -> Value
    where
        S: futures_util::Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>>
            + Unpin,
    {
        let message = tokio::time::timeout(std::time::Duration::from_secs(5), socket.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        serde_json::from_str(message.to_text().unwrap()).unwrap()
    }
}
