use crate::core::signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::core::SlackEvent;
use crate::web::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{error, info, instrument, warn};

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn acknowledged() -> Response {
    Json(json!({"ok": true})).into_response()
}

#[instrument(skip_all)]
pub async fn slack_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let payload = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            warn!("Rejecting event payload that is not a JSON object");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "invalid payload"})),
            )
                .into_response();
        }
    };

    // URL verification is answered before the signature check.
    if let Some(challenge) = payload.get("challenge") {
        info!("Responding to Slack URL verification challenge");
        return Json(json!({"challenge": challenge})).into_response();
    }

    let now = Utc::now().timestamp();
    if let Err(e) = state.verifier.verify(
        header_str(&headers, TIMESTAMP_HEADER),
        header_str(&headers, SIGNATURE_HEADER),
        &body,
        now,
    ) {
        error!("Signature verification failed: {}", e);
        error!("Headers: {:?}", headers);
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": "invalid signature"})),
        )
            .into_response();
    }

    let event = match payload.get("event") {
        Some(raw) => serde_json::from_value::<SlackEvent>(raw.clone()).unwrap_or_else(|e| {
            warn!("Unreadable event object: {}", e);
            SlackEvent::default()
        }),
        None => SlackEvent::default(),
    };

    if event.is_bot_message() {
        return acknowledged();
    }

    if event.is_app_mention() {
        state.mentions.handle(&event, Utc::now()).await;
    }

    acknowledged()
}
