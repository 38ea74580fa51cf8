#![allow(dead_code)]

use chrono::NaiveDate;
use hcc_events::auth::{AuthMode, Credential};
use hcc_events::config::PollConfig;
use hcc_events::types::Event;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use wiremock::{MockServer, ResponseTemplate};

pub const EVENTS_PATH: &str = "/api/notifications/v1.0/notifications/events";
pub const TOKEN_PATH: &str = "/auth/token";

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn static_config(server: &MockServer, token: &str) -> PollConfig {
    PollConfig::new(AuthMode::Static(Credential::new(token))).with_instance(server.uri())
}

pub fn oauth_config(server: &MockServer) -> PollConfig {
    PollConfig::new(AuthMode::ClientCredentials {
        token_url: format!("{}{TOKEN_PATH}", server.uri()),
        client_id: "svc-id".to_string(),
        client_secret: "svc-secret".to_string(),
    })
    .with_instance(server.uri())
}

pub fn page(events: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": events, "meta": { "count": 0 } }))
}

pub fn token_response(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": token,
        "expires_in": 900,
        "token_type": "Bearer"
    }))
}

pub fn drain(rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<String> {
    let mut ids = Vec::new();
    while let Ok(event) = rx.try_recv() {
        ids.push(event.id().to_string());
    }
    ids
}
