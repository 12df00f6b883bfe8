use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use utoipa::OpenApi;

use super::{
    dto::{ErrorResponse, IngestResponse, SensorReadingDto},
    errors::AppError,
    AppState,
};
use crate::sensors::IngestRequest;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Store one reading sent by a sensor node.
///
/// `airQuality` is copied from `gasAnalog`; `id` and `timestamp` are
/// assigned by the store.
#[utoipa::path(
    post,
    path = "/api/sensor",
    request_body = IngestRequest,
    responses(
        (status = 201, description = "Reading stored", body = IngestResponse),
        (status = 400, description = "Missing field or malformed body", body = ErrorResponse),
        (status = 500, description = "Store unavailable or write failed", body = ErrorResponse),
    ),
    tag = "sensors"
)]
pub async fn create_reading(
    State(state): State<AppState>,
    payload: Result<Json<IngestRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IngestResponse>), AppError> {
    let Json(request) = payload?;
    let stored = state.sensors.ingest(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            message: "sensor reading stored".to_owned(),
            data: stored.into(),
        }),
    ))
}

/// Fetch the most recent readings, newest first.
#[utoipa::path(
    get,
    path = "/api/sensor",
    responses(
        (status = 200, description = "Recent readings, newest first", body = Vec<SensorReadingDto>),
        (status = 500, description = "Store unavailable or read failed", body = ErrorResponse),
    ),
    tag = "sensors"
)]
pub async fn list_recent_readings(
    State(state): State<AppState>,
) -> Result<Json<Vec<SensorReadingDto>>, AppError> {
    let rows = state.sensors.recent(state.recent_limit).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Plain-text liveness message. Does not touch the store.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = String),
    ),
    tag = "system"
)]
pub async fn health() -> &'static str {
    "Sensor API is running"
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(create_reading, list_recent_readings, health),
    components(schemas(IngestRequest, IngestResponse, SensorReadingDto, ErrorResponse)),
    tags(
        (name = "sensors", description = "Sensor ingestion and query endpoints"),
        (name = "system",  description = "System endpoints"),
    ),
    info(
        title = "Sensor Dashboard API",
        version = "0.1.0",
        description = "Ingestion and query API for temperature, humidity and gas sensor readings"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use axum::{
        body::Bytes,
        http::{Method, StatusCode},
    };
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::{
        api::{router, AppState},
        sensors::SensorService,
        store::{MemoryStore, ReadingStore},
    };

    fn test_server(store: ReadingStore) -> TestServer {
        let state = AppState::new(SensorService::new(store), 50);
        TestServer::new(router(state)).unwrap()
    }

    fn memory_server() -> (TestServer, MemoryStore) {
        let memory = MemoryStore::new();
        (test_server(ReadingStore::Memory(memory.clone())), memory)
    }

    fn valid_payload() -> Value {
        json!({
            "temperature": 27.5,
            "humidity": 65.2,
            "gasAnalog": 120,
            "gasDigital": 1,
            "detected": true
        })
    }

    // -----------------------------------------------------------------------
    // POST /api/sensor
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn create_returns_created_with_derived_air_quality() {
        let (server, memory) = memory_server();
        let resp = server.post("/api/sensor").json(&valid_payload()).await;
        resp.assert_status(StatusCode::CREATED);

        let body: Value = resp.json();
        assert!(body["message"].is_string());
        assert_eq!(body["data"]["airQuality"], 120.0);
        assert_eq!(body["data"]["gasAnalog"], 120.0);
        assert_eq!(body["data"]["detected"], true);
        assert!(body["data"]["id"].is_string());
        assert!(body["data"]["timestamp"].is_string());
        assert_eq!(memory.len().await, 1);
    }

    #[tokio::test]
    async fn create_accepts_zero_and_false() {
        let (server, memory) = memory_server();
        let resp = server
            .post("/api/sensor")
            .json(&json!({
                "temperature": 0,
                "humidity": 0,
                "gasAnalog": 0,
                "gasDigital": 0,
                "detected": false
            }))
            .await;
        resp.assert_status(StatusCode::CREATED);

        let body: Value = resp.json();
        assert_eq!(body["data"]["airQuality"], 0.0);
        assert_eq!(body["data"]["detected"], false);
        assert_eq!(memory.len().await, 1);
    }

    #[tokio::test]
    async fn create_ignores_client_air_quality_and_timestamp() {
        let (server, memory) = memory_server();
        let mut body = valid_payload();
        body["airQuality"] = json!(999);
        body["timestamp"] = json!("2000-01-01T00:00:00Z");
        body["id"] = json!("00000000-0000-0000-0000-000000000000");

        let resp = server.post("/api/sensor").json(&body).await;
        resp.assert_status(StatusCode::CREATED);

        let body: Value = resp.json();
        assert_eq!(body["data"]["airQuality"], 120.0);
        assert_eq!(body["data"]["airQuality"], body["data"]["gasAnalog"]);
        assert!(!body["data"]["timestamp"].as_str().unwrap().starts_with("2000-01-01"));
        assert_ne!(body["data"]["id"], "00000000-0000-0000-0000-000000000000");

        let stored = memory.recent(1).await;
        assert_eq!(stored[0].air_quality, 120.0);
        assert!(stored[0].timestamp.timestamp() > 946_684_800);
    }

    #[tokio::test]
    async fn create_missing_detected_returns_bad_request() {
        let (server, memory) = memory_server();
        let resp = server
            .post("/api/sensor")
            .json(&json!({
                "temperature": 27.5,
                "humidity": 65.2,
                "gasAnalog": 120,
                "gasDigital": 1
            }))
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = resp.json();
        assert!(body["error"].as_str().unwrap().contains("detected"));
        assert!(memory.is_empty().await);
    }

    #[tokio::test]
    async fn create_missing_any_field_stores_nothing() {
        let (server, memory) = memory_server();
        for field in ["temperature", "humidity", "gasAnalog", "gasDigital", "detected"] {
            let mut body = valid_payload();
            body.as_object_mut().unwrap().remove(field);

            let resp = server.post("/api/sensor").json(&body).await;
            resp.assert_status(StatusCode::BAD_REQUEST);
        }
        assert!(memory.is_empty().await);
    }

    #[tokio::test]
    async fn create_wrong_type_returns_bad_request() {
        let (server, memory) = memory_server();
        let mut body = valid_payload();
        body["detected"] = json!("yes");

        let resp = server.post("/api/sensor").json(&body).await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = resp.json();
        assert!(body["error"].is_string());
        assert!(memory.is_empty().await);
    }

    #[tokio::test]
    async fn create_malformed_json_returns_bad_request() {
        let (server, _) = memory_server();
        let resp = server
            .post("/api/sensor")
            .bytes(Bytes::from_static(b"{not json"))
            .content_type("application/json")
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_without_json_content_type_returns_bad_request() {
        let (server, _) = memory_server();
        let resp = server.post("/api/sensor").text("temperature=27.5").await;
        resp.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_with_unavailable_store_returns_server_error() {
        let server = test_server(ReadingStore::unavailable());
        let resp = server.post("/api/sensor").json(&valid_payload()).await;
        resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = resp.json();
        assert!(body["error"].is_string());
    }

    // -----------------------------------------------------------------------
    // GET /api/sensor
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn list_empty_returns_empty_array() {
        let (server, _) = memory_server();
        let resp = server.get("/api/sensor").await;
        resp.assert_status_ok();
        let body: Value = resp.json();
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn list_returns_latest_fifty_newest_first() {
        let (server, _) = memory_server();
        for i in 1..=51 {
            let mut body = valid_payload();
            body["temperature"] = json!(i as f64);
            server.post("/api/sensor").json(&body).await.assert_status(StatusCode::CREATED);
        }

        let resp = server.get("/api/sensor").await;
        resp.assert_status_ok();

        let body: Vec<Value> = resp.json();
        assert_eq!(body.len(), 50);
        assert_eq!(body[0]["temperature"], 51.0);
        assert_eq!(body[49]["temperature"], 2.0);
        assert!(body.iter().all(|r| r["temperature"] != 1.0));
    }

    #[tokio::test]
    async fn list_round_trips_created_reading() {
        let (server, _) = memory_server();
        let created: Value = server.post("/api/sensor").json(&valid_payload()).await.json();

        let body: Vec<Value> = server.get("/api/sensor").await.json();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0], created["data"]);
    }

    #[tokio::test]
    async fn list_honours_configured_limit() {
        let state = AppState::new(SensorService::new(ReadingStore::memory()), 3);
        let server = TestServer::new(router(state)).unwrap();
        for _ in 0..5 {
            server.post("/api/sensor").json(&valid_payload()).await;
        }

        let body: Vec<Value> = server.get("/api/sensor").await.json();
        assert_eq!(body.len(), 3);
    }

    #[tokio::test]
    async fn list_with_unavailable_store_returns_server_error() {
        let server = test_server(ReadingStore::unavailable());
        let resp = server.get("/api/sensor").await;
        resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = resp.json();
        assert!(body["error"].is_string());
    }

    // -----------------------------------------------------------------------
    // GET /
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn health_returns_plain_text() {
        let server = test_server(ReadingStore::unavailable());
        let resp = server.get("/").await;
        resp.assert_status_ok();
        assert!(!resp.text().is_empty());
    }

    // -----------------------------------------------------------------------
    // CORS
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn responses_allow_any_origin() {
        let (server, _) = memory_server();
        let resp = server.get("/api/sensor").await;
        assert_eq!(resp.header("access-control-allow-origin"), "*");
    }

    #[tokio::test]
    async fn preflight_is_answered_without_body() {
        let (server, memory) = memory_server();
        let resp = server.method(Method::OPTIONS, "/api/sensor").await;
        resp.assert_status(StatusCode::NO_CONTENT);
        assert_eq!(resp.header("access-control-allow-origin"), "*");
        assert!(memory.is_empty().await);
    }

    // -----------------------------------------------------------------------
    // GET /api-docs/openapi.json
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn openapi_spec_is_served() {
        let (server, _) = memory_server();
        let resp = server.get("/api-docs/openapi.json").await;
        resp.assert_status_ok();
        let body: Value = resp.json();
        assert_eq!(body["info"]["title"], "Sensor Dashboard API");
        assert!(body["paths"]["/api/sensor"]["post"].is_object());
        assert!(body["paths"]["/api/sensor"]["get"].is_object());
    }
}
