pub mod dto;
pub mod errors;
pub mod handlers;

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::sensors::SensorService;
use handlers::ApiDoc;

/// Per-request context handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub sensors: SensorService,
    /// Size of the window returned by `GET /api/sensor`.
    pub recent_limit: i64,
}

impl AppState {
    pub fn new(sensors: SensorService, recent_limit: i64) -> Self {
        Self { sensors, recent_limit }
    }
}

pub fn router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route(
            "/api/sensor",
            get(handlers::list_recent_readings).post(handlers::create_reading),
        )
        .with_state(state)
        .split_for_parts();

    router
        .route("/", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
        .layer(middleware::from_fn(cors))
}

/// Lets the browser dashboard call the API from any origin.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    response
}
