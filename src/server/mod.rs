//! HTTP API server
//!
//! A small JSON API over axum: a root banner, lead capture, status checks,
//! and property listing endpoints, with a catch-all 404 for everything else.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::fmt::Display;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::content::ContentLoader;
use crate::store::{Lead, StatusCheck, Store};
use crate::Site;

/// Shared handler state, constructed once at startup
pub struct AppState {
    pub site: Site,
    pub store: Store,
}

/// Start the API server
pub async fn start(site: Site, store: Store) -> Result<()> {
    let ip = site.config.server.ip.clone();
    let port = site.config.server.port;

    let app = router(site, store);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { &ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router
pub fn router(site: Site, store: Store) -> Router {
    let cors = cors_layer(&site.config.cors_origins);
    let state = Arc::new(AppState { site, store });

    Router::new()
        .route("/", get(root))
        .route("/contact", get(list_leads).post(submit_lead))
        .route("/status", get(list_status).post(submit_status))
        .route("/properties", get(list_properties))
        .route("/properties/:slug", get(get_property))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins == "*" {
        // Credentials cannot be combined with a wildcard origin
        return cors.allow_origin(Any);
    }
    match origins.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin).allow_credentials(true),
        Err(_) => {
            tracing::warn!("Invalid cors_origins value {:?}, allowing any origin", origins);
            cors.allow_origin(Any)
        }
    }
}

async fn root(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "message": format!("{} API", state.site.config.title) }))
}

async fn submit_lead(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> Response {
    let fields = ["name", "email", "phone", "address"]
        .map(|key| required_string(&body, key));

    let [Some(name), Some(email), Some(phone), Some(address)] = fields else {
        return bad_request("All fields are required");
    };

    if !truthy(body.get("agreeToTerms")) {
        return bad_request("You must agree to the terms and conditions");
    }

    match state
        .store
        .insert_lead(Lead::new(name, email, phone, address))
        .await
    {
        Ok(lead) => Json(json!({
            "message": "Contact form submitted successfully",
            "id": lead.id,
        }))
        .into_response(),
        Err(e) => internal_error(e),
    }
}

async fn list_leads(State(state): State<Arc<AppState>>) -> Json<Vec<Lead>> {
    Json(state.store.leads().await)
}

async fn submit_status(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> Response {
    let Some(client_name) = required_string(&body, "client_name") else {
        return bad_request("client_name is required");
    };

    match state.store.insert_status(StatusCheck::new(client_name)).await {
        Ok(check) => Json(check).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn list_status(State(state): State<Arc<AppState>>) -> Json<Vec<StatusCheck>> {
    Json(state.store.status_checks().await)
}

async fn list_properties(State(state): State<Arc<AppState>>) -> Response {
    let loader = ContentLoader::new(&state.site);
    match loader.load_all() {
        Ok(properties) => Json(properties).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn get_property(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    let loader = ContentLoader::new(&state.site);
    match loader.load_by_slug(&slug) {
        Some(property) => Json(property).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Property {} not found", slug) })),
        )
            .into_response(),
    }
}

async fn not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("Route {} not found", uri.path()) })),
    )
        .into_response()
}

/// A required field: present, a string, and non-empty
fn required_string(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// JS-style truthiness for the agreeToTerms field: absent, null, false,
/// zero, and the empty string are all rejections
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn internal_error<E: Display>(e: E) -> Response {
    tracing::error!("API error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Internal server error",
            "details": e.to_string(),
        })),
    )
        .into_response()
}
