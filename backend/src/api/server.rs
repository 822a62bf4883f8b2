//! HTTP Server for the clinical trials email generator.
//!
//! # API Endpoints
//!
//! | Method  | Path          | Description                              |
//! |---------|---------------|------------------------------------------|
//! | GET     | `/health`     | Health check                             |
//! | POST    | `/api/parse`  | Upload a workbook, get `{config, studies, stats}` |
//! | OPTIONS | `/api/parse`  | Preflight, empty 200                     |
//! | GET     | `/api/logs`   | SSE stream of normalizer logs            |
//!
//! Any other method on `/api/parse` answers 405.

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart},
    http::{header, HeaderValue, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use super::logs::{log_error, LOG_BROADCASTER};
use super::types::{ParseResponse, UploadSummary};
use crate::error::{ParseError, ServerError, ServerResult};
use crate::transform::pipeline::normalize_workbook;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Multipart file part carrying the workbook.
const FILE_FIELD: &str = "file";

const ALLOWED_METHODS: &str = "POST, OPTIONS";

/// Build the application router.
pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route(
            "/api/parse",
            post(parse_upload)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route("/api/logs", get(sse_logs))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        // Every response, preflight included, carries the exact header text
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
}

/// Start the HTTP server
pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Clinical trials email server running on http://localhost:{}", port);
    println!("   POST /api/parse  - Upload workbook (field \"file\")");
    println!("   GET  /api/logs   - SSE log stream");
    println!("   GET  /health     - Health check");
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router()).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "ctmail",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "parse": "POST /api/parse",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    // Lagged receivers skip what they missed
    let stream = BroadcastStream::new(rx).filter_map(|result| {
        let entry = result.ok()?;
        let json = serde_json::to_string(&entry).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}

/// Parse workbook endpoint
async fn parse_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Json<ParseResponse>> {
    let mut multipart = multipart.map_err(|e| {
        eprintln!("❌ Parse error: {}", e);
        ServerError::parse_failed(e.body_text())
    })?;

    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        eprintln!("❌ Parse error: {}", e);
        ServerError::parse_failed(e.body_text())
    })? {
        // Text fields named `file` are not uploads
        if field.name() != Some(FILE_FIELD)
            || field.file_name().is_none()
            || file_data.is_some()
        {
            continue;
        }
        file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            eprintln!("❌ Parse error: {}", e);
            ServerError::parse_failed(e.body_text())
        })?;
        file_data = Some(bytes.to_vec());
    }

    let bytes = file_data.ok_or(ParseError::MissingInput)?;

    println!("\n{}", "=".repeat(70));
    println!(
        "📄 NEW UPLOAD: {} ({} bytes)",
        file_name.as_deref().unwrap_or("unknown"),
        bytes.len()
    );
    println!("{}\n", "=".repeat(70));

    let report = normalize_workbook(&bytes).map_err(|e| {
        eprintln!("❌ Parse error: {}", e);
        log_error(format!("Could not read workbook: {}", e));
        ServerError::from(e)
    })?;

    println!("\n{}", "=".repeat(70));
    println!("📊 SUMMARY");
    println!("{}", "=".repeat(70));
    let summary = UploadSummary {
        file_name: file_name.as_deref(),
        bytes: bytes.len(),
        report: &report,
    };
    for line in summary.lines() {
        println!("{}", line);
    }
    println!("{}\n", "=".repeat(70));

    Ok(Json(report))
}
