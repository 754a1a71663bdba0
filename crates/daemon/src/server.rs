//! HTTP adapter for the file engine.
//!
//! This is a thin layer: each handler resolves request parameters, calls
//! exactly one engine operation (delete fans out over its path list), and
//! serializes the result. No filesystem logic lives here.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Multipart, Path as UrlPath, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{delete, get, post, put};
use axum::Router;
use tokio_util::io::ReaderStream;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use protocol::error::{ErrorBody, ErrorCode};
use protocol::messages::{
    DeleteRequest, Entry, MkdirRequest, PathQuery, RenameRequest, WriteRequest,
};

use crate::files::{EngineError, FileEngine, UploadItem};

/// Shared handler state.
type Engine = State<Arc<FileEngine>>;

/// Engine failure carried out of a handler.
struct ApiError(EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            EngineError::InvalidPath(_) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidPath),
            EngineError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
            EngineError::PermissionDenied(_) => {
                (StatusCode::FORBIDDEN, ErrorCode::PermissionDenied)
            }
            EngineError::AlreadyExists(_) => (StatusCode::CONFLICT, ErrorCode::AlreadyExists),
            EngineError::Archive { .. } | EngineError::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Internal)
            }
        };

        if status.is_server_error() {
            warn!(error = %self.0, "file operation failed");
        } else {
            debug!(error = %self.0, "file operation rejected");
        }

        (status, Json(ErrorBody::new(code, self.0.to_string()))).into_response()
    }
}

/// Build the API router over a shared engine.
pub fn router(engine: Arc<FileEngine>) -> Router {
    Router::new()
        .route("/api/files/list", get(list))
        .route("/api/files/pipe/{*path}", get(pipe))
        .route("/api/files/put", put(write))
        .route("/api/files/delete", delete(delete_paths))
        .route("/api/files/mkdir", post(mkdir))
        .route("/api/files/rename", put(rename))
        .route("/api/files/upload", post(upload))
        .route("/api/files/extract", post(extract))
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

/// Serve the API until a shutdown signal arrives.
pub async fn serve(engine: FileEngine, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(Arc::new(engine));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

async fn list(
    State(engine): Engine,
    Query(query): Query<PathQuery>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    let entries = engine.list(&query.path).await?;
    Ok(Json(entries))
}

async fn pipe(State(engine): Engine, UrlPath(path): UrlPath<String>) -> Result<Response, ApiError> {
    let stream = engine.open_stream(&path).await?;

    let content_type = stream.content_type().to_string();
    let len = stream.len();
    let body = Body::from_stream(ReaderStream::new(stream.into_inner()));

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, len)
        .body(body)
        .map_err(|e| ApiError(EngineError::Io(io::Error::other(e))))
}

async fn write(
    State(engine): Engine,
    Json(request): Json<WriteRequest>,
) -> Result<StatusCode, ApiError> {
    engine.write(&request.path, request.content.as_bytes()).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_paths(
    State(engine): Engine,
    Json(request): Json<DeleteRequest>,
) -> Result<StatusCode, ApiError> {
    for path in &request.paths {
        engine.delete_tree(path).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn mkdir(
    State(engine): Engine,
    Json(request): Json<MkdirRequest>,
) -> Result<StatusCode, ApiError> {
    engine.mkdir(&request.path, &request.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn rename(
    State(engine): Engine,
    Json(request): Json<RenameRequest>,
) -> Result<StatusCode, ApiError> {
    engine.rename(&request.path, &request.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn upload(
    State(engine): Engine,
    Query(query): Query<PathQuery>,
    mut multipart: Multipart,
) -> Result<StatusCode, ApiError> {
    let mut items = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError(EngineError::Io(io::Error::other(e))))?
    {
        let name = field
            .file_name()
            .map(str::to_string)
            .or_else(|| field.name().map(str::to_string))
            .unwrap_or_default();
        let content = field
            .bytes()
            .await
            .map_err(|e| ApiError(EngineError::Io(io::Error::other(e))))?;
        items.push(UploadItem { name, content });
    }

    if items.is_empty() {
        return Err(ApiError(EngineError::Io(io::Error::other(
            "no files in upload request",
        ))));
    }

    engine.upload(&query.path, items).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn extract(
    State(engine): Engine,
    Query(query): Query<PathQuery>,
) -> Result<StatusCode, ApiError> {
    engine.extract(&query.path).await?;
    Ok(StatusCode::NO_CONTENT)
}
