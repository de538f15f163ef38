use std::path::{Path, PathBuf};

use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::any,
};
use futures::StreamExt;
use percent_encoding::percent_decode_str;
use tokio::{
    fs::{File, OpenOptions},
    io::AsyncWriteExt,
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use super::listing::directory_listing;
use crate::{
    errors::{ThttpError, ThttpResult},
    utils::path::{is_write_target_within, join_within},
};

/// Non-standard method appending the request body to a file
pub const APPEND_METHOD: &str = "APPEND";

/// How a PUT-style request opens its target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    Truncate,
    Append,
}

impl WriteMode {
    async fn open(self, path: &Path) -> std::io::Result<File> {
        match self {
            WriteMode::Truncate => File::create(path).await,
            WriteMode::Append => {
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .await
            }
        }
    }
}

/// Serves one directory: GET reads files, PUT and APPEND write them.
///
/// Concurrent writers to the same file are not serialized; their bodies may
/// interleave.
#[derive(Debug, Clone)]
pub struct DirectoryHandler {
    root: PathBuf,
}

impl DirectoryHandler {
    pub async fn new(root: impl AsRef<Path>) -> ThttpResult<Self> {
        let root = root.as_ref();
        let root = tokio::fs::canonicalize(root)
            .await
            .map_err(|e| ThttpError::local_io(root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Router sending every path and method to this handler
    pub fn into_router(self) -> Router {
        Router::new()
            .route("/", any(serve))
            .route("/{*path}", any(serve))
            .with_state(self)
    }

    pub async fn dispatch(&self, req: Request) -> Response {
        let method = req.method().clone();
        let raw_path = req.uri().path().to_string();
        tracing::debug!("{} {}", method, raw_path);

        match method.as_str() {
            "GET" => self.serve_file(&raw_path, req).await,
            "PUT" => {
                self.write(&raw_path, WriteMode::Truncate, req.into_body())
                    .await
            }
            APPEND_METHOD => {
                self.write(&raw_path, WriteMode::Append, req.into_body())
                    .await
            }
            other => (
                StatusCode::BAD_REQUEST,
                format!("unknown method: {}", other),
            )
                .into_response(),
        }
    }

    /// Files come from `ServeDir`; a directory without `index.html` gets a
    /// generated listing instead of its 404.
    async fn serve_file(&self, raw_path: &str, req: Request) -> Response {
        let res = match ServeDir::new(&self.root).oneshot(req).await {
            Ok(res) => res.into_response(),
            Err(never) => match never {},
        };
        if res.status() != StatusCode::NOT_FOUND {
            return res;
        }

        let Some(dir) = decode_path(raw_path).and_then(|p| join_within(&self.root, &p)) else {
            return res;
        };
        match tokio::fs::metadata(&dir).await {
            Ok(metadata) if metadata.is_dir() => match directory_listing(&dir).await {
                Ok(listing) => listing,
                Err(e) => internal_error(format!("cannot list {}: {}", dir.display(), e)),
            },
            _ => res,
        }
    }

    async fn write(&self, raw_path: &str, mode: WriteMode, body: Body) -> Response {
        let Some(request_path) = decode_path(raw_path) else {
            return (StatusCode::BAD_REQUEST, "invalid request path").into_response();
        };
        let Some(path) = join_within(&self.root, &request_path) else {
            return forbidden(&request_path);
        };

        match is_write_target_within(&path, &self.root).await {
            Ok(true) => {}
            Ok(false) => return forbidden(&request_path),
            Err(e) => return internal_error(format!("create fails {}", e)),
        }

        let mut file = match mode.open(&path).await {
            Ok(file) => file,
            Err(e) => return internal_error(format!("create fails {}", e)),
        };

        match copy_body(body, &mut file).await {
            Ok(written) => {
                tracing::debug!("{:?} {} bytes to {}", mode, written, path.display());
                StatusCode::OK.into_response()
            }
            Err(e) => internal_error(format!("copy fails {}", e)),
        }
    }
}

async fn serve(State(handler): State<DirectoryHandler>, req: Request) -> Response {
    handler.dispatch(req).await
}

/// Percent-decode a raw URI path; `None` when it is not valid UTF-8
fn decode_path(raw_path: &str) -> Option<String> {
    percent_decode_str(raw_path)
        .decode_utf8()
        .ok()
        .map(|path| path.into_owned())
}

async fn copy_body(body: Body, file: &mut File) -> std::io::Result<u64> {
    let mut stream = body.into_data_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(std::io::Error::other)?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    Ok(written)
}

fn forbidden(request_path: &str) -> Response {
    tracing::warn!("Refusing write outside served directory: {}", request_path);
    (StatusCode::FORBIDDEN, "path escapes served directory").into_response()
}

fn internal_error(message: String) -> Response {
    tracing::error!("{}", message);
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}
