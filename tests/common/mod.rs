//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use maintenance_mode::{LocalFileBackend, StateController};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// A controller whose active backend is a file inside a fresh temp dir.
pub struct FileState {
    pub _dir: TempDir,
    pub path: PathBuf,
    pub controller: Arc<StateController>,
}

pub fn file_state() -> FileState {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("maintenance_mode.txt");
    let controller = Arc::new(StateController::with_backend(Arc::new(
        LocalFileBackend::new(&path),
    )));
    FileState {
        _dir: dir,
        path,
        controller,
    }
}

/// Response status, headers and body of an in-process request.
pub struct Reply {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

pub async fn send(router: &Router, path: &str) -> Reply {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    Reply {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// Bind an ephemeral local port.
#[allow(dead_code)]
pub async fn bind_local() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}
