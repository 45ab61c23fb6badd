//! Loopback HTTP server answering with canned JSON.
//!
//! An axum router with a single fallback handler: every GET is looked up by
//! its request target (path and query) in a shared route map. Other methods
//! get `405 Method Not Allowed`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::Router;
use axum::extract::{OriginalUri, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Default)]
struct Routes {
    responses: HashMap<String, (StatusCode, String)>,
    requests: Vec<String>,
}

type SharedRoutes = Arc<Mutex<Routes>>;

/// A running stub server. Stops when dropped.
pub struct StubServer {
    base_url: String,
    routes: SharedRoutes,
    task: JoinHandle<()>,
}

fn lock(routes: &Mutex<Routes>) -> MutexGuard<'_, Routes> {
    routes.lock().unwrap_or_else(PoisonError::into_inner)
}

impl StubServer {
    /// Bind to an ephemeral loopback port and start serving.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the socket cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}/", listener.local_addr()?);
        let routes = SharedRoutes::default();

        let router = Router::new()
            .fallback(answer)
            .with_state(Arc::clone(&routes));
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url,
            routes,
            task,
        })
    }

    /// Base URL with a trailing slash, e.g. `http://127.0.0.1:41234/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Answer GET `target` (path and query, e.g. `/users?limit=0`) with
    /// `status` and `body`.
    ///
    /// # Panics
    ///
    /// Panics if `status` is not a valid HTTP status code.
    #[allow(clippy::expect_used)]
    pub fn route(&self, target: &str, status: u16, body: impl Into<String>) {
        let status = StatusCode::from_u16(status).expect("valid HTTP status code");
        lock(&self.routes)
            .responses
            .insert(target.to_string(), (status, body.into()));
    }

    /// Request targets received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        lock(&self.routes).requests.clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn answer(
    State(routes): State<SharedRoutes>,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> Response {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_owned(), ToString::to_string);

    let (status, body) = {
        let mut routes = lock(&routes);
        routes.requests.push(target.clone());
        if method != Method::GET {
            return StatusCode::METHOD_NOT_ALLOWED.into_response();
        }
        routes.responses.get(&target).cloned().unwrap_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                r#"{"message":"not found"}"#.to_string(),
            )
        })
    };

    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
