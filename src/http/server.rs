//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the dispatch handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener and drain on shutdown
//! - Dispatch requests to the post handlers

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, request_id_of, set_request_id_layer};
use crate::http::response::ApiError;
use crate::observability::metrics;
use crate::routing::{decode_path, resolve, Endpoint};
use crate::store::PostStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PostStore>,
    pub max_body_bytes: usize,
}

/// HTTP server for the posts API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    store: Arc<PostStore>,
}

impl HttpServer {
    /// Create a new HTTP server with an empty store.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_store(config, Arc::new(PostStore::new()))
    }

    /// Create a server around an existing store.
    pub fn with_store(config: ServiceConfig, store: Arc<PostStore>) -> Self {
        let state = AppState {
            store: store.clone(),
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            store,
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Every request lands in `dispatch`; path and method matching happen
    /// there rather than in Axum's route table.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request_id_of(request),
            )
        });

        Router::new().fallback(dispatch).with_state(state).layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(trace)
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.timeouts.request_secs,
                )))
                .layer(propagate_request_id_layer()),
        )
    }

    /// Router with middleware, for serving or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Store backing this server.
    pub fn store(&self) -> Arc<PostStore> {
        self.store.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve the endpoint and run its handler.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();

    let path = decode_path(request.uri().path()).into_owned();

    let endpoint = match resolve(&method, &path) {
        Ok(endpoint) => endpoint,
        Err(e) => {
            tracing::debug!(error = %e, "Request rejected by router");
            let err = ApiError::from(e);
            metrics::record_request("unmatched", &method, err.status().as_u16(), start_time);
            return err.into_response();
        }
    };

    let result = match endpoint {
        Endpoint::ListPosts => handlers::list_posts(&state.store),
        Endpoint::CreatePost => {
            handlers::create_post(&state.store, request.into_body(), state.max_body_bytes).await
        }
        Endpoint::GetPost(id) => handlers::get_post(&state.store, id),
        Endpoint::DeletePost(id) => handlers::delete_post(&state.store, id),
    };

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(endpoint = endpoint.name(), error = %e, "Request failed");
            e.into_response()
        }
    };

    metrics::record_request(
        endpoint.name(),
        &method,
        response.status().as_u16(),
        start_time,
    );
    response
}
