//! Mock Autotask API server.
//!
//! Provides an axum-based HTTP server that simulates the Autotask REST API.
//! Routes are generic over entity paths; the state decides which entities
//! and nested routes exist.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::{MockState, RecordedRequest};
use crate::client::AutotaskClient;
use crate::config::Credentials;

/// A mock Autotask API server for testing.
///
/// The server runs in the background and can be used to test the Autotask
/// client against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Fixtures::default_scenario().into_state()).await
    }

    /// Start a mock server with empty tables.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(mut state: MockState) -> Self {
        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");
        let url = format!("http://{}", addr);

        state.base_url = Some(url.clone());
        let shared_state = state.shared();
        let app = Self::router(shared_state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url,
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// A client pointed at this server.
    pub fn client(&self) -> AutotaskClient {
        AutotaskClient::with_credentials(
            Credentials::new("api@example.com", "secret", "TEST"),
            &self.url,
        )
        .expect("mock server URL is valid")
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Requests received so far.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.read().await.requests.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the axum router with all routes.
    ///
    /// Parameter names are shared across routes at each position; the
    /// handlers extract them positionally.
    pub fn router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Flat writes
            .route(
                "/:entity",
                post(handlers::create_flat).put(handlers::update_flat),
            )
            // Single reads, queries, entity information and flat deletes
            .route(
                "/:entity/:segment",
                get(handlers::get_segment).delete(handlers::delete_flat),
            )
            // Counts, field information and nested writes
            .route(
                "/:entity/:segment/:child",
                get(handlers::get_nested_segment)
                    .post(handlers::create_nested)
                    .put(handlers::update_nested),
            )
            // Nested deletes
            .route(
                "/:entity/:segment/:child/:id",
                delete(handlers::delete_nested),
            )
            .with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::{Company, Contact, Entity, ItemId};

    #[tokio::test]
    async fn test_router_serves_single_item() {
        let app = MockServer::router(Fixtures::default_scenario().into_state().shared());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/Companies/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let company = Company::from_slice(&body).unwrap();
        assert_eq!(company.company_name.as_deref(), Some("Acme Corporation"));
    }

    #[tokio::test]
    async fn test_required_credentials() {
        let state = MockState::new()
            .with_required_credentials(Credentials::new("api@example.com", "right", "TEST"));
        let app = MockServer::router(state.shared());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/Companies/1")
                    .header("UserName", "api@example.com")
                    .header("Secret", "wrong")
                    .header("ApiIntegrationcode", "TEST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_nested_create_with_client() {
        let server = MockServer::start_empty().await;
        let client = server.client();

        let response = client
            .contacts()
            .create(&Contact {
                company_id: Some(42),
                first_name: Some("Ada".to_string()),
                ..Default::default()
            })
            .await
            .expect("Failed to create contact");
        let id = ItemId::from_response(response).await.unwrap().item_id;

        let contact = client.contacts().find_by_id(id).await.unwrap();
        assert_eq!(contact.parent_id(), Some(42));
        assert_eq!(
            server.requests().await[0].path,
            "/Companies/42/Contacts"
        );

        server.shutdown().await;
    }
}
