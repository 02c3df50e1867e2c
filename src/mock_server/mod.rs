//! Mock Autotask API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Autotask
//! REST API for integration and end-to-end testing. Unlike wiremock which
//! mocks at the HTTP level per-test, this server maintains state across
//! requests and evaluates search filters, enabling realistic workflow
//! testing.
//!
//! # Example
//!
//! ```ignore
//! use autotask::mock_server::MockServer;
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = server.client();
//!
//!     // Server comes with default fixtures
//!     let company = client.companies().find_by_id(1).await.unwrap();
//!     assert_eq!(company.company_name.as_deref(), Some("Acme Corporation"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod filter;
mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{MockState, NestedTarget, RecordedRequest};
