//! HTTP request handlers for the mock server.

use std::sync::Arc;

use axum::{
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::mock_server::state::{MockState, RecordedRequest};

pub mod entities;
pub mod query;

pub use entities::*;
pub use query::*;

pub type SharedState = Arc<RwLock<MockState>>;

/// An Autotask-style `{"errors": [...]}` response.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "errors": [message.into()] })),
    )
        .into_response()
}

/// Record the request, then check credentials if the state requires them.
pub(crate) fn admit(
    state: &mut MockState,
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Option<&Value>,
) -> Result<(), Response> {
    state.requests.push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        body: body.cloned(),
    });

    let Some(ref expected) = state.required_credentials else {
        return Ok(());
    };
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let authorized = header("UserName") == Some(expected.username.as_str())
        && header("Secret") == Some(expected.secret.as_str())
        && header("ApiIntegrationcode") == Some(expected.integration_code.as_str());

    if authorized {
        Ok(())
    } else {
        Err(error_response(
            StatusCode::UNAUTHORIZED,
            "User is not authorized to access this resource",
        ))
    }
}

pub(crate) fn parse_id(raw: &str) -> Result<i64, Response> {
    raw.parse().map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("'{raw}' is not a valid id"),
        )
    })
}
