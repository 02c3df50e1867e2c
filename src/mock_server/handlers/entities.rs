//! Entity read, write and delete handlers.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use super::{admit, error_response, parse_id, query, SharedState};
use crate::mock_server::state::{MockState, NestedTarget};

fn object(body: Value) -> Result<Map<String, Value>, Response> {
    match body {
        Value::Object(fields) => Ok(fields),
        _ => Err(error_response(
            StatusCode::BAD_REQUEST,
            "request body must be a JSON object",
        )),
    }
}

fn item_id(id: i64) -> Response {
    (StatusCode::OK, Json(json!({ "itemId": id }))).into_response()
}

/// POST /{entity}
pub async fn create_flat(
    State(state): State<SharedState>,
    Path(entity): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = admit(&mut state, &method, &uri, &headers, Some(&body)) {
        return rejection;
    }

    match object(body) {
        Ok(fields) => item_id(state.create(&entity, fields)),
        Err(rejection) => rejection,
    }
}

/// PUT /{entity}
pub async fn update_flat(
    State(state): State<SharedState>,
    Path(entity): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = admit(&mut state, &method, &uri, &headers, Some(&body)) {
        return rejection;
    }

    let fields = match object(body) {
        Ok(fields) => fields,
        Err(rejection) => return rejection,
    };
    match state.update(&entity, fields) {
        Some(id) => item_id(id),
        None => error_response(StatusCode::NOT_FOUND, format!("No {entity} record to update")),
    }
}

/// POST /{parent}/{parentId}/{child}
pub async fn create_nested(
    State(state): State<SharedState>,
    Path((parent, parent_id, child)): Path<(String, String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = admit(&mut state, &method, &uri, &headers, Some(&body)) {
        return rejection;
    }

    let (target, parent_id, mut fields) =
        match nested_write(&state, &parent, &parent_id, &child, body) {
            Ok(parts) => parts,
            Err(rejection) => return rejection,
        };
    fields.insert(target.parent_field.to_string(), Value::from(parent_id));
    item_id(state.create(target.entity_path, fields))
}

/// PUT /{parent}/{parentId}/{child}
pub async fn update_nested(
    State(state): State<SharedState>,
    Path((parent, parent_id, child)): Path<(String, String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = admit(&mut state, &method, &uri, &headers, Some(&body)) {
        return rejection;
    }

    let (target, parent_id, mut fields) =
        match nested_write(&state, &parent, &parent_id, &child, body) {
            Ok(parts) => parts,
            Err(rejection) => return rejection,
        };
    fields.insert(target.parent_field.to_string(), Value::from(parent_id));
    match state.update(target.entity_path, fields) {
        Some(id) => item_id(id),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("No {child} record to update under {parent} {parent_id}"),
        ),
    }
}

fn nested_write(
    state: &MockState,
    parent: &str,
    parent_id: &str,
    child: &str,
    body: Value,
) -> Result<(NestedTarget, i64, Map<String, Value>), Response> {
    let target = state
        .nested_target(parent, child)
        .cloned()
        .ok_or_else(|| {
            error_response(
                StatusCode::NOT_FOUND,
                format!("Unknown route {parent}/{child}"),
            )
        })?;
    let parent_id = parse_id(parent_id)?;
    let fields = object(body)?;
    Ok((target, parent_id, fields))
}

/// GET /{entity}/{id}, /{entity}/query and /{entity}/entityInformation
pub async fn get_segment(
    State(shared): State<SharedState>,
    Path((entity, segment)): Path<(String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match segment.as_str() {
        "query" => return query::run_query(shared, entity, method, uri, headers, params).await,
        "entityInformation" => {
            return query::entity_information(shared, entity, method, uri, headers).await
        }
        _ => {}
    }

    let mut state = shared.write().await;
    if let Err(rejection) = admit(&mut state, &method, &uri, &headers, None) {
        return rejection;
    }

    let id = match parse_id(&segment) {
        Ok(id) => id,
        Err(rejection) => return rejection,
    };
    let item = state.get(&entity, id).cloned().map(Value::Object);
    (StatusCode::OK, Json(json!({ "item": item }))).into_response()
}

/// DELETE /{entity}/{id}
pub async fn delete_flat(
    State(state): State<SharedState>,
    Path((entity, id)): Path<(String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = admit(&mut state, &method, &uri, &headers, None) {
        return rejection;
    }

    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(rejection) => return rejection,
    };
    if state.delete(&entity, id, None) {
        item_id(id)
    } else {
        error_response(StatusCode::NOT_FOUND, format!("No {entity} record with id {id}"))
    }
}

/// DELETE /{parent}/{parentId}/{child}/{id}
pub async fn delete_nested(
    State(state): State<SharedState>,
    Path((parent, parent_id, child, id)): Path<(String, String, String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = admit(&mut state, &method, &uri, &headers, None) {
        return rejection;
    }

    let Some(target) = state.nested_target(&parent, &child).cloned() else {
        return error_response(StatusCode::NOT_FOUND, format!("Unknown route {parent}/{child}"));
    };
    let (parent_id, id) = match (parse_id(&parent_id), parse_id(&id)) {
        (Ok(parent_id), Ok(id)) => (parent_id, id),
        (Err(rejection), _) | (_, Err(rejection)) => return rejection,
    };

    if state.delete(target.entity_path, id, Some((target.parent_field, parent_id))) {
        item_id(id)
    } else {
        error_response(
            StatusCode::NOT_FOUND,
            format!("No {child} record {id} under {parent} {parent_id}"),
        )
    }
}
