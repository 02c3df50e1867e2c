//! Search, count and metadata handlers.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use super::{admit, error_response, SharedState};
use crate::collection::PageDetails;
use crate::mock_server::state::MockState;
use crate::query::{Search, MAX_RECORDS};

/// Decode and validate the `search` parameter.
fn parse_search(params: &HashMap<String, String>) -> Result<(String, Search), Response> {
    let raw = params
        .get("search")
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "search parameter is required"))?;
    let search: Search = serde_json::from_str(raw).map_err(|e| {
        error_response(StatusCode::BAD_REQUEST, format!("invalid search: {e}"))
    })?;

    if search.filter.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "at least one filter is required",
        ));
    }
    if let Some(records) = search.max_records {
        if !(1..=MAX_RECORDS).contains(&records) {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                format!("MaxRecords must be between 1 and {MAX_RECORDS}"),
            ));
        }
    }
    Ok((raw.clone(), search))
}

/// Keep only the requested fields (plus `id`).
fn project(record: &Map<String, Value>, include: &[String]) -> Value {
    if include.is_empty() {
        return Value::Object(record.clone());
    }
    let fields = record
        .iter()
        .filter(|(k, _)| *k == "id" || include.iter().any(|f| f.eq_ignore_ascii_case(k)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    Value::Object(fields)
}

fn page_url(state: &MockState, entity: &str, raw_search: &str, offset: usize) -> String {
    format!(
        "{}/{entity}/query?search={}&offset={offset}",
        state.base_url.as_deref().unwrap_or_default(),
        urlencoding::encode(raw_search)
    )
}

/// GET /{entity}/query
pub async fn run_query(
    shared: SharedState,
    entity: String,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    params: HashMap<String, String>,
) -> Response {
    let mut state = shared.write().await;
    if let Err(rejection) = admit(&mut state, &method, &uri, &headers, None) {
        return rejection;
    }

    let (raw, search) = match parse_search(&params) {
        Ok(parsed) => parsed,
        Err(rejection) => return rejection,
    };
    let offset: usize = params
        .get("offset")
        .and_then(|o| o.parse().ok())
        .unwrap_or(0);
    let page_size = search.max_records.unwrap_or(MAX_RECORDS) as usize;

    let matching = state.search(&entity, &search);
    let total = matching.len();
    let items: Vec<Value> = matching
        .into_iter()
        .skip(offset)
        .take(page_size)
        .map(|r| project(r, &search.include_fields))
        .collect();

    let page_details = PageDetails {
        count: items.len() as u32,
        request_count: page_size as u32,
        prev_page_url: (offset > 0)
            .then(|| page_url(&state, &entity, &raw, offset.saturating_sub(page_size))),
        next_page_url: (offset + page_size < total)
            .then(|| page_url(&state, &entity, &raw, offset + page_size)),
    };

    (
        StatusCode::OK,
        Json(json!({ "items": items, "pageDetails": page_details })),
    )
        .into_response()
}

/// GET /{entity}/entityInformation
pub async fn entity_information(
    shared: SharedState,
    entity: String,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let mut state = shared.write().await;
    if let Err(rejection) = admit(&mut state, &method, &uri, &headers, None) {
        return rejection;
    }

    match state.entity_information.get(&entity) {
        Some(info) => (StatusCode::OK, Json(json!({ "info": info }))).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("No entity information for {entity}"),
        ),
    }
}

/// GET /{entity}/query/count and /{entity}/entityInformation/fields
pub async fn get_nested_segment(
    State(shared): State<SharedState>,
    Path((entity, first, second)): Path<(String, String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut state = shared.write().await;
    if let Err(rejection) = admit(&mut state, &method, &uri, &headers, None) {
        return rejection;
    }

    match (first.as_str(), second.as_str()) {
        ("query", "count") => match parse_search(&params) {
            Ok((_, search)) => {
                let count = state.search(&entity, &search).len();
                (StatusCode::OK, Json(json!({ "queryCount": count }))).into_response()
            }
            Err(rejection) => rejection,
        },
        ("entityInformation", "fields") => match state.entity_fields.get(&entity) {
            Some(fields) => (StatusCode::OK, Json(json!({ "fields": fields }))).into_response(),
            None => error_response(
                StatusCode::NOT_FOUND,
                format!("No field information for {entity}"),
            ),
        },
        _ => error_response(
            StatusCode::NOT_FOUND,
            format!("Unknown resource {entity}/{first}/{second}"),
        ),
    }
}
