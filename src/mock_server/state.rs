//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Autotask API server.
//! Records are kept as JSON field maps in one table per entity path, so any
//! entity type can be stored without per-type plumbing.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::filter;
use crate::config::Credentials;
use crate::models::{
    Contact, ContractServiceAdjustment, ContractServiceBundleAdjustment, ContractTicketPurchase,
    EntityField, EntityInformation, ResourceRoleDepartment, ServiceCallTask,
};
use crate::query::Search;
use crate::route::Route;
use crate::traits::{Create, Entity};

/// Where a nested `{parent}/{parentId}/{child}` route stores its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedTarget {
    /// Flat entity path of the child table (`Contacts`).
    pub entity_path: &'static str,
    /// Field on the child that holds the parent ID (`companyID`).
    pub parent_field: &'static str,
}

/// One request the server received, for assertions in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Records indexed by entity path, then ID.
    pub tables: HashMap<String, BTreeMap<i64, Map<String, Value>>>,

    /// Nested write routes keyed by `(parent, child)` path segments.
    pub nested: HashMap<(String, String), NestedTarget>,

    /// `entityInformation` bodies keyed by entity path.
    pub entity_information: HashMap<String, EntityInformation>,

    /// `entityInformation/fields` bodies keyed by entity path.
    pub entity_fields: HashMap<String, Vec<EntityField>>,

    /// Every request received, in order.
    pub requests: Vec<RecordedRequest>,

    /// Optional credentials. If set, requests must carry matching headers.
    pub required_credentials: Option<Credentials>,

    /// Public URL of the server, used to build `nextPageUrl`.
    pub base_url: Option<String>,

    next_id: i64,
}

impl MockState {
    /// Create a new empty state with the standard nested routes registered.
    pub fn new() -> Self {
        let mut state = Self {
            next_id: 1000,
            ..Self::default()
        };
        state.register_nested::<Contact>("companyID");
        state.register_nested::<ContractServiceAdjustment>("contractID");
        state.register_nested::<ContractServiceBundleAdjustment>("contractID");
        state.register_nested::<ContractTicketPurchase>("contractID");
        state.register_nested::<ResourceRoleDepartment>("resourceID");
        state.register_nested::<ServiceCallTask>("serviceCallID");
        state
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Route `{parent}/{id}/{child}` writes for `E` into its flat table.
    pub fn register_nested<E: Create>(&mut self, parent_field: &'static str) {
        if let Route::Nested { parent, child } = E::CREATE_ROUTE {
            self.nested.insert(
                (parent.to_string(), child.to_string()),
                NestedTarget {
                    entity_path: E::PATH,
                    parent_field,
                },
            );
        }
    }

    /// Add an entity to the state. Entities without an ID get one assigned.
    pub fn with_entity<E: Entity>(mut self, entity: &E) -> Self {
        if let Ok(Value::Object(fields)) = serde_json::to_value(entity) {
            self.insert(E::PATH, fields);
        }
        self
    }

    /// Serve `info` from `{PATH}/entityInformation`.
    pub fn with_entity_information(mut self, path: &str, info: EntityInformation) -> Self {
        self.entity_information.insert(path.to_string(), info);
        self
    }

    /// Serve `fields` from `{PATH}/entityInformation/fields`.
    pub fn with_entity_fields(mut self, path: &str, fields: Vec<EntityField>) -> Self {
        self.entity_fields.insert(path.to_string(), fields);
        self
    }

    /// Set the required API credentials.
    pub fn with_required_credentials(mut self, credentials: Credentials) -> Self {
        self.required_credentials = Some(credentials);
        self
    }

    /// Get a typed entity by ID.
    pub fn get_entity<E: Entity>(&self, id: i64) -> Option<E> {
        let record = self.get(E::PATH, id)?;
        serde_json::from_value(Value::Object(record.clone())).ok()
    }

    /// All stored entities of one type, ordered by ID.
    pub fn entities<E: Entity>(&self) -> Vec<E> {
        self.tables
            .get(E::PATH)
            .into_iter()
            .flat_map(BTreeMap::values)
            .filter_map(|r| serde_json::from_value(Value::Object(r.clone())).ok())
            .collect()
    }

    /// Get a raw record.
    pub fn get(&self, path: &str, id: i64) -> Option<&Map<String, Value>> {
        self.tables.get(path)?.get(&id)
    }

    /// Store a record, assigning an ID when it has none. Returns the ID.
    pub fn insert(&mut self, path: &str, mut fields: Map<String, Value>) -> i64 {
        fields.retain(|_, v| !v.is_null());
        let id = match fields.get("id").and_then(Value::as_i64) {
            Some(id) => {
                self.next_id = self.next_id.max(id + 1);
                id
            }
            None => {
                let id = self.next_id;
                self.next_id += 1;
                fields.insert("id".to_string(), Value::from(id));
                id
            }
        };
        self.tables
            .entry(path.to_string())
            .or_default()
            .insert(id, fields);
        id
    }

    /// Create a record. The body's `id`, if any, is ignored.
    pub fn create(&mut self, path: &str, mut fields: Map<String, Value>) -> i64 {
        fields.remove("id");
        self.insert(path, fields)
    }

    /// Merge the populated fields of `fields` into the record named by its
    /// `id`. Returns the ID, or `None` if no such record exists.
    pub fn update(&mut self, path: &str, fields: Map<String, Value>) -> Option<i64> {
        let id = fields.get("id").and_then(Value::as_i64)?;
        let record = self.tables.get_mut(path)?.get_mut(&id)?;
        for (key, value) in fields {
            if value.is_null() {
                record.remove(&key);
            } else {
                record.insert(key, value);
            }
        }
        Some(id)
    }

    /// Remove a record. When `parent` is given the record must belong to it.
    pub fn delete(&mut self, path: &str, id: i64, parent: Option<(&str, i64)>) -> bool {
        let Some(table) = self.tables.get_mut(path) else {
            return false;
        };
        let owned = match (parent, table.get(&id)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some((field, parent_id)), Some(record)) => {
                record.get(field).and_then(Value::as_i64) == Some(parent_id)
            }
        };
        if owned {
            table.remove(&id);
        }
        owned
    }

    /// Records in `path` matching the search filters, ordered by ID.
    pub fn search(&self, path: &str, search: &Search) -> Vec<&Map<String, Value>> {
        self.tables
            .get(path)
            .into_iter()
            .flat_map(BTreeMap::values)
            .filter(|r| filter::matches_all(r, &search.filter))
            .collect()
    }

    /// Look up a nested write route.
    pub fn nested_target(&self, parent: &str, child: &str) -> Option<&NestedTarget> {
        self.nested.get(&(parent.to_string(), child.to_string()))
    }

    /// Requests whose method and path match.
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<&RecordedRequest> {
        self.requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}
