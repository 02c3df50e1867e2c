//! Resource role model. Read-only through the API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::traits::Entity;

/// A role a resource may work under, optionally tied to a queue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRole {
    pub id: Option<i64>,
    #[serde(rename = "resourceID")]
    pub resource_id: Option<i64>,
    #[serde(rename = "roleID")]
    pub role_id: Option<i64>,
    #[serde(rename = "departmentID")]
    pub department_id: Option<i64>,
    #[serde(rename = "queueID")]
    pub queue_id: Option<i64>,
    pub is_active: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for ResourceRole {
    const NAME: &'static str = "ResourceRole";
    const PATH: &'static str = "ResourceRoles";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
