//! Resource role department model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::route::Route;
use crate::traits::{Create, Entity, Update};

const RESOURCE_ROLE_DEPARTMENTS: Route = Route::nested("Resources", "RoleDepartments");

/// Links a resource to a role within a department.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRoleDepartment {
    pub id: Option<i64>,
    #[serde(rename = "resourceID")]
    pub resource_id: Option<i64>,
    #[serde(rename = "roleID")]
    pub role_id: Option<i64>,
    #[serde(rename = "departmentID")]
    pub department_id: Option<i64>,
    pub is_active: Option<bool>,
    pub is_default: Option<bool>,
    pub is_department_lead: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for ResourceRoleDepartment {
    const NAME: &'static str = "ResourceRoleDepartment";
    const PATH: &'static str = "ResourceRoleDepartments";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        self.resource_id
    }
}

impl Create for ResourceRoleDepartment {
    const CREATE_ROUTE: Route = RESOURCE_ROLE_DEPARTMENTS;
}

impl Update for ResourceRoleDepartment {
    const UPDATE_ROUTE: Route = RESOURCE_ROLE_DEPARTMENTS;
}
