//! Service call task model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::route::Route;
use crate::traits::{Create, Delete, Entity};

const SERVICE_CALL_TASKS: Route = Route::nested("ServiceCalls", "Tasks");

/// Attaches a project task to a service call. Cannot be updated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCallTask {
    pub id: Option<i64>,
    #[serde(rename = "serviceCallID")]
    pub service_call_id: Option<i64>,
    #[serde(rename = "taskID")]
    pub task_id: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for ServiceCallTask {
    const NAME: &'static str = "ServiceCallTask";
    const PATH: &'static str = "ServiceCallTasks";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        self.service_call_id
    }
}

impl Create for ServiceCallTask {
    const CREATE_ROUTE: Route = SERVICE_CALL_TASKS;
}

impl Delete for ServiceCallTask {
    /// `(service_call_id, task_link_id)`
    type Key = (i64, i64);
    const DELETE_ROUTE: Route = SERVICE_CALL_TASKS;
}
