//! Change request link model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::route::Route;
use crate::traits::{Create, Delete, Entity};

/// Associates a change request ticket with a problem or incident ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequestLink {
    pub id: Option<i64>,
    #[serde(rename = "changeRequestTicketID")]
    pub change_request_ticket_id: Option<i64>,
    #[serde(rename = "problemOrIncidentTicketID")]
    pub problem_or_incident_ticket_id: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for ChangeRequestLink {
    const NAME: &'static str = "ChangeRequestLink";
    const PATH: &'static str = "ChangeRequestLinks";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Create for ChangeRequestLink {
    const CREATE_ROUTE: Route = Route::Flat;
}

impl Delete for ChangeRequestLink {
    type Key = i64;
    const DELETE_ROUTE: Route = Route::Flat;
}
