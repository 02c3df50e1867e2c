//! Contract service adjustment model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::route::Route;
use crate::traits::{Create, Describe, Entity, Update};

/// A change to the units or price of a service on a recurring contract.
///
/// Created under `Contracts/{contractID}/ServiceAdjustments`, updated via
/// the flat `ContractServiceAdjustments` path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractServiceAdjustment {
    pub id: Option<i64>,
    #[serde(rename = "contractID")]
    pub contract_id: Option<i64>,
    #[serde(rename = "contractServiceID")]
    pub contract_service_id: Option<i64>,
    #[serde(rename = "serviceID")]
    pub service_id: Option<i64>,
    #[serde(rename = "quoteItemID")]
    pub quote_item_id: Option<i64>,
    pub effective_date: Option<DateTime<Utc>>,
    pub unit_change: Option<i32>,
    pub adjusted_unit_cost: Option<f64>,
    pub adjusted_unit_price: Option<f64>,
    pub allow_repeat_service: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for ContractServiceAdjustment {
    const NAME: &'static str = "ContractServiceAdjustment";
    const PATH: &'static str = "ContractServiceAdjustments";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        self.contract_id
    }
}

impl Create for ContractServiceAdjustment {
    const CREATE_ROUTE: Route = Route::nested("Contracts", "ServiceAdjustments");
}

impl Update for ContractServiceAdjustment {
    const UPDATE_ROUTE: Route = Route::Flat;
}

impl Describe for ContractServiceAdjustment {}
