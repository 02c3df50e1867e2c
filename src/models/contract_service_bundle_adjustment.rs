//! Contract service bundle adjustment model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::route::Route;
use crate::traits::{Create, Describe, Entity, Update};

/// A change to the units or price of a service bundle on a recurring contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractServiceBundleAdjustment {
    pub id: Option<i64>,
    #[serde(rename = "contractID")]
    pub contract_id: Option<i64>,
    #[serde(rename = "contractServiceBundleID")]
    pub contract_service_bundle_id: Option<i64>,
    #[serde(rename = "serviceBundleID")]
    pub service_bundle_id: Option<i64>,
    #[serde(rename = "quoteItemID")]
    pub quote_item_id: Option<i64>,
    pub effective_date: Option<DateTime<Utc>>,
    pub unit_change: Option<i32>,
    pub adjusted_unit_price: Option<f64>,
    pub allow_repeat_service_bundle: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for ContractServiceBundleAdjustment {
    const NAME: &'static str = "ContractServiceBundleAdjustment";
    const PATH: &'static str = "ContractServiceBundleAdjustments";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        self.contract_id
    }
}

impl Create for ContractServiceBundleAdjustment {
    const CREATE_ROUTE: Route = Route::nested("Contracts", "ServiceBundleAdjustments");
}

impl Update for ContractServiceBundleAdjustment {
    const UPDATE_ROUTE: Route = Route::Flat;
}

impl Describe for ContractServiceBundleAdjustment {}
