//! Contract ticket purchase model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::route::Route;
use crate::traits::{Create, Entity, Update};

const CONTRACT_TICKET_PURCHASES: Route = Route::nested("Contracts", "TicketPurchases");

/// A block of tickets bought against a per-ticket contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTicketPurchase {
    pub id: Option<i64>,
    #[serde(rename = "contractID")]
    pub contract_id: Option<i64>,
    pub date_purchased: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub invoice_number: Option<String>,
    pub is_paid: Option<bool>,
    pub payment_number: Option<String>,
    pub payment_type: Option<i32>,
    pub per_ticket_rate: Option<f64>,
    pub status: Option<i32>,
    pub tickets_purchased: Option<f64>,
    pub tickets_used: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContractTicketPurchase {
    /// Tickets still available, when both counts are known.
    pub fn tickets_remaining(&self) -> Option<f64> {
        Some(self.tickets_purchased? - self.tickets_used?)
    }
}

impl Entity for ContractTicketPurchase {
    const NAME: &'static str = "ContractTicketPurchase";
    const PATH: &'static str = "ContractTicketPurchases";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        self.contract_id
    }
}

impl Create for ContractTicketPurchase {
    const CREATE_ROUTE: Route = CONTRACT_TICKET_PURCHASES;
}

impl Update for ContractTicketPurchase {
    const UPDATE_ROUTE: Route = CONTRACT_TICKET_PURCHASES;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_remaining() {
        let purchase = ContractTicketPurchase {
            tickets_purchased: Some(20.0),
            tickets_used: Some(4.5),
            ..Default::default()
        };
        assert_eq!(purchase.tickets_remaining(), Some(15.5));

        let unknown = ContractTicketPurchase {
            tickets_purchased: Some(20.0),
            ..Default::default()
        };
        assert_eq!(unknown.tickets_remaining(), None);
    }
}
