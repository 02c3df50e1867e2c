//! Contact model.
//!
//! Contacts are people at a company. Reads use `Contacts/{id}`; writes and
//! deletes are nested under the owning company.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::udf::{self, UserDefinedField};
use crate::route::Route;
use crate::traits::{Create, Delete, Entity, Update};

const COMPANY_CONTACTS: Route = Route::nested("Companies", "Contacts");

/// An Autotask contact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Option<i64>,
    #[serde(rename = "companyID")]
    pub company_id: Option<i64>,
    #[serde(rename = "companyLocationID")]
    pub company_location_id: Option<i64>,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
    pub last_name: Option<String>,
    pub name_prefix: Option<i32>,
    pub name_suffix: Option<i32>,
    pub title: Option<String>,
    pub email_address: Option<String>,
    pub email_address2: Option<String>,
    pub email_address3: Option<String>,
    pub phone: Option<String>,
    pub extension: Option<String>,
    pub mobile_phone: Option<String>,
    pub alternate_phone: Option<String>,
    pub fax_number: Option<String>,
    pub address_line: Option<String>,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    #[serde(rename = "countryID")]
    pub country_id: Option<i32>,
    pub room_number: Option<String>,
    #[serde(rename = "externalID")]
    pub external_id: Option<String>,
    /// `1` for active, `0` for inactive.
    pub is_active: Option<i32>,
    pub is_opted_out_from_bulk_email: Option<bool>,
    pub primary_contact: Option<bool>,
    pub note: Option<String>,
    pub create_date: Option<DateTime<Utc>>,
    pub last_activity_date: Option<DateTime<Utc>>,
    pub last_modified_date: Option<DateTime<Utc>>,
    pub user_defined_fields: Option<Vec<UserDefinedField>>,

    /// Fields returned by the API that this struct does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    /// "First Last", skipping missing parts.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Value of a user-defined field.
    pub fn udf(&self, name: &str) -> Option<&str> {
        udf::lookup(&self.user_defined_fields, name)
    }
}

impl Entity for Contact {
    const NAME: &'static str = "Contact";
    const PATH: &'static str = "Contacts";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        self.company_id
    }
}

impl Create for Contact {
    const CREATE_ROUTE: Route = COMPANY_CONTACTS;
}

impl Update for Contact {
    const UPDATE_ROUTE: Route = COMPANY_CONTACTS;
}

impl Delete for Contact {
    /// `(company_id, contact_id)`
    type Key = (i64, i64);
    const DELETE_ROUTE: Route = COMPANY_CONTACTS;
}
