//! Company model.
//!
//! Companies are the top-level customer, prospect and vendor records. Both
//! writes go to the flat `Companies` path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::udf::{self, UserDefinedField};
use crate::route::Route;
use crate::traits::{Create, Entity, Update};

/// An Autotask company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Option<i64>,
    pub company_name: Option<String>,
    pub company_number: Option<String>,
    /// Company type picklist value (customer, lead, prospect, ...).
    pub company_type: Option<i32>,
    pub classification: Option<i32>,
    #[serde(rename = "companyCategoryID")]
    pub company_category_id: Option<i32>,
    #[serde(rename = "ownerResourceID")]
    pub owner_resource_id: Option<i64>,
    #[serde(rename = "parentCompanyID")]
    pub parent_company_id: Option<i64>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub alternate_phone1: Option<String>,
    pub alternate_phone2: Option<String>,
    pub web_address: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub additional_address_information: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    #[serde(rename = "countryID")]
    pub country_id: Option<i32>,
    #[serde(rename = "territoryID")]
    pub territory_id: Option<i32>,
    #[serde(rename = "marketSegmentID")]
    pub market_segment_id: Option<i32>,
    #[serde(rename = "taxRegionID")]
    pub tax_region_id: Option<i32>,
    #[serde(rename = "taxID")]
    pub tax_id: Option<String>,
    pub is_tax_exempt: Option<bool>,
    pub is_active: Option<bool>,
    pub is_client_portal_active: Option<bool>,
    pub is_task_fire_active: Option<bool>,
    pub sic_code: Option<String>,
    pub stock_market: Option<String>,
    pub stock_symbol: Option<String>,
    #[serde(rename = "createdByResourceID")]
    pub created_by_resource_id: Option<i64>,
    pub create_date: Option<DateTime<Utc>>,
    pub last_activity_date: Option<DateTime<Utc>>,
    pub last_tracked_modified_date_time: Option<DateTime<Utc>>,
    pub user_defined_fields: Option<Vec<UserDefinedField>>,

    /// Fields returned by the API that this struct does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Company {
    /// Value of a user-defined field.
    pub fn udf(&self, name: &str) -> Option<&str> {
        udf::lookup(&self.user_defined_fields, name)
    }
}

impl Entity for Company {
    const NAME: &'static str = "Company";
    const PATH: &'static str = "Companies";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Create for Company {
    const CREATE_ROUTE: Route = Route::Flat;
}

impl Update for Company {
    const UPDATE_ROUTE: Route = Route::Flat;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::NullPolicy;

    fn sample() -> Value {
        json!({
            "id": 29683490,
            "companyName": "Acme Widgets",
            "companyNumber": "AW-001",
            "companyType": 1,
            "ownerResourceID": 29682885,
            "phone": "555-0100",
            "city": "Springfield",
            "countryID": 237,
            "isActive": true,
            "taxID": "12-3456789",
            "createDate": "2021-02-11T15:47:51.063Z",
            "userDefinedFields": [{"name": "Region", "value": "North"}],
            "surveyCompanyRating": 4.5
        })
    }

    #[test]
    fn test_company_deserialize() {
        let company = Company::from_value(sample()).unwrap();

        assert_eq!(company.id, Some(29683490));
        assert_eq!(company.company_name.as_deref(), Some("Acme Widgets"));
        assert_eq!(company.owner_resource_id, Some(29682885));
        assert_eq!(company.tax_id.as_deref(), Some("12-3456789"));
        assert_eq!(company.is_active, Some(true));
        assert!(company.create_date.is_some());
        assert_eq!(company.udf("Region"), Some("North"));
        assert_eq!(company.extra.get("surveyCompanyRating"), Some(&json!(4.5)));
    }

    #[test]
    fn test_company_round_trip_preserves_populated_fields() {
        let original = sample();
        let company = Company::from_value(original.clone()).unwrap();
        let fields = company.to_fields(NullPolicy::Omit).unwrap();

        assert_eq!(Value::Object(fields), original);
    }
}
