//! CLI output formatting tests.
//!
//! JSON output must round-trip the wire field names; pretty-print output is
//! a labelled key-value listing.

use autotask::{
    Company, ContractTicketPurchase, EntityInformation, PrettyPrint, ServiceCallTask,
    UserDefinedField, ZoneInformation,
};

fn make_test_company() -> Company {
    Company {
        id: Some(1),
        company_name: Some("Acme Corporation".to_string()),
        company_type: Some(1),
        is_active: Some(true),
        phone: Some("555-0100".to_string()),
        user_defined_fields: Some(vec![UserDefinedField::new("Tier", "Gold")]),
        ..Default::default()
    }
}

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_uses_wire_names() {
    let company = make_test_company();
    let json_output = serde_json::to_string_pretty(&company).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed["id"], 1);
    assert_eq!(parsed["companyName"], "Acme Corporation");
    assert_eq!(parsed["isActive"], true);
    assert_eq!(parsed["userDefinedFields"][0]["name"], "Tier");
}

#[test]
fn test_json_list_outputs_array() {
    let companies = vec![make_test_company(), make_test_company()];
    let json_output = serde_json::to_string_pretty(&companies).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_json_output_keeps_unmodelled_fields() {
    let task: ServiceCallTask = serde_json::from_value(serde_json::json!({
        "id": 99,
        "serviceCallID": 10,
        "taskID": 500,
        "assignedResourceID": 4
    }))
    .unwrap();

    let parsed = serde_json::to_value(&task).unwrap();
    assert_eq!(parsed["assignedResourceID"], 4);
    assert_eq!(parsed["serviceCallID"], 10);
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_default_output_is_not_json() {
    let output = make_test_company().pretty_print();

    let parse_result: Result<serde_json::Value, _> = serde_json::from_str(&output);
    assert!(parse_result.is_err());
}

#[test]
fn test_entity_pretty_print_lists_populated_fields() {
    let output = make_test_company().pretty_print();

    assert!(output.starts_with("Company #1"));
    assert!(output.contains("companyName:    Acme Corporation"));
    assert!(output.contains("phone:          555-0100"));
    assert!(output.contains("udf:Tier:       Gold"));
    assert!(!output.contains("fax"));
}

#[test]
fn test_numeric_fields_pretty_print() {
    let purchase = ContractTicketPurchase {
        id: Some(20),
        contract_id: Some(5),
        tickets_purchased: Some(10.0),
        is_paid: Some(false),
        ..Default::default()
    };

    let output = purchase.pretty_print();
    assert!(output.starts_with("ContractTicketPurchase #20"));
    assert!(output.contains("contractID:     5"));
    assert!(output.contains("isPaid:         false"));
}

#[test]
fn test_entity_information_pretty_print() {
    let info = EntityInformation {
        name: "ContractServiceAdjustment".to_string(),
        can_create: true,
        can_update: true,
        can_query: true,
        ..Default::default()
    };

    let output = info.pretty_print();
    assert!(output.starts_with("Entity: ContractServiceAdjustment"));
    assert!(output.contains("Create:         yes"));
    assert!(output.contains("Delete:         no"));
    assert!(!output.contains("Webhooks"));
}

#[test]
fn test_zone_pretty_print_shows_api_url() {
    let zone = ZoneInformation {
        zone_name: Some("America East 3".to_string()),
        url: "https://webservices15.autotask.net/ATServicesRest".to_string(),
        web_url: Some("https://ww15.autotask.net/".to_string()),
        ci: None,
    };

    let output = zone.pretty_print();
    assert!(
        output.contains("API URL:        https://webservices15.autotask.net/ATServicesRest/V1.0/")
    );
    assert!(output.contains("Web URL:        https://ww15.autotask.net/"));
    assert!(!output.contains("CI:"));
}
