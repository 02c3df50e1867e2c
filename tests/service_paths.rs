//! Service request tests.
//!
//! Uses wiremock to verify the exact method, path and body every service
//! operation sends.

use autotask::{
    AutotaskClient, AutotaskError, ChangeRequestLink, ClientConfig, Company, Contact,
    ContractServiceAdjustment, ContractServiceBundleAdjustment, ContractTicketPurchase,
    Credentials, ItemId, NullPolicy, ResourceRoleDepartment, ServiceCallTask,
};
use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AutotaskClient {
    AutotaskClient::with_credentials(
        Credentials::new("api@example.com", "test-secret", "TRACKING"),
        &server.uri(),
    )
    .unwrap()
}

fn item_id(id: i64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "itemId": id }))
}

// =============================================================================
// Flat routes
// =============================================================================

#[tokio::test]
async fn test_company_create_posts_field_map() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Companies"))
        .and(header("ApiIntegrationcode", "TRACKING"))
        .and(header("UserName", "api@example.com"))
        .and(header("Secret", "test-secret"))
        .and(body_json(json!({"companyName": "Acme", "companyType": 1})))
        .respond_with(item_id(5))
        .expect(1)
        .mount(&mock_server)
        .await;

    let company = Company {
        company_name: Some("Acme".to_string()),
        company_type: Some(1),
        ..Default::default()
    };
    let response = client_for(&mock_server)
        .companies()
        .create(&company)
        .await
        .unwrap();

    assert_eq!(ItemId::from_response(response).await.unwrap().item_id, 5);
}

#[tokio::test]
async fn test_company_update_puts_to_collection_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/Companies"))
        .and(body_json(json!({"id": 5, "phone": "555-0100"})))
        .respond_with(item_id(5))
        .expect(1)
        .mount(&mock_server)
        .await;

    let company = Company {
        id: Some(5),
        phone: Some("555-0100".to_string()),
        ..Default::default()
    };
    client_for(&mock_server)
        .companies()
        .update(&company)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_change_request_link_create_and_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ChangeRequestLinks"))
        .and(body_json(json!({
            "changeRequestTicketID": 700,
            "problemOrIncidentTicketID": 701
        })))
        .respond_with(item_id(60))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/ChangeRequestLinks/60"))
        .respond_with(item_id(60))
        .expect(1)
        .mount(&mock_server)
        .await;

    let links = client_for(&mock_server).change_request_links();
    links
        .create(&ChangeRequestLink {
            change_request_ticket_id: Some(700),
            problem_or_incident_ticket_id: Some(701),
            ..Default::default()
        })
        .await
        .unwrap();
    links.delete_by_id(60).await.unwrap();
}

#[tokio::test]
async fn test_explicit_null_policy_sends_unset_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ChangeRequestLinks"))
        .and(body_json(json!({
            "id": null,
            "changeRequestTicketID": 700,
            "problemOrIncidentTicketID": null
        })))
        .respond_with(item_id(61))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AutotaskClient::new(
        ClientConfig::new(Credentials::new("api@example.com", "s", "TRACKING"))
            .with_base_url(mock_server.uri())
            .with_null_policy(NullPolicy::Explicit),
    )
    .unwrap();

    client
        .change_request_links()
        .create(&ChangeRequestLink {
            change_request_ticket_id: Some(700),
            ..Default::default()
        })
        .await
        .unwrap();
}

// =============================================================================
// Child-scoped routes
// =============================================================================

#[tokio::test]
async fn test_contact_create_nests_under_company() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Companies/42/Contacts"))
        .and(body_json(json!({
            "companyID": 42,
            "firstName": "Ada",
            "lastName": "Lovelace"
        })))
        .respond_with(item_id(7))
        .expect(1)
        .mount(&mock_server)
        .await;

    let contact = Contact {
        company_id: Some(42),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        ..Default::default()
    };
    let response = client_for(&mock_server)
        .contacts()
        .create(&contact)
        .await
        .unwrap();

    assert_eq!(ItemId::from_response(response).await.unwrap().item_id, 7);
}

#[tokio::test]
async fn test_contact_find_by_id_uses_flat_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Contacts/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": {"id": 7, "companyID": 42, "firstName": "Ada", "isActive": 1}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let contact = client_for(&mock_server)
        .contacts()
        .find_by_id(7)
        .await
        .unwrap();

    assert_eq!(contact.id, Some(7));
    assert_eq!(contact.company_id, Some(42));
    assert_eq!(contact.is_active, Some(1));
}

#[tokio::test]
async fn test_contact_update_and_delete_nest_under_company() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/Companies/42/Contacts"))
        .and(body_json(json!({"id": 7, "companyID": 42, "title": "CTO"})))
        .respond_with(item_id(7))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/Companies/42/Contacts/7"))
        .respond_with(item_id(7))
        .expect(1)
        .mount(&mock_server)
        .await;

    let contacts = client_for(&mock_server).contacts();
    contacts
        .update(&Contact {
            id: Some(7),
            company_id: Some(42),
            title: Some("CTO".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    contacts.delete_by_id((42, 7)).await.unwrap();
}

#[tokio::test]
async fn test_missing_parent_id_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .contacts()
        .create(&Contact {
            first_name: Some("Orphan".to_string()),
            ..Default::default()
        })
        .await;

    assert!(matches!(
        result,
        Err(AutotaskError::MissingParentId {
            entity_type: "Contact"
        })
    ));
}

#[tokio::test]
async fn test_service_call_task_routes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ServiceCalls/10/Tasks"))
        .and(body_json(json!({"serviceCallID": 10, "taskID": 500})))
        .respond_with(item_id(99))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ServiceCallTasks/99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": {"id": 99, "serviceCallID": 10, "taskID": 500}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/ServiceCalls/10/Tasks/99"))
        .respond_with(item_id(99))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tasks = client_for(&mock_server).service_call_tasks();
    tasks
        .create(&ServiceCallTask {
            service_call_id: Some(10),
            task_id: Some(500),
            ..Default::default()
        })
        .await
        .unwrap();

    let task = tasks.find_by_id(99).await.unwrap();
    assert_eq!(task.task_id, Some(500));

    tasks.delete_by_id((10, 99)).await.unwrap();
}

#[tokio::test]
async fn test_contract_ticket_purchase_routes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Contracts/5/TicketPurchases"))
        .and(body_json(json!({"contractID": 5, "ticketsPurchased": 10.0})))
        .respond_with(item_id(20))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/Contracts/5/TicketPurchases"))
        .and(body_json(json!({"id": 20, "contractID": 5, "isPaid": true})))
        .respond_with(item_id(20))
        .expect(1)
        .mount(&mock_server)
        .await;

    let purchases = client_for(&mock_server).contract_ticket_purchases();
    purchases
        .create(&ContractTicketPurchase {
            contract_id: Some(5),
            tickets_purchased: Some(10.0),
            ..Default::default()
        })
        .await
        .unwrap();
    purchases
        .update(&ContractTicketPurchase {
            id: Some(20),
            contract_id: Some(5),
            is_paid: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_resource_role_department_routes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Resources/4/RoleDepartments"))
        .respond_with(item_id(40))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/Resources/4/RoleDepartments"))
        .and(body_json(json!({"id": 40, "resourceID": 4, "isDefault": false})))
        .respond_with(item_id(40))
        .expect(1)
        .mount(&mock_server)
        .await;

    let departments = client_for(&mock_server).resource_role_departments();
    departments
        .create(&ResourceRoleDepartment {
            resource_id: Some(4),
            role_id: Some(2),
            department_id: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    departments
        .update(&ResourceRoleDepartment {
            id: Some(40),
            resource_id: Some(4),
            is_default: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
}

// =============================================================================
// Adjustments: nested create, flat update, metadata
// =============================================================================

#[tokio::test]
async fn test_service_adjustment_create_nested_update_flat() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Contracts/5/ServiceAdjustments"))
        .and(body_json(json!({"contractID": 5, "serviceID": 3, "unitChange": 2})))
        .respond_with(item_id(70))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/ContractServiceAdjustments"))
        .and(body_json(json!({"id": 70, "contractID": 5, "unitChange": 4})))
        .respond_with(item_id(70))
        .expect(1)
        .mount(&mock_server)
        .await;

    let adjustments = client_for(&mock_server).contract_service_adjustments();
    adjustments
        .create(&ContractServiceAdjustment {
            contract_id: Some(5),
            service_id: Some(3),
            unit_change: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    adjustments
        .update(&ContractServiceAdjustment {
            id: Some(70),
            contract_id: Some(5),
            unit_change: Some(4),
            ..Default::default()
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_bundle_adjustment_routes_and_metadata() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Contracts/5/ServiceBundleAdjustments"))
        .respond_with(item_id(71))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/ContractServiceBundleAdjustments"))
        .respond_with(item_id(71))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ContractServiceBundleAdjustments/entityInformation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": {
                "name": "ContractServiceBundleAdjustment",
                "canCreate": true,
                "canUpdate": true,
                "canDelete": false,
                "canQuery": true,
                "hasUserDefinedFields": false
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ContractServiceBundleAdjustments/entityInformation/fields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fields": [
                {"name": "id", "dataType": "long", "isReadOnly": true},
                {"name": "contractID", "dataType": "integer", "isRequired": true,
                 "isReference": true, "referenceEntityType": "Contract"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let adjustments = client_for(&mock_server).contract_service_bundle_adjustments();
    adjustments
        .create(&ContractServiceBundleAdjustment {
            contract_id: Some(5),
            service_bundle_id: Some(8),
            ..Default::default()
        })
        .await
        .unwrap();
    adjustments
        .update(&ContractServiceBundleAdjustment {
            id: Some(71),
            contract_id: Some(5),
            ..Default::default()
        })
        .await
        .unwrap();

    let info = adjustments.get_entity_information().await.unwrap();
    assert!(info.can_create);
    assert!(!info.can_delete);

    let fields = adjustments.get_entity_fields().await.unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields.required().collect::<Vec<_>>(), vec!["contractID"]);
}

#[tokio::test]
async fn test_entity_fields_without_envelope_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ContractServiceAdjustments/entityInformation/fields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .contract_service_adjustments()
        .get_entity_fields()
        .await;

    assert!(matches!(
        result,
        Err(AutotaskError::MissingKey { key: "fields", .. })
    ));
}

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn test_null_item_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Companies/404"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item": null})))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).companies().find_by_id(404).await;

    assert!(matches!(
        result,
        Err(AutotaskError::NotFound {
            entity_type: "Company",
            id: 404
        })
    ));
}

#[tokio::test]
async fn test_api_errors_are_joined() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Companies"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": ["companyName is required", "companyType is required"]
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .companies()
        .create(&Company::default())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert!(err.is_transport());
    match err {
        AutotaskError::ApiError { message, .. } => {
            assert_eq!(message, "companyName is required; companyType is required");
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_reports_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ResourceRoles/30"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).resource_roles().find_by_id(30).await;

    assert!(matches!(
        result,
        Err(AutotaskError::RateLimited {
            retry_after_secs: Some(30)
        })
    ));
}

#[tokio::test]
async fn test_malformed_item_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Companies/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": {"id": "one"}
        })))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).companies().find_by_id(1).await;

    assert!(matches!(result, Err(AutotaskError::ParseError(_))));
}
