//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{TimeZone, Utc};

use super::state::MockState;
use crate::models::{
    ChangeRequestLink, Company, Contact, ContractServiceAdjustment,
    ContractServiceBundleAdjustment, ContractTicketPurchase, EntityField, EntityInformation,
    PicklistValue, ResourceRole, ResourceRoleDepartment, ServiceCallTask, UserDefinedField,
};
use crate::traits::Entity;

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Entity Fixtures
    // =========================================================================

    /// Create an active company.
    pub fn company(id: i64, name: &str) -> Company {
        Company {
            id: Some(id),
            company_name: Some(name.to_string()),
            company_type: Some(1),
            is_active: Some(true),
            create_date: Utc.with_ymd_and_hms(2023, 6, 1, 9, 0, 0).single(),
            ..Default::default()
        }
    }

    /// Create a company carrying one user-defined field.
    pub fn company_with_udf(id: i64, name: &str, udf: &str, value: &str) -> Company {
        let mut company = Self::company(id, name);
        company.user_defined_fields = Some(vec![UserDefinedField::new(udf, value)]);
        company
    }

    /// Create an active contact at a company.
    pub fn contact(id: i64, company_id: i64, first_name: &str, last_name: &str) -> Contact {
        Contact {
            id: Some(id),
            company_id: Some(company_id),
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            email_address: Some(format!(
                "{}.{}@example.com",
                first_name.to_lowercase(),
                last_name.to_lowercase()
            )),
            is_active: Some(1),
            ..Default::default()
        }
    }

    pub fn contract_ticket_purchase(
        id: i64,
        contract_id: i64,
        purchased: f64,
        used: f64,
    ) -> ContractTicketPurchase {
        ContractTicketPurchase {
            id: Some(id),
            contract_id: Some(contract_id),
            tickets_purchased: Some(purchased),
            tickets_used: Some(used),
            per_ticket_rate: Some(75.0),
            is_paid: Some(true),
            ..Default::default()
        }
    }

    pub fn contract_service_adjustment(
        id: i64,
        contract_id: i64,
        service_id: i64,
        unit_change: i32,
    ) -> ContractServiceAdjustment {
        ContractServiceAdjustment {
            id: Some(id),
            contract_id: Some(contract_id),
            service_id: Some(service_id),
            unit_change: Some(unit_change),
            effective_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single(),
            ..Default::default()
        }
    }

    pub fn resource_role(
        id: i64,
        resource_id: i64,
        role_id: i64,
        department_id: i64,
    ) -> ResourceRole {
        ResourceRole {
            id: Some(id),
            resource_id: Some(resource_id),
            role_id: Some(role_id),
            department_id: Some(department_id),
            is_active: Some(true),
            ..Default::default()
        }
    }

    pub fn resource_role_department(
        id: i64,
        resource_id: i64,
        role_id: i64,
        department_id: i64,
    ) -> ResourceRoleDepartment {
        ResourceRoleDepartment {
            id: Some(id),
            resource_id: Some(resource_id),
            role_id: Some(role_id),
            department_id: Some(department_id),
            is_active: Some(true),
            is_default: Some(true),
            ..Default::default()
        }
    }

    pub fn service_call_task(id: i64, service_call_id: i64, task_id: i64) -> ServiceCallTask {
        ServiceCallTask {
            id: Some(id),
            service_call_id: Some(service_call_id),
            task_id: Some(task_id),
            ..Default::default()
        }
    }

    pub fn change_request_link(
        id: i64,
        change_request_ticket_id: i64,
        problem_or_incident_ticket_id: i64,
    ) -> ChangeRequestLink {
        ChangeRequestLink {
            id: Some(id),
            change_request_ticket_id: Some(change_request_ticket_id),
            problem_or_incident_ticket_id: Some(problem_or_incident_ticket_id),
            ..Default::default()
        }
    }

    // =========================================================================
    // Metadata Fixtures
    // =========================================================================

    /// Capabilities of an entity that supports create, update and query.
    pub fn entity_information<E: Entity>() -> EntityInformation {
        EntityInformation {
            name: E::NAME.to_string(),
            can_create: true,
            can_update: true,
            can_query: true,
            user_access_for_create: Some("All".to_string()),
            user_access_for_update: Some("All".to_string()),
            user_access_for_query: Some("All".to_string()),
            ..Default::default()
        }
    }

    /// Field definitions shared by the contract adjustment entities.
    pub fn adjustment_fields(item_field: &str) -> Vec<EntityField> {
        vec![
            Self::field("id", "long", false, true),
            Self::reference_field("contractID", "Contract"),
            Self::reference_field(item_field, "Service"),
            Self::field("effectiveDate", "datetime", true, false),
            Self::field("unitChange", "integer", true, false),
            Self::field("adjustedUnitPrice", "decimal", false, false),
            EntityField {
                is_pick_list: true,
                picklist_values: Some(vec![
                    PicklistValue {
                        value: "1".to_string(),
                        label: "Monthly".to_string(),
                        is_default_value: true,
                        is_active: true,
                        ..Default::default()
                    },
                    PicklistValue {
                        value: "2".to_string(),
                        label: "Yearly".to_string(),
                        is_active: true,
                        ..Default::default()
                    },
                ]),
                ..Self::field("period", "integer", false, false)
            },
        ]
    }

    fn field(name: &str, data_type: &str, required: bool, read_only: bool) -> EntityField {
        EntityField {
            name: name.to_string(),
            data_type: data_type.to_string(),
            is_required: required,
            is_read_only: read_only,
            is_queryable: true,
            ..Default::default()
        }
    }

    fn reference_field(name: &str, target: &str) -> EntityField {
        EntityField {
            is_reference: true,
            reference_entity_type: Some(target.to_string()),
            ..Self::field(name, "integer", true, false)
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// Create a complete scenario with related entities.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
pub struct DefaultScenario {
    pub companies: Vec<Company>,
    pub contacts: Vec<Contact>,
    pub contract_ticket_purchases: Vec<ContractTicketPurchase>,
    pub contract_service_adjustments: Vec<ContractServiceAdjustment>,
    pub resource_roles: Vec<ResourceRole>,
    pub resource_role_departments: Vec<ResourceRoleDepartment>,
    pub service_call_tasks: Vec<ServiceCallTask>,
    pub change_request_links: Vec<ChangeRequestLink>,
}

impl DefaultScenario {
    fn new() -> Self {
        let mut inactive = Fixtures::company(3, "Initech");
        inactive.is_active = Some(false);

        Self {
            companies: vec![
                Fixtures::company_with_udf(1, "Acme Corporation", "Tier", "Gold"),
                Fixtures::company(2, "Globex"),
                inactive,
            ],
            contacts: vec![
                Fixtures::contact(7, 1, "Ada", "Lovelace"),
                Fixtures::contact(8, 1, "Grace", "Hopper"),
                Fixtures::contact(9, 2, "Alan", "Turing"),
            ],
            contract_ticket_purchases: vec![Fixtures::contract_ticket_purchase(20, 5, 10.0, 3.0)],
            contract_service_adjustments: vec![Fixtures::contract_service_adjustment(70, 5, 3, 2)],
            resource_roles: vec![Fixtures::resource_role(30, 4, 2, 1)],
            resource_role_departments: vec![Fixtures::resource_role_department(40, 4, 2, 1)],
            service_call_tasks: vec![
                Fixtures::service_call_task(99, 10, 500),
                Fixtures::service_call_task(100, 10, 501),
            ],
            change_request_links: vec![Fixtures::change_request_link(60, 700, 701)],
        }
    }

    /// Load the scenario into a fresh state, with metadata for the
    /// describable entities.
    pub fn into_state(self) -> MockState {
        fn load<E: Entity>(state: MockState, entities: &[E]) -> MockState {
            entities.iter().fold(state, MockState::with_entity)
        }

        let state = MockState::new()
            .with_entity_information(
                ContractServiceAdjustment::PATH,
                Fixtures::entity_information::<ContractServiceAdjustment>(),
            )
            .with_entity_fields(
                ContractServiceAdjustment::PATH,
                Fixtures::adjustment_fields("serviceID"),
            )
            .with_entity_information(
                ContractServiceBundleAdjustment::PATH,
                Fixtures::entity_information::<ContractServiceBundleAdjustment>(),
            )
            .with_entity_fields(
                ContractServiceBundleAdjustment::PATH,
                Fixtures::adjustment_fields("serviceBundleID"),
            );

        let state = load(state, &self.companies);
        let state = load(state, &self.contacts);
        let state = load(state, &self.contract_ticket_purchases);
        let state = load(state, &self.contract_service_adjustments);
        let state = load(state, &self.resource_roles);
        let state = load(state, &self.resource_role_departments);
        let state = load(state, &self.service_call_tasks);
        load(state, &self.change_request_links)
    }
}
