//! Autotask PSA REST API client library.
//!
//! A Rust library for the Autotask REST API built around a small set of
//! traits: every resource is an [`Entity`], and the operations the API
//! supports for it are opted into with [`Create`], [`Update`], [`Delete`]
//! and [`Describe`]. A generic [`Service`] exposes exactly those
//! operations, so unsupported calls fail to compile.
//!
//! # Quick Start
//!
//! ```no_run
//! use autotask::{AutotaskClient, Company, FilterBuilder, ItemId, Operator};
//!
//! #[tokio::main]
//! async fn main() -> autotask::Result<()> {
//!     // Create client from environment variables
//!     let client = AutotaskClient::from_env()?;
//!
//!     // Fetch a company by ID
//!     let company = client.companies().find_by_id(42).await?;
//!     println!("Company: {:?}", company.company_name);
//!
//!     // Search active companies
//!     let active = client
//!         .companies()
//!         .query()
//!         .filter("isActive", Operator::Eq, true)
//!         .records(50)
//!         .get()
//!         .await?;
//!     println!("Found {} companies", active.len());
//!
//!     // Create one
//!     let response = client
//!         .companies()
//!         .create(&Company {
//!             company_name: Some("Acme".to_string()),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Created #{}", ItemId::from_response(response).await?.item_id);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Routing
//!
//! Reads always use the flat `{Entities}/{id}` path. Some writes are nested
//! under a parent (`Companies/{companyID}/Contacts`); each entity declares its
//! write paths as [`Route`] constants and the parent ID is taken from the
//! entity itself.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `AUTOTASK_USERNAME` (required) - API user name
//! - `AUTOTASK_SECRET` (required) - API user secret
//! - `AUTOTASK_INTEGRATION_CODE` (required) - API tracking identifier
//! - `AUTOTASK_API_URL` (optional) - Zone base URL (defaults to
//!   `https://webservices2.autotask.net/ATServicesRest/V1.0/`)
//! - `AUTOTASK_NULL_POLICY` (optional) - `omit` or `explicit`

pub mod cli;
mod client;
mod collection;
mod config;
mod error;
mod models;
mod output;
mod query;
mod route;
mod service;
mod traits;
mod zone;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::AutotaskClient;
pub use collection::{Collection, PageDetails};
pub use config::{ClientConfig, Credentials, NullPolicy, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use error::{AutotaskError, Result};
pub use output::PrettyPrint;
pub use query::{
    Conjunction, Filter, FilterBuilder, FilterGroup, Operator, QueryBuilder, Search, MAX_RECORDS,
};
pub use route::Route;
pub use service::{
    ChangeRequestLinkCollection, ChangeRequestLinkService, CompanyCollection, CompanyService,
    ContactCollection, ContactService, ContractServiceAdjustmentCollection,
    ContractServiceAdjustmentService, ContractServiceBundleAdjustmentCollection,
    ContractServiceBundleAdjustmentService, ContractTicketPurchaseCollection,
    ContractTicketPurchaseService, ItemId, ResourceRoleCollection, ResourceRoleDepartmentCollection,
    ResourceRoleDepartmentService, ResourceRoleService, Service, ServiceCallTaskCollection,
    ServiceCallTaskService,
};
pub use zone::{ZoneInformation, ZONE_INFORMATION_URL};

// Re-export traits
pub use traits::{Create, Delete, DeleteKey, Describe, Entity, Update};

// Re-export models
pub use models::{
    // Entities
    ChangeRequestLink,
    Company,
    Contact,
    ContractServiceAdjustment,
    ContractServiceBundleAdjustment,
    ContractTicketPurchase,
    ResourceRole,
    ResourceRoleDepartment,
    ServiceCallTask,
    UserDefinedField,
    // Metadata
    EntityField,
    EntityFieldCollection,
    EntityInformation,
    PicklistValue,
};
