//! Autotask entity types.

mod change_request_link;
mod company;
mod contact;
mod contract_service_adjustment;
mod contract_service_bundle_adjustment;
mod contract_ticket_purchase;
mod metadata;
mod resource_role;
mod resource_role_department;
mod service_call_task;
mod udf;

pub use change_request_link::*;
pub use company::*;
pub use contact::*;
pub use contract_service_adjustment::*;
pub use contract_service_bundle_adjustment::*;
pub use contract_ticket_purchase::*;
pub use metadata::*;
pub use resource_role::*;
pub use resource_role_department::*;
pub use service_call_task::*;
pub use udf::UserDefinedField;
