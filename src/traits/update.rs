//! Update capability.

use crate::route::Route;
use crate::traits::Entity;

/// Entities the API lets callers modify with `PUT`.
///
/// The body must carry the entity ID. Nested routes also need the parent
/// ID populated on the entity.
///
/// # Example
///
/// ```ignore
/// use autotask::{AutotaskClient, Company};
///
/// let client = AutotaskClient::from_env()?;
/// let company = Company {
///     id: Some(12),
///     phone: Some("555-0100".to_string()),
///     ..Default::default()
/// };
/// client.companies().update(&company).await?;
/// ```
pub trait Update: Entity {
    /// Where update requests are sent.
    const UPDATE_ROUTE: Route;
}
