//! Per-entity services.
//!
//! [`Service<E>`] maps method calls to HTTP requests for one entity kind.
//! Which methods exist depends on the capability traits `E` implements.

use std::marker::PhantomData;

use reqwest::Response;
use serde_json::Value;

use crate::client::AutotaskClient;
use crate::collection::Collection;
use crate::error::{AutotaskError, Result};
use crate::models::{
    ChangeRequestLink, Company, Contact, ContractServiceAdjustment,
    ContractServiceBundleAdjustment, ContractTicketPurchase, EntityFieldCollection,
    EntityInformation, ResourceRole, ResourceRoleDepartment, ServiceCallTask,
};
use crate::query::QueryBuilder;
use crate::traits::{Create, Delete, DeleteKey, Describe, Entity, Update};

/// Operations for one entity kind, bound to a client.
///
/// # Example
///
/// ```no_run
/// use autotask::{AutotaskClient, Contact};
///
/// # async fn example() -> autotask::Result<()> {
/// let client = AutotaskClient::from_env()?;
/// let contacts = client.contacts();
///
/// // POST Companies/42/Contacts
/// contacts
///     .create(&Contact {
///         company_id: Some(42),
///         first_name: Some("Ada".to_string()),
///         last_name: Some("Lovelace".to_string()),
///         ..Default::default()
///     })
///     .await?;
///
/// // GET Contacts/7
/// let contact = contacts.find_by_id(7).await?;
///
/// // DELETE Companies/42/Contacts/7
/// contacts.delete_by_id((42, 7)).await?;
/// # Ok(())
/// # }
/// ```
pub struct Service<E> {
    client: AutotaskClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Service<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> std::fmt::Debug for Service<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("entity", &E::NAME)
            .field("client", &self.client)
            .finish()
    }
}

impl<E: Entity> Service<E> {
    pub fn new(client: AutotaskClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    /// The client requests are sent through.
    pub fn client(&self) -> &AutotaskClient {
        &self.client
    }

    /// Fetch one record. Always uses the flat `{PATH}/{id}` path, even for
    /// child-scoped entities.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::NotFound`] when the API answers
    /// `{"item": null}`, a parse error for malformed bodies, or the
    /// transport error unchanged.
    #[tracing::instrument(skip(self), fields(entity = E::NAME))]
    pub async fn find_by_id(&self, id: i64) -> Result<E> {
        let path = format!("{}/{id}", E::PATH);
        let response = self.client.get(&path).await?;
        let body: Value = serde_json::from_slice(&response.bytes().await?)?;

        if matches!(body.get("item"), Some(Value::Null)) {
            return Err(AutotaskError::NotFound {
                entity_type: E::NAME,
                id,
            });
        }

        E::from_value(body)
    }

    /// Start a search query for this entity.
    pub fn query(&self) -> QueryBuilder<E> {
        QueryBuilder::new(self.client.clone())
    }
}

impl<E: Create> Service<E> {
    /// Create a record from the entity's populated fields.
    ///
    /// Returns the raw response; use [`ItemId::from_response`] for the new ID.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::MissingParentId`] for nested routes without
    /// a parent ID, or the transport error unchanged.
    #[tracing::instrument(skip(self, entity), fields(entity = E::NAME))]
    pub async fn create(&self, entity: &E) -> Result<Response> {
        let path = E::CREATE_ROUTE.collection_path(E::NAME, E::PATH, entity.parent_id())?;
        let body = entity.to_fields(self.client.null_policy())?;
        self.client.post(&path, &body).await
    }
}

impl<E: Update> Service<E> {
    /// Update a record. The entity must carry its ID.
    ///
    /// # Errors
    ///
    /// Same as [`Service::create`].
    #[tracing::instrument(skip(self, entity), fields(entity = E::NAME, id = ?entity.id()))]
    pub async fn update(&self, entity: &E) -> Result<Response> {
        let path = E::UPDATE_ROUTE.collection_path(E::NAME, E::PATH, entity.parent_id())?;
        let body = entity.to_fields(self.client.null_policy())?;
        self.client.put(&path, &body).await
    }
}

impl<E: Delete> Service<E> {
    /// Delete a record. Child-scoped entities take `(parent_id, id)`.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged.
    #[tracing::instrument(skip(self), fields(entity = E::NAME))]
    pub async fn delete_by_id(&self, key: E::Key) -> Result<()> {
        let path = E::DELETE_ROUTE.item_path(E::NAME, E::PATH, key.parent_id(), key.id())?;
        self.client.delete(&path).await?;
        Ok(())
    }
}

impl<E: Describe> Service<E> {
    /// Describe the entity's fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body lacks `fields`.
    #[tracing::instrument(skip(self), fields(entity = E::NAME))]
    pub async fn get_entity_fields(&self) -> Result<EntityFieldCollection> {
        let path = format!("{}/entityInformation/fields", E::PATH);
        let response = self.client.get(&path).await?;
        EntityFieldCollection::from_response(response).await
    }

    /// Describe which operations the entity supports.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body lacks `info`.
    #[tracing::instrument(skip(self), fields(entity = E::NAME))]
    pub async fn get_entity_information(&self) -> Result<EntityInformation> {
        let path = format!("{}/entityInformation", E::PATH);
        let response = self.client.get(&path).await?;
        EntityInformation::from_response(response).await
    }
}

/// The `{"itemId": n}` body returned by create and update requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemId {
    pub item_id: i64,
}

impl ItemId {
    /// Decode the ID from a raw body.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::MissingKey`] if `itemId` is absent.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        value
            .get("itemId")
            .and_then(Value::as_i64)
            .map(|item_id| Self { item_id })
            .ok_or(AutotaskError::MissingKey {
                key: "itemId",
                context: "write",
            })
    }

    /// Read the ID of the record a create or update touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be read or lacks `itemId`.
    pub async fn from_response(response: Response) -> Result<Self> {
        let body = response.bytes().await?;
        Self::from_slice(&body)
    }
}

pub type CompanyService = Service<Company>;
pub type ContactService = Service<Contact>;
pub type ContractServiceAdjustmentService = Service<ContractServiceAdjustment>;
pub type ContractServiceBundleAdjustmentService = Service<ContractServiceBundleAdjustment>;
pub type ContractTicketPurchaseService = Service<ContractTicketPurchase>;
pub type ResourceRoleDepartmentService = Service<ResourceRoleDepartment>;
pub type ResourceRoleService = Service<ResourceRole>;
pub type ServiceCallTaskService = Service<ServiceCallTask>;
pub type ChangeRequestLinkService = Service<ChangeRequestLink>;

pub type CompanyCollection = Collection<Company>;
pub type ContactCollection = Collection<Contact>;
pub type ContractServiceAdjustmentCollection = Collection<ContractServiceAdjustment>;
pub type ContractServiceBundleAdjustmentCollection = Collection<ContractServiceBundleAdjustment>;
pub type ContractTicketPurchaseCollection = Collection<ContractTicketPurchase>;
pub type ResourceRoleDepartmentCollection = Collection<ResourceRoleDepartment>;
pub type ResourceRoleCollection = Collection<ResourceRole>;
pub type ServiceCallTaskCollection = Collection<ServiceCallTask>;
pub type ChangeRequestLinkCollection = Collection<ChangeRequestLink>;

impl AutotaskClient {
    /// A service for any entity kind.
    pub fn service<E: Entity>(&self) -> Service<E> {
        Service::new(self.clone())
    }

    pub fn companies(&self) -> CompanyService {
        self.service()
    }

    pub fn contacts(&self) -> ContactService {
        self.service()
    }

    pub fn contract_service_adjustments(&self) -> ContractServiceAdjustmentService {
        self.service()
    }

    pub fn contract_service_bundle_adjustments(&self) -> ContractServiceBundleAdjustmentService {
        self.service()
    }

    pub fn contract_ticket_purchases(&self) -> ContractTicketPurchaseService {
        self.service()
    }

    pub fn resource_role_departments(&self) -> ResourceRoleDepartmentService {
        self.service()
    }

    pub fn resource_roles(&self) -> ResourceRoleService {
        self.service()
    }

    pub fn service_call_tasks(&self) -> ServiceCallTaskService {
        self.service()
    }

    pub fn change_request_links(&self) -> ChangeRequestLinkService {
        self.service()
    }
}
