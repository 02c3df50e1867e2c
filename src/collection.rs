//! Typed collections decoded from list responses.

use std::ops::Index;

use reqwest::Response;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::client::AutotaskClient;
use crate::error::{AutotaskError, Result};
use crate::traits::Entity;

/// Paging block returned alongside `items` by query endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDetails {
    /// Number of items on this page.
    #[serde(default)]
    pub count: u32,
    /// `MaxRecords` the page was requested with.
    #[serde(default)]
    pub request_count: u32,
    #[serde(default)]
    pub prev_page_url: Option<String>,
    #[serde(default)]
    pub next_page_url: Option<String>,
}

/// An ordered sequence of entities decoded from an `{"items": [...]}` body.
///
/// A body without the `items` key is an error; an empty `items` array is an
/// empty collection.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "E: Serialize")]
pub struct Collection<E> {
    /// The decoded entities, in response order.
    pub items: Vec<E>,
    /// Paging information, when the endpoint supplies it.
    #[serde(rename = "pageDetails", skip_serializing_if = "Option::is_none")]
    pub page_details: Option<PageDetails>,
}

impl<E> Collection<E> {
    /// Build a collection from already-decoded entities.
    #[must_use]
    pub fn new(items: Vec<E>) -> Self {
        Self {
            items,
            page_details: None,
        }
    }

    /// Returns true if the collection has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&E> {
        self.items.get(index)
    }

    /// Returns the first item, if any.
    pub fn first(&self) -> Option<&E> {
        self.items.first()
    }

    /// Returns an iterator over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.items.iter()
    }

    /// Consume the collection, keeping only the items.
    #[must_use]
    pub fn into_vec(self) -> Vec<E> {
        self.items
    }

    /// URL of the next page, if the API reported one.
    pub fn next_page_url(&self) -> Option<&str> {
        self.page_details
            .as_ref()
            .and_then(|d| d.next_page_url.as_deref())
            .filter(|u| !u.is_empty())
    }
}

impl<E: Entity> Collection<E> {
    /// Decode a list response body.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::MissingItemsKey`] if the body has no `items`
    /// key or it is `null`, or a parse error for invalid JSON or undecodable items.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(AutotaskError::MissingItemsKey {
                entity_type: E::NAME,
            });
        };

        let items = match map.remove("items") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => {
                return Err(AutotaskError::MissingItemsKey {
                    entity_type: E::NAME,
                })
            }
            Some(other) => {
                return Err(<serde_json::Error as serde::de::Error>::custom(format!(
                    "expected items array, found {other}"
                ))
                .into())
            }
        };

        let page_details = match map.remove("pageDetails") {
            Some(Value::Null) | None => None,
            Some(details) => Some(serde_json::from_value(details)?),
        };

        Ok(Self {
            items: E::array_of(items)?,
            page_details,
        })
    }

    /// Decode a list response from raw bytes.
    ///
    /// # Errors
    ///
    /// See [`Collection::from_value`].
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Self::from_value(serde_json::from_slice(body)?)
    }

    /// Decode a list response.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be read or decoded.
    pub async fn from_response(response: Response) -> Result<Self> {
        let body = response.bytes().await?;
        Self::from_slice(&body)
    }

    /// Fetch the page after this one.
    ///
    /// Returns `Ok(None)` when the API reported no further page.
    ///
    /// # Errors
    ///
    /// Returns an error if the next page URL is invalid or the request fails.
    pub async fn next_page(&self, client: &AutotaskClient) -> Result<Option<Self>> {
        let Some(next) = self.next_page_url() else {
            return Ok(None);
        };

        let url = Url::parse(next)?;
        let response = client.get_url(url).await?;
        Ok(Some(Self::from_response(response).await?))
    }
}

impl<E> Default for Collection<E> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<E> Index<usize> for Collection<E> {
    type Output = E;

    fn index(&self, index: usize) -> &E {
        &self.items[index]
    }
}

impl<E> IntoIterator for Collection<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a Collection<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<E> FromIterator<E> for Collection<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
