//! The core entity trait.

use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::NullPolicy;
use crate::error::{AutotaskError, Result};

/// A typed record mirroring one Autotask resource.
///
/// Implementors describe where the resource lives (`PATH`) and how to find
/// the parent ID used by nested routes. Decoding and write-body
/// serialization are provided.
///
/// # Example
///
/// ```
/// use autotask::{Company, Entity, NullPolicy};
///
/// # fn main() -> autotask::Result<()> {
/// let company = Company::from_slice(br#"{"item": {"id": 5, "companyName": "Acme"}}"#)?;
/// assert_eq!(company.id, Some(5));
///
/// let fields = company.to_fields(NullPolicy::Omit)?;
/// assert_eq!(fields.len(), 2);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + Sized + 'static {
    /// Singular entity name, used in errors and logs.
    const NAME: &'static str;

    /// Plural resource path (`Companies`), used for reads and queries.
    const PATH: &'static str;

    /// The entity ID, when populated.
    fn id(&self) -> Option<i64>;

    /// ID of the parent resource for child-scoped entities.
    fn parent_id(&self) -> Option<i64> {
        None
    }

    /// Decode a single entity from a JSON value.
    ///
    /// An object-valued `item` key is unwrapped first; any other value is
    /// decoded as the entity itself.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::MissingKey`] if `item` is `null`, or a parse
    /// error if the value does not match the entity shape.
    fn from_value(value: Value) -> Result<Self> {
        let value = match value {
            Value::Object(mut map) => match map.remove("item") {
                Some(item @ Value::Object(_)) => item,
                Some(Value::Null) => {
                    return Err(AutotaskError::MissingKey {
                        key: "item",
                        context: Self::NAME,
                    })
                }
                Some(other) => {
                    map.insert("item".to_string(), other);
                    Value::Object(map)
                }
                None => Value::Object(map),
            },
            other => other,
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Decode a single entity from a raw response body.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the body is not JSON or has the wrong shape.
    fn from_slice(body: &[u8]) -> Result<Self> {
        Self::from_value(serde_json::from_slice(body)?)
    }

    /// Decode a single entity from an HTTP response.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be read or decoded.
    async fn from_response(response: Response) -> Result<Self> {
        let body = response.bytes().await?;
        Self::from_slice(&body)
    }

    /// Decode every element of an `items` array, preserving order.
    ///
    /// Each element goes through [`Entity::from_value`].
    ///
    /// # Errors
    ///
    /// Fails on the first element that does not decode.
    fn array_of(items: Vec<Value>) -> Result<Vec<Self>> {
        items.into_iter().map(Self::from_value).collect()
    }

    /// Serialize the entity as a field map for a create or update body.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not serialize to a JSON object.
    fn to_fields(&self, policy: NullPolicy) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(mut map) => {
                if policy == NullPolicy::Omit {
                    map.retain(|_, v| !v.is_null());
                }
                Ok(map)
            }
            other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                "{} serialized to {other} instead of an object",
                Self::NAME
            ))
            .into()),
        }
    }
}
