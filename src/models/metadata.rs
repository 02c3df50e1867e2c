//! Entity metadata returned by `entityInformation` endpoints.

use std::ops::Index;

use reqwest::Response;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AutotaskError, Result};

/// Which operations an entity supports and the caller's access to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInformation {
    pub name: String,
    #[serde(default)]
    pub can_create: bool,
    #[serde(default)]
    pub can_update: bool,
    #[serde(default)]
    pub can_delete: bool,
    #[serde(default)]
    pub can_query: bool,
    #[serde(default)]
    pub has_user_defined_fields: bool,
    #[serde(default)]
    pub supports_webhook_callouts: bool,
    #[serde(default)]
    pub user_access_for_create: Option<String>,
    #[serde(default)]
    pub user_access_for_update: Option<String>,
    #[serde(default)]
    pub user_access_for_delete: Option<String>,
    #[serde(default)]
    pub user_access_for_query: Option<String>,
}

impl EntityInformation {
    /// Decode an `{"info": {...}}` body.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::MissingKey`] if `info` is absent.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(mut map) => match map.remove("info") {
                Some(info) => Ok(serde_json::from_value(info)?),
                None => Err(AutotaskError::MissingKey {
                    key: "info",
                    context: "entityInformation",
                }),
            },
            _ => Err(AutotaskError::MissingKey {
                key: "info",
                context: "entityInformation",
            }),
        }
    }

    /// Decode an HTTP response.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be read or decoded.
    pub async fn from_response(response: Response) -> Result<Self> {
        let body = response.bytes().await?;
        Self::from_value(serde_json::from_slice(&body)?)
    }
}

/// One allowed value of a picklist field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicklistValue {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub is_default_value: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub parent_value: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_system: bool,
}

/// Description of one entity field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityField {
    pub name: String,
    pub data_type: String,
    #[serde(default)]
    pub length: i32,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_read_only: bool,
    #[serde(default)]
    pub is_queryable: bool,
    #[serde(default)]
    pub is_reference: bool,
    #[serde(default)]
    pub reference_entity_type: Option<String>,
    #[serde(default)]
    pub is_pick_list: bool,
    #[serde(default)]
    pub picklist_values: Option<Vec<PicklistValue>>,
    #[serde(default)]
    pub picklist_parent_value_field: Option<String>,
    #[serde(default)]
    pub is_supported_webhook_field: bool,
}

impl EntityField {
    /// Label of the picklist entry with the given value.
    pub fn picklist_label(&self, value: &str) -> Option<&str> {
        self.picklist_values
            .as_deref()?
            .iter()
            .find(|p| p.value == value)
            .map(|p| p.label.as_str())
    }
}

/// Field descriptions decoded from an `{"fields": [...]}` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityFieldCollection {
    pub fields: Vec<EntityField>,
}

impl EntityFieldCollection {
    /// Decode an `{"fields": [...]}` body.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::MissingKey`] if `fields` is absent.
    pub fn from_value(value: Value) -> Result<Self> {
        let fields = match value {
            Value::Object(mut map) => map.remove("fields"),
            _ => None,
        }
        .ok_or(AutotaskError::MissingKey {
            key: "fields",
            context: "entityInformation/fields",
        })?;

        Ok(Self {
            fields: serde_json::from_value(fields)?,
        })
    }

    /// Decode an HTTP response.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be read or decoded.
    pub async fn from_response(response: Response) -> Result<Self> {
        let body = response.bytes().await?;
        Self::from_value(serde_json::from_slice(&body)?)
    }

    /// Look up a field by name (case-insensitive).
    pub fn field(&self, name: &str) -> Option<&EntityField> {
        self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Names of fields that must be set on create.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.is_required)
            .map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityField> {
        self.fields.iter()
    }
}

impl Index<usize> for EntityFieldCollection {
    type Output = EntityField;

    fn index(&self, index: usize) -> &EntityField {
        &self.fields[index]
    }
}

impl<'a> IntoIterator for &'a EntityFieldCollection {
    type Item = &'a EntityField;
    type IntoIter = std::slice::Iter<'a, EntityField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
