//! User-defined fields.

use serde::{Deserialize, Serialize};

/// A tenant-specific field carried in `userDefinedFields`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDefinedField {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl UserDefinedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// Value of the UDF called `name`, if present and set.
pub(crate) fn lookup<'a>(fields: &'a Option<Vec<UserDefinedField>>, name: &str) -> Option<&'a str> {
    fields
        .as_deref()?
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(name))
        .and_then(|f| f.value.as_deref())
}
