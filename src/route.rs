//! Path templates for write and delete operations.
//!
//! Reads always use the flat `EntityPlural/{id}` path. Writes and deletes
//! follow the vendor's routing, which nests some entities under a parent
//! resource (`Companies/{companyID}/Contacts`).

use crate::error::{AutotaskError, Result};

/// Where a write or delete request for an entity is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `EntityPlural`, or `EntityPlural/{id}` for deletes.
    Flat,
    /// `Parent/{parentID}/Child`, or `Parent/{parentID}/Child/{id}` for deletes.
    Nested {
        parent: &'static str,
        child: &'static str,
    },
}

impl Route {
    /// A route nested under `parent`.
    pub const fn nested(parent: &'static str, child: &'static str) -> Self {
        Self::Nested { parent, child }
    }

    /// Whether the route needs a parent ID.
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested { .. })
    }

    /// Path used by create and update requests.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::MissingParentId`] when the route is nested
    /// and no parent ID is known.
    pub fn collection_path(
        &self,
        entity_type: &'static str,
        entity_path: &str,
        parent_id: Option<i64>,
    ) -> Result<String> {
        match *self {
            Self::Flat => Ok(entity_path.to_string()),
            Self::Nested { parent, child } => {
                let parent_id = parent_id.ok_or(AutotaskError::MissingParentId { entity_type })?;
                Ok(format!("{parent}/{parent_id}/{child}"))
            }
        }
    }

    /// Path used by delete requests.
    ///
    /// # Errors
    ///
    /// Same as [`Route::collection_path`].
    pub fn item_path(
        &self,
        entity_type: &'static str,
        entity_path: &str,
        parent_id: Option<i64>,
        id: i64,
    ) -> Result<String> {
        let base = self.collection_path(entity_type, entity_path, parent_id)?;
        Ok(format!("{base}/{id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_paths_ignore_parent() {
        let route = Route::Flat;
        assert_eq!(
            route.collection_path("Company", "Companies", Some(9)).unwrap(),
            "Companies"
        );
        assert_eq!(
            route
                .item_path("ChangeRequestLink", "ChangeRequestLinks", None, 3)
                .unwrap(),
            "ChangeRequestLinks/3"
        );
    }

    #[test]
    fn test_nested_paths() {
        let route = Route::nested("ServiceCalls", "Tasks");
        assert!(route.is_nested());
        assert_eq!(
            route
                .collection_path("ServiceCallTask", "ServiceCallTasks", Some(10))
                .unwrap(),
            "ServiceCalls/10/Tasks"
        );
        assert_eq!(
            route
                .item_path("ServiceCallTask", "ServiceCallTasks", Some(10), 99)
                .unwrap(),
            "ServiceCalls/10/Tasks/99"
        );
    }

    #[test]
    fn test_nested_without_parent_fails() {
        let route = Route::nested("Companies", "Contacts");
        let err = route.collection_path("Contact", "Contacts", None).unwrap_err();
        assert!(matches!(
            err,
            AutotaskError::MissingParentId {
                entity_type: "Contact"
            }
        ));
    }
}
