//! Delete capability.

use std::fmt::Debug;

use crate::route::Route;
use crate::traits::Entity;

/// Entities the API lets callers remove with `DELETE`.
///
/// Child-scoped entities are keyed by `(parent_id, id)`; flat entities by
/// their ID alone.
pub trait Delete: Entity {
    /// Key identifying the record to delete.
    type Key: DeleteKey + Debug + Send;

    /// Where delete requests are sent.
    const DELETE_ROUTE: Route;
}

/// Identifies one record for a delete request.
pub trait DeleteKey {
    /// Parent resource ID for nested routes.
    fn parent_id(&self) -> Option<i64>;

    /// Record ID.
    fn id(&self) -> i64;
}

impl DeleteKey for i64 {
    fn parent_id(&self) -> Option<i64> {
        None
    }

    fn id(&self) -> i64 {
        *self
    }
}

/// `(parent_id, id)`
impl DeleteKey for (i64, i64) {
    fn parent_id(&self) -> Option<i64> {
        Some(self.0)
    }

    fn id(&self) -> i64 {
        self.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_keys() {
        assert_eq!(42_i64.parent_id(), None);
        assert_eq!(42_i64.id(), 42);
        assert_eq!((10_i64, 99_i64).parent_id(), Some(10));
        assert_eq!((10_i64, 99_i64).id(), 99);
    }
}
