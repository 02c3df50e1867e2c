//! Create capability.

use crate::route::Route;
use crate::traits::Entity;

/// Entities the API lets callers create with `POST`.
pub trait Create: Entity {
    /// Where create requests are sent.
    const CREATE_ROUTE: Route;
}
