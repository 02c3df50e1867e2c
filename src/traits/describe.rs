//! Metadata capability.

use crate::traits::Entity;

/// Entities whose `entityInformation` and `entityInformation/fields`
/// endpoints are exposed.
pub trait Describe: Entity {}
