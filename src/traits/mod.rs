//! Trait definitions for Autotask entities.
//!
//! [`Entity`] describes a resource; the capability traits mark which write
//! and metadata operations the API supports for it, so unsupported calls
//! fail to compile instead of failing at runtime.

mod create;
mod delete;
mod describe;
mod entity;
mod update;

pub use create::Create;
pub use delete::{Delete, DeleteKey};
pub use describe::Describe;
pub use entity::Entity;
pub use update::Update;
