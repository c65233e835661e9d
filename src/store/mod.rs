//! Storage contract consumed by the inventory core.
//!
//! The persistent backend (a managed relational service in the original
//! deployment) is an external collaborator: the core depends on it only
//! through the narrow [`InventoryStore`] contract below. [`MemoryStore`]
//! is the insertion-ordered reference implementation used by tests and by
//! single-user standalone setups.

pub mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::model::{BoxPatch, BoxRecord, Location};

/// Narrow read/write contract over the box and location tables.
///
/// Calls are synchronous and assume a single writer. Implementations that
/// talk to a network backend should wrap each call with a deadline and
/// report expiry as [`StoreError::Timeout`] rather than hanging; the
/// memory store never emits it.
///
/// Listing order is the store's insertion order and is observable: search
/// results and label sheets preserve it.
pub trait InventoryStore {
    /// Insert a fully-formed box record. The id must be unique.
    fn insert_box(&mut self, record: BoxRecord) -> Result<(), StoreError>;

    /// Apply a partial update to the box with the given id.
    fn update_box(&mut self, id: &str, patch: BoxPatch) -> Result<(), StoreError>;

    /// Hard-delete a box. No tombstone is kept.
    fn delete_box(&mut self, id: &str) -> Result<(), StoreError>;

    /// All boxes, in insertion order.
    fn list_boxes(&self) -> Result<Vec<BoxRecord>, StoreError>;

    /// Insert the location if the code is new, otherwise overwrite its zone.
    fn upsert_location(&mut self, code: &str, zone: &str) -> Result<(), StoreError>;

    /// Hard-delete a location. Does not cascade to boxes referencing it.
    fn delete_location(&mut self, code: &str) -> Result<(), StoreError>;

    /// All locations, in insertion order.
    fn list_locations(&self) -> Result<Vec<Location>, StoreError>;

    /// Connectivity probe; wakes sleeping managed backends.
    fn ping(&self) -> Result<(), StoreError>;
}
