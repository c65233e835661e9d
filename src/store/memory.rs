//! In-memory store: the reference [`InventoryStore`] implementation.

use crate::error::StoreError;
use crate::model::{BoxPatch, BoxRecord, Location};
use crate::store::InventoryStore;

/// Insertion-ordered in-memory store.
///
/// Backed by plain vectors: at household scale every operation is a linear
/// scan, matching the derived-occupancy model (no reverse index is kept).
#[derive(Debug, Default)]
pub struct MemoryStore {
    boxes: Vec<BoxRecord>,
    locations: Vec<Location>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InventoryStore for MemoryStore {
    fn insert_box(&mut self, record: BoxRecord) -> Result<(), StoreError> {
        if self.boxes.iter().any(|b| b.id == record.id) {
            return Err(StoreError::Backend(format!(
                "box id already exists: {}",
                record.id
            )));
        }
        self.boxes.push(record);
        Ok(())
    }

    fn update_box(&mut self, id: &str, patch: BoxPatch) -> Result<(), StoreError> {
        let record = self
            .boxes
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patch.apply_to(record);
        Ok(())
    }

    fn delete_box(&mut self, id: &str) -> Result<(), StoreError> {
        let len = self.boxes.len();
        self.boxes.retain(|b| b.id != id);
        if self.boxes.len() == len {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn list_boxes(&self) -> Result<Vec<BoxRecord>, StoreError> {
        Ok(self.boxes.clone())
    }

    fn upsert_location(&mut self, code: &str, zone: &str) -> Result<(), StoreError> {
        match self.locations.iter_mut().find(|l| l.code == code) {
            Some(existing) => existing.zone = zone.to_string(),
            None => self.locations.push(Location {
                code: code.to_string(),
                zone: zone.to_string(),
            }),
        }
        Ok(())
    }

    fn delete_location(&mut self, code: &str) -> Result<(), StoreError> {
        let len = self.locations.len();
        self.locations.retain(|l| l.code != code);
        if self.locations.len() == len {
            return Err(StoreError::NotFound(code.to_string()));
        }
        Ok(())
    }

    fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        Ok(self.locations.clone())
    }

    fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
