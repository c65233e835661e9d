//! Inventory operations: box lifecycle, location allocation, substring
//! search and the warehouse summary.
//!
//! Allocation is advisory, not guaranteed-exclusive: a single household has
//! no concurrent writers, so [`Inventory::allocate`] overwrites
//! unconditionally and surfaces double-booking and dangling location codes
//! as warnings only. [`Inventory::try_allocate`] is the strict variant for
//! anything with more than one writer.

use std::io;

use chrono::Utc;

use crate::config::InventoryConfig;
use crate::error::{InventoryError, StoreError};
use crate::ident;
use crate::model::{
    BoxDraft, BoxPatch, BoxRecord, Location, LOCATION_UNALLOCATED, ZONE_UNDEFINED,
};
use crate::store::InventoryStore;

/// A box occupying a location, as reported by [`Inventory::occupancy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    pub id: String,
    pub name: String,
}

/// One row of the warehouse summary: a location and how many boxes it
/// currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSummary {
    pub code: String,
    pub zone: String,
    pub boxes: usize,
}

/// Count of boxes whose location is empty or the unallocated sentinel.
pub fn count_unallocated(boxes: &[BoxRecord]) -> usize {
    boxes.iter().filter(|b| b.is_unallocated()).count()
}

/// Case-insensitive substring match over the searchable fields of a box:
/// name, description, owner, the three layer texts, zone and location
/// code. `term` must already be lowercased.
fn box_matches(record: &BoxRecord, term: &str) -> bool {
    let fields = [
        &record.name,
        &record.description,
        &record.owner,
        &record.layers[0].text,
        &record.layers[1].text,
        &record.layers[2].text,
        &record.zone,
        &record.location,
    ];
    fields.iter().any(|f| f.to_lowercase().contains(term))
}

/// The inventory service over a storage backend.
pub struct Inventory<S> {
    store: S,
    config: InventoryConfig,
}

impl<S: InventoryStore> Inventory<S> {
    pub fn new(store: S, config: InventoryConfig) -> Self {
        Self { store, config }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Connectivity probe; wakes a sleeping managed backend.
    pub fn ping(&self) -> Result<(), InventoryError> {
        Ok(self.store.ping()?)
    }

    /// The identifier the next registered box will get when the caller
    /// does not choose one.
    pub fn next_box_id(&self) -> Result<String, InventoryError> {
        let boxes = self.store.list_boxes()?;
        Ok(ident::next_box_id(
            boxes.iter().map(|b| b.id.as_str()),
            &self.config.id_prefix,
        ))
    }

    /// Register a new box. The record starts unallocated (sentinel zone
    /// and location) and its creation timestamp is fixed here.
    pub fn register_box(&mut self, draft: BoxDraft) -> Result<BoxRecord, InventoryError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(InventoryError::Validation(
                "box name must not be empty".to_string(),
            ));
        }
        self.validate_owner(&draft.owner)?;

        let boxes = self.store.list_boxes()?;
        let id = match draft.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => {
                let id = id.to_uppercase();
                if boxes.iter().any(|b| b.id == id) {
                    return Err(InventoryError::Validation(format!(
                        "box id already exists: {id}"
                    )));
                }
                id
            }
            _ => ident::next_box_id(
                boxes.iter().map(|b| b.id.as_str()),
                &self.config.id_prefix,
            ),
        };

        let record = BoxRecord {
            id,
            name: name.to_string(),
            description: draft.description,
            owner: draft.owner,
            layers: draft.layers,
            location: LOCATION_UNALLOCATED.to_string(),
            zone: ZONE_UNDEFINED.to_string(),
            created_at: Utc::now(),
        };
        self.store.insert_box(record.clone())?;
        log::info!("registered box {}", record.id);
        Ok(record)
    }

    /// Edit name, description, owner or content layers of an existing box.
    /// Zone and location are owned by the allocation operations and are
    /// ignored here.
    pub fn edit_box(&mut self, id: &str, patch: BoxPatch) -> Result<(), InventoryError> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(InventoryError::Validation(
                    "box name must not be empty".to_string(),
                ));
            }
        }
        if let Some(owner) = &patch.owner {
            self.validate_owner(owner)?;
        }
        let patch = BoxPatch {
            location: None,
            zone: None,
            ..patch
        };
        self.update_box(id, patch)
    }

    /// Hard-delete a box.
    pub fn delete_box(&mut self, id: &str) -> Result<(), InventoryError> {
        match self.store.delete_box(id) {
            Err(StoreError::NotFound(_)) => Err(InventoryError::BoxNotFound(id.to_string())),
            other => Ok(other?),
        }
    }

    /// Move a box to a zone and location, overwriting whatever assignment
    /// it had. Occupancy conflicts and unknown location codes are warned
    /// about, never rejected.
    pub fn allocate(&mut self, id: &str, zone: &str, code: &str) -> Result<(), InventoryError> {
        let (zone, code) = normalize_allocation(zone, code)?;
        let occupants = self.other_occupants(&code, id)?;
        if !occupants.is_empty() {
            let ids: Vec<&str> = occupants.iter().map(|o| o.id.as_str()).collect();
            log::warn!("location {} already holds: {}", code, ids.join(", "));
        }
        if self.resolve_location(&code)?.is_none() {
            log::warn!("location {} has no record; allocating anyway", code);
        }
        self.write_allocation(id, &zone, &code)
    }

    /// Strict allocation: rejects with
    /// [`InventoryError::LocationOccupied`] when the location already
    /// holds another box, unless `force` is set.
    pub fn try_allocate(
        &mut self,
        id: &str,
        zone: &str,
        code: &str,
        force: bool,
    ) -> Result<(), InventoryError> {
        let (zone, code) = normalize_allocation(zone, code)?;
        let occupants = self.other_occupants(&code, id)?;
        if !force && !occupants.is_empty() {
            return Err(InventoryError::LocationOccupied {
                code,
                occupants: occupants.into_iter().map(|o| o.id).collect(),
            });
        }
        self.write_allocation(id, &zone, &code)
    }

    /// Reset a box to the unallocated sentinel state.
    pub fn unallocate(&mut self, id: &str) -> Result<(), InventoryError> {
        self.write_allocation(id, ZONE_UNDEFINED, LOCATION_UNALLOCATED)
    }

    /// Boxes currently stored at `code`. Derived by scanning, not kept as
    /// a reverse index.
    pub fn occupancy(&self, code: &str) -> Result<Vec<Occupant>, InventoryError> {
        let code = code.trim().to_uppercase();
        let boxes = self.store.list_boxes()?;
        Ok(boxes
            .into_iter()
            .filter(|b| b.location == code)
            .map(|b| Occupant {
                id: b.id,
                name: b.name,
            })
            .collect())
    }

    /// Count of boxes not stored anywhere yet (dashboard metric).
    pub fn count_unallocated(&self) -> Result<usize, InventoryError> {
        let boxes = self.store.list_boxes()?;
        Ok(count_unallocated(&boxes))
    }

    /// Look up a location record by code. `None` means the code is
    /// dangling: boxes may still reference it, but it has no row.
    pub fn resolve_location(&self, code: &str) -> Result<Option<Location>, InventoryError> {
        let code = code.trim().to_uppercase();
        let locations = self.store.list_locations()?;
        Ok(locations.into_iter().find(|l| l.code == code))
    }

    /// Create or re-zone a single location.
    pub fn add_location(&mut self, code: &str, zone: &str) -> Result<(), InventoryError> {
        let code = code.trim().to_uppercase();
        let zone = zone.trim();
        if code.is_empty() || zone.is_empty() {
            return Err(InventoryError::Validation(
                "location code and zone are both required".to_string(),
            ));
        }
        Ok(self.store.upsert_location(&code, zone)?)
    }

    /// Delete a location. Boxes referencing it keep their (now dangling)
    /// location code.
    pub fn delete_location(&mut self, code: &str) -> Result<(), InventoryError> {
        let code = code.trim().to_uppercase();
        let still_there = self.occupancy(&code)?;
        if !still_there.is_empty() {
            let ids: Vec<&str> = still_there.iter().map(|o| o.id.as_str()).collect();
            log::warn!(
                "deleting location {} still referenced by: {}",
                code,
                ids.join(", ")
            );
        }
        match self.store.delete_location(&code) {
            Err(StoreError::NotFound(_)) => Err(InventoryError::LocationNotFound(code)),
            other => Ok(other?),
        }
    }

    /// All boxes, in store order.
    pub fn boxes(&self) -> Result<Vec<BoxRecord>, InventoryError> {
        Ok(self.store.list_boxes()?)
    }

    /// All locations, in store order.
    pub fn locations(&self) -> Result<Vec<Location>, InventoryError> {
        Ok(self.store.list_locations()?)
    }

    /// Case-insensitive substring search across name, description, owner,
    /// layer texts, zone and location code. An empty term returns the full
    /// list; result order is store order.
    pub fn search(&self, term: &str) -> Result<Vec<BoxRecord>, InventoryError> {
        let boxes = self.store.list_boxes()?;
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Ok(boxes);
        }
        Ok(boxes.into_iter().filter(|b| box_matches(b, &term)).collect())
    }

    /// Per-location box counts, in location store order. A location with
    /// no boxes reports zero; boxes with dangling codes simply do not
    /// appear.
    pub fn warehouse_summary(&self) -> Result<Vec<LocationSummary>, InventoryError> {
        let boxes = self.store.list_boxes()?;
        let locations = self.store.list_locations()?;
        Ok(locations
            .into_iter()
            .map(|l| {
                let boxes = boxes.iter().filter(|b| b.location == l.code).count();
                LocationSummary {
                    code: l.code,
                    zone: l.zone,
                    boxes,
                }
            })
            .collect())
    }

    /// Write the warehouse summary as CSV (`CODICE,ZONA,SCATOLE PRESENTI`),
    /// the printable shelf list of the original deployment.
    pub fn export_locations_csv<W: io::Write>(&self, writer: W) -> Result<(), InventoryError> {
        let summary = self.warehouse_summary()?;
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(["CODICE", "ZONA", "SCATOLE PRESENTI"])
            .map_err(|e| InventoryError::Export(e.to_string()))?;
        for row in &summary {
            let count = row.boxes.to_string();
            out.write_record([row.code.as_str(), row.zone.as_str(), count.as_str()])
                .map_err(|e| InventoryError::Export(e.to_string()))?;
        }
        out.flush().map_err(|e| InventoryError::Export(e.to_string()))
    }

    fn validate_owner(&self, owner: &str) -> Result<(), InventoryError> {
        if owner.trim().is_empty() {
            return Err(InventoryError::Validation(
                "box owner must not be empty".to_string(),
            ));
        }
        if !self.config.owners.is_empty() && !self.config.owners.iter().any(|o| o == owner) {
            return Err(InventoryError::Validation(format!(
                "unknown owner: {owner}"
            )));
        }
        Ok(())
    }

    /// Occupants of `code` other than the box being moved, so re-allocating
    /// a box to its own slot never conflicts with itself.
    fn other_occupants(&self, code: &str, moving: &str) -> Result<Vec<Occupant>, InventoryError> {
        let mut occupants = self.occupancy(code)?;
        occupants.retain(|o| o.id != moving);
        Ok(occupants)
    }

    fn write_allocation(&mut self, id: &str, zone: &str, code: &str) -> Result<(), InventoryError> {
        self.update_box(
            id,
            BoxPatch {
                zone: Some(zone.to_string()),
                location: Some(code.to_string()),
                ..Default::default()
            },
        )
    }

    fn update_box(&mut self, id: &str, patch: BoxPatch) -> Result<(), InventoryError> {
        match self.store.update_box(id, patch) {
            Err(StoreError::NotFound(_)) => Err(InventoryError::BoxNotFound(id.to_string())),
            other => Ok(other?),
        }
    }
}

/// Trim both allocation fields and uppercase the code; zone and location
/// are set together or not at all.
fn normalize_allocation(zone: &str, code: &str) -> Result<(String, String), InventoryError> {
    let zone = zone.trim();
    let code = code.trim().to_uppercase();
    if zone.is_empty() || code.is_empty() {
        return Err(InventoryError::Validation(
            "zone and location code are both required".to_string(),
        ));
    }
    Ok((zone.to_string(), code))
}
