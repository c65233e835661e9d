//! Canonical data model for boxes ("scatole") and storage locations
//! ("ubicazioni").
//!
//! A box that has not been placed anywhere carries the two sentinel values
//! below instead of a null: zone and location are always both real or both
//! sentinel, never mixed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Zone sentinel for a box whose zone has not been decided yet.
pub const ZONE_UNDEFINED: &str = "DA DEFINIRE";

/// Location sentinel for a box that is not stored anywhere.
pub const LOCATION_UNALLOCATED: &str = "NON ALLOCATA";

/// Number of content layers a box is divided into.
pub const LAYER_COUNT: usize = 3;

/// One content layer of a box: a short text and an optional photo reference.
///
/// The photo reference is opaque to the core (a URL or file name owned by
/// the external image host).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentLayer {
    pub text: String,
    pub photo: Option<String>,
}

/// A box: the primary inventory unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxRecord {
    /// Unique identifier, e.g. `SCAT_001`.
    pub id: String,
    /// Display name; also the payload encoded on the printed QR label.
    pub name: String,
    pub description: String,
    /// One of the configured known users.
    pub owner: String,
    pub layers: [ContentLayer; LAYER_COUNT],
    /// Location code, or [`LOCATION_UNALLOCATED`]. Soft reference: the
    /// matching [`Location`] row may have been deleted.
    pub location: String,
    /// Zone name, or [`ZONE_UNDEFINED`].
    pub zone: String,
    /// Fixed at registration, never updated afterwards.
    pub created_at: DateTime<Utc>,
}

impl BoxRecord {
    /// A box counts as unallocated when its location is empty or the
    /// sentinel value.
    pub fn is_unallocated(&self) -> bool {
        self.location.is_empty() || self.location == LOCATION_UNALLOCATED
    }
}

/// A uniquely coded physical storage slot inside a zone.
///
/// The code is the identity key (uppercased on entry); the zone is a coarse
/// grouping shared by many locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub code: String,
    pub zone: String,
}

/// Input for registering a new box.
///
/// When `id` is `None` (or blank) the service derives the next sequential
/// identifier from the configured prefix.
#[derive(Debug, Clone, Default)]
pub struct BoxDraft {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub owner: String,
    pub layers: [ContentLayer; LAYER_COUNT],
}

/// Partial update for an existing box. `None` fields are left untouched;
/// a `Some` layer replaces the corresponding layer wholesale.
#[derive(Debug, Clone, Default)]
pub struct BoxPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub layers: [Option<ContentLayer>; LAYER_COUNT],
    pub location: Option<String>,
    pub zone: Option<String>,
}

impl BoxPatch {
    /// Apply the patch to a record in place.
    pub fn apply_to(&self, record: &mut BoxRecord) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(description) = &self.description {
            record.description = description.clone();
        }
        if let Some(owner) = &self.owner {
            record.owner = owner.clone();
        }
        for (slot, layer) in self.layers.iter().enumerate() {
            if let Some(layer) = layer {
                record.layers[slot] = layer.clone();
            }
        }
        if let Some(location) = &self.location {
            record.location = location.clone();
        }
        if let Some(zone) = &self.zone {
            record.zone = zone.clone();
        }
    }

    /// True when the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.owner.is_none()
            && self.layers.iter().all(|l| l.is_none())
            && self.location.is_none()
            && self.zone.is_none()
    }
}
