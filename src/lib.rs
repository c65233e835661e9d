//! # Magazzino
//!
//! Household inventory core: boxes ("scatole") with layered contents,
//! stored at coded locations ("ubicazioni") inside zones, identified by QR
//! payloads and printable labels.
//!
//! The crate owns the logic with real invariants (identifier allocation,
//! location assignment, substring search, bulk location import, label
//! sheet layout) and talks to everything else, storage backend and
//! drawing/QR rasterization included, through narrow traits.

pub mod config;
pub mod error;
pub mod ident;
pub mod import;
pub mod inventory;
pub mod label;
pub mod model;
pub mod store;

pub use config::{InventoryConfig, LabelConfig, MagazzinoConfig};
pub use error::{InventoryError, StoreError};
pub use ident::{next_box_id, QrPayload};
pub use import::{import_locations, ImportError, ImportReport};
pub use inventory::{count_unallocated, Inventory, LocationSummary, Occupant};
pub use label::{
    layout_box_labels, layout_location_labels, paginate, render, BoxLabelLayout, DrawOp,
    LabelPage, LabelRenderer, LabelSheet, LocationLabelLayout,
};
pub use model::{
    BoxDraft, BoxPatch, BoxRecord, ContentLayer, Location, LAYER_COUNT, LOCATION_UNALLOCATED,
    ZONE_UNDEFINED,
};
pub use store::{InventoryStore, MemoryStore};
