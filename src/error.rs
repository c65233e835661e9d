//! Error types for the inventory core.
//!
//! Backend failures are converted to typed results at the operation
//! boundary and never retried; every error is recoverable by re-invoking
//! the operation.

use std::fmt;

/// Errors surfaced by the storage backend behind
/// [`InventoryStore`](crate::store::InventoryStore).
#[derive(Debug)]
pub enum StoreError {
    /// Referenced record does not exist in the store.
    NotFound(String),
    /// Backend call failed (network, auth, quota).
    Backend(String),
    /// Backend call exceeded its deadline.
    Timeout(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(key) => write!(f, "Record not found: {key}"),
            StoreError::Backend(s) => write!(f, "Backend error: {s}"),
            StoreError::Timeout(s) => write!(f, "Backend timeout: {s}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors surfaced by the inventory operations.
#[derive(Debug)]
pub enum InventoryError {
    /// Referenced box id does not exist.
    BoxNotFound(String),
    /// Referenced location code does not exist.
    LocationNotFound(String),
    /// Target location already holds other boxes. Only produced by the
    /// strict allocation path; the advisory path logs a warning instead.
    LocationOccupied {
        code: String,
        occupants: Vec<String>,
    },
    /// A required field is missing or malformed. Checked before any store
    /// call.
    Validation(String),
    /// Warehouse export failed while writing rows.
    Export(String),
    /// Storage backend failure, converted at the operation boundary.
    Store(StoreError),
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryError::BoxNotFound(id) => write!(f, "Box not found: {id}"),
            InventoryError::LocationNotFound(code) => {
                write!(f, "Location not found: {code}")
            }
            InventoryError::LocationOccupied { code, occupants } => {
                write!(
                    f,
                    "Location {} already holds: {}",
                    code,
                    occupants.join(", ")
                )
            }
            InventoryError::Validation(s) => write!(f, "Validation error: {s}"),
            InventoryError::Export(s) => write!(f, "Export error: {s}"),
            InventoryError::Store(e) => write!(f, "Store error: {e}"),
        }
    }
}

impl std::error::Error for InventoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InventoryError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for InventoryError {
    fn from(err: StoreError) -> Self {
        InventoryError::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Timeout("list_boxes after 5s".to_string());
        assert!(err.to_string().contains("Backend timeout"));
    }

    #[test]
    fn test_inventory_error_display() {
        let err = InventoryError::LocationOccupied {
            code: "A1-01".to_string(),
            occupants: vec!["SCAT_001".to_string(), "SCAT_002".to_string()],
        };
        let display = err.to_string();
        assert!(display.contains("A1-01"));
        assert!(display.contains("SCAT_001, SCAT_002"));

        let err = InventoryError::Validation("box name must not be empty".to_string());
        assert!(err.to_string().contains("Validation error"));
    }

    #[test]
    fn test_store_error_wrapping() {
        let err: InventoryError = StoreError::Backend("connection refused".to_string()).into();
        assert!(matches!(err, InventoryError::Store(_)));
        assert!(err.to_string().contains("connection refused"));
    }
}
