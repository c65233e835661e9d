//! Geometry and content for the two physical label formats.
//!
//! The pitch and cell constants drifted across printer batches (150 vs 145
//! for the second box label, 48x70 vs 45x65 location cells), so every
//! measurement lives in a layout struct loadable from configuration
//! instead of being hard-coded.

use serde::Deserialize;

use crate::ident::QrPayload;
use crate::label::{paginate, DrawOp, LabelSheet};
use crate::model::{BoxRecord, Location};

/// Layout constants for the large box labels, two per sheet.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoxLabelLayout {
    /// Left edge of the label bounding box.
    pub margin_x: f64,
    /// Top edge of the first label on the page.
    pub origin_y: f64,
    /// Top edge of the second label on the page (the page pitch).
    pub pitch: f64,
    pub width: f64,
    pub height: f64,
    /// QR anchor, relative to the label's top-left corner.
    pub qr_offset_x: f64,
    pub qr_offset_y: f64,
    pub qr_width: f64,
    /// Left edge of the text column, relative to the label's top-left.
    pub text_offset_x: f64,
    pub owner_offset_y: f64,
    pub name_offset_y: f64,
    pub footer_offset_y: f64,
    pub owner_size: f64,
    pub name_size: f64,
    pub footer_size: f64,
}

impl Default for BoxLabelLayout {
    fn default() -> Self {
        Self {
            margin_x: 10.0,
            origin_y: 10.0,
            pitch: 150.0,
            width: 190.0,
            height: 130.0,
            qr_offset_x: 5.0,
            qr_offset_y: 10.0,
            qr_width: 60.0,
            text_offset_x: 70.0,
            owner_offset_y: 20.0,
            name_offset_y: 45.0,
            footer_offset_y: 118.0,
            owner_size: 24.0,
            name_size: 18.0,
            footer_size: 12.0,
        }
    }
}

impl BoxLabelLayout {
    /// Labels per page for this format.
    pub const CAPACITY: usize = 2;

    /// Top edge of the label in slot `slot` (0 or 1).
    fn slot_top(&self, slot: usize) -> f64 {
        if slot == 0 {
            self.origin_y
        } else {
            self.pitch
        }
    }
}

/// Layout constants for the small location labels, 16 per sheet in a 4x4
/// grid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocationLabelLayout {
    pub margin_x: f64,
    pub margin_y: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub columns: usize,
    pub rows: usize,
    /// The drawn border is inset within the cell by this much on the right
    /// and bottom, so adjacent borders do not overlap.
    pub border_inset: f64,
    /// QR anchor, relative to the cell's top-left corner.
    pub qr_offset_x: f64,
    pub qr_offset_y: f64,
    pub qr_width: f64,
    /// Left edge of the two text lines, relative to the cell's top-left.
    pub text_offset_x: f64,
    pub code_offset_y: f64,
    pub zone_offset_y: f64,
    pub code_size: f64,
    pub zone_size: f64,
}

impl Default for LocationLabelLayout {
    fn default() -> Self {
        Self {
            margin_x: 10.0,
            margin_y: 10.0,
            cell_width: 48.0,
            cell_height: 70.0,
            columns: 4,
            rows: 4,
            border_inset: 3.0,
            qr_offset_x: 6.0,
            qr_offset_y: 4.0,
            qr_width: 36.0,
            text_offset_x: 4.0,
            code_offset_y: 48.0,
            zone_offset_y: 60.0,
            code_size: 10.0,
            zone_size: 8.0,
        }
    }
}

impl LocationLabelLayout {
    /// Labels per page for this format.
    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    /// Top-left corner of the cell in slot `slot`.
    fn cell_origin(&self, slot: usize) -> (f64, f64) {
        let column = slot % self.columns;
        let row = slot / self.columns;
        (
            self.margin_x + column as f64 * self.cell_width,
            self.margin_y + row as f64 * self.cell_height,
        )
    }
}

/// Lay out box labels two per page: border, QR (payload = box name), owner
/// uppercased and bold near the top, name below it, description or
/// creation date small at the bottom.
pub fn layout_box_labels(boxes: &[BoxRecord], layout: &BoxLabelLayout) -> LabelSheet {
    let sheet = paginate(boxes, BoxLabelLayout::CAPACITY, |page, b, slot| {
        let x = layout.margin_x;
        let y = layout.slot_top(slot);
        page.ops.push(DrawOp::Rect {
            x,
            y,
            w: layout.width,
            h: layout.height,
        });
        page.ops.push(DrawOp::QrImage {
            x: x + layout.qr_offset_x,
            y: y + layout.qr_offset_y,
            w: layout.qr_width,
            payload: b.qr_payload().to_string(),
        });
        let text_x = x + layout.text_offset_x;
        page.ops.push(DrawOp::Text {
            x: text_x,
            y: y + layout.owner_offset_y,
            size: layout.owner_size,
            bold: true,
            text: b.owner.to_uppercase(),
        });
        page.ops.push(DrawOp::Text {
            x: text_x,
            y: y + layout.name_offset_y,
            size: layout.name_size,
            bold: false,
            text: b.name.clone(),
        });
        let footer = if b.description.trim().is_empty() {
            b.created_at.format("%d/%m/%Y").to_string()
        } else {
            b.description.clone()
        };
        page.ops.push(DrawOp::Text {
            x: text_x,
            y: y + layout.footer_offset_y,
            size: layout.footer_size,
            bold: false,
            text: footer,
        });
    });
    log::debug!(
        "laid out {} box label(s) on {} page(s)",
        boxes.len(),
        sheet.pages.len()
    );
    sheet
}

/// Lay out location labels on a grid: border, QR (payload = location code)
/// near the top of the cell, code bold, zone name smaller below it.
pub fn layout_location_labels(
    locations: &[Location],
    layout: &LocationLabelLayout,
) -> LabelSheet {
    let sheet = paginate(locations, layout.capacity(), |page, l, slot| {
        let (x, y) = layout.cell_origin(slot);
        page.ops.push(DrawOp::Rect {
            x,
            y,
            w: layout.cell_width - layout.border_inset,
            h: layout.cell_height - layout.border_inset,
        });
        page.ops.push(DrawOp::QrImage {
            x: x + layout.qr_offset_x,
            y: y + layout.qr_offset_y,
            w: layout.qr_width,
            payload: l.qr_payload().to_string(),
        });
        let text_x = x + layout.text_offset_x;
        page.ops.push(DrawOp::Text {
            x: text_x,
            y: y + layout.code_offset_y,
            size: layout.code_size,
            bold: true,
            text: l.code.clone(),
        });
        page.ops.push(DrawOp::Text {
            x: text_x,
            y: y + layout.zone_offset_y,
            size: layout.zone_size,
            bold: false,
            text: l.zone.clone(),
        });
    });
    log::debug!(
        "laid out {} location label(s) on {} page(s)",
        locations.len(),
        sheet.pages.len()
    );
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LOCATION_UNALLOCATED, ZONE_UNDEFINED};
    use chrono::Utc;

    fn boxes(n: usize) -> Vec<BoxRecord> {
        (1..=n)
            .map(|i| BoxRecord {
                id: format!("SCAT_{i:03}"),
                name: format!("SCAT_{i:03}"),
                description: String::new(),
                owner: "Victor".to_string(),
                layers: Default::default(),
                location: LOCATION_UNALLOCATED.to_string(),
                zone: ZONE_UNDEFINED.to_string(),
                created_at: Utc::now(),
            })
            .collect()
    }

    fn locations(n: usize) -> Vec<Location> {
        (1..=n)
            .map(|i| Location {
                code: format!("A1-{i:02}"),
                zone: "Garage".to_string(),
            })
            .collect()
    }

    fn rects(sheet: &LabelSheet, page: usize) -> Vec<(f64, f64)> {
        sheet.pages[page]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_box_labels_two_per_page() {
        let layout = BoxLabelLayout::default();
        let sheet = layout_box_labels(&boxes(5), &layout);
        assert_eq!(sheet.pages.len(), 3);
        assert_eq!(rects(&sheet, 0).len(), 2);
        assert_eq!(rects(&sheet, 2).len(), 1);
    }

    #[test]
    fn test_box_label_slot_tops() {
        let layout = BoxLabelLayout::default();
        let sheet = layout_box_labels(&boxes(2), &layout);
        let r = rects(&sheet, 0);
        assert_eq!(r[0], (10.0, 10.0));
        assert_eq!(r[1], (10.0, 150.0));
    }

    #[test]
    fn test_box_label_pitch_is_configurable() {
        let layout = BoxLabelLayout {
            pitch: 145.0,
            height: 125.0,
            ..Default::default()
        };
        let sheet = layout_box_labels(&boxes(2), &layout);
        let r = rects(&sheet, 0);
        assert_eq!(r[1], (10.0, 145.0));
    }

    #[test]
    fn test_box_label_content() {
        let layout = BoxLabelLayout::default();
        let mut input = boxes(1);
        input[0].owner = "Victor".to_string();
        input[0].description = "Ski gear".to_string();
        let sheet = layout_box_labels(&input, &layout);
        let ops = &sheet.pages[0].ops;

        assert!(ops.iter().any(|op| matches!(
            op,
            DrawOp::QrImage { payload, w, .. } if payload == "SCAT_001" && *w == 60.0
        )));
        assert!(ops.iter().any(|op| matches!(
            op,
            DrawOp::Text { text, bold: true, size, .. } if text == "VICTOR" && *size == 24.0
        )));
        assert!(ops
            .iter()
            .any(|op| matches!(op, DrawOp::Text { text, .. } if text == "Ski gear")));
    }

    #[test]
    fn test_box_label_footer_falls_back_to_date() {
        let layout = BoxLabelLayout::default();
        let input = boxes(1);
        let expected = input[0].created_at.format("%d/%m/%Y").to_string();
        let sheet = layout_box_labels(&input, &layout);
        assert!(sheet.pages[0]
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Text { text, .. } if *text == expected)));
    }

    #[test]
    fn test_location_labels_sixteen_per_page() {
        let layout = LocationLabelLayout::default();
        let sheet = layout_location_labels(&locations(20), &layout);
        assert_eq!(sheet.pages.len(), 2);
        assert_eq!(rects(&sheet, 0).len(), 16);
        assert_eq!(rects(&sheet, 1).len(), 4);
    }

    #[test]
    fn test_seventeenth_label_restarts_the_grid() {
        // Item 16 (0-indexed) is the first slot of page 1: row 0, column 0.
        let layout = LocationLabelLayout::default();
        let sheet = layout_location_labels(&locations(17), &layout);
        let r = rects(&sheet, 1);
        assert_eq!(r[0], (layout.margin_x, layout.margin_y));
    }

    #[test]
    fn test_grid_walks_columns_then_rows() {
        let layout = LocationLabelLayout::default();
        let sheet = layout_location_labels(&locations(6), &layout);
        let r = rects(&sheet, 0);
        // Slot 3 ends the first row, slot 4 starts the second.
        assert_eq!(r[3], (10.0 + 3.0 * 48.0, 10.0));
        assert_eq!(r[4], (10.0, 10.0 + 70.0));
        assert_eq!(r[5], (10.0 + 48.0, 10.0 + 70.0));
    }

    #[test]
    fn test_location_cell_content() {
        let layout = LocationLabelLayout::default();
        let sheet = layout_location_labels(&locations(1), &layout);
        let ops = &sheet.pages[0].ops;

        assert!(ops.iter().any(|op| matches!(
            op,
            DrawOp::QrImage { payload, .. } if payload == "A1-01"
        )));
        assert!(ops.iter().any(|op| matches!(
            op,
            DrawOp::Text { text, bold: true, .. } if text == "A1-01"
        )));
        assert!(ops.iter().any(|op| matches!(
            op,
            DrawOp::Text { text, bold: false, .. } if text == "Garage"
        )));
    }

    #[test]
    fn test_alternate_cell_size_shifts_the_grid() {
        let layout = LocationLabelLayout {
            cell_width: 45.0,
            cell_height: 65.0,
            ..Default::default()
        };
        let sheet = layout_location_labels(&locations(6), &layout);
        let r = rects(&sheet, 0);
        assert_eq!(r[4], (10.0, 10.0 + 65.0));
    }
}
