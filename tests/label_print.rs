//! Driving the label layout engine the way the print page does: select
//! records, lay them out, hand the sheet to a drawing collaborator.

use magazzino::{
    layout_box_labels, layout_location_labels, render, BoxDraft, DrawOp, Inventory,
    InventoryConfig, LabelRenderer, LabelSheet, MagazzinoConfig, MemoryStore,
};

/// Minimal drawing collaborator: renders every instruction as one line of
/// text, which is enough to check ordering and content end to end.
#[derive(Default)]
struct PlainTextRenderer {
    lines: Vec<String>,
    pages: usize,
}

impl LabelRenderer for PlainTextRenderer {
    fn new_page(&mut self) {
        self.pages += 1;
        self.lines.push(format!("--- page {} ---", self.pages));
    }
    fn draw_rectangle(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.lines.push(format!("rect ({x},{y}) {w}x{h}"));
    }
    fn draw_text(&mut self, _x: f64, _y: f64, size: f64, bold: bool, text: &str) {
        let weight = if bold { "bold" } else { "regular" };
        self.lines.push(format!("text[{size} {weight}] {text}"));
    }
    fn draw_qr_image(&mut self, _x: f64, _y: f64, w: f64, payload: &str) {
        self.lines.push(format!("qr[{w}] {payload}"));
    }
    fn finalize(&mut self) -> Vec<u8> {
        self.lines.join("\n").into_bytes()
    }
}

fn seeded_inventory(boxes: usize, locations: usize) -> Inventory<MemoryStore> {
    let mut inv = Inventory::new(MemoryStore::new(), InventoryConfig::default());
    for i in 1..=locations {
        inv.add_location(&format!("A1-{i:02}"), "Garage").unwrap();
    }
    for i in 1..=boxes {
        inv.register_box(BoxDraft {
            name: format!("Box {i}"),
            owner: "Victor".to_string(),
            ..Default::default()
        })
        .unwrap();
    }
    inv
}

#[test]
fn test_box_label_print_job() {
    let cfg = MagazzinoConfig::default();
    let inv = seeded_inventory(5, 0);

    let boxes = inv.boxes().unwrap();
    let sheet = layout_box_labels(&boxes, &cfg.labels.boxes);
    assert_eq!(sheet.pages.len(), 3);

    let mut renderer = PlainTextRenderer::default();
    let doc = String::from_utf8(render(&sheet, &mut renderer)).unwrap();

    assert_eq!(renderer.pages, 3);
    // Owner uppercased and bold, QR payload is the box name.
    assert!(doc.contains("text[24 bold] VICTOR"));
    assert!(doc.contains("qr[60] Box 1"));
    assert!(doc.contains("qr[60] Box 5"));
    // Two labels on the first page, one on the last.
    let first_page = doc.split("--- page 2 ---").next().unwrap();
    assert_eq!(first_page.matches("rect").count(), 2);
    let last_page = doc.split("--- page 3 ---").nth(1).unwrap();
    assert_eq!(last_page.matches("rect").count(), 1);
}

#[test]
fn test_location_label_print_job() {
    let cfg = MagazzinoConfig::default();
    let inv = seeded_inventory(0, 20);

    let locations = inv.locations().unwrap();
    let sheet = layout_location_labels(&locations, &cfg.labels.locations);
    assert_eq!(sheet.pages.len(), 2);

    let mut renderer = PlainTextRenderer::default();
    let doc = String::from_utf8(render(&sheet, &mut renderer)).unwrap();

    assert_eq!(renderer.pages, 2);
    assert!(doc.contains("text[10 bold] A1-01"));
    assert!(doc.contains("text[8 regular] Garage"));
    assert!(doc.contains("qr[36] A1-20"));
}

#[test]
fn test_selected_subset_prints_in_selection_order() {
    let inv = seeded_inventory(4, 0);
    let cfg = MagazzinoConfig::default();

    // The UI passes whatever the user ticked, in that order.
    let all = inv.boxes().unwrap();
    let selection = vec![all[2].clone(), all[0].clone()];
    let sheet = layout_box_labels(&selection, &cfg.labels.boxes);

    assert_eq!(sheet.pages.len(), 1);
    let payloads: Vec<&str> = sheet.pages[0]
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::QrImage { payload, .. } => Some(payload.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(payloads, vec!["Box 3", "Box 1"]);
}

#[test]
fn test_sheet_json_round_trips_for_external_renderers() {
    let inv = seeded_inventory(1, 0);
    let cfg = MagazzinoConfig::default();
    let sheet = layout_box_labels(&inv.boxes().unwrap(), &cfg.labels.boxes);

    let json = sheet.to_json().unwrap();
    let parsed: LabelSheet = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, sheet);
}
