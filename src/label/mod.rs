//! Label layout engine: deterministic placement of QR-bearing labels on
//! fixed-size printable sheets.
//!
//! The engine never rasterizes anything. It emits an ordered list of draw
//! instructions per page ([`LabelSheet`]); rendering is delegated to an
//! external drawing collaborator through [`LabelRenderer`], or handed over
//! as JSON via [`LabelSheet::to_json`].

pub mod layout;

pub use layout::{layout_box_labels, layout_location_labels, BoxLabelLayout, LocationLabelLayout};

use serde::{Deserialize, Serialize};

/// A single draw instruction. Coordinates are page units (millimetres on
/// the reference printer), origin at the top-left of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawOp {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    Text {
        x: f64,
        y: f64,
        size: f64,
        bold: bool,
        text: String,
    },
    /// The collaborator rasterizes the QR code from the payload string;
    /// the engine only fixes its position and width.
    QrImage {
        x: f64,
        y: f64,
        w: f64,
        payload: String,
    },
}

/// Ordered draw instructions for one physical page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelPage {
    pub ops: Vec<DrawOp>,
}

/// A full print job: one page after another, in label order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelSheet {
    pub pages: Vec<LabelPage>,
}

impl LabelSheet {
    /// Serialize the instruction list for an out-of-process renderer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Drawing collaborator contract.
///
/// Implementations own fonts, QR rasterization and the output document
/// format; the engine only dictates geometry, order and content.
pub trait LabelRenderer {
    fn new_page(&mut self);
    fn draw_rectangle(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn draw_text(&mut self, x: f64, y: f64, size: f64, bold: bool, text: &str);
    fn draw_qr_image(&mut self, x: f64, y: f64, w: f64, payload: &str);
    /// Consume everything drawn so far into the final binary document.
    fn finalize(&mut self) -> Vec<u8>;
}

/// Walk a sheet into a renderer and return the finalized document.
pub fn render<R>(sheet: &LabelSheet, renderer: &mut R) -> Vec<u8>
where
    R: LabelRenderer + ?Sized,
{
    for page in &sheet.pages {
        renderer.new_page();
        for op in &page.ops {
            match op {
                DrawOp::Rect { x, y, w, h } => renderer.draw_rectangle(*x, *y, *w, *h),
                DrawOp::Text {
                    x,
                    y,
                    size,
                    bold,
                    text,
                } => renderer.draw_text(*x, *y, *size, *bold, text),
                DrawOp::QrImage { x, y, w, payload } => {
                    renderer.draw_qr_image(*x, *y, *w, payload)
                }
            }
        }
    }
    renderer.finalize()
}

/// Shared pagination law: item `i` lands on page `i / capacity` at slot
/// `i % capacity`, so `N` items fill `ceil(N / capacity)` pages.
///
/// Both physical formats go through this one helper; `draw_slot` receives
/// the open page, the item and its slot index within the page.
pub fn paginate<T, F>(items: &[T], capacity: usize, mut draw_slot: F) -> LabelSheet
where
    F: FnMut(&mut LabelPage, &T, usize),
{
    debug_assert!(capacity > 0);
    let mut sheet = LabelSheet::default();
    for (i, item) in items.iter().enumerate() {
        if i % capacity == 0 {
            sheet.pages.push(LabelPage::default());
        }
        let page = sheet.pages.last_mut().expect("page opened above");
        draw_slot(page, item, i % capacity);
    }
    sheet
}
