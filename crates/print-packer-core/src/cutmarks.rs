use serde::{Deserialize, Serialize};

use crate::config::PageConfig;
use crate::model::{Page, PointMm, RectMm};

/// Default arm length of a corner mark.
pub const CUT_MARK_LENGTH_MM: f64 = 5.0;
/// Gap between a trim edge and the start of a mark.
pub const CUT_MARK_CLEARANCE_MM: f64 = 0.5;
/// Arms at or below this length are not worth printing.
pub const CUT_MARK_MIN_VISIBLE_MM: f64 = 0.2;

/// A short trim-mark segment anchored near one corner of a placed image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutMark {
    pub a: PointMm,
    pub b: PointMm,
}

impl CutMark {
    fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            a: PointMm::new(x1, y1),
            b: PointMm::new(x2, y2),
        }
    }
}

/// Corner trim marks for one bounding box: an "L" of two arms per corner,
/// 8 segments total, in the same unit system as `bounds`.
///
/// Arms extend outward, separated from the trim edge by the clearance, and
/// are capped so `clearance + length` never exceeds half the inter-image
/// margin; marks from neighboring images therefore never touch. A margin too
/// small to yield a visible arm produces no marks at all, never zero-length
/// segments.
pub fn corner_marks(bounds: &RectMm, image_margin_mm: f64) -> Vec<CutMark> {
    let len = CUT_MARK_LENGTH_MM.min((image_margin_mm / 2.0 - CUT_MARK_CLEARANCE_MM).max(0.0));
    if len <= CUT_MARK_MIN_VISIBLE_MM {
        return Vec::new();
    }

    let gap = CUT_MARK_CLEARANCE_MM;
    let (x1, y1) = (bounds.x, bounds.y);
    let (x2, y2) = (bounds.right(), bounds.bottom());

    vec![
        // top-left: horizontal, vertical
        CutMark::new(x1 - gap - len, y1, x1 - gap, y1),
        CutMark::new(x1, y1 - gap - len, x1, y1 - gap),
        // top-right
        CutMark::new(x2 + gap, y1, x2 + gap + len, y1),
        CutMark::new(x2, y1 - gap - len, x2, y1 - gap),
        // bottom-left
        CutMark::new(x1 - gap - len, y2, x1 - gap, y2),
        CutMark::new(x1, y2 + gap, x1, y2 + gap + len),
        // bottom-right
        CutMark::new(x2 + gap, y2, x2 + gap + len, y2),
        CutMark::new(x2, y2 + gap, x2, y2 + gap + len),
    ]
}

/// Trim marks for every image on a page, flattened in placement order.
pub fn page_cut_marks<K>(page: &Page<K>, config: &PageConfig) -> Vec<CutMark> {
    page.images
        .iter()
        .flat_map(|placed| corner_marks(&placed.bounds(), config.image_margin_mm))
        .collect()
}
