//! Renderer unit adapters.
//!
//! All placement and cut-mark geometry is computed once, in millimeters, by
//! the packing core. The adapters here only convert units and emit markup:
//! an SVG preview of a single page and a print-ready HTML document. Neither
//! recomputes any geometry, so every output surface agrees on positions.

use std::fmt::Write;

use crate::config::PageConfig;
use crate::cutmarks::{CutMark, corner_marks};
use crate::model::{Layout, Page, PointMm, RectMm};

pub const MM_PER_INCH: f64 = 25.4;
/// Stroke width used for cut marks and outlines, millimeters.
pub const CUT_MARK_STROKE_MM: f64 = 0.2;

/// Linear millimeter-to-target-unit conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScale {
    per_mm: f64,
}

impl UnitScale {
    /// Keep millimeters (factor 1.0).
    pub fn identity() -> Self {
        Self { per_mm: 1.0 }
    }
    /// Screen pixels at the given dots-per-inch.
    pub fn dpi(dpi: f64) -> Self {
        Self {
            per_mm: dpi / MM_PER_INCH,
        }
    }
    /// PostScript points (72 per inch), for vector document output.
    pub fn points() -> Self {
        Self {
            per_mm: 72.0 / MM_PER_INCH,
        }
    }
    pub fn factor(&self) -> f64 {
        self.per_mm
    }
    pub fn length(&self, mm: f64) -> f64 {
        mm * self.per_mm
    }
    pub fn point(&self, p: PointMm) -> (f64, f64) {
        (p.x * self.per_mm, p.y * self.per_mm)
    }
    pub fn rect(&self, r: &RectMm) -> (f64, f64, f64, f64) {
        (
            r.x * self.per_mm,
            r.y * self.per_mm,
            r.w * self.per_mm,
            r.h * self.per_mm,
        )
    }
}

/// Renders one page as a standalone SVG document in the target unit system.
///
/// Placed images appear as labeled placeholder boxes; rasterizing actual
/// pixels is the embedding renderer's job.
pub fn page_svg<K: ToString>(page: &Page<K>, config: &PageConfig, scale: UnitScale) -> String {
    let w = scale.length(config.width_mm);
    let h = scale.length(config.height_mm);
    let stroke = scale.length(CUT_MARK_STROKE_MM);

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.2}\" height=\"{h:.2}\" viewBox=\"0 0 {w:.2} {h:.2}\">\n"
    );
    let _ = write!(
        svg,
        "  <rect x=\"0\" y=\"0\" width=\"{w:.2}\" height=\"{h:.2}\" fill=\"#ffffff\" stroke=\"#999999\" stroke-width=\"{stroke:.2}\"/>\n"
    );

    for placed in &page.images {
        let (x, y, bw, bh) = scale.rect(&placed.bounds());
        let _ = write!(
            svg,
            "  <rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{bw:.2}\" height=\"{bh:.2}\" fill=\"#e8e8e8\" stroke=\"#555555\" stroke-width=\"{stroke:.2}\"><title>{}</title></rect>\n",
            placed.image.source.to_string()
        );
        for mark in corner_marks(&placed.bounds(), config.image_margin_mm) {
            let (x1, y1) = scale.point(mark.a);
            let (x2, y2) = scale.point(mark.b);
            let _ = write!(
                svg,
                "  <line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"#000000\" stroke-width=\"{stroke:.2}\"/>\n"
            );
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Renders the whole layout as a print-ready HTML document: one absolutely
/// positioned block per page, one forced page break between pages, all
/// coordinates in CSS millimeters. Page order follows the layout verbatim.
pub fn document_html<K: ToString>(layout: &Layout<K>) -> String {
    let cfg = &layout.config;
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n");
    let _ = write!(
        html,
        "<style>\n@page {{ size: {w}mm {h}mm; margin: 0; }}\nbody {{ margin: 0; }}\n.page {{ position: relative; width: {w}mm; height: {h}mm; overflow: hidden; }}\n.page + .page {{ page-break-before: always; }}\n.img {{ position: absolute; border: {s}mm solid #555; box-sizing: border-box; }}\n.mark {{ position: absolute; background: #000; }}\n</style>\n</head>\n<body>\n",
        w = cfg.width_mm,
        h = cfg.height_mm,
        s = CUT_MARK_STROKE_MM,
    );

    for page in &layout.pages {
        html.push_str("<div class=\"page\">\n");
        for placed in &page.images {
            let b = placed.bounds();
            let _ = write!(
                html,
                "  <div class=\"img\" style=\"left:{:.3}mm;top:{:.3}mm;width:{:.3}mm;height:{:.3}mm;\" title=\"{}\"></div>\n",
                b.x,
                b.y,
                b.w,
                b.h,
                placed.image.source.to_string()
            );
            for mark in corner_marks(&b, cfg.image_margin_mm) {
                html.push_str(&mark_div(&mark));
            }
        }
        html.push_str("</div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// One cut-mark segment as a hairline div. Marks are axis-aligned; the
/// stroke width is centered on the segment.
fn mark_div(mark: &CutMark) -> String {
    let half = CUT_MARK_STROKE_MM / 2.0;
    let (x1, y1) = (mark.a.x.min(mark.b.x), mark.a.y.min(mark.b.y));
    let (x2, y2) = (mark.a.x.max(mark.b.x), mark.a.y.max(mark.b.y));
    let horizontal = (y2 - y1).abs() < (x2 - x1).abs();
    let (left, top, w, h) = if horizontal {
        (x1, y1 - half, x2 - x1, CUT_MARK_STROKE_MM)
    } else {
        (x1 - half, y1, CUT_MARK_STROKE_MM, y2 - y1)
    };
    format!(
        "  <div class=\"mark\" style=\"left:{left:.3}mm;top:{top:.3}mm;width:{w:.3}mm;height:{h:.3}mm;\"></div>\n"
    )
}
