use serde::{Deserialize, Serialize};

use crate::config::PageConfig;

/// Tolerance for millimeter comparisons. Abutting rectangles are not
/// considered intersecting, and a fit short by less than this still fits.
pub const GEOM_EPS: f64 = 1e-6;

/// A point in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMm {
    pub x: f64,
    pub y: f64,
}

impl PointMm {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle (millimeters). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectMm {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl RectMm {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
    /// Exclusive right edge coordinate (`x + w`).
    pub fn right(&self) -> f64 {
        self.x + self.w
    }
    /// Exclusive bottom edge coordinate (`y + h`).
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
    pub fn area(&self) -> f64 {
        self.w * self.h
    }
    /// Returns true if `r` is fully inside `self` (within tolerance).
    pub fn contains(&self, r: &RectMm) -> bool {
        r.x >= self.x - GEOM_EPS
            && r.y >= self.y - GEOM_EPS
            && r.right() <= self.right() + GEOM_EPS
            && r.bottom() <= self.bottom() + GEOM_EPS
    }
    /// Returns true if `self` and `r` overlap by more than the tolerance.
    /// Rectangles that merely share an edge do not intersect.
    pub fn intersects(&self, r: &RectMm) -> bool {
        self.x < r.right() - GEOM_EPS
            && r.x < self.right() - GEOM_EPS
            && self.y < r.bottom() - GEOM_EPS
            && r.y < self.bottom() - GEOM_EPS
    }
}

/// An image to lay out: decoded-image metadata plus its physical print size.
///
/// `source` is an opaque reference (e.g. a path or gallery key); the core
/// never inspects it. Natural dimensions are the source pixel dimensions and
/// carry the aspect ratio; physical dimensions are millimeters on paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintImage<K = String> {
    /// Stable id assigned by the owning model.
    pub id: u64,
    /// User-specified source reference (e.g. filename or asset path).
    pub source: K,
    /// Natural pixel width of the decoded source.
    pub natural_width: u32,
    /// Natural pixel height of the decoded source.
    pub natural_height: u32,
    /// Physical width on paper, millimeters.
    pub width_mm: f64,
    /// Physical height on paper, millimeters.
    pub height_mm: f64,
}

impl<K> PrintImage<K> {
    pub fn area_mm2(&self) -> f64 {
        self.width_mm * self.height_mm
    }
    /// Natural aspect ratio as height over width.
    pub fn natural_aspect(&self) -> f64 {
        self.natural_height as f64 / self.natural_width as f64
    }
}

/// An image committed to a position on a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedImage<K = String> {
    pub image: PrintImage<K>,
    /// Left edge, millimeters relative to the page origin.
    pub x_mm: f64,
    /// Top edge, millimeters relative to the page origin.
    pub y_mm: f64,
    /// True if placed rotated 90°: the footprint is height x width.
    pub rotated: bool,
}

impl<K> PlacedImage<K> {
    /// Occupied width/height in millimeters, post-rotation.
    pub fn footprint(&self) -> (f64, f64) {
        if self.rotated {
            (self.image.height_mm, self.image.width_mm)
        } else {
            (self.image.width_mm, self.image.height_mm)
        }
    }
    /// Bounding box on the page, millimeters.
    pub fn bounds(&self) -> RectMm {
        let (w, h) = self.footprint();
        RectMm::new(self.x_mm, self.y_mm, w, h)
    }
}

/// One physical sheet: an ordered list of placements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<K = String> {
    pub index: usize,
    pub images: Vec<PlacedImage<K>>,
}

/// Result of an allocation run: pages plus the configuration they were
/// computed for. Self-describing enough for any renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout<K = String> {
    pub pages: Vec<Page<K>>,
    pub config: PageConfig,
}

/// Statistics about layout packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Total number of pages.
    pub num_pages: usize,
    /// Total number of placed images.
    pub num_images: usize,
    /// Number of rotated placements.
    pub num_rotated: usize,
    /// Number of placements whose footprint overflows the printable area
    /// (placed via the oversize fallback).
    pub num_oversize: usize,
    /// Sum of page areas, mm².
    pub total_page_area_mm2: f64,
    /// Sum of placed image areas, mm².
    pub used_image_area_mm2: f64,
    /// used_image_area / total_page_area (0.0 to 1.0). Higher is better.
    pub occupancy: f64,
}

impl<K> Layout<K> {
    /// Computes packing statistics for this layout.
    pub fn stats(&self) -> LayoutStats {
        let num_pages = self.pages.len();
        let page_area = self.config.width_mm * self.config.height_mm;
        let total_page_area_mm2 = page_area * num_pages as f64;
        let pw = self.config.printable_width();
        let ph = self.config.printable_height();

        let mut num_images = 0;
        let mut num_rotated = 0;
        let mut num_oversize = 0;
        let mut used_image_area_mm2 = 0.0;
        for page in &self.pages {
            for placed in &page.images {
                num_images += 1;
                used_image_area_mm2 += placed.image.area_mm2();
                if placed.rotated {
                    num_rotated += 1;
                }
                let (w, h) = placed.footprint();
                if w > pw + GEOM_EPS || h > ph + GEOM_EPS {
                    num_oversize += 1;
                }
            }
        }

        let occupancy = if total_page_area_mm2 > 0.0 {
            used_image_area_mm2 / total_page_area_mm2
        } else {
            0.0
        };

        LayoutStats {
            num_pages,
            num_images,
            num_rotated,
            num_oversize,
            total_page_area_mm2,
            used_image_area_mm2,
            occupancy,
        }
    }
}

impl LayoutStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Pages: {}, Images: {}, Occupancy: {:.2}%, Rotated: {}, Oversize: {}",
            self.num_pages,
            self.num_images,
            self.occupancy * 100.0,
            self.num_rotated,
            self.num_oversize,
        )
    }

    /// Returns wasted page area in mm².
    pub fn wasted_area_mm2(&self) -> f64 {
        (self.total_page_area_mm2 - self.used_image_area_mm2).max(0.0)
    }
}
