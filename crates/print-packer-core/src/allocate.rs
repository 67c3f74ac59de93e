use tracing::{debug, instrument};

use crate::config::PageConfig;
use crate::error::{LayoutError, Result};
use crate::model::{GEOM_EPS, Layout, Page, PlacedImage, PrintImage};
use crate::packer::MaxRectsPacker;

/// Distributes `images` across as many pages as needed.
///
/// Images are placed largest-area-first; each page gets one placement pass
/// over the remaining images, requesting footprints inflated by the
/// inter-image margin so placed images are never adjacent without gap. An
/// image too large for the printable area in either orientation is placed
/// alone at the page origin rather than dropped.
///
/// The run is deterministic: identical input (same order, same config)
/// yields an identical layout. Empty input yields a layout with zero pages.
#[instrument(skip_all, fields(images = images.len()))]
pub fn allocate<K: Clone>(images: &[PrintImage<K>], config: &PageConfig) -> Result<Layout<K>> {
    config.validate()?;
    for img in images {
        if !img.width_mm.is_finite()
            || !img.height_mm.is_finite()
            || img.width_mm <= 0.0
            || img.height_mm <= 0.0
        {
            return Err(LayoutError::InvalidImageSize {
                width: img.width_mm,
                height: img.height_mm,
            });
        }
    }
    Ok(allocate_validated(images, config))
}

/// Allocation worker; inputs must already satisfy the boundary invariants.
pub(crate) fn allocate_validated<K: Clone>(
    images: &[PrintImage<K>],
    config: &PageConfig,
) -> Layout<K> {
    let pw = config.printable_width();
    let ph = config.printable_height();
    let margin = config.image_margin_mm;
    let page_margin = config.page_margin_mm;

    // Largest-first ordering dominates packing quality; the stable sort
    // keeps equal-area images in input order for determinism.
    let mut remaining: Vec<usize> = (0..images.len()).collect();
    remaining.sort_by(|&a, &b| images[b].area_mm2().total_cmp(&images[a].area_mm2()));

    let mut pages: Vec<Page<K>> = Vec::new();
    while !remaining.is_empty() {
        let mut packer = MaxRectsPacker::new(pw, ph);
        let mut placed: Vec<PlacedImage<K>> = Vec::new();
        let mut still: Vec<usize> = Vec::new();

        for &idx in &remaining {
            let img = &images[idx];
            match packer.insert(img.width_mm + margin, img.height_mm + margin) {
                Some(pos) => placed.push(PlacedImage {
                    image: img.clone(),
                    x_mm: pos.x + page_margin,
                    y_mm: pos.y + page_margin,
                    rotated: pos.rotated,
                }),
                None => still.push(idx),
            }
        }

        if placed.is_empty() {
            // Head of the remaining list fits neither orientation of the
            // printable area: place it alone at the page origin and force a
            // page boundary. Oversized images are never dropped.
            let idx = still.remove(0);
            let img = &images[idx];
            let fits_normal = img.width_mm <= pw + GEOM_EPS && img.height_mm <= ph + GEOM_EPS;
            let fits_rotated = img.height_mm <= pw + GEOM_EPS && img.width_mm <= ph + GEOM_EPS;
            let rotated = !fits_normal && fits_rotated;
            debug!(
                id = img.id,
                rotated,
                "image exceeds printable area, placing via fallback"
            );
            placed.push(PlacedImage {
                image: img.clone(),
                x_mm: page_margin,
                y_mm: page_margin,
                rotated,
            });
        }

        debug!(
            page = pages.len(),
            placed = placed.len(),
            remaining = still.len(),
            free_rects = packer.free_list_len(),
            "page closed"
        );
        remaining = still;
        pages.push(Page {
            index: pages.len(),
            images: placed,
        });
    }

    Layout {
        pages,
        config: config.clone(),
    }
}
