use serde::Serialize;
use serde_json::{Value, json};

use crate::cutmarks::corner_marks;
use crate::model::Layout;

/// Serialize a whole `Layout` as a JSON object `{ pages, meta }`.
///
/// Per-image records carry the millimeter frame, rotation flag, natural
/// pixel size, and the derived cut marks, so a paginated-document generator
/// can reproduce the geometry without recomputing any of it.
pub fn to_json_array<K: ToString + Clone + Serialize>(layout: &Layout<K>) -> Value {
    let margin = layout.config.image_margin_mm;
    let pages_val = layout
        .pages
        .iter()
        .map(|p| {
            let images_val: Vec<Value> = p
                .images
                .iter()
                .map(|placed| {
                    let b = placed.bounds();
                    let marks: Vec<Value> = corner_marks(&b, margin)
                        .iter()
                        .map(|m| json!({"x1": m.a.x, "y1": m.a.y, "x2": m.b.x, "y2": m.b.y}))
                        .collect();
                    json!({
                        "id": placed.image.id,
                        "source": placed.image.source.to_string(),
                        "frame": {"x": b.x, "y": b.y, "w": b.w, "h": b.h},
                        "rotated": placed.rotated,
                        "naturalSize": {
                            "w": placed.image.natural_width,
                            "h": placed.image.natural_height,
                        },
                        "cutMarks": marks,
                    })
                })
                .collect();
            json!({
                "index": p.index,
                "width": layout.config.width_mm,
                "height": layout.config.height_mm,
                "images": images_val,
            })
        })
        .collect::<Vec<_>>();
    json!({
        "pages": pages_val,
        "meta": {
            "schemaVersion": "1",
            "app": "print-packer",
            "version": env!("CARGO_PKG_VERSION"),
            "units": "mm",
            "pageConfig": &layout.config,
        },
    })
}
