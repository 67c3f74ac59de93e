use print_packer_core::allocate::allocate;
use print_packer_core::config::PageConfig;
use print_packer_core::model::PrintImage;
use print_packer_core::render::{UnitScale, document_html, page_svg};
use print_packer_core::to_json_array;

fn layout_with(count: usize) -> print_packer_core::model::Layout {
    let images: Vec<_> = (0..count)
        .map(|i| PrintImage {
            id: i as u64 + 1,
            source: format!("photo-{i}.jpg"),
            natural_width: 800,
            natural_height: 600,
            width_mm: 80.0,
            height_mm: 60.0,
        })
        .collect();
    allocate(&images, &PageConfig::default()).unwrap()
}

#[test]
fn json_export_carries_frames_and_marks() {
    let layout = layout_with(2);
    let v = to_json_array(&layout);

    assert_eq!(v["meta"]["schemaVersion"], "1");
    assert_eq!(v["meta"]["units"], "mm");
    assert_eq!(v["meta"]["pageConfig"]["width_mm"], 210.0);

    let pages = v["pages"].as_array().unwrap();
    assert_eq!(pages.len(), layout.pages.len());
    let images = pages[0]["images"].as_array().unwrap();
    assert_eq!(images.len(), layout.pages[0].images.len());

    let first = &images[0];
    let placed = &layout.pages[0].images[0];
    let b = placed.bounds();
    assert_eq!(first["frame"]["x"], b.x);
    assert_eq!(first["frame"]["y"], b.y);
    // default 5 mm image margin yields visible marks: 8 per image
    assert_eq!(first["cutMarks"].as_array().unwrap().len(), 8);
}

#[test]
fn unit_scale_conversions() {
    assert_eq!(UnitScale::identity().length(42.0), 42.0);
    assert!((UnitScale::dpi(25.4).length(10.0) - 10.0).abs() < 1e-9);
    assert!((UnitScale::points().length(25.4) - 72.0).abs() < 1e-9);
    let (x, y, w, h) = UnitScale::dpi(50.8).rect(&print_packer_core::RectMm::new(
        10.0, 20.0, 30.0, 40.0,
    ));
    assert_eq!((x, y, w, h), (20.0, 40.0, 60.0, 80.0));
}

#[test]
fn svg_preview_scales_through_unit_transform_only() {
    let layout = layout_with(1);
    let svg = page_svg(&layout.pages[0], &layout.config, UnitScale::identity());

    assert!(svg.starts_with("<svg"));
    // page frame in mm at identity scale
    assert!(svg.contains("width=\"210.00\""));
    assert!(svg.contains("height=\"297.00\""));
    // one placeholder rect per image plus the page background
    assert_eq!(svg.matches("<rect").count(), 1 + layout.pages[0].images.len());
    // 8 cut-mark lines per image
    assert_eq!(
        svg.matches("<line").count(),
        8 * layout.pages[0].images.len()
    );
    assert!(svg.contains("photo-0.jpg"));
}

#[test]
fn html_document_breaks_per_page() {
    let images: Vec<_> = (0..2)
        .map(|i| PrintImage {
            id: i as u64 + 1,
            source: format!("p{i}.png"),
            natural_width: 600,
            natural_height: 900,
            width_mm: 180.0,
            height_mm: 270.0,
        })
        .collect();
    let layout = allocate(&images, &PageConfig::default()).unwrap();
    assert_eq!(layout.pages.len(), 2);

    let html = document_html(&layout);
    assert_eq!(html.matches("<div class=\"page\">").count(), 2);
    assert!(html.contains("page-break-before: always"));
    assert!(html.contains("size: 210mm 297mm"));
    // geometry is emitted in CSS millimeters
    assert!(html.contains("left:10.000mm;top:10.000mm"));
}
