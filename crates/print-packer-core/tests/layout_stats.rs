use print_packer_core::allocate::allocate;
use print_packer_core::config::PageConfig;
use print_packer_core::model::PrintImage;

fn image(id: u64, w: f64, h: f64) -> PrintImage {
    PrintImage {
        id,
        source: format!("img-{id}"),
        natural_width: 400,
        natural_height: 400,
        width_mm: w,
        height_mm: h,
    }
}

#[test]
fn stats_reflect_known_layout() {
    let cfg = PageConfig::default();
    let layout = allocate(&[image(1, 100.0, 100.0)], &cfg).unwrap();
    let stats = layout.stats();

    assert_eq!(stats.num_pages, 1);
    assert_eq!(stats.num_images, 1);
    assert_eq!(stats.num_rotated, 0);
    assert_eq!(stats.num_oversize, 0);
    assert_eq!(stats.used_image_area_mm2, 10_000.0);
    assert_eq!(stats.total_page_area_mm2, 210.0 * 297.0);
    let expected = 10_000.0 / (210.0 * 297.0);
    assert!((stats.occupancy - expected).abs() < 1e-12);
    assert!((stats.wasted_area_mm2() - (210.0 * 297.0 - 10_000.0)).abs() < 1e-9);
}

#[test]
fn stats_count_oversize_fallbacks() {
    let cfg = PageConfig::default();
    let layout = allocate(&[image(1, 300.0, 300.0), image(2, 50.0, 50.0)], &cfg).unwrap();
    let stats = layout.stats();

    assert_eq!(stats.num_pages, 2);
    assert_eq!(stats.num_images, 2);
    assert_eq!(stats.num_oversize, 1);
}

#[test]
fn summary_is_human_readable() {
    let cfg = PageConfig::default();
    let layout = allocate(&[image(1, 80.0, 60.0)], &cfg).unwrap();
    let s = layout.stats().summary();
    assert!(s.contains("Pages: 1"));
    assert!(s.contains("Images: 1"));
    assert!(s.contains('%'));
}

#[test]
fn empty_layout_has_zero_occupancy() {
    let cfg = PageConfig::default();
    let images: Vec<PrintImage> = Vec::new();
    let layout = allocate(&images, &cfg).unwrap();
    let stats = layout.stats();
    assert_eq!(stats.num_pages, 0);
    assert_eq!(stats.occupancy, 0.0);
    assert_eq!(stats.wasted_area_mm2(), 0.0);
}
