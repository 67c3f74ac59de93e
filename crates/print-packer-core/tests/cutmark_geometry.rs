use print_packer_core::config::PageConfig;
use print_packer_core::cutmarks::{
    CUT_MARK_CLEARANCE_MM, CUT_MARK_LENGTH_MM, corner_marks, page_cut_marks,
};
use print_packer_core::model::{Page, PlacedImage, PrintImage, RectMm};

fn bounds() -> RectMm {
    RectMm::new(50.0, 40.0, 100.0, 80.0)
}

fn seg_len(mark: &print_packer_core::cutmarks::CutMark) -> f64 {
    ((mark.b.x - mark.a.x).powi(2) + (mark.b.y - mark.a.y).powi(2)).sqrt()
}

#[test]
fn zero_margin_emits_no_marks() {
    assert!(corner_marks(&bounds(), 0.0).is_empty());
}

#[test]
fn tiny_margin_emits_no_marks_rather_than_degenerate_segments() {
    // margin/2 - clearance = 0.1, below the visibility threshold
    assert!(corner_marks(&bounds(), 1.2).is_empty());
}

#[test]
fn wide_margin_caps_arm_length_at_default() {
    let marks = corner_marks(&bounds(), 20.0);
    assert_eq!(marks.len(), 8);
    for m in &marks {
        assert!((seg_len(m) - CUT_MARK_LENGTH_MM).abs() < 1e-9);
    }
}

#[test]
fn narrow_margin_shortens_arms() {
    let marks = corner_marks(&bounds(), 4.0);
    assert_eq!(marks.len(), 8);
    let expected = 4.0 / 2.0 - CUT_MARK_CLEARANCE_MM;
    for m in &marks {
        assert!((seg_len(m) - expected).abs() < 1e-9);
    }
}

#[test]
fn marks_stay_within_half_margin_of_the_box() {
    let margin = 6.0;
    let b = bounds();
    for m in corner_marks(&b, margin) {
        for p in [m.a, m.b] {
            let dx = (b.x - p.x).max(p.x - b.right()).max(0.0);
            let dy = (b.y - p.y).max(p.y - b.bottom()).max(0.0);
            assert!(dx <= margin / 2.0 + 1e-9);
            assert!(dy <= margin / 2.0 + 1e-9);
        }
    }
}

#[test]
fn marks_are_axis_aligned_ls_at_each_corner() {
    let marks = corner_marks(&bounds(), 10.0);
    let horizontal = marks
        .iter()
        .filter(|m| m.a.y == m.b.y)
        .count();
    let vertical = marks.iter().filter(|m| m.a.x == m.b.x).count();
    assert_eq!(horizontal, 4);
    assert_eq!(vertical, 4);
}

#[test]
fn marks_sit_clear_of_the_trim_edge() {
    let b = bounds();
    for m in corner_marks(&b, 10.0) {
        if m.a.y == m.b.y {
            // horizontal arms start one clearance outside a vertical edge
            let nearest = (m.a.x.max(m.b.x) - b.x)
                .abs()
                .min((m.a.x.min(m.b.x) - b.right()).abs());
            assert!((nearest - CUT_MARK_CLEARANCE_MM).abs() < 1e-9);
        }
    }
}

#[test]
fn page_marks_flatten_per_image() {
    let cfg = PageConfig::default();
    let img = PrintImage {
        id: 1,
        source: "a.png".to_string(),
        natural_width: 100,
        natural_height: 100,
        width_mm: 50.0,
        height_mm: 50.0,
    };
    let page = Page {
        index: 0,
        images: vec![
            PlacedImage {
                image: img.clone(),
                x_mm: 10.0,
                y_mm: 10.0,
                rotated: false,
            },
            PlacedImage {
                image: PrintImage { id: 2, ..img },
                x_mm: 70.0,
                y_mm: 10.0,
                rotated: false,
            },
        ],
    };
    assert_eq!(page_cut_marks(&page, &cfg).len(), 16);
}
