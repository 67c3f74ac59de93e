use print_packer_core::allocate::allocate;
use print_packer_core::config::{PageConfig, PagePreset};
use print_packer_core::error::LayoutError;
use print_packer_core::model::PrintImage;

#[test]
fn zero_width_is_rejected() {
    let cfg = PageConfig {
        width_mm: 0.0,
        ..Default::default()
    };
    match cfg.validate() {
        Err(LayoutError::InvalidDimensions { width, height }) => {
            assert_eq!(width, 0.0);
            assert_eq!(height, 297.0);
        }
        other => panic!("expected InvalidDimensions, got {other:?}"),
    }
}

#[test]
fn non_finite_dimensions_are_rejected() {
    let cfg = PageConfig {
        height_mm: f64::NAN,
        ..Default::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = PageConfig {
        width_mm: f64::INFINITY,
        ..Default::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn negative_margin_is_rejected() {
    let cfg = PageConfig {
        page_margin_mm: -1.0,
        ..Default::default()
    };
    match cfg.validate() {
        Err(LayoutError::InvalidConfig(msg)) => assert!(msg.contains("page_margin_mm")),
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn margin_at_half_page_dimension_is_rejected() {
    // 105 mm is exactly half the 210 mm width: no printable area remains.
    let cfg = PageConfig {
        page_margin_mm: 105.0,
        ..Default::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = PageConfig {
        image_margin_mm: 105.0,
        ..Default::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn default_config_is_valid() {
    assert!(PageConfig::default().validate().is_ok());
}

#[test]
fn builder_validates_on_build() {
    let err = PageConfig::builder()
        .preset(PagePreset::A5)
        .page_margin(100.0)
        .build();
    assert!(err.is_err());

    let cfg = PageConfig::builder()
        .preset(PagePreset::A3)
        .landscape()
        .page_margin(12.0)
        .image_margin(3.0)
        .build()
        .unwrap();
    assert_eq!(cfg.width_mm, 420.0);
    assert_eq!(cfg.height_mm, 297.0);
}

#[test]
fn presets_parse_case_insensitively() {
    assert_eq!("A4".parse::<PagePreset>(), Ok(PagePreset::A4));
    assert_eq!("letter".parse::<PagePreset>(), Ok(PagePreset::Letter));
    assert!("b5".parse::<PagePreset>().is_err());
}

#[test]
fn invalid_image_size_is_rejected_at_the_allocate_boundary() {
    let cfg = PageConfig::default();
    let images = vec![PrintImage {
        id: 1,
        source: "bad".to_string(),
        natural_width: 100,
        natural_height: 100,
        width_mm: -10.0,
        height_mm: 50.0,
    }];
    match allocate(&images, &cfg) {
        Err(LayoutError::InvalidImageSize { width, .. }) => assert_eq!(width, -10.0),
        other => panic!("expected InvalidImageSize, got {other:?}"),
    }
}

#[test]
fn allocate_rejects_invalid_config() {
    let cfg = PageConfig {
        image_margin_mm: f64::NAN,
        ..Default::default()
    };
    let images: Vec<PrintImage> = Vec::new();
    assert!(allocate(&images, &cfg).is_err());
}
