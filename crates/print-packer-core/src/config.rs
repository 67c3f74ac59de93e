use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{LayoutError, Result};

/// Common paper sizes, portrait orientation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PagePreset {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

impl PagePreset {
    /// Page width/height in millimeters.
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            PagePreset::A3 => (297.0, 420.0),
            PagePreset::A4 => (210.0, 297.0),
            PagePreset::A5 => (148.0, 210.0),
            PagePreset::Letter => (215.9, 279.4),
            PagePreset::Legal => (215.9, 355.6),
            PagePreset::Tabloid => (279.4, 431.8),
        }
    }
}

impl FromStr for PagePreset {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a3" => Ok(Self::A3),
            "a4" => Ok(Self::A4),
            "a5" => Ok(Self::A5),
            "letter" => Ok(Self::Letter),
            "legal" => Ok(Self::Legal),
            "tabloid" => Ok(Self::Tabloid),
            _ => Err(()),
        }
    }
}

/// Page geometry configuration. All values are millimeters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageConfig {
    /// Page width in millimeters.
    pub width_mm: f64,
    /// Page height in millimeters.
    pub height_mm: f64,
    /// Margin around the entire page border. Images are placed inside the
    /// printable area `(width - 2*page_margin) x (height - 2*page_margin)`.
    pub page_margin_mm: f64,
    /// Minimum gap between neighboring images.
    pub image_margin_mm: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        let (w, h) = PagePreset::A4.dimensions_mm();
        Self {
            width_mm: w,
            height_mm: h,
            page_margin_mm: 10.0,
            image_margin_mm: 5.0,
        }
    }
}

impl PageConfig {
    /// Width of the printable area.
    pub fn printable_width(&self) -> f64 {
        self.width_mm - 2.0 * self.page_margin_mm
    }

    /// Height of the printable area.
    pub fn printable_height(&self) -> f64 {
        self.height_mm - 2.0 * self.page_margin_mm
    }

    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - Dimensions are non-finite or not positive
    /// - A margin is non-finite or negative
    /// - A margin is not strictly less than half the corresponding page
    ///   dimension (it would leave no printable area)
    pub fn validate(&self) -> Result<()> {
        if !self.width_mm.is_finite()
            || !self.height_mm.is_finite()
            || self.width_mm <= 0.0
            || self.height_mm <= 0.0
        {
            return Err(LayoutError::InvalidDimensions {
                width: self.width_mm,
                height: self.height_mm,
            });
        }

        for (name, margin) in [
            ("page_margin_mm", self.page_margin_mm),
            ("image_margin_mm", self.image_margin_mm),
        ] {
            if !margin.is_finite() || margin < 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{} must be non-negative, got {}",
                    name, margin
                )));
            }
            if margin >= self.width_mm / 2.0 || margin >= self.height_mm / 2.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{} ({}) must be less than half the page dimensions ({}x{})",
                    name, margin, self.width_mm, self.height_mm
                )));
            }
        }

        Ok(())
    }
}

/// Builder for `PageConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PageConfigBuilder {
    cfg: PageConfig,
}

impl PageConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PageConfig::default(),
        }
    }
    pub fn preset(mut self, p: PagePreset) -> Self {
        let (w, h) = p.dimensions_mm();
        self.cfg.width_mm = w;
        self.cfg.height_mm = h;
        self
    }
    pub fn with_dimensions(mut self, width_mm: f64, height_mm: f64) -> Self {
        self.cfg.width_mm = width_mm;
        self.cfg.height_mm = height_mm;
        self
    }
    /// Swap width/height (landscape orientation of a preset).
    pub fn landscape(mut self) -> Self {
        std::mem::swap(&mut self.cfg.width_mm, &mut self.cfg.height_mm);
        self
    }
    pub fn page_margin(mut self, mm: f64) -> Self {
        self.cfg.page_margin_mm = mm;
        self
    }
    pub fn image_margin(mut self, mm: f64) -> Self {
        self.cfg.image_margin_mm = mm;
        self
    }
    pub fn build(self) -> Result<PageConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

impl PageConfig {
    /// Create a fluent builder for `PageConfig`.
    pub fn builder() -> PageConfigBuilder {
        PageConfigBuilder::new()
    }
}
