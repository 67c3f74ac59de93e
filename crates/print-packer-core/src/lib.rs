//! Core library for arranging physically-sized images onto printable pages.
//!
//! - Packing: MaxRects free-list packer with Best Short Side Fit and 90°
//!   rotation, one packer per page.
//! - Allocation: `allocate` distributes an image list across as many pages
//!   as needed; oversized images are placed via a deterministic fallback,
//!   never dropped.
//! - Cut marks: corner trim-mark geometry derived once, in millimeters.
//! - `LayoutModel` owns the image list and page configuration and recomputes
//!   the page list on every mutation.
//!
//! All geometry is millimeters; converting to pixels or points is a
//! view-only transform applied by the adapters in [`render`].
//!
//! Quick example:
//! ```
//! use print_packer_core::{LayoutModel, PageConfig};
//!
//! # fn main() -> print_packer_core::Result<()> {
//! let mut model = LayoutModel::new(PageConfig::default())?;
//! model.add_image("holiday.jpg".to_string(), 800, 600)?;
//! model.add_image("portrait.png".to_string(), 600, 800)?;
//! println!("pages: {}", model.pages().len());
//! # Ok(()) }
//! ```

pub mod allocate;
pub mod config;
pub mod cutmarks;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod packer;
pub mod render;

pub use allocate::*;
pub use config::*;
pub use cutmarks::*;
pub use error::*;
pub use export::*;
pub use layout::*;
pub use model::*;
pub use packer::*;
pub use render::*;

/// Convenience prelude for common types and functions.
/// Importing `print_packer_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::allocate::allocate;
    pub use crate::config::{PageConfig, PageConfigBuilder, PagePreset};
    pub use crate::cutmarks::{CutMark, corner_marks, page_cut_marks};
    pub use crate::error::{LayoutError, Result};
    pub use crate::export::to_json_array;
    pub use crate::layout::LayoutModel;
    pub use crate::model::{Layout, LayoutStats, Page, PlacedImage, PointMm, PrintImage, RectMm};
    pub use crate::packer::{MaxRectsPacker, Placement};
    pub use crate::render::{UnitScale, document_html, page_svg};
}
