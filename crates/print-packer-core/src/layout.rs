use crate::allocate::allocate_validated;
use crate::config::PageConfig;
use crate::error::{LayoutError, Result};
use crate::model::{Layout, Page, PrintImage};

/// Physical width assigned to a newly added image; height follows the
/// natural aspect ratio.
pub const DEFAULT_IMAGE_WIDTH_MM: f64 = 100.0;

/// Owns the image list and page configuration, and recomputes the full page
/// layout on every mutation.
///
/// Recomputation is synchronous and deterministic; there is no incremental
/// update. The `generation` counter increments with every recompute so
/// renderers can capture it at render start and discard results that finish
/// after the layout has moved on.
pub struct LayoutModel<K = String> {
    images: Vec<PrintImage<K>>,
    config: PageConfig,
    layout: Layout<K>,
    current_page: usize,
    generation: u64,
    next_id: u64,
}

impl<K: Clone> LayoutModel<K> {
    pub fn new(config: PageConfig) -> Result<Self> {
        config.validate()?;
        let layout = Layout {
            pages: Vec::new(),
            config: config.clone(),
        };
        Ok(Self {
            images: Vec::new(),
            config,
            layout,
            current_page: 0,
            generation: 0,
            next_id: 1,
        })
    }

    /// Adds an image with the default physical width and an aspect-derived
    /// height, and returns its id. Natural dimensions must be non-zero.
    pub fn add_image(&mut self, source: K, natural_width: u32, natural_height: u32) -> Result<u64> {
        if natural_width == 0 || natural_height == 0 {
            return Err(LayoutError::InvalidImageSize {
                width: natural_width as f64,
                height: natural_height as f64,
            });
        }
        let id = self.next_id;
        self.next_id += 1;
        let width_mm = DEFAULT_IMAGE_WIDTH_MM;
        let height_mm = width_mm * natural_height as f64 / natural_width as f64;
        self.images.push(PrintImage {
            id,
            source,
            natural_width,
            natural_height,
            width_mm,
            height_mm,
        });
        self.recompute();
        Ok(id)
    }

    /// Resizes one image.
    ///
    /// With `maintain_aspect` and a single supplied axis, the other axis is
    /// derived from the natural aspect ratio. With both supplied, the axis
    /// that differs from the stored value is authoritative (width wins when
    /// both differ). Invalid values are rejected and the previous size kept.
    pub fn resize_image(
        &mut self,
        id: u64,
        new_width: Option<f64>,
        new_height: Option<f64>,
        maintain_aspect: bool,
    ) -> Result<()> {
        for v in new_width.iter().chain(new_height.iter()) {
            if !v.is_finite() || *v <= 0.0 {
                return Err(LayoutError::InvalidImageSize {
                    width: new_width.unwrap_or(0.0),
                    height: new_height.unwrap_or(0.0),
                });
            }
        }
        let img = self
            .images
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(LayoutError::UnknownImage(id))?;
        let aspect = img.natural_aspect();

        match (new_width, new_height, maintain_aspect) {
            (Some(w), None, true) => {
                img.width_mm = w;
                img.height_mm = w * aspect;
            }
            (None, Some(h), true) => {
                img.height_mm = h;
                img.width_mm = h / aspect;
            }
            (Some(w), Some(h), true) => {
                if w != img.width_mm {
                    img.width_mm = w;
                    img.height_mm = w * aspect;
                } else if h != img.height_mm {
                    img.height_mm = h;
                    img.width_mm = h / aspect;
                }
            }
            (w, h, false) => {
                if let Some(w) = w {
                    img.width_mm = w;
                }
                if let Some(h) = h {
                    img.height_mm = h;
                }
            }
            (None, None, true) => {}
        }
        self.recompute();
        Ok(())
    }

    pub fn remove_image(&mut self, id: u64) -> Result<()> {
        let pos = self
            .images
            .iter()
            .position(|i| i.id == id)
            .ok_or(LayoutError::UnknownImage(id))?;
        self.images.remove(pos);
        self.recompute();
        Ok(())
    }

    /// Replaces the page configuration. An invalid configuration is rejected
    /// and the previous one stays in effect.
    pub fn set_page_config(&mut self, config: PageConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        self.layout = allocate_validated(&self.images, &self.config);
        let max_page = self.layout.pages.len().saturating_sub(1);
        self.current_page = self.current_page.min(max_page);
        self.generation += 1;
    }

    pub fn images(&self) -> &[PrintImage<K>] {
        &self.images
    }
    pub fn config(&self) -> &PageConfig {
        &self.config
    }
    pub fn layout(&self) -> &Layout<K> {
        &self.layout
    }
    pub fn pages(&self) -> &[Page<K>] {
        &self.layout.pages
    }

    /// Currently displayed page index, always within `[0, pages-1]` (0 when
    /// the layout is empty).
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Sets the current page, clamped to the existing page range.
    pub fn set_current_page(&mut self, index: usize) {
        let max_page = self.layout.pages.len().saturating_sub(1);
        self.current_page = index.min(max_page);
    }

    /// Epoch token for stale-render suppression: capture before a render
    /// pass, compare on completion, drop the result on mismatch.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
