use crate::model::{GEOM_EPS, RectMm};

/// A position chosen by the packer, relative to the printable-area origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub rotated: bool,
}

/// MaxRects free-list packer over a single page's printable area.
///
/// Free space is tracked as maximal free rectangles; placements are scored
/// with Best Short Side Fit in both orientations. The free list lives only
/// for one packing pass and is discarded with the packer.
pub struct MaxRectsPacker {
    free: Vec<RectMm>,
}

impl MaxRectsPacker {
    pub fn new(printable_width: f64, printable_height: f64) -> Self {
        Self {
            free: vec![RectMm::new(0.0, 0.0, printable_width, printable_height)],
        }
    }

    /// Best Short Side Fit over all free rectangles, both orientations.
    ///
    /// Lower short-side leftover wins, then lower long-side leftover; equal
    /// scores resolve to the first candidate in free-list order. Returns
    /// `None` if no free rectangle admits either orientation.
    pub fn find_position(&self, w: f64, h: f64) -> Option<Placement> {
        let mut best: Option<(f64, f64, Placement)> = None;

        for fr in &self.free {
            for (cw, ch, rotated) in [(w, h, false), (h, w, true)] {
                if cw > fr.w + GEOM_EPS || ch > fr.h + GEOM_EPS {
                    continue;
                }
                let leftover_w = fr.w - cw;
                let leftover_h = fr.h - ch;
                let short_fit = leftover_w.min(leftover_h);
                let long_fit = leftover_w.max(leftover_h);
                let better = match &best {
                    None => true,
                    Some((s1, s2, _)) => {
                        short_fit < *s1 - GEOM_EPS
                            || ((short_fit - *s1).abs() <= GEOM_EPS && long_fit < *s2 - GEOM_EPS)
                    }
                };
                if better {
                    best = Some((
                        short_fit,
                        long_fit,
                        Placement {
                            x: fr.x,
                            y: fr.y,
                            rotated,
                        },
                    ));
                }
            }
        }

        best.map(|(_, _, p)| p)
    }

    /// Commits a placed rectangle: every intersecting free rectangle is
    /// replaced by its residual strips, then contained rectangles are pruned.
    pub fn place(&mut self, node: &RectMm) {
        let mut new_free: Vec<RectMm> = Vec::new();
        for fr in self.free.iter() {
            if !fr.intersects(node) {
                new_free.push(*fr);
                continue;
            }
            Self::split_free_rect(*fr, node, &mut new_free);
        }
        self.free = new_free;
        self.prune_free_list();
    }

    /// Finds a position for a `w x h` footprint and commits it in one step.
    pub fn insert(&mut self, w: f64, h: f64) -> Option<Placement> {
        let pos = self.find_position(w, h)?;
        let (pw, ph) = if pos.rotated { (h, w) } else { (w, h) };
        self.place(&RectMm::new(pos.x, pos.y, pw, ph));
        Some(pos)
    }

    /// Residual strips of `fr` left of, right of, above, and below `node`,
    /// wherever positive clearance exists. Strips may overlap each other;
    /// that is what keeps them maximal.
    fn split_free_rect(fr: RectMm, node: &RectMm, out: &mut Vec<RectMm>) {
        debug_assert!(fr.w > 0.0 && fr.h > 0.0);
        // left
        if node.x - fr.x > GEOM_EPS {
            out.push(RectMm::new(fr.x, fr.y, node.x - fr.x, fr.h));
        }
        // right
        if fr.right() - node.right() > GEOM_EPS {
            out.push(RectMm::new(node.right(), fr.y, fr.right() - node.right(), fr.h));
        }
        // above
        if node.y - fr.y > GEOM_EPS {
            out.push(RectMm::new(fr.x, fr.y, fr.w, node.y - fr.y));
        }
        // below
        if fr.bottom() - node.bottom() > GEOM_EPS {
            out.push(RectMm::new(fr.x, node.bottom(), fr.w, fr.bottom() - node.bottom()));
        }
    }

    /// Removes any free rectangle fully contained within another. Without
    /// this the list grows without bound across repeated placements.
    fn prune_free_list(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let a = self.free[i];
            debug_assert!(a.w > GEOM_EPS && a.h > GEOM_EPS);
            let mut remove_i = false;
            let mut j = i + 1;
            while j < self.free.len() {
                let b = self.free[j];
                if b.contains(&a) {
                    remove_i = true;
                    break;
                }
                if a.contains(&b) {
                    self.free.remove(j);
                    continue;
                }
                j += 1;
            }
            if remove_i {
                self.free.remove(i);
            } else {
                i += 1;
            }
        }
    }

    pub fn free_list_len(&self) -> usize {
        self.free.len()
    }
}
