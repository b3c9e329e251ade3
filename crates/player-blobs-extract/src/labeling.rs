//! Gap-tolerant connected-component labeling.
//!
//! Two foreground pixels are adjacent when both their row and column offsets
//! are at most `window_size / 2` (Chebyshev distance). With the default window
//! of 20 this bridges gaps of up to nine background pixels, which keeps limbs
//! and torso of one player in a single blob even when the mask is ragged.
//!
//! The scan is a single raster pass. Each foreground pixel looks at the part
//! of its window that was already visited (rows above, and the pixels to its
//! left on the current row). With no labelled neighbour it opens a new label;
//! otherwise it takes the smallest neighbouring label and merges the classes
//! of all neighbours in a union-find forest. A second pass rewrites every
//! provisional label to the smallest label of its class and counts pixels.

use std::collections::BTreeMap;

use player_blobs_core::MaskView;

use crate::{tight_bounds_by_label, BlobBounds};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Union-find over provisional labels. Slot 0 is the background and is never
/// linked; every root also remembers the smallest label in its class.
#[derive(Debug)]
struct LabelForest {
    parent: Vec<i32>,
    size: Vec<u32>,
    min_label: Vec<i32>,
}

impl LabelForest {
    fn new() -> Self {
        Self {
            parent: vec![0],
            size: vec![0],
            min_label: vec![0],
        }
    }

    fn make_label(&mut self) -> i32 {
        let label = self.parent.len() as i32;
        self.parent.push(label);
        self.size.push(1);
        self.min_label.push(label);
        label
    }

    /// Root of `label`, halving the path on the way up.
    fn find(&mut self, mut label: i32) -> i32 {
        while self.parent[label as usize] != label {
            let grandparent = self.parent[self.parent[label as usize] as usize];
            self.parent[label as usize] = grandparent;
            label = grandparent;
        }
        label
    }

    fn union(&mut self, a: i32, b: i32) {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return;
        }
        if self.size[ra as usize] < self.size[rb as usize] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb as usize] = ra;
        self.size[ra as usize] += self.size[rb as usize];
        self.min_label[ra as usize] = self.min_label[ra as usize].min(self.min_label[rb as usize]);
    }

    /// Smallest label of the class containing `label`.
    fn canonical(&mut self, label: i32) -> i32 {
        let root = self.find(label);
        self.min_label[root as usize]
    }

    fn provisional_count(&self) -> usize {
        self.parent.len() - 1
    }
}

/// Canonical label grid plus per-label pixel counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlobLabels {
    width: usize,
    height: usize,
    labels: Vec<i32>,
    sizes: BTreeMap<i32, usize>,
    provisional: usize,
}

impl BlobLabels {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major label grid; 0 is background.
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    /// Label of pixel `(x, y)`. Panics outside the grid.
    #[inline]
    pub fn label_at(&self, x: usize, y: usize) -> i32 {
        self.labels[y * self.width + x]
    }

    /// Canonical label → pixel count, in ascending label order.
    pub fn sizes(&self) -> &BTreeMap<i32, usize> {
        &self.sizes
    }

    pub fn size_of(&self, label: i32) -> Option<usize> {
        self.sizes.get(&label).copied()
    }

    /// Number of distinct canonical labels.
    pub fn blob_count(&self) -> usize {
        self.sizes.len()
    }

    pub fn foreground_pixels(&self) -> usize {
        self.sizes.values().sum()
    }

    /// Number of provisional labels opened during the raster pass.
    pub fn provisional_count(&self) -> usize {
        self.provisional
    }

    /// Tight box of every blob, keyed by canonical label.
    pub fn tight_bounds(&self) -> BTreeMap<i32, BlobBounds> {
        tight_bounds_by_label(self, |_| true)
    }
}

/// Label the foreground of `mask` with a `window_size`-wide tolerant neighbourhood.
///
/// The scanned square spans `window_size / 2` pixels on each side of the
/// current pixel. A window of 2 is plain 8-connectivity; 0 or 1 leaves every
/// pixel in its own blob.
///
/// # Panics
///
/// If `mask.data.len() != width * height`, or if the mask has `i32::MAX`
/// pixels or more. [`Frame`](player_blobs_core::Frame) checks both on
/// construction.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(mask), fields(width = mask.width, height = mask.height))
)]
pub fn label_blobs(mask: &MaskView<'_>, window_size: usize) -> BlobLabels {
    let (w, h) = (mask.width, mask.height);
    assert_eq!(
        Some(mask.data.len()),
        w.checked_mul(h),
        "mask buffer does not match {w}x{h}"
    );
    assert!(
        mask.data.len() < i32::MAX as usize,
        "mask of {w}x{h} pixels does not fit the i32 label space"
    );
    let radius = window_size / 2;

    let mut labels = vec![0i32; w * h];
    let mut forest = LabelForest::new();

    for y in 0..h {
        let y0 = y.saturating_sub(radius);
        for x in 0..w {
            let idx = y * w + x;
            if mask.data[idx] == 0 {
                continue;
            }

            let x0 = x.saturating_sub(radius);
            let x1 = x.saturating_add(radius).min(w - 1);

            let mut smallest: Option<i32> = None;
            for ny in y0..=y {
                // Cells right of and below the current pixel are still unlabelled.
                let end = if ny == y { x } else { x1 + 1 };
                let row = ny * w;
                for &label in &labels[row + x0..row + end] {
                    if label == 0 {
                        continue;
                    }
                    match smallest {
                        None => smallest = Some(label),
                        Some(s) if s == label => {}
                        Some(s) => {
                            forest.union(s, label);
                            smallest = Some(s.min(label));
                        }
                    }
                }
            }

            labels[idx] = match smallest {
                Some(label) => label,
                None => forest.make_label(),
            };
        }
    }

    let mut sizes = BTreeMap::new();
    for label in labels.iter_mut().filter(|l| **l != 0) {
        let canonical = forest.canonical(*label);
        *label = canonical;
        *sizes.entry(canonical).or_insert(0usize) += 1;
    }

    log::trace!(
        "labeled {}x{} mask: {} provisional labels, {} blobs",
        w,
        h,
        forest.provisional_count(),
        sizes.len()
    );

    BlobLabels {
        width: w,
        height: h,
        labels,
        sizes,
        provisional: forest.provisional_count(),
    }
}
