use std::collections::BTreeMap;

use player_blobs_core::{PixelPoint, PixelRect};
use serde::{Deserialize, Serialize};

use crate::BlobLabels;

/// Tight, inclusive bounding box of one blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BlobBounds {
    fn at(x: i32, y: i32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn contains(&self, p: PixelPoint) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Pad a tight box by `margin` on every side.
///
/// The result is `(min_x - m, min_y - m, (max_x - min_x) + 2m, (max_y - min_y) + 2m)`,
/// so its exclusive far edge sits at `max + m`. It is not clipped to the frame.
pub fn pad_bounds(bounds: &BlobBounds, margin: i32) -> PixelRect {
    PixelRect::new(
        bounds.min_x,
        bounds.min_y,
        bounds.max_x - bounds.min_x,
        bounds.max_y - bounds.min_y,
    )
    .padded(margin)
}

/// Tight boxes of every canonical label accepted by `keep`, in one pass over the grid.
pub fn tight_bounds_by_label(
    labels: &BlobLabels,
    mut keep: impl FnMut(i32) -> bool,
) -> BTreeMap<i32, BlobBounds> {
    let wanted: BTreeMap<i32, bool> = labels
        .sizes()
        .keys()
        .map(|&label| (label, keep(label)))
        .collect();

    let mut out: BTreeMap<i32, BlobBounds> = BTreeMap::new();
    let width = labels.width();
    for (i, &label) in labels.labels().iter().enumerate() {
        if label == 0 || !wanted.get(&label).copied().unwrap_or(false) {
            continue;
        }
        let (x, y) = ((i % width) as i32, (i / width) as i32);
        out.entry(label)
            .and_modify(|b| b.include(x, y))
            .or_insert_with(|| BlobBounds::at(x, y));
    }
    out
}
