//! Player candidate extraction from foreground masks.
//!
//! Pipeline:
//! 1. [`label_blobs`] runs a single raster pass of gap-tolerant connected
//!    component labeling backed by a union-find forest, then canonicalizes
//!    every label to the smallest label of its class.
//! 2. [`BlobExtractor`] keeps blobs above a size threshold, computes their
//!    tight boxes, pads them by a margin and crops mask and color data.
//!
//! Padded boxes that leave the frame are reported as-is in
//! `PlayerCandidate::bounds`; the crop uses the part inside the frame
//! (`PlayerCandidate::crop`).
//!
//! ```
//! use player_blobs_core::{ColorImage, Frame, MaskImage, PixelRect};
//! use player_blobs_extract::{BlobExtractor, BlobExtractorParams};
//!
//! let mut mask = MaskImage::new(100, 100);
//! mask.fill_rect(&PixelRect::new(10, 10, 30, 30));
//! let frame = Frame::new(0, mask, ColorImage::new(100, 100)).unwrap();
//!
//! let players = BlobExtractor::new(BlobExtractorParams::default()).extract(&frame);
//! assert_eq!(players.len(), 1);
//! assert_eq!(players[0].bounds, PixelRect::new(-10, -10, 69, 69));
//! ```

mod extractor;
mod io;
mod labeling;

pub use extractor::{
    pad_bounds, tight_bounds_by_label, BlobBounds, BlobExtractor, BlobExtractorParams,
    ParamsError, DEFAULT_MARGIN, DEFAULT_MIN_BLOB_SIZE, DEFAULT_WINDOW_SIZE, MAX_MARGIN,
    MAX_WINDOW_SIZE,
};
pub use io::{BlobSizeEntry, ExtractConfig, ExtractIoError, ExtractReport};
pub use labeling::{label_blobs, BlobLabels};
