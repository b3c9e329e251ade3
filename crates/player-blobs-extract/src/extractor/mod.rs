//! Blob extraction: size filtering, bounding boxes, padding and cropping.

mod bounds;
mod params;
mod pipeline;

pub use bounds::{pad_bounds, tight_bounds_by_label, BlobBounds};
pub use params::{
    BlobExtractorParams, ParamsError, DEFAULT_MARGIN, DEFAULT_MIN_BLOB_SIZE, DEFAULT_WINDOW_SIZE,
    MAX_MARGIN, MAX_WINDOW_SIZE,
};
pub use pipeline::BlobExtractor;
