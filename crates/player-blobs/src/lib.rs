//! High-level facade crate for the `player-blobs-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the underlying crates
//! - (feature-gated) helpers that build frames from `image` buffers, run the
//!   extractor and save candidate crops as PNG files.
//!
//! ## Quickstart
//!
//! ```no_run
//! use player_blobs::detect;
//! use player_blobs::extract::BlobExtractorParams;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let frame = detect::load_frame(0, "mask.png", "frame.png")?;
//! let extractor = player_blobs::BlobExtractor::new(BlobExtractorParams::default());
//! for player in extractor.extract(&frame) {
//!     println!("blob {} at {:?}", player.blob_label, player.bounds);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `player_blobs::core`: frames, images, rectangles and player candidates.
//! - `player_blobs::extract`: gap-tolerant blob labeling and candidate extraction.
//! - `player_blobs::parts`: body-part refinement and torso inference.
//! - `player_blobs::detect` (feature `image`): helpers over `image::GrayImage`
//!   and `image::RgbImage`.

pub use player_blobs_core as core;
pub use player_blobs_extract as extract;
pub use player_blobs_parts as parts;

pub use player_blobs_core::{Frame, PixelRect, PlayerCandidate, PlayerFeatures, Torso};
pub use player_blobs_extract::{label_blobs, BlobExtractor, BlobExtractorParams};
pub use player_blobs_parts::{refine_candidate, BodyPartDetector};

#[cfg(feature = "image")]
pub mod detect;
