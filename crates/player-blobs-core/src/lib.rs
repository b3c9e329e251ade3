//! Core types for extracting player candidates from foreground masks.
//!
//! This crate holds the data model shared by the labeling, extraction and
//! body-part stages. It does not depend on any concrete image library; the
//! `player-blobs` facade converts from `image` buffers.

mod frame;
mod geometry;
mod image;
mod logger;
mod player;

pub use frame::{Frame, FrameError};
pub use geometry::{PixelPoint, PixelRect};
pub use image::{ColorImage, ColorView, MaskImage, MaskView};
pub use player::{PlayerCandidate, PlayerFeatures, PlayerSummary, Torso};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{default_directive, init_with_level, parse_level};
