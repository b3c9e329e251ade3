//! Player candidates and the features attached to them by later stages.

use serde::{Deserialize, Serialize};

use crate::{ColorImage, MaskImage, PixelRect};

/// Torso region inferred from the body parts, with its own crops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Torso {
    /// Rectangle in candidate-crop coordinates (may leave the crop).
    pub rect: PixelRect,
    pub color: ColorImage,
    pub mask: MaskImage,
}

/// Output of the body-part refinement stage.
///
/// By convention `body_parts[0]` is the root (whole body) box and
/// `body_parts[1]`, `body_parts[2]` are the parts used for torso inference.
/// All rectangles are in candidate-crop coordinates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerFeatures {
    pub body_parts: Vec<PixelRect>,
    pub torso: Option<Torso>,
}

/// A region of a frame likely to contain one player.
///
/// The crops are deep copies; the candidate does not borrow from the frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerCandidate {
    pub frame_index: u64,
    /// Canonical blob label this candidate was built from.
    pub blob_label: i32,
    /// Number of foreground pixels in the blob.
    pub blob_size: usize,
    /// Padded bounding box in frame coordinates. May leave the frame.
    pub bounds: PixelRect,
    /// `bounds` clipped to the frame; the region actually copied.
    pub crop: PixelRect,
    pub mask: MaskImage,
    pub color: ColorImage,
    pub features: PlayerFeatures,
}

impl PlayerCandidate {
    /// Whether the padded box had to be clipped at a frame border.
    pub fn is_clipped(&self) -> bool {
        self.bounds != self.crop
    }

    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            frame_index: self.frame_index,
            blob_label: self.blob_label,
            blob_size: self.blob_size,
            bounds: self.bounds,
            crop: self.crop,
            body_parts: self.features.body_parts.clone(),
            torso: self.features.torso.as_ref().map(|t| t.rect),
        }
    }
}

/// Serializable description of a [`PlayerCandidate`] without pixel data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub frame_index: u64,
    pub blob_label: i32,
    pub blob_size: usize,
    pub bounds: PixelRect,
    pub crop: PixelRect,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body_parts: Vec<PixelRect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torso: Option<PixelRect>,
}
