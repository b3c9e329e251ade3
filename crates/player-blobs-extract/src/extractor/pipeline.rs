use player_blobs_core::{Frame, MaskView, PixelRect, PlayerCandidate, PlayerFeatures};

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::bounds::{pad_bounds, tight_bounds_by_label};
use super::{BlobExtractorParams, ParamsError};
use crate::labeling::{label_blobs, BlobLabels};

/// Turns a frame's foreground mask into player candidates.
#[derive(Clone, Debug, Default)]
pub struct BlobExtractor {
    params: BlobExtractorParams,
}

impl BlobExtractor {
    /// Wrap `params` as given. Out-of-range values are not rejected here;
    /// see [`BlobExtractor::try_new`].
    pub fn new(params: BlobExtractorParams) -> Self {
        Self { params }
    }

    /// Like [`BlobExtractor::new`], but validates `params` first.
    pub fn try_new(params: BlobExtractorParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &BlobExtractorParams {
        &self.params
    }

    /// Run the labeler with the configured window.
    pub fn label(&self, mask: &MaskView<'_>) -> BlobLabels {
        label_blobs(mask, self.params.window_size)
    }

    /// Label the frame's mask and extract one candidate per large blob.
    ///
    /// Candidates come in ascending canonical label order, which is neither
    /// a size nor a spatial ordering.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, frame),
            fields(frame = frame.index(), width = frame.width(), height = frame.height())
        )
    )]
    pub fn extract(&self, frame: &Frame) -> Vec<PlayerCandidate> {
        let labels = self.label(&frame.mask());
        self.extract_labeled(frame, &labels)
    }

    /// Extract candidates from labels computed earlier for this frame.
    ///
    /// Every blob of at least `min_blob_size` pixels yields one candidate. If
    /// the padded box is empty (a margin of 0 around a one-pixel-wide blob)
    /// the candidate gets an empty crop and empty images.
    ///
    /// # Panics
    ///
    /// If `labels` and `frame` differ in size. Labels from another frame of
    /// the same size are not detected and give meaningless crops.
    pub fn extract_labeled(&self, frame: &Frame, labels: &BlobLabels) -> Vec<PlayerCandidate> {
        assert_eq!(
            (labels.width(), labels.height()),
            (frame.width(), frame.height()),
            "labels do not match the frame size"
        );

        let min_size = self.params.min_blob_size;
        let sizes = labels.sizes();
        let boxes = tight_bounds_by_label(labels, |label| {
            sizes.get(&label).is_some_and(|&n| n >= min_size)
        });

        let dropped = labels.blob_count() - boxes.len();
        log::debug!(
            "frame {}: {} blobs, {} kept (min size {}), {} dropped",
            frame.index(),
            labels.blob_count(),
            boxes.len(),
            min_size,
            dropped
        );

        let mask = frame.mask();
        let color = frame.color();
        let mut players = Vec::with_capacity(boxes.len());
        for (label, tight) in boxes {
            let bounds = pad_bounds(&tight, self.params.margin);
            let crop = bounds
                .clamp_to(frame.width(), frame.height())
                .unwrap_or_else(|| empty_crop(&bounds, frame.width(), frame.height()));
            if crop != bounds {
                log::trace!(
                    "frame {}: blob {label} box {:?} clipped to {:?}",
                    frame.index(),
                    bounds,
                    crop
                );
            }

            players.push(PlayerCandidate {
                frame_index: frame.index(),
                blob_label: label,
                blob_size: sizes.get(&label).copied().unwrap_or(0),
                bounds,
                crop,
                mask: mask.crop(&crop),
                color: color.crop(&crop),
                features: PlayerFeatures::default(),
            });
        }
        players
    }
}

/// Zero-sized crop at `bounds`' origin moved inside the frame.
fn empty_crop(bounds: &PixelRect, width: usize, height: usize) -> PixelRect {
    let w = i32::try_from(width).unwrap_or(i32::MAX);
    let h = i32::try_from(height).unwrap_or(i32::MAX);
    PixelRect::new(bounds.x.clamp(0, w), bounds.y.clamp(0, h), 0, 0)
}
