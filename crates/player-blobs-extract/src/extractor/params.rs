use serde::{Deserialize, Serialize};

/// Neighbourhood window of the labeler, in pixels.
pub const DEFAULT_WINDOW_SIZE: usize = 20;
/// Blobs smaller than this are treated as noise (ball, artefacts).
pub const DEFAULT_MIN_BLOB_SIZE: usize = 800;
/// Padding added around each blob's tight bounding box.
pub const DEFAULT_MARGIN: i32 = 20;
/// Largest accepted margin.
pub const MAX_MARGIN: i32 = 1 << 16;
/// Largest accepted window.
pub const MAX_WINDOW_SIZE: usize = 1 << 16;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("margin {0} is outside 0..={max}", max = MAX_MARGIN)]
    Margin(i32),
    #[error("window size {0} exceeds {max}", max = MAX_WINDOW_SIZE)]
    WindowSize(usize),
}

/// Configuration for [`BlobExtractor`](super::BlobExtractor).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobExtractorParams {
    /// Side of the tolerant neighbourhood; the scan reaches `window_size / 2`
    /// pixels in every direction.
    pub window_size: usize,
    /// Minimum number of foreground pixels for a blob to become a candidate.
    pub min_blob_size: usize,
    /// Margin added on every side of the tight bounding box.
    pub margin: i32,
}

impl Default for BlobExtractorParams {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            min_blob_size: DEFAULT_MIN_BLOB_SIZE,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl BlobExtractorParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(0..=MAX_MARGIN).contains(&self.margin) {
            return Err(ParamsError::Margin(self.margin));
        }
        if self.window_size > MAX_WINDOW_SIZE {
            return Err(ParamsError::WindowSize(self.window_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(BlobExtractorParams::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_margin_and_window() {
        for margin in [-1, MAX_MARGIN + 1, i32::MAX / 2 + 1] {
            let params = BlobExtractorParams {
                margin,
                ..Default::default()
            };
            assert_eq!(params.validate(), Err(ParamsError::Margin(margin)));
        }
        let params = BlobExtractorParams {
            window_size: usize::MAX,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::WindowSize(usize::MAX)));
        let zero = BlobExtractorParams {
            margin: 0,
            ..Default::default()
        };
        assert_eq!(zero.validate(), Ok(()));
    }
}
