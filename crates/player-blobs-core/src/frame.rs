use crate::{ColorImage, ColorView, MaskImage, MaskView};

/// Errors raised when assembling a [`Frame`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("invalid {what} buffer length (expected {expected} bytes, got {got})")]
    InvalidBufferLength {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error(
        "mask is {mask_width}x{mask_height} but color image is {color_width}x{color_height}"
    )]
    DimensionMismatch {
        mask_width: usize,
        mask_height: usize,
        color_width: usize,
        color_height: usize,
    },

    #[error("frame of {width}x{height} pixels does not fit the i32 label space")]
    TooLarge { width: usize, height: usize },
}

/// One video frame: foreground mask plus the original RGB image.
///
/// Both planes share the same dimensions; this is checked on construction.
#[derive(Clone, Debug)]
pub struct Frame {
    index: u64,
    mask: MaskImage,
    color: ColorImage,
}

impl Frame {
    pub fn new(index: u64, mask: MaskImage, color: ColorImage) -> Result<Self, FrameError> {
        check_len("mask", mask.width * mask.height, mask.data.len())?;
        check_len("color", color.width * color.height * 3, color.data.len())?;
        if mask.width != color.width || mask.height != color.height {
            return Err(FrameError::DimensionMismatch {
                mask_width: mask.width,
                mask_height: mask.height,
                color_width: color.width,
                color_height: color.height,
            });
        }
        let fits = i32::try_from(mask.width).is_ok()
            && i32::try_from(mask.height).is_ok()
            && mask
                .width
                .checked_mul(mask.height)
                .is_some_and(|n| n < i32::MAX as usize);
        if !fits {
            return Err(FrameError::TooLarge {
                width: mask.width,
                height: mask.height,
            });
        }
        Ok(Self { index, mask, color })
    }

    /// Build a frame from raw row-major buffers (1 byte/pixel mask, 3 bytes/pixel RGB).
    pub fn from_raw(
        index: u64,
        width: usize,
        height: usize,
        mask: Vec<u8>,
        color: Vec<u8>,
    ) -> Result<Self, FrameError> {
        Self::new(
            index,
            MaskImage {
                width,
                height,
                data: mask,
            },
            ColorImage {
                width,
                height,
                data: color,
            },
        )
    }

    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.mask.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.mask.height
    }

    pub fn mask(&self) -> MaskView<'_> {
        self.mask.view()
    }

    pub fn color(&self) -> ColorView<'_> {
        self.color.view()
    }

    /// Give the buffers back, e.g. to reuse them for the next frame.
    pub fn into_parts(self) -> (MaskImage, ColorImage) {
        (self.mask, self.color)
    }
}

fn check_len(what: &'static str, expected: usize, got: usize) -> Result<(), FrameError> {
    if expected != got {
        return Err(FrameError::InvalidBufferLength {
            what,
            expected,
            got,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_planes() {
        let frame = Frame::new(7, MaskImage::new(4, 3), ColorImage::new(4, 3)).expect("frame");
        assert_eq!(frame.index(), 7);
        assert_eq!((frame.width(), frame.height()), (4, 3));
        assert_eq!(frame.color().data.len(), 36);
    }

    #[test]
    fn rejects_dimension_mismatch() {
        let err = Frame::new(0, MaskImage::new(4, 3), ColorImage::new(3, 4)).unwrap_err();
        assert!(matches!(err, FrameError::DimensionMismatch { .. }));
    }

    #[test]
    fn rejects_short_buffers() {
        let err = Frame::from_raw(0, 4, 4, vec![0; 16], vec![0; 40]).unwrap_err();
        assert_eq!(
            err,
            FrameError::InvalidBufferLength {
                what: "color",
                expected: 48,
                got: 40
            }
        );
    }
}
