use std::{
    fs,
    path::{Path, PathBuf},
};

use ::image::{GrayImage, ImageReader, RgbImage};

use crate::core::{ColorImage, ColorView, Frame, FrameError, MaskImage, MaskView, PlayerCandidate};
use crate::extract::{BlobExtractor, BlobExtractorParams, ParamsError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Image(#[from] ::image::ImageError),

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convert an `image::GrayImage` into the lightweight mask view.
pub fn mask_view(img: &GrayImage) -> MaskView<'_> {
    MaskView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Convert an `image::RgbImage` into the lightweight color view.
pub fn color_view(img: &RgbImage) -> ColorView<'_> {
    ColorView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Build a [`Frame`] from a grayscale mask and an RGB image of the same size.
pub fn frame_from_images(
    index: u64,
    mask: &GrayImage,
    color: &RgbImage,
) -> Result<Frame, DetectError> {
    Ok(Frame::new(
        index,
        mask_view(mask).to_owned_image(),
        color_view(color).to_owned_image(),
    )?)
}

/// Decode a mask and an image from disk into a [`Frame`].
///
/// The mask is converted to 8-bit luma, the image to 8-bit RGB.
pub fn load_frame(
    index: u64,
    mask_path: impl AsRef<Path>,
    image_path: impl AsRef<Path>,
) -> Result<Frame, DetectError> {
    let mask = open_image(mask_path.as_ref())?.to_luma8();
    let color = open_image(image_path.as_ref())?.to_rgb8();
    log::debug!(
        "loaded frame {index}: mask {}x{}, image {}x{}",
        mask.width(),
        mask.height(),
        color.width(),
        color.height()
    );
    frame_from_images(index, &mask, &color)
}

fn open_image(path: &Path) -> Result<::image::DynamicImage, DetectError> {
    let io_err = |source| DetectError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?;
    Ok(reader.decode()?)
}

/// Run the extractor end-to-end on an `image` mask/image pair.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(mask, color, params),
        fields(width = mask.width(), height = mask.height())
    )
)]
pub fn extract_players(
    index: u64,
    mask: &GrayImage,
    color: &RgbImage,
    params: BlobExtractorParams,
) -> Result<Vec<PlayerCandidate>, DetectError> {
    let extractor = BlobExtractor::try_new(params)?;
    let frame = frame_from_images(index, mask, color)?;
    Ok(extractor.extract(&frame))
}

/// Convert an owned mask back into an `image::GrayImage`.
pub fn to_gray_image(mask: &MaskImage) -> Result<GrayImage, DetectError> {
    GrayImage::from_raw(mask.width as u32, mask.height as u32, mask.data.clone()).ok_or(
        DetectError::Frame(FrameError::InvalidBufferLength {
            what: "mask",
            expected: mask.width * mask.height,
            got: mask.data.len(),
        }),
    )
}

/// Convert an owned color image back into an `image::RgbImage`.
pub fn to_rgb_image(color: &ColorImage) -> Result<RgbImage, DetectError> {
    RgbImage::from_raw(color.width as u32, color.height as u32, color.data.clone()).ok_or(
        DetectError::Frame(FrameError::InvalidBufferLength {
            what: "color",
            expected: color.width * color.height * 3,
            got: color.data.len(),
        }),
    )
}

/// Write `player_<i>_color.png` and `player_<i>_mask.png` for every candidate.
///
/// Torso crops, when present and non-empty, go to `player_<i>_torso.png`.
/// Returns the written paths.
pub fn save_candidate_crops(
    candidates: &[PlayerCandidate],
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, DetectError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| DetectError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(candidates.len() * 2);
    for (i, candidate) in candidates.iter().enumerate() {
        let color_path = dir.join(format!("player_{i}_color.png"));
        to_rgb_image(&candidate.color)?.save(&color_path)?;
        written.push(color_path);

        let mask_path = dir.join(format!("player_{i}_mask.png"));
        to_gray_image(&candidate.mask)?.save(&mask_path)?;
        written.push(mask_path);

        if let Some(torso) = &candidate.features.torso {
            if torso.color.width > 0 && torso.color.height > 0 {
                let torso_path = dir.join(format!("player_{i}_torso.png"));
                to_rgb_image(&torso.color)?.save(&torso_path)?;
                written.push(torso_path);
            }
        }
    }
    log::debug!("wrote {} crop images to {}", written.len(), dir.display());
    Ok(written)
}
