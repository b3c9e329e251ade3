//! Torso inference from body-part boxes.
//!
//! The torso is the average of the two parts following the root box: the
//! origins are averaged, the far corners are averaged independently, and the
//! size is taken from the averaged corners. Halves are floored.

use player_blobs_core::{PixelPoint, PixelRect, PlayerCandidate, Torso};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TorsoError {
    #[error("torso inference needs at least 3 body parts, got {found}")]
    NotEnoughParts { found: usize },
}

/// Minimum number of body parts (root plus two torso parts).
pub const MIN_TORSO_PARTS: usize = 3;

/// Torso rectangle from `parts[1]` and `parts[2]`.
pub fn infer_torso_rect(parts: &[PixelRect]) -> Result<PixelRect, TorsoError> {
    if parts.len() < MIN_TORSO_PARTS {
        return Err(TorsoError::NotEnoughParts { found: parts.len() });
    }
    let (a, b) = (&parts[1], &parts[2]);

    let origin = PixelPoint::new((a.x + b.x).div_euclid(2), (a.y + b.y).div_euclid(2));
    let far = PixelPoint::new(
        (a.right() + b.right()).div_euclid(2),
        (a.bottom() + b.bottom()).div_euclid(2),
    );
    Ok(PixelRect::new(
        origin.x,
        origin.y,
        far.x - origin.x,
        far.y - origin.y,
    ))
}

/// Infer the torso of `candidate` from its body parts and crop it.
///
/// The rectangle is in candidate-crop coordinates; the crops are clipped to
/// the candidate images.
pub fn extract_torso(candidate: &PlayerCandidate) -> Result<Torso, TorsoError> {
    torso_from_parts(candidate, &candidate.features.body_parts)
}

/// Like [`extract_torso`], but stores the result on the candidate.
///
/// On error the candidate is left unchanged.
pub fn attach_torso(candidate: &mut PlayerCandidate) -> Result<(), TorsoError> {
    let torso = extract_torso(candidate)?;
    candidate.features.torso = Some(torso);
    Ok(())
}

pub(crate) fn torso_from_parts(
    candidate: &PlayerCandidate,
    parts: &[PixelRect],
) -> Result<Torso, TorsoError> {
    let rect = infer_torso_rect(parts)?;
    Ok(Torso {
        rect,
        color: candidate.color.crop(&rect),
        mask: candidate.mask.crop(&rect),
    })
}
