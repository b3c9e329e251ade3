//! Body-part refinement of extracted candidates.

use player_blobs_core::PlayerCandidate;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::torso::torso_from_parts;
use crate::{BodyPartDetector, PartDetectorError, TorsoError};

#[derive(thiserror::Error, Debug)]
pub enum RefineError {
    #[error(transparent)]
    Detect(#[from] PartDetectorError),
    #[error(transparent)]
    Torso(#[from] TorsoError),
}

/// Run `detector` on the candidate crop and store the body parts and torso.
///
/// Finding no parts is not an error: the candidate keeps empty features.
/// On error nothing is stored.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(detector, candidate), fields(label = candidate.blob_label))
)]
pub fn refine_candidate<D: BodyPartDetector + ?Sized>(
    detector: &D,
    candidate: &mut PlayerCandidate,
) -> Result<(), RefineError> {
    let parts = detector.detect_parts(&candidate.color.view())?;
    if parts.is_empty() {
        log::debug!("blob {}: no body parts found", candidate.blob_label);
        return Ok(());
    }

    let torso = torso_from_parts(candidate, &parts)?;
    log::debug!(
        "blob {}: {} body parts, torso {:?}",
        candidate.blob_label,
        parts.len(),
        torso.rect
    );
    candidate.features.body_parts = parts;
    candidate.features.torso = Some(torso);
    Ok(())
}

/// Refine every candidate, keeping going past failures.
///
/// Returns the number of candidates that were refined with a torso.
pub fn refine_all<D: BodyPartDetector + ?Sized>(
    detector: &D,
    candidates: &mut [PlayerCandidate],
) -> usize {
    let mut refined = 0;
    for candidate in candidates.iter_mut() {
        match refine_candidate(detector, candidate) {
            Ok(()) if candidate.features.torso.is_some() => refined += 1,
            Ok(()) => {}
            Err(err) => log::warn!("blob {}: refinement failed: {err}", candidate.blob_label),
        }
    }
    refined
}
