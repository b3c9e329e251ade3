//! Body-part refinement for player candidates.
//!
//! A [`BodyPartDetector`] returns boxes in candidate-crop coordinates, the
//! root (whole body) box first. [`refine_candidate`] stores them on the
//! candidate together with the torso inferred from the next two boxes.
//!
//! [`DpmPartDetector`] adapts a deformable part model: the latent-SVM search
//! itself is provided by a [`PartSearch`] backend, this crate turns its best
//! placement into boxes using the pyramid geometry of [`boxes`].

pub mod boxes;
mod detector;
mod model;
mod refine;
mod search;
mod torso;

pub use detector::{BodyPartDetector, DpmPartDetector, PartDetectorConfig, PartDetectorError};
pub use model::{ComponentModel, FilterSize, PartModel, PartModelError};
pub use refine::{refine_all, refine_candidate, RefineError};
pub use search::{PartPlacement, PartSearch};
pub use torso::{attach_torso, extract_torso, infer_torso_rect, TorsoError, MIN_TORSO_PARTS};
