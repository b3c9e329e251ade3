use std::path::PathBuf;

use player_blobs_core::{ColorView, PixelRect};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::boxes::{best_placement, placement_boxes};
use crate::{PartModel, PartModelError, PartSearch};

/// Errors returned by body-part detectors.
#[derive(thiserror::Error, Debug)]
pub enum PartDetectorError {
    #[error("failed to load part model: {0}")]
    Model(#[from] PartModelError),
    #[error("worker count must be at least 1")]
    InvalidWorkers,
    #[error("part search failed on component {component}")]
    Search {
        component: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    #[error("placement has {got} part anchors, component {component} has {expected} part filters")]
    MalformedPlacement {
        component: usize,
        expected: usize,
        got: usize,
    },
}

/// Finds body-part boxes in a player image.
///
/// Boxes are in `image` coordinates; by convention the first one covers the
/// whole body.
pub trait BodyPartDetector {
    fn detect_parts(&self, image: &ColorView<'_>) -> Result<Vec<PixelRect>, PartDetectorError>;
}

fn default_num_workers() -> usize {
    4
}

/// Construction settings for [`DpmPartDetector`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartDetectorConfig {
    pub model_path: PathBuf,
    #[serde(default = "default_num_workers")]
    pub num_workers: usize,
}

impl PartDetectorConfig {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            num_workers: default_num_workers(),
        }
    }
}

/// Deformable part-model detector on top of an external [`PartSearch`] backend.
///
/// The model is loaded once on construction. Every component is searched in
/// order; the best placement of the last component becomes the part boxes.
pub struct DpmPartDetector<S> {
    model: PartModel,
    search: S,
    num_workers: usize,
}

impl<S: PartSearch> DpmPartDetector<S> {
    /// Load the model named in `config` and wrap `search`.
    pub fn new(config: &PartDetectorConfig, search: S) -> Result<Self, PartDetectorError> {
        let model = PartModel::load_json(&config.model_path)?;
        Self::from_model(model, search, config.num_workers)
    }

    pub fn from_model(
        model: PartModel,
        search: S,
        num_workers: usize,
    ) -> Result<Self, PartDetectorError> {
        model.validate()?;
        if num_workers == 0 {
            return Err(PartDetectorError::InvalidWorkers);
        }
        let root = model.root_filter();
        log::info!(
            "part detector loaded: {} components, root filter {}x{}, {} workers",
            model.components.len(),
            root.size_x,
            root.size_y,
            num_workers
        );
        Ok(Self {
            model,
            search,
            num_workers,
        })
    }

    pub fn model(&self) -> &PartModel {
        &self.model
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    pub fn search(&self) -> &S {
        &self.search
    }
}

impl<S: PartSearch> BodyPartDetector for DpmPartDetector<S> {
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, image), fields(width = image.width, height = image.height))
    )]
    fn detect_parts(&self, image: &ColorView<'_>) -> Result<Vec<PixelRect>, PartDetectorError> {
        let mut last = Vec::new();
        for component in 0..self.model.components.len() {
            last = self
                .search
                .search_component(image, &self.model, component, self.num_workers)
                .map_err(|err| {
                    log::warn!("part search failed on component {component}: {err}");
                    PartDetectorError::Search {
                        component,
                        source: Box::new(err),
                    }
                })?;
            log::debug!(
                "component {component}: {} placements above threshold",
                last.len()
            );
        }

        let component = self.model.components.len() - 1;
        let filters = self.model.box_component();
        let Some(best) = best_placement(&last) else {
            return Ok(Vec::new());
        };
        if best.parts.len() != filters.parts.len() {
            return Err(PartDetectorError::MalformedPlacement {
                component,
                expected: filters.parts.len(),
                got: best.parts.len(),
            });
        }
        Ok(placement_boxes(filters, best))
    }
}
