use player_blobs_core::{ColorView, PixelPoint};
use serde::{Deserialize, Serialize};

use crate::PartModel;

/// One scored placement of a mixture component.
///
/// Anchors are top-left filter corners in image pixels. `level` is the
/// feature-pyramid level the root was found on; parts live one octave
/// (`LAMBDA` levels) finer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartPlacement {
    pub root: PixelPoint,
    pub level: i32,
    pub score: f32,
    /// One anchor per part filter, in filter order.
    pub parts: Vec<PixelPoint>,
}

/// External latent-SVM search over a feature pyramid.
///
/// Implementations wrap a third-party detector. The call is synchronous and
/// must not retain the image. `num_workers` is passed through untouched.
pub trait PartSearch {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Placements of `model.components[component]` scoring above the model threshold.
    fn search_component(
        &self,
        image: &ColorView<'_>,
        model: &PartModel,
        component: usize,
        num_workers: usize,
    ) -> Result<Vec<PartPlacement>, Self::Error>;
}

impl<S: PartSearch + ?Sized> PartSearch for &S {
    type Error = S::Error;

    fn search_component(
        &self,
        image: &ColorView<'_>,
        model: &PartModel,
        component: usize,
        num_workers: usize,
    ) -> Result<Vec<PartPlacement>, Self::Error> {
        (**self).search_component(image, model, component, num_workers)
    }
}
