use std::cell::RefCell;

use player_blobs_core::{
    ColorImage, ColorView, Frame, MaskImage, PixelPoint, PixelRect, PlayerCandidate,
};
use player_blobs_extract::BlobExtractor;
use player_blobs_parts::{
    boxes::LAMBDA, refine_all, refine_candidate, ComponentModel, DpmPartDetector, FilterSize,
    PartDetectorConfig, PartDetectorError, PartModel, PartModelError, PartPlacement, PartSearch,
    RefineError,
};

#[derive(thiserror::Error, Debug)]
#[error("backend unavailable")]
struct Unavailable;

/// Backend that answers from a table and records every call.
#[derive(Default)]
struct ScriptedSearch {
    per_component: Vec<Vec<PartPlacement>>,
    fail_on: Option<usize>,
    calls: RefCell<Vec<(usize, usize, usize, usize)>>,
}

impl PartSearch for ScriptedSearch {
    type Error = Unavailable;

    fn search_component(
        &self,
        image: &ColorView<'_>,
        _model: &PartModel,
        component: usize,
        num_workers: usize,
    ) -> Result<Vec<PartPlacement>, Unavailable> {
        self.calls
            .borrow_mut()
            .push((component, num_workers, image.width, image.height));
        if self.fail_on == Some(component) {
            return Err(Unavailable);
        }
        Ok(self.per_component.get(component).cloned().unwrap_or_default())
    }
}

fn filter(size_x: u32, size_y: u32) -> FilterSize {
    FilterSize { size_x, size_y }
}

fn person_model() -> PartModel {
    PartModel {
        components: vec![
            ComponentModel {
                root: filter(4, 10),
                parts: vec![filter(4, 4)],
                bias: 0.0,
            },
            ComponentModel {
                root: filter(3, 10),
                parts: vec![filter(6, 4), filter(6, 4)],
                bias: 0.0,
            },
        ],
        score_threshold: -1.0,
    }
}

fn placement(root: (i32, i32), level: i32, score: f32, parts: &[(i32, i32)]) -> PartPlacement {
    PartPlacement {
        root: PixelPoint::new(root.0, root.1),
        level,
        score,
        parts: parts.iter().map(|&(x, y)| PixelPoint::new(x, y)).collect(),
    }
}

/// Placements for a silhouette drawn 20px inside the candidate crop.
fn player_search() -> ScriptedSearch {
    ScriptedSearch {
        per_component: vec![
            vec![placement((0, 0), LAMBDA + 5, 9.0, &[(1, 1)])],
            vec![
                placement((0, 0), LAMBDA - 2, 5.0, &[(0, 0), (0, 0)]),
                placement((22, 22), LAMBDA, 0.1, &[(22, 30), (22, 30)]),
                placement((20, 20), LAMBDA, 0.7, &[(20, 34), (20, 38)]),
            ],
        ],
        ..Default::default()
    }
}

fn player_candidate() -> PlayerCandidate {
    let mut mask = MaskImage::new(160, 200);
    let (x, y) = (30, 40);
    for r in [
        PixelRect::new(x + 8, y, 10, 10),
        PixelRect::new(x, y + 14, 26, 36),
        PixelRect::new(x + 2, y + 56, 8, 30),
        PixelRect::new(x + 16, y + 56, 8, 30),
    ] {
        mask.fill_rect(&r);
    }
    let frame = Frame::new(5, mask, ColorImage::new(160, 200)).expect("frame");
    let mut players = BlobExtractor::default().extract(&frame);
    assert_eq!(players.len(), 1);
    players.remove(0)
}

#[test]
fn refines_extracted_candidate() {
    let detector = DpmPartDetector::from_model(person_model(), player_search(), 3).expect("detector");
    let mut candidate = player_candidate();
    assert_eq!(candidate.crop, PixelRect::new(10, 20, 65, 125));

    refine_candidate(&detector, &mut candidate).expect("refine");

    assert_eq!(
        candidate.features.body_parts,
        vec![
            PixelRect::new(20, 20, 24, 80),
            PixelRect::new(20, 34, 24, 16),
            PixelRect::new(20, 38, 24, 16),
        ]
    );
    let torso = candidate.features.torso.as_ref().expect("torso");
    assert_eq!(torso.rect, PixelRect::new(20, 36, 24, 16));
    assert_eq!(torso.mask.view().count_foreground(), 24 * 16);

    let summary = candidate.summary();
    assert_eq!(summary.body_parts.len(), 3);
    assert_eq!(summary.torso, Some(torso.rect));
}

#[test]
fn searches_every_component_on_the_crop() {
    let search = player_search();
    let detector = DpmPartDetector::from_model(person_model(), &search, 3).expect("detector");
    let mut candidate = player_candidate();
    refine_candidate(&detector, &mut candidate).expect("refine");

    assert_eq!(
        *search.calls.borrow(),
        vec![(0, 3, 65, 125), (1, 3, 65, 125)]
    );
}

#[test]
fn no_placements_means_no_features() {
    let detector =
        DpmPartDetector::from_model(person_model(), ScriptedSearch::default(), 1).expect("detector");
    let mut candidate = player_candidate();
    refine_candidate(&detector, &mut candidate).expect("refine");
    assert!(candidate.features.body_parts.is_empty());
    assert!(candidate.features.torso.is_none());
}

#[test]
fn backend_failure_leaves_candidate_untouched() {
    let search = ScriptedSearch {
        fail_on: Some(0),
        ..player_search()
    };
    let detector = DpmPartDetector::from_model(person_model(), &search, 1).expect("detector");
    let mut candidate = player_candidate();
    let before = candidate.clone();

    let err = refine_candidate(&detector, &mut candidate).unwrap_err();
    assert!(matches!(
        err,
        RefineError::Detect(PartDetectorError::Search { component: 0, .. })
    ));
    assert_eq!(candidate, before);
    assert_eq!(search.calls.borrow().len(), 1);

    let mut batch = vec![candidate];
    assert_eq!(refine_all(&detector, &mut batch), 0);
}

#[test]
fn placement_with_wrong_part_count_is_rejected() {
    let search = ScriptedSearch {
        per_component: vec![Vec::new(), vec![placement((0, 0), LAMBDA, 1.0, &[(0, 0)])]],
        ..Default::default()
    };
    let detector = DpmPartDetector::from_model(person_model(), search, 1).expect("detector");
    let mut candidate = player_candidate();
    assert!(matches!(
        refine_candidate(&detector, &mut candidate),
        Err(RefineError::Detect(PartDetectorError::MalformedPlacement {
            component: 1,
            expected: 2,
            got: 1,
        }))
    ));
}

#[test]
fn loads_model_from_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("person.json");
    person_model().write_json(&path).expect("write model");

    let config = PartDetectorConfig::new(&path);
    assert_eq!(config.num_workers, 4);
    let detector = DpmPartDetector::new(&config, ScriptedSearch::default()).expect("detector");
    assert_eq!(detector.model(), &person_model());
    assert_eq!(detector.num_workers(), 4);
}

#[test]
fn construction_fails_fast() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = PartDetectorConfig::new(dir.path().join("missing.json"));
    assert!(matches!(
        DpmPartDetector::new(&missing, ScriptedSearch::default()),
        Err(PartDetectorError::Model(PartModelError::Io(_)))
    ));

    assert!(matches!(
        DpmPartDetector::from_model(person_model(), ScriptedSearch::default(), 0),
        Err(PartDetectorError::InvalidWorkers)
    ));

    let empty = PartModel {
        components: Vec::new(),
        score_threshold: 0.0,
    };
    assert!(matches!(
        DpmPartDetector::from_model(empty, ScriptedSearch::default(), 1),
        Err(PartDetectorError::Model(PartModelError::Invalid(_)))
    ));
}
