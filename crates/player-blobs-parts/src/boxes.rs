//! Conversion of scored placements into pixel boxes.

use player_blobs_core::{PixelPoint, PixelRect};

use crate::{ComponentModel, FilterSize, PartPlacement};

/// Pyramid levels per octave.
pub const LAMBDA: i32 = 10;
/// Pixels per feature cell.
pub const SIDE_LENGTH: f32 = 8.0;

/// Pixels per filter cell on pyramid degree `degree`: `SIDE_LENGTH * 2^(degree / LAMBDA)`.
pub fn level_scale(degree: i32) -> f32 {
    SIDE_LENGTH * 2.0f32.powf(degree as f32 / LAMBDA as f32)
}

/// Far corner of a filter anchored at `anchor` on pyramid degree `degree`.
///
/// Coordinates are truncated towards zero.
pub fn opposite_point(anchor: PixelPoint, filter: FilterSize, degree: i32) -> PixelPoint {
    let scale = level_scale(degree);
    PixelPoint::new(
        (anchor.x as f32 + filter.size_x as f32 * scale) as i32,
        (anchor.y as f32 + filter.size_y as f32 * scale) as i32,
    )
}

/// Highest-scoring placement among those on the coarsest level found.
///
/// Ties keep the first placement.
pub fn best_placement(placements: &[PartPlacement]) -> Option<&PartPlacement> {
    let max_level = placements.iter().map(|p| p.level).max()?;
    placements
        .iter()
        .filter(|p| p.level == max_level)
        .fold(None, |best: Option<&PartPlacement>, p| match best {
            Some(b) if b.score >= p.score => Some(b),
            _ => Some(p),
        })
}

/// Root box followed by one box per part filter.
///
/// Roots sit `LAMBDA` levels above the image scale, parts `2 * LAMBDA`.
pub fn placement_boxes(component: &ComponentModel, placement: &PartPlacement) -> Vec<PixelRect> {
    let mut boxes = Vec::with_capacity(1 + component.parts.len());

    let root_far = opposite_point(placement.root, component.root, placement.level - LAMBDA);
    boxes.push(PixelRect::from_corners(placement.root, root_far));

    for (&anchor, &filter) in placement.parts.iter().zip(&component.parts) {
        let far = opposite_point(anchor, filter, placement.level - 2 * LAMBDA);
        boxes.push(PixelRect::from_corners(anchor, far));
    }
    boxes
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn placement(level: i32, score: f32) -> PartPlacement {
        PartPlacement {
            root: PixelPoint::new(10, 20),
            level,
            score,
            parts: vec![PixelPoint::new(12, 30), PixelPoint::new(14, 60)],
        }
    }

    #[test]
    fn scale_doubles_every_octave() {
        assert_relative_eq!(level_scale(0), 8.0);
        assert_relative_eq!(level_scale(-LAMBDA), 4.0);
        assert_relative_eq!(level_scale(LAMBDA), 16.0, epsilon = 1e-5);
        assert_relative_eq!(level_scale(1) / level_scale(0), 1.071_773_5, epsilon = 1e-6);
    }

    #[test]
    fn opposite_point_scales_with_degree() {
        let f = FilterSize {
            size_x: 6,
            size_y: 14,
        };
        assert_eq!(
            opposite_point(PixelPoint::new(10, 20), f, 0),
            PixelPoint::new(58, 132)
        );
        assert_eq!(
            opposite_point(PixelPoint::new(10, 20), f, -LAMBDA),
            PixelPoint::new(34, 76)
        );
    }

    #[test]
    fn best_placement_prefers_coarsest_level_then_score() {
        let placements = vec![
            placement(12, 3.0),
            placement(14, 0.5),
            placement(14, 0.9),
            placement(14, 0.9),
        ];
        let best = best_placement(&placements).expect("best");
        assert_eq!(best.level, 14);
        assert_eq!(best.score, 0.9);
        assert!(std::ptr::eq(best, &placements[2]));
        assert!(best_placement(&[]).is_none());
    }

    #[test]
    fn boxes_start_with_root() {
        let component = ComponentModel {
            root: FilterSize {
                size_x: 6,
                size_y: 14,
            },
            parts: vec![
                FilterSize {
                    size_x: 6,
                    size_y: 6,
                },
                FilterSize {
                    size_x: 4,
                    size_y: 8,
                },
            ],
            bias: 0.0,
        };
        let boxes = placement_boxes(&component, &placement(LAMBDA, 1.0));
        assert_eq!(
            boxes,
            vec![
                PixelRect::new(10, 20, 48, 112),
                PixelRect::new(12, 30, 24, 24),
                PixelRect::new(14, 60, 16, 32),
            ]
        );
    }
}
