// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Hit testing drop points against registered anchors.

use crate::interact::AnchorMap;
use crate::model::{AnchorKey, EquationId, TileId};
use kurbo::Point;

/// A successful anchor hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorHit {
    pub key: AnchorKey,
    pub distance: f64,
}

/// The registered anchor closest to `point`, within `max_dist`.
pub fn closest_anchor(point: Point, anchors: &AnchorMap, max_dist: f64) -> Option<AnchorHit> {
    let mut best: Option<AnchorHit> = None;
    for (key, center) in anchors.iter() {
        let distance = point.distance(center);
        if distance > max_dist {
            continue;
        }
        match best {
            Some(hit) if hit.distance <= distance => {}
            _ => {
                best = Some(AnchorHit {
                    key: *key,
                    distance,
                });
            }
        }
    }
    best
}

/// The equation whose variable anchor is closest to `point`, within
/// `max_dist`. Used to resolve the drop target of a rewrite-drag:
/// expression anchors are not drop targets and are skipped.
pub fn closest_equation_anchor(
    point: Point,
    anchors: &AnchorMap,
    max_dist: f64,
) -> Option<(EquationId, AnchorHit)> {
    let mut best: Option<(EquationId, AnchorHit)> = None;
    for (key, center) in anchors.iter() {
        let TileId::Equation(equation) = key.tile else {
            continue;
        };
        let distance = point.distance(center);
        if distance > max_dist {
            continue;
        }
        match best {
            Some((_, hit)) if hit.distance <= distance => {}
            _ => {
                best = Some((
                    equation,
                    AnchorHit {
                        key: *key,
                        distance,
                    },
                ));
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interact::PositionMap;
    use crate::model::{ExpressionId, VarId};

    fn registry(entries: &[(TileId, Point)]) -> (AnchorMap, Vec<AnchorKey>) {
        let mut anchors = AnchorMap::new();
        let mut positions = PositionMap::new();
        let mut keys = Vec::new();
        for &(tile, center) in entries {
            let key = AnchorKey::new(tile, VarId::next());
            anchors.register(key, center);
            positions = positions.set(tile, Point::ZERO);
            keys.push(key);
        }
        anchors.refresh(&positions);
        (anchors, keys)
    }

    #[test]
    fn closest_wins_within_radius() {
        let tile = TileId::Equation(EquationId::next());
        let (anchors, keys) = registry(&[
            (tile, Point::new(0.0, 0.0)),
            (tile, Point::new(10.0, 0.0)),
        ]);

        let hit = closest_anchor(Point::new(7.0, 0.0), &anchors, 16.0).unwrap();
        assert_eq!(hit.key, keys[1]);
        assert_eq!(hit.distance, 3.0);
    }

    #[test]
    fn nothing_beyond_the_radius() {
        let tile = TileId::Equation(EquationId::next());
        let (anchors, _) = registry(&[(tile, Point::ZERO)]);
        assert_eq!(closest_anchor(Point::new(100.0, 0.0), &anchors, 16.0), None);
    }

    #[test]
    fn equation_filter_skips_expression_anchors() {
        let eq = EquationId::next();
        let (anchors, keys) = registry(&[
            (TileId::Expression(ExpressionId::next()), Point::new(1.0, 0.0)),
            (TileId::Equation(eq), Point::new(5.0, 0.0)),
        ]);

        let (target, hit) =
            closest_equation_anchor(Point::new(0.0, 0.0), &anchors, 16.0).unwrap();
        assert_eq!(target, eq);
        assert_eq!(hit.key, keys[1]);
    }

    #[test]
    fn equation_filter_returns_none_when_only_expressions_are_near() {
        let (anchors, _) = registry(&[(
            TileId::Expression(ExpressionId::next()),
            Point::ZERO,
        )]);
        assert_eq!(closest_equation_anchor(Point::ZERO, &anchors, 16.0), None);
    }
}
