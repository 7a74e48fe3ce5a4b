// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Paint helpers for the canvas widget: tiles, glyph coloring, and the
//! equality-line overlay.

use super::layout::{BoxKind, RenderBox, TileLayout};
use crate::interact::{AnchorMap, DragSession};
use crate::model::{TileId, VarId, Workspace};
use crate::theme;
use kurbo::{Affine, Line, Point, Rect, Stroke, Vec2};
use masonry::core::render_text;
use masonry::kurbo::Size;
use masonry::util::fill_color;
use masonry::vello::Scene;
use masonry::vello::peniko::{Brush, Color, Fill};

const TILE_CORNER_RADIUS: f64 = 6.0;

pub(super) fn paint_background(scene: &mut Scene, canvas_size: Size) {
    let bg_rect = canvas_size.to_rect();
    fill_color(scene, &bg_rect, theme::canvas::BACKGROUND);
}

// ===== Tiles =====

pub(super) fn paint_tiles(
    scene: &mut Scene,
    tiles: &[TileLayout],
    drag: &DragSession,
    workspace: &Workspace,
) {
    for tile in tiles {
        paint_tile(scene, tile, drag, workspace);
    }
}

fn paint_tile(scene: &mut Scene, tile: &TileLayout, drag: &DragSession, workspace: &Workspace) {
    let rect = tile.rect();
    let background = match tile.tile {
        TileId::Equation(_) => theme::tile::EQUATION_BACKGROUND,
        TileId::Expression(_) => theme::tile::EXPRESSION_BACKGROUND,
    };

    let card = rect.to_rounded_rect(TILE_CORNER_RADIUS);
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        &Brush::Solid(background),
        None,
        &card,
    );
    scene.stroke(
        &Stroke::new(1.0),
        Affine::IDENTITY,
        &Brush::Solid(theme::tile::OUTLINE),
        None,
        &card,
    );

    let offset = tile.origin.to_vec2();
    paint_box(scene, &tile.root, offset, None, drag, workspace);
}

/// Recursively paint one rendered box. `var_ctx` is the innermost enclosing
/// variable glyph, which decides the text color of its leaves.
fn paint_box(
    scene: &mut Scene,
    render_box: &RenderBox,
    offset: Vec2,
    var_ctx: Option<VarId>,
    drag: &DragSession,
    workspace: &Workspace,
) {
    let mut var_ctx = var_ctx;
    match &render_box.kind {
        BoxKind::Group => {}
        BoxKind::Text { layout, .. } => {
            let color = match var_ctx {
                Some(var) => variable_color(drag, var, workspace, false)
                    .unwrap_or(theme::variable::NEUTRAL),
                None => theme::tile::TEXT,
            };
            let origin = render_box.rect.origin() + offset;
            render_text(
                scene,
                Affine::translate((origin.x, origin.y)),
                layout,
                &[Brush::Solid(color)],
                false,
            );
        }
        BoxKind::Fraction { bar } => {
            let line = Line::new(bar.p0 + offset, bar.p1 + offset);
            scene.stroke(
                &Stroke::new(1.5),
                Affine::IDENTITY,
                &Brush::Solid(theme::tile::TEXT),
                None,
                &line,
            );
        }
        BoxKind::Var { var } => {
            // Highlight the glyph region while a connect-drag colors it
            if variable_color(drag, *var, workspace, false).is_some() {
                let region = (render_box.rect + offset).to_rounded_rect(3.0);
                scene.fill(
                    Fill::NonZero,
                    Affine::IDENTITY,
                    &Brush::Solid(theme::variable::HIGHLIGHT_FILL),
                    None,
                    &region,
                );
            }
            var_ctx = Some(*var);
        }
        BoxKind::Close => {
            paint_close_glyph(scene, render_box.rect + offset);
        }
    }

    for child in &render_box.children {
        paint_box(scene, child, offset, var_ctx, drag, workspace);
    }
}

fn paint_close_glyph(scene: &mut Scene, rect: Rect) {
    let inset = rect.inset(-3.0);
    let stroke = Stroke::new(1.5);
    let brush = Brush::Solid(theme::tile::CLOSE);
    scene.stroke(
        &stroke,
        Affine::IDENTITY,
        &brush,
        None,
        &Line::new(Point::new(inset.x0, inset.y0), Point::new(inset.x1, inset.y1)),
    );
    scene.stroke(
        &stroke,
        Affine::IDENTITY,
        &brush,
        None,
        &Line::new(Point::new(inset.x1, inset.y0), Point::new(inset.x0, inset.y1)),
    );
}

// ===== Variable compatibility coloring =====

/// Color of a variable glyph given the interaction state.
///
/// No connect-drag: no color. During one: grey when the dimensions differ
/// (not a drop target), green when the variables are already equal (drop is
/// a no-op), red when the drop would connect them. The `muted` flag is for
/// display-only contexts and always wins.
pub fn variable_color(
    drag: &DragSession,
    var: VarId,
    workspace: &Workspace,
    muted: bool,
) -> Option<Color> {
    if muted {
        return Some(theme::variable::MUTED);
    }
    let DragSession::Connect { source, .. } = drag else {
        return None;
    };
    let source_dim = workspace.dimension(*source)?;
    let var_dim = workspace.dimension(var)?;
    if !source_dim.equal_units(&var_dim) {
        return Some(theme::variable::MUTED);
    }
    if var == *source || workspace.are_equal(var, *source) {
        Some(theme::variable::CONNECTED)
    } else {
        Some(theme::variable::COMPATIBLE)
    }
}

// ===== Equality-line overlay =====

/// Endpoint pairs for every equality line: each unordered pair of a
/// mutually-equal set exactly once (the strictly-greater ordering guard
/// prevents double-drawing and self-loops). Pairs with an unrendered
/// endpoint are skipped, not errors.
pub fn equality_segments(workspace: &Workspace, anchors: &AnchorMap) -> Vec<(Point, Point)> {
    let mut segments = Vec::new();
    for class in workspace.equality_classes() {
        for &a in &class {
            for &b in &class {
                if b <= a {
                    continue;
                }
                if let (Some(pa), Some(pb)) = (anchors.lookup_var(a), anchors.lookup_var(b)) {
                    segments.push((pa, pb));
                }
            }
        }
    }
    segments
}

pub(super) fn paint_overlay(
    scene: &mut Scene,
    workspace: &Workspace,
    anchors: &AnchorMap,
    drag: &DragSession,
) {
    for (a, b) in equality_segments(workspace, anchors) {
        scene.stroke(
            &Stroke::new(1.5),
            Affine::IDENTITY,
            &Brush::Solid(theme::line::EQUALITY),
            None,
            &Line::new(a, b),
        );
    }

    // Live line from the grab point to the pointer during a drag gesture
    if let DragSession::Connect { start, current, .. }
    | DragSession::Rewrite { start, current, .. } = drag
    {
        scene.stroke(
            &Stroke::new(1.5).with_dashes(0.0, [6.0, 4.0]),
            Affine::IDENTITY,
            &Brush::Solid(theme::line::LIVE),
            None,
            &Line::new(*start, *current),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interact::PositionMap;
    use crate::model::{AnchorKey, EquationId, Library};

    fn energy_rig() -> (Workspace, Vec<VarId>) {
        let lib = Library::builtin();
        let ws = Workspace::new()
            .add_equation(lib.get("ke_def").unwrap())
            .add_equation(lib.get("pe_def").unwrap())
            .add_equation(lib.get("work").unwrap());
        let vars = ws.equations().map(|eq| eq.lhs).collect();
        (ws, vars)
    }

    #[test]
    fn no_color_outside_a_connect_drag() {
        let (ws, vars) = energy_rig();
        assert_eq!(variable_color(&DragSession::Idle, vars[0], &ws, false), None);
    }

    #[test]
    fn muted_always_wins() {
        let (ws, vars) = energy_rig();
        assert_eq!(
            variable_color(&DragSession::Idle, vars[0], &ws, true),
            Some(theme::variable::MUTED)
        );
    }

    #[test]
    fn coloring_during_a_connect_drag() {
        let (ws, vars) = energy_rig();
        let mass = ws.equations().next().unwrap().vars[1];
        let drag = DragSession::Connect {
            source: vars[0],
            start: Point::ZERO,
            current: Point::ZERO,
        };

        // Same dimension, not yet connected: valid drop target
        assert_eq!(
            variable_color(&drag, vars[1], &ws, false),
            Some(theme::variable::COMPATIBLE)
        );
        // The source itself: already "equal"
        assert_eq!(
            variable_color(&drag, vars[0], &ws, false),
            Some(theme::variable::CONNECTED)
        );
        // Different dimension: cannot be a target
        assert_eq!(
            variable_color(&drag, mass, &ws, false),
            Some(theme::variable::MUTED)
        );

        // After declaring equal: green
        let ws = ws.declare_equal(vars[0], vars[1]).unwrap();
        assert_eq!(
            variable_color(&drag, vars[1], &ws, false),
            Some(theme::variable::CONNECTED)
        );
    }

    #[test]
    fn overlay_draws_each_pair_of_a_class_once() {
        let (ws, vars) = energy_rig();
        let (a, b, c) = (vars[0], vars[1], vars[2]);
        let ws = ws
            .declare_equal(a, b)
            .unwrap()
            .declare_equal(b, c)
            .unwrap();

        // Register anchors for all three plus an unrelated variable
        let independent = ws.equations().next().unwrap().vars[1];
        let mut anchors = AnchorMap::new();
        let mut positions = PositionMap::new();
        for (i, &var) in [a, b, c, independent].iter().enumerate() {
            let tile = TileId::Equation(EquationId::next());
            anchors.register(
                AnchorKey::new(tile, var),
                Point::new(i as f64 * 10.0, 0.0),
            );
            positions = positions.set(tile, Point::ZERO);
        }
        anchors.refresh(&positions);

        let segments = equality_segments(&ws, &anchors);
        assert_eq!(segments.len(), 3);

        let independent_point = anchors.lookup_var(independent).unwrap();
        for (p, q) in &segments {
            assert_ne!(*p, independent_point);
            assert_ne!(*q, independent_point);
            assert_ne!(p, q);
        }
    }

    #[test]
    fn overlay_skips_pairs_with_unrendered_endpoints() {
        let (ws, vars) = energy_rig();
        let ws = ws.declare_equal(vars[0], vars[1]).unwrap();

        // Only one endpoint registered
        let mut anchors = AnchorMap::new();
        anchors.register(
            AnchorKey::new(TileId::Equation(EquationId::next()), vars[0]),
            Point::ZERO,
        );

        assert!(equality_segments(&ws, &anchors).is_empty());
    }
}
