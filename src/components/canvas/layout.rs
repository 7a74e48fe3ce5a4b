// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! The tree renderer: display trees to positioned boxes.
//!
//! `layout_node` recursively converts a `DisplayNode` into a `RenderBox`
//! tree with resolved rects. The match over node variants is exhaustive, so
//! a new display variant that the renderer does not handle fails the build
//! instead of rendering a blank region. Variable boxes are the only
//! interactive ones: they register anchors and win hit tests; leaf text
//! spans double as tile-drag handles; layout nodes are pure spacers.

use crate::geometry;
use crate::interact::{AnchorMap, PositionMap};
use crate::model::{Align, AnchorKey, Axis, DisplayNode, TileId, VarId, Workspace};
use crate::settings;
use kurbo::{Line, Point, Rect, Size, Vec2};
use masonry::core::{BrushIndex, StyleProperty};
use parley::GenericFamily;
use parley::{FontContext, Layout, LayoutContext};

// ===== Text measurement =====

/// Shared parley contexts for building text layouts
pub struct TextEngine {
    font_cx: FontContext,
    layout_cx: LayoutContext<BrushIndex>,
}

impl TextEngine {
    pub fn new() -> Self {
        Self {
            font_cx: FontContext::default(),
            layout_cx: LayoutContext::new(),
        }
    }

    /// Build a single-line text layout at the given font size
    pub fn layout(&mut self, text: &str, font_size: f32) -> Layout<BrushIndex> {
        let mut builder = self.layout_cx.ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font_size));
        builder.push_default(StyleProperty::FontStack(parley::FontStack::Single(
            parley::FontFamily::Generic(GenericFamily::SansSerif),
        )));
        builder.push_default(StyleProperty::Brush(BrushIndex(0)));
        let mut layout = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ===== Rendered boxes =====

/// What a rendered box is, and what interaction it carries
pub enum BoxKind {
    /// Pure spacer; no interactivity
    Group,
    /// Literal text; the tile-drag handle
    Text {
        text: String,
        layout: Layout<BrushIndex>,
    },
    /// Fraction wrapper; `bar` is the divider in tile-local coords
    Fraction { bar: Line },
    /// Interactive variable glyph
    Var { var: VarId },
    /// Close region on expression tiles
    Close,
}

/// One node of the rendered output tree. Rects are in coordinates local to
/// the owning tile's origin once the tile is assembled.
pub struct RenderBox {
    pub rect: Rect,
    pub kind: BoxKind,
    pub children: Vec<RenderBox>,
}

impl RenderBox {
    fn new(size: Size, kind: BoxKind, children: Vec<RenderBox>) -> Self {
        Self {
            rect: Rect::from_origin_size(Point::ZERO, size),
            kind,
            children,
        }
    }

    fn width(&self) -> f64 {
        self.rect.width()
    }

    fn height(&self) -> f64 {
        self.rect.height()
    }

    /// Shift this box and everything inside it
    fn translate(&mut self, delta: Vec2) {
        self.rect = self.rect + delta;
        if let BoxKind::Fraction { bar } = &mut self.kind {
            *bar = Line::new(bar.p0 + delta, bar.p1 + delta);
        }
        for child in &mut self.children {
            child.translate(delta);
        }
    }
}

/// Result of hit-testing a point against one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileHit {
    /// A variable glyph (innermost wrapper wins)
    Variable(VarId),
    /// A leaf text span: the tile-drag handle
    Body,
    /// The close region of an expression tile
    Close,
}

/// One laid-out tile: its canvas placement plus its rendered content tree
pub struct TileLayout {
    pub tile: TileId,
    pub origin: Point,
    pub size: Size,
    pub root: RenderBox,
}

impl TileLayout {
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Hit-test a canvas point against this tile's content
    pub fn hit(&self, canvas_point: Point) -> Option<TileHit> {
        let rect = self.rect();
        if !rect.contains(canvas_point) {
            return None;
        }
        let local =
            geometry::relative_pointer_position(canvas_point, &rect, &Rect::ZERO);
        hit_box(&self.root, local)
    }

    /// Register every variable glyph's center, local to the tile origin
    pub fn register_anchors(&self, anchors: &mut AnchorMap) {
        register_boxes(self.tile, &self.root, anchors);
    }
}

fn register_boxes(tile: TileId, render_box: &RenderBox, anchors: &mut AnchorMap) {
    if let BoxKind::Var { var } = render_box.kind {
        anchors.register(
            AnchorKey::new(tile, var),
            geometry::center(&render_box.rect),
        );
    }
    for child in &render_box.children {
        register_boxes(tile, child, anchors);
    }
}

fn hit_box(render_box: &RenderBox, point: Point) -> Option<TileHit> {
    if !render_box.rect.contains(point) {
        return None;
    }
    // Later children draw on top, so they win
    let child_hit = render_box
        .children
        .iter()
        .rev()
        .find_map(|child| hit_box(child, point));
    match &render_box.kind {
        BoxKind::Close => Some(TileHit::Close),
        BoxKind::Text { .. } => Some(TileHit::Body),
        BoxKind::Var { var } => match child_hit {
            Some(hit @ TileHit::Variable(_)) => Some(hit),
            // The wrapper's padding and its leaf both act as the glyph
            _ => Some(TileHit::Variable(*var)),
        },
        BoxKind::Group | BoxKind::Fraction { .. } => child_hit,
    }
}

// ===== Layout of a whole workspace =====

/// Lay out every tile of the workspace and register its anchors.
///
/// This runs inside the widget's paint pass, after any model or position
/// change: re-registering here is the explicit "layout committed" point
/// that replaces timer-deferred anchor refreshes. Pass order is equations
/// then expressions; later tiles draw (and hit-test) on top.
pub fn layout_workspace(
    workspace: &Workspace,
    positions: &PositionMap,
    anchors: &mut AnchorMap,
    engine: &mut TextEngine,
) -> Vec<TileLayout> {
    anchors.begin_pass();
    let mut tiles = Vec::new();

    for equation in workspace.equations() {
        let tile = TileId::Equation(equation.id);
        let display = workspace
            .equation_display(equation.id)
            .expect("equation iterated from this workspace");
        tiles.push(layout_tile(tile, display, false, positions, engine));
    }
    for expression in workspace.expressions() {
        let tile = TileId::Expression(expression.id);
        let display = workspace
            .expression_display(expression.id)
            .expect("expression iterated from this workspace");
        tiles.push(layout_tile(tile, display, true, positions, engine));
    }

    for tile in &tiles {
        tile.register_anchors(anchors);
    }
    anchors.refresh(positions);
    tiles
}

fn layout_tile(
    tile: TileId,
    display: &DisplayNode,
    closeable: bool,
    positions: &PositionMap,
    engine: &mut TextEngine,
) -> TileLayout {
    let pad = settings::tile::PADDING;
    let mut content = layout_node(display, engine, settings::math::FONT_SIZE);
    content.translate(Vec2::new(pad, pad));

    let mut width = content.width() + pad * 2.0;
    let height = content.height() + pad * 2.0;
    let mut children = vec![content];

    if closeable {
        let close_size = settings::tile::CLOSE_SIZE;
        let mut close = RenderBox::new(
            Size::new(close_size, close_size),
            BoxKind::Close,
            Vec::new(),
        );
        close.translate(Vec2::new(width - pad * 0.5, pad * 0.5));
        width += close_size;
        children.push(close);
    }

    let size = Size::new(width, height);
    let root = RenderBox {
        rect: Rect::from_origin_size(Point::ZERO, size),
        kind: BoxKind::Group,
        children,
    };

    let origin = match positions.get(tile) {
        Some(origin) => origin,
        None => {
            // Placement happens when the tile is added; reaching this
            // means the host skipped it. Fall back to the spawn corner.
            tracing::warn!(?tile, "tile has no position entry");
            settings::tile::spawn_origin()
        }
    };

    TileLayout {
        tile,
        origin: geometry::position(&Rect::from_origin_size(origin, size)),
        size,
        root,
    }
}

// ===== Layout of one display tree =====

/// Whether a row item is shifted off the row centerline
#[derive(Clone, Copy, PartialEq)]
enum Script {
    None,
    Raised,
    Lowered,
}

fn script_of(node: &DisplayNode) -> Script {
    match node {
        DisplayNode::Superscript { .. } => Script::Raised,
        DisplayNode::Subscript { .. } => Script::Lowered,
        _ => Script::None,
    }
}

/// Recursively lay out one display node. The returned box sits at the
/// origin; parents translate it into place.
pub fn layout_node(node: &DisplayNode, engine: &mut TextEngine, font_size: f32) -> RenderBox {
    match node {
        DisplayNode::Layout {
            axis: Axis::Row,
            align,
            children,
        } => layout_row(children, engine, font_size, *align),
        DisplayNode::Layout {
            axis: Axis::Column,
            align,
            children,
        } => layout_column(children, engine, font_size, *align),
        DisplayNode::Superscript { children } | DisplayNode::Subscript { children } => {
            // Scale down; vertical shift is applied by the enclosing row
            layout_row(
                children,
                engine,
                font_size * settings::math::SCRIPT_SCALE,
                Align::Center,
            )
        }
        DisplayNode::Fraction {
            numerator,
            denominator,
        } => layout_fraction(numerator, denominator, engine, font_size),
        DisplayNode::Leaf { text } => {
            let layout = engine.layout(text, font_size);
            let size = Size::new(layout.width() as f64, layout.height() as f64);
            RenderBox::new(
                size,
                BoxKind::Text {
                    text: text.clone(),
                    layout,
                },
                Vec::new(),
            )
        }
        DisplayNode::Var { var, inner } => {
            let pad = settings::math::VAR_PADDING;
            let mut inner_box = layout_node(inner, engine, font_size);
            inner_box.translate(Vec2::new(pad, pad));
            let size = Size::new(
                inner_box.width() + pad * 2.0,
                inner_box.height() + pad * 2.0,
            );
            RenderBox::new(size, BoxKind::Var { var: *var }, vec![inner_box])
        }
    }
}

fn layout_row(
    children: &[DisplayNode],
    engine: &mut TextEngine,
    font_size: f32,
    align: Align,
) -> RenderBox {
    let boxes: Vec<(RenderBox, Script)> = children
        .iter()
        .map(|child| (layout_node(child, engine, font_size), script_of(child)))
        .collect();

    // The row baseline height comes from the unshifted items; a row of
    // nothing but scripts falls back to the tallest item.
    let base_h = boxes
        .iter()
        .filter(|(_, script)| *script == Script::None)
        .map(|(b, _)| b.height())
        .fold(0.0_f64, f64::max);
    let base_h = if base_h > 0.0 {
        base_h
    } else {
        boxes
            .iter()
            .map(|(b, _)| b.height())
            .fold(0.0_f64, f64::max)
    };

    let offsets: Vec<f64> = boxes
        .iter()
        .map(|(b, script)| {
            let centered = (base_h - b.height()) / 2.0;
            match script {
                Script::None => match align {
                    Align::Start => 0.0,
                    Align::Center => centered,
                    Align::End => base_h - b.height(),
                },
                Script::Raised => centered - settings::math::SCRIPT_RAISE * base_h,
                Script::Lowered => centered + settings::math::SCRIPT_DROP * base_h,
            }
        })
        .collect();

    let min_offset = offsets.iter().copied().fold(0.0_f64, f64::min);
    let mut x = 0.0;
    let mut max_bottom = 0.0_f64;
    let mut placed = Vec::with_capacity(boxes.len());
    for ((mut render_box, _), offset) in boxes.into_iter().zip(offsets) {
        let y = offset - min_offset;
        render_box.translate(Vec2::new(x, y));
        x += render_box.width() + settings::math::ITEM_GAP;
        max_bottom = max_bottom.max(y + render_box.height());
        placed.push(render_box);
    }
    let width = if placed.is_empty() {
        0.0
    } else {
        x - settings::math::ITEM_GAP
    };

    RenderBox::new(Size::new(width, max_bottom), BoxKind::Group, placed)
}

fn layout_column(
    children: &[DisplayNode],
    engine: &mut TextEngine,
    font_size: f32,
    align: Align,
) -> RenderBox {
    let boxes: Vec<RenderBox> = children
        .iter()
        .map(|child| layout_node(child, engine, font_size))
        .collect();
    let width = boxes.iter().map(RenderBox::width).fold(0.0_f64, f64::max);

    let mut y = 0.0;
    let mut placed = Vec::with_capacity(boxes.len());
    for mut render_box in boxes {
        let x = match align {
            Align::Start => 0.0,
            Align::Center => (width - render_box.width()) / 2.0,
            Align::End => width - render_box.width(),
        };
        render_box.translate(Vec2::new(x, y));
        y += render_box.height() + settings::math::ITEM_GAP;
        placed.push(render_box);
    }
    let height = if placed.is_empty() {
        0.0
    } else {
        y - settings::math::ITEM_GAP
    };

    RenderBox::new(Size::new(width, height), BoxKind::Group, placed)
}

fn layout_fraction(
    numerator: &[DisplayNode],
    denominator: &[DisplayNode],
    engine: &mut TextEngine,
    font_size: f32,
) -> RenderBox {
    let mut num = layout_row(numerator, engine, font_size, Align::Center);
    let mut den = layout_row(denominator, engine, font_size, Align::Center);

    let overhang = settings::math::FRACTION_OVERHANG;
    let gap = settings::math::FRACTION_GAP;
    let width = num.width().max(den.width()) + overhang * 2.0;

    num.translate(Vec2::new((width - num.width()) / 2.0, 0.0));
    let bar_y = num.height() + gap;
    den.translate(Vec2::new((width - den.width()) / 2.0, bar_y + gap));

    let height = num.height() + den.height() + gap * 2.0;
    RenderBox::new(
        Size::new(width, height),
        BoxKind::Fraction {
            bar: Line::new(Point::new(0.0, bar_y), Point::new(width, bar_y)),
        },
        vec![num, den],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EquationId, Library};

    fn engine() -> TextEngine {
        TextEngine::new()
    }

    fn kind_tag(kind: &BoxKind) -> &'static str {
        match kind {
            BoxKind::Group => "group",
            BoxKind::Text { .. } => "text",
            BoxKind::Fraction { .. } => "fraction",
            BoxKind::Var { .. } => "var",
            BoxKind::Close => "close",
        }
    }

    fn structure_eq(a: &RenderBox, b: &RenderBox) -> bool {
        if a.rect != b.rect || kind_tag(&a.kind) != kind_tag(&b.kind) {
            return false;
        }
        match (&a.kind, &b.kind) {
            (BoxKind::Text { text: ta, .. }, BoxKind::Text { text: tb, .. }) if ta != tb => {
                return false;
            }
            (BoxKind::Var { var: va }, BoxKind::Var { var: vb }) if va != vb => {
                return false;
            }
            _ => {}
        }
        a.children.len() == b.children.len()
            && a.children
                .iter()
                .zip(&b.children)
                .all(|(ca, cb)| structure_eq(ca, cb))
    }

    #[test]
    fn fraction_keeps_child_counts_and_order() {
        let numerator: Vec<DisplayNode> = (0..3)
            .map(|i| DisplayNode::leaf(format!("n{i}")))
            .collect();
        let denominator: Vec<DisplayNode> =
            (0..2).map(|i| DisplayNode::leaf(format!("d{i}"))).collect();
        let node = DisplayNode::fraction(numerator, denominator);

        let rendered = layout_node(&node, &mut engine(), 22.0);
        assert!(matches!(rendered.kind, BoxKind::Fraction { .. }));
        assert_eq!(rendered.children.len(), 2);

        let num_texts: Vec<&str> = rendered.children[0]
            .children
            .iter()
            .filter_map(|c| match &c.kind {
                BoxKind::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        let den_texts: Vec<&str> = rendered.children[1]
            .children
            .iter()
            .filter_map(|c| match &c.kind {
                BoxKind::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(num_texts, vec!["n0", "n1", "n2"]);
        assert_eq!(den_texts, vec!["d0", "d1"]);

        // Numerator sits entirely above the bar, denominator below
        if let BoxKind::Fraction { bar } = &rendered.kind {
            assert!(rendered.children[0].rect.y1 <= bar.p0.y);
            assert!(rendered.children[1].rect.y0 >= bar.p0.y);
        }
    }

    #[test]
    fn row_places_children_left_to_right() {
        let node = DisplayNode::row(vec![
            DisplayNode::leaf("a"),
            DisplayNode::leaf("b"),
            DisplayNode::leaf("c"),
        ]);
        let rendered = layout_node(&node, &mut engine(), 22.0);
        let xs: Vec<f64> = rendered.children.iter().map(|c| c.rect.x0).collect();
        let mut sorted = xs.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(xs, sorted);
    }

    #[test]
    fn every_variant_produces_a_box() {
        let var = VarId::next();
        let nodes = [
            DisplayNode::row(vec![DisplayNode::leaf("x")]),
            DisplayNode::Layout {
                axis: Axis::Column,
                align: Align::Start,
                children: vec![DisplayNode::leaf("x")],
            },
            DisplayNode::superscript(vec![DisplayNode::leaf("2")]),
            DisplayNode::subscript(vec![DisplayNode::leaf("k")]),
            DisplayNode::fraction(
                vec![DisplayNode::leaf("1")],
                vec![DisplayNode::leaf("2")],
            ),
            DisplayNode::leaf("x"),
            DisplayNode::var_symbol(var, "x"),
        ];
        for node in &nodes {
            // Structural output is required even when text measures zero
            let rendered = layout_node(node, &mut engine(), 22.0);
            let has_content = !rendered.children.is_empty()
                || matches!(rendered.kind, BoxKind::Text { .. });
            assert!(has_content, "variant rendered nothing");
        }
    }

    #[test]
    fn relayout_of_an_unchanged_workspace_is_identical() {
        let lib = Library::builtin();
        let ws = Workspace::new().add_equation(lib.get("ke_def").unwrap());
        let tile = TileId::Equation(ws.equations().next().unwrap().id);
        let positions = PositionMap::new().set(tile, Point::new(80.0, 40.0));

        let mut engine = engine();
        let mut anchors_a = AnchorMap::new();
        let mut anchors_b = AnchorMap::new();
        let pass_a = layout_workspace(&ws, &positions, &mut anchors_a, &mut engine);
        let pass_b = layout_workspace(&ws, &positions, &mut anchors_b, &mut engine);

        assert_eq!(pass_a.len(), pass_b.len());
        for (a, b) in pass_a.iter().zip(&pass_b) {
            assert_eq!(a.tile, b.tile);
            assert_eq!(a.origin, b.origin);
            assert_eq!(a.size, b.size);
            assert!(structure_eq(&a.root, &b.root));
        }
        for (key, point) in anchors_a.iter() {
            assert_eq!(anchors_b.lookup(key), Some(point));
        }
    }

    #[test]
    fn workspace_layout_registers_an_anchor_per_variable_glyph() {
        let lib = Library::builtin();
        let ws = Workspace::new().add_equation(lib.get("ke_def").unwrap());
        let equation = ws.equations().next().unwrap();
        let tile = TileId::Equation(equation.id);
        let positions = PositionMap::new().set(tile, Point::ZERO);

        let mut anchors = AnchorMap::new();
        layout_workspace(&ws, &positions, &mut anchors, &mut engine());

        for &var in &equation.vars {
            assert!(
                anchors.lookup(&AnchorKey::new(tile, var)).is_some(),
                "missing anchor for {var:?}"
            );
        }
    }

    #[test]
    fn expression_tiles_carry_a_close_region() {
        let lib = Library::builtin();
        let ws = Workspace::new().add_equation(lib.get("ke_def").unwrap());
        let energy = ws.equations().next().unwrap().lhs;
        let ws = ws.add_expression(energy).unwrap();
        let expr_tile = TileId::Expression(ws.expressions().next().unwrap().id);

        let positions = PositionMap::new()
            .set(TileId::Equation(ws.equations().next().unwrap().id), Point::ZERO)
            .set(expr_tile, Point::new(0.0, 200.0));

        let mut anchors = AnchorMap::new();
        let tiles = layout_workspace(&ws, &positions, &mut anchors, &mut engine());
        let expr_layout = tiles.iter().find(|t| t.tile == expr_tile).unwrap();

        let has_close = expr_layout
            .root
            .children
            .iter()
            .any(|c| matches!(c.kind, BoxKind::Close));
        assert!(has_close);
    }

    #[test]
    fn hit_testing_misses_outside_the_tile() {
        let lib = Library::builtin();
        let ws = Workspace::new().add_equation(lib.get("ke_def").unwrap());
        let tile = TileId::Equation(ws.equations().next().unwrap().id);
        let positions = PositionMap::new().set(tile, Point::new(100.0, 100.0));

        let mut anchors = AnchorMap::new();
        let tiles = layout_workspace(&ws, &positions, &mut anchors, &mut engine());
        assert_eq!(tiles[0].hit(Point::new(2.0, 2.0)), None);
    }

    #[test]
    fn variable_hit_wins_over_its_inner_leaf() {
        let var = VarId::next();
        let node = DisplayNode::var_symbol(var, "x");
        let rendered = layout_node(&node, &mut engine(), 22.0);
        let tile = TileLayout {
            tile: TileId::Equation(EquationId::next()),
            origin: Point::ZERO,
            size: Size::new(rendered.width().max(1.0), rendered.height().max(1.0)),
            root: rendered,
        };
        let center = geometry::center(&tile.root.rect);
        assert_eq!(tile.hit(center), Some(TileHit::Variable(var)));
    }
}
