// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Canvas widget - the free-form equation canvas

mod layout;
mod paint;
mod pointer;
mod view;

pub use layout::{BoxKind, RenderBox, TextEngine, TileHit, TileLayout, layout_node, layout_workspace};
pub use paint::{equality_segments, variable_color};
pub use view::canvas_view;

use crate::session::CanvasSession;
use kurbo::Point;
use masonry::accesskit::{Node, Role};
use masonry::core::{
    AccessCtx, BoxConstraints, ChildrenIds, EventCtx, LayoutCtx, PaintCtx, PointerButton,
    PointerButtonEvent, PointerEvent, PointerUpdate, PropertiesMut, PropertiesRef, RegisterCtx,
    TextEvent, Update, UpdateCtx, Widget,
};
use masonry::kurbo::Size;
use masonry::vello::Scene;
use std::sync::Arc;
use std::time::Instant;

/// The free-form canvas: tiles, connect lines, and drag handling
pub struct CanvasWidget {
    /// The interaction session (mutable working copy)
    pub session: CanvasSession,

    /// Tile layouts from the last committed layout pass
    tiles: Vec<TileLayout>,

    /// Parley contexts for measuring glyph text
    text: TextEngine,

    /// Canvas size
    size: Size,

    /// Last click time for double-click detection
    last_click_time: Option<Instant>,

    /// Last click position for double-click detection
    last_click_position: Option<Point>,
}

impl CanvasWidget {
    pub fn new(session: Arc<CanvasSession>) -> Self {
        // Clone the session to get a mutable copy; cheap because the
        // heavy collections are Arc-backed
        Self {
            session: (*session).clone(),
            tiles: Vec::new(),
            text: TextEngine::new(),
            size: Size::new(800.0, 600.0),
            last_click_time: None,
            last_click_position: None,
        }
    }

    /// Re-run the tree renderer over the whole workspace. This is the
    /// "layout committed" point: anchors registered here are immediately
    /// valid for hit tests and line endpoints, so a freshly added tile
    /// never needs a deferred refresh.
    pub(super) fn rebuild_layout(&mut self) {
        self.tiles = layout_workspace(
            &self.session.workspace,
            &self.session.positions,
            &mut self.session.anchors,
            &mut self.text,
        );
    }

    /// Emit the current session to the app state
    pub(super) fn emit_session_update(&self, ctx: &mut EventCtx<'_>) {
        ctx.submit_action::<CanvasUpdate>(CanvasUpdate {
            session: self.session.clone(),
        });
    }
}

/// Action emitted by the canvas when the session changes
#[derive(Debug, Clone)]
pub struct CanvasUpdate {
    pub session: CanvasSession,
}

impl Widget for CanvasWidget {
    type Action = CanvasUpdate;

    fn register_children(&mut self, _ctx: &mut RegisterCtx<'_>) {
        // Leaf widget - no children
    }

    fn update(
        &mut self,
        _ctx: &mut UpdateCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        _event: &Update,
    ) {
    }

    fn layout(
        &mut self,
        _ctx: &mut LayoutCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        bc: &BoxConstraints,
    ) -> Size {
        // Fill all available space behind the panels
        let size = bc.max();
        self.size = size;
        size
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        self.size = ctx.size();
        paint::paint_background(scene, self.size);

        self.rebuild_layout();
        paint::paint_tiles(
            scene,
            &self.tiles,
            self.session.drag.session(),
            &self.session.workspace,
        );
        paint::paint_overlay(
            scene,
            &self.session.workspace,
            &self.session.anchors,
            self.session.drag.session(),
        );
    }

    fn on_pointer_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &PointerEvent,
    ) {
        match event {
            PointerEvent::Down(PointerButtonEvent {
                button: Some(PointerButton::Primary),
                state,
                ..
            }) => {
                self.handle_pointer_down(ctx, state);
            }

            PointerEvent::Move(PointerUpdate { current, .. }) => {
                self.handle_pointer_move(ctx, current);
            }

            PointerEvent::Up(PointerButtonEvent {
                button: Some(PointerButton::Primary),
                state,
                ..
            }) => {
                self.handle_pointer_up(ctx, state);
            }

            PointerEvent::Cancel(_) => {
                self.handle_pointer_cancel(ctx);
            }

            _ => {
                // Secondary buttons and scroll are not part of the
                // interaction model
            }
        }
    }

    fn on_text_event(
        &mut self,
        _ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        _event: &TextEvent,
    ) {
        // No keyboard interaction on the canvas
    }

    fn accessibility_role(&self) -> Role {
        Role::Canvas
    }

    fn accessibility(
        &mut self,
        _ctx: &mut AccessCtx<'_>,
        _props: &PropertiesRef<'_>,
        node: &mut Node,
    ) {
        let equations = self.session.workspace.equations().count();
        let expressions = self.session.workspace.expressions().count();
        node.set_label(format!(
            "Equation canvas: {equations} equations, {expressions} expressions"
        ));
    }

    fn children_ids(&self) -> ChildrenIds {
        ChildrenIds::new()
    }
}
