// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer event handlers for CanvasWidget

use super::layout::TileHit;
use super::CanvasWidget;
use crate::model::{AnchorKey, TileId};
use crate::settings;
use kurbo::Point;
use masonry::core::EventCtx;
use std::time::{Duration, Instant};

impl CanvasWidget {
    /// Handle primary-button pointer down
    pub(super) fn handle_pointer_down(
        &mut self,
        ctx: &mut EventCtx<'_>,
        state: &masonry::core::PointerState,
    ) {
        let local = ctx.local_position(state.position);
        tracing::debug!(?local, "pointer down");

        // A pointer-down while a session is active must not start a
        // second, competing session
        if self.session.drag.is_active() {
            return;
        }

        let double_click = self.is_double_click(local);

        // Later tiles draw on top, so hit-test them first
        let hit = self
            .tiles
            .iter()
            .rev()
            .find_map(|tile| tile.hit(local).map(|hit| (tile.tile, hit)));

        let Some((tile, hit)) = hit else {
            return;
        };

        match hit {
            TileHit::Variable(var) => {
                if double_click {
                    tracing::info!(?var, "double-click: promote to expression");
                    self.session.promote_variable(var);
                    self.emit_session_update(ctx);
                    ctx.request_render();
                    return;
                }

                // The connect line starts at the glyph's anchor center
                let start = self
                    .session
                    .anchors
                    .lookup(&AnchorKey::new(tile, var))
                    .unwrap_or(local);

                let began = match tile {
                    TileId::Equation(_) => self.session.begin_connect_drag(var, start),
                    TileId::Expression(expr) => {
                        self.session.begin_rewrite_drag(expr, var, start)
                    }
                };
                if began {
                    ctx.capture_pointer();
                }
            }
            TileHit::Body => {
                if self.session.begin_tile_drag(tile, local) {
                    ctx.capture_pointer();
                }
            }
            TileHit::Close => {
                if let TileId::Expression(expr) = tile {
                    self.session.delete_expression(expr);
                    self.emit_session_update(ctx);
                }
            }
        }

        ctx.request_render();
    }

    /// Handle pointer move
    pub(super) fn handle_pointer_move(
        &mut self,
        ctx: &mut EventCtx<'_>,
        current: &masonry::core::PointerState,
    ) {
        if !self.session.drag.is_active() {
            return;
        }
        let local = ctx.local_position(current.position);
        self.session.pointer_moved(local);
        ctx.request_render();
    }

    /// Handle primary-button pointer up: complete the session and apply
    /// any resulting command to the model
    pub(super) fn handle_pointer_up(
        &mut self,
        ctx: &mut EventCtx<'_>,
        state: &masonry::core::PointerState,
    ) {
        if !self.session.drag.is_active() {
            return;
        }
        let local = ctx.local_position(state.position);
        let model_changed = self.session.pointer_released(local);
        if model_changed {
            // Commit the new snapshot's layout right away so anchors and
            // hit regions match what the next event sees
            self.rebuild_layout();
        }
        self.emit_session_update(ctx);
        ctx.request_render();
    }

    /// Pointer capture lost: end the session without a command
    pub(super) fn handle_pointer_cancel(&mut self, ctx: &mut EventCtx<'_>) {
        if !self.session.drag.is_active() {
            return;
        }
        self.session.pointer_cancelled();
        self.emit_session_update(ctx);
        ctx.request_render();
    }

    /// Double-click detection by interval and pointer travel
    fn is_double_click(&mut self, pos: Point) -> bool {
        let now = Instant::now();
        let result = match (self.last_click_time, self.last_click_position) {
            (Some(time), Some(last_pos)) => {
                now.duration_since(time)
                    < Duration::from_millis(settings::double_click::MAX_INTERVAL_MS)
                    && pos.distance(last_pos) < settings::double_click::MAX_TRAVEL
            }
            _ => false,
        };
        self.last_click_time = Some(now);
        self.last_click_position = Some(pos);
        result
    }
}
