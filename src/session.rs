// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Canvas session - the full interaction state of the workbench canvas.
//!
//! One `CanvasSession` bundles the current model snapshot with the three
//! interaction stores: tile positions, variable anchors, and the drag state
//! machine. The canvas widget owns a working copy and emits updated copies
//! to the app state after each completed interaction; everything here is
//! cheap to clone because the heavy collections are `Arc`-backed.

use crate::interact::{AnchorMap, Command, DragEffect, DragMachine, PositionMap};
use crate::model::{ExpressionId, Library, TileId, VarId, Workspace};
use crate::settings;
use kurbo::Point;

/// Interaction state for the workbench canvas
#[derive(Debug, Clone)]
pub struct CanvasSession {
    /// The current model snapshot; replaced wholesale by every command
    pub workspace: Workspace,

    /// Canvas position of every placed tile
    pub positions: PositionMap,

    /// Registered variable glyph centers, rebuilt by each layout pass
    pub anchors: AnchorMap,

    /// The drag state machine
    pub drag: DragMachine,

    /// Cascade counter for placing newly added tiles
    spawn_count: u32,
}

impl CanvasSession {
    pub fn new() -> Self {
        Self {
            workspace: Workspace::new(),
            positions: PositionMap::new(),
            anchors: AnchorMap::new(),
            drag: DragMachine::new(),
            spawn_count: 0,
        }
    }

    // ===== Adding and removing tiles =====

    /// Add a library equation and place its tile
    pub fn add_equation_from_library(&mut self, key: &str) {
        let Some(def) = Library::builtin().get(key) else {
            tracing::warn!(key, "unknown library equation");
            return;
        };
        self.workspace = self.workspace.add_equation(def);
        self.place_last_added();
    }

    /// Promote a variable to a derived-expression tile, placed near the
    /// variable's rendered glyph
    pub fn promote_variable(&mut self, var: VarId) {
        match self.workspace.add_expression(var) {
            Ok(workspace) => {
                self.workspace = workspace;
                let origin = self
                    .anchors
                    .lookup_var(var)
                    .map(|anchor| anchor + settings::tile::promote_offset())
                    .unwrap_or_else(|| self.next_spawn_point());
                if let Some(tile) = self.workspace.last_added() {
                    self.positions = self.positions.set(tile, origin);
                }
            }
            Err(err) => tracing::warn!(%err, "promote rejected"),
        }
    }

    pub fn delete_expression(&mut self, id: ExpressionId) {
        match self.workspace.delete_expression(id) {
            Ok(workspace) => self.workspace = workspace,
            Err(err) => tracing::warn!(%err, "delete rejected"),
        }
    }

    fn place_last_added(&mut self) {
        if let Some(tile) = self.workspace.last_added() {
            let origin = self.next_spawn_point();
            self.positions = self.positions.set(tile, origin);
        }
    }

    fn next_spawn_point(&mut self) -> Point {
        let step = (self.spawn_count % 9) as f64 * settings::tile::SPAWN_STEP;
        self.spawn_count += 1;
        let base = settings::tile::spawn_origin();
        Point::new(base.x + step, base.y + step)
    }

    // ===== Drag plumbing =====

    /// Start moving a tile; `pointer` is the canvas-space grab point
    pub fn begin_tile_drag(&mut self, tile: TileId, pointer: Point) -> bool {
        let Some(origin) = self.positions.get(tile) else {
            tracing::warn!(?tile, "tile drag on unplaced tile");
            return false;
        };
        self.drag.begin_tile(tile, pointer - origin)
    }

    /// Start a connect-drag from an equation's variable glyph
    pub fn begin_connect_drag(&mut self, source: VarId, start: Point) -> bool {
        self.drag.begin_connect(source, start)
    }

    /// Start a rewrite-drag from a variable inside an expression
    pub fn begin_rewrite_drag(
        &mut self,
        expr: ExpressionId,
        replace: VarId,
        start: Point,
    ) -> bool {
        self.drag.begin_rewrite(expr, replace, start)
    }

    /// Feed a pointer move into the active session. A tile move replaces
    /// the position store and refreshes anchors so equality lines track
    /// the moving glyphs frame by frame.
    pub fn pointer_moved(&mut self, pos: Point) {
        match self.drag.moved(pos) {
            DragEffect::None => {}
            DragEffect::TileMoved { tile, origin } => {
                self.positions = self.positions.set(tile, origin);
                self.anchors.refresh(&self.positions);
            }
        }
    }

    /// End the active session on primary-button release. Returns true when
    /// the model snapshot was replaced.
    pub fn pointer_released(&mut self, pos: Point) -> bool {
        let command = self.drag.released(pos, &self.workspace, &self.anchors);
        match command {
            Some(Command::DeclareEqual { source, target }) => {
                match self.workspace.declare_equal(source, target) {
                    Ok(workspace) => {
                        self.workspace = workspace;
                        true
                    }
                    Err(err) => {
                        tracing::warn!(%err, "declare-equal rejected");
                        false
                    }
                }
            }
            Some(Command::RewriteExpression {
                expr,
                replace,
                target,
            }) => match self.workspace.rewrite_expression(expr, replace, target) {
                Ok(workspace) => {
                    self.workspace = workspace;
                    true
                }
                Err(err) => {
                    tracing::warn!(%err, "rewrite rejected");
                    false
                }
            },
            None => false,
        }
    }

    /// Pointer capture was lost; end the session without a command
    pub fn pointer_cancelled(&mut self) {
        self.drag.cancel();
    }
}

impl Default for CanvasSession {
    fn default() -> Self {
        Self::new()
    }
}
