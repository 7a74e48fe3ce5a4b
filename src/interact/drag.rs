// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! The drag state machine.
//!
//! At most one drag session exists at a time. Entering an active state
//! acquires exactly one pointer grab and leaving it releases that grab, so
//! the grab count is 0 when idle and 1 while any session runs; the invariant
//! is asserted on every transition rather than hand-maintained at call
//! sites. Releasing the primary button always ends the session, whether or
//! not it produced a command; there is no separate cancel path beyond the
//! host's pointer-cancel event.

use crate::interact::{AnchorMap, hit_test};
use crate::model::{EquationId, ExpressionId, TileId, VarId, Workspace};
use crate::settings;
use kurbo::{Point, Vec2};

/// The current interaction state
#[derive(Debug, Clone, PartialEq)]
pub enum DragSession {
    Idle,
    /// Moving a tile; `offset` is the pointer's distance from the tile
    /// origin at grab time
    Tile { tile: TileId, offset: Vec2 },
    /// Connect-drag from an equation's variable glyph
    Connect {
        source: VarId,
        start: Point,
        current: Point,
    },
    /// Rewrite-drag from a variable inside an expression
    Rewrite {
        expr: ExpressionId,
        replace: VarId,
        start: Point,
        current: Point,
    },
}

/// What a pointer move did, for the caller to apply to its stores
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEffect {
    None,
    /// The dragged tile has a new origin; the position store must be
    /// replaced and anchors refreshed before the next paint
    TileMoved { tile: TileId, origin: Point },
}

/// A model command produced by a completed drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    DeclareEqual { source: VarId, target: VarId },
    RewriteExpression {
        expr: ExpressionId,
        replace: VarId,
        target: EquationId,
    },
}

/// Owns the session and the pointer-grab accounting
#[derive(Debug, Clone, PartialEq)]
pub struct DragMachine {
    session: DragSession,
    grabs: u32,
}

impl DragMachine {
    pub fn new() -> Self {
        Self {
            session: DragSession::Idle,
            grabs: 0,
        }
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.session, DragSession::Idle)
    }

    /// Number of pointer grabs currently held: 0 when idle, 1 when active
    pub fn grab_count(&self) -> u32 {
        self.grabs
    }

    /// Start moving a tile. Ignored (returns false) if a session is
    /// already active.
    pub fn begin_tile(&mut self, tile: TileId, offset: Vec2) -> bool {
        self.begin(DragSession::Tile { tile, offset })
    }

    /// Start a connect-drag from an equation's variable glyph
    pub fn begin_connect(&mut self, source: VarId, start: Point) -> bool {
        self.begin(DragSession::Connect {
            source,
            start,
            current: start,
        })
    }

    /// Start a rewrite-drag from a variable inside an expression
    pub fn begin_rewrite(&mut self, expr: ExpressionId, replace: VarId, start: Point) -> bool {
        self.begin(DragSession::Rewrite {
            expr,
            replace,
            start,
            current: start,
        })
    }

    fn begin(&mut self, session: DragSession) -> bool {
        if self.is_active() {
            // A pointer-down while dragging must not start a second session
            tracing::debug!(?session, "ignoring pointer-down during active drag");
            return false;
        }
        debug_assert_eq!(self.grabs, 0);
        self.grabs += 1;
        self.session = session;
        true
    }

    /// Feed a pointer move into the active session
    pub fn moved(&mut self, pos: Point) -> DragEffect {
        match &mut self.session {
            DragSession::Idle => DragEffect::None,
            DragSession::Tile { tile, offset } => DragEffect::TileMoved {
                tile: *tile,
                origin: pos - *offset,
            },
            DragSession::Connect { current, .. } | DragSession::Rewrite { current, .. } => {
                *current = pos;
                DragEffect::None
            }
        }
    }

    /// End the session on primary-button release, hit-testing the drop
    /// point. Always returns to `Idle`; the command (if any) is for the
    /// caller to apply to the model.
    pub fn released(
        &mut self,
        pos: Point,
        workspace: &Workspace,
        anchors: &AnchorMap,
    ) -> Option<Command> {
        let session = std::mem::replace(&mut self.session, DragSession::Idle);
        if !matches!(session, DragSession::Idle) {
            debug_assert_eq!(self.grabs, 1);
            self.grabs -= 1;
        }

        match session {
            DragSession::Idle | DragSession::Tile { .. } => None,
            DragSession::Connect { source, .. } => {
                connect_command(source, pos, workspace, anchors)
            }
            DragSession::Rewrite { expr, replace, .. } => {
                let (target, hit) =
                    hit_test::closest_equation_anchor(pos, anchors, settings::hit::ANCHOR_RADIUS)?;
                tracing::debug!(key = ?hit.key, "rewrite-drag drop on equation");
                Some(Command::RewriteExpression {
                    expr,
                    replace,
                    target,
                })
            }
        }
    }

    /// Host-initiated cancellation (pointer capture lost). Ends the
    /// session without a command.
    pub fn cancel(&mut self) {
        if self.is_active() {
            debug_assert_eq!(self.grabs, 1);
            self.grabs -= 1;
            self.session = DragSession::Idle;
            tracing::debug!("drag cancelled");
        }
    }
}

impl Default for DragMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a connect-drag release: the drop must land on a registered
/// anchor whose variable has the same dimension as the source. A mismatch
/// or miss is a silent no-op; the compatibility coloring during the drag
/// was the user's feedback.
fn connect_command(
    source: VarId,
    pos: Point,
    workspace: &Workspace,
    anchors: &AnchorMap,
) -> Option<Command> {
    let hit = hit_test::closest_anchor(pos, anchors, settings::hit::ANCHOR_RADIUS)?;
    let target = hit.key.var;
    if target == source {
        return None;
    }
    let source_dim = workspace.dimension(source)?;
    let target_dim = workspace.dimension(target)?;
    if !source_dim.equal_units(&target_dim) {
        tracing::debug!(?source, ?target, "drop rejected: dimension mismatch");
        return None;
    }
    Some(Command::DeclareEqual { source, target })
}
