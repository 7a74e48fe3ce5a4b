// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! The anchor registry: where every rendered variable glyph currently is.
//!
//! The tree renderer registers each variable glyph's center during the layout
//! pass, in coordinates local to its owning tile. `refresh` resolves those
//! against the position store into canvas coordinates; it must run after any
//! action that can move tiles without re-registering (every frame of a tile
//! drag). The registry is rebuilt wholesale on each full layout pass, so it
//! never persists across renders.

use crate::interact::PositionMap;
use crate::model::{AnchorKey, VarId};
use kurbo::Point;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
struct Anchor {
    /// Glyph center relative to the owning tile's origin
    local: Point,
    /// Glyph center in canvas coordinates, from the last refresh
    canvas: Point,
}

/// Registry of rendered variable glyph centers
#[derive(Debug, Clone, Default)]
pub struct AnchorMap {
    entries: BTreeMap<AnchorKey, Anchor>,
}

impl AnchorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all registrations at the start of a layout pass
    pub fn begin_pass(&mut self) {
        self.entries.clear();
    }

    /// Record a glyph center, local to its owning tile's origin.
    /// Registration happens before any refresh is needed, so the canvas
    /// point starts out unresolved at the local value.
    pub fn register(&mut self, key: AnchorKey, local_center: Point) {
        self.entries.insert(
            key,
            Anchor {
                local: local_center,
                canvas: local_center,
            },
        );
    }

    /// Recompute every anchor's canvas point from the current tile
    /// positions. Anchors whose tile has no position entry keep their last
    /// resolved point; lookups against them are stale but harmless, and the
    /// next layout pass drops them.
    pub fn refresh(&mut self, positions: &PositionMap) {
        for (key, anchor) in self.entries.iter_mut() {
            if let Some(origin) = positions.get(key.tile) {
                anchor.canvas = Point::new(
                    origin.x + anchor.local.x,
                    origin.y + anchor.local.y,
                );
            }
        }
    }

    /// Canvas point of one rendered glyph
    pub fn lookup(&self, key: &AnchorKey) -> Option<Point> {
        self.entries.get(key).map(|anchor| anchor.canvas)
    }

    /// Canvas point for a bare variable id. When the variable is rendered
    /// in several tiles, the equation copy wins (equation tiles order first
    /// in the key space).
    pub fn lookup_var(&self, var: VarId) -> Option<Point> {
        self.entries
            .iter()
            .find(|(key, _)| key.var == var)
            .map(|(_, anchor)| anchor.canvas)
    }

    /// All registered anchors with their canvas points
    pub fn iter(&self) -> impl Iterator<Item = (&AnchorKey, Point)> {
        self.entries.iter().map(|(key, anchor)| (key, anchor.canvas))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
