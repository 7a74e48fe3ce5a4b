// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Persistent store of tile positions.
//!
//! `PositionMap` wraps an `Arc<BTreeMap>` so snapshots are cheap to clone and
//! `set` produces a new store instead of mutating in place. A state-machine
//! transition that moves a tile swaps the whole store, so a render pass never
//! observes a half-applied move. Entries for deleted tiles may linger; they
//! are simply never read once the tile stops being displayed.

use crate::model::TileId;
use kurbo::Point;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Canvas coordinates for every placed tile
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PositionMap {
    inner: Arc<BTreeMap<TileId, Point>>,
}

impl PositionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tile: TileId) -> Option<Point> {
        self.inner.get(&tile).copied()
    }

    pub fn contains(&self, tile: TileId) -> bool {
        self.inner.contains_key(&tile)
    }

    /// A new store with `tile` placed at `origin`
    pub fn set(&self, tile: TileId, origin: Point) -> PositionMap {
        let mut map = (*self.inner).clone();
        map.insert(tile, origin);
        PositionMap {
            inner: Arc::new(map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EquationId;

    fn tile() -> TileId {
        TileId::Equation(EquationId::next())
    }

    #[test]
    fn new_store_is_empty() {
        let positions = PositionMap::new();
        assert!(!positions.contains(tile()));
    }

    #[test]
    fn set_and_get() {
        let id = tile();
        let positions = PositionMap::new().set(id, Point::new(40.0, 60.0));
        assert!(positions.contains(id));
        assert_eq!(positions.get(id), Some(Point::new(40.0, 60.0)));
    }

    #[test]
    fn set_does_not_mutate_the_original() {
        let id = tile();
        let before = PositionMap::new();
        let after = before.set(id, Point::new(1.0, 2.0));

        assert!(!before.contains(id));
        assert!(after.contains(id));
    }

    #[test]
    fn set_replaces_an_existing_entry() {
        let id = tile();
        let positions = PositionMap::new()
            .set(id, Point::new(1.0, 2.0))
            .set(id, Point::new(3.0, 4.0));
        assert_eq!(positions.get(id), Some(Point::new(3.0, 4.0)));
    }

    #[test]
    fn clones_share_until_written() {
        let a_id = tile();
        let b_id = tile();
        let base = PositionMap::new().set(a_id, Point::ZERO);
        let branched = base.set(b_id, Point::new(9.0, 9.0));

        assert!(base.contains(a_id));
        assert!(!base.contains(b_id));
        assert!(branched.contains(a_id));
        assert!(branched.contains(b_id));
    }
}
