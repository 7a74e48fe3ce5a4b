// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Application settings and configuration constants.
//!
//! This module holds non-visual settings that stay stable across theme
//! changes. Visual styling (colors) belongs in `theme.rs`.

// ============================================================================
// HIT TESTING
// ============================================================================
/// Radius in canvas pixels within which a drop snaps to a variable anchor
const ANCHOR_HIT_RADIUS: f64 = 18.0;

// ============================================================================
// DOUBLE CLICK
// ============================================================================
/// Maximum interval between two clicks to count as a double-click
const DOUBLE_CLICK_MS: u64 = 400;

/// Maximum pointer travel between two clicks to count as a double-click
const DOUBLE_CLICK_SLOP: f64 = 6.0;

// ============================================================================
// MATH LAYOUT
// ============================================================================
/// Base font size for rendered equations, in logical pixels
const MATH_FONT_SIZE: f32 = 22.0;

/// Scale applied to superscript and subscript runs (75%)
const SCRIPT_SCALE: f32 = 0.75;

/// Fraction of a row's height a superscript is raised by
const SCRIPT_RAISE: f64 = 0.45;

/// Fraction of a row's height a subscript is lowered by
const SCRIPT_DROP: f64 = 0.25;

/// Horizontal gap between row items
const ITEM_GAP: f64 = 3.0;

/// Padding inside a variable glyph's interactive region
const VAR_PADDING: f64 = 2.0;

/// Vertical gap between a fraction half and the divider bar
const FRACTION_GAP: f64 = 2.0;

/// Horizontal overhang of the divider bar past the wider half
const FRACTION_OVERHANG: f64 = 3.0;

// ============================================================================
// TILES
// ============================================================================
/// Padding between a tile's border and its rendered content
const TILE_PADDING: f64 = 10.0;

/// Side length of the close region on expression tiles
const CLOSE_SIZE: f64 = 12.0;

/// Where the first tile lands on an empty canvas
const SPAWN_ORIGIN: (f64, f64) = (60.0, 60.0);

/// Cascade step between successively spawned tiles
const SPAWN_STEP: f64 = 36.0;

/// Offset from a variable's anchor where its promoted expression appears
const PROMOTE_OFFSET: (f64, f64) = (48.0, 72.0);

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Hit-testing settings
pub mod hit {
    /// Radius in canvas pixels within which a drop snaps to an anchor
    pub const ANCHOR_RADIUS: f64 = super::ANCHOR_HIT_RADIUS;
}

/// Double-click detection settings
pub mod double_click {
    pub const MAX_INTERVAL_MS: u64 = super::DOUBLE_CLICK_MS;
    pub const MAX_TRAVEL: f64 = super::DOUBLE_CLICK_SLOP;
}

/// Math layout settings (glyph sizing inside a tile)
pub mod math {
    pub const FONT_SIZE: f32 = super::MATH_FONT_SIZE;
    pub const SCRIPT_SCALE: f32 = super::SCRIPT_SCALE;
    pub const SCRIPT_RAISE: f64 = super::SCRIPT_RAISE;
    pub const SCRIPT_DROP: f64 = super::SCRIPT_DROP;
    pub const ITEM_GAP: f64 = super::ITEM_GAP;
    pub const VAR_PADDING: f64 = super::VAR_PADDING;
    pub const FRACTION_GAP: f64 = super::FRACTION_GAP;
    pub const FRACTION_OVERHANG: f64 = super::FRACTION_OVERHANG;
}

/// Tile chrome and placement settings
pub mod tile {
    use kurbo::{Point, Vec2};

    pub const PADDING: f64 = super::TILE_PADDING;
    pub const CLOSE_SIZE: f64 = super::CLOSE_SIZE;

    /// Where the first tile lands on an empty canvas
    pub const fn spawn_origin() -> Point {
        Point::new(super::SPAWN_ORIGIN.0, super::SPAWN_ORIGIN.1)
    }

    /// Cascade step between successively spawned tiles
    pub const SPAWN_STEP: f64 = super::SPAWN_STEP;

    /// Offset from a variable's anchor where its promoted expression
    /// appears
    pub const fn promote_offset() -> Vec2 {
        Vec2::new(super::PROMOTE_OFFSET.0, super::PROMOTE_OFFSET.1)
    }
}
