// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Theme colors
//!
//! All colors use hexadecimal format: Color::from_rgb8(0xRR, 0xGG, 0xBB)

use masonry::vello::peniko::Color;

// ============================================================================
// BASE COLORS -- Generic colors for UI, a dark to light gradient by default
// ============================================================================
const BASE_A: Color = Color::from_rgb8(0x10, 0x10, 0x10);
const BASE_B: Color = Color::from_rgb8(0x20, 0x20, 0x20);
const BASE_C: Color = Color::from_rgb8(0x30, 0x30, 0x30);
const BASE_D: Color = Color::from_rgb8(0x40, 0x40, 0x40);
const BASE_E: Color = Color::from_rgb8(0x50, 0x50, 0x50);
const BASE_F: Color = Color::from_rgb8(0x60, 0x60, 0x60);
const BASE_G: Color = Color::from_rgb8(0x70, 0x70, 0x70);
const BASE_H: Color = Color::from_rgb8(0x80, 0x80, 0x80);
const BASE_I: Color = Color::from_rgb8(0x90, 0x90, 0x90);
const BASE_J: Color = Color::from_rgb8(0xa0, 0xa0, 0xa0);
const BASE_L: Color = Color::from_rgb8(0xc0, 0xc0, 0xc0);
const BASE_N: Color = Color::from_rgb8(0xe0, 0xe0, 0xe0);

// ============================================================================
// GLOBAL BACKGROUNDS
// ============================================================================
const APP_BACKGROUND: Color = BASE_B;

// ============================================================================
// UI TEXT AND LABELS
// ============================================================================
const PRIMARY_UI_TEXT: Color = BASE_I;
const SECONDARY_UI_TEXT: Color = BASE_G;

// ============================================================================
// UI PANELS (library / equalities sidebar)
// ============================================================================
const PANEL_BACKGROUND: Color = BASE_C;
const PANEL_OUTLINE: Color = BASE_F;

// ============================================================================
// TILES (equation and expression cards on the canvas)
// ============================================================================
const EQUATION_TILE_BACKGROUND: Color = BASE_C;
const EXPRESSION_TILE_BACKGROUND: Color = Color::from_rgb8(0x2a, 0x32, 0x3a);
const TILE_OUTLINE: Color = BASE_F;
const TILE_TEXT: Color = BASE_N;
const CLOSE_GLYPH: Color = BASE_H;

// ============================================================================
// VARIABLE GLYPHS
// Compatibility coloring while a connect-drag is in progress:
// grey = incompatible, red = compatible drop target, green = already equal
// ============================================================================
const VARIABLE_NEUTRAL: Color = Color::from_rgb8(0x8c, 0xc4, 0xe8);
const VARIABLE_COMPATIBLE: Color = Color::from_rgb8(0xe0, 0x50, 0x50);
const VARIABLE_CONNECTED: Color = Color::from_rgb8(0x6a, 0xe7, 0x56);
const VARIABLE_MUTED: Color = BASE_G;
const VARIABLE_HIGHLIGHT_FILL: Color = Color::from_rgba8(0xff, 0xff, 0xff, 0x14);

// ============================================================================
// CONNECTION LINES
// ============================================================================
const EQUALITY_LINE: Color = Color::from_rgb8(0xd8, 0xa8, 0x48);
const LIVE_DRAG_LINE: Color = BASE_L;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Grayscale gradient - generic neutral colors for UI
#[allow(dead_code)]
pub mod base {
    use super::Color;
    pub const A: Color = super::BASE_A;
    pub const B: Color = super::BASE_B;
    pub const C: Color = super::BASE_C;
    pub const D: Color = super::BASE_D;
    pub const E: Color = super::BASE_E;
    pub const F: Color = super::BASE_F;
    pub const G: Color = super::BASE_G;
    pub const H: Color = super::BASE_H;
    pub const I: Color = super::BASE_I;
    pub const J: Color = super::BASE_J;
    pub const L: Color = super::BASE_L;
    pub const N: Color = super::BASE_N;
}

/// Colors for the canvas background
pub mod canvas {
    use super::Color;
    pub const BACKGROUND: Color = super::APP_BACKGROUND;
}

/// Colors for UI text
pub mod text {
    use super::Color;
    pub const PRIMARY: Color = super::PRIMARY_UI_TEXT;
    pub const SECONDARY: Color = super::SECONDARY_UI_TEXT;
}

/// Colors for UI panels (library sidebar)
pub mod panel {
    use super::Color;
    pub const BACKGROUND: Color = super::PANEL_BACKGROUND;
    pub const OUTLINE: Color = super::PANEL_OUTLINE;
}

/// Colors for canvas tiles
pub mod tile {
    use super::Color;
    pub const EQUATION_BACKGROUND: Color = super::EQUATION_TILE_BACKGROUND;
    pub const EXPRESSION_BACKGROUND: Color = super::EXPRESSION_TILE_BACKGROUND;
    pub const OUTLINE: Color = super::TILE_OUTLINE;
    pub const TEXT: Color = super::TILE_TEXT;
    pub const CLOSE: Color = super::CLOSE_GLYPH;
}

/// Colors for variable glyphs and compatibility feedback
pub mod variable {
    use super::Color;
    pub const NEUTRAL: Color = super::VARIABLE_NEUTRAL;
    pub const COMPATIBLE: Color = super::VARIABLE_COMPATIBLE;
    pub const CONNECTED: Color = super::VARIABLE_CONNECTED;
    pub const MUTED: Color = super::VARIABLE_MUTED;
    pub const HIGHLIGHT_FILL: Color = super::VARIABLE_HIGHLIGHT_FILL;
}

/// Colors for equality and live drag lines
pub mod line {
    use super::Color;
    pub const EQUALITY: Color = super::EQUALITY_LINE;
    pub const LIVE: Color = super::LIVE_DRAG_LINE;
}
