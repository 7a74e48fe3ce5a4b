// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Interaction state: tile positions, variable anchors, drag sessions

pub mod anchors;
pub mod drag;
pub mod hit_test;
pub mod positions;

pub use anchors::AnchorMap;
pub use drag::{Command, DragEffect, DragMachine, DragSession};
pub use positions::PositionMap;
