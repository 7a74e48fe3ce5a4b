// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Symbolic-math data model

pub mod dimension;
pub mod display;
pub mod ids;
pub mod library;
pub mod workspace;

pub use dimension::Dimension;
pub use display::{Align, Axis, DisplayNode};
pub use ids::{AnchorKey, EquationId, ExpressionId, TileId, VarId};
pub use library::Library;
pub use workspace::{Workspace, WorkspaceError};
