// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! UI components for the Gemboard workbench

pub mod canvas;
pub mod library_panel;

// Re-export commonly used widget views and types
pub use canvas::canvas_view;
pub use library_panel::library_panel;
