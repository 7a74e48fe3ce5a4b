// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Central application state driving the Xilem reactive UI.
//!
//! `AppState` owns the canvas session (which in turn owns the model
//! snapshot and the interaction stores). Every UI rebuild reads from it;
//! mutations happen in event callbacks and propagate through the view tree.

use crate::session::CanvasSession;
use xilem::WindowId;

/// Main application state
pub struct AppState {
    /// The canvas session: model snapshot plus interaction state
    pub session: CanvasSession,

    /// Whether the app should keep running
    pub running: bool,

    /// Main window ID (stable across rebuilds to prevent window
    /// recreation)
    pub main_window_id: WindowId,
}

impl AppState {
    /// Create a new empty application state
    pub fn new() -> Self {
        Self {
            session: CanvasSession::new(),
            running: true,
            main_window_id: WindowId::next(),
        }
    }
}

/// Implement the Xilem AppState trait
impl xilem::AppState for AppState {
    fn keep_running(&self) -> bool {
        self.running
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
