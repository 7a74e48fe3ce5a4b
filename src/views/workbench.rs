// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Workbench view - the canvas with the library panel floating over it

use std::sync::Arc;

use masonry::properties::types::UnitPoint;
use xilem::WidgetView;
use xilem::view::{ChildAlignment, ZStackExt, transformed, zstack};

use crate::components::{canvas_view, library_panel};
use crate::data::AppState;
use crate::session::CanvasSession;

/// Fixed margin between floating panels and the window edge
const MARGIN: f64 = 16.0;

/// The single workbench view: full-window canvas with the library panel
/// in the top-right corner
pub fn workbench(state: &mut AppState) -> impl WidgetView<AppState> + use<> {
    let session_arc = Arc::new(state.session.clone());

    zstack((
        // Background: the equation canvas (full window)
        canvas_view(
            session_arc,
            |state: &mut AppState, updated_session: CanvasSession| {
                state.session = updated_session;
            },
        ),
        // Foreground: library / equalities panel
        transformed(library_panel(state))
            .translate((-MARGIN, MARGIN))
            .alignment(ChildAlignment::SelfAligned(UnitPoint::TOP_RIGHT)),
    ))
}
