// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Library panel for the right-hand sidebar: add canned equations and
//! review the current equalities and expressions.

use masonry::properties::Padding;
use masonry::properties::types::AsUnit;
use xilem::WidgetView;
use xilem::core::one_of::Either;
use xilem::style::Style;
use xilem::view::{CrossAxisAlignment, button, flex_col, label, sized_box};

use crate::data::AppState;
use crate::model::{Library, VarId, Workspace};
use crate::theme;

/// Width of the library panel
pub const LIBRARY_PANEL_WIDTH: f64 = 250.0;

/// Library panel view for the sidebar
pub fn library_panel(state: &AppState) -> impl WidgetView<AppState> + use<> {
    let workspace = &state.session.workspace;

    let equation_buttons: Vec<_> = Library::builtin()
        .defs()
        .map(|def| {
            let key: &'static str = def.key.as_str();
            equation_button(&def.name, key)
        })
        .collect();

    let equality_labels: Vec<_> = equality_lines(workspace)
        .into_iter()
        .map(|line| {
            label(line)
                .text_size(13.0)
                .color(theme::text::PRIMARY)
        })
        .collect();

    let expression_labels: Vec<_> = expression_lines(workspace)
        .into_iter()
        .map(|line| {
            label(line)
                .text_size(13.0)
                .color(theme::text::PRIMARY)
        })
        .collect();

    sized_box(
        flex_col((
            section_header("LIBRARY"),
            flex_col(equation_buttons),
            section_header("EQUALITIES"),
            if equality_labels.is_empty() {
                Either::A(hint_label("drag a variable onto another"))
            } else {
                Either::B(flex_col(equality_labels))
            },
            section_header("EXPRESSIONS"),
            if expression_labels.is_empty() {
                Either::A(hint_label("double-click a variable to derive"))
            } else {
                Either::B(flex_col(expression_labels))
            },
        ))
        .cross_axis_alignment(CrossAxisAlignment::Fill),
    )
    .width(LIBRARY_PANEL_WIDTH.px())
    .background_color(theme::panel::BACKGROUND)
    .border_color(theme::panel::OUTLINE)
    .border_width(1.5)
    .corner_radius(8.0)
}

// ===== Helper Views =====

fn section_header(title: &str) -> impl WidgetView<AppState> + use<> {
    sized_box(
        label(title.to_string())
            .text_size(12.0)
            .color(theme::text::SECONDARY),
    )
    .padding(Padding::from_vh(8.0, 8.0))
}

fn hint_label(text: &str) -> impl WidgetView<AppState> + use<> {
    sized_box(
        label(text.to_string())
            .text_size(13.0)
            .color(theme::text::SECONDARY),
    )
    .padding(Padding::from_vh(2.0, 8.0))
}

/// One add-equation button
fn equation_button(name: &str, key: &'static str) -> impl WidgetView<AppState> + use<> {
    sized_box(
        button(
            label(name.to_string())
                .text_size(14.0)
                .color(theme::text::PRIMARY),
            move |state: &mut AppState| {
                state.session.add_equation_from_library(key);
            },
        )
        .background_color(theme::panel::BACKGROUND)
        .border_color(masonry::vello::peniko::Color::TRANSPARENT),
    )
    .expand_width()
    .padding(Padding::from_vh(1.0, 6.0))
}

// ===== Label text =====

fn symbol_or_placeholder(workspace: &Workspace, var: VarId) -> String {
    workspace.symbol(var).unwrap_or("?").to_string()
}

/// "a = b = c" per equality class
fn equality_lines(workspace: &Workspace) -> Vec<String> {
    workspace
        .equality_classes()
        .into_iter()
        .map(|class| {
            class
                .into_iter()
                .map(|var| symbol_or_placeholder(workspace, var))
                .collect::<Vec<_>>()
                .join(" = ")
        })
        .collect()
}

/// Linearized display text per expression
fn expression_lines(workspace: &Workspace) -> Vec<String> {
    workspace
        .expressions()
        .map(|expression| {
            let display = workspace
                .expression_display(expression.id)
                .expect("expression iterated from this workspace");
            display.linear_text(&|var| symbol_or_placeholder(workspace, var))
        })
        .collect()
}
