// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Gemboard: an interactive canvas workbench for symbolic mathematics

use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use xilem::{EventLoopBuilder, WindowView, Xilem, window};

mod components;
mod data;
mod geometry;
mod interact;
mod model;
mod session;
mod settings;
mod theme;
mod views;

use data::AppState;
use views::workbench;

/// Entry point for the Gemboard application
pub fn run(event_loop: EventLoopBuilder) -> Result<(), EventLoopError> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    // Filter out noisy wgpu/naga shader compilation logs
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gemboard=info".parse().unwrap())
                .add_directive("wgpu=warn".parse().unwrap())
                .add_directive("naga=warn".parse().unwrap())
                .add_directive("wgpu_core=warn".parse().unwrap())
                .add_directive("wgpu_hal=warn".parse().unwrap()),
        )
        .init();

    let initial_state = AppState::new();

    let app = Xilem::new(initial_state, app_logic);
    app.run_in(event_loop)?;
    Ok(())
}

/// Build the single-window UI (workbench canvas + library panel)
fn app_logic(state: &mut AppState) -> impl Iterator<Item = WindowView<AppState>> + use<> {
    let content = workbench(state);

    let window_size = LogicalSize::new(1280.0, 800.0);
    let window_view = window(state.main_window_id, "Gemboard", content);
    let window_with_options = window_view.with_options(|options| {
        options
            .with_initial_inner_size(window_size)
            .on_close(|state: &mut AppState| state.running = false)
    });

    std::iter::once(window_with_options)
}
