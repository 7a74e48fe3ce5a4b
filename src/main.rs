// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Gemboard: an interactive canvas workbench for symbolic mathematics

use xilem::{EventLoop, winit::error::EventLoopError};

fn main() -> Result<(), EventLoopError> {
    gemboard::run(EventLoop::with_user_event())
}
