// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared request state for the HTTP surface (spec §9): one value threaded
//! through every handler via `axum::extract::State`, instead of reaching
//! for globals the way a bare `lazy_static` registry would.

use std::sync::Arc;

use oken_core::SystemClock;

use crate::pipeline::Pipeline;

pub type AppContext = Arc<Pipeline<SystemClock>>;
