// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors a [`crate::ContainerDriver`] adapter can raise.
//!
//! `NotFound` is deliberately distinct from `ContainerError`: several
//! operations treat a missing container/image as success (spec §4.1), and
//! only the caller — not the driver — knows which calls get to swallow it.

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum DriverError {
    #[error("image build failed")]
    BuildFailed { logs: String },

    #[error("container operation failed: {0}")]
    ContainerError(String),

    #[error("no such container or image")]
    NotFound,
}

impl DriverError {
    pub fn logs(&self) -> Option<&str> {
        match self {
            Self::BuildFailed { logs } => Some(logs),
            _ => None,
        }
    }
}
