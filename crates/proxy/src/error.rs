// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error mapping for a forwarded invocation (spec §4.5, §7).

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum ProxyError {
    #[error("agent invocation timed out")]
    Timeout,

    #[error("failed to connect to agent: {0}")]
    Connect(String),

    #[error("agent returned an error")]
    Remote { status: u16, body: String },
}

impl ProxyError {
    /// HTTP status hint this error maps to, per spec §4.5's three-way split.
    pub fn status_hint(&self) -> u16 {
        match self {
            Self::Timeout => 504,
            Self::Connect(_) => 502,
            Self::Remote { status, .. } => *status,
        }
    }
}
