// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::{Clock, FakeClock};
use std::time::Duration;

fn config() -> AgentConfig {
    AgentConfig { name: "h".into(), warm_timeout: 1, ..AgentConfig::default() }
}

#[test]
fn pending_state_starts_building_with_no_container() {
    let clock = FakeClock::new();
    let state = AgentState::pending(AgentId::parse("h1").unwrap(), config(), clock.now());
    assert_eq!(state.status, Status::Building);
    assert!(state.container_id.is_none());
    assert!(state.container_name.is_none());
    assert!(state.last_invoked.is_none());
}

#[test]
fn witness_falls_back_to_created_at_when_never_invoked() {
    let clock = FakeClock::new();
    let state = AgentState::pending(AgentId::parse("h1").unwrap(), config(), clock.now());
    assert_eq!(state.activity_witness(), state.created_at);
}

#[test]
fn witness_uses_last_invoked_once_set() {
    let clock = FakeClock::new();
    let mut state = AgentState::pending(AgentId::parse("h1").unwrap(), config(), clock.now());
    clock.advance(Duration::from_secs(10));
    state.last_invoked = Some(clock.now());
    assert_eq!(state.activity_witness(), state.last_invoked.unwrap());
}

#[test]
fn not_idle_before_warm_timeout_elapses() {
    let clock = FakeClock::new();
    let mut state = AgentState::pending(AgentId::parse("h1").unwrap(), config(), clock.now());
    state.status = Status::Running;
    clock.advance(Duration::from_millis(500));
    assert!(!state.is_idle_past(clock.now(), Duration::from_secs(1)));
}

#[test]
fn idle_once_warm_timeout_elapses() {
    let clock = FakeClock::new();
    let mut state = AgentState::pending(AgentId::parse("h1").unwrap(), config(), clock.now());
    state.status = Status::Running;
    clock.advance(Duration::from_secs(2));
    assert!(state.is_idle_past(clock.now(), Duration::from_secs(1)));
}

#[test]
fn non_running_status_never_counts_as_idle() {
    let clock = FakeClock::new();
    let state = AgentState::pending(AgentId::parse("h1").unwrap(), config(), clock.now());
    clock.advance(Duration::from_secs(100));
    assert!(!state.is_idle_past(clock.now(), Duration::from_secs(1)));
}
