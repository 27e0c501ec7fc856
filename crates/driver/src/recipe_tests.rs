// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use oken_core::AgentConfig;

fn config() -> AgentConfig {
    AgentConfig {
        name: "h".to_string(),
        python_version: "3.12".to_string(),
        entrypoint: "main.py".to_string(),
        entrypoint_type: None,
        warm_timeout: 300,
    }
}

#[test]
fn handler_shape_runs_the_wrapper() {
    let dockerfile = render_dockerfile(&config(), EntrypointType::Handler, 8080);
    assert!(dockerfile.contains(&format!("CMD [\"uv\", \"run\", \"python\", \"{}\"]", wrapper_filename())));
}

#[test]
fn agent_shape_runs_the_wrapper() {
    let dockerfile = render_dockerfile(&config(), EntrypointType::Agent, 8080);
    assert!(dockerfile.contains(wrapper_filename()));
}

#[test]
fn http_shape_runs_the_users_entrypoint_directly() {
    let dockerfile = render_dockerfile(&config(), EntrypointType::Http, 8080);
    assert!(dockerfile.contains("CMD [\"uv\", \"run\", \"python\", \"main.py\"]"));
    assert!(!dockerfile.contains(wrapper_filename()));
}

#[test]
fn dockerfile_carries_entry_env_vars() {
    let dockerfile = render_dockerfile(&config(), EntrypointType::Handler, 9090);
    assert!(dockerfile.contains("ENV OKEN_ENTRYPOINT=\"main.py\""));
    assert!(dockerfile.contains("ENV OKEN_ENTRY_TYPE=\"handler\""));
    assert!(dockerfile.contains("ENV PORT=\"9090\""));
}

#[test]
fn dockerfile_requests_the_configured_python_version() {
    let mut cfg = config();
    cfg.python_version = "3.11".to_string();
    let dockerfile = render_dockerfile(&cfg, EntrypointType::Handler, 8080);
    assert!(dockerfile.contains("uv python install 3.11"));
}

#[test]
fn wrapper_exposes_invoke_and_health() {
    let wrapper = render_wrapper();
    assert!(wrapper.contains("/invoke"));
    assert!(wrapper.contains("/health"));
}
