// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn clear_env() {
    for key in [
        "OKEN_DATA_DIR",
        "OKEN_DOCKER_NETWORK",
        "OKEN_DEFAULT_WARM_TIMEOUT",
        "OKEN_CLEANUP_INTERVAL",
        "OKEN_CONTAINER_PORT",
        "OKEN_HEALTH_CHECK_TIMEOUT",
        "OKEN_INVOKE_TIMEOUT",
        "OKEN_LISTEN_PORT",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn defaults_match_the_documented_table() {
    clear_env();
    let config = RunnerConfig::from_env();

    assert_eq!(config.data_dir, PathBuf::from("/tmp/oken"));
    assert_eq!(config.docker_network, "oken-agents");
    assert_eq!(config.default_warm_timeout, 300);
    assert_eq!(config.cleanup_interval, Duration::from_secs(30));
    assert_eq!(config.container_port, 8080);
    assert_eq!(config.health_check_timeout, 30);
    assert_eq!(config.invoke_timeout, Duration::from_secs(300));
    assert_eq!(config.listen_port, 9090);
}

#[test]
#[serial]
fn env_vars_override_defaults() {
    clear_env();
    std::env::set_var("OKEN_DATA_DIR", "/var/oken");
    std::env::set_var("OKEN_CONTAINER_PORT", "9090");
    std::env::set_var("OKEN_CLEANUP_INTERVAL", "5");

    let config = RunnerConfig::from_env();
    assert_eq!(config.data_dir, PathBuf::from("/var/oken"));
    assert_eq!(config.container_port, 9090);
    assert_eq!(config.cleanup_interval, Duration::from_secs(5));

    clear_env();
}

#[test]
#[serial]
fn empty_string_env_var_falls_back_to_default() {
    clear_env();
    std::env::set_var("OKEN_DOCKER_NETWORK", "");
    let config = RunnerConfig::from_env();
    assert_eq!(config.docker_network, "oken-agents");
    clear_env();
}

#[test]
fn agent_workspace_nests_under_data_dir_agents() {
    let config = RunnerConfig {
        data_dir: PathBuf::from("/tmp/oken"),
        docker_network: "oken-agents".to_string(),
        default_warm_timeout: 300,
        cleanup_interval: Duration::from_secs(30),
        container_port: 8080,
        health_check_timeout: 30,
        invoke_timeout: Duration::from_secs(300),
        listen_port: 9090,
    };
    assert_eq!(config.agent_workspace("h1"), PathBuf::from("/tmp/oken/agents/h1"));
}
