// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn defaults_match_spec_table() {
    let config: AgentConfig = toml::from_str(r#"name = "h""#).unwrap();
    assert_eq!(config.name, "h");
    assert_eq!(config.python_version, "3.12");
    assert_eq!(config.entrypoint, "main.py");
    assert_eq!(config.entrypoint_type, None);
    assert_eq!(config.warm_timeout, 300);
}

#[test]
fn overrides_are_honored() {
    let config: AgentConfig = toml::from_str(
        r#"
        name = "h"
        python_version = "3.11"
        entrypoint = "app.py"
        entrypoint_type = "http"
        warm_timeout = 60
        "#,
    )
    .unwrap();
    assert_eq!(config.python_version, "3.11");
    assert_eq!(config.entrypoint, "app.py");
    assert_eq!(config.entrypoint_type, Some(EntrypointType::Http));
    assert_eq!(config.warm_timeout, 60);
}

#[yare::parameterized(
    handler = { "handler", EntrypointType::Handler },
    agent = { "agent", EntrypointType::Agent },
    http = { "http", EntrypointType::Http },
)]
fn entrypoint_type_round_trips(raw: &str, expected: EntrypointType) {
    let config: AgentConfig =
        toml::from_str(&format!(r#"name = "h"{0}entrypoint_type = "{raw}""#, "\n")).unwrap();
    assert_eq!(config.entrypoint_type, Some(expected));
    assert_eq!(expected.as_str(), raw);
}
