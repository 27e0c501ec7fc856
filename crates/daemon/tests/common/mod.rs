// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixture for the literal end-to-end scenarios.

use std::io::Write as _;
use std::sync::Arc;

use flate2::write::GzEncoder;
use flate2::Compression;
use oken_core::FakeClock;
use oken_daemon::config::RunnerConfig;
use oken_daemon::pipeline::Pipeline;
use oken_driver::test_support::FakeContainerDriver;
use oken_driver::ContainerDriver;
use oken_proxy::test_support::FakeInvocationProxy;
use oken_proxy::InvocationProxy;
use oken_registry::AgentRegistry;
use tar::Builder;

pub fn bundle(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = Builder::new(Vec::new());
    for (name, contents) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        // Bypass `Header::set_path`'s validation (it rejects absolute
        // paths and `..` components) so tests can build tarballs with
        // deliberately malicious entry names.
        let name_bytes = name.as_bytes();
        header.as_old_mut().name[..name_bytes.len()].copy_from_slice(name_bytes);
        header.set_cksum();
        builder.append(&header, *contents).unwrap();
    }
    let tar_bytes = builder.into_inner().unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&tar_bytes).unwrap();
    encoder.finish().unwrap()
}

pub fn handler_bundle(name: &str) -> Vec<u8> {
    bundle(&[
        ("main.py", b"def handler(input):\n    return input\n"),
        ("oken.toml", format!("[agent]\nname = \"{name}\"\n").as_bytes()),
    ])
}

pub fn agent_bundle(name: &str) -> Vec<u8> {
    bundle(&[
        (
            "agent.py",
            b"class Agent:\n    def setup(self):\n        self.n = 0\n    def run(self, x):\n        self.n += 1\n        return {\"n\": self.n}\n",
        ),
        ("oken.toml", format!("[agent]\nname = \"{name}\"\nentrypoint = \"agent.py\"\n").as_bytes()),
    ])
}

pub struct Fixture {
    pub pipeline: Pipeline<FakeClock>,
    pub driver: Arc<FakeContainerDriver>,
    pub proxy: Arc<FakeInvocationProxy>,
    pub clock: FakeClock,
}

pub fn fixture() -> Fixture {
    let clock = FakeClock::new();
    let driver = Arc::new(FakeContainerDriver::new());
    let proxy = Arc::new(FakeInvocationProxy::new());
    let registry = Arc::new(AgentRegistry::new(clock.clone(), driver.clone() as Arc<dyn ContainerDriver>));
    let workspace = tempfile::tempdir().unwrap();
    let config = RunnerConfig {
        data_dir: workspace.keep(),
        docker_network: "oken-agents".to_string(),
        default_warm_timeout: 300,
        cleanup_interval: std::time::Duration::from_secs(30),
        container_port: 8080,
        health_check_timeout: 5,
        invoke_timeout: std::time::Duration::from_secs(30),
        listen_port: 9090,
    };
    let pipeline = Pipeline {
        registry,
        driver: driver.clone() as Arc<dyn ContainerDriver>,
        proxy: proxy.clone() as Arc<dyn InvocationProxy>,
        config,
    };
    Fixture { pipeline, driver, proxy, clock }
}
