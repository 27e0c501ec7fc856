// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use oken_core::AgentConfig;
use std::path::Path;

fn config() -> AgentConfig {
    AgentConfig { name: "h".to_string(), ..Default::default() }
}

#[tokio::test]
async fn start_then_stop_round_trips_container_presence() {
    let driver = FakeContainerDriver::new();
    let id = AgentId::parse("h1").expect("valid id");

    driver.ensure_network("oken-agents").await.expect("network");
    driver
        .build_image(&id, Path::new("/tmp"), &config(), EntrypointType::Handler, 8080)
        .await
        .expect("build");
    let (container_id, name) =
        driver.start_container(&id, &id.image_tag(), "oken-agents", &[]).await.expect("start");

    assert!(driver.has_container_named(&name));
    driver.stop_container(&container_id).await.expect("stop");
    assert!(!driver.has_container_named(&name));
}

#[tokio::test]
async fn fail_next_build_surfaces_build_failed_once() {
    let driver = FakeContainerDriver::new();
    let id = AgentId::parse("h1").expect("valid id");
    driver.fail_next_build();

    let err = driver
        .build_image(&id, Path::new("/tmp"), &config(), EntrypointType::Handler, 8080)
        .await
        .expect_err("should fail");
    assert!(matches!(err, DriverError::BuildFailed { .. }));

    // Second call is not poisoned.
    driver
        .build_image(&id, Path::new("/tmp"), &config(), EntrypointType::Handler, 8080)
        .await
        .expect("second build succeeds");
}

#[tokio::test]
async fn fail_next_start_surfaces_container_error() {
    let driver = FakeContainerDriver::new();
    let id = AgentId::parse("h1").expect("valid id");
    driver.fail_next_start();

    let err = driver.start_container(&id, "tag", "net", &[]).await.expect_err("should fail");
    assert!(matches!(err, DriverError::ContainerError(_)));
}

#[tokio::test]
async fn cleanup_orphans_removes_all_tracked_containers() {
    let driver = FakeContainerDriver::new();
    let a = AgentId::parse("a1").expect("valid id");
    let b = AgentId::parse("b1").expect("valid id");
    driver.start_container(&a, "tag", "net", &[]).await.expect("start a");
    driver.start_container(&b, "tag", "net", &[]).await.expect("start b");

    let count = driver.cleanup_orphans().await;
    assert_eq!(count, 2);
    assert!(!driver.has_container_named(&a.container_name()));
}
