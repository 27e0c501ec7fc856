// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#[tokio::main]
async fn main() {
    oken_daemon::init_logging();
    oken_daemon::run().await;
}
