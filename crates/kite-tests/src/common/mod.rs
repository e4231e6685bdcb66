// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Common Test Utilities
//!
//! Shared utilities for the integration tests.
//!
//! - `fixtures`: Pre-built test data and configuration documents
//! - `builders`: Builder patterns for handles and subscriptions
//! - `mocks`: Mock transports with request recording and error injection

pub mod builders;
pub mod fixtures;
pub mod mocks;

// Re-exports for convenience
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();
static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Initialize test logging. Call this at the start of each test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        // Another harness may already own the global subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("warn,kite=debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Generate a unique test ID for resource isolation.
pub fn unique_test_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("test_{}_{}", timestamp, COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Create a temporary directory for test data.
pub fn temp_test_dir(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temp directory")
}
