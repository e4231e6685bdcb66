// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # KITE Integration Tests
//!
//! Integration tests for the monitored-item toolbox, the discovery pipeline
//! and configuration loading, plus the utilities they share.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities
//!   - `fixtures`: Canned node ids, servers, endpoints and config documents
//!   - `builders`: Builders for handles and subscriptions
//!   - `mocks`: Scriptable session transport and discovery client
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p kite-tests
//!
//! # Run specific test suite
//! cargo test -p kite-tests --test integration_toolbox
//! cargo test -p kite-tests --test integration_discovery
//! cargo test -p kite-tests --test integration_config
//! ```
//!
//! ## Test Categories
//!
//! ### Toolbox Tests (`integration_toolbox.rs`)
//! - Request ordering for all three batch services
//! - Fail-fast local validation
//! - Positional correlation of results, truncated and mismatched responses
//! - Monitoring mode update policies
//! - Subscription-level batch helpers
//!
//! ### Discovery Tests (`integration_discovery.rs`)
//! - Stage ordering and short-circuiting
//! - Exactly-once disconnect, including cancelled runs
//! - Partial results
//!
//! ### Config Tests (`integration_config.rs`)
//! - YAML, TOML and JSON documents
//! - Placeholders and environment overrides
//! - Validation rules
//!
//! ## Writing New Tests
//!
//! ```rust,ignore
//! use kite_tests::prelude::*;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let transport = MockSessionTransport::new();
//!     let mut subscription = SubscriptionBuilder::new(7).build(&transport.shared());
//!     // ... test logic
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::builders::*;
    pub use crate::common::fixtures::*;
    pub use crate::common::mocks::*;
    pub use crate::common::{init_test_logging, temp_test_dir, unique_test_id};
}
