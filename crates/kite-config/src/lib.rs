// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # kite-config
//!
//! Configuration loading and logging setup for kite.
//!
//! ## Features
//!
//! - **Multi-Format Support**: YAML, TOML, and JSON configuration files
//! - **Placeholders**: `${VAR}` and `${VAR:default}` resolved before parsing
//! - **Environment Overrides**: `KITE_*` variables applied after parsing
//! - **Logging**: `tracing-subscriber` setup in text, JSON or compact form
//!
//! ## Quick Start
//!
//! ```no_run
//! use kite_config::loader::load_config;
//!
//! let config = load_config("kite.yaml").unwrap();
//! println!("Batch limit: {:?}", config.toolbox.max_items_per_batch);
//! ```
//!
//! ## Configuration Schema
//!
//! - `toolbox` - Monitored-item batch settings
//! - `discovery` - Settings handed to discovery clients
//! - `logging` - Log level and format

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod logging;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, load_config_str, ConfigFormat, ConfigLoader};
pub use logging::init_logging;
pub use schema::{KiteConfig, LogFormat, LogLevel, LoggingConfig};
