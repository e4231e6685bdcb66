// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Logging and tracing initialization.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{LogFormat, LoggingConfig};

// =============================================================================
// Logging Initialization
// =============================================================================

/// Installs the global subscriber described by `config`.
///
/// `RUST_LOG` overrides the configured level. Fails if a global subscriber
/// is already set.
///
/// # Example
///
/// ```ignore
/// use kite_config::{init_logging, LoggingConfig};
///
/// init_logging(&LoggingConfig::default())?;
/// ```
pub fn init_logging(config: &LoggingConfig) -> ConfigResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    match config.format {
        LogFormat::Text => init_text_logging(filter, config.with_target),
        LogFormat::Json => init_json_logging(filter, config.with_target),
        LogFormat::Compact => init_compact_logging(filter),
    }
}

fn init_text_logging(filter: EnvFilter, with_target: bool) -> ConfigResult<()> {
    let is_terminal = std::io::IsTerminal::is_terminal(&std::io::stdout());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(with_target)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(is_terminal),
        )
        .try_init()
        .map_err(|e| ConfigError::logging(e.to_string()))
}

/// JSON lines for log aggregation.
fn init_json_logging(filter: EnvFilter, with_target: bool) -> ConfigResult<()> {
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .json()
                .with_target(with_target)
                .with_file(true)
                .with_line_number(true)
                .with_current_span(true)
                .with_span_list(true),
        )
        .try_init()
        .map_err(|e| ConfigError::logging(e.to_string()))
}

fn init_compact_logging(filter: EnvFilter) -> ConfigResult<()> {
    let is_terminal = std::io::IsTerminal::is_terminal(&std::io::stdout());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(is_terminal),
        )
        .try_init()
        .map_err(|e| ConfigError::logging(e.to_string()))
}

// =============================================================================
// Log Level Parsing
// =============================================================================

/// Parses a log level string into a `Level`, defaulting to INFO.
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
