// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for monitored-item batches and discovery.
//!
//! # Error Categories
//!
//! ```text
//! OpcUaError
//! ├── Connection    - Endpoint and channel issues reported by the transport
//! ├── Session       - Session lifecycle errors reported by the transport
//! ├── Validation    - Local checks that abort a batch before any request
//! ├── Protocol      - Responses that violate the request/response contract
//! ├── Operation     - Service-level bad status codes
//! ├── Subscription  - Client-side subscription bookkeeping
//! ├── Discovery     - A failed discovery stage
//! ├── Configuration - Invalid settings
//! └── Timeout       - Request timeouts reported by the transport
//! ```
//!
//! Transport errors are never rewrapped by the toolbox: whatever the
//! [`SessionTransport`](crate::client::SessionTransport) returns reaches the
//! caller unchanged.
//!
//! # Examples
//!
//! ```
//! use kite_opcua::error::{OpcUaError, ProtocolError};
//! use kite_opcua::types::BatchOperation;
//!
//! let error = OpcUaError::protocol(ProtocolError::result_count_mismatch(
//!     BatchOperation::ModifyMonitoredItems,
//!     3,
//!     2,
//! ));
//!
//! assert_eq!(error.category(), "protocol");
//! assert!(!error.is_retryable());
//! ```

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::Level;

use crate::types::{AttributeId, BatchOperation, DiscoveryStage, StatusCode};

// =============================================================================
// OpcUaError - Main Error Type
// =============================================================================

/// The main error type for OPC UA client operations.
#[derive(Debug, Error)]
pub enum OpcUaError {
    /// Connection-related errors.
    #[error("{0}")]
    Connection(#[from] ConnectionError),

    /// Session lifecycle errors.
    #[error("{0}")]
    Session(#[from] SessionError),

    /// Local validation failures.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Protocol invariant violations.
    #[error("{0}")]
    Protocol(#[from] ProtocolError),

    /// Service operation errors.
    #[error("{0}")]
    Operation(#[from] OperationError),

    /// Subscription bookkeeping errors.
    #[error("{0}")]
    Subscription(#[from] SubscriptionError),

    /// Discovery stage errors.
    #[error("{0}")]
    Discovery(#[from] DiscoveryError),

    /// Configuration errors.
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),

    /// Timeout errors.
    #[error("{0}")]
    Timeout(#[from] TimeoutError),
}

impl OpcUaError {
    // =========================================================================
    // Factory Methods
    // =========================================================================

    /// Creates a connection error.
    #[inline]
    pub fn connection(error: ConnectionError) -> Self {
        Self::Connection(error)
    }

    /// Creates a session error.
    #[inline]
    pub fn session(error: SessionError) -> Self {
        Self::Session(error)
    }

    /// Creates a validation error.
    #[inline]
    pub fn validation(error: ValidationError) -> Self {
        Self::Validation(error)
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(error: ProtocolError) -> Self {
        Self::Protocol(error)
    }

    /// Creates an operation error.
    #[inline]
    pub fn operation(error: OperationError) -> Self {
        Self::Operation(error)
    }

    /// Creates a subscription error.
    #[inline]
    pub fn subscription(error: SubscriptionError) -> Self {
        Self::Subscription(error)
    }

    /// Creates a configuration error.
    #[inline]
    pub fn configuration(error: ConfigurationError) -> Self {
        Self::Configuration(error)
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(error: TimeoutError) -> Self {
        Self::Timeout(error)
    }

    // =========================================================================
    // Convenience Factory Methods
    // =========================================================================

    /// Creates a connection refused error.
    pub fn connection_refused(endpoint: impl Into<String>) -> Self {
        Self::Connection(ConnectionError::refused(endpoint))
    }

    /// Creates a not connected error.
    pub fn not_connected() -> Self {
        Self::Connection(ConnectionError::NotConnected)
    }

    /// Creates a session closed error.
    pub fn session_closed() -> Self {
        Self::Session(SessionError::Closed)
    }

    /// Creates a bad status error for a batch operation.
    pub fn bad_status(operation: BatchOperation, status_code: StatusCode) -> Self {
        Self::Operation(OperationError::bad_status(operation, status_code))
    }

    // =========================================================================
    // Error Properties
    // =========================================================================

    /// Returns `true` if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(e) => e.is_retryable(),
            Self::Session(e) => e.is_retryable(),
            Self::Operation(e) => e.is_retryable(),
            Self::Discovery(e) => e.source.is_retryable(),
            Self::Timeout(_) => true,
            Self::Validation(_)
            | Self::Protocol(_)
            | Self::Subscription(_)
            | Self::Configuration(_) => false,
        }
    }

    /// Returns the severity level of this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Connection(_) | Self::Session(_) => ErrorSeverity::Error,
            Self::Validation(_) => ErrorSeverity::Warning,
            Self::Protocol(_) => ErrorSeverity::Critical,
            Self::Operation(_) => ErrorSeverity::Warning,
            Self::Subscription(_) => ErrorSeverity::Warning,
            Self::Discovery(e) => e.source.severity(),
            Self::Configuration(_) => ErrorSeverity::Critical,
            Self::Timeout(_) => ErrorSeverity::Warning,
        }
    }

    /// Returns the error category for logging and metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Session(_) => "session",
            Self::Validation(_) => "validation",
            Self::Protocol(_) => "protocol",
            Self::Operation(_) => "operation",
            Self::Subscription(_) => "subscription",
            Self::Discovery(_) => "discovery",
            Self::Configuration(_) => "configuration",
            Self::Timeout(_) => "timeout",
        }
    }

    /// Returns a unique error code for this error.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Connection(e) => e.error_code(),
            Self::Session(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            Self::Protocol(e) => e.error_code(),
            Self::Operation(e) => e.error_code(),
            Self::Subscription(e) => e.error_code(),
            Self::Discovery(e) => e.error_code(),
            Self::Configuration(e) => e.error_code(),
            Self::Timeout(_) => ErrorCode::new(9, 1),
        }
    }

    /// Returns the status code carried by this error, if any.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Operation(OperationError::BadStatus { status_code, .. }) => Some(*status_code),
            Self::Discovery(e) => e.source.status_code(),
            _ => None,
        }
    }

    /// Returns the tracing level for this error.
    pub fn tracing_level(&self) -> Level {
        self.severity().to_tracing_level()
    }

    /// Logs this error with appropriate level and context.
    pub fn log(&self, context: &str) {
        let code = self.error_code();

        match self.tracing_level() {
            Level::ERROR => tracing::error!(
                error_code = %code,
                category = self.category(),
                context = context,
                retryable = self.is_retryable(),
                "{self}"
            ),
            Level::WARN => tracing::warn!(
                error_code = %code,
                category = self.category(),
                context = context,
                retryable = self.is_retryable(),
                "{self}"
            ),
            _ => tracing::debug!(
                error_code = %code,
                category = self.category(),
                context = context,
                retryable = self.is_retryable(),
                "{self}"
            ),
        }
    }
}

// =============================================================================
// ConnectionError
// =============================================================================

/// Connection-related errors.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Connection was refused by the remote host.
    #[error("Connection refused to '{endpoint}'")]
    Refused {
        /// The endpoint URL.
        endpoint: String,
    },

    /// Connection attempt timed out.
    #[error("Connection timed out to '{endpoint}' after {duration:?}")]
    TimedOut {
        /// The endpoint URL.
        endpoint: String,
        /// Time waited before giving up.
        duration: Duration,
    },

    /// Endpoint URL could not be used.
    #[error("Invalid endpoint URL: '{url}' - {reason}")]
    InvalidEndpoint {
        /// The endpoint URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Connection closed by the peer.
    #[error("Connection closed unexpectedly")]
    Closed {
        /// Close reason, if the peer sent one.
        reason: Option<String>,
    },

    /// Operation attempted without a connection.
    #[error("Not connected to OPC UA server")]
    NotConnected,
}

impl ConnectionError {
    /// Creates a refused error.
    pub fn refused(endpoint: impl Into<String>) -> Self {
        Self::Refused {
            endpoint: endpoint.into(),
        }
    }

    /// Creates a timed out error.
    pub fn timed_out(endpoint: impl Into<String>, duration: Duration) -> Self {
        Self::TimedOut {
            endpoint: endpoint.into(),
            duration,
        }
    }

    /// Creates an invalid endpoint error.
    pub fn invalid_endpoint(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates a closed error.
    pub fn closed(reason: Option<String>) -> Self {
        Self::Closed { reason }
    }

    /// Returns `true` if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidEndpoint { .. })
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        let code = match self {
            Self::Refused { .. } => 1,
            Self::TimedOut { .. } => 2,
            Self::InvalidEndpoint { .. } => 3,
            Self::Closed { .. } => 4,
            Self::NotConnected => 5,
        };
        ErrorCode::new(1, code)
    }
}

// =============================================================================
// SessionError
// =============================================================================

/// Session lifecycle errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session behind a subscription is gone.
    #[error("Session closed")]
    Closed,

    /// The session exists but was never activated.
    #[error("Session not activated")]
    NotActivated,

    /// The server expired the session.
    #[error("Session expired (ID: {session_id:?})")]
    Expired {
        /// Session identifier, if known.
        session_id: Option<String>,
    },
}

impl SessionError {
    /// Creates an expired error.
    pub fn expired(session_id: Option<String>) -> Self {
        Self::Expired { session_id }
    }

    /// Returns `true` if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Expired { .. })
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        let code = match self {
            Self::Closed => 1,
            Self::NotActivated => 2,
            Self::Expired { .. } => 3,
        };
        ErrorCode::new(2, code)
    }
}

// =============================================================================
// ValidationError
// =============================================================================

/// Local validation failures detected before a batch is sent.
///
/// Any of these aborts the whole batch: no request goes out and no handle
/// changes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Handle was built for a different subscription.
    #[error(
        "Monitored item {client_handle} belongs to subscription {owner}, not {subscription}"
    )]
    ForeignSubscription {
        /// Client handle of the offending item.
        client_handle: u32,
        /// Subscription the handle was built for.
        owner: u32,
        /// Subscription the batch targets.
        subscription: u32,
    },

    /// Handle already has a server-assigned id.
    #[error("Monitored item {client_handle} is already created (id {monitored_item_id})")]
    AlreadyCreated {
        /// Client handle of the offending item.
        client_handle: u32,
        /// Its server-assigned id.
        monitored_item_id: u32,
    },

    /// Handle has no server-assigned id yet.
    #[error("Monitored item {client_handle} has not been created on the server")]
    NotCreated {
        /// Client handle of the offending item.
        client_handle: u32,
    },

    /// A data change filter was attached to an attribute other than Value.
    #[error("Monitored item {client_handle}: deadband filter requires the Value attribute, got {attribute}")]
    FilterNotAllowed {
        /// Client handle of the offending item.
        client_handle: u32,
        /// The monitored attribute.
        attribute: AttributeId,
    },

    /// Deadband value is out of range.
    #[error("Monitored item {client_handle}: invalid deadband - {reason}")]
    InvalidDeadband {
        /// Client handle of the offending item.
        client_handle: u32,
        /// What is wrong with it.
        reason: String,
    },

    /// Batch exceeds the configured size limit.
    #[error("Batch of {count} monitored items exceeds the limit of {max}")]
    BatchTooLarge {
        /// Items in the batch.
        count: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl ValidationError {
    /// Creates an invalid deadband error.
    pub fn invalid_deadband(client_handle: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDeadband {
            client_handle,
            reason: reason.into(),
        }
    }

    /// Returns the client handle of the item that failed, if any.
    pub fn client_handle(&self) -> Option<u32> {
        match self {
            Self::ForeignSubscription { client_handle, .. }
            | Self::AlreadyCreated { client_handle, .. }
            | Self::NotCreated { client_handle }
            | Self::FilterNotAllowed { client_handle, .. }
            | Self::InvalidDeadband { client_handle, .. } => Some(*client_handle),
            Self::BatchTooLarge { .. } => None,
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        let code = match self {
            Self::ForeignSubscription { .. } => 1,
            Self::AlreadyCreated { .. } => 2,
            Self::NotCreated { .. } => 3,
            Self::FilterNotAllowed { .. } => 4,
            Self::InvalidDeadband { .. } => 5,
            Self::BatchTooLarge { .. } => 6,
        };
        ErrorCode::new(3, code)
    }
}

// =============================================================================
// ProtocolError
// =============================================================================

/// Responses that break the request/response contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The response carries a different number of results than items sent.
    #[error("{operation} returned {actual} results for {expected} items")]
    ResultCountMismatch {
        /// The batch operation.
        operation: BatchOperation,
        /// Items in the request.
        expected: usize,
        /// Results in the response.
        actual: usize,
    },
}

impl ProtocolError {
    /// Creates a result count mismatch error.
    pub fn result_count_mismatch(
        operation: BatchOperation,
        expected: usize,
        actual: usize,
    ) -> Self {
        Self::ResultCountMismatch {
            operation,
            expected,
            actual,
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::ResultCountMismatch { .. } => ErrorCode::new(4, 1),
        }
    }
}

// =============================================================================
// OperationError
// =============================================================================

/// Service operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// The server answered with a bad status.
    #[error("{operation} failed with status {status_code}")]
    BadStatus {
        /// The batch operation.
        operation: BatchOperation,
        /// Status code returned by the server.
        status_code: StatusCode,
    },
}

impl OperationError {
    /// Creates a bad status error.
    pub fn bad_status(operation: BatchOperation, status_code: StatusCode) -> Self {
        Self::BadStatus {
            operation,
            status_code,
        }
    }

    /// Returns `true` if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::BadStatus { status_code, .. } => matches!(
                *status_code,
                StatusCode::BAD_TIMEOUT
                    | StatusCode::BAD_TOO_MANY_OPERATIONS
                    | StatusCode::BAD_RESOURCE_UNAVAILABLE
            ),
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::BadStatus { .. } => ErrorCode::new(5, 1),
        }
    }
}

// =============================================================================
// SubscriptionError
// =============================================================================

/// Client-side subscription bookkeeping errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    /// A client handle is already in use within the subscription.
    #[error("Client handle {client_handle} is already used in subscription {subscription_id}")]
    DuplicateClientHandle {
        /// The subscription.
        subscription_id: u32,
        /// The duplicated handle.
        client_handle: u32,
    },

    /// Every client handle up to `u32::MAX` has been handed out.
    #[error("Client handles exhausted in subscription {subscription_id}")]
    ClientHandlesExhausted {
        /// The subscription.
        subscription_id: u32,
    },
}

impl SubscriptionError {
    /// Creates a duplicate client handle error.
    pub fn duplicate_client_handle(subscription_id: u32, client_handle: u32) -> Self {
        Self::DuplicateClientHandle {
            subscription_id,
            client_handle,
        }
    }

    /// Creates a client handle exhaustion error.
    pub fn client_handles_exhausted(subscription_id: u32) -> Self {
        Self::ClientHandlesExhausted { subscription_id }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::DuplicateClientHandle { .. } => ErrorCode::new(6, 1),
            Self::ClientHandlesExhausted { .. } => ErrorCode::new(6, 2),
        }
    }
}

// =============================================================================
// DiscoveryError
// =============================================================================

/// A discovery pipeline stage failed.
#[derive(Debug, Error)]
#[error("Discovery {stage} failed for '{endpoint}': {source}")]
pub struct DiscoveryError {
    /// The stage that failed.
    pub stage: DiscoveryStage,
    /// Discovery endpoint URL.
    pub endpoint: String,
    /// The underlying error.
    pub source: Box<OpcUaError>,
}

impl DiscoveryError {
    /// Creates a discovery error.
    pub fn new(stage: DiscoveryStage, endpoint: impl Into<String>, source: OpcUaError) -> Self {
        Self {
            stage,
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        let code = match self.stage {
            DiscoveryStage::Connect => 1,
            DiscoveryStage::FindServers => 2,
            DiscoveryStage::GetEndpoints => 3,
            DiscoveryStage::FindServersOnNetwork => 4,
        };
        ErrorCode::new(7, code)
    }
}

// =============================================================================
// ConfigurationError
// =============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Node id string could not be parsed.
    #[error("Invalid node ID '{node_id}': {reason}")]
    InvalidNodeId {
        /// The offending input.
        node_id: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A setting has an invalid value.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Setting name.
        field: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl ConfigurationError {
    /// Creates an invalid node id error.
    pub fn invalid_node_id(node_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNodeId {
            node_id: node_id.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        let code = match self {
            Self::InvalidNodeId { .. } => 1,
            Self::InvalidValue { .. } => 2,
        };
        ErrorCode::new(8, code)
    }
}

// =============================================================================
// TimeoutError
// =============================================================================

/// A request did not complete in time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} timed out after {duration:?}")]
pub struct TimeoutError {
    /// The request that timed out.
    pub operation: String,
    /// How long the transport waited.
    pub duration: Duration,
}

impl TimeoutError {
    /// Creates a timeout error.
    pub fn new(operation: impl Into<String>, duration: Duration) -> Self {
        Self {
            operation: operation.into(),
            duration,
        }
    }
}

// =============================================================================
// ErrorSeverity
// =============================================================================

/// Error severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Informational - no action required.
    Info,
    /// Warning - action may be required.
    Warning,
    /// Error - action required, but recoverable.
    Error,
    /// Critical - immediate action required.
    Critical,
}

impl ErrorSeverity {
    /// Converts to tracing level.
    pub fn to_tracing_level(self) -> Level {
        match self {
            Self::Info => Level::INFO,
            Self::Warning => Level::WARN,
            Self::Error | Self::Critical => Level::ERROR,
        }
    }

    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// ErrorCode
// =============================================================================

/// Structured error code for categorization.
///
/// Format: `UA-XXYY` where XX is category and YY is specific error.
///
/// Categories:
/// - 1: Connection
/// - 2: Session
/// - 3: Validation
/// - 4: Protocol
/// - 5: Operation
/// - 6: Subscription
/// - 7: Discovery
/// - 8: Configuration
/// - 9: Timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode {
    /// Category (1-9).
    pub category: u8,
    /// Specific error within category.
    pub code: u8,
}

impl ErrorCode {
    /// Creates a new error code.
    pub const fn new(category: u8, code: u8) -> Self {
        Self { category, code }
    }

    /// Returns the full error code as a u16.
    pub fn as_u16(&self) -> u16 {
        ((self.category as u16) << 8) | (self.code as u16)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UA-{:02X}{:02X}", self.category, self.code)
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// A Result type with OpcUaError.
pub type OpcUaResult<T> = Result<T, OpcUaError>;

// =============================================================================
// Tests
// =============================================================================
