// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Monitored-item batch orchestration and discovery for OPC UA clients.
//!
//! This crate sits between an application and an OPC UA session transport.
//! It groups monitored-item operations into single batched service calls and
//! runs short-lived discovery sessions.
//!
//! # Features
//!
//! - CreateMonitoredItems, ModifyMonitoredItems and SetMonitoringMode batches
//!   with strict positional correlation of results
//! - Local validation of every item before a request is sent
//! - Server ids assigned only from Good creation acknowledgements
//! - FindServers / GetEndpoints / FindServersOnNetwork against an ephemeral
//!   client that is always disconnected
//!
//! # Error Handling
//!
//! ```text
//! OpcUaError
//! ├── Connection    - Endpoint and channel issues
//! ├── Session       - Session lifecycle errors
//! ├── Validation    - Local checks before sending a batch
//! ├── Protocol      - Malformed batch responses
//! ├── Operation     - Bad service status codes
//! ├── Subscription  - Subscription bookkeeping
//! ├── Discovery     - A failed discovery stage
//! ├── Configuration - Invalid settings
//! └── Timeout       - Request timeouts
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kite_opcua::{MonitoredItemToolbox, ReadValueId, Subscription, SubscriptionId};
//!
//! let session: Arc<dyn SessionTransport> = Arc::new(my_transport);
//! let mut subscription = Subscription::new(SubscriptionId::new(1), &session);
//!
//! let handle = subscription.new_item(ReadValueId::value("ns=2;s=Boiler.Temp".parse()?))?;
//! subscription.adopt(handle)?;
//!
//! let toolbox = MonitoredItemToolbox::default();
//! subscription.monitor_items(&toolbox).await?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{
    ConfigurationError, ConnectionError, DiscoveryError, ErrorCode, ErrorSeverity, OpcUaError,
    OpcUaResult, OperationError, ProtocolError, SessionError, SubscriptionError, TimeoutError,
    ValidationError,
};

pub use types::{
    ApplicationType, AttributeId, BatchOperation, DeadbandSettings, DiscoveryOptions,
    DiscoveryStage, ModeUpdatePolicy, MonitoringMode, MonitoringParameters, NodeId,
    NodeIdentifier, ReadValueId, SecurityMode, StatusCode, TimestampsToReturn, ToolboxOptions,
};

// Re-export client types
pub use client::{
    ApplicationDescription, DiscoveryClient, DiscoveryClientFactory, DiscoveryPipeline,
    EndpointDescription, FindServersOutcome, GetEndpointsOptions, MonitoredItemHandle,
    MonitoredItemId, MonitoredItemState, MonitoredItemToolbox, ServerOnNetwork, SessionTransport,
    Subscription, SubscriptionId,
};
