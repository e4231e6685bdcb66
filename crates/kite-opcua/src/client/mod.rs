// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Monitored-item batches and discovery sessions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Subscription                            │
//! │          (owns MonitoredItemHandles, weak session ref)          │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    MonitoredItemToolbox                         │
//! │     (validate → one batch request → positional correlation)     │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     SessionTransport                            │
//! │            (create / modify / set monitoring mode)              │
//! └─────────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    DiscoveryPipeline                            │
//! │   (factory → DiscoveryClient → stages → guaranteed disconnect)  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod discovery;
mod item;
pub mod subscription;
mod toolbox;
mod transport;

pub use discovery::{DiscoveryClientFactory, DiscoveryPipeline, FindServersOutcome};
pub use item::{MonitoredItemHandle, MonitoredItemState};
pub use subscription::{MonitoredItemId, Subscription, SubscriptionId};
pub use toolbox::MonitoredItemToolbox;
pub use transport::{
    ApplicationDescription, CreateMonitoredItemsRequest, CreateMonitoredItemsResponse,
    DiscoveryClient, EndpointDescription, GetEndpointsOptions, ModifyMonitoredItemsRequest,
    ModifyMonitoredItemsResponse, MonitoredItemCreateRequest, MonitoredItemCreateResult,
    MonitoredItemModifyRequest, MonitoredItemModifyResult, ServerOnNetwork, SessionTransport,
    SetMonitoringModeRequest, SetMonitoringModeResponse,
};
