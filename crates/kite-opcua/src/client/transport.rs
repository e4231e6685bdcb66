// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Transport seams consumed by the toolbox and the discovery pipeline.
//!
//! [`SessionTransport`] carries the three monitored-item batch services over an
//! established session. [`DiscoveryClient`] is a short-lived client used only
//! for discovery calls. Encoding, secure channels and request timeouts all live
//! behind these traits.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::subscription::{MonitoredItemId, SubscriptionId};
use crate::error::OpcUaResult;
use crate::types::{
    ApplicationType, MonitoringMode, MonitoringParameters, ReadValueId, SecurityMode, StatusCode,
    TimestampsToReturn,
};

// =============================================================================
// CreateMonitoredItems
// =============================================================================

/// One item of a create batch.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredItemCreateRequest {
    /// What to sample.
    pub item_to_monitor: ReadValueId,

    /// Initial monitoring mode.
    pub monitoring_mode: MonitoringMode,

    /// Requested parameters; `client_handle` identifies the item.
    pub requested_parameters: MonitoringParameters,
}

/// CreateMonitoredItems request.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateMonitoredItemsRequest {
    /// Target subscription.
    pub subscription_id: SubscriptionId,

    /// Timestamps attached to notifications.
    pub timestamps_to_return: TimestampsToReturn,

    /// Items in caller order.
    pub items_to_create: Vec<MonitoredItemCreateRequest>,
}

/// Server acknowledgement for one created item.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredItemCreateResult {
    /// Per-item status.
    pub status_code: StatusCode,

    /// Server-assigned id; meaningful only when `status_code` is Good.
    pub monitored_item_id: MonitoredItemId,

    /// Sampling interval the server will use.
    pub revised_sampling_interval: Duration,

    /// Queue size the server will use.
    pub revised_queue_size: u32,
}

impl MonitoredItemCreateResult {
    /// Creates a Good result.
    pub fn good(
        monitored_item_id: impl Into<MonitoredItemId>,
        revised_sampling_interval: Duration,
        revised_queue_size: u32,
    ) -> Self {
        Self {
            status_code: StatusCode::GOOD,
            monitored_item_id: monitored_item_id.into(),
            revised_sampling_interval,
            revised_queue_size,
        }
    }

    /// Creates a rejected result.
    pub fn rejected(status_code: StatusCode) -> Self {
        Self {
            status_code,
            monitored_item_id: MonitoredItemId::new(0),
            revised_sampling_interval: Duration::ZERO,
            revised_queue_size: 0,
        }
    }
}

/// CreateMonitoredItems response.
///
/// `results` is `None` when the server omitted the list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateMonitoredItemsResponse {
    /// Per-item results, positionally aligned with the request.
    pub results: Option<Vec<MonitoredItemCreateResult>>,
}

impl CreateMonitoredItemsResponse {
    /// Creates a response carrying `results`.
    pub fn new(results: Vec<MonitoredItemCreateResult>) -> Self {
        Self {
            results: Some(results),
        }
    }

    /// Returns the results, treating a missing list as empty.
    pub fn into_results(self) -> Vec<MonitoredItemCreateResult> {
        self.results.unwrap_or_default()
    }
}

// =============================================================================
// ModifyMonitoredItems
// =============================================================================

/// One item of a modify batch.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredItemModifyRequest {
    /// Server-assigned id of the item.
    pub monitored_item_id: MonitoredItemId,

    /// New parameters, carrying the item's own client handle.
    pub requested_parameters: MonitoringParameters,
}

/// ModifyMonitoredItems request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifyMonitoredItemsRequest {
    /// Target subscription.
    pub subscription_id: SubscriptionId,

    /// Timestamps attached to notifications.
    pub timestamps_to_return: TimestampsToReturn,

    /// Items in caller order.
    pub items_to_modify: Vec<MonitoredItemModifyRequest>,
}

/// Server acknowledgement for one modified item.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredItemModifyResult {
    /// Per-item status.
    pub status_code: StatusCode,

    /// Sampling interval the server will use.
    pub revised_sampling_interval: Duration,

    /// Queue size the server will use.
    pub revised_queue_size: u32,
}

impl MonitoredItemModifyResult {
    /// Creates a Good result.
    pub fn good(revised_sampling_interval: Duration, revised_queue_size: u32) -> Self {
        Self {
            status_code: StatusCode::GOOD,
            revised_sampling_interval,
            revised_queue_size,
        }
    }

    /// Creates a rejected result.
    pub fn rejected(status_code: StatusCode) -> Self {
        Self {
            status_code,
            revised_sampling_interval: Duration::ZERO,
            revised_queue_size: 0,
        }
    }
}

/// ModifyMonitoredItems response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModifyMonitoredItemsResponse {
    /// Per-item results, positionally aligned with the request.
    pub results: Option<Vec<MonitoredItemModifyResult>>,
}

impl ModifyMonitoredItemsResponse {
    /// Creates a response carrying `results`.
    pub fn new(results: Vec<MonitoredItemModifyResult>) -> Self {
        Self {
            results: Some(results),
        }
    }

    /// Returns the results, treating a missing list as empty.
    pub fn into_results(self) -> Vec<MonitoredItemModifyResult> {
        self.results.unwrap_or_default()
    }
}

// =============================================================================
// SetMonitoringMode
// =============================================================================

/// SetMonitoringMode request.
#[derive(Debug, Clone, PartialEq)]
pub struct SetMonitoringModeRequest {
    /// Target subscription.
    pub subscription_id: SubscriptionId,

    /// Mode to apply.
    pub monitoring_mode: MonitoringMode,

    /// Items in caller order.
    pub monitored_item_ids: Vec<MonitoredItemId>,
}

/// SetMonitoringMode response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SetMonitoringModeResponse {
    /// Per-item status, positionally aligned with the request.
    pub results: Option<Vec<StatusCode>>,
}

impl SetMonitoringModeResponse {
    /// Creates a response carrying `results`.
    pub fn new(results: Vec<StatusCode>) -> Self {
        Self {
            results: Some(results),
        }
    }

    /// Returns the results, treating a missing list as empty.
    pub fn into_results(self) -> Vec<StatusCode> {
        self.results.unwrap_or_default()
    }
}

// =============================================================================
// Discovery Types
// =============================================================================

/// A server application reported by FindServers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplicationDescription {
    /// Globally unique application URI.
    pub application_uri: String,

    /// Product URI.
    #[serde(default)]
    pub product_uri: String,

    /// Human-readable name.
    pub application_name: String,

    /// Role of the application.
    #[serde(default)]
    pub application_type: ApplicationType,

    /// Gateway server URI, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_server_uri: Option<String>,

    /// Discovery profile URI, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery_profile_uri: Option<String>,

    /// URLs at which the application can be discovered.
    #[serde(default)]
    pub discovery_urls: Vec<String>,
}

impl ApplicationDescription {
    /// Creates a server description with one discovery URL.
    pub fn server(
        application_uri: impl Into<String>,
        application_name: impl Into<String>,
        discovery_url: impl Into<String>,
    ) -> Self {
        Self {
            application_uri: application_uri.into(),
            application_name: application_name.into(),
            application_type: ApplicationType::Server,
            discovery_urls: vec![discovery_url.into()],
            ..Default::default()
        }
    }
}

/// An endpoint reported by GetEndpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EndpointDescription {
    /// Endpoint URL.
    pub endpoint_url: String,

    /// Server exposing the endpoint.
    pub server: ApplicationDescription,

    /// Message security mode.
    #[serde(default)]
    pub security_mode: SecurityMode,

    /// Security policy URI.
    pub security_policy_uri: String,

    /// Transport profile URI.
    #[serde(default)]
    pub transport_profile_uri: String,

    /// Relative security level; higher is more secure.
    #[serde(default)]
    pub security_level: u8,
}

/// A server registered with a discovery server on the local network.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServerOnNetwork {
    /// Record id assigned by the discovery server.
    pub record_id: u32,

    /// Server name.
    pub server_name: String,

    /// Discovery URL of the server.
    pub discovery_url: String,

    /// Announced capability identifiers.
    #[serde(default)]
    pub server_capabilities: Vec<String>,
}

/// GetEndpoints filter options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetEndpointsOptions {
    /// Endpoint URL hint; `None` asks for every endpoint.
    pub endpoint_url: Option<String>,

    /// Preferred locales.
    pub locale_ids: Vec<String>,

    /// Transport profiles to keep; empty keeps all.
    pub profile_uris: Vec<String>,
}

// =============================================================================
// SessionTransport Trait
// =============================================================================

/// Monitored-item services of an established session.
///
/// Each call is one request and one response. Errors are returned to callers
/// of the toolbox unchanged.
#[async_trait]
pub trait SessionTransport: Send + Sync {
    /// Sends a CreateMonitoredItems request.
    async fn create_monitored_items(
        &self,
        request: CreateMonitoredItemsRequest,
    ) -> OpcUaResult<CreateMonitoredItemsResponse>;

    /// Sends a ModifyMonitoredItems request.
    async fn modify_monitored_items(
        &self,
        request: ModifyMonitoredItemsRequest,
    ) -> OpcUaResult<ModifyMonitoredItemsResponse>;

    /// Sends a SetMonitoringMode request.
    async fn set_monitoring_mode(
        &self,
        request: SetMonitoringModeRequest,
    ) -> OpcUaResult<SetMonitoringModeResponse>;
}

// =============================================================================
// DiscoveryClient Trait
// =============================================================================

/// Ephemeral client used by [`DiscoveryPipeline`](super::DiscoveryPipeline).
///
/// `disconnect` must be safe to call when `connect` failed or never ran.
#[async_trait]
pub trait DiscoveryClient: Send + Sync {
    // =========================================================================
    // Connection Management
    // =========================================================================

    /// Connects to the discovery endpoint.
    async fn connect(&mut self, endpoint_url: &str) -> OpcUaResult<()>;

    /// Releases the connection.
    async fn disconnect(&mut self) -> OpcUaResult<()>;

    // =========================================================================
    // Discovery Services
    // =========================================================================

    /// Lists the servers known to the endpoint.
    async fn find_servers(&self) -> OpcUaResult<Vec<ApplicationDescription>>;

    /// Lists servers registered on the local network.
    async fn find_servers_on_network(&self) -> OpcUaResult<Vec<ServerOnNetwork>>;

    /// Lists the endpoints of the connected server.
    async fn get_endpoints(
        &self,
        options: &GetEndpointsOptions,
    ) -> OpcUaResult<Vec<EndpointDescription>>;
}

// =============================================================================
// Tests
// =============================================================================
