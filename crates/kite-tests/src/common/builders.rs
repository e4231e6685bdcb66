// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Builders
//!
//! Builders for monitored-item handles and subscriptions.
//!
//! ## Example
//!
//! ```rust,ignore
//! let handle = HandleBuilder::new(7, 1)
//!     .node(NodeId::string(2, "Boiler.Temperature"))
//!     .deadband(DeadbandSettings::percent(5.0))
//!     .build();
//! ```

use std::sync::Arc;
use std::time::Duration;

use kite_opcua::{
    AttributeId, DeadbandSettings, MonitoredItemHandle, MonitoredItemToolbox, MonitoringMode,
    MonitoringParameters, NodeId, ReadValueId, SessionTransport, Subscription, SubscriptionId,
    TimestampsToReturn,
};

// =============================================================================
// HandleBuilder
// =============================================================================

/// Builder for [`MonitoredItemHandle`].
#[derive(Debug, Clone)]
pub struct HandleBuilder {
    subscription_id: u32,
    client_handle: u32,
    node_id: NodeId,
    attribute_id: AttributeId,
    index_range: Option<String>,
    parameters: MonitoringParameters,
    monitoring_mode: MonitoringMode,
}

impl HandleBuilder {
    /// Creates a builder for a Value item on a numeric node named after the
    /// client handle.
    pub fn new(subscription_id: u32, client_handle: u32) -> Self {
        Self {
            subscription_id,
            client_handle,
            node_id: NodeId::numeric(2, 1000 + client_handle),
            attribute_id: AttributeId::Value,
            index_range: None,
            parameters: MonitoringParameters::default(),
            monitoring_mode: MonitoringMode::Reporting,
        }
    }

    /// Sets the node.
    pub fn node(mut self, node_id: NodeId) -> Self {
        self.node_id = node_id;
        self
    }

    /// Sets the attribute.
    pub fn attribute(mut self, attribute_id: AttributeId) -> Self {
        self.attribute_id = attribute_id;
        self
    }

    /// Sets the index range.
    pub fn index_range(mut self, range: impl Into<String>) -> Self {
        self.index_range = Some(range.into());
        self
    }

    /// Sets the sampling interval.
    pub fn sampling_interval(mut self, interval: Duration) -> Self {
        self.parameters.sampling_interval = interval;
        self
    }

    /// Sets the queue size.
    pub fn queue_size(mut self, queue_size: u32) -> Self {
        self.parameters.queue_size = queue_size;
        self
    }

    /// Sets the deadband filter.
    pub fn deadband(mut self, filter: DeadbandSettings) -> Self {
        self.parameters.filter = Some(filter);
        self
    }

    /// Sets the initial monitoring mode.
    pub fn mode(mut self, mode: MonitoringMode) -> Self {
        self.monitoring_mode = mode;
        self
    }

    /// Builds the handle.
    pub fn build(self) -> MonitoredItemHandle {
        let mut item = ReadValueId::attribute(self.node_id, self.attribute_id);
        item.index_range = self.index_range;
        MonitoredItemHandle::new(SubscriptionId::new(self.subscription_id), self.client_handle, item)
            .with_parameters(self.parameters)
            .with_monitoring_mode(self.monitoring_mode)
    }
}

/// Builds `count` Value handles with client handles `1..=count`.
pub fn handle_batch(subscription_id: u32, count: u32) -> Vec<MonitoredItemHandle> {
    (1..=count)
        .map(|client_handle| HandleBuilder::new(subscription_id, client_handle).build())
        .collect()
}

// =============================================================================
// SubscriptionBuilder
// =============================================================================

/// Builder for [`Subscription`] with tracked items.
#[derive(Debug, Clone)]
pub struct SubscriptionBuilder {
    subscription_id: u32,
    items: Vec<ReadValueId>,
}

impl SubscriptionBuilder {
    /// Creates a builder for an empty subscription.
    pub fn new(subscription_id: u32) -> Self {
        Self {
            subscription_id,
            items: Vec::new(),
        }
    }

    /// Adds a Value item for `node_id`.
    pub fn item(mut self, node_id: NodeId) -> Self {
        self.items.push(ReadValueId::value(node_id));
        self
    }

    /// Adds `count` numeric Value items.
    pub fn items(mut self, count: u32) -> Self {
        let start = self.items.len() as u32;
        self.items
            .extend((start..start + count).map(|i| ReadValueId::value(NodeId::numeric(2, 2000 + i))));
        self
    }

    /// Builds the subscription against `session`.
    pub fn build(self, session: &Arc<dyn SessionTransport>) -> Subscription {
        let mut subscription = Subscription::new(SubscriptionId::new(self.subscription_id), session);
        for item in self.items {
            let handle = subscription
                .new_item(item)
                .expect("fresh subscription should have client handles");
            subscription
                .adopt(handle)
                .expect("fresh handle should be adoptable");
        }
        subscription
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Creates `count` handles on `transport` and returns them.
///
/// Panics if the create call fails.
pub async fn created_handles(
    transport: &dyn SessionTransport,
    subscription_id: u32,
    count: u32,
) -> Vec<MonitoredItemHandle> {
    let mut handles = handle_batch(subscription_id, count);
    MonitoredItemToolbox::default()
        .create_with_transport(
            SubscriptionId::new(subscription_id),
            transport,
            TimestampsToReturn::Both,
            &mut handles,
        )
        .await
        .expect("create should succeed");
    assert!(handles.iter().all(|h| h.monitored_item_id().is_some()));
    handles
}
