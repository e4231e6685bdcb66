// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Client-side subscription bookkeeping.
//!
//! A [`Subscription`] owns its [`MonitoredItemHandle`]s in insertion order and
//! holds only a weak reference to the session transport: the session owns the
//! subscription's lifetime on the server, not the other way round.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut subscription = Subscription::new(SubscriptionId::new(1), &transport);
//!
//! let handle = subscription.new_item(ReadValueId::value("ns=2;s=Tank.Level".parse()?))?;
//! subscription.adopt(handle)?;
//!
//! let toolbox = MonitoredItemToolbox::default();
//! subscription.monitor_items(&toolbox).await?;
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};

use super::item::MonitoredItemHandle;
use super::toolbox::MonitoredItemToolbox;
use super::transport::{MonitoredItemModifyResult, SessionTransport};
use crate::error::{OpcUaError, OpcUaResult, SubscriptionError, ValidationError};
use crate::types::{MonitoringMode, MonitoringParameters, ReadValueId, StatusCode};

// =============================================================================
// Identifiers
// =============================================================================

/// Server-assigned subscription identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

impl SubscriptionId {
    /// Creates a new subscription ID.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

impl From<u32> for SubscriptionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Server-assigned monitored item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonitoredItemId(pub u32);

impl MonitoredItemId {
    /// Creates a new monitored item ID.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for MonitoredItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mi-{}", self.0)
    }
}

impl From<u32> for MonitoredItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

// =============================================================================
// Subscription
// =============================================================================

/// A client subscription and the monitored items it owns.
pub struct Subscription {
    subscription_id: SubscriptionId,
    session: Weak<dyn SessionTransport>,
    items: Vec<MonitoredItemHandle>,
    next_client_handle: AtomicU64,
}

impl Subscription {
    /// Creates a subscription bound to `session`.
    ///
    /// Only a weak reference to the session is kept.
    pub fn new(subscription_id: SubscriptionId, session: &Arc<dyn SessionTransport>) -> Self {
        Self {
            subscription_id,
            session: Arc::downgrade(session),
            items: Vec::new(),
            next_client_handle: AtomicU64::new(1),
        }
    }

    /// Server-assigned id.
    #[inline]
    pub fn subscription_id(&self) -> SubscriptionId {
        self.subscription_id
    }

    /// Returns the session transport, or `SessionError::Closed` once the
    /// session has been dropped.
    pub fn transport(&self) -> OpcUaResult<Arc<dyn SessionTransport>> {
        self.session.upgrade().ok_or_else(OpcUaError::session_closed)
    }

    /// Allocates a client handle unique within this subscription.
    ///
    /// Fails with `SubscriptionError::ClientHandlesExhausted` once handles
    /// above `u32::MAX` would be needed.
    pub fn allocate_client_handle(&self) -> OpcUaResult<u32> {
        let next = self.next_client_handle.fetch_add(1, Ordering::Relaxed);
        u32::try_from(next).map_err(|_| {
            OpcUaError::from(SubscriptionError::client_handles_exhausted(
                self.subscription_id.value(),
            ))
        })
    }

    /// Builds a new handle for this subscription with a fresh client handle.
    ///
    /// The handle is not tracked until it is passed to [`adopt`](Self::adopt).
    pub fn new_item(&self, item_to_monitor: ReadValueId) -> OpcUaResult<MonitoredItemHandle> {
        Ok(MonitoredItemHandle::new(
            self.subscription_id,
            self.allocate_client_handle()?,
            item_to_monitor,
        ))
    }

    /// Starts tracking a handle built for this subscription.
    pub fn adopt(&mut self, handle: MonitoredItemHandle) -> OpcUaResult<()> {
        if handle.subscription_id() != self.subscription_id {
            return Err(ValidationError::ForeignSubscription {
                client_handle: handle.client_handle(),
                owner: handle.subscription_id().value(),
                subscription: self.subscription_id.value(),
            }
            .into());
        }
        if self.item(handle.client_handle()).is_some() {
            return Err(SubscriptionError::duplicate_client_handle(
                self.subscription_id.value(),
                handle.client_handle(),
            )
            .into());
        }

        // Keep allocation ahead of caller-chosen handles.
        self.next_client_handle
            .fetch_max(u64::from(handle.client_handle()) + 1, Ordering::Relaxed);

        tracing::debug!(
            subscription_id = %self.subscription_id,
            client_handle = handle.client_handle(),
            node_id = %handle.item_to_monitor().node_id,
            "Monitored item added"
        );
        self.items.push(handle);
        Ok(())
    }

    /// Stops tracking the handle with `client_handle`.
    pub fn remove_item(&mut self, client_handle: u32) -> Option<MonitoredItemHandle> {
        let index = self
            .items
            .iter()
            .position(|h| h.client_handle() == client_handle)?;
        Some(self.items.remove(index))
    }

    /// Tracked handles in insertion order.
    #[inline]
    pub fn items(&self) -> &[MonitoredItemHandle] {
        &self.items
    }

    /// Looks up a handle by client handle.
    pub fn item(&self, client_handle: u32) -> Option<&MonitoredItemHandle> {
        self.items.iter().find(|h| h.client_handle() == client_handle)
    }

    /// Looks up a handle mutably by client handle.
    pub fn item_mut(&mut self, client_handle: u32) -> Option<&mut MonitoredItemHandle> {
        self.items
            .iter_mut()
            .find(|h| h.client_handle() == client_handle)
    }

    /// Number of tracked handles.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    // =========================================================================
    // Batch Operations On Own Items
    // =========================================================================

    /// Creates every tracked item that has no server id yet.
    ///
    /// Uses the toolbox's default timestamps.
    pub async fn monitor_items(&mut self, toolbox: &MonitoredItemToolbox) -> OpcUaResult<()> {
        let transport = self.transport()?;
        let mut pending: Vec<&mut MonitoredItemHandle> = self
            .items
            .iter_mut()
            .filter(|h| h.monitored_item_id().is_none())
            .collect();
        toolbox
            .create_with_transport(
                self.subscription_id,
                transport.as_ref(),
                toolbox.options().default_timestamps,
                &mut pending,
            )
            .await
    }

    /// Modifies every tracked item and applies the accepted results.
    ///
    /// Uses the toolbox's default timestamps.
    pub async fn modify_items(
        &mut self,
        toolbox: &MonitoredItemToolbox,
        parameters: &MonitoringParameters,
    ) -> OpcUaResult<Vec<MonitoredItemModifyResult>> {
        let transport = self.transport()?;
        let results = toolbox
            .modify_with_transport(
                self.subscription_id,
                transport.as_ref(),
                &self.items,
                parameters,
                toolbox.options().default_timestamps,
            )
            .await?;

        for (handle, result) in self.items.iter_mut().zip(&results) {
            handle.apply_modify_result(parameters, result);
        }
        Ok(results)
    }

    /// Switches the monitoring mode of every tracked item.
    pub async fn set_items_monitoring_mode(
        &mut self,
        toolbox: &MonitoredItemToolbox,
        mode: MonitoringMode,
    ) -> OpcUaResult<Vec<StatusCode>> {
        let transport = self.transport()?;
        toolbox
            .set_monitoring_mode_with_transport(
                self.subscription_id,
                transport.as_ref(),
                &mut self.items,
                mode,
            )
            .await
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("subscription_id", &self.subscription_id)
            .field("session_alive", &(self.session.strong_count() > 0))
            .field("items", &self.items.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
