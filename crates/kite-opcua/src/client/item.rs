// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Client-side monitored item handles.
//!
//! A [`MonitoredItemHandle`] is the local view of one server-side monitored
//! item. Its server-assigned id is set only from a Good creation
//! acknowledgement; everything else the server tells us is recorded alongside.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::subscription::{MonitoredItemId, SubscriptionId};
use super::transport::{
    MonitoredItemCreateRequest, MonitoredItemCreateResult, MonitoredItemModifyRequest,
    MonitoredItemModifyResult,
};
use crate::error::{OpcUaError, OpcUaResult, ValidationError};
use crate::types::{AttributeId, MonitoringMode, MonitoringParameters, ReadValueId, StatusCode};

// =============================================================================
// MonitoredItemState
// =============================================================================

/// Server-side lifecycle state of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case", tag = "state", content = "status")]
pub enum MonitoredItemState {
    /// Not yet acknowledged by the server.
    #[default]
    Unprepared,

    /// Created; the handle carries a server-assigned id.
    Created,

    /// The server refused creation with this status.
    Rejected(StatusCode),
}

impl MonitoredItemState {
    /// Returns `true` once the server has created the item.
    #[inline]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created)
    }
}

// =============================================================================
// MonitoredItemHandle
// =============================================================================

/// Local handle of one monitored item.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredItemHandle {
    subscription_id: SubscriptionId,
    client_handle: u32,
    item_to_monitor: ReadValueId,
    monitoring_parameters: MonitoringParameters,
    monitoring_mode: MonitoringMode,
    monitored_item_id: Option<MonitoredItemId>,
    state: MonitoredItemState,
    last_status: Option<StatusCode>,
    created_at: Option<DateTime<Utc>>,
}

impl MonitoredItemHandle {
    /// Creates a handle with default parameters in Reporting mode.
    ///
    /// `client_handle` must be unique within the subscription;
    /// [`Subscription::new_item`](super::Subscription::new_item) allocates one.
    pub fn new(subscription_id: SubscriptionId, client_handle: u32, item_to_monitor: ReadValueId) -> Self {
        Self {
            subscription_id,
            client_handle,
            item_to_monitor,
            monitoring_parameters: MonitoringParameters::default().with_client_handle(client_handle),
            monitoring_mode: MonitoringMode::default(),
            monitored_item_id: None,
            state: MonitoredItemState::Unprepared,
            last_status: None,
            created_at: None,
        }
    }

    /// Sets the requested parameters. The handle keeps its own client handle.
    pub fn with_parameters(mut self, parameters: MonitoringParameters) -> Self {
        self.monitoring_parameters = parameters.with_client_handle(self.client_handle);
        self
    }

    /// Sets the initial monitoring mode.
    pub fn with_monitoring_mode(mut self, mode: MonitoringMode) -> Self {
        self.monitoring_mode = mode;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Owning subscription.
    #[inline]
    pub fn subscription_id(&self) -> SubscriptionId {
        self.subscription_id
    }

    /// Client-assigned correlation id.
    #[inline]
    pub fn client_handle(&self) -> u32 {
        self.client_handle
    }

    /// What this item samples.
    #[inline]
    pub fn item_to_monitor(&self) -> &ReadValueId {
        &self.item_to_monitor
    }

    /// Current parameters, revised by the server once acknowledged.
    #[inline]
    pub fn monitoring_parameters(&self) -> &MonitoringParameters {
        &self.monitoring_parameters
    }

    /// Current monitoring mode.
    #[inline]
    pub fn monitoring_mode(&self) -> MonitoringMode {
        self.monitoring_mode
    }

    /// Server-assigned id, if created.
    #[inline]
    pub fn monitored_item_id(&self) -> Option<MonitoredItemId> {
        self.monitored_item_id
    }

    /// Lifecycle state.
    #[inline]
    pub fn state(&self) -> MonitoredItemState {
        self.state
    }

    /// Last per-item status reported by the server.
    #[inline]
    pub fn last_status(&self) -> Option<StatusCode> {
        self.last_status
    }

    /// When the server acknowledged creation.
    #[inline]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    // =========================================================================
    // Preparation
    // =========================================================================

    /// Builds the create request for this handle without touching it.
    pub fn prepare_for_monitoring(
        &self,
        subscription_id: SubscriptionId,
    ) -> OpcUaResult<MonitoredItemCreateRequest> {
        self.check_owner(subscription_id)?;
        if let Some(id) = self.monitored_item_id {
            return Err(ValidationError::AlreadyCreated {
                client_handle: self.client_handle,
                monitored_item_id: id.value(),
            }
            .into());
        }
        self.check_filter(&self.monitoring_parameters)?;

        Ok(MonitoredItemCreateRequest {
            item_to_monitor: self.item_to_monitor.clone(),
            monitoring_mode: self.monitoring_mode,
            requested_parameters: self.monitoring_parameters.with_client_handle(self.client_handle),
        })
    }

    /// Builds the modify request for this handle from shared parameters.
    pub fn prepare_for_modify(
        &self,
        subscription_id: SubscriptionId,
        parameters: &MonitoringParameters,
    ) -> OpcUaResult<MonitoredItemModifyRequest> {
        let monitored_item_id = self.require_created(subscription_id)?;
        self.check_filter(parameters)?;

        Ok(MonitoredItemModifyRequest {
            monitored_item_id,
            requested_parameters: parameters.with_client_handle(self.client_handle),
        })
    }

    /// Returns the server id to use in a set-monitoring-mode request.
    pub fn prepare_for_mode_change(
        &self,
        subscription_id: SubscriptionId,
    ) -> OpcUaResult<MonitoredItemId> {
        self.require_created(subscription_id)
    }

    fn check_owner(&self, subscription_id: SubscriptionId) -> OpcUaResult<()> {
        if self.subscription_id != subscription_id {
            return Err(ValidationError::ForeignSubscription {
                client_handle: self.client_handle,
                owner: self.subscription_id.value(),
                subscription: subscription_id.value(),
            }
            .into());
        }
        Ok(())
    }

    fn require_created(&self, subscription_id: SubscriptionId) -> OpcUaResult<MonitoredItemId> {
        self.check_owner(subscription_id)?;
        self.monitored_item_id.ok_or_else(|| {
            OpcUaError::from(ValidationError::NotCreated {
                client_handle: self.client_handle,
            })
        })
    }

    fn check_filter(&self, parameters: &MonitoringParameters) -> OpcUaResult<()> {
        let Some(filter) = parameters.filter.as_ref().filter(|f| !f.is_none()) else {
            return Ok(());
        };
        if self.item_to_monitor.attribute_id != AttributeId::Value {
            return Err(ValidationError::FilterNotAllowed {
                client_handle: self.client_handle,
                attribute: self.item_to_monitor.attribute_id,
            }
            .into());
        }
        filter
            .check()
            .map_err(|reason| ValidationError::invalid_deadband(self.client_handle, reason).into())
    }

    // =========================================================================
    // Server Acknowledgements
    // =========================================================================

    pub(crate) fn apply_create_result(&mut self, result: &MonitoredItemCreateResult) {
        self.last_status = Some(result.status_code);
        if result.status_code.is_good() {
            self.monitored_item_id = Some(result.monitored_item_id);
            self.monitoring_parameters.sampling_interval = result.revised_sampling_interval;
            self.monitoring_parameters.queue_size = result.revised_queue_size;
            self.state = MonitoredItemState::Created;
            self.created_at = Some(Utc::now());
        } else {
            self.state = MonitoredItemState::Rejected(result.status_code);
        }
    }

    /// Applies an accepted modify result to this handle.
    ///
    /// `requested` is the parameter set that was sent. On a Good status the
    /// handle takes those parameters with the server's revised values and
    /// `true` is returned. Any other status leaves the handle unchanged.
    pub fn apply_modify_result(
        &mut self,
        requested: &MonitoringParameters,
        result: &MonitoredItemModifyResult,
    ) -> bool {
        if !result.status_code.is_good() {
            return false;
        }
        let mut parameters = requested.with_client_handle(self.client_handle);
        parameters.sampling_interval = result.revised_sampling_interval;
        parameters.queue_size = result.revised_queue_size;
        self.monitoring_parameters = parameters;
        self.last_status = Some(result.status_code);
        true
    }

    pub(crate) fn apply_monitoring_mode(&mut self, mode: MonitoringMode) {
        self.monitoring_mode = mode;
    }
}

// =============================================================================
// Tests
// =============================================================================
