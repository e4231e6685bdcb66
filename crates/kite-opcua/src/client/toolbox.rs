// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Batched monitored-item services.
//!
//! [`MonitoredItemToolbox`] turns an ordered slice of handles into one
//! CreateMonitoredItems, ModifyMonitoredItems or SetMonitoringMode request and
//! maps the response back onto the handles by position.
//!
//! # Correlation Rules
//!
//! ```text
//! handles:  [h0, h1, h2, h3]
//! request:  [r0, r1, r2, r3]        same order, one request per call
//! results:  [s0, s1]                create: h2, h3 left untouched
//!                                   modify: ResultCountMismatch
//! ```
//!
//! Every handle is validated before anything is sent. The first validation
//! error is returned and no handle is changed. Transport errors are returned
//! unchanged and also leave the handles as they were.

use std::borrow::{Borrow, BorrowMut};

use tracing::{debug, info, warn};

use super::item::MonitoredItemHandle;
use super::subscription::{Subscription, SubscriptionId};
use super::transport::{
    CreateMonitoredItemsRequest, ModifyMonitoredItemsRequest, MonitoredItemModifyResult,
    SessionTransport, SetMonitoringModeRequest,
};
use crate::error::{OpcUaError, OpcUaResult, ProtocolError, ValidationError};
use crate::types::{
    BatchOperation, ModeUpdatePolicy, MonitoringMode, MonitoringParameters, StatusCode,
    TimestampsToReturn, ToolboxOptions,
};

/// Batch coordinator for monitored items.
#[derive(Debug, Clone, Default)]
pub struct MonitoredItemToolbox {
    options: ToolboxOptions,
}

impl MonitoredItemToolbox {
    /// Creates a toolbox with the given options.
    pub fn new(options: ToolboxOptions) -> Self {
        Self { options }
    }

    /// Returns the options.
    #[inline]
    pub fn options(&self) -> &ToolboxOptions {
        &self.options
    }

    // =========================================================================
    // CreateMonitoredItems
    // =========================================================================

    /// Creates `handles` on the server in one request.
    ///
    /// Handles acknowledged with Good receive their server id; others are
    /// marked rejected. If the server returns fewer results than handles, the
    /// trailing handles stay as they were.
    pub async fn create<H>(
        &self,
        subscription: &Subscription,
        timestamps_to_return: TimestampsToReturn,
        handles: &mut [H],
    ) -> OpcUaResult<()>
    where
        H: BorrowMut<MonitoredItemHandle> + Send,
    {
        let transport = subscription.transport()?;
        self.create_with_transport(
            subscription.subscription_id(),
            transport.as_ref(),
            timestamps_to_return,
            handles,
        )
        .await
    }

    /// [`create`](Self::create) against an explicit transport.
    pub async fn create_with_transport<H>(
        &self,
        subscription_id: SubscriptionId,
        transport: &dyn SessionTransport,
        timestamps_to_return: TimestampsToReturn,
        handles: &mut [H],
    ) -> OpcUaResult<()>
    where
        H: BorrowMut<MonitoredItemHandle> + Send,
    {
        if handles.is_empty() {
            debug!(subscription_id = %subscription_id, "No monitored items to create");
            return Ok(());
        }
        self.check_batch_size(handles.len())?;

        let items_to_create = handles
            .iter()
            .map(|h| Borrow::<MonitoredItemHandle>::borrow(h).prepare_for_monitoring(subscription_id))
            .collect::<OpcUaResult<Vec<_>>>()?;

        let request = CreateMonitoredItemsRequest {
            subscription_id,
            timestamps_to_return,
            items_to_create,
        };

        debug!(
            subscription_id = %subscription_id,
            items = handles.len(),
            "Sending CreateMonitoredItems"
        );
        let results = transport
            .create_monitored_items(request)
            .await
            .map_err(|e| {
                e.log("CreateMonitoredItems");
                e
            })?
            .into_results();

        if results.len() < handles.len() {
            warn!(
                subscription_id = %subscription_id,
                items = handles.len(),
                results = results.len(),
                "CreateMonitoredItems returned fewer results than items"
            );
        }

        let mut created = 0usize;
        for (handle, result) in handles.iter_mut().zip(&results) {
            let handle = BorrowMut::<MonitoredItemHandle>::borrow_mut(handle);
            handle.apply_create_result(result);
            if result.status_code.is_good() {
                created += 1;
            } else {
                debug!(
                    subscription_id = %subscription_id,
                    client_handle = handle.client_handle(),
                    status = %result.status_code,
                    "Monitored item rejected"
                );
            }
        }

        info!(
            subscription_id = %subscription_id,
            created,
            rejected = results.len().min(handles.len()) - created,
            "Monitored items created"
        );
        Ok(())
    }

    // =========================================================================
    // ModifyMonitoredItems
    // =========================================================================

    /// Sends `parameters` for every handle in one request.
    ///
    /// Each item gets a copy of `parameters` carrying its own client handle.
    /// The handles are not changed; apply accepted results with
    /// [`MonitoredItemHandle::apply_modify_result`].
    ///
    /// For a single handle a non-Good status is returned as
    /// `OperationError::BadStatus`.
    pub async fn modify<H>(
        &self,
        subscription: &Subscription,
        handles: &[H],
        parameters: &MonitoringParameters,
        timestamps_to_return: TimestampsToReturn,
    ) -> OpcUaResult<Vec<MonitoredItemModifyResult>>
    where
        H: Borrow<MonitoredItemHandle> + Sync,
    {
        let transport = subscription.transport()?;
        self.modify_with_transport(
            subscription.subscription_id(),
            transport.as_ref(),
            handles,
            parameters,
            timestamps_to_return,
        )
        .await
    }

    /// [`modify`](Self::modify) against an explicit transport.
    pub async fn modify_with_transport<H>(
        &self,
        subscription_id: SubscriptionId,
        transport: &dyn SessionTransport,
        handles: &[H],
        parameters: &MonitoringParameters,
        timestamps_to_return: TimestampsToReturn,
    ) -> OpcUaResult<Vec<MonitoredItemModifyResult>>
    where
        H: Borrow<MonitoredItemHandle> + Sync,
    {
        if handles.is_empty() {
            debug!(subscription_id = %subscription_id, "No monitored items to modify");
            return Ok(Vec::new());
        }
        self.check_batch_size(handles.len())?;

        let items_to_modify = handles
            .iter()
            .map(|h| Borrow::<MonitoredItemHandle>::borrow(h).prepare_for_modify(subscription_id, parameters))
            .collect::<OpcUaResult<Vec<_>>>()?;

        let request = ModifyMonitoredItemsRequest {
            subscription_id,
            timestamps_to_return,
            items_to_modify,
        };

        debug!(
            subscription_id = %subscription_id,
            items = handles.len(),
            "Sending ModifyMonitoredItems"
        );
        let results = transport
            .modify_monitored_items(request)
            .await
            .map_err(|e| {
                e.log("ModifyMonitoredItems");
                e
            })?
            .into_results();

        if results.len() != handles.len() {
            return Err(ProtocolError::result_count_mismatch(
                BatchOperation::ModifyMonitoredItems,
                handles.len(),
                results.len(),
            )
            .into());
        }

        if let [only] = results.as_slice() {
            if !only.status_code.is_good() {
                return Err(OpcUaError::bad_status(
                    BatchOperation::ModifyMonitoredItems,
                    only.status_code,
                ));
            }
        }

        debug!(
            subscription_id = %subscription_id,
            accepted = results.iter().filter(|r| r.status_code.is_good()).count(),
            items = results.len(),
            "Monitored items modified"
        );
        Ok(results)
    }

    // =========================================================================
    // SetMonitoringMode
    // =========================================================================

    /// Switches `handles` to `mode` in one request.
    ///
    /// Once the call succeeds the local mode is updated per
    /// [`ModeUpdatePolicy`]; the raw per-item statuses are returned.
    pub async fn set_monitoring_mode<H>(
        &self,
        subscription: &Subscription,
        handles: &mut [H],
        mode: MonitoringMode,
    ) -> OpcUaResult<Vec<StatusCode>>
    where
        H: BorrowMut<MonitoredItemHandle> + Send,
    {
        let transport = subscription.transport()?;
        self.set_monitoring_mode_with_transport(
            subscription.subscription_id(),
            transport.as_ref(),
            handles,
            mode,
        )
        .await
    }

    /// [`set_monitoring_mode`](Self::set_monitoring_mode) against an explicit
    /// transport.
    pub async fn set_monitoring_mode_with_transport<H>(
        &self,
        subscription_id: SubscriptionId,
        transport: &dyn SessionTransport,
        handles: &mut [H],
        mode: MonitoringMode,
    ) -> OpcUaResult<Vec<StatusCode>>
    where
        H: BorrowMut<MonitoredItemHandle> + Send,
    {
        if handles.is_empty() {
            debug!(subscription_id = %subscription_id, "No monitored items to switch");
            return Ok(Vec::new());
        }
        self.check_batch_size(handles.len())?;

        let monitored_item_ids = handles
            .iter()
            .map(|h| Borrow::<MonitoredItemHandle>::borrow(h).prepare_for_mode_change(subscription_id))
            .collect::<OpcUaResult<Vec<_>>>()?;

        let request = SetMonitoringModeRequest {
            subscription_id,
            monitoring_mode: mode,
            monitored_item_ids,
        };

        debug!(
            subscription_id = %subscription_id,
            items = handles.len(),
            mode = %mode,
            "Sending SetMonitoringMode"
        );
        let results = transport
            .set_monitoring_mode(request)
            .await
            .map_err(|e| {
                e.log("SetMonitoringMode");
                e
            })?
            .into_results();

        match self.options.mode_update {
            ModeUpdatePolicy::Unconditional => {
                for handle in handles.iter_mut() {
                    BorrowMut::<MonitoredItemHandle>::borrow_mut(handle).apply_monitoring_mode(mode);
                }
            }
            ModeUpdatePolicy::GoodOnly => {
                for (handle, status) in handles.iter_mut().zip(&results) {
                    if status.is_good() {
                        BorrowMut::<MonitoredItemHandle>::borrow_mut(handle).apply_monitoring_mode(mode);
                    }
                }
            }
        }

        let failed = results.iter().filter(|s| !s.is_good()).count();
        if failed > 0 {
            warn!(
                subscription_id = %subscription_id,
                mode = %mode,
                failed,
                "SetMonitoringMode reported bad item statuses"
            );
        }
        Ok(results)
    }

    fn check_batch_size(&self, count: usize) -> OpcUaResult<()> {
        match self.options.max_items_per_batch {
            Some(max) if count > max => {
                Err(OpcUaError::validation(ValidationError::BatchTooLarge { count, max }))
            }
            _ => Ok(()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;
    use crate::client::item::MonitoredItemState;
    use crate::client::subscription::MonitoredItemId;
    use crate::client::transport::{
        CreateMonitoredItemsResponse, ModifyMonitoredItemsResponse, MonitoredItemCreateResult,
        SetMonitoringModeResponse,
    };
    use crate::error::{OperationError, SessionError};
    use crate::types::{DeadbandSettings, NodeId, ReadValueId};

    /// Transport answering from canned responses and recording requests.
    #[derive(Default)]
    struct ScriptedTransport {
        create: Mutex<Option<OpcUaResult<CreateMonitoredItemsResponse>>>,
        modify: Mutex<Option<OpcUaResult<ModifyMonitoredItemsResponse>>>,
        mode: Mutex<Option<OpcUaResult<SetMonitoringModeResponse>>>,
        create_requests: Mutex<Vec<CreateMonitoredItemsRequest>>,
        modify_requests: Mutex<Vec<ModifyMonitoredItemsRequest>>,
        mode_requests: Mutex<Vec<SetMonitoringModeRequest>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SessionTransport for ScriptedTransport {
        async fn create_monitored_items(
            &self,
            request: CreateMonitoredItemsRequest,
        ) -> OpcUaResult<CreateMonitoredItemsResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.create_requests.lock().push(request);
            self.create.lock().take().unwrap_or_else(|| Ok(Default::default()))
        }

        async fn modify_monitored_items(
            &self,
            request: ModifyMonitoredItemsRequest,
        ) -> OpcUaResult<ModifyMonitoredItemsResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.modify_requests.lock().push(request);
            self.modify.lock().take().unwrap_or_else(|| Ok(Default::default()))
        }

        async fn set_monitoring_mode(
            &self,
            request: SetMonitoringModeRequest,
        ) -> OpcUaResult<SetMonitoringModeResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.mode_requests.lock().push(request);
            self.mode.lock().take().unwrap_or_else(|| Ok(Default::default()))
        }
    }

    const SUB: SubscriptionId = SubscriptionId::new(7);

    fn handles(n: u32) -> Vec<MonitoredItemHandle> {
        (1..=n)
            .map(|i| {
                MonitoredItemHandle::new(SUB, i, ReadValueId::value(NodeId::numeric(2, 100 + i)))
            })
            .collect()
    }

    fn good_create(ids: &[u32]) -> CreateMonitoredItemsResponse {
        CreateMonitoredItemsResponse::new(
            ids.iter()
                .map(|id| MonitoredItemCreateResult::good(*id, Duration::from_millis(250), 10))
                .collect(),
        )
    }

    async fn created(transport: &ScriptedTransport, n: u32) -> Vec<MonitoredItemHandle> {
        let mut items = handles(n);
        let ids: Vec<u32> = (1..=n).map(|i| 1000 + i).collect();
        *transport.create.lock() = Some(Ok(good_create(&ids)));
        MonitoredItemToolbox::default()
            .create_with_transport(SUB, transport, TimestampsToReturn::Both, &mut items)
            .await
            .unwrap();
        items
    }

    #[tokio::test]
    async fn test_create_assigns_ids_in_order() {
        let transport = ScriptedTransport::default();
        let items = created(&transport, 3).await;

        let requests = transport.create_requests.lock();
        let request = &requests[0];
        let sent: Vec<u32> = request
            .items_to_create
            .iter()
            .map(|i| i.requested_parameters.client_handle)
            .collect();
        assert_eq!(sent, vec![1, 2, 3]);
        assert_eq!(request.subscription_id, SUB);

        for (i, h) in items.iter().enumerate() {
            assert_eq!(h.state(), MonitoredItemState::Created);
            assert_eq!(h.monitored_item_id(), Some(MonitoredItemId::new(1001 + i as u32)));
        }
    }

    #[tokio::test]
    async fn test_create_truncated_results_leave_tail_untouched() {
        let transport = ScriptedTransport::default();
        *transport.create.lock() = Some(Ok(good_create(&[11, 12])));

        let mut items = handles(4);
        MonitoredItemToolbox::default()
            .create_with_transport(SUB, &transport, TimestampsToReturn::Both, &mut items)
            .await
            .unwrap();

        assert!(items[0].monitored_item_id().is_some());
        assert!(items[1].monitored_item_id().is_some());
        assert_eq!(items[2].state(), MonitoredItemState::Unprepared);
        assert_eq!(items[3].monitored_item_id(), None);
    }

    #[tokio::test]
    async fn test_create_missing_results_is_ok() {
        let transport = ScriptedTransport::default();
        let mut items = handles(2);
        MonitoredItemToolbox::default()
            .create_with_transport(SUB, &transport, TimestampsToReturn::Both, &mut items)
            .await
            .unwrap();
        assert!(items.iter().all(|h| h.monitored_item_id().is_none()));
    }

    #[tokio::test]
    async fn test_create_validation_failure_sends_nothing() {
        let transport = ScriptedTransport::default();
        let mut items = handles(3);
        items[2] = items[2]
            .clone()
            .with_parameters(MonitoringParameters::default().with_filter(DeadbandSettings::percent(-1.0)));

        let err = MonitoredItemToolbox::default()
            .create_with_transport(SUB, &transport, TimestampsToReturn::Both, &mut items)
            .await
            .unwrap_err();

        assert!(matches!(err, OpcUaError::Validation(_)));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_transport_error_is_unchanged() {
        let transport = ScriptedTransport::default();
        *transport.create.lock() = Some(Err(OpcUaError::session_closed()));

        let mut items = handles(2);
        let err = MonitoredItemToolbox::default()
            .create_with_transport(SUB, &transport, TimestampsToReturn::Both, &mut items)
            .await
            .unwrap_err();

        assert!(matches!(err, OpcUaError::Session(SessionError::Closed)));
        assert!(items.iter().all(|h| h.state() == MonitoredItemState::Unprepared));
    }

    #[tokio::test]
    async fn test_batch_size_limit() {
        let transport = ScriptedTransport::default();
        let toolbox = MonitoredItemToolbox::new(ToolboxOptions {
            max_items_per_batch: Some(2),
            ..Default::default()
        });

        let mut items = handles(3);
        let err = toolbox
            .create_with_transport(SUB, &transport, TimestampsToReturn::Both, &mut items)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OpcUaError::Validation(ValidationError::BatchTooLarge { count: 3, max: 2 })
        ));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_modify_merges_client_handles() {
        let transport = ScriptedTransport::default();
        let items = created(&transport, 3).await;
        *transport.modify.lock() = Some(Ok(ModifyMonitoredItemsResponse::new(vec![
            MonitoredItemModifyResult::good(Duration::from_millis(100), 5),
            MonitoredItemModifyResult::rejected(StatusCode::BAD_MONITORED_ITEM_ID_INVALID),
            MonitoredItemModifyResult::good(Duration::from_millis(100), 5),
        ])));

        let shared = MonitoringParameters::with_sampling_interval(Duration::from_millis(100));
        let results = MonitoredItemToolbox::default()
            .modify_with_transport(SUB, &transport, &items, &shared, TimestampsToReturn::Source)
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[1].status_code, StatusCode::BAD_MONITORED_ITEM_ID_INVALID);

        let requests = transport.modify_requests.lock();
        let request = &requests[0];
        for (item, handle) in request.items_to_modify.iter().zip(&items) {
            assert_eq!(item.requested_parameters.client_handle, handle.client_handle());
            assert_eq!(Some(item.monitored_item_id), handle.monitored_item_id());
            assert_eq!(item.requested_parameters.sampling_interval, Duration::from_millis(100));
        }
        // Handles are not touched by modify.
        assert_eq!(items[0].monitoring_parameters().sampling_interval, Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_modify_count_mismatch() {
        let transport = ScriptedTransport::default();
        let items = created(&transport, 3).await;
        *transport.modify.lock() = Some(Ok(ModifyMonitoredItemsResponse::new(vec![
            MonitoredItemModifyResult::good(Duration::from_millis(100), 5),
        ])));

        let err = MonitoredItemToolbox::default()
            .modify_with_transport(
                SUB,
                &transport,
                &items,
                &MonitoringParameters::default(),
                TimestampsToReturn::Both,
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OpcUaError::Protocol(ProtocolError::ResultCountMismatch { expected: 3, actual: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_modify_single_bad_status_is_error() {
        let transport = ScriptedTransport::default();
        let items = created(&transport, 1).await;
        *transport.modify.lock() = Some(Ok(ModifyMonitoredItemsResponse::new(vec![
            MonitoredItemModifyResult::rejected(StatusCode::BAD_MONITORED_ITEM_ID_INVALID),
        ])));

        let err = MonitoredItemToolbox::default()
            .modify_with_transport(
                SUB,
                &transport,
                &items,
                &MonitoringParameters::default(),
                TimestampsToReturn::Both,
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OpcUaError::Operation(OperationError::BadStatus { status_code, .. })
                if status_code == StatusCode::BAD_MONITORED_ITEM_ID_INVALID
        ));
        assert!(err.to_string().contains("BadMonitoredItemIdInvalid"));
    }

    #[tokio::test]
    async fn test_modify_uncreated_item_is_rejected_locally() {
        let transport = ScriptedTransport::default();
        let items = handles(2);
        let err = MonitoredItemToolbox::default()
            .modify_with_transport(
                SUB,
                &transport,
                &items,
                &MonitoringParameters::default(),
                TimestampsToReturn::Both,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OpcUaError::Validation(ValidationError::NotCreated { client_handle: 1 })
        ));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_set_mode_applies_unconditionally() {
        let transport = ScriptedTransport::default();
        let mut items = created(&transport, 3).await;
        *transport.mode.lock() = Some(Ok(SetMonitoringModeResponse::new(vec![
            StatusCode::GOOD,
            StatusCode::BAD_MONITORED_ITEM_ID_INVALID,
            StatusCode::GOOD,
        ])));

        let results = MonitoredItemToolbox::default()
            .set_monitoring_mode_with_transport(SUB, &transport, &mut items, MonitoringMode::Sampling)
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert!(items.iter().all(|h| h.monitoring_mode() == MonitoringMode::Sampling));

        let requests = transport.mode_requests.lock();
        let request = &requests[0];
        let expected: Vec<MonitoredItemId> =
            items.iter().filter_map(|h| h.monitored_item_id()).collect();
        assert_eq!(request.monitored_item_ids, expected);
    }

    #[tokio::test]
    async fn test_set_mode_good_only_policy() {
        let transport = ScriptedTransport::default();
        let mut items = created(&transport, 3).await;
        *transport.mode.lock() = Some(Ok(SetMonitoringModeResponse::new(vec![
            StatusCode::GOOD,
            StatusCode::BAD_MONITORED_ITEM_ID_INVALID,
        ])));

        let toolbox = MonitoredItemToolbox::new(ToolboxOptions {
            mode_update: ModeUpdatePolicy::GoodOnly,
            ..Default::default()
        });
        toolbox
            .set_monitoring_mode_with_transport(SUB, &transport, &mut items, MonitoringMode::Disabled)
            .await
            .unwrap();

        assert_eq!(items[0].monitoring_mode(), MonitoringMode::Disabled);
        assert_eq!(items[1].monitoring_mode(), MonitoringMode::Reporting);
        assert_eq!(items[2].monitoring_mode(), MonitoringMode::Reporting);
    }

    #[tokio::test]
    async fn test_set_mode_missing_results_returns_empty() {
        let transport = ScriptedTransport::default();
        let mut items = created(&transport, 2).await;

        let results = MonitoredItemToolbox::default()
            .set_monitoring_mode_with_transport(SUB, &transport, &mut items, MonitoringMode::Disabled)
            .await
            .unwrap();

        assert!(results.is_empty());
        assert!(items.iter().all(|h| h.monitoring_mode() == MonitoringMode::Disabled));
    }

    #[tokio::test]
    async fn test_empty_batches_skip_transport() {
        let transport = ScriptedTransport::default();
        let toolbox = MonitoredItemToolbox::default();
        let mut none: Vec<MonitoredItemHandle> = Vec::new();

        toolbox
            .create_with_transport(SUB, &transport, TimestampsToReturn::Both, &mut none)
            .await
            .unwrap();
        assert!(toolbox
            .set_monitoring_mode_with_transport(SUB, &transport, &mut none, MonitoringMode::Disabled)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_subscription_front_door() {
        let transport: Arc<dyn SessionTransport> = Arc::new(ScriptedTransport::default());
        let subscription = Subscription::new(SUB, &transport);
        drop(transport);

        let mut items = handles(1);
        let err = MonitoredItemToolbox::default()
            .create(&subscription, TimestampsToReturn::Both, &mut items)
            .await
            .unwrap_err();
        assert!(matches!(err, OpcUaError::Session(SessionError::Closed)));
    }
}
