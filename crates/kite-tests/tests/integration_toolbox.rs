// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Toolbox Integration Tests
//!
//! Integration tests for monitored-item batches driven through a
//! [`Subscription`] and the mock session transport:
//!
//! - Request ordering for create, modify and set-monitoring-mode
//! - Fail-fast local validation
//! - Result correlation, truncation and count mismatches
//! - Monitoring mode update policies
//! - Subscription-level helpers
//!
//! ## Test Categories
//!
//! - `test_order_*`: Submitted order equals input order
//! - `test_validation_*`: Local checks abort before any request
//! - `test_create_*`: CreateMonitoredItems correlation
//! - `test_modify_*`: ModifyMonitoredItems results and errors
//! - `test_mode_*`: SetMonitoringMode state updates
//! - `test_subscription_*`: Batches on a subscription's own items

use std::time::Duration;

use kite_opcua::{
    AttributeId, DeadbandSettings, ModeUpdatePolicy, MonitoredItemHandle, MonitoredItemId,
    MonitoredItemState, MonitoredItemToolbox, MonitoringMode, MonitoringParameters, NodeId,
    OpcUaError, OperationError, ProtocolError, SessionError, StatusCode, SubscriptionError,
    TimeoutError, TimestampsToReturn, ToolboxOptions, ValidationError,
};
use kite_tests::prelude::*;

const SUB: u32 = 7;

// =============================================================================
// Test Helpers
// =============================================================================

fn toolbox() -> MonitoredItemToolbox {
    MonitoredItemToolbox::default()
}

fn client_handles(handles: &[MonitoredItemHandle]) -> Vec<u32> {
    handles.iter().map(|h| h.client_handle()).collect()
}

fn item_ids(handles: &[MonitoredItemHandle]) -> Vec<MonitoredItemId> {
    handles.iter().filter_map(|h| h.monitored_item_id()).collect()
}

// =============================================================================
// Ordering Tests
// =============================================================================

#[tokio::test]
async fn test_order_create_preserves_input_order() {
    init_test_logging();
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());

    let mut handles = vec![
        HandleBuilder::new(SUB, 30).node(NodeFixtures::pressure()).build(),
        HandleBuilder::new(SUB, 10).node(NodeFixtures::temperature()).build(),
        HandleBuilder::new(SUB, 20).node(NodeFixtures::server_time()).build(),
    ];

    toolbox()
        .create(&subscription, TimestampsToReturn::Source, &mut handles)
        .await
        .unwrap();

    let requests = transport.create_requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.subscription_id.value(), SUB);
    assert_eq!(request.timestamps_to_return, TimestampsToReturn::Source);

    let sent: Vec<(u32, NodeId)> = request
        .items_to_create
        .iter()
        .map(|i| (i.requested_parameters.client_handle, i.item_to_monitor.node_id.clone()))
        .collect();
    assert_eq!(
        sent,
        vec![
            (30, NodeFixtures::pressure()),
            (10, NodeFixtures::temperature()),
            (20, NodeFixtures::server_time()),
        ]
    );

    // Default responses hand out ids in request order
    assert_eq!(
        item_ids(&handles),
        vec![MonitoredItemId::new(1000), MonitoredItemId::new(1001), MonitoredItemId::new(1002)]
    );
}

#[tokio::test]
async fn test_order_modify_and_mode_preserve_input_order() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    let mut handles = created_handles(&*transport, SUB, 4).await;
    handles.reverse();
    let expected_ids: Vec<MonitoredItemId> = item_ids(&handles);

    let parameters = MonitoringParameters::with_sampling_interval(Duration::from_secs(1));
    toolbox()
        .modify(&subscription, &handles, &parameters, TimestampsToReturn::Both)
        .await
        .unwrap();
    toolbox()
        .set_monitoring_mode(&subscription, &mut handles, MonitoringMode::Sampling)
        .await
        .unwrap();

    let modify_requests = transport.modify_requests();
    let modify = &modify_requests[0];
    let modified_ids: Vec<MonitoredItemId> =
        modify.items_to_modify.iter().map(|i| i.monitored_item_id).collect();
    let modified_handles: Vec<u32> = modify
        .items_to_modify
        .iter()
        .map(|i| i.requested_parameters.client_handle)
        .collect();
    assert_eq!(modified_ids, expected_ids);
    assert_eq!(modified_handles, client_handles(&handles));
    assert!(modify
        .items_to_modify
        .iter()
        .all(|i| i.requested_parameters.sampling_interval == Duration::from_secs(1)));

    let mode_requests = transport.mode_requests();
    let mode = &mode_requests[0];
    assert_eq!(mode.monitoring_mode, MonitoringMode::Sampling);
    assert_eq!(mode.monitored_item_ids, expected_ids);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[tokio::test]
async fn test_validation_foreign_handle_aborts_create() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());

    let mut handles = vec![
        HandleBuilder::new(SUB, 1).build(),
        HandleBuilder::new(SUB + 1, 2).build(),
        HandleBuilder::new(SUB, 3).build(),
    ];

    let err = toolbox()
        .create(&subscription, TimestampsToReturn::Both, &mut handles)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OpcUaError::Validation(ValidationError::ForeignSubscription {
            client_handle: 2,
            owner: 8,
            subscription: 7,
        })
    ));
    assert_eq!(transport.call_count(), 0);
    assert!(handles.iter().all(|h| h.state() == MonitoredItemState::Unprepared));
}

#[tokio::test]
async fn test_validation_filter_rules_abort_create() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());

    let mut on_display_name = vec![HandleBuilder::new(SUB, 1)
        .attribute(AttributeId::DisplayName)
        .deadband(DeadbandSettings::absolute(1.0))
        .build()];
    let err = toolbox()
        .create(&subscription, TimestampsToReturn::Both, &mut on_display_name)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OpcUaError::Validation(ValidationError::FilterNotAllowed {
            attribute: AttributeId::DisplayName,
            ..
        })
    ));

    let mut out_of_range = vec![
        HandleBuilder::new(SUB, 1).build(),
        HandleBuilder::new(SUB, 2)
            .deadband(DeadbandSettings::percent(150.0))
            .build(),
    ];
    let err = toolbox()
        .create(&subscription, TimestampsToReturn::Both, &mut out_of_range)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OpcUaError::Validation(ValidationError::InvalidDeadband { client_handle: 2, .. })
    ));

    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_validation_batch_limit() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    let toolbox = MonitoredItemToolbox::new(ToolboxOptions {
        max_items_per_batch: Some(2),
        ..Default::default()
    });

    let mut handles = handle_batch(SUB, 3);
    let err = toolbox
        .create(&subscription, TimestampsToReturn::Both, &mut handles)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OpcUaError::Validation(ValidationError::BatchTooLarge { count: 3, max: 2 })
    ));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_validation_modify_and_mode_require_created_items() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    let mut handles = handle_batch(SUB, 2);

    let err = toolbox()
        .modify(&subscription, &handles, &MonitoringParameters::default(), TimestampsToReturn::Both)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OpcUaError::Validation(ValidationError::NotCreated { client_handle: 1 })
    ));

    let err = toolbox()
        .set_monitoring_mode(&subscription, &mut handles, MonitoringMode::Disabled)
        .await
        .unwrap_err();
    assert!(matches!(err, OpcUaError::Validation(ValidationError::NotCreated { .. })));

    assert_eq!(transport.call_count(), 0);
    assert!(handles.iter().all(|h| h.monitoring_mode() == MonitoringMode::Reporting));
}

#[tokio::test]
async fn test_validation_empty_batches_send_nothing() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    let mut handles: Vec<MonitoredItemHandle> = Vec::new();

    toolbox()
        .create(&subscription, TimestampsToReturn::Both, &mut handles)
        .await
        .unwrap();
    let modified = toolbox()
        .modify(&subscription, &handles, &MonitoringParameters::default(), TimestampsToReturn::Both)
        .await
        .unwrap();
    let statuses = toolbox()
        .set_monitoring_mode(&subscription, &mut handles, MonitoringMode::Sampling)
        .await
        .unwrap();

    assert!(modified.is_empty());
    assert!(statuses.is_empty());
    assert_eq!(transport.call_count(), 0);
}

// =============================================================================
// Create Tests
// =============================================================================

#[tokio::test]
async fn test_create_all_good_assigns_ids_and_revisions() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    transport.push_create_response(ResponseFixtures::create(&[StatusCode::GOOD; 3], 40));

    let mut handles = handle_batch(SUB, 3);
    toolbox()
        .create(&subscription, TimestampsToReturn::Both, &mut handles)
        .await
        .unwrap();

    for (handle, id) in handles.iter().zip(40..) {
        assert_eq!(handle.state(), MonitoredItemState::Created);
        assert_eq!(handle.monitored_item_id(), Some(MonitoredItemId::new(id)));
        assert_eq!(handle.last_status(), Some(StatusCode::GOOD));
        assert_eq!(handle.monitoring_parameters().sampling_interval, Duration::from_millis(500));
        assert_eq!(handle.monitoring_parameters().queue_size, 5);
        assert!(handle.created_at().is_some());
    }
}

#[tokio::test]
async fn test_create_truncated_response_leaves_trailing_handles() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    transport.push_create_response(ResponseFixtures::create(&[StatusCode::GOOD; 2], 50));

    let mut handles = handle_batch(SUB, 4);
    let before = handles.clone();
    toolbox()
        .create(&subscription, TimestampsToReturn::Both, &mut handles)
        .await
        .unwrap();

    assert_eq!(handles[0].monitored_item_id(), Some(MonitoredItemId::new(50)));
    assert_eq!(handles[1].monitored_item_id(), Some(MonitoredItemId::new(51)));
    assert_eq!(handles[2], before[2]);
    assert_eq!(handles[3], before[3]);
}

#[tokio::test]
async fn test_create_missing_result_list_changes_nothing() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    transport.push_create_response(Default::default());

    let mut handles = handle_batch(SUB, 2);
    let before = handles.clone();
    toolbox()
        .create(&subscription, TimestampsToReturn::Both, &mut handles)
        .await
        .unwrap();

    assert_eq!(handles, before);
}

#[tokio::test]
async fn test_create_rejected_items_keep_no_id() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    transport.push_create_response(ResponseFixtures::create(
        &[StatusCode::GOOD, StatusCode::BAD_NODE_ID_UNKNOWN, StatusCode::GOOD],
        60,
    ));

    let mut handles = handle_batch(SUB, 3);
    toolbox()
        .create(&subscription, TimestampsToReturn::Both, &mut handles)
        .await
        .unwrap();

    assert_eq!(handles[0].monitored_item_id(), Some(MonitoredItemId::new(60)));
    assert_eq!(handles[1].monitored_item_id(), None);
    assert_eq!(
        handles[1].state(),
        MonitoredItemState::Rejected(StatusCode::BAD_NODE_ID_UNKNOWN)
    );
    assert_eq!(handles[2].monitored_item_id(), Some(MonitoredItemId::new(62)));
}

#[tokio::test]
async fn test_create_transport_error_is_returned_unchanged() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    transport.fail_next_create(OpcUaError::session_closed());

    let mut handles = handle_batch(SUB, 2);
    let before = handles.clone();
    let err = toolbox()
        .create(&subscription, TimestampsToReturn::Both, &mut handles)
        .await
        .unwrap_err();

    assert!(matches!(err, OpcUaError::Session(SessionError::Closed)));
    assert_eq!(handles, before);
    assert_eq!(transport.create_requests().len(), 1);
}

#[tokio::test]
async fn test_create_concurrent_batches_on_one_subscription() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    let toolbox = toolbox();

    let mut first = handle_batch(SUB, 3);
    let mut second: Vec<MonitoredItemHandle> =
        (10..13).map(|h| HandleBuilder::new(SUB, h).build()).collect();

    let (a, b) = tokio::join!(
        toolbox.create(&subscription, TimestampsToReturn::Both, &mut first),
        toolbox.create(&subscription, TimestampsToReturn::Both, &mut second),
    );
    a.unwrap();
    b.unwrap();

    assert_eq!(transport.create_requests().len(), 2);
    let mut ids: Vec<u32> = item_ids(&first).iter().map(|id| id.value()).collect();
    ids.extend(item_ids(&second).iter().map(|id| id.value()));
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 6);
}

// =============================================================================
// Modify Tests
// =============================================================================

#[tokio::test]
async fn test_modify_returns_results_in_order() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    let handles = created_handles(&*transport, SUB, 3).await;
    transport.push_modify_response(ResponseFixtures::modify(&[
        StatusCode::GOOD,
        StatusCode::BAD_MONITORED_ITEM_FILTER_UNSUPPORTED,
        StatusCode::GOOD,
    ]));

    let results = toolbox()
        .modify(
            &subscription,
            &handles,
            &MonitoringParameters::default().with_queue_size(20),
            TimestampsToReturn::Server,
        )
        .await
        .unwrap();

    let statuses: Vec<StatusCode> = results.iter().map(|r| r.status_code).collect();
    assert_eq!(
        statuses,
        vec![
            StatusCode::GOOD,
            StatusCode::BAD_MONITORED_ITEM_FILTER_UNSUPPORTED,
            StatusCode::GOOD,
        ]
    );
    assert_eq!(
        transport.modify_requests()[0].timestamps_to_return,
        TimestampsToReturn::Server
    );
}

#[tokio::test]
async fn test_modify_result_count_mismatch() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    let handles = created_handles(&*transport, SUB, 3).await;
    transport.push_modify_response(ResponseFixtures::modify(&[StatusCode::GOOD; 2]));

    let err = toolbox()
        .modify(&subscription, &handles, &MonitoringParameters::default(), TimestampsToReturn::Both)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OpcUaError::Protocol(ProtocolError::ResultCountMismatch {
            expected: 3,
            actual: 2,
            ..
        })
    ));
}

#[tokio::test]
async fn test_modify_single_bad_status_is_an_error() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    let handles = created_handles(&*transport, SUB, 1).await;
    transport.push_modify_response(ResponseFixtures::modify(&[
        StatusCode::BAD_MONITORED_ITEM_ID_INVALID,
    ]));

    let err = toolbox()
        .modify(&subscription, &handles, &MonitoringParameters::default(), TimestampsToReturn::Both)
        .await
        .unwrap_err();

    assert!(matches!(err, OpcUaError::Operation(OperationError::BadStatus { .. })));
    assert_eq!(err.status_code(), Some(StatusCode::BAD_MONITORED_ITEM_ID_INVALID));
    assert!(err.to_string().contains("BadMonitoredItemIdInvalid"));
}

#[tokio::test]
async fn test_modify_results_applied_by_caller() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    let mut handles = created_handles(&*transport, SUB, 2).await;
    transport.push_modify_response(ResponseFixtures::modify(&[
        StatusCode::GOOD,
        StatusCode::BAD_TOO_MANY_MONITORED_ITEMS,
    ]));

    let parameters = MonitoringParameters::default().with_filter(DeadbandSettings::absolute(0.5));
    let results = toolbox()
        .modify(&subscription, &handles, &parameters, TimestampsToReturn::Both)
        .await
        .unwrap();
    let untouched = handles[1].monitoring_parameters().clone();

    let applied: Vec<bool> = handles
        .iter_mut()
        .zip(&results)
        .map(|(h, r)| h.apply_modify_result(&parameters, r))
        .collect();

    assert_eq!(applied, vec![true, false]);
    assert_eq!(handles[0].monitoring_parameters().filter, Some(DeadbandSettings::absolute(0.5)));
    assert_eq!(handles[0].monitoring_parameters().sampling_interval, Duration::from_millis(1000));
    assert_eq!(handles[0].monitoring_parameters().client_handle, handles[0].client_handle());
    assert_eq!(handles[1].monitoring_parameters(), &untouched);
}

#[tokio::test]
async fn test_modify_transport_error_is_returned_unchanged() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    let handles = created_handles(&*transport, SUB, 2).await;
    let before = handles.clone();
    transport.fail_next_modify(OpcUaError::timeout(TimeoutError::new(
        "ModifyMonitoredItems",
        Duration::from_secs(5),
    )));

    let parameters = MonitoringParameters::with_sampling_interval(Duration::from_secs(2));
    let err = toolbox()
        .modify(&subscription, &handles, &parameters, TimestampsToReturn::Both)
        .await
        .unwrap_err();

    match err {
        OpcUaError::Timeout(timeout) => {
            assert_eq!(timeout.operation, "ModifyMonitoredItems");
            assert_eq!(timeout.duration, Duration::from_secs(5));
        }
        other => panic!("expected the transport timeout, got {:?}", other),
    }
    assert_eq!(handles, before);
    assert_eq!(transport.modify_requests().len(), 1);
}

// =============================================================================
// Mode Tests
// =============================================================================

#[tokio::test]
async fn test_mode_unconditional_update_ignores_item_status() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    let mut handles = created_handles(&*transport, SUB, 3).await;
    transport.push_mode_response(ResponseFixtures::mode(&[
        StatusCode::GOOD,
        StatusCode::BAD_MONITORED_ITEM_ID_INVALID,
        StatusCode::GOOD,
    ]));

    let statuses = toolbox()
        .set_monitoring_mode(&subscription, &mut handles, MonitoringMode::Disabled)
        .await
        .unwrap();

    assert_eq!(statuses[1], StatusCode::BAD_MONITORED_ITEM_ID_INVALID);
    assert!(handles.iter().all(|h| h.monitoring_mode() == MonitoringMode::Disabled));
}

#[tokio::test]
async fn test_mode_good_only_policy() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    let mut handles = created_handles(&*transport, SUB, 3).await;
    transport.push_mode_response(ResponseFixtures::mode(&[
        StatusCode::GOOD,
        StatusCode::BAD_MONITORED_ITEM_ID_INVALID,
    ]));

    let toolbox = MonitoredItemToolbox::new(ToolboxOptions {
        mode_update: ModeUpdatePolicy::GoodOnly,
        ..Default::default()
    });
    toolbox
        .set_monitoring_mode(&subscription, &mut handles, MonitoringMode::Sampling)
        .await
        .unwrap();

    let modes: Vec<MonitoringMode> = handles.iter().map(|h| h.monitoring_mode()).collect();
    assert_eq!(
        modes,
        vec![MonitoringMode::Sampling, MonitoringMode::Reporting, MonitoringMode::Reporting]
    );
}

#[tokio::test]
async fn test_mode_transport_error_keeps_local_mode() {
    let transport = MockSessionTransport::new();
    let subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());
    let mut handles = created_handles(&*transport, SUB, 2).await;
    transport.fail_next_mode(OpcUaError::not_connected());

    let err = toolbox()
        .set_monitoring_mode(&subscription, &mut handles, MonitoringMode::Disabled)
        .await
        .unwrap_err();

    assert_eq!(err.category(), "connection");
    assert!(handles.iter().all(|h| h.monitoring_mode() == MonitoringMode::Reporting));
}

// =============================================================================
// Subscription Tests
// =============================================================================

#[tokio::test]
async fn test_subscription_monitor_items_only_sends_new_items() {
    let transport = MockSessionTransport::new();
    let mut subscription = SubscriptionBuilder::new(SUB)
        .item(NodeFixtures::temperature())
        .item(NodeFixtures::pressure())
        .build(&transport.shared());
    let toolbox = MonitoredItemToolbox::new(ToolboxOptions {
        default_timestamps: TimestampsToReturn::Neither,
        ..Default::default()
    });

    subscription.monitor_items(&toolbox).await.unwrap();
    let handle = subscription
        .new_item(kite_opcua::ReadValueId::value(NodeFixtures::server_time()))
        .unwrap();
    let new_client_handle = handle.client_handle();
    subscription.adopt(handle).unwrap();
    subscription.monitor_items(&toolbox).await.unwrap();

    let requests = transport.create_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].items_to_create.len(), 2);
    assert_eq!(requests[0].timestamps_to_return, TimestampsToReturn::Neither);
    assert_eq!(requests[1].items_to_create.len(), 1);
    assert_eq!(
        requests[1].items_to_create[0].requested_parameters.client_handle,
        new_client_handle
    );
    assert!(subscription.items().iter().all(|h| h.state().is_created()));
}

#[tokio::test]
async fn test_subscription_modify_and_mode_on_own_items() {
    let transport = MockSessionTransport::new();
    let mut subscription = SubscriptionBuilder::new(SUB).items(3).build(&transport.shared());
    let toolbox = toolbox();
    subscription.monitor_items(&toolbox).await.unwrap();

    let parameters = MonitoringParameters::with_sampling_interval(Duration::from_secs(2));
    let results = subscription.modify_items(&toolbox, &parameters).await.unwrap();
    assert_eq!(results.len(), 3);
    assert!(subscription
        .items()
        .iter()
        .all(|h| h.monitoring_parameters().sampling_interval == Duration::from_secs(2)));

    subscription
        .set_items_monitoring_mode(&toolbox, MonitoringMode::Sampling)
        .await
        .unwrap();
    assert!(subscription
        .items()
        .iter()
        .all(|h| h.monitoring_mode() == MonitoringMode::Sampling));
}

#[tokio::test]
async fn test_subscription_rejects_duplicate_client_handle() {
    let transport = MockSessionTransport::new();
    let mut subscription = SubscriptionBuilder::new(SUB).build(&transport.shared());

    subscription.adopt(HandleBuilder::new(SUB, 5).build()).unwrap();
    let err = subscription
        .adopt(HandleBuilder::new(SUB, 5).build())
        .unwrap_err();

    assert!(matches!(
        err,
        OpcUaError::Subscription(SubscriptionError::DuplicateClientHandle { client_handle: 5, .. })
    ));
    assert!(subscription.allocate_client_handle().unwrap() > 5);
}

#[tokio::test]
async fn test_subscription_closed_session() {
    let transport = MockSessionTransport::new();
    let mut subscription = SubscriptionBuilder::new(SUB).items(1).build(&transport.shared());
    drop(transport);

    let err = subscription.monitor_items(&toolbox()).await.unwrap_err();
    assert!(matches!(err, OpcUaError::Session(SessionError::Closed)));
}
