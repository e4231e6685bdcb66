// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Mock Implementations
//!
//! Mock transports for exercising the toolbox and the discovery pipeline
//! without a server.
//!
//! ## Design Principles
//!
//! - Every request is recorded for verification
//! - Responses are scripted per call, with a Good default
//! - Errors are injected one call at a time

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use kite_opcua::error::{OpcUaError, OpcUaResult, TimeoutError};
use kite_opcua::client::{
    CreateMonitoredItemsRequest, CreateMonitoredItemsResponse, ModifyMonitoredItemsRequest,
    ModifyMonitoredItemsResponse, MonitoredItemCreateResult, MonitoredItemModifyResult,
    SetMonitoringModeRequest, SetMonitoringModeResponse,
};
use kite_opcua::{
    ApplicationDescription, DiscoveryClient, DiscoveryClientFactory, DiscoveryOptions,
    DiscoveryStage, EndpointDescription, GetEndpointsOptions, ServerOnNetwork, SessionTransport,
    StatusCode,
};

// =============================================================================
// Mock Session Transport
// =============================================================================

/// A session transport that records requests and replays scripted responses.
///
/// When no response is scripted for a call, every item is acknowledged with
/// Good: created items get fresh ids and the requested sampling interval and
/// queue size come back unrevised.
#[derive(Debug)]
pub struct MockSessionTransport {
    /// Recorded CreateMonitoredItems requests.
    create_requests: Mutex<Vec<CreateMonitoredItemsRequest>>,

    /// Recorded ModifyMonitoredItems requests.
    modify_requests: Mutex<Vec<ModifyMonitoredItemsRequest>>,

    /// Recorded SetMonitoringMode requests.
    mode_requests: Mutex<Vec<SetMonitoringModeRequest>>,

    /// Scripted CreateMonitoredItems outcomes.
    create_script: Mutex<VecDeque<OpcUaResult<CreateMonitoredItemsResponse>>>,

    /// Scripted ModifyMonitoredItems outcomes.
    modify_script: Mutex<VecDeque<OpcUaResult<ModifyMonitoredItemsResponse>>>,

    /// Scripted SetMonitoringMode outcomes.
    mode_script: Mutex<VecDeque<OpcUaResult<SetMonitoringModeResponse>>>,

    /// Next server id handed out by the default create response.
    next_item_id: AtomicU32,
}

impl MockSessionTransport {
    /// Creates a new mock transport.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            create_requests: Mutex::new(Vec::new()),
            modify_requests: Mutex::new(Vec::new()),
            mode_requests: Mutex::new(Vec::new()),
            create_script: Mutex::new(VecDeque::new()),
            modify_script: Mutex::new(VecDeque::new()),
            mode_script: Mutex::new(VecDeque::new()),
            next_item_id: AtomicU32::new(1000),
        })
    }

    /// Returns this transport as the trait object a subscription holds.
    pub fn shared(self: &Arc<Self>) -> Arc<dyn SessionTransport> {
        Arc::clone(self) as Arc<dyn SessionTransport>
    }

    // =========================================================================
    // Scripting
    // =========================================================================

    /// Queues the response for the next CreateMonitoredItems call.
    pub fn push_create_response(&self, response: CreateMonitoredItemsResponse) {
        self.create_script.lock().push_back(Ok(response));
    }

    /// Makes the next CreateMonitoredItems call fail.
    pub fn fail_next_create(&self, error: OpcUaError) {
        self.create_script.lock().push_back(Err(error));
    }

    /// Queues the response for the next ModifyMonitoredItems call.
    pub fn push_modify_response(&self, response: ModifyMonitoredItemsResponse) {
        self.modify_script.lock().push_back(Ok(response));
    }

    /// Makes the next ModifyMonitoredItems call fail.
    pub fn fail_next_modify(&self, error: OpcUaError) {
        self.modify_script.lock().push_back(Err(error));
    }

    /// Queues the response for the next SetMonitoringMode call.
    pub fn push_mode_response(&self, response: SetMonitoringModeResponse) {
        self.mode_script.lock().push_back(Ok(response));
    }

    /// Makes the next SetMonitoringMode call fail.
    pub fn fail_next_mode(&self, error: OpcUaError) {
        self.mode_script.lock().push_back(Err(error));
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Recorded CreateMonitoredItems requests.
    pub fn create_requests(&self) -> Vec<CreateMonitoredItemsRequest> {
        self.create_requests.lock().clone()
    }

    /// Recorded ModifyMonitoredItems requests.
    pub fn modify_requests(&self) -> Vec<ModifyMonitoredItemsRequest> {
        self.modify_requests.lock().clone()
    }

    /// Recorded SetMonitoringMode requests.
    pub fn mode_requests(&self) -> Vec<SetMonitoringModeRequest> {
        self.mode_requests.lock().clone()
    }

    /// Total number of service calls of any kind.
    pub fn call_count(&self) -> usize {
        self.create_requests.lock().len()
            + self.modify_requests.lock().len()
            + self.mode_requests.lock().len()
    }

    // =========================================================================
    // Default Responses
    // =========================================================================

    fn default_create(&self, request: &CreateMonitoredItemsRequest) -> CreateMonitoredItemsResponse {
        let results = request
            .items_to_create
            .iter()
            .map(|item| {
                let id = self.next_item_id.fetch_add(1, Ordering::Relaxed);
                MonitoredItemCreateResult::good(
                    id,
                    item.requested_parameters.sampling_interval,
                    item.requested_parameters.queue_size,
                )
            })
            .collect();
        CreateMonitoredItemsResponse::new(results)
    }

    fn default_modify(request: &ModifyMonitoredItemsRequest) -> ModifyMonitoredItemsResponse {
        let results = request
            .items_to_modify
            .iter()
            .map(|item| {
                MonitoredItemModifyResult::good(
                    item.requested_parameters.sampling_interval,
                    item.requested_parameters.queue_size,
                )
            })
            .collect();
        ModifyMonitoredItemsResponse::new(results)
    }

    fn default_mode(request: &SetMonitoringModeRequest) -> SetMonitoringModeResponse {
        SetMonitoringModeResponse::new(vec![StatusCode::GOOD; request.monitored_item_ids.len()])
    }
}

#[async_trait]
impl SessionTransport for MockSessionTransport {
    async fn create_monitored_items(
        &self,
        request: CreateMonitoredItemsRequest,
    ) -> OpcUaResult<CreateMonitoredItemsResponse> {
        let scripted = self.create_script.lock().pop_front();
        let response = match scripted {
            Some(outcome) => outcome,
            None => Ok(self.default_create(&request)),
        };
        self.create_requests.lock().push(request);
        response
    }

    async fn modify_monitored_items(
        &self,
        request: ModifyMonitoredItemsRequest,
    ) -> OpcUaResult<ModifyMonitoredItemsResponse> {
        let scripted = self.modify_script.lock().pop_front();
        let response = scripted.unwrap_or_else(|| Ok(Self::default_modify(&request)));
        self.modify_requests.lock().push(request);
        response
    }

    async fn set_monitoring_mode(
        &self,
        request: SetMonitoringModeRequest,
    ) -> OpcUaResult<SetMonitoringModeResponse> {
        let scripted = self.mode_script.lock().pop_front();
        let response = scripted.unwrap_or_else(|| Ok(Self::default_mode(&request)));
        self.mode_requests.lock().push(request);
        response
    }
}

// =============================================================================
// Mock Discovery Server
// =============================================================================

/// One call observed by a mock discovery client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryCall {
    /// `connect` to the given URL.
    Connect(String),
    /// `find_servers`.
    FindServers,
    /// `get_endpoints` with the given options.
    GetEndpoints(GetEndpointsOptions),
    /// `find_servers_on_network`.
    FindServersOnNetwork,
    /// `disconnect`.
    Disconnect,
}

/// State shared by every [`MockDiscoveryClient`] a factory hands out.
///
/// Holds the canned answers, the stages that should fail and a log of
/// every call in order.
#[derive(Debug, Default)]
pub struct MockDiscoveryServer {
    servers: Mutex<Vec<ApplicationDescription>>,
    endpoints: Mutex<Vec<EndpointDescription>>,
    network_servers: Mutex<Vec<ServerOnNetwork>>,
    failing_stages: Mutex<HashSet<DiscoveryStage>>,
    fail_disconnect: AtomicBool,
    hang_on_connect: AtomicBool,
    calls: Mutex<Vec<DiscoveryCall>>,
    client_options: Mutex<Vec<DiscoveryOptions>>,
    clients_created: AtomicUsize,
}

impl MockDiscoveryServer {
    /// Creates a server with no canned answers.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Sets the FindServers answer.
    pub fn with_servers(self: Arc<Self>, servers: Vec<ApplicationDescription>) -> Arc<Self> {
        *self.servers.lock() = servers;
        self
    }

    /// Sets the GetEndpoints answer.
    pub fn with_endpoints(self: Arc<Self>, endpoints: Vec<EndpointDescription>) -> Arc<Self> {
        *self.endpoints.lock() = endpoints;
        self
    }

    /// Sets the FindServersOnNetwork answer.
    pub fn with_network_servers(self: Arc<Self>, servers: Vec<ServerOnNetwork>) -> Arc<Self> {
        *self.network_servers.lock() = servers;
        self
    }

    /// Makes `stage` fail on every client.
    pub fn fail_stage(&self, stage: DiscoveryStage) {
        self.failing_stages.lock().insert(stage);
    }

    /// Makes `disconnect` return an error.
    pub fn fail_disconnect(&self) {
        self.fail_disconnect.store(true, Ordering::SeqCst);
    }

    /// Makes `connect` wait forever.
    pub fn hang_on_connect(&self) {
        self.hang_on_connect.store(true, Ordering::SeqCst);
    }

    /// Returns a factory producing clients bound to this server.
    pub fn factory(self: &Arc<Self>) -> impl DiscoveryClientFactory<Client = MockDiscoveryClient> {
        let server = Arc::clone(self);
        move |options: &DiscoveryOptions| MockDiscoveryClient::new(Arc::clone(&server), options.clone())
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Every call in the order it was made.
    pub fn calls(&self) -> Vec<DiscoveryCall> {
        self.calls.lock().clone()
    }

    /// Number of calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&DiscoveryCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| predicate(c)).count()
    }

    /// Number of `connect` calls.
    pub fn connect_count(&self) -> usize {
        self.count(|c| matches!(c, DiscoveryCall::Connect(_)))
    }

    /// Number of `disconnect` calls.
    pub fn disconnect_count(&self) -> usize {
        self.count(|c| matches!(c, DiscoveryCall::Disconnect))
    }

    /// Number of clients the factory produced.
    pub fn clients_created(&self) -> usize {
        self.clients_created.load(Ordering::SeqCst)
    }

    /// Options handed to each client, in creation order.
    pub fn client_options(&self) -> Vec<DiscoveryOptions> {
        self.client_options.lock().clone()
    }

    fn record(&self, call: DiscoveryCall) {
        self.calls.lock().push(call);
    }

    fn is_failing(&self, stage: DiscoveryStage) -> bool {
        self.failing_stages.lock().contains(&stage)
    }
}

// =============================================================================
// Mock Discovery Client
// =============================================================================

/// An ephemeral discovery client backed by a [`MockDiscoveryServer`].
#[derive(Debug)]
pub struct MockDiscoveryClient {
    server: Arc<MockDiscoveryServer>,
    options: DiscoveryOptions,
    endpoint_url: Option<String>,
}

impl MockDiscoveryClient {
    /// Creates a client bound to `server`.
    pub fn new(server: Arc<MockDiscoveryServer>, options: DiscoveryOptions) -> Self {
        server.clients_created.fetch_add(1, Ordering::SeqCst);
        server.client_options.lock().push(options.clone());
        Self {
            server,
            options,
            endpoint_url: None,
        }
    }

    fn stage_result(&self, stage: DiscoveryStage) -> OpcUaResult<()> {
        if self.server.is_failing(stage) {
            return Err(OpcUaError::timeout(TimeoutError::new(
                stage.to_string(),
                self.options.request_timeout,
            )));
        }
        if self.endpoint_url.is_none() {
            return Err(OpcUaError::not_connected());
        }
        Ok(())
    }
}

#[async_trait]
impl DiscoveryClient for MockDiscoveryClient {
    async fn connect(&mut self, endpoint_url: &str) -> OpcUaResult<()> {
        self.server.record(DiscoveryCall::Connect(endpoint_url.to_string()));
        if self.server.hang_on_connect.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.server.is_failing(DiscoveryStage::Connect) {
            return Err(OpcUaError::connection_refused(endpoint_url));
        }
        self.endpoint_url = Some(endpoint_url.to_string());
        Ok(())
    }

    async fn disconnect(&mut self) -> OpcUaResult<()> {
        self.server.record(DiscoveryCall::Disconnect);
        self.endpoint_url = None;
        if self.server.fail_disconnect.load(Ordering::SeqCst) {
            return Err(OpcUaError::not_connected());
        }
        Ok(())
    }

    async fn find_servers(&self) -> OpcUaResult<Vec<ApplicationDescription>> {
        self.server.record(DiscoveryCall::FindServers);
        self.stage_result(DiscoveryStage::FindServers)?;
        Ok(self.server.servers.lock().clone())
    }

    async fn find_servers_on_network(&self) -> OpcUaResult<Vec<ServerOnNetwork>> {
        self.server.record(DiscoveryCall::FindServersOnNetwork);
        self.stage_result(DiscoveryStage::FindServersOnNetwork)?;
        Ok(self.server.network_servers.lock().clone())
    }

    async fn get_endpoints(
        &self,
        options: &GetEndpointsOptions,
    ) -> OpcUaResult<Vec<EndpointDescription>> {
        self.server.record(DiscoveryCall::GetEndpoints(options.clone()));
        self.stage_result(DiscoveryStage::GetEndpoints)?;
        Ok(self.server.endpoints.lock().clone())
    }
}

// =============================================================================
// Tests
// =============================================================================
