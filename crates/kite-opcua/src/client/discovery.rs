// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Short-lived discovery sessions.
//!
//! Each call builds a fresh [`DiscoveryClient`], runs its stages strictly in
//! order and releases the client exactly once:
//!
//! ```text
//! find_servers:             connect ─▶ find servers ─▶ get endpoints ─┐
//! find_servers_on_network:  connect ─▶ find servers on network ───────┤
//!                                                                     ▼
//!                                                                disconnect
//! ```
//!
//! A failing stage skips the stages after it; disconnect still runs. If the
//! returned future is dropped mid-flight, the client is disconnected on the
//! current tokio runtime.

use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use super::transport::{
    ApplicationDescription, DiscoveryClient, EndpointDescription, GetEndpointsOptions,
    ServerOnNetwork,
};
use crate::error::{ConnectionError, DiscoveryError, OpcUaError, OpcUaResult};
use crate::types::{DiscoveryOptions, DiscoveryStage};

// =============================================================================
// DiscoveryClientFactory
// =============================================================================

/// Builds one ephemeral client per discovery run.
///
/// Implemented for closures `Fn(&DiscoveryOptions) -> C`.
pub trait DiscoveryClientFactory: Send + Sync {
    /// The client type produced.
    type Client: DiscoveryClient + 'static;

    /// Creates a new, unconnected client.
    fn create_client(&self, options: &DiscoveryOptions) -> Self::Client;
}

impl<F, C> DiscoveryClientFactory for F
where
    F: Fn(&DiscoveryOptions) -> C + Send + Sync,
    C: DiscoveryClient + 'static,
{
    type Client = C;

    fn create_client(&self, options: &DiscoveryOptions) -> C {
        self(options)
    }
}

// =============================================================================
// FindServersOutcome
// =============================================================================

/// Result of [`DiscoveryPipeline::find_servers`].
///
/// Whatever was gathered before a failure is kept: a failed GetEndpoints
/// still reports the servers found before it.
#[derive(Debug, Default)]
pub struct FindServersOutcome {
    /// Discovery URL that was queried.
    pub discovery_url: String,

    /// First error encountered, unchanged.
    pub error: Option<OpcUaError>,

    /// Stage that produced `error`.
    pub failed_stage: Option<DiscoveryStage>,

    /// Servers reported by FindServers.
    pub servers: Vec<ApplicationDescription>,

    /// Endpoints reported by GetEndpoints.
    pub endpoints: Vec<EndpointDescription>,
}

impl FindServersOutcome {
    /// Returns `true` if every stage succeeded.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Converts into a `Result`, wrapping a failure as
    /// [`OpcUaError::Discovery`] naming the failed stage.
    pub fn into_result(
        self,
    ) -> OpcUaResult<(Vec<ApplicationDescription>, Vec<EndpointDescription>)> {
        match self.error {
            None => Ok((self.servers, self.endpoints)),
            Some(error) => {
                let stage = self.failed_stage.unwrap_or(DiscoveryStage::Connect);
                Err(DiscoveryError::new(stage, self.discovery_url, error).into())
            }
        }
    }
}

// =============================================================================
// DiscoveryPipeline
// =============================================================================

/// Runs discovery calls against ephemeral clients.
#[derive(Debug, Clone)]
pub struct DiscoveryPipeline<F> {
    factory: F,
    options: DiscoveryOptions,
}

impl<F: DiscoveryClientFactory> DiscoveryPipeline<F> {
    /// Creates a pipeline with default options.
    pub fn new(factory: F) -> Self {
        Self::with_options(factory, DiscoveryOptions::default())
    }

    /// Creates a pipeline with the given options.
    pub fn with_options(factory: F, options: DiscoveryOptions) -> Self {
        Self { factory, options }
    }

    /// Returns the options handed to every client.
    #[inline]
    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }

    /// Lists the servers and endpoints known at `discovery_url`.
    ///
    /// Runs connect, FindServers and an unfiltered GetEndpoints, then
    /// disconnects. Never fails as a whole; see [`FindServersOutcome`].
    pub async fn find_servers(&self, discovery_url: &str) -> FindServersOutcome {
        let mut guard = ClientGuard::new(self.factory.create_client(&self.options), discovery_url);
        let mut outcome = FindServersOutcome {
            discovery_url: discovery_url.to_string(),
            ..Default::default()
        };

        if let Err((stage, error)) = self.run_find_servers(&mut guard, &mut outcome).await {
            warn!(
                discovery_url,
                stage = %stage,
                error = %error,
                "Discovery stage failed"
            );
            outcome.failed_stage = Some(stage);
            outcome.error = Some(error);
        }
        guard.release().await;

        info!(
            discovery_url,
            servers = outcome.servers.len(),
            endpoints = outcome.endpoints.len(),
            ok = outcome.is_ok(),
            "FindServers finished"
        );
        outcome
    }

    async fn run_find_servers(
        &self,
        guard: &mut ClientGuard<F::Client>,
        outcome: &mut FindServersOutcome,
    ) -> Result<(), (DiscoveryStage, OpcUaError)> {
        let client = guard.connect().await?;

        outcome.servers = client
            .find_servers()
            .await
            .map_err(|e| (DiscoveryStage::FindServers, e))?;
        debug!(servers = outcome.servers.len(), "FindServers returned");

        let options = GetEndpointsOptions {
            endpoint_url: None,
            locale_ids: self.options.locale_ids.clone(),
            profile_uris: Vec::new(),
        };
        outcome.endpoints = client
            .get_endpoints(&options)
            .await
            .map_err(|e| (DiscoveryStage::GetEndpoints, e))?;
        debug!(endpoints = outcome.endpoints.len(), "GetEndpoints returned");

        Ok(())
    }

    /// Lists servers registered on the network behind `discovery_url`.
    ///
    /// A failed stage is returned as [`OpcUaError::Discovery`].
    pub async fn find_servers_on_network(
        &self,
        discovery_url: &str,
    ) -> OpcUaResult<Vec<ServerOnNetwork>> {
        let mut guard = ClientGuard::new(self.factory.create_client(&self.options), discovery_url);

        let result = async {
            let client = guard.connect().await?;
            client
                .find_servers_on_network()
                .await
                .map_err(|e| (DiscoveryStage::FindServersOnNetwork, e))
        }
        .await;
        guard.release().await;

        match result {
            Ok(servers) => {
                info!(discovery_url, servers = servers.len(), "FindServersOnNetwork finished");
                Ok(servers)
            }
            Err((stage, error)) => {
                warn!(
                    discovery_url,
                    stage = %stage,
                    error = %error,
                    "Discovery stage failed"
                );
                Err(DiscoveryError::new(stage, discovery_url, error).into())
            }
        }
    }
}

// =============================================================================
// ClientGuard
// =============================================================================

/// Owns a discovery client until it has been disconnected.
///
/// The runtime is captured on creation, which happens on the first poll of a
/// discovery future, so a future dropped outside any runtime context can
/// still schedule its disconnect.
struct ClientGuard<C: DiscoveryClient + 'static> {
    client: Option<C>,
    discovery_url: String,
    runtime: Option<Handle>,
}

impl<C: DiscoveryClient + 'static> ClientGuard<C> {
    fn new(client: C, discovery_url: &str) -> Self {
        Self {
            client: Some(client),
            discovery_url: discovery_url.to_string(),
            runtime: Handle::try_current().ok(),
        }
    }

    /// Connects and returns the client for the following stages.
    async fn connect(&mut self) -> Result<&mut C, (DiscoveryStage, OpcUaError)> {
        let client = self.client.as_mut().ok_or_else(|| {
            (
                DiscoveryStage::Connect,
                OpcUaError::connection(ConnectionError::closed(Some(
                    "discovery client already released".to_string(),
                ))),
            )
        })?;
        debug!(discovery_url = %self.discovery_url, "Connecting discovery client");
        client
            .connect(&self.discovery_url)
            .await
            .map_err(|e| (DiscoveryStage::Connect, e))?;
        Ok(client)
    }

    /// Disconnects the client. Errors are logged and dropped.
    async fn release(&mut self) {
        if let Some(mut client) = self.client.take() {
            if let Err(e) = client.disconnect().await {
                warn!(
                    discovery_url = %self.discovery_url,
                    error = %e,
                    "Discovery client disconnect failed"
                );
            }
        }
    }
}

impl<C: DiscoveryClient + 'static> Drop for ClientGuard<C> {
    fn drop(&mut self) {
        let Some(mut client) = self.client.take() else {
            return;
        };
        let discovery_url = std::mem::take(&mut self.discovery_url);
        match self.runtime.take().or_else(|| Handle::try_current().ok()) {
            Some(runtime) => {
                debug!(discovery_url = %discovery_url, "Discovery cancelled, disconnecting in background");
                runtime.spawn(async move {
                    if let Err(e) = client.disconnect().await {
                        warn!(
                            discovery_url = %discovery_url,
                            error = %e,
                            "Discovery client disconnect failed"
                        );
                    }
                });
            }
            None => {
                warn!(
                    discovery_url = %discovery_url,
                    "Discovery client dropped outside a runtime without disconnecting"
                );
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
