// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Pre-built test data for consistent testing.

use std::time::Duration;

use kite_opcua::client::{
    CreateMonitoredItemsResponse, ModifyMonitoredItemsResponse, MonitoredItemCreateResult,
    MonitoredItemModifyResult, SetMonitoringModeResponse,
};
use kite_opcua::{
    ApplicationDescription, EndpointDescription, NodeId, SecurityMode, ServerOnNetwork, StatusCode,
};

/// A reachable discovery endpoint.
pub const DISCOVERY_URL: &str = "opc.tcp://localhost:4840";

/// An endpoint the mocks treat as unreachable once `Connect` fails.
pub const UNREACHABLE_URL: &str = "opc.tcp://unreachable.invalid:4840";

// =============================================================================
// Node Fixtures
// =============================================================================

/// Node ids used across tests.
pub struct NodeFixtures;

impl NodeFixtures {
    /// A string node for a boiler temperature.
    pub fn temperature() -> NodeId {
        NodeId::string(2, "Boiler.Temperature")
    }

    /// A string node for a boiler pressure.
    pub fn pressure() -> NodeId {
        NodeId::string(2, "Boiler.Pressure")
    }

    /// The server's current time.
    pub fn server_time() -> NodeId {
        NodeId::SERVER_CURRENT_TIME
    }
}

// =============================================================================
// Discovery Fixtures
// =============================================================================

/// Servers and endpoints returned by the discovery mocks.
pub struct DiscoveryFixtures;

impl DiscoveryFixtures {
    /// Two servers behind one discovery endpoint.
    pub fn servers() -> Vec<ApplicationDescription> {
        vec![
            ApplicationDescription::server(
                "urn:plant:boiler",
                "Boiler Server",
                "opc.tcp://boiler:4840",
            ),
            ApplicationDescription::server(
                "urn:plant:conveyor",
                "Conveyor Server",
                "opc.tcp://conveyor:4840",
            ),
        ]
    }

    /// One unsecured and one signed endpoint of the first server.
    pub fn endpoints() -> Vec<EndpointDescription> {
        let server = Self::servers().remove(0);
        vec![
            EndpointDescription {
                endpoint_url: "opc.tcp://boiler:4840".to_string(),
                server: server.clone(),
                security_mode: SecurityMode::None,
                security_policy_uri: "http://opcfoundation.org/UA/SecurityPolicy#None".to_string(),
                transport_profile_uri:
                    "http://opcfoundation.org/UA-Profile/Transport/uatcp-uasc-uabinary".to_string(),
                security_level: 0,
            },
            EndpointDescription {
                endpoint_url: "opc.tcp://boiler:4840".to_string(),
                server,
                security_mode: SecurityMode::SignAndEncrypt,
                security_policy_uri: "http://opcfoundation.org/UA/SecurityPolicy#Basic256Sha256"
                    .to_string(),
                transport_profile_uri:
                    "http://opcfoundation.org/UA-Profile/Transport/uatcp-uasc-uabinary".to_string(),
                security_level: 3,
            },
        ]
    }

    /// Servers announced on the local network.
    pub fn network_servers() -> Vec<ServerOnNetwork> {
        vec![
            ServerOnNetwork {
                record_id: 1,
                server_name: "Boiler Server".to_string(),
                discovery_url: "opc.tcp://boiler:4840".to_string(),
                server_capabilities: vec!["DA".to_string()],
            },
            ServerOnNetwork {
                record_id: 2,
                server_name: "Historian".to_string(),
                discovery_url: "opc.tcp://historian:4840".to_string(),
                server_capabilities: vec!["HD".to_string(), "DA".to_string()],
            },
        ]
    }
}

// =============================================================================
// Response Fixtures
// =============================================================================

/// Canned service responses.
pub struct ResponseFixtures;

impl ResponseFixtures {
    /// A create response built from one status per item.
    ///
    /// Good entries get ids `first_id`, `first_id + 1`, ... in order.
    pub fn create(statuses: &[StatusCode], first_id: u32) -> CreateMonitoredItemsResponse {
        let results = statuses
            .iter()
            .zip(first_id..)
            .map(|(status, id)| {
                if status.is_good() {
                    MonitoredItemCreateResult::good(id, Duration::from_millis(500), 5)
                } else {
                    MonitoredItemCreateResult::rejected(*status)
                }
            })
            .collect();
        CreateMonitoredItemsResponse::new(results)
    }

    /// A modify response built from one status per item.
    pub fn modify(statuses: &[StatusCode]) -> ModifyMonitoredItemsResponse {
        let results = statuses
            .iter()
            .map(|status| {
                if status.is_good() {
                    MonitoredItemModifyResult::good(Duration::from_millis(1000), 20)
                } else {
                    MonitoredItemModifyResult::rejected(*status)
                }
            })
            .collect();
        ModifyMonitoredItemsResponse::new(results)
    }

    /// A set-monitoring-mode response.
    pub fn mode(statuses: &[StatusCode]) -> SetMonitoringModeResponse {
        SetMonitoringModeResponse::new(statuses.to_vec())
    }
}

// =============================================================================
// Config Fixtures
// =============================================================================

/// Configuration documents in every supported format.
pub struct ConfigFixtures;

impl ConfigFixtures {
    /// A complete YAML document.
    pub fn yaml() -> &'static str {
        r#"
toolbox:
  default_timestamps: source
  mode_update: good_only
  max_items_per_batch: 500

discovery:
  application_name: "Plant Browser"
  application_uri: "urn:plant:browser"
  request_timeout: 5s
  locale_ids:
    - en-US
    - de-DE

logging:
  level: debug
  format: json
"#
    }

    /// The YAML document expressed as TOML.
    pub fn toml() -> &'static str {
        r#"
[toolbox]
default_timestamps = "source"
mode_update = "good_only"
max_items_per_batch = 500

[discovery]
application_name = "Plant Browser"
application_uri = "urn:plant:browser"
request_timeout = "5s"
locale_ids = ["en-US", "de-DE"]

[logging]
level = "debug"
format = "json"
"#
    }

    /// The YAML document expressed as JSON.
    pub fn json() -> &'static str {
        r#"{
  "toolbox": {
    "default_timestamps": "source",
    "mode_update": "good_only",
    "max_items_per_batch": 500
  },
  "discovery": {
    "application_name": "Plant Browser",
    "application_uri": "urn:plant:browser",
    "request_timeout": "5s",
    "locale_ids": ["en-US", "de-DE"]
  },
  "logging": {
    "level": "debug",
    "format": "json"
  }
}"#
    }
}
