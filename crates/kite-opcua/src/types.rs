// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! OPC UA types shared by the batch toolbox and the discovery pipeline.
//!
//! - **NodeId / ReadValueId**: what a monitored item samples
//! - **StatusCode**: per-item and service results
//! - **MonitoringParameters**: sampling, queueing and filtering of one item
//! - **ToolboxOptions / DiscoveryOptions**: serde-backed settings
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use kite_opcua::types::{MonitoringParameters, NodeId};
//!
//! let node: NodeId = "ns=2;s=Boiler.Temperature".parse().unwrap();
//! assert_eq!(node.namespace_index, 2);
//!
//! let shared = MonitoringParameters::with_sampling_interval(Duration::from_millis(100));
//! let item = shared.with_client_handle(42);
//! assert_eq!(item.client_handle, 42);
//! assert_eq!(item.sampling_interval, shared.sampling_interval);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ConfigurationError, OpcUaError, OpcUaResult};

// =============================================================================
// NodeId
// =============================================================================

/// OPC UA Node Identifier.
///
/// A namespace index plus a numeric, string, GUID or opaque identifier.
///
/// ```
/// use kite_opcua::types::NodeId;
///
/// let numeric = NodeId::numeric(2, 1001);
/// assert_eq!(numeric.to_string(), "ns=2;i=1001");
///
/// let parsed: NodeId = "i=2258".parse().unwrap();
/// assert_eq!(parsed, NodeId::numeric(0, 2258));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    /// Namespace index (0 = OPC UA standard namespace).
    pub namespace_index: u16,

    /// The node identifier.
    pub identifier: NodeIdentifier,
}

impl NodeId {
    /// Creates a numeric node ID.
    #[inline]
    pub fn numeric(namespace_index: u16, value: u32) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Numeric(value),
        }
    }

    /// Creates a string node ID.
    #[inline]
    pub fn string(namespace_index: u16, value: impl Into<String>) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::String(value.into()),
        }
    }

    /// Creates a GUID node ID.
    #[inline]
    pub fn guid(namespace_index: u16, value: Uuid) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Guid(value),
        }
    }

    /// Creates an opaque (byte string) node ID.
    #[inline]
    pub fn opaque(namespace_index: u16, value: Vec<u8>) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Opaque(value),
        }
    }

    /// Server_ServerStatus_CurrentTime (ns=0, i=2258).
    pub const SERVER_CURRENT_TIME: NodeId = NodeId {
        namespace_index: 0,
        identifier: NodeIdentifier::Numeric(2258),
    };

    /// Returns the null node ID (ns=0, i=0).
    #[inline]
    pub const fn null() -> Self {
        Self {
            namespace_index: 0,
            identifier: NodeIdentifier::Numeric(0),
        }
    }

    /// Returns `true` if this is a null node ID (ns=0, i=0).
    #[inline]
    pub fn is_null(&self) -> bool {
        self.namespace_index == 0 && matches!(self.identifier, NodeIdentifier::Numeric(0))
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_index == 0 {
            write!(f, "{}", self.identifier)
        } else {
            write!(f, "ns={};{}", self.namespace_index, self.identifier)
        }
    }
}

impl FromStr for NodeId {
    type Err = OpcUaError;

    /// Parses `ns=<n>;{i|s|g|b}=<id>`; the namespace part is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = |reason: String| {
            OpcUaError::configuration(ConfigurationError::invalid_node_id(s, reason))
        };

        let (namespace_index, identifier_part) = match s.strip_prefix("ns=") {
            Some(rest) => {
                let (ns, id) = rest
                    .split_once(';')
                    .ok_or_else(|| invalid("Missing identifier after namespace".into()))?;
                let ns: u16 = ns
                    .parse()
                    .map_err(|_| invalid("Invalid namespace index".into()))?;
                (ns, id)
            }
            None => (0, s),
        };

        let identifier = if let Some(id) = identifier_part.strip_prefix("i=") {
            NodeIdentifier::Numeric(
                id.parse()
                    .map_err(|_| invalid("Invalid numeric identifier".into()))?,
            )
        } else if let Some(id) = identifier_part.strip_prefix("s=") {
            NodeIdentifier::String(id.to_string())
        } else if let Some(id) = identifier_part.strip_prefix("g=") {
            NodeIdentifier::Guid(
                Uuid::parse_str(id).map_err(|e| invalid(format!("Invalid GUID: {}", e)))?,
            )
        } else if let Some(id) = identifier_part.strip_prefix("b=") {
            NodeIdentifier::Opaque(
                BASE64
                    .decode(id)
                    .map_err(|e| invalid(format!("Invalid base64: {}", e)))?,
            )
        } else {
            return Err(invalid(
                "Unknown identifier type. Expected i=, s=, g=, or b=".into(),
            ));
        };

        Ok(Self {
            namespace_index,
            identifier,
        })
    }
}

/// OPC UA node identifier types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum NodeIdentifier {
    /// Numeric identifier.
    Numeric(u32),

    /// String identifier.
    String(String),

    /// GUID identifier.
    Guid(Uuid),

    /// Opaque identifier.
    Opaque(Vec<u8>),
}

impl fmt::Display for NodeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "i={}", v),
            Self::String(v) => write!(f, "s={}", v),
            Self::Guid(v) => write!(f, "g={}", v),
            Self::Opaque(v) => write!(f, "b={}", BASE64.encode(v)),
        }
    }
}

// =============================================================================
// AttributeId
// =============================================================================

/// Node attributes that can be monitored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttributeId {
    /// NodeId attribute.
    NodeId,
    /// NodeClass attribute.
    NodeClass,
    /// BrowseName attribute.
    BrowseName,
    /// DisplayName attribute.
    DisplayName,
    /// Description attribute.
    Description,
    /// EventNotifier attribute (event monitoring).
    EventNotifier,
    /// Value attribute (data change monitoring).
    #[default]
    Value,
    /// DataType attribute.
    DataType,
    /// AccessLevel attribute.
    AccessLevel,
    /// UserAccessLevel attribute.
    UserAccessLevel,
    /// MinimumSamplingInterval attribute.
    MinimumSamplingInterval,
    /// Historizing attribute.
    Historizing,
}

impl AttributeId {
    /// Returns the OPC UA attribute id.
    pub const fn value(&self) -> u32 {
        match self {
            Self::NodeId => 1,
            Self::NodeClass => 2,
            Self::BrowseName => 3,
            Self::DisplayName => 4,
            Self::Description => 5,
            Self::EventNotifier => 12,
            Self::Value => 13,
            Self::DataType => 14,
            Self::AccessLevel => 17,
            Self::UserAccessLevel => 18,
            Self::MinimumSamplingInterval => 19,
            Self::Historizing => 20,
        }
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NodeId => "NodeId",
            Self::NodeClass => "NodeClass",
            Self::BrowseName => "BrowseName",
            Self::DisplayName => "DisplayName",
            Self::Description => "Description",
            Self::EventNotifier => "EventNotifier",
            Self::Value => "Value",
            Self::DataType => "DataType",
            Self::AccessLevel => "AccessLevel",
            Self::UserAccessLevel => "UserAccessLevel",
            Self::MinimumSamplingInterval => "MinimumSamplingInterval",
            Self::Historizing => "Historizing",
        };
        f.write_str(name)
    }
}

// =============================================================================
// ReadValueId
// =============================================================================

/// The node attribute a monitored item samples.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadValueId {
    /// Node to monitor.
    pub node_id: NodeId,

    /// Attribute of the node.
    #[serde(default)]
    pub attribute_id: AttributeId,

    /// Optional numeric range for array values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_range: Option<String>,
}

impl ReadValueId {
    /// Monitors the Value attribute of a node.
    pub fn value(node_id: NodeId) -> Self {
        Self {
            node_id,
            attribute_id: AttributeId::Value,
            index_range: None,
        }
    }

    /// Monitors a specific attribute of a node.
    pub fn attribute(node_id: NodeId, attribute_id: AttributeId) -> Self {
        Self {
            node_id,
            attribute_id,
            index_range: None,
        }
    }

    /// Restricts monitoring to an index range.
    pub fn with_index_range(mut self, range: impl Into<String>) -> Self {
        self.index_range = Some(range.into());
        self
    }
}

// =============================================================================
// StatusCode
// =============================================================================

/// OPC UA status code.
///
/// The top two bits carry the severity: `00` Good, `01` Uncertain, `10` Bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct StatusCode(pub u32);

impl StatusCode {
    /// Good.
    pub const GOOD: StatusCode = StatusCode(0x0000_0000);
    /// Uncertain.
    pub const UNCERTAIN: StatusCode = StatusCode(0x4000_0000);
    /// Bad.
    pub const BAD: StatusCode = StatusCode(0x8000_0000);
    /// BadUnexpectedError.
    pub const BAD_UNEXPECTED_ERROR: StatusCode = StatusCode(0x8001_0000);
    /// BadInternalError.
    pub const BAD_INTERNAL_ERROR: StatusCode = StatusCode(0x8002_0000);
    /// BadResourceUnavailable.
    pub const BAD_RESOURCE_UNAVAILABLE: StatusCode = StatusCode(0x8004_0000);
    /// BadCommunicationError.
    pub const BAD_COMMUNICATION_ERROR: StatusCode = StatusCode(0x8005_0000);
    /// BadTimeout.
    pub const BAD_TIMEOUT: StatusCode = StatusCode(0x800A_0000);
    /// BadServiceUnsupported.
    pub const BAD_SERVICE_UNSUPPORTED: StatusCode = StatusCode(0x800B_0000);
    /// BadNothingToDo.
    pub const BAD_NOTHING_TO_DO: StatusCode = StatusCode(0x800F_0000);
    /// BadTooManyOperations.
    pub const BAD_TOO_MANY_OPERATIONS: StatusCode = StatusCode(0x8010_0000);
    /// BadSubscriptionIdInvalid.
    pub const BAD_SUBSCRIPTION_ID_INVALID: StatusCode = StatusCode(0x8028_0000);
    /// BadTimestampsToReturnInvalid.
    pub const BAD_TIMESTAMPS_TO_RETURN_INVALID: StatusCode = StatusCode(0x802B_0000);
    /// BadNodeIdInvalid.
    pub const BAD_NODE_ID_INVALID: StatusCode = StatusCode(0x8033_0000);
    /// BadNodeIdUnknown.
    pub const BAD_NODE_ID_UNKNOWN: StatusCode = StatusCode(0x8034_0000);
    /// BadAttributeIdInvalid.
    pub const BAD_ATTRIBUTE_ID_INVALID: StatusCode = StatusCode(0x8035_0000);
    /// BadIndexRangeInvalid.
    pub const BAD_INDEX_RANGE_INVALID: StatusCode = StatusCode(0x8036_0000);
    /// BadNotReadable.
    pub const BAD_NOT_READABLE: StatusCode = StatusCode(0x803A_0000);
    /// BadMonitoringModeInvalid.
    pub const BAD_MONITORING_MODE_INVALID: StatusCode = StatusCode(0x8041_0000);
    /// BadMonitoredItemIdInvalid.
    pub const BAD_MONITORED_ITEM_ID_INVALID: StatusCode = StatusCode(0x8042_0000);
    /// BadMonitoredItemFilterInvalid.
    pub const BAD_MONITORED_ITEM_FILTER_INVALID: StatusCode = StatusCode(0x8043_0000);
    /// BadMonitoredItemFilterUnsupported.
    pub const BAD_MONITORED_ITEM_FILTER_UNSUPPORTED: StatusCode = StatusCode(0x8044_0000);
    /// BadFilterNotAllowed.
    pub const BAD_FILTER_NOT_ALLOWED: StatusCode = StatusCode(0x8045_0000);
    /// BadTooManyMonitoredItems.
    pub const BAD_TOO_MANY_MONITORED_ITEMS: StatusCode = StatusCode(0x80DB_0000);

    /// Returns the raw status code.
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the severity is Good.
    #[inline]
    pub const fn is_good(&self) -> bool {
        self.0 & 0xC000_0000 == 0
    }

    /// Returns `true` if the severity is Uncertain.
    #[inline]
    pub const fn is_uncertain(&self) -> bool {
        self.0 & 0xC000_0000 == 0x4000_0000
    }

    /// Returns `true` if the severity is Bad.
    #[inline]
    pub const fn is_bad(&self) -> bool {
        self.0 & 0x8000_0000 != 0
    }

    /// Returns the symbolic name of the code, ignoring info bits.
    pub fn name(&self) -> &'static str {
        match self.0 & 0xFFFF_0000 {
            0x0000_0000 => "Good",
            0x4000_0000 => "Uncertain",
            0x8000_0000 => "Bad",
            0x8001_0000 => "BadUnexpectedError",
            0x8002_0000 => "BadInternalError",
            0x8004_0000 => "BadResourceUnavailable",
            0x8005_0000 => "BadCommunicationError",
            0x800A_0000 => "BadTimeout",
            0x800B_0000 => "BadServiceUnsupported",
            0x800F_0000 => "BadNothingToDo",
            0x8010_0000 => "BadTooManyOperations",
            0x8028_0000 => "BadSubscriptionIdInvalid",
            0x802B_0000 => "BadTimestampsToReturnInvalid",
            0x8033_0000 => "BadNodeIdInvalid",
            0x8034_0000 => "BadNodeIdUnknown",
            0x8035_0000 => "BadAttributeIdInvalid",
            0x8036_0000 => "BadIndexRangeInvalid",
            0x803A_0000 => "BadNotReadable",
            0x8041_0000 => "BadMonitoringModeInvalid",
            0x8042_0000 => "BadMonitoredItemIdInvalid",
            0x8043_0000 => "BadMonitoredItemFilterInvalid",
            0x8044_0000 => "BadMonitoredItemFilterUnsupported",
            0x8045_0000 => "BadFilterNotAllowed",
            0x80DB_0000 => "BadTooManyMonitoredItems",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#010x})", self.name(), self.0)
    }
}

impl From<u32> for StatusCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

// =============================================================================
// TimestampsToReturn
// =============================================================================

/// Which timestamps the server attaches to reported values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimestampsToReturn {
    /// Source timestamp only.
    Source,
    /// Server timestamp only.
    Server,
    /// Both timestamps.
    #[default]
    Both,
    /// No timestamps.
    Neither,
}

impl TimestampsToReturn {
    /// Returns the OPC UA value.
    pub const fn value(&self) -> u32 {
        match self {
            Self::Source => 0,
            Self::Server => 1,
            Self::Both => 2,
            Self::Neither => 3,
        }
    }
}

// =============================================================================
// MonitoringMode
// =============================================================================

/// OPC UA monitoring mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MonitoringMode {
    /// Monitoring disabled.
    Disabled,

    /// Sampling enabled, reporting disabled.
    Sampling,

    /// Sampling and reporting enabled.
    #[default]
    Reporting,
}

impl MonitoringMode {
    /// Returns the OPC UA value.
    pub const fn value(&self) -> u32 {
        match self {
            Self::Disabled => 0,
            Self::Sampling => 1,
            Self::Reporting => 2,
        }
    }
}

impl fmt::Display for MonitoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "Disabled"),
            Self::Sampling => write!(f, "Sampling"),
            Self::Reporting => write!(f, "Reporting"),
        }
    }
}

// =============================================================================
// DeadbandSettings
// =============================================================================

/// Data change deadband filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeadbandSettings {
    /// No deadband filtering.
    #[default]
    None,

    /// Absolute deadband (report if change exceeds absolute value).
    Absolute {
        /// Absolute change threshold.
        value: f64,
    },

    /// Percent deadband (report if change exceeds percentage of EU range).
    Percent {
        /// Percentage of engineering unit range (0-100).
        percent: f64,
    },
}

impl DeadbandSettings {
    /// Creates an absolute deadband.
    pub fn absolute(value: f64) -> Self {
        Self::Absolute { value }
    }

    /// Creates a percent deadband.
    pub fn percent(percent: f64) -> Self {
        Self::Percent { percent }
    }

    /// Returns `true` if this is no deadband.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Checks the threshold range; returns the reason on failure.
    pub fn check(&self) -> Result<(), String> {
        match *self {
            Self::None => Ok(()),
            Self::Absolute { value } if value.is_finite() && value >= 0.0 => Ok(()),
            Self::Absolute { value } => {
                Err(format!("absolute deadband must be a non-negative number, got {}", value))
            }
            Self::Percent { percent } if (0.0..=100.0).contains(&percent) => Ok(()),
            Self::Percent { percent } => {
                Err(format!("percent deadband must be within 0..=100, got {}", percent))
            }
        }
    }
}

// =============================================================================
// MonitoringParameters
// =============================================================================

/// Requested sampling behaviour of one monitored item.
///
/// Batch modifications share one set of parameters across many items; each
/// item receives a copy carrying its own client handle via
/// [`with_client_handle`](Self::with_client_handle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringParameters {
    /// Client-assigned correlation id.
    #[serde(default)]
    pub client_handle: u32,

    /// Sampling interval.
    #[serde(default = "default_sampling_interval")]
    #[serde(with = "humantime_serde")]
    pub sampling_interval: Duration,

    /// Data change filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<DeadbandSettings>,

    /// Queue size for buffered values.
    #[serde(default = "default_queue_size")]
    pub queue_size: u32,

    /// Discard policy when queue is full.
    #[serde(default = "default_true")]
    pub discard_oldest: bool,
}

fn default_sampling_interval() -> Duration {
    Duration::from_millis(250)
}

fn default_queue_size() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

impl Default for MonitoringParameters {
    fn default() -> Self {
        Self {
            client_handle: 0,
            sampling_interval: default_sampling_interval(),
            filter: None,
            queue_size: default_queue_size(),
            discard_oldest: true,
        }
    }
}

impl MonitoringParameters {
    /// Creates parameters with a custom sampling interval.
    pub fn with_sampling_interval(interval: Duration) -> Self {
        Self {
            sampling_interval: interval,
            ..Default::default()
        }
    }

    /// Returns a copy of these parameters carrying `client_handle`.
    pub fn with_client_handle(&self, client_handle: u32) -> Self {
        Self {
            client_handle,
            ..self.clone()
        }
    }

    /// Sets the deadband filter.
    pub fn with_filter(mut self, filter: DeadbandSettings) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the queue size.
    pub fn with_queue_size(mut self, queue_size: u32) -> Self {
        self.queue_size = queue_size;
        self
    }

    /// Returns `true` if an effective deadband filter is set.
    pub fn has_filter(&self) -> bool {
        self.filter.as_ref().is_some_and(|f| !f.is_none())
    }
}

// =============================================================================
// SecurityMode / ApplicationType
// =============================================================================

/// Message security mode of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SecurityMode {
    /// No security.
    #[default]
    None,
    /// Messages are signed.
    Sign,
    /// Messages are signed and encrypted.
    SignAndEncrypt,
}

impl fmt::Display for SecurityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Sign => write!(f, "Sign"),
            Self::SignAndEncrypt => write!(f, "SignAndEncrypt"),
        }
    }
}

/// Role of an application reported by discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationType {
    /// Server.
    #[default]
    Server,
    /// Client.
    Client,
    /// Client and server.
    ClientAndServer,
    /// Discovery server.
    DiscoveryServer,
}

// =============================================================================
// BatchOperation / DiscoveryStage
// =============================================================================

/// The three monitored-item batch services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchOperation {
    /// CreateMonitoredItems service.
    CreateMonitoredItems,
    /// ModifyMonitoredItems service.
    ModifyMonitoredItems,
    /// SetMonitoringMode service.
    SetMonitoringMode,
}

impl fmt::Display for BatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateMonitoredItems => write!(f, "CreateMonitoredItems"),
            Self::ModifyMonitoredItems => write!(f, "ModifyMonitoredItems"),
            Self::SetMonitoringMode => write!(f, "SetMonitoringMode"),
        }
    }
}

/// Stages of a discovery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryStage {
    /// Connecting to the discovery endpoint.
    Connect,
    /// FindServers request.
    FindServers,
    /// GetEndpoints request.
    GetEndpoints,
    /// FindServersOnNetwork request.
    FindServersOnNetwork,
}

impl fmt::Display for DiscoveryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => write!(f, "connect"),
            Self::FindServers => write!(f, "find servers"),
            Self::GetEndpoints => write!(f, "get endpoints"),
            Self::FindServersOnNetwork => write!(f, "find servers on network"),
        }
    }
}

// =============================================================================
// ToolboxOptions
// =============================================================================

/// How set-monitoring-mode updates local handle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModeUpdatePolicy {
    /// Every submitted handle takes the requested mode once the call succeeds.
    #[default]
    Unconditional,
    /// Only handles whose per-item status is Good take the requested mode.
    GoodOnly,
}

/// Settings for [`MonitoredItemToolbox`](crate::client::MonitoredItemToolbox).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolboxOptions {
    /// Timestamps requested when the caller does not pick any.
    #[serde(default)]
    pub default_timestamps: TimestampsToReturn,

    /// Local state update rule for set-monitoring-mode.
    #[serde(default)]
    pub mode_update: ModeUpdatePolicy,

    /// Upper bound on items per batch; `None` sends any size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items_per_batch: Option<usize>,
}

impl Default for ToolboxOptions {
    fn default() -> Self {
        Self {
            default_timestamps: TimestampsToReturn::Both,
            mode_update: ModeUpdatePolicy::Unconditional,
            max_items_per_batch: None,
        }
    }
}

impl ToolboxOptions {
    /// Validates the options.
    pub fn validate(&self) -> OpcUaResult<()> {
        if self.max_items_per_batch == Some(0) {
            return Err(OpcUaError::configuration(ConfigurationError::invalid_value(
                "max_items_per_batch",
                "must be greater than 0",
            )));
        }
        Ok(())
    }
}

// =============================================================================
// DiscoveryOptions
// =============================================================================

/// Settings handed to every ephemeral discovery client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryOptions {
    /// Application name announced to the discovery server.
    #[serde(default = "default_application_name")]
    pub application_name: String,

    /// Application URI announced to the discovery server.
    #[serde(default = "default_application_uri")]
    pub application_uri: String,

    /// Per-request timeout, enforced by the client transport.
    #[serde(default = "default_request_timeout")]
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Preferred locales for server names.
    #[serde(default)]
    pub locale_ids: Vec<String>,
}

fn default_application_name() -> String {
    "kite discovery client".to_string()
}

fn default_application_uri() -> String {
    "urn:kite:discovery-client".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            application_name: default_application_name(),
            application_uri: default_application_uri(),
            request_timeout: default_request_timeout(),
            locale_ids: Vec::new(),
        }
    }
}

impl DiscoveryOptions {
    /// Validates the options.
    pub fn validate(&self) -> OpcUaResult<()> {
        if self.application_name.trim().is_empty() {
            return Err(OpcUaError::configuration(ConfigurationError::invalid_value(
                "application_name",
                "must not be empty",
            )));
        }
        if !self.application_uri.starts_with("urn:") {
            return Err(OpcUaError::configuration(ConfigurationError::invalid_value(
                "application_uri",
                "must be a URN (urn:...)",
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(OpcUaError::configuration(ConfigurationError::invalid_value(
                "request_timeout",
                "must be greater than 0",
            )));
        }
        Ok(())
    }
}

// =============================================================================
// humantime_serde helper
// =============================================================================

mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        humantime::format_duration(*duration)
            .to_string()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================
