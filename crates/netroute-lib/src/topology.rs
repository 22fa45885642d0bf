//! Typed topology snapshot: nodes, connections, and the JSON loader.
//!
//! Topology documents come in two shapes. The canonical one nests the graph
//! under a `topology` key:
//!
//! ```json
//! {"topology": {"nodes": [{"id": "r1", "device_id": "dev-a", "start": true}],
//!               "connections": [{"source": "r1", "target": "r2"}]}}
//! ```
//!
//! The bare `{"nodes": [...], "connections": [...]}` form is accepted as well.
//! Node ids may be JSON strings or integers and are normalised to strings.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Endpoint, Error, Result};

/// Weight assigned to a connection that does not declare one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Opaque node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Scalar::deserialize(deserializer).map(|scalar| NodeId(scalar.into()))
    }
}

/// String-or-integer identifier as it appears in topology exports.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(text) => text,
            Scalar::Signed(n) => n.to_string(),
            Scalar::Unsigned(n) => n.to_string(),
        }
    }
}

fn optional_scalar<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Option::<Scalar>::deserialize(deserializer).map(|value| value.map(String::from))
}

/// A network node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Device identifier used to resolve waypoint constraints.
    #[serde(
        default,
        deserialize_with = "optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub device_id: Option<String>,
    #[serde(default, alias = "isStart", skip_serializing_if = "std::ops::Not::not")]
    pub start: bool,
    #[serde(default, alias = "isEnd", skip_serializing_if = "std::ops::Not::not")]
    pub end: bool,
}

impl Node {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            device_id: None,
            start: false,
            end: false,
        }
    }

    pub fn with_device(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn as_start(mut self) -> Self {
        self.start = true;
        self
    }

    pub fn as_end(mut self) -> Self {
        self.end = true;
        self
    }
}

/// A bidirectional link between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Connection {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: None,
        }
    }

    pub fn weighted(source: impl Into<NodeId>, target: impl Into<NodeId>, weight: f64) -> Self {
        Self {
            weight: Some(weight),
            ..Self::new(source, target)
        }
    }

    /// Effective edge cost.
    pub fn weight(&self) -> f64 {
        self.weight.unwrap_or(DEFAULT_WEIGHT)
    }
}

/// Immutable topology snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

/// Outcome of mapping waypoint device ids onto topology nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaypointResolution {
    /// Matching node ids, in node-list order, without repeats.
    pub nodes: Vec<NodeId>,
    /// Requested device ids that no node carries.
    pub unmatched: Vec<String>,
}

impl Topology {
    /// Parse a topology document, accepting both the wrapped and bare shapes.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }

    /// Interpret an already-parsed JSON document as a topology.
    pub fn from_json_value(value: Value) -> Result<Self> {
        let inner = match value {
            Value::Object(mut map) if map.contains_key("topology") => map
                .remove("topology")
                .unwrap_or(Value::Null),
            other => other,
        };
        Ok(serde_json::from_value(inner)?)
    }

    /// Identify the unique start and end nodes.
    ///
    /// Exactly one node must carry each flag; zero or several is a
    /// configuration error.
    pub fn endpoints(&self) -> Result<(NodeId, NodeId)> {
        Ok((self.start_node()?, self.end_node()?))
    }

    /// The node flagged `start`.
    pub fn start_node(&self) -> Result<NodeId> {
        unique_flagged(self.nodes.iter().filter(|n| n.start), Endpoint::Start)
    }

    /// The node flagged `end`.
    pub fn end_node(&self) -> Result<NodeId> {
        unique_flagged(self.nodes.iter().filter(|n| n.end), Endpoint::End)
    }

    /// Map waypoint device ids to node ids.
    ///
    /// Every node whose `device_id` appears in `device_ids` is returned, in the
    /// order the nodes are declared. Unknown device ids are reported back
    /// rather than treated as an error.
    pub fn resolve_waypoints(&self, device_ids: &[String]) -> WaypointResolution {
        let wanted: HashSet<&str> = device_ids.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();
        let mut matched_devices = HashSet::new();
        let mut nodes = Vec::new();

        for node in &self.nodes {
            let Some(device) = node.device_id.as_deref() else {
                continue;
            };
            if !wanted.contains(device) {
                continue;
            }
            matched_devices.insert(device);
            if seen.insert(&node.id) {
                nodes.push(node.id.clone());
            }
        }

        let mut unmatched = Vec::new();
        for device in device_ids {
            if !matched_devices.contains(device.as_str()) && !unmatched.contains(device) {
                unmatched.push(device.clone());
            }
        }

        WaypointResolution { nodes, unmatched }
    }
}

fn unique_flagged<'a>(
    mut candidates: impl Iterator<Item = &'a Node>,
    endpoint: Endpoint,
) -> Result<NodeId> {
    let first = candidates
        .next()
        .ok_or(Error::MissingEndpoint { endpoint })?;
    let extra: Vec<String> = candidates.map(|n| n.id.to_string()).collect();
    if extra.is_empty() {
        return Ok(first.id.clone());
    }

    let mut ids = Vec::with_capacity(extra.len() + 1);
    ids.push(first.id.to_string());
    ids.extend(extra);
    Err(Error::DuplicateEndpoint { endpoint, ids })
}

/// Load a topology document from disk.
pub fn load_topology(path: &Path) -> Result<Topology> {
    if !path.exists() {
        return Err(Error::TopologyNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let topology = Topology::from_json_str(&contents)?;
    tracing::info!(
        path = %path.display(),
        nodes = topology.nodes.len(),
        connections = topology.connections.len(),
        "loaded topology"
    );
    Ok(topology)
}
