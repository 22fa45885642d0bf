//! Health check handlers for Kubernetes probes.
//!
//! `/health/live` answers as long as the process runs. `/health/ready` looks
//! at the loaded topology: an empty snapshot is not ready (503), and a
//! snapshot without a unique start/end pair is `degraded`. A degraded service
//! still answers requests that name `from`/`to` explicitly or carry an inline
//! topology, so it stays in rotation (200).

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use netroute_lib::{NodeId, Topology};

use crate::AppState;

/// Overall probe verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Ok,
    Degraded,
    NotReady,
}

impl HealthState {
    fn status_code(self) -> StatusCode {
        match self {
            HealthState::Ok | HealthState::Degraded => StatusCode::OK,
            HealthState::NotReady => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// What the readiness probe saw in the loaded topology.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyReadiness {
    pub nodes: usize,
    pub connections: usize,
    /// Node flagged `start`, when exactly one is.
    pub start: Option<NodeId>,
    /// Node flagged `end`, when exactly one is.
    pub end: Option<NodeId>,
}

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: HealthState,
    pub service: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topology: Option<TopologyReadiness>,
    /// Why the service is not fully ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl HealthStatus {
    /// Liveness status; carries no topology information.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: HealthState::Ok,
            service: service.to_string(),
            version: version.to_string(),
            topology: None,
            reason: None,
        }
    }

    /// Readiness status derived from a topology snapshot.
    pub fn for_topology(service: &str, version: &str, topology: &Topology) -> Self {
        let mut status = Self::alive(service, version);

        if topology.nodes.is_empty() {
            status.status = HealthState::NotReady;
            status.reason = Some("topology has no nodes".to_string());
            return status;
        }

        let start = topology.start_node();
        let end = topology.end_node();
        if let Some(err) = start.as_ref().err().or(end.as_ref().err()) {
            status.status = HealthState::Degraded;
            status.reason = Some(err.to_string());
        }

        status.topology = Some(TopologyReadiness {
            nodes: topology.nodes.len(),
            connections: topology.connections.len(),
            start: start.ok(),
            end: end.ok(),
        });
        status
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"netroute-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// ```text
/// GET /health/ready
/// {"status":"ok",...,"topology":{"nodes":8,"connections":8,"start":"host-a","end":"srv-db"}}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let status = HealthStatus::for_topology(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        state.topology(),
    );
    if status.status != HealthState::Ok {
        tracing::warn!(status = ?status.status, reason = ?status.reason, "readiness check");
    }
    (status.status.status_code(), Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use netroute_lib::{Connection, Node};

    fn pair(start: bool, end: bool) -> Topology {
        let mut a = Node::new("a");
        a.start = start;
        let mut b = Node::new("b");
        b.end = end;
        Topology {
            nodes: vec![a, b],
            connections: vec![Connection::new("a", "b")],
        }
    }

    #[test]
    fn test_alive_has_no_topology() {
        let json = serde_json::to_string(&HealthStatus::alive("route", "0.1.0")).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(!json.contains("topology"));
        assert!(!json.contains("reason"));
    }

    #[test]
    fn test_ready_topology_reports_endpoints() {
        let status = HealthStatus::for_topology("route", "0.1.0", &pair(true, true));
        assert_eq!(status.status, HealthState::Ok);
        let topology = status.topology.expect("topology section");
        assert_eq!(topology.nodes, 2);
        assert_eq!(topology.start, Some(NodeId::from("a")));
        assert_eq!(topology.end, Some(NodeId::from("b")));
    }

    #[test]
    fn test_missing_end_flag_is_degraded() {
        let status = HealthStatus::for_topology("route", "0.1.0", &pair(true, false));
        assert_eq!(status.status, HealthState::Degraded);
        assert!(status.reason.as_deref().unwrap().contains("end"));
        assert_eq!(status.topology.unwrap().end, None);
    }

    #[test]
    fn test_empty_topology_is_not_ready() {
        let status = HealthStatus::for_topology("route", "0.1.0", &Topology::default());
        assert_eq!(status.status, HealthState::NotReady);
        assert!(status.topology.is_none());
    }

    #[tokio::test]
    async fn test_health_ready_status_codes() {
        let ready = health_ready(State(AppState::from_topology(pair(true, true)))).await;
        assert_eq!(ready.status(), StatusCode::OK);

        let degraded = health_ready(State(AppState::from_topology(pair(false, true)))).await;
        assert_eq!(degraded.status(), StatusCode::OK);

        let empty = health_ready(State(AppState::from_topology(Topology::default()))).await;
        assert_eq!(empty.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
