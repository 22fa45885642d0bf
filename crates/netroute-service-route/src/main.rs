//! netroute route planning HTTP microservice.
//!
//! This service exposes the constrained all-shortest-paths planner over a
//! topology snapshot loaded at startup. Callers may also post an inline
//! topology with a request to route over it instead.
//!
//! # Endpoints
//!
//! - `POST /api/v1/route` - Every minimum-cost route, optionally through waypoints
//! - `GET /api/v1/topology` - Summary of the loaded topology
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//!
//! # Configuration
//!
//! - `NETROUTE_TOPOLOGY_PATH` - Topology JSON document (default: /data/network_topology.json)
//! - `NETROUTE_MAX_PATHS` - Upper bound on routes returned per request (default: 1000)
//! - `NETROUTE_CORS_PERMISSIVE` - Allow cross-origin requests from any origin (default: false)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)

use std::env;
use std::net::SocketAddr;

use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use netroute_lib::{NodeId, RoutePlan, Topology, plan_route};
use netroute_service_shared::{
    AppState, DEFAULT_SERVICE_MAX_PATHS, LoggingConfig, MetricsConfig, MetricsLayer,
    ProblemDetails, RequestId, RouteRequest, ServiceResponse, Validate, from_lib_error,
    health_live, health_ready, init_logging, init_metrics, metrics_handler,
    record_route_calculated, record_route_cost, record_route_failed, record_route_paths,
};

const DEFAULT_TOPOLOGY_PATH: &str = "/data/network_topology.json";
const DEFAULT_PORT: u16 = 8080;

/// Service settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ServiceConfig {
    topology_path: String,
    port: u16,
    max_paths: usize,
    cors_permissive: bool,
}

impl ServiceConfig {
    fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let topology_path =
            lookup("NETROUTE_TOPOLOGY_PATH").unwrap_or_else(|| DEFAULT_TOPOLOGY_PATH.to_string());
        let port = lookup("SERVICE_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let max_paths = lookup("NETROUTE_MAX_PATHS")
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(DEFAULT_SERVICE_MAX_PATHS);
        let cors_permissive = lookup("NETROUTE_CORS_PERMISSIVE")
            .is_some_and(|v| v.eq_ignore_ascii_case("true") || v == "1");

        Self {
            topology_path,
            port,
            max_paths,
            cors_permissive,
        }
    }
}

/// Route response returned to the caller.
#[derive(Debug, Serialize)]
struct RouteResponse {
    source: NodeId,
    destination: NodeId,
    /// Minimal cost, `null` when the destination cannot be reached.
    cost: Option<f64>,
    /// Every optimal route, each an ordered list of node ids.
    paths: Vec<Vec<NodeId>>,
    /// More optimal routes exist than were returned.
    truncated: bool,
    /// Waypoint node ids the constraints resolved to.
    waypoints: Vec<NodeId>,
    /// Waypoints the returned routes actually pass through.
    selected_waypoints: Vec<NodeId>,
    /// Constraint device ids exactly as requested.
    constraints: Vec<String>,
    /// Whether the loaded snapshot or an inline document was routed over.
    topology_source: TopologySource,
    topology: Topology,
}

impl RouteResponse {
    fn new(
        plan: RoutePlan,
        constraints: Vec<String>,
        topology_source: TopologySource,
        topology: Topology,
    ) -> Self {
        Self {
            source: plan.source,
            destination: plan.destination,
            cost: plan.cost,
            paths: plan.paths,
            truncated: plan.truncated,
            waypoints: plan.waypoints,
            selected_waypoints: plan.selected_waypoints,
            constraints,
            topology_source,
            topology,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum TopologySource {
    Loaded,
    Inline,
}

/// Summary of the loaded topology.
#[derive(Debug, Serialize)]
struct TopologyResponse {
    nodes: usize,
    connections: usize,
    start: Option<NodeId>,
    end: Option<NodeId>,
    /// Device ids usable as route constraints, sorted.
    devices: Vec<String>,
    max_paths: usize,
}

impl TopologyResponse {
    fn from_state(state: &AppState) -> Self {
        let topology = state.topology();
        let mut devices: Vec<String> = topology
            .nodes
            .iter()
            .filter_map(|node| node.device_id.clone())
            .collect();
        devices.sort();
        devices.dedup();

        Self {
            nodes: topology.nodes.len(),
            connections: topology.connections.len(),
            start: topology.start_node().ok(),
            end: topology.end_node().ok(),
            devices,
            max_paths: state.max_paths(),
        }
    }
}

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response<T> {
    Success(ServiceResponse<T>),
    Error(ProblemDetails),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(body) => body.into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("netroute-service-route");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    info!(
        topology_path = %config.topology_path,
        port = config.port,
        max_paths = config.max_paths,
        "starting route service"
    );

    let state = AppState::load(&config.topology_path)
        .map_err(|e| {
            error!(error = %e, path = %config.topology_path, "failed to load application state");
            e
        })?
        .with_max_paths(config.max_paths);

    info!(
        nodes = state.node_count(),
        connections = state.topology().connections.len(),
        "application state loaded"
    );

    let mut router = app(state, &metrics_config.path);
    if config.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn app(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/api/v1/route", post(route_handler))
        .route("/api/v1/topology", get(topology_handler))
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle POST /api/v1/route requests.
async fn route_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Response<RouteResponse> {
    let request_id = request_id.to_string();

    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            record_route_failed("validation_error");
            return Response::Error(ProblemDetails::bad_request(
                rejection.body_text(),
                &request_id,
            ));
        }
    };

    info!(
        constraints = ?request.constraints,
        from = ?request.from,
        to = ?request.to,
        inline_topology = request.topology.is_some(),
        "handling route request"
    );

    if let Err(problem) = request.validate(&request_id) {
        record_route_failed(problem.metric_reason());
        return Response::Error(*problem);
    }

    let lib_request = request.to_lib_request(state.max_paths());
    let constraints = request.constraints.clone();

    // Path enumeration is CPU-bound and may be large; keep it off the runtime workers.
    let planned = tokio::task::spawn_blocking(move || {
        let (topology, source) = match request.inline_topology() {
            Some(parsed) => (parsed?, TopologySource::Inline),
            None => (state.topology().clone(), TopologySource::Loaded),
        };
        let plan = plan_route(&topology, &lib_request)?;
        Ok::<_, netroute_lib::Error>((plan, source, topology))
    })
    .await;

    let (plan, source, topology) = match planned {
        Ok(Ok(planned)) => planned,
        Ok(Err(e)) => {
            warn!(error = %e, "route planning failed");
            let problem = from_lib_error(&e, &request_id);
            record_route_failed(problem.metric_reason());
            return Response::Error(problem);
        }
        Err(e) => {
            error!(error = %e, "route planning task did not complete");
            record_route_failed("internal");
            return Response::Error(ProblemDetails::internal_error(
                "Route planning did not complete",
                &request_id,
            ));
        }
    };

    let mode = if plan.waypoints.is_empty() {
        "direct"
    } else {
        "waypoint"
    };
    record_route_calculated(mode);
    record_route_paths(plan.paths.len(), mode);
    if let Some(cost) = plan.cost {
        record_route_cost(cost, mode);
    }

    info!(
        mode,
        cost = ?plan.cost,
        paths = plan.paths.len(),
        truncated = plan.truncated,
        "route computed successfully"
    );

    Response::Success(ServiceResponse::new(
        RouteResponse::new(plan, constraints, source, topology),
        request_id,
    ))
}

/// Handle GET /api/v1/topology requests.
async fn topology_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Response<TopologyResponse> {
    Response::Success(ServiceResponse::new(
        TopologyResponse::from_state(&state),
        request_id.to_string(),
    ))
}
