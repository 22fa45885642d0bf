//! Test utilities for microservice handler testing.
//!
//! This module provides fixtures and helpers for testing HTTP handlers
//! against the checked-in lab topology.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::state::AppState;

/// Path to the lab topology fixture.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/lab_topology.json"
);

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Get a shared test AppState loaded from the lab topology.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded. This indicates a test
/// configuration issue.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            let path = PathBuf::from(TEST_FIXTURE_PATH);
            AppState::load(&path)
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e))
        })
        .clone()
}

/// Get the absolute path to the lab topology fixture.
pub fn fixture_topology_path() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_PATH)
}

/// Known ids in the lab topology for use in tests.
pub mod fixture_nodes {
    /// Node flagged `start`.
    pub const HOST: &str = "host-a";
    /// Node flagged `end`.
    pub const DATABASE: &str = "srv-db";
    /// Core switch on both optimal unconstrained routes.
    pub const CORE: &str = "core-1";
    /// Device id of the first firewall, which forces a cost-4 detour.
    pub const FIREWALL_DEVICE: &str = "fw-edge-01";
    /// Device id of the isolated management node.
    pub const ISOLATED_DEVICE: &str = "oob-01";
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", crate::RequestId::generate())
}
