//! Test helper modules for tsp-provider integration tests
//!
//! - MockSidecar: in-process stand-in for the sidecar's invoke/state/publish APIs

pub mod mock_sidecar;

pub use mock_sidecar::{MockBehavior, MockSidecar, Stage};
