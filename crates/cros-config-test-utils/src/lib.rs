//! Shared test utilities for the cros-config workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`fixtures`]: the shared `test.yaml` source and the facts tests check against it
//! - [`workspace`]: [`TestWorkspace`] temporary directory helper

pub mod fixtures;
pub mod workspace;

pub use fixtures::{
    ANOTHER_BUCKET, ANOTHER_FIRMWARE_FILES, MODELS, RECORD_COUNT, SOME_BUCKET,
    SOME_FIRMWARE_FILES, TEST_YAML, fixture_path,
};
pub use workspace::TestWorkspace;
