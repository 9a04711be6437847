//! The shared `test-fixtures/test.yaml` source.
//!
//! The fixture describes five devices that flatten into seven SKU records
//! for six models: `another`, `some` (two SKUs), `some2`, `whitelabel`,
//! `whitelabel-whitelabel1` and `whitelabel-whitelabel2`.

use std::path::PathBuf;

/// Contents of `test-fixtures/test.yaml`.
pub const TEST_YAML: &str = include_str!("../../../test-fixtures/test.yaml");

/// Model names of the fixture, sorted.
pub const MODELS: &[&str] = &[
    "another",
    "some",
    "some2",
    "whitelabel",
    "whitelabel-whitelabel1",
    "whitelabel-whitelabel2",
];

/// Number of SKU records the fixture flattens into.
pub const RECORD_COUNT: usize = 7;

pub const ANOTHER_BUCKET: &str = "gs://chromeos-binaries/HOME/bcs-another-private/overlay-another-private/chromeos-base/chromeos-firmware-another/";
pub const SOME_BUCKET: &str = "gs://chromeos-binaries/HOME/bcs-some-private/overlay-some-private/chromeos-base/chromeos-firmware-some/";

pub const ANOTHER_FIRMWARE_FILES: &[&str] = &[
    "Another.1111.11.1.tbz2",
    "Another_EC.1111.11.1.tbz2",
    "Another_RW.1111.11.1.tbz2",
];
pub const SOME_FIRMWARE_FILES: &[&str] = &[
    "Some.1111.11.1.tbz2",
    "Some_EC.1111.11.1.tbz2",
    "Some_RW.1111.11.1.tbz2",
];

/// Absolute path of `test-fixtures/test.yaml`.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/test.yaml")
}
