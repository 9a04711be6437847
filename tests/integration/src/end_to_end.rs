//! End-to-end tests for the full flow
//!
//! Source YAML -> flatten -> validate -> write artifact -> load -> query.

use cros_config_host::{CrosConfig, Error as HostError};
use cros_config_schema::{DEFAULT_SCHEMA, TransformOptions, run, transform_and_validate};
use cros_config_test_utils::{
    ANOTHER_BUCKET, ANOTHER_FIRMWARE_FILES, MODELS, SOME_BUCKET, SOME_FIRMWARE_FILES, TEST_YAML,
    TestWorkspace,
};
use pretty_assertions::assert_eq;

/// Transform the fixture into `config.json` and load it back.
fn load_artifact(ws: &TestWorkspace, filter: bool) -> CrosConfig {
    let options = TransformOptions {
        schema: None,
        config: ws.write_fixture(),
        output: Some(ws.path("build/config.json")),
        filter,
    };
    run(&options).unwrap();
    CrosConfig::from_path(&ws.path("build/config.json")).unwrap()
}

#[test]
fn test_artifact_answers_queries() {
    let ws = TestWorkspace::new();
    let config = load_artifact(&ws, false);

    assert_eq!(config.model_list(), MODELS);

    let mut expected: Vec<String> = ANOTHER_FIRMWARE_FILES
        .iter()
        .map(|f| format!("{ANOTHER_BUCKET}{f}"))
        .chain(SOME_FIRMWARE_FILES.iter().map(|f| format!("{SOME_BUCKET}{f}")))
        .collect();
    expected.sort();
    assert_eq!(config.firmware_uris().unwrap(), expected);

    assert_eq!(
        config.firmware_build_targets("coreboot", None).unwrap(),
        vec!["another", "some"]
    );
    assert_eq!(
        config.firmware_build_targets("coreboot", Some("another")).unwrap(),
        vec!["another"]
    );
}

#[test]
fn test_artifact_matches_source_load() {
    let ws = TestWorkspace::new();
    let from_artifact = load_artifact(&ws, false);
    let from_source = CrosConfig::from_yaml_str(TEST_YAML).unwrap();

    assert_eq!(from_artifact.model_list(), from_source.model_list());
    assert_eq!(from_artifact.audio_files(), from_source.audio_files());
    assert_eq!(
        from_artifact.touch_firmware_files(),
        from_source.touch_firmware_files()
    );
    assert_eq!(
        from_artifact.firmware_info().unwrap(),
        from_source.firmware_info().unwrap()
    );
}

#[test]
fn test_whitelabel_inherits_shared_firmware() {
    let ws = TestWorkspace::new();
    let config = load_artifact(&ws, false);

    let info = config.firmware_info().unwrap();
    let some = &info["some"];
    let wl = &info["whitelabel-whitelabel1"];

    assert_eq!(wl.shared_model, "some");
    assert_eq!(wl.bios_build_target, some.bios_build_target);
    assert_eq!(wl.main_image_uri, some.main_image_uri);
    assert_eq!(wl.key_id, "WHITELABEL1");
    assert_eq!(wl.brand_code, "WLBA");
    assert!(!wl.have_image);
    assert!(info["whitelabel"].have_image);

    let by_device = config.firmware_configs_by_device().unwrap();
    assert_eq!(by_device["whitelabel-whitelabel2"], "some");
    assert_eq!(by_device["another"], "another");
}

#[test]
fn test_filtered_artifact_drops_firmware() {
    let ws = TestWorkspace::new();
    let config = load_artifact(&ws, true);

    assert_eq!(config.model_list(), MODELS);
    assert!(config.firmware_info().unwrap().is_empty());
    assert!(config.firmware_uris().unwrap().is_empty());
    assert!(matches!(
        config.get_property("some", "/audio/main", "card"),
        Err(HostError::PropertyNotFound { .. })
    ));
    assert_eq!(
        config.wallpaper_files(),
        vec!["default", "some", "wallpaper-wl1", "wallpaper-wl2"]
    );
}

#[test]
fn test_artifact_is_a_fixed_point() {
    let ws = TestWorkspace::new();
    load_artifact(&ws, false);
    let first = ws.read("build/config.json");

    let second = transform_and_validate(DEFAULT_SCHEMA, &first, false).unwrap();
    assert_eq!(second, first);
}

#[test]
fn test_file_tree_covers_every_category() {
    let ws = TestWorkspace::new();
    let config = load_artifact(&ws, false);

    let tree = config.file_tree();
    assert_eq!(
        tree.children.keys().collect::<Vec<_>>(),
        vec!["etc", "lib", "opt", "usr"]
    );
    assert!(tree.get("/etc/dptf/some_touch/dptf.dv").is_some());
    assert!(tree.get("/opt/google/touch/firmware/some_stylus_vendor").is_some());
    assert!(tree.get("/etc/some_hardware_features.xml").is_some());
    assert!(tree.get("/usr/share/alsa/ucm/a-card.some/HiFi.conf").is_some());
}

#[test]
fn test_failed_transform_leaves_no_artifact() {
    let ws = TestWorkspace::new();
    let source = ws.write(
        "bad.yaml",
        "chromeos:\n  devices:\n    - $name: x\n      products:\n        - {}\n      skus:\n        - config: {name: \"{{$missing}}\", identity: {sku-id: 1}}\n",
    );

    let options = TransformOptions {
        config: source,
        output: Some(ws.path("build/config.json")),
        ..TransformOptions::default()
    };
    assert!(run(&options).is_err());
    ws.assert_file_not_exists("build/config.json");

    assert!(matches!(
        CrosConfig::from_path(&ws.path("build/config.json")),
        Err(HostError::Fs(_))
    ));
}
