//! Pipeline tests over the shared fixture

use cros_config_schema::{
    DEFAULT_SCHEMA, Error, TransformOptions, run, transform_and_validate, transform_config,
};
use cros_config_test_utils::{TEST_YAML, TestWorkspace, fixtures};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Value, json};

fn models(artifact: &str) -> Vec<Value> {
    let value: Value = serde_json::from_str(artifact).unwrap();
    value["chromeos"]["models"].as_array().unwrap().clone()
}

#[test]
fn test_fixture_flattens_and_validates() {
    let artifact = transform_and_validate(DEFAULT_SCHEMA, TEST_YAML, false).unwrap();
    let models = models(&artifact);

    assert_eq!(models.len(), fixtures::RECORD_COUNT);
    let names: Vec<&str> = models.iter().filter_map(|m| m["name"].as_str()).collect();
    assert_eq!(
        names,
        vec![
            "another",
            "some",
            "some",
            "some2",
            "whitelabel",
            "whitelabel-whitelabel1",
            "whitelabel-whitelabel2",
        ]
    );
}

#[test]
fn test_fixture_resolves_templates() {
    let models = models(&transform_config(TEST_YAML).unwrap());
    let another = &models[0];

    assert_eq!(another["identity"]["sku-id"], json!(1));
    assert_eq!(
        another["firmware"]["bcs-overlay"],
        json!("overlay-another-private")
    );
    assert_eq!(
        another["firmware"]["build-targets"]["ec-extras"],
        json!(["another_base", "extra1", "extra2"])
    );
    assert_eq!(
        another["touch"]["stylus"]["firmware-symlink"],
        json!("some_stylus_vendor_firmware_ANOTHER.bin")
    );

    let wl2 = &models[6];
    assert_eq!(wl2["identity"]["sku-id"], json!(10));
    assert_eq!(wl2["brand-code"], json!("WLBB"));
    assert_eq!(wl2["wallpaper"], json!("wallpaper-wl2"));
}

#[test]
fn test_fixture_output_has_no_template_only_keys() {
    let artifact = transform_config(TEST_YAML).unwrap();
    assert!(!artifact.contains("\"$"), "template-only key leaked");
    assert!(!artifact.contains("{{"), "placeholder leaked");
}

#[test]
fn test_filter_removes_firmware_after_validation() {
    let artifact = transform_and_validate(DEFAULT_SCHEMA, TEST_YAML, true).unwrap();
    for model in models(&artifact) {
        assert!(model.get("firmware").is_none());
        if let Some(main) = model.pointer("/audio/main") {
            assert!(main.get("card").is_none());
            assert!(main.get("cras-config-dir").is_none());
            assert!(main.get("ucm-suffix").is_some());
        }
    }
}

#[test]
fn test_duplicate_identity_fails() {
    let source = r#"
chromeos:
  devices:
    - $name: "dup"
      products: [{}, {}]
      skus:
        - config:
            name: "{{$name}}"
            identity: {sku-id: 7}
"#;
    match transform_and_validate(DEFAULT_SCHEMA, source, false).unwrap_err() {
        Error::Uniqueness {
            identities,
            duplicates,
        } => {
            assert_eq!(identities.len(), 2);
            assert_eq!(duplicates, vec![r#"{"sku-id":7}"#.to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_schema_violation_fails() {
    let source = "chromeos:\n  models:\n    - {name: Bad Name, identity: {sku-id: 1}}\n";
    assert!(matches!(
        transform_and_validate(DEFAULT_SCHEMA, source, false),
        Err(Error::SchemaValidation { .. })
    ));
}

#[test]
fn test_run_writes_output() {
    let ws = TestWorkspace::new();
    let config = ws.write_fixture();
    let options = TransformOptions {
        schema: None,
        config,
        output: Some(ws.path("out/config.json")),
        filter: false,
    };

    let artifact = run(&options).unwrap();

    assert_eq!(ws.read("out/config.json"), artifact);
}

#[test]
fn test_run_writes_nothing_on_failure() {
    let ws = TestWorkspace::new();
    let config = ws.write(
        "bad.yaml",
        "chromeos:\n  devices:\n    - products: [{}]\n      skus:\n        - config: {name: \"{{$missing}}\"}\n",
    );
    let options = TransformOptions {
        schema: None,
        config,
        output: Some(ws.path("config.json")),
        filter: false,
    };

    assert!(matches!(run(&options), Err(Error::TemplateVariable { .. })));
    ws.assert_file_not_exists("config.json");
}

#[test]
fn test_run_with_custom_schema() {
    let ws = TestWorkspace::new();
    let schema = ws.write("schema.json", r#"{"type": "object", "required": ["nothing"]}"#);
    let options = TransformOptions {
        schema: Some(schema),
        config: ws.write_fixture(),
        output: None,
        filter: false,
    };
    assert!(matches!(run(&options), Err(Error::SchemaValidation { .. })));
}

#[test]
fn test_missing_config_file_is_fs_error() {
    let ws = TestWorkspace::new();
    let options = TransformOptions {
        config: ws.path("absent.yaml"),
        ..Default::default()
    };
    assert!(matches!(run(&options), Err(Error::Fs(_))));
}

#[test]
fn test_transform_is_deterministic() {
    assert_eq!(
        transform_config(TEST_YAML).unwrap(),
        transform_config(TEST_YAML).unwrap()
    );
}

#[test]
fn test_transform_is_idempotent_on_fixture() {
    let once = transform_config(TEST_YAML).unwrap();
    assert_eq!(transform_config(&once).unwrap(), once);
}

proptest! {
    #[test]
    fn prop_flatten_is_idempotent(
        records in prop::collection::vec(("[a-z][a-z0-9-]{0,8}", 0i64..1000), 1..6)
    ) {
        let source = r#"
chromeos:
  devices:
    - products: [{}]
      skus:
"#
        .to_string()
            + &records
                .iter()
                .map(|(name, sku)| {
                    format!(
                        "        - $sku-id: {sku}\n          config:\n            name: \"{name}\"\n            identity: {{sku-id: \"{{{{$sku-id}}}}\"}}\n"
                    )
                })
                .collect::<String>();

        let once = transform_config(&source).unwrap();
        let twice = transform_config(&once).unwrap();
        prop_assert_eq!(twice, once);
    }
}
