//! Removal of build-only elements from the runtime artifact

use serde_json::{Map, Value};

use crate::flatten::{CHROMEOS, MODELS};

/// Paths, relative to each model record, only the build needs.
pub const BUILD_ONLY_ELEMENTS: &[&str] = &[
    "/firmware",
    "/audio/main/card",
    "/audio/main/cras-config-dir",
    "/audio/main/files",
];

/// Strip build-only elements from every model of a canonical config document.
pub fn filter_build_elements(config: &mut Value) {
    let Some(models) = config
        .get_mut(CHROMEOS)
        .and_then(|c| c.get_mut(MODELS))
        .and_then(Value::as_array_mut)
    else {
        return;
    };

    for model in models {
        if let Value::Object(map) = model {
            filter_mapping(map, "");
        }
    }
}

fn filter_mapping(map: &mut Map<String, Value>, path: &str) {
    let mut to_delete = Vec::new();
    for (key, value) in map.iter_mut() {
        let full_path = format!("{path}/{key}");
        if BUILD_ONLY_ELEMENTS.contains(&full_path.as_str()) {
            to_delete.push(key.clone());
        } else if let Value::Object(child) = value {
            filter_mapping(child, &full_path);
        }
    }

    for key in to_delete {
        map.remove(&key);
    }
}
