//! The transform tool pipeline: read, flatten, validate, filter, write

use std::path::PathBuf;

use crate::filter::filter_build_elements;
use crate::flatten::{parse_source, to_canonical_json, transform_tree};
use crate::schema::{DEFAULT_SCHEMA, load_schema};
use crate::validate::{validate_config, validate_config_schema};
use crate::Result;

/// Inputs of one transform run.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// Schema file; the bundled schema when `None`.
    pub schema: Option<PathBuf>,
    /// Source config, or `-` for stdin.
    pub config: PathBuf,
    /// Artifact destination; the caller prints the artifact when `None`.
    pub output: Option<PathBuf>,
    /// Strip build-only elements before emitting.
    pub filter: bool,
}

/// Transform `source` and check it against `schema_text` and the
/// uniqueness rule, returning the canonical JSON artifact.
///
/// Filtering happens only after both validation passes succeed.
pub fn transform_and_validate(schema_text: &str, source: &str, filter: bool) -> Result<String> {
    let schema = load_schema(schema_text)?;
    let mut config = transform_tree(&parse_source(source)?)?;

    validate_config_schema(&schema, &config)?;
    validate_config(&config)?;

    if filter {
        filter_build_elements(&mut config);
    }
    to_canonical_json(&config)
}

/// Run the pipeline described by `options`.
///
/// The artifact is written to `options.output` when set; it is returned
/// either way. Nothing is written when any step fails.
pub fn run(options: &TransformOptions) -> Result<String> {
    let schema_text = match &options.schema {
        Some(path) => cros_config_fs::io::read_text(path)?,
        None => DEFAULT_SCHEMA.to_string(),
    };
    let source = cros_config_fs::io::read_text(&options.config)?;

    let artifact = transform_and_validate(&schema_text, &source, options.filter)?;

    if let Some(output) = &options.output {
        cros_config_fs::io::write_text(output, &artifact)?;
        tracing::info!(?output, filter = options.filter, "Wrote config artifact");
    }
    Ok(artifact)
}
