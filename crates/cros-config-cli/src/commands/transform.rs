//! The transform command: flatten, validate and emit the config artifact

use std::io::Write;

use cros_config_schema::TransformOptions;

use crate::error::Result;

/// Run the transform pipeline.
///
/// The artifact goes to `options.output` when set, otherwise to `out`.
pub fn run_transform(options: &TransformOptions, out: &mut impl Write) -> Result<()> {
    let artifact = cros_config_schema::run(options)?;
    if options.output.is_none() {
        writeln!(out, "{artifact}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cros_config_test_utils::{TEST_YAML, TestWorkspace};

    #[test]
    fn test_transform_to_writer() {
        let ws = TestWorkspace::new();
        let config = ws.write("config.yaml", TEST_YAML);

        let options = TransformOptions {
            config,
            ..TransformOptions::default()
        };
        let mut out = Vec::new();
        run_transform(&options, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('{'));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_transform_to_file_prints_nothing() {
        let ws = TestWorkspace::new();
        let config = ws.write("config.yaml", TEST_YAML);

        let options = TransformOptions {
            config,
            output: Some(ws.path("out/config.json")),
            filter: true,
            ..TransformOptions::default()
        };
        let mut out = Vec::new();
        run_transform(&options, &mut out).unwrap();

        assert!(out.is_empty());
        ws.assert_file_contains("out/config.json", "\"chromeos\"");
    }
}
