//! The doc command: render schema type tables into a Markdown file

use std::io::Write;
use std::path::Path;

use cros_config_schema::doc::{generate_schema_doc, splice_definitions};
use cros_config_schema::{DEFAULT_SCHEMA, load_schema};

use crate::error::Result;

/// Render the definitions block for `schema` (the bundled schema when
/// `None`).
///
/// With `output`, the block replaces the definitions section of that file,
/// creating it when needed. Otherwise the block goes to `out`.
pub fn run_generate_doc(
    schema: Option<&Path>,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let schema_text = match schema {
        Some(path) => cros_config_fs::io::read_text(path)?,
        None => DEFAULT_SCHEMA.to_string(),
    };
    let block = generate_schema_doc(&load_schema(&schema_text)?)?;

    let Some(output) = output else {
        write!(out, "{block}")?;
        return Ok(());
    };

    let existing = if output.exists() {
        Some(cros_config_fs::io::read_text(output)?)
    } else {
        None
    };
    let document = splice_definitions(existing.as_deref(), &block);
    cros_config_fs::io::write_text(output, &document)?;
    tracing::info!(?output, "Updated schema documentation");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cros_config_test_utils::TestWorkspace;

    #[test]
    fn test_doc_to_writer() {
        let mut out = Vec::new();
        run_generate_doc(None, None, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("[](begin_definitions)"));
        assert!(text.contains("| Attribute | Type"));
    }

    #[test]
    fn test_doc_keeps_surrounding_text() {
        let ws = TestWorkspace::new();
        let readme = ws.write(
            "README.md",
            "# Intro\n[](begin_definitions)\nstale\n[](end_definitions)\n# Outro\n",
        );

        let mut out = Vec::new();
        run_generate_doc(None, Some(&readme), &mut out).unwrap();

        assert!(out.is_empty());
        let text = ws.read("README.md");
        assert!(text.starts_with("# Intro\n[](begin_definitions)"));
        assert!(text.ends_with("# Outro\n"));
        assert!(!text.contains("stale"));
    }

    #[test]
    fn test_doc_creates_missing_output() {
        let ws = TestWorkspace::new();
        let path = ws.path("docs/schema.md");

        run_generate_doc(None, Some(&path), &mut Vec::new()).unwrap();
        ws.assert_file_contains("docs/schema.md", "[](end_definitions)");
    }
}
