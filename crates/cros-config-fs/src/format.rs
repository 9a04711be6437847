//! Source format detection

use std::path::Path;

/// Magic number at the start of every flattened device-tree blob.
pub const FDT_MAGIC: [u8; 4] = [0xd0, 0x0d, 0xfe, 0xed];

/// Formats a configuration input can arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Hierarchical source (devices/products/skus or flat models)
    Yaml,
    /// Canonical flattened artifact
    Json,
    /// Compiled device-tree blob; decoding is done outside this workspace
    DeviceTree,
}

impl SourceFormat {
    /// Detect the format of `content` read from `path`.
    ///
    /// The file extension wins when it is recognised. Otherwise (including
    /// stdin) the content is sniffed: the device-tree magic, then a leading
    /// `{` for JSON, falling back to YAML.
    pub fn detect(path: &Path, content: &[u8]) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "yaml" | "yml" => Self::Yaml,
            "json" => Self::Json,
            "dtb" => Self::DeviceTree,
            _ => Self::sniff(content),
        }
    }

    /// Guess the format from the content alone.
    pub fn sniff(content: &[u8]) -> Self {
        if content.starts_with(&FDT_MAGIC) {
            return Self::DeviceTree;
        }
        match content.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => Self::Json,
            _ => Self::Yaml,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
            Self::DeviceTree => "device-tree",
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("config.yaml", b"{}", SourceFormat::Yaml)]
    #[case("config.YML", b"", SourceFormat::Yaml)]
    #[case("config.json", b"chromeos: {}", SourceFormat::Json)]
    #[case("config.dtb", b"", SourceFormat::DeviceTree)]
    fn test_extension_wins(#[case] path: &str, #[case] content: &[u8], #[case] expected: SourceFormat) {
        assert_eq!(SourceFormat::detect(Path::new(path), content), expected);
    }

    #[rstest]
    #[case(b"  \n{\"chromeos\": {}}", SourceFormat::Json)]
    #[case(b"chromeos:\n  models: []\n", SourceFormat::Yaml)]
    #[case(&[0xd0, 0x0d, 0xfe, 0xed, 0x00, 0x00], SourceFormat::DeviceTree)]
    #[case(b"", SourceFormat::Yaml)]
    fn test_sniff_stdin(#[case] content: &[u8], #[case] expected: SourceFormat) {
        assert_eq!(SourceFormat::detect(Path::new("-"), content), expected);
    }
}
