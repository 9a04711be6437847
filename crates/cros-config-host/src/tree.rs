//! Filesystem-shaped view of installed files, for packaging reports

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

/// Width of the size column in [`show_tree`] output.
const SIZE_WIDTH: usize = 10;

/// One directory or file in a [`FileTreeNode`] tree.
///
/// The root has an empty name and stands for `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTreeNode {
    pub name: String,
    pub children: BTreeMap<String, FileTreeNode>,
    /// Size in bytes, once resolved against a build root
    pub size: Option<u64>,
}

impl FileTreeNode {
    pub fn root() -> Self {
        Self::default()
    }

    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Build a tree holding every path in `paths`.
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a str>) -> Self {
        let mut root = Self::root();
        for path in paths {
            root.insert(path);
        }
        root
    }

    /// Add an absolute path, creating intermediate directories.
    pub fn insert(&mut self, path: &str) {
        let mut node = self;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            node = node
                .children
                .entry(part.to_string())
                .or_insert_with(|| Self::named(part));
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Look up a node by absolute path; `/` is the root itself.
    pub fn get(&self, path: &str) -> Option<&FileTreeNode> {
        path.split('/')
            .filter(|p| !p.is_empty())
            .try_fold(self, |node, part| node.children.get(part))
    }

    /// Fill in leaf sizes from files under `root_dir`.
    ///
    /// Leaves that do not exist there keep no size.
    pub fn resolve_sizes(&mut self, root_dir: &Path) {
        for child in self.children.values_mut() {
            let path = root_dir.join(&child.name);
            if child.is_leaf() {
                child.size = std::fs::metadata(&path)
                    .ok()
                    .filter(|m| m.is_file())
                    .map(|m| m.len());
            } else {
                child.resolve_sizes(&path);
            }
        }
    }
}

/// Write `tree` as an indented listing with a size column.
///
/// Directories end in `/` and have no size. Leaves show their size, or
/// `missing` when it is unknown.
pub fn show_tree(out: &mut impl Write, tree: &FileTreeNode) -> io::Result<()> {
    writeln!(out, "{:<SIZE_WIDTH$}Path", "Size")?;
    writeln!(out, "{:<SIZE_WIDTH$}/", "")?;
    for child in tree.children.values() {
        show_node(out, child, 1)?;
    }
    Ok(())
}

fn show_node(out: &mut impl Write, node: &FileTreeNode, depth: usize) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    if node.is_leaf() {
        let size = node
            .size
            .map(|s| s.to_string())
            .unwrap_or_else(|| "missing".to_string());
        writeln!(out, "{size:<SIZE_WIDTH$}{indent}{}", node.name)?;
    } else {
        writeln!(out, "{:<SIZE_WIDTH$}{indent}{}/", "", node.name)?;
        for child in node.children.values() {
            show_node(out, child, depth + 1)?;
        }
    }
    Ok(())
}
