//! Directory hierarchies loaded into an [`ArenaTree`]

use crate::tree::{ArenaTree, Node, NodeId, NodeKind, Tree};
use anyhow::{bail, Context, Result};
use log::{debug, trace};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Metadata for filesystem nodes
#[derive(Debug, Clone, Default)]
pub struct FileData {
    /// Full path on the filesystem
    pub path: PathBuf,
    /// File size in bytes (0 for directories)
    pub size: u64,
    /// Last modified timestamp
    pub modified: Option<SystemTime>,
    /// File extension (if any)
    pub extension: Option<String>,
}

impl FileData {
    /// True when the file carries the given extension (case-sensitive)
    pub fn has_extension(&self, ext: &str) -> bool {
        self.extension.as_deref() == Some(ext)
    }
}

/// Load the directory at `path` and everything below it
///
/// Directories come before files, each group sorted by name. Symbolic links
/// are recorded as leaves and never followed, so the result is always a
/// finite tree.
///
/// # Errors
///
/// Returns an error if `path` is not a readable directory or if any entry
/// below it cannot be read.
pub fn load_directory(path: impl AsRef<Path>) -> Result<ArenaTree<FileData>> {
    let path = path.as_ref();
    let metadata =
        fs::metadata(path).with_context(|| format!("reading metadata of {}", path.display()))?;
    if !metadata.is_dir() {
        bail!("{} is not a directory", path.display());
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("root")
        .to_string();

    let mut tree = ArenaTree::new();
    let root = tree.add_root(Node::container(
        name,
        FileData {
            path: path.to_path_buf(),
            size: 0,
            modified: metadata.modified().ok(),
            extension: None,
        },
    ));

    let mut pending = vec![(root, path.to_path_buf())];
    while let Some((id, dir)) = pending.pop() {
        for (entry_path, node) in read_entries(&dir)? {
            let is_dir = node.is_container();
            let child = tree.add_child(id, node);
            if is_dir {
                pending.push((child, entry_path));
            }
        }
    }

    debug!("loaded {} nodes from {}", tree.node_count(), path.display());
    Ok(tree)
}

/// Read one directory level, sorted directories first
fn read_entries(dir: &Path) -> Result<Vec<(PathBuf, Node<FileData>)>> {
    trace!("reading {}", dir.display());
    let mut entries = Vec::new();

    let listing =
        fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;
    for entry in listing {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        let entry_path = entry.path();
        let file_type = entry.file_type()?;
        let metadata = entry
            .metadata()
            .with_context(|| format!("reading metadata of {}", entry_path.display()))?;

        let kind = if file_type.is_dir() {
            NodeKind::Container
        } else {
            NodeKind::Leaf
        };

        let extension = if kind.is_leaf() {
            entry_path
                .extension()
                .and_then(|e| e.to_str())
                .map(|s| s.to_string())
        } else {
            None
        };

        let data = FileData {
            path: entry_path.clone(),
            size: if kind.is_leaf() { metadata.len() } else { 0 },
            modified: metadata.modified().ok(),
            extension,
        };
        let name = entry.file_name().to_string_lossy().to_string();
        entries.push((entry_path, Node::new(name, kind, data)));
    }

    entries.sort_by(|(_, a), (_, b)| match (a.kind, b.kind) {
        (NodeKind::Container, NodeKind::Leaf) => Ordering::Less,
        (NodeKind::Leaf, NodeKind::Container) => Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });

    Ok(entries)
}

/// Path of a node relative to the loaded root
pub fn relative_path(tree: &ArenaTree<FileData>, id: NodeId) -> Option<PathBuf> {
    let root = tree.root_at(0)?;
    let full = &tree.get(id)?.data.path;
    let base = &tree.get(root)?.data.path;
    full.strip_prefix(base).ok().map(Path::to_path_buf)
}
