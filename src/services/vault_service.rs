use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, span, Level};
use uuid::Uuid;

use crate::error::ScanError;
use crate::paths::{canonical_to_string, join_path};

// Metadata directories that never appear in the scanned forest, at any depth.
const RESERVED_DIRS: [&str; 1] = [".obsidian"];

/// One node of the scanned vault forest. `children` is `Some` exactly when
/// the node is a directory; an unreadable directory comes back with an empty
/// child list. `is_open` is UI expansion state and is only ever mutated by
/// [`crate::services::tree_view::TreeViewState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTreeNode {
    pub name: String,
    pub path: String,
    pub is_directory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileTreeNode>>,
    #[serde(default)]
    pub is_open: bool,
}

// One entry of a directory listing, as supplied by a `DirectoryLister`.
#[derive(Debug, Clone)]
pub struct DirEntryInfo {
    pub name: String,
    pub is_directory: bool,
}

/// Listing primitive the indexer walks with. The traversal and its
/// isolate-and-continue policy live in this module; how a directory is read
/// is injected, so tests can fail specific subtrees.
pub trait DirectoryLister {
    fn list(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>>;
}

/// Directory listing backed by `std::fs`.
pub struct FsDirectoryLister;

impl DirectoryLister for FsDirectoryLister {
    fn list(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("skipping unreadable entry in {}: {err}", path.display());
                    continue;
                }
            };
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    log::warn!(
                        "skipping entry with unreadable metadata in {}: {err}",
                        path.display()
                    );
                    continue;
                }
            };
            entries.push(DirEntryInfo {
                name: entry.file_name().to_string_lossy().to_string(),
                is_directory: file_type.is_dir(),
            });
        }
        Ok(entries)
    }
}

/// Scans the vault under `root` with the OS lister.
pub fn scan_vault(root: &Path) -> Result<Vec<FileTreeNode>, ScanError> {
    scan_vault_with(&FsDirectoryLister, root)
}

/// Builds the full forest under `root`. Only the root listing failing is a
/// hard error; anything deeper is absorbed into the affected node so one
/// unreadable subtree never aborts the scan.
pub fn scan_vault_with<L: DirectoryLister>(
    lister: &L,
    root: &Path,
) -> Result<Vec<FileTreeNode>, ScanError> {
    let op_id = Uuid::new_v4().to_string();
    let span = span!(Level::INFO, "vault.scan", op_id = op_id);
    let _enter = span.enter();

    let start = Instant::now();
    let result = lister
        .list(root)
        .map_err(|err| ScanError::RootUnreadable {
            path: canonical_to_string(root),
            source: err,
        })
        .map(|entries| scan_entries(lister, root, entries));
    let elapsed = start.elapsed();

    match &result {
        Ok(forest) => {
            info!(
                "vault.scan succeeded: top_level_nodes={}, elapsed_ms={}",
                forest.len(),
                elapsed.as_millis()
            );
        }
        Err(err) => {
            error!("vault.scan failed: error={}, elapsed_ms={}", err, elapsed.as_millis());
        }
    }

    result
}

fn scan_entries<L: DirectoryLister>(
    lister: &L,
    base: &Path,
    entries: Vec<DirEntryInfo>,
) -> Vec<FileTreeNode> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in entries {
        if RESERVED_DIRS.iter().any(|dir| *dir == entry.name) {
            continue;
        }

        let entry_path = match join_path(base, &entry.name) {
            Ok(path) => path,
            Err(err) => {
                log::warn!("skipping entry under {}: {err}", base.display());
                continue;
            }
        };
        let path = canonical_to_string(&entry_path);

        if entry.is_directory {
            let children = match lister.list(&entry_path) {
                Ok(sub_entries) => scan_entries(lister, &entry_path, sub_entries),
                Err(err) => {
                    log::warn!("could not read directory {path}: {err}");
                    Vec::new()
                }
            };
            dirs.push(FileTreeNode {
                name: entry.name,
                path,
                is_directory: true,
                children: Some(children),
                is_open: false,
            });
        } else {
            files.push(FileTreeNode {
                name: entry.name,
                path,
                is_directory: false,
                children: None,
                is_open: false,
            });
        }
    }

    // Directories first, then files, each case-insensitively by name. Applied
    // at every level so the forest never depends on filesystem iteration
    // order.
    dirs.sort_by_key(|node| node.name.to_lowercase());
    files.sort_by_key(|node| node.name.to_lowercase());
    dirs.extend(files);

    dirs
}

/// Display bucket for a node. Advisory metadata only; never affects
/// structure or ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Directory,
    Markdown,
    Pdf,
    Image,
    Other,
}

impl Display for FileCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FileCategory::Directory => write!(f, "directory"),
            FileCategory::Markdown => write!(f, "markdown"),
            FileCategory::Pdf => write!(f, "pdf"),
            FileCategory::Image => write!(f, "image"),
            FileCategory::Other => write!(f, "file"),
        }
    }
}

pub fn file_category(node: &FileTreeNode) -> FileCategory {
    if node.is_directory {
        return FileCategory::Directory;
    }
    let extension = Path::new(&node.name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("md") => FileCategory::Markdown,
        Some("pdf") => FileCategory::Pdf,
        Some("jpg" | "jpeg" | "png" | "gif") => FileCategory::Image,
        _ => FileCategory::Other,
    }
}
