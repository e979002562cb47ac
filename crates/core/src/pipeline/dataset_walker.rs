use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("directory not found: {0}")]
    MissingRoot(PathBuf),
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load image {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },
}

/// Training images grouped under one label directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelEntry {
    pub label: String,
    pub images: Vec<PathBuf>,
}

/// Lists `root/<label>/<file>` entries in lexicographic path order.
///
/// Files directly under `root` and directories nested inside a label are
/// skipped. A label directory with no files still yields an entry.
pub fn label_entries(root: &Path) -> Result<Vec<LabelEntry>, DatasetError> {
    let mut entries = Vec::new();
    for label_dir in sorted_children(root)? {
        if !label_dir.is_dir() {
            continue;
        }
        let label = match label_dir.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        let images = sorted_children(&label_dir)?
            .into_iter()
            .filter(|p| p.is_file())
            .collect();
        entries.push(LabelEntry { label, images });
    }
    Ok(entries)
}

/// Every regular file under `root` at any depth, in lexicographic path order.
///
/// Symlinks are not followed, so a link back to an ancestor cannot repeat
/// the tree.
pub fn files_recursive(root: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    check_root(root)?;
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| DatasetError::ReadDir {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e.into(),
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    check_root(dir)?;
    let mut children = read_dir(dir)?;
    children.sort();
    Ok(children)
}

fn check_root(dir: &Path) -> Result<(), DatasetError> {
    if !dir.exists() {
        return Err(DatasetError::MissingRoot(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(DatasetError::NotADirectory(dir.to_path_buf()));
    }
    Ok(())
}

fn read_dir(dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    let read_err = |e| DatasetError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    };
    fs::read_dir(dir)
        .map_err(read_err)?
        .map(|entry| entry.map(|e| e.path()).map_err(read_err))
        .collect()
}
