use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::config::SourceConfig;
use crate::errors::SelectionError;
use crate::types::ExtensionList;

/// Filesystem scan that lists files under a root matching an extension filter.
///
/// Output order is deterministic for a given filesystem state: entries are
/// visited depth-first with each directory sorted by file name. Files reached
/// more than once (symlinks, hard-to-spot aliases) are kept only at their first
/// position, compared by canonical path.
pub struct CandidateScan {
    root: PathBuf,
    extensions: ExtensionList,
    recursive: bool,
    follow_links: bool,
}

impl CandidateScan {
    /// Create a non-recursive scan of `root` for the given lowercased suffixes.
    pub fn new(root: impl Into<PathBuf>, extensions: ExtensionList) -> Self {
        Self {
            root: root.into(),
            extensions,
            recursive: false,
            follow_links: false,
        }
    }

    /// Configure descent into subdirectories.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Configure symlinked-directory traversal.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// True if `name` ends with one of the configured suffixes, ignoring case.
    pub fn matches(&self, name: &OsStr) -> bool {
        let name = name.to_string_lossy().to_lowercase();
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// Walk the root and return matching files. Walk errors fail the scan.
    pub fn collect(&self) -> Result<Vec<PathBuf>, SelectionError> {
        let mut walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(self.follow_links)
            .sort_by_file_name();
        if !self.recursive {
            walker = walker.max_depth(1);
        }

        let mut seen: HashSet<PathBuf> = HashSet::new();
        let mut candidates = Vec::new();
        for entry in walker {
            let entry = entry.map_err(io::Error::from)?;
            let path = entry.path();
            if !path.is_file() || !self.matches(entry.file_name()) {
                continue;
            }
            let identity = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
            if seen.insert(identity) {
                candidates.push(path.to_path_buf());
            } else {
                trace!(path = %path.display(), "skipping duplicate candidate");
            }
        }
        Ok(candidates)
    }
}

/// List every eligible file for `config`.
///
/// Checks run in a fixed order: the folder must be a directory
/// (`FolderNotFound`), the extension filter must be non-blank
/// (`InvalidConfig`), and at least one file must match (`NoCandidates`).
pub fn enumerate_candidates(config: &SourceConfig) -> Result<Vec<PathBuf>, SelectionError> {
    ensure_folder(&config.folder)?;
    let extensions = config.parsed_extensions()?;
    let scan = CandidateScan::new(&config.folder, extensions)
        .with_recursive(config.recursive)
        .with_follow_links(config.follow_links);
    let candidates = scan.collect()?;
    if candidates.is_empty() {
        return Err(SelectionError::NoCandidates {
            folder: config.folder.clone(),
            extensions: scan.extensions,
        });
    }
    debug!(
        folder = %config.folder.display(),
        recursive = config.recursive,
        candidates = candidates.len(),
        "enumerated text candidates"
    );
    Ok(candidates)
}

fn ensure_folder(folder: &Path) -> Result<(), SelectionError> {
    if folder.is_dir() {
        Ok(())
    } else {
        Err(SelectionError::FolderNotFound {
            folder: folder.to_path_buf(),
        })
    }
}
