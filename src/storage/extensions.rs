//! Extension expansion
//!
//! Maps an extension-less path such as `demo/home` onto `demo/home.md` when
//! one of the recognised extensions exists on disk.

use log::debug;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ResolverConfig;

/// Probes recognised extensions in priority order
#[derive(Debug, Clone)]
pub struct ExtensionResolver {
    extensions: Vec<String>,
}

impl ExtensionResolver {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            extensions: config.expand_extensions().to_vec(),
        }
    }

    /// Return the on-disk path for `path` plus the first recognised extension
    /// present among the files sharing its stem, or `None`.
    ///
    /// Files with an unrecognised extension are never served this way.
    pub fn expand(&self, path: &Path) -> Option<PathBuf> {
        let stem = path.file_name()?.to_str()?;
        let parent = path.parent()?;

        let present = candidate_suffixes(parent, stem);
        if present.is_empty() {
            debug!("No candidates for {}", path.display());
            return None;
        }

        let ext = self.extensions.iter().find(|ext| present.contains(*ext))?;
        let expanded = parent.join(format!("{stem}{ext}"));
        debug!(
            "Expanded {} to {} (candidates: {:?})",
            path.display(),
            expanded.display(),
            present
        );
        Some(expanded)
    }
}

/// Suffixes (".md", ".old.html", ...) of regular files named `stem` + suffix.
fn candidate_suffixes(dir: &Path, stem: &str) -> HashSet<String> {
    let prefix = format!("{stem}.");
    let Ok(entries) = fs::read_dir(dir) else {
        return HashSet::new();
    };

    entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            name.starts_with(&prefix)
                .then(|| name[stem.len()..].to_string())
        })
        .collect()
}
