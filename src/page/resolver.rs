//! Page resolution
//!
//! Turns a logical path into a [`PageTarget`]: which course owns it, what it
//! is on disk (possibly after extension expansion), when it last changed and
//! whether the acting principal may read or write it.

use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::context::RequestContext;
use super::target::{PageKind, PageTarget};
use super::time::iso_seconds;
use crate::access::PermissionResolver;
use crate::auth::Principal;
use crate::config::ResolverConfig;
use crate::course::{CourseCatalog, locate_course};
use crate::error::PageError;
use crate::storage::ExtensionResolver;
use crate::storage::filesystem::{directory_exists, dotted_extension, file_exists, modified_time};
use crate::storage::validation::{is_valid_logical_path, normalize_logical_path};

/// Resolves logical paths against a configured root and course catalogue
#[derive(Clone)]
pub struct PageResolver {
    config: ResolverConfig,
    courses: Arc<dyn CourseCatalog>,
    extensions: ExtensionResolver,
    permissions: PermissionResolver,
}

impl PageResolver {
    pub fn new(config: ResolverConfig, courses: Arc<dyn CourseCatalog>) -> Self {
        Self {
            extensions: ExtensionResolver::new(&config),
            permissions: PermissionResolver::new(&config),
            config,
            courses,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `raw_path` for `principal`.
    ///
    /// `.` and `..` segments are collapsed first; a path that climbs above
    /// the root is invalid. A path ending in `/` names a folder. A path that
    /// matches neither a folder nor a file may still match a file with a
    /// recognised extension. A path that matches nothing resolves with kind
    /// `Missing`; a path outside every course is an error.
    pub fn resolve(
        &self,
        raw_path: &str,
        principal: &Principal,
        context: Option<&RequestContext>,
    ) -> Result<PageTarget, PageError> {
        if !is_valid_logical_path(raw_path) {
            return Err(PageError::InvalidPath(raw_path.to_string()));
        }
        let path = normalize_logical_path(raw_path)
            .ok_or_else(|| PageError::InvalidPath(raw_path.to_string()))?;
        if path != raw_path {
            debug!("Normalised {:?} to {:?}", raw_path, path);
        }
        let path = path.as_str();

        let course = locate_course(self.courses.as_ref(), path)?.clone();
        let basename = basename(path);

        let mut on_disk_path = self.config.root().join(path);
        let kind = if directory_exists(&on_disk_path) {
            PageKind::Folder
        } else if file_exists(&on_disk_path) {
            PageKind::File
        } else if path.ends_with('/') {
            PageKind::Missing
        } else {
            match self.extensions.expand(&on_disk_path) {
                Some(expanded) => {
                    on_disk_path = expanded;
                    PageKind::File
                }
                None => PageKind::Missing,
            }
        };

        let extension = match kind {
            PageKind::File => dotted_extension(&on_disk_path),
            PageKind::Folder | PageKind::Missing => String::new(),
        };

        let containing_directory = match kind {
            PageKind::Folder => without_trailing_slash(&on_disk_path),
            PageKind::File | PageKind::Missing => on_disk_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.config.root().to_path_buf()),
        };

        let last_modified = match kind {
            PageKind::Missing => String::new(),
            PageKind::File | PageKind::Folder => {
                iso_seconds(modified_time(&on_disk_path)?, self.config.utc_offset())
            }
        };

        let access = self.permissions.resolve(&containing_directory, principal)?;

        let (url, secure_url) = context
            .map(|c| c.urls(self.config.http_port(), self.config.https_port()))
            .unwrap_or_default();

        info!(
            "Resolved {:?} for {} -> {} {} (course {:?}, read={}, write={})",
            path,
            principal,
            kind,
            on_disk_path.display(),
            course.path(),
            access.can_read,
            access.can_write
        );

        Ok(PageTarget {
            path: path.to_string(),
            basename,
            on_disk_path,
            kind,
            extension,
            containing_directory,
            last_modified,
            course,
            permissions: access.permissions,
            can_read: access.can_read,
            can_write: access.can_write,
            url,
            secure_url,
        })
    }
}

/// Last segment of a logical path.
///
/// For folders (`fall/math/`) this is the folder's own name (`math`); for
/// files the extension is dropped (`notes/week1.md` gives `week1`).
pub fn basename(path: &str) -> String {
    match path.strip_suffix('/') {
        Some(folder) => last_segment(folder).to_string(),
        None => strip_extension(last_segment(path)).to_string(),
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Drop the final `.ext`; leading dots do not start an extension.
fn strip_extension(name: &str) -> &str {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(dot) => &name[..leading + dot],
        None => name,
    }
}

fn without_trailing_slash(path: &Path) -> PathBuf {
    path.components().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename_of_folder_is_never_empty() {
        assert_eq!(basename("fall/math/"), "math");
        assert_eq!(basename("demo/"), "demo");
        assert_eq!(basename("demo/v1.2/"), "v1.2");
    }

    #[test]
    fn test_basename_of_file_drops_extension() {
        assert_eq!(basename("demo/home"), "home");
        assert_eq!(basename("demo/home.md"), "home");
        assert_eq!(basename("demo/archive.tar.gz"), "archive.tar");
        assert_eq!(basename("demo/.hidden"), ".hidden");
        assert_eq!(basename("home"), "home");
        assert_eq!(basename(""), "");
    }

    #[test]
    fn test_without_trailing_slash() {
        assert_eq!(
            without_trailing_slash(Path::new("/srv/courses/demo/")),
            PathBuf::from("/srv/courses/demo")
        );
    }
}
