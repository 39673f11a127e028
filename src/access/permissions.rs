//! Permission resolution
//!
//! Walks from a directory up toward the configured root and uses the first
//! access declaration found. The walk never reads outside the root.

use log::{debug, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::declaration::{PermissionSet, parse_declaration};
use crate::auth::Principal;
use crate::config::ResolverConfig;
use crate::error::PermissionError;
use crate::storage::validation::{is_within_root, normalize_lexically};

/// Permissions in force for a directory, evaluated for one principal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Access {
    pub permissions: PermissionSet,
    pub can_read: bool,
    pub can_write: bool,
    /// Directory whose declaration applied, if any
    pub declared_in: Option<PathBuf>,
}

impl Access {
    fn new(permissions: PermissionSet, principal: &Principal, declared_in: Option<PathBuf>) -> Self {
        Self {
            can_read: permissions.allows_read(principal),
            can_write: permissions.allows_write(principal),
            permissions,
            declared_in,
        }
    }
}

/// Finds the access declaration governing a directory
#[derive(Debug, Clone)]
pub struct PermissionResolver {
    root: PathBuf,
    access_filename: String,
}

impl PermissionResolver {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            root: config.root().to_path_buf(),
            access_filename: config.access_filename().to_string(),
        }
    }

    /// Permissions for `directory`, evaluated for `principal`.
    pub fn resolve(&self, directory: &Path, principal: &Principal) -> Result<Access, PermissionError> {
        let (permissions, declared_in) = match self.find_declaration(directory)? {
            Some((dir, permissions)) => (permissions, Some(dir)),
            None => (PermissionSet::empty(), None),
        };
        Ok(Access::new(permissions, principal, declared_in))
    }

    /// Nearest declaration at or above `directory`, stopping at the root.
    ///
    /// `None` means deny-all: nothing was declared up to the root, or the
    /// directory is outside the root.
    pub fn find_declaration(
        &self,
        directory: &Path,
    ) -> Result<Option<(PathBuf, PermissionSet)>, PermissionError> {
        let mut current = normalize_lexically(directory);

        loop {
            if !is_within_root(&current, &self.root) {
                debug!(
                    "{} is outside {}; no access",
                    current.display(),
                    self.root.display()
                );
                return Ok(None);
            }

            if let Some(permissions) = self.read_declaration(&current)? {
                debug!("Access declared in {}", current.display());
                return Ok(Some((current, permissions)));
            }

            if current == self.root {
                debug!("No access declaration up to {}", self.root.display());
                return Ok(None);
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok(None),
            }
        }
    }

    /// Read and parse the declaration in `directory`; `None` if it has none.
    fn read_declaration(&self, directory: &Path) -> Result<Option<PermissionSet>, PermissionError> {
        let path = directory.join(&self.access_filename);

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                return Ok(None);
            }
            Err(e) => {
                warn!("Cannot read access declaration {}: {}", path.display(), e);
                return Err(PermissionError::Unreadable { path, source: e });
            }
        };

        match parse_declaration(&contents) {
            Ok(permissions) => Ok(Some(permissions)),
            Err(reason) => {
                warn!("Rejecting access declaration {}: {}", path.display(), reason);
                Err(PermissionError::Malformed { path, reason })
            }
        }
    }
}
