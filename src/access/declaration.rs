//! Access declaration parsing
//!
//! An access declaration is a small YAML mapping such as
//!
//! ```yaml
//! read: all
//! write: faculty, johnsmith
//! ```
//!
//! Each value is a comma-separated list of usernames or role names.

use serde_yaml::Value;
use std::collections::BTreeSet;

use crate::auth::Principal;

/// Identifier granting access to every principal
pub const ALL: &str = "all";

/// Principals allowed to read and to write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    pub read: BTreeSet<String>,
    pub write: BTreeSet<String>,
}

impl PermissionSet {
    /// Deny-all
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.read.is_empty() && self.write.is_empty()
    }

    pub fn allows_read(&self, principal: &Principal) -> bool {
        grants(&self.read, principal)
    }

    pub fn allows_write(&self, principal: &Principal) -> bool {
        grants(&self.write, principal)
    }
}

fn grants(set: &BTreeSet<String>, principal: &Principal) -> bool {
    set.contains(ALL) || principal.identifiers().any(|id| set.contains(id))
}

/// Split a comma-separated list, trimming each entry and dropping empties
pub fn csv_to_set(csv: &str) -> BTreeSet<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the contents of an access declaration file.
///
/// Unknown keys are ignored and a missing key yields an empty set. Blank or
/// comment-only input is an empty declaration.
pub fn parse_declaration(contents: &str) -> Result<PermissionSet, String> {
    let is_blank = contents
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'));
    if is_blank {
        return Ok(PermissionSet::empty());
    }

    let value: Value = serde_yaml::from_str(contents).map_err(|e| e.to_string())?;
    let mapping = match value {
        Value::Null => return Ok(PermissionSet::empty()),
        Value::Mapping(mapping) => mapping,
        other => return Err(format!("expected a mapping, found {}", kind_of(&other))),
    };

    let mut permissions = PermissionSet::empty();
    for (key, value) in &mapping {
        let target = match key.as_str() {
            Some("read") => &mut permissions.read,
            Some("write") => &mut permissions.write,
            _ => continue,
        };
        *target = match value {
            Value::Null => BTreeSet::new(),
            Value::String(csv) => csv_to_set(csv),
            other => {
                return Err(format!(
                    "value for {:?} must be a comma-separated string, found {}",
                    key.as_str().unwrap_or_default(),
                    kind_of(other)
                ));
            }
        };
    }
    Ok(permissions)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
