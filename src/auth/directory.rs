//! Person directory
//!
//! Maps usernames to role names. Identity itself is established upstream;
//! this only decorates a trusted username with its roles.

use serde::Deserialize;
use std::collections::HashMap;

use super::principal::Principal;

/// Person entry as written in `config.toml`
#[derive(Debug, Clone, Deserialize)]
pub struct PersonRecord {
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Known people and their roles
#[derive(Debug, Clone, Default)]
pub struct PersonDirectory {
    roles: HashMap<String, Vec<String>>,
}

impl PersonDirectory {
    pub fn from_records(records: Vec<PersonRecord>) -> Self {
        Self {
            roles: records
                .into_iter()
                .map(|record| (record.username, record.roles))
                .collect(),
        }
    }

    /// Principal for `username`; unknown users have no roles.
    pub fn principal(&self, username: &str) -> Principal {
        Principal::User {
            username: username.to_string(),
            roles: self.roles.get(username).cloned().unwrap_or_default(),
        }
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_people() {
        let directory = PersonDirectory::from_records(vec![PersonRecord {
            username: "johnsmith".into(),
            roles: vec!["student".into()],
        }]);

        assert_eq!(
            directory.principal("johnsmith"),
            Principal::with_roles("johnsmith", &["student"])
        );
        assert_eq!(directory.principal("stranger"), Principal::user("stranger"));
    }
}
