//! Principals
//!
//! The identity a page is resolved for.

use std::fmt;

/// Identifier of the anonymous principal
pub const ANONYMOUS: &str = "anonymous";

/// The acting identity for a resolution.
///
/// Anonymous is a real value, not an absent one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Principal {
    #[default]
    Anonymous,
    User { username: String, roles: Vec<String> },
}

impl Principal {
    pub fn user(username: &str) -> Self {
        Principal::User {
            username: username.to_string(),
            roles: Vec::new(),
        }
    }

    pub fn with_roles(username: &str, roles: &[&str]) -> Self {
        Principal::User {
            username: username.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Principal::Anonymous => ANONYMOUS,
            Principal::User { username, .. } => username,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Principal::Anonymous)
    }

    /// Username followed by role names
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        let roles: &[String] = match self {
            Principal::Anonymous => &[],
            Principal::User { roles, .. } => roles,
        };
        std::iter::once(self.username()).chain(roles.iter().map(String::as_str))
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_identity() {
        let principal = Principal::default();
        assert!(principal.is_anonymous());
        assert_eq!(principal.username(), "anonymous");
        assert_eq!(principal.identifiers().collect::<Vec<_>>(), vec!["anonymous"]);
    }

    #[test]
    fn test_user_identifiers_include_roles() {
        let principal = Principal::with_roles("bob", &["student", "faculty"]);
        assert_eq!(
            principal.identifiers().collect::<Vec<_>>(),
            vec!["bob", "student", "faculty"]
        );
        assert_eq!(principal.to_string(), "bob");
    }
}
