//! Path validation
//!
//! Lexical path normalisation and root-boundary checks. Nothing here touches
//! the filesystem.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components without following symlinks.
///
/// `..` at the filesystem root stays at the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            Component::Normal(name) => normalized.push(name),
        }
    }
    normalized
}

/// Whether `path` lies at or below `root` once both are normalised.
pub fn is_within_root(path: &Path, root: &Path) -> bool {
    normalize_lexically(path).starts_with(root)
}

/// A logical path is relative: it must not begin with a slash.
pub fn is_valid_logical_path(path: &str) -> bool {
    !path.starts_with('/') && !path.contains('\0')
}

/// Collapse empty, `.` and `..` segments of a logical path.
///
/// A path whose last segment is empty, `.` or `..` names a folder and keeps
/// its trailing slash. `None` if `..` climbs above the root.
pub fn normalize_logical_path(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            name => segments.push(name),
        }
    }

    let mut normalized = segments.join("/");
    let names_folder = matches!(path.rsplit('/').next(), Some("" | "." | ".."));
    if names_folder && !normalized.is_empty() {
        normalized.push('/');
    }
    Some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/srv/courses/./demo/../intro/")),
            PathBuf::from("/srv/courses/intro")
        );
        assert_eq!(normalize_lexically(Path::new("/../..")), PathBuf::from("/"));
        assert_eq!(normalize_lexically(Path::new("a/../../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_is_within_root() {
        let root = Path::new("/srv/courses");
        assert!(is_within_root(Path::new("/srv/courses"), root));
        assert!(is_within_root(Path::new("/srv/courses/demo/sub"), root));
        assert!(!is_within_root(Path::new("/srv"), root));
        assert!(!is_within_root(Path::new("/srv/courses/../secrets"), root));
        assert!(!is_within_root(Path::new("/srv/courses-old"), root));
    }

    #[test]
    fn test_is_valid_logical_path() {
        assert!(is_valid_logical_path("demo/home"));
        assert!(is_valid_logical_path("demo/"));
        assert!(is_valid_logical_path(""));
        assert!(!is_valid_logical_path("/demo/home"));
    }

    #[test]
    fn test_normalize_logical_path() {
        assert_eq!(normalize_logical_path("demo/home").as_deref(), Some("demo/home"));
        assert_eq!(normalize_logical_path("demo/").as_deref(), Some("demo/"));
        assert_eq!(normalize_logical_path("").as_deref(), Some(""));
        assert_eq!(normalize_logical_path("nosuch/.").as_deref(), Some("nosuch/"));
        assert_eq!(normalize_logical_path("demo/./sub//page").as_deref(), Some("demo/sub/page"));
        assert_eq!(normalize_logical_path("demo/../other/x").as_deref(), Some("other/x"));
        assert_eq!(normalize_logical_path("demo/sub/..").as_deref(), Some("demo/"));
        assert_eq!(normalize_logical_path("demo/..").as_deref(), Some(""));
        assert_eq!(normalize_logical_path("demo/../../secret"), None);
        assert_eq!(normalize_logical_path(".."), None);
    }
}
