//! File system queries
//!
//! Metadata lookups used while resolving a page.

use std::fs;
use std::io::Result;
use std::path::Path;
use std::time::SystemTime;

/// Check if file exists
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Check if directory exists
pub fn directory_exists(path: &Path) -> bool {
    path.is_dir()
}

/// Modification time of an existing entry
pub fn modified_time(path: &Path) -> Result<SystemTime> {
    fs::metadata(path)?.modified()
}

/// File extension with its leading dot, or an empty string
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_extension() {
        assert_eq!(dotted_extension(Path::new("/srv/demo/home.wiki")), ".wiki");
        assert_eq!(dotted_extension(Path::new("/srv/demo/archive.tar.gz")), ".gz");
        assert_eq!(dotted_extension(Path::new("/srv/demo/home")), "");
        assert_eq!(dotted_extension(Path::new("/srv/demo/.access.yaml")), ".yaml");
        assert_eq!(dotted_extension(Path::new("/srv/demo/.hidden")), "");
    }
}
