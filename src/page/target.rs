//! Resolved page record

use std::fmt;
use std::path::PathBuf;

use crate::access::PermissionSet;
use crate::course::Course;

/// What a logical path points at on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    File,
    Folder,
    Missing,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::File => "file",
            PageKind::Folder => "folder",
            PageKind::Missing => "missing",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logical path resolved to a file or folder, with the access decision
/// for the principal it was resolved for.
///
/// ```text
/// path                  demo/home
/// basename              home
/// on_disk_path          /srv/courses/demo/home.wiki
/// kind                  File
/// extension             .wiki
/// containing_directory  /srv/courses/demo
/// last_modified         2014-06-12T17:01:11-04:00
/// url                   http://localhost:8090/demo/home
/// secure_url            https://localhost:8443/demo/home
/// ```
#[derive(Debug, Clone)]
pub struct PageTarget {
    pub path: String,
    pub basename: String,
    pub on_disk_path: PathBuf,
    pub kind: PageKind,
    /// Empty unless `kind` is `File`
    pub extension: String,
    /// The folder itself for folders, otherwise the parent directory
    pub containing_directory: PathBuf,
    /// Empty when `kind` is `Missing`
    pub last_modified: String,
    pub course: Course,
    pub permissions: PermissionSet,
    pub can_read: bool,
    pub can_write: bool,
    /// Empty without a request context
    pub url: String,
    pub secure_url: String,
}

impl PageTarget {
    pub fn exists(&self) -> bool {
        self.kind != PageKind::Missing
    }

    /// Path within the course, e.g. `notes/week1` for `fall/math/notes/week1`
    pub fn name_in_course(&self) -> &str {
        let course_path = self.course.path();
        if course_path.is_empty() {
            return &self.path;
        }
        self.path
            .strip_prefix(course_path)
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(&self.path)
    }
}

impl fmt::Display for PageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Page path='{}' kind={}>", self.path, self.kind)
    }
}
