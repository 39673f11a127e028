//! Course lookup by longest path prefix

use log::debug;
use serde::Deserialize;

use crate::error::CourseError;

/// A course as stored by the persistence layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    path: String,
    name: String,
}

impl Course {
    /// Leading and trailing slashes are dropped from `path`.
    pub fn new(path: &str, name: &str) -> Self {
        Self {
            path: path.trim_matches('/').to_string(),
            name: name.to_string(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this course owns `page_path`.
    ///
    /// The course path must be followed by the end of the string or a slash;
    /// the empty path is the catch-all root course.
    pub fn contains(&self, page_path: &str) -> bool {
        if self.path.is_empty() {
            return true;
        }
        match page_path.strip_prefix(self.path.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Course entry as written in `config.toml`
#[derive(Debug, Clone, Deserialize)]
pub struct CourseRecord {
    pub path: String,
    pub name: String,
}

/// Read access to the full set of course records
pub trait CourseCatalog: Send + Sync {
    fn courses(&self) -> &[Course];
}

/// In-memory course catalogue
#[derive(Debug, Clone, Default)]
pub struct CourseRegistry {
    courses: Vec<Course>,
}

impl CourseRegistry {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    pub fn from_records(records: Vec<CourseRecord>) -> Self {
        Self::new(
            records
                .iter()
                .map(|record| Course::new(&record.path, &record.name))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl CourseCatalog for CourseRegistry {
    fn courses(&self) -> &[Course] {
        &self.courses
    }
}

/// Return the course whose path is the longest prefix of `page_path`.
///
/// On equal lengths the first registered course wins.
pub fn locate_course<'a>(
    catalog: &'a dyn CourseCatalog,
    page_path: &str,
) -> Result<&'a Course, CourseError> {
    let mut best: Option<&Course> = None;
    for course in catalog.courses().iter().filter(|c| c.contains(page_path)) {
        match best {
            Some(current) if current.path.len() >= course.path.len() => {}
            _ => best = Some(course),
        }
    }

    let course = best.ok_or_else(|| CourseError::NotFound(page_path.to_string()))?;
    debug!("Page path {:?} belongs to course {:?}", page_path, course.path);
    Ok(course)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CourseRegistry {
        CourseRegistry::new(vec![
            Course::new("", "Umber"),
            Course::new("demo", "Demo Course"),
            Course::new("fall/math", "Math 101"),
            Course::new("fall/math/honors", "Math 101 Honors"),
        ])
    }

    #[test]
    fn test_longest_prefix_wins() {
        let registry = registry();
        assert_eq!(locate_course(&registry, "demo/a/b/c").unwrap().name(), "Demo Course");
        assert_eq!(
            locate_course(&registry, "fall/math/notes/week1").unwrap().name(),
            "Math 101"
        );
        assert_eq!(
            locate_course(&registry, "fall/math/honors/notes").unwrap().name(),
            "Math 101 Honors"
        );
    }

    #[test]
    fn test_root_course_catches_everything() {
        let registry = registry();
        assert_eq!(locate_course(&registry, "foo/bar/baz").unwrap().name(), "Umber");
        assert_eq!(locate_course(&registry, "").unwrap().name(), "Umber");
    }

    #[test]
    fn test_prefix_must_end_at_segment_boundary() {
        let registry = CourseRegistry::new(vec![Course::new("demo", "Demo Course")]);
        assert!(locate_course(&registry, "demonstration/home").is_err());
        assert!(locate_course(&registry, "demo").is_ok());
        assert!(locate_course(&registry, "demo/").is_ok());
    }

    #[test]
    fn test_folder_paths_match_their_course() {
        let registry = registry();
        assert_eq!(locate_course(&registry, "fall/math/").unwrap().name(), "Math 101");
    }

    #[test]
    fn test_empty_catalog_fails() {
        let registry = CourseRegistry::default();
        match locate_course(&registry, "demo/home") {
            Err(CourseError::NotFound(path)) => assert_eq!(path, "demo/home"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_course_paths_are_trimmed() {
        let course = Course::new("/demo/", "Demo Course");
        assert_eq!(course.path(), "demo");
    }
}
