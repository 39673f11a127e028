//! Course lookup
//!
//! Finds the course that owns a logical path.

mod locator;

pub use locator::{Course, CourseCatalog, CourseRecord, CourseRegistry, locate_course};
