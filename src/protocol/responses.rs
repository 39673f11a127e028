//! Service responses
//!
//! Reply codes and formatting.

use crate::page::PageTarget;

pub const OK: u16 = 200;
pub const PAGE_FOLLOWS: u16 = 210;
pub const READY: u16 = 220;
pub const GOODBYE: u16 = 221;
pub const BAD_REQUEST: u16 = 400;
pub const NOT_FOUND: u16 = 404;
pub const SERVICE_UNAVAILABLE: u16 = 421;
pub const COMMAND_TOO_LONG: u16 = 500;
pub const INTERNAL_ERROR: u16 = 500;
pub const UNKNOWN_COMMAND: u16 = 502;

/// Format a single-line response
pub fn format_response(code: u16, message: &str) -> String {
    format!("{} {}\r\n", code, message)
}

/// Format a resolved page as a multi-line `210` block
pub fn format_page(page: &PageTarget) -> String {
    let join = |set: &std::collections::BTreeSet<String>| {
        set.iter().map(String::as_str).collect::<Vec<_>>().join(",")
    };

    let fields = [
        ("path", page.path.clone()),
        ("basename", page.basename.clone()),
        ("kind", page.kind.to_string()),
        ("on_disk_path", page.on_disk_path.display().to_string()),
        ("extension", page.extension.clone()),
        (
            "containing_directory",
            page.containing_directory.display().to_string(),
        ),
        ("last_modified", page.last_modified.clone()),
        ("course", page.course.path().to_string()),
        ("course_name", page.course.name().to_string()),
        ("read", join(&page.permissions.read)),
        ("write", join(&page.permissions.write)),
        ("can_read", page.can_read.to_string()),
        ("can_write", page.can_write.to_string()),
        ("url", page.url.clone()),
        ("secure_url", page.secure_url.clone()),
    ];

    let mut out = String::new();
    for (key, value) in fields {
        out.push_str(&format!("{}-{}: {}\r\n", PAGE_FOLLOWS, key, value));
    }
    out.push_str(&format_response(PAGE_FOLLOWS, "End"));
    out
}
