//! Unique test values, so tests never collide on unique columns.

use ulid::Ulid;

/// A unique string in the form `{prefix}-{ulid}`.
///
/// # Examples
/// ```
/// use scorebook_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("course");
/// let b = unique_str("course");
/// assert_ne!(a, b);
/// assert!(a.starts_with("course-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A unique course name that still fits the 50 character column.
///
/// # Examples
/// ```
/// use scorebook_test_support::unique_helpers::unique_course_name;
///
/// let name = unique_course_name("Meri-Toppila");
/// assert!(name.chars().count() <= 50);
/// ```
pub fn unique_course_name(prefix: &str) -> String {
    // a ULID is 26 chars; leave room for it plus the separator
    let prefix: String = prefix.chars().take(50 - 27).collect();
    format!("{}-{}", prefix, Ulid::new())
}
