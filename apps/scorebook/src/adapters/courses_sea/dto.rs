//! DTOs for courses_sea adapter.

/// DTO for creating a new course.
#[derive(Debug, Clone)]
pub struct CourseCreate {
    pub name: String,
    pub num_holes: i32,
    pub par_total: i32,
}

impl CourseCreate {
    pub fn new(name: impl Into<String>, num_holes: i32, par_total: i32) -> Self {
        Self {
            name: name.into(),
            num_holes,
            par_total,
        }
    }
}
