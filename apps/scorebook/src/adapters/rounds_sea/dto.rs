//! DTOs for rounds_sea adapter.

use time::OffsetDateTime;

/// DTO for creating a new round. `time` is resolved by the repo layer.
#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub player_id: Option<i64>,
    pub course_id: Option<i64>,
    pub time: OffsetDateTime,
}
