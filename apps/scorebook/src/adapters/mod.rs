//! SeaORM adapters. Functions here return `DbErr`; the repos layer maps to `DomainError`.

pub mod courses_sea;
pub mod holes_sea;
pub mod players_sea;
pub mod round_segments_sea;
pub mod rounds_sea;
