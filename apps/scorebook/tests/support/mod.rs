#![allow(dead_code)]

pub mod test_db;

pub use factory::{seed_course, seed_graph, SeededGraph};
pub use test_db::{fresh_db, open_state, TestDb};
