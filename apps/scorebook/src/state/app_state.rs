use sea_orm::DatabaseConnection;

use crate::infra::db::DbProfile;

/// Shared handle to the database plus the profile it was opened with.
#[derive(Debug, Clone)]
pub struct AppState {
    db: DatabaseConnection,
    profile: DbProfile,
}

impl AppState {
    pub fn new(db: DatabaseConnection, profile: DbProfile) -> Self {
        Self { db, profile }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn profile(&self) -> &DbProfile {
        &self.profile
    }
}
