use crate::errors::domain::DomainError;
use crate::infra::db::{bootstrap_db, DbProfile, RuntimeEnv};
use crate::state::app_state::AppState;

/// Builder for [`AppState`] (used by tests and embedding applications alike)
pub struct StateBuilder {
    env: RuntimeEnv,
    db_profile: DbProfile,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Prod,
            db_profile: DbProfile::SqliteFile { file: None },
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = profile;
        self
    }

    pub async fn build(self) -> Result<AppState, DomainError> {
        // single entrypoint: connect + migrate
        let conn = bootstrap_db(self.env, &self.db_profile).await?;
        Ok(AppState::new(conn, self.db_profile))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
