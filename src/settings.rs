use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::pagination::QUESTIONS_PER_PAGE;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    pub questions_per_page: usize,
}

impl Settings {
    /// Defaults overridden by `TRIVIA_*` variables from the environment or a `.env` file.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_env(Environment::with_prefix("TRIVIA").try_parsing(true))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("database_url", "sqlite:trivia.db")?
            .set_default("bind_address", "0.0.0.0:8080")?
            .set_default("questions_per_page", QUESTIONS_PER_PAGE as u64)?
            .add_source(env)
            .build()?
            .try_deserialize()?;

        if settings.questions_per_page == 0 {
            return Err(ConfigError::Message(
                "questions_per_page must be positive".to_owned(),
            ));
        }
        Ok(settings)
    }
}
