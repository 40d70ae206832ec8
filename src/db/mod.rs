pub mod queries;
mod repository;

use std::future::Future;
use std::str::FromStr;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Error;

use crate::error::TriviaResult;

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question, StoreValue};
pub use repository::SqliteRepository;

/// Domain-level access to questions.
///
/// The quiz engine and the HTTP handlers only talk to the store through this
/// trait, so they can run against an in-memory implementation in tests.
pub trait QuestionRepository {
    /// Every question, in creation order.
    fn list_all(&self) -> impl Future<Output = TriviaResult<Vec<Question>>> + Send;

    /// Questions whose text contains `term`, ignoring case. An empty term matches all.
    fn search_by_text(&self, term: &str)
        -> impl Future<Output = TriviaResult<Vec<Question>>> + Send;

    fn list_by_category(
        &self,
        category: i64,
    ) -> impl Future<Output = TriviaResult<Vec<Question>>> + Send;

    /// Stores a new question and returns its id. Values the store cannot hold
    /// fail here with `PersistenceFailure`.
    fn insert(&self, question: NewQuestion) -> impl Future<Output = TriviaResult<i64>> + Send;

    /// Fails with `NotFound` when no row was removed, including when a concurrent
    /// request deleted it first.
    fn delete_by_id(&self, id: i64) -> impl Future<Output = TriviaResult<()>> + Send;
}

pub async fn establish_connection(url: &str) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    SqlitePoolOptions::new().connect_with(options).await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
