use sqlx::SqlitePool;

use super::queries::{categories, questions};
use super::{Category, NewQuestion, Question, QuestionRepository};
use crate::error::{TriviaError, TriviaResult};

#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn list_categories(&self) -> TriviaResult<Vec<Category>> {
        Ok(categories::get_all_categories(&self.pool).await?)
    }

    pub async fn get_category(&self, id: i64) -> TriviaResult<Option<Category>> {
        Ok(categories::get_category(&self.pool, id).await?)
    }
}

impl QuestionRepository for SqliteRepository {
    async fn list_all(&self) -> TriviaResult<Vec<Question>> {
        Ok(questions::get_all_questions(&self.pool).await?)
    }

    async fn search_by_text(&self, term: &str) -> TriviaResult<Vec<Question>> {
        Ok(questions::search_questions(&self.pool, term).await?)
    }

    async fn list_by_category(&self, category: i64) -> TriviaResult<Vec<Question>> {
        Ok(questions::get_questions_for_category(&self.pool, category).await?)
    }

    async fn insert(&self, question: NewQuestion) -> TriviaResult<i64> {
        questions::create_question(&self.pool, question)
            .await
            .map_err(TriviaError::PersistenceFailure)
    }

    async fn delete_by_id(&self, id: i64) -> TriviaResult<()> {
        match questions::delete_question(&self.pool, id).await {
            Ok(0) => Err(TriviaError::NotFound),
            Ok(_) => Ok(()),
            Err(e) => Err(TriviaError::DeletionFailure(e)),
        }
    }
}
