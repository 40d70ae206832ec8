use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    db::{Category, NewQuestion, Question, QuestionRepository, SqliteRepository, StoreValue},
    error::TriviaError,
    pagination::{paginate, Page},
    server::{app::AppState, deserializers::deserialize_present},
};

use super::{ApiResponse, Success};

#[derive(Deserialize)]
struct QuestionsQuery {
    #[serde(default)]
    page: Page,
}

// fields stay loosely typed: only presence is checked here, the store checks types
#[derive(Deserialize)]
struct QuestionPayload {
    #[serde(default, deserialize_with = "deserialize_present")]
    question: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    answer: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    difficulty: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    category: Option<Value>,
}

impl TryFrom<QuestionPayload> for NewQuestion {
    type Error = TriviaError;

    fn try_from(payload: QuestionPayload) -> Result<Self, Self::Error> {
        fn required(value: Option<Value>, name: &'static str) -> Result<Value, TriviaError> {
            value.ok_or(TriviaError::MissingField(name))
        }

        Ok(NewQuestion {
            question: required(payload.question, "question")?.into(),
            answer: required(payload.answer, "answer")?.into(),
            difficulty: StoreValue::numeric(required(payload.difficulty, "difficulty")?),
            category: StoreValue::numeric(required(payload.category, "category")?),
        })
    }
}

#[derive(Deserialize)]
struct SearchPayload {
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: Vec<Category>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

async fn questions_page(
    State(state): State<AppState>,
    query: Result<Query<QuestionsQuery>, QueryRejection>,
) -> ApiResponse<Json<QuestionsPage>> {
    // a query string that does not even parse is treated like a bad page number
    let page = match query {
        Ok(Query(QuestionsQuery { page })) => page,
        Err(rejection) => {
            tracing::info!("Ignoring query string: {}", rejection.body_text());
            Page::FIRST
        }
    };
    let repo = state.repo();
    let questions = repo.list_all().await?;
    let categories = repo.list_categories().await?;
    Ok(Json(QuestionsPage {
        success: true,
        questions: paginate(&questions, page, state.questions_per_page()).to_vec(),
        total_questions: questions.len(),
        categories,
    }))
}

async fn create_question(
    State(repo): State<SqliteRepository>,
    payload: Result<Json<QuestionPayload>, JsonRejection>,
) -> ApiResponse<Json<Success>> {
    let Json(payload) = payload?;
    let new_question = NewQuestion::try_from(payload)?;
    let id = repo.insert(new_question).await?;
    tracing::info!("Created question {id}");
    Ok(Success::ok())
}

async fn delete_question(
    State(repo): State<SqliteRepository>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<Success>> {
    let Path(id) = id?;
    repo.delete_by_id(id).await?;
    tracing::info!("Deleted question {id}");
    Ok(Success::ok())
}

async fn search_questions(
    State(repo): State<SqliteRepository>,
    payload: Result<Json<SearchPayload>, JsonRejection>,
) -> ApiResponse<Json<SearchResults>> {
    let Json(payload) = payload?;
    let term = payload
        .search_term
        .ok_or(TriviaError::MissingField("search_term"))?;

    let questions = repo.search_by_text(&term).await?;
    Ok(Json(SearchResults {
        success: true,
        total_questions: questions.len(),
        questions,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(questions_page).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/search", post(search_questions))
        .with_state(state)
}
