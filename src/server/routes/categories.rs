use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::{
    db::{Category, Question, QuestionRepository, SqliteRepository},
    server::app::AppState,
};

use super::{ApiError, ApiResponse};

#[derive(Serialize)]
struct CategoriesList {
    success: bool,
    categories: Vec<Category>,
}

#[derive(Serialize)]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

async fn get_categories(State(repo): State<SqliteRepository>) -> ApiResponse<Json<CategoriesList>> {
    let categories = repo.list_categories().await?;
    Ok(Json(CategoriesList {
        success: true,
        categories,
    }))
}

async fn questions_for_category(
    State(repo): State<SqliteRepository>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<CategoryQuestions>> {
    let Path(id) = id?;
    let category = repo.get_category(id).await?.ok_or(ApiError::NotFound)?;
    let questions = repo.list_by_category(id).await?;
    if questions.is_empty() {
        tracing::info!("Category {id} has no questions");
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoryQuestions {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: category.kind,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}
