use std::collections::HashSet;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    db::{Question, SqliteRepository},
    error::TriviaError,
    quiz,
    server::{app::AppState, deserializers::LooseId},
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizPayload {
    previous_questions: Option<Vec<LooseId>>,
    quiz_category: Option<QuizCategory>,
}

// the client also sends the category label; only the id matters
#[derive(Deserialize)]
struct QuizCategory {
    id: Option<LooseId>,
}

#[derive(Serialize)]
struct QuizQuestion {
    success: bool,
    question: Option<Question>,
}

async fn next_question(
    State(repo): State<SqliteRepository>,
    payload: Result<Json<QuizPayload>, JsonRejection>,
) -> ApiResponse<Json<QuizQuestion>> {
    let Json(payload) = payload?;
    let previous: HashSet<i64> = payload
        .previous_questions
        .ok_or(TriviaError::MissingField("previous_questions"))?
        .into_iter()
        .map(|id| id.0)
        .collect();
    let LooseId(category) = payload
        .quiz_category
        .and_then(|c| c.id)
        .ok_or(TriviaError::MissingField("quiz_category.id"))?;

    let mut rng = StdRng::from_entropy();
    let question = quiz::next_question(&repo, category, &previous, &mut rng).await?;
    Ok(Json(QuizQuestion {
        success: true,
        question,
    }))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
