use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub difficulty: i64,
    pub category: i64,
}

/// A payload value handed to the store as-is.
///
/// Type checking is left to the table constraints, so a value such as
/// `"banana"` for an integer column is only rejected when the row is written.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<Value> for StoreValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => StoreValue::Null,
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => StoreValue::Integer(i),
                (None, Some(f)) => StoreValue::Real(f),
                (None, None) => StoreValue::Text(n.to_string()),
            },
            Value::String(s) => StoreValue::Text(s),
            Value::Bool(b) => StoreValue::Text(b.to_string()),
            // arrays and objects have no column representation; NOT NULL rejects them
            Value::Array(_) | Value::Object(_) => StoreValue::Null,
        }
    }
}

impl StoreValue {
    /// Like `From<Value>`, but numeric strings become integers the way a typed
    /// integer column would coerce them. Only for integer columns.
    pub fn numeric(value: Value) -> Self {
        match value {
            Value::String(s) => match s.trim().parse::<i64>() {
                Ok(i) => StoreValue::Integer(i),
                Err(_) => StoreValue::Text(s),
            },
            other => other.into(),
        }
    }
}

impl From<&str> for StoreValue {
    fn from(value: &str) -> Self {
        StoreValue::Text(value.to_owned())
    }
}

impl From<i64> for StoreValue {
    fn from(value: i64) -> Self {
        StoreValue::Integer(value)
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: StoreValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        StoreValue::Null => query.bind(None::<i64>),
        StoreValue::Integer(v) => query.bind(v),
        StoreValue::Real(v) => query.bind(v),
        StoreValue::Text(v) => query.bind(v),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub question: StoreValue,
    pub answer: StoreValue,
    pub difficulty: StoreValue,
    pub category: StoreValue,
}

/// Unicode-aware, case-insensitive containment. An empty term matches everything.
pub fn contains_ignoring_case(text: &str, term: &str) -> bool {
    text.to_lowercase().contains(&term.to_lowercase())
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, difficulty, category FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

// LIKE only folds ASCII, so matching happens here rather than in SQL
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let questions = get_all_questions(pool).await?;
    Ok(questions
        .into_iter()
        .filter(|q| contains_ignoring_case(&q.question, term))
        .collect())
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, difficulty, category FROM questions
        WHERE questions.category = ?1
        ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

pub async fn create_question(pool: &SqlitePool, new_question: NewQuestion) -> sqlx::Result<i64> {
    let NewQuestion {
        question,
        answer,
        difficulty,
        category,
    } = new_question;

    let mut query = sqlx::query(
        r#"
        INSERT INTO questions (question, answer, difficulty, category) VALUES (?1, ?2, ?3, ?4)
        "#,
    );
    for value in [question, answer, difficulty, category] {
        query = bind_value(query, value);
    }
    let id = query.execute(pool).await?.last_insert_rowid();
    Ok(id)
}

/// Returns the number of rows removed.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Inserts or overwrites questions by id. Used for administrative seeding only.
pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for q in questions {
        sqlx::query(
            r#"
            INSERT INTO questions (id, question, answer, difficulty, category) VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                difficulty = excluded.difficulty,
                category = excluded.category
            "#,
        )
        .bind(q.id)
        .bind(q.question)
        .bind(q.answer)
        .bind(q.difficulty)
        .bind(q.category)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
