//! Deals quiz questions one at a time.
//!
//! The selector keeps no memory between calls: the client sends back the ids it
//! has already seen, and the next question is drawn uniformly from whatever is
//! left in the category.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::{Question, QuestionRepository};
use crate::error::TriviaResult;
use crate::telemetry::{QUIZ_EXHAUSTED_CNTR, QUIZ_QUESTIONS_CNTR};

/// Metric label for categories without any stored question. Client-supplied ids
/// only become labels once the store has questions for them.
pub const UNKNOWN_CATEGORY_LABEL: &str = "unknown";

/// Picks an unseen question from `category`.
///
/// Returns `Ok(None)` once every question of the category is in `excluded`
/// (or the category has none); that is the normal end of a quiz, not an error.
pub async fn next_question<Repo, R>(
    repo: &Repo,
    category: i64,
    excluded: &HashSet<i64>,
    rng: &mut R,
) -> TriviaResult<Option<Question>>
where
    Repo: QuestionRepository,
    R: Rng + ?Sized,
{
    let in_category = repo.list_by_category(category).await?;
    let label = if in_category.is_empty() {
        UNKNOWN_CATEGORY_LABEL.to_owned()
    } else {
        category.to_string()
    };
    let eligible: Vec<Question> = in_category
        .into_iter()
        .filter(|q| !excluded.contains(&q.id))
        .collect();

    let picked = eligible.choose(rng).cloned();
    match &picked {
        Some(q) => {
            tracing::debug!(category, question = q.id, left = eligible.len(), "Dealt question");
            QUIZ_QUESTIONS_CNTR.with_label_values(&[label.as_str()]).inc();
        }
        None => {
            tracing::info!(category, seen = excluded.len(), "Quiz exhausted");
            QUIZ_EXHAUSTED_CNTR.with_label_values(&[label.as_str()]).inc();
        }
    }
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::questions::contains_ignoring_case;
    use crate::db::NewQuestion;
    use crate::error::TriviaError;
    use prometheus::{Encoder, TextEncoder};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    /// Read-only repository over a fixed list of questions.
    struct FixedRepository(Vec<Question>);

    impl QuestionRepository for FixedRepository {
        async fn list_all(&self) -> TriviaResult<Vec<Question>> {
            Ok(self.0.clone())
        }

        async fn search_by_text(&self, term: &str) -> TriviaResult<Vec<Question>> {
            Ok(self
                .0
                .iter()
                .filter(|q| contains_ignoring_case(&q.question, term))
                .cloned()
                .collect())
        }

        async fn list_by_category(&self, category: i64) -> TriviaResult<Vec<Question>> {
            Ok(self
                .0
                .iter()
                .filter(|q| q.category == category)
                .cloned()
                .collect())
        }

        async fn insert(&self, _question: NewQuestion) -> TriviaResult<i64> {
            Err(TriviaError::PersistenceFailure(sqlx::Error::PoolClosed))
        }

        async fn delete_by_id(&self, _id: i64) -> TriviaResult<()> {
            Err(TriviaError::NotFound)
        }
    }

    fn question(id: i64, category: i64) -> Question {
        Question {
            id,
            question: format!("Question {id}"),
            answer: format!("Answer {id}"),
            difficulty: 1,
            category,
        }
    }

    fn repo() -> FixedRepository {
        FixedRepository(vec![
            question(1, 1),
            question(2, 1),
            question(3, 2),
            question(4, 1),
            question(5, 3),
            question(6, 1),
        ])
    }

    #[tokio::test]
    async fn never_deals_excluded_or_foreign_questions() {
        let repo = repo();
        let excluded: HashSet<i64> = [1, 4].into();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let q = next_question(&repo, 1, &excluded, &mut rng)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(q.category, 1);
            assert!(!excluded.contains(&q.id));
        }
    }

    #[tokio::test]
    async fn exhausted_when_everything_was_seen() {
        let repo = repo();
        let mut rng = StdRng::seed_from_u64(1);
        let seen: HashSet<i64> = [1, 2, 4, 6].into();
        assert_eq!(next_question(&repo, 1, &seen, &mut rng).await.unwrap(), None);
        assert_eq!(
            next_question(&repo, 99, &HashSet::new(), &mut rng)
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn unknown_categories_share_one_metric_label() {
        let repo = repo();
        let mut rng = StdRng::seed_from_u64(5);
        for category in 1000..1010 {
            assert_eq!(
                next_question(&repo, category, &HashSet::new(), &mut rng)
                    .await
                    .unwrap(),
                None
            );
        }
        // a known category that ran out keeps its own label
        let seen: HashSet<i64> = [3].into();
        next_question(&repo, 2, &seen, &mut rng).await.unwrap();

        let mut buf = vec![];
        TextEncoder::new()
            .encode(&prometheus::gather(), &mut buf)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let exhausted: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("quiz_exhausted_total{"))
            .collect();
        assert!(exhausted.iter().any(|l| l.contains(r#"category="unknown""#)));
        assert!(exhausted.iter().any(|l| l.contains(r#"category="2""#)));
        assert!(!exhausted.iter().any(|l| l.contains(r#"category="100"#)), "{exhausted:?}");
    }

    #[tokio::test]
    async fn playing_through_a_category_visits_each_question_once() {
        let repo = repo();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        while let Some(q) = next_question(&repo, 1, &seen, &mut rng).await.unwrap() {
            assert!(seen.insert(q.id));
        }
        assert_eq!(seen, HashSet::from([1, 2, 4, 6]));
    }

    #[tokio::test]
    async fn same_seed_same_pick() {
        let repo = repo();
        let none = HashSet::new();
        let a = next_question(&repo, 1, &none, &mut StdRng::seed_from_u64(9))
            .await
            .unwrap();
        let b = next_question(&repo, 1, &none, &mut StdRng::seed_from_u64(9))
            .await
            .unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn every_eligible_question_gets_picked() {
        let repo = repo();
        let none = HashSet::new();
        let mut rng = StdRng::seed_from_u64(3);
        let mut counts: HashMap<i64, usize> = HashMap::new();
        for _ in 0..4000 {
            let q = next_question(&repo, 1, &none, &mut rng)
                .await
                .unwrap()
                .unwrap();
            *counts.entry(q.id).or_default() += 1;
        }
        assert_eq!(counts.len(), 4);
        // expected 1000 each
        assert!(counts.values().all(|&n| (800..1200).contains(&n)), "{counts:?}");
    }
}
