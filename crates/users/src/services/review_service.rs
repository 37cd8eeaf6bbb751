//! Public profiles and the reviews behind their manner degree.

use neighborhood_common::{get_manner_degree, review_boxes, FieldError, TimeFormatter};
use neighborhood_config::MannerConfig;
use neighborhood_database::{
    CreateReviewRequest as NewReview, ReviewLine, ReviewRepository, UserRepository,
};
use sqlx::SqlitePool;
use tracing::info;

use crate::types::{
    CreateReviewRequest, ProfileView, ReviewAuthor, ReviewView, UserError, UserResult,
};

const SCORE_RANGE: std::ops::RangeInclusive<i64> = 1..=5;
const INVALID_SCORE: &str = "*평점은 1점에서 5점 사이로 선택해주세요.";
const INVALID_BOX: &str = "*후기 항목이 올바르지 않습니다.";

#[derive(Clone)]
pub struct ReviewService {
    users: UserRepository,
    reviews: ReviewRepository,
    formatter: TimeFormatter,
    initial_degree: f64,
}

impl ReviewService {
    pub fn new(pool: SqlitePool, formatter: TimeFormatter, manner: &MannerConfig) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            reviews: ReviewRepository::new(pool),
            formatter,
            initial_degree: manner.initial_degree,
        }
    }

    pub async fn profile(&self, user_id: i64) -> UserResult<ProfileView> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::UserNotFound)?;

        let lines = self.reviews.received_by(user_id).await?;
        let scores: Vec<i64> = lines.iter().map(|line| line.score).collect();

        Ok(ProfileView {
            id: user.id,
            name: user.name,
            avatar: user.avatar,
            manner_degree: get_manner_degree(self.initial_degree, &scores),
            reviews: lines.into_iter().map(|line| self.review_view(line)).collect(),
        })
    }

    /// Leaves a review from `author_id` on the profile of `target_id`.
    pub async fn create_review(
        &self,
        author_id: i64,
        target_id: i64,
        request: CreateReviewRequest,
    ) -> UserResult<ReviewView> {
        if author_id == target_id {
            return Err(UserError::SelfReview);
        }
        if !SCORE_RANGE.contains(&request.score) {
            return Err(FieldError::new("score", INVALID_SCORE).into());
        }

        let boxes: Vec<String> = request
            .boxes
            .iter()
            .map(|b| b.trim().to_string())
            .collect();
        // Boxes are stored as quoted phrases and must survive the round trip unescaped.
        if boxes.iter().any(|b| b.is_empty() || b.contains(['"', '\\'])) {
            return Err(FieldError::new("boxes", INVALID_BOX).into());
        }

        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(UserError::UserNotFound)?;
        if self.users.find_by_id(target_id).await?.is_none() {
            return Err(UserError::UserNotFound);
        }

        let review = self
            .reviews
            .create(&NewReview {
                created_by_id: author_id,
                created_for_id: target_id,
                score: request.score,
                review: encode_boxes(&boxes),
            })
            .await?;
        info!(review_id = review.id, author_id, target_id, "review left");

        Ok(self.review_view(ReviewLine {
            id: review.id,
            score: review.score,
            review: review.review,
            created_at: review.created_at,
            created_by_id: author.id,
            created_by_name: author.name,
            created_by_avatar: author.avatar,
        }))
    }

    fn review_view(&self, line: ReviewLine) -> ReviewView {
        ReviewView {
            id: line.id,
            score: line.score,
            boxes: review_boxes(&line.review),
            created: line.created_at,
            created_ago: self.formatter.time_interval_from_now(line.created_at),
            created_by: ReviewAuthor {
                id: line.created_by_id,
                name: line.created_by_name,
                avatar: line.created_by_avatar,
            },
        }
    }
}

/// Stores boxes the way the web client writes them, `["a","b"]`.
fn encode_boxes(boxes: &[String]) -> String {
    serde_json::to_string(boxes).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_boxes_parse_back() {
        let boxes = vec!["친절하고 매너가 좋아요".to_string(), "응답이 빨라요".to_string()];
        let encoded = encode_boxes(&boxes);
        assert_eq!(encoded, r#"["친절하고 매너가 좋아요","응답이 빨라요"]"#);
        assert_eq!(review_boxes(&encoded), boxes);
    }

    #[test]
    fn no_boxes_encode_as_empty_list() {
        assert_eq!(encode_boxes(&[]), "[]");
        assert!(review_boxes("[]").is_empty());
    }
}
