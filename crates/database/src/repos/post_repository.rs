//! Repository for community posts, their answers and recommendations.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::entities::{
    Answer, AnswerLine, CreatePostRequest, Post, PostDetail, PostOwner, UpdatePostRequest,
};
use crate::types::{DatabaseError, DatabaseResult};

#[derive(Clone)]
pub struct PostRepository {
    pool: SqlitePool,
}

impl PostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: i64, request: &CreatePostRequest) -> DatabaseResult<Post> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO posts (user_id, title, content, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&request.title)
        .bind(&request.content)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(post_id = id, user_id, "post created");

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("post {id}")))
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            "SELECT id, user_id, title, content, created_at, updated_at FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(post)
    }

    /// Looks up only the author, for ownership checks.
    pub async fn find_owner(&self, id: i64) -> DatabaseResult<Option<PostOwner>> {
        let owner = sqlx::query_as::<_, PostOwner>("SELECT id, user_id FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    pub async fn find_detail(&self, id: i64) -> DatabaseResult<Option<PostDetail>> {
        let detail = sqlx::query_as::<_, PostDetail>(
            r#"
            SELECT p.id, p.title, p.content, p.created_at, p.updated_at,
                   u.id AS user_id, u.name AS user_name, u.avatar AS user_avatar,
                   (SELECT COUNT(*) FROM answers WHERE post_id = p.id) AS answer_count,
                   (SELECT COUNT(*) FROM recommendations WHERE post_id = p.id) AS recommendation_count
            FROM posts p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(detail)
    }

    /// Answers of a post, oldest first.
    pub async fn answers_for(&self, post_id: i64) -> DatabaseResult<Vec<AnswerLine>> {
        let answers = sqlx::query_as::<_, AnswerLine>(
            r#"
            SELECT a.id, a.answer, a.updated_at,
                   u.id AS user_id, u.name AS user_name, u.avatar AS user_avatar
            FROM answers a
            JOIN users u ON u.id = a.user_id
            WHERE a.post_id = ?
            ORDER BY a.created_at ASC, a.id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(answers)
    }

    pub async fn find_answer_line(&self, answer_id: i64) -> DatabaseResult<Option<AnswerLine>> {
        let answer = sqlx::query_as::<_, AnswerLine>(
            r#"
            SELECT a.id, a.answer, a.updated_at,
                   u.id AS user_id, u.name AS user_name, u.avatar AS user_avatar
            FROM answers a
            JOIN users u ON u.id = a.user_id
            WHERE a.id = ?
            "#,
        )
        .bind(answer_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(answer)
    }

    pub async fn update(&self, id: i64, request: &UpdatePostRequest) -> DatabaseResult<Post> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            UPDATE posts SET
                title = COALESCE(?, title),
                content = COALESCE(?, content),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(request.title.as_deref())
        .bind(request.content.as_deref())
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("post {id}")));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("post {id}")))
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_recommended(&self, post_id: i64, user_id: i64) -> DatabaseResult<bool> {
        let exists: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM recommendations WHERE post_id = ? AND user_id = ?")
                .bind(post_id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(exists.is_some())
    }

    pub async fn count_recommendations(&self, post_id: i64) -> DatabaseResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM recommendations WHERE post_id = ?")
                .bind(post_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Adds the recommendation when absent, removes it otherwise.
    /// Returns whether the user recommends the post afterwards.
    pub async fn toggle_recommendation(&self, post_id: i64, user_id: i64) -> DatabaseResult<bool> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM recommendations WHERE post_id = ? AND user_id = ?")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let recommended = if removed.rows_affected() > 0 {
            false
        } else {
            let inserted = sqlx::query(
                "INSERT OR IGNORE INTO recommendations (user_id, post_id, created_at) VALUES (?, ?, ?)",
            )
            .bind(user_id)
            .bind(post_id)
            .bind(Utc::now().to_rfc3339())
            .execute(&mut *tx)
            .await?;
            if inserted.rows_affected() == 0 {
                debug!(post_id, user_id, "recommendation already present");
            }
            true
        };

        tx.commit().await?;
        debug!(post_id, user_id, recommended, "recommendation toggled");
        Ok(recommended)
    }

    pub async fn create_answer(
        &self,
        post_id: i64,
        user_id: i64,
        answer: &str,
    ) -> DatabaseResult<Answer> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO answers (user_id, post_id, answer, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(post_id)
        .bind(answer)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let answer = sqlx::query_as::<_, Answer>(
            "SELECT id, user_id, post_id, answer, created_at, updated_at FROM answers WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{migrated_pool, user};

    fn request(title: &str) -> CreatePostRequest {
        CreatePostRequest {
            title: title.to_string(),
            content: "동네 맛집 추천 부탁드려요".to_string(),
        }
    }

    #[tokio::test]
    async fn test_detail_counts_answers_and_recommendations() {
        let (pool, _dir) = migrated_pool().await;
        let author = user(&pool, "author").await;
        let reader = user(&pool, "reader").await;
        let repo = PostRepository::new(pool);

        let post = repo.create(author.id, &request("질문")).await.unwrap();
        repo.create_answer(post.id, reader.id, "여기 추천해요").await.unwrap();
        repo.create_answer(post.id, author.id, "감사합니다").await.unwrap();
        repo.toggle_recommendation(post.id, reader.id).await.unwrap();

        let detail = repo.find_detail(post.id).await.unwrap().unwrap();
        assert_eq!(detail.user_id, author.id);
        assert_eq!(detail.user_name, "author");
        assert_eq!(detail.answer_count, 2);
        assert_eq!(detail.recommendation_count, 1);

        let answers = repo.answers_for(post.id).await.unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].answer, "여기 추천해요");
        assert_eq!(answers[0].user_name, "reader");
    }

    #[tokio::test]
    async fn test_missing_post_has_no_detail() {
        let (pool, _dir) = migrated_pool().await;
        let repo = PostRepository::new(pool);

        assert!(repo.find_detail(7).await.unwrap().is_none());
        assert!(repo.find_owner(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_toggle_recommendation_flips_state() {
        let (pool, _dir) = migrated_pool().await;
        let author = user(&pool, "author").await;
        let repo = PostRepository::new(pool);
        let post = repo.create(author.id, &request("질문")).await.unwrap();

        assert!(!repo.is_recommended(post.id, author.id).await.unwrap());
        assert!(repo.toggle_recommendation(post.id, author.id).await.unwrap());
        assert!(repo.is_recommended(post.id, author.id).await.unwrap());
        assert_eq!(repo.count_recommendations(post.id).await.unwrap(), 1);
        assert!(!repo.toggle_recommendation(post.id, author.id).await.unwrap());
        assert!(!repo.is_recommended(post.id, author.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_toggles_do_not_fail() {
        let (pool, _dir) = migrated_pool().await;
        let author = user(&pool, "author").await;
        let repo = PostRepository::new(pool);
        let post = repo.create(author.id, &request("질문")).await.unwrap();

        let (first, second) = tokio::join!(
            repo.toggle_recommendation(post.id, author.id),
            repo.toggle_recommendation(post.id, author.id),
        );
        first.unwrap();
        second.unwrap();
        assert!(repo.count_recommendations(post.id).await.unwrap() <= 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_post() {
        let (pool, _dir) = migrated_pool().await;
        let author = user(&pool, "author").await;
        let repo = PostRepository::new(pool);
        let post = repo.create(author.id, &request("before")).await.unwrap();

        let updated = repo
            .update(
                post.id,
                &UpdatePostRequest {
                    title: Some("after".into()),
                    content: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "after");
        assert_eq!(updated.content, post.content);

        repo.create_answer(post.id, author.id, "self answer").await.unwrap();
        assert!(repo.delete(post.id).await.unwrap());
        assert!(repo.find_by_id(post.id).await.unwrap().is_none());
        assert!(repo.answers_for(post.id).await.unwrap().is_empty());
    }
}
