//! Community board operations.

use neighborhood_common::{Field, InputKind, TimeFormatter};
use neighborhood_database::{
    AnswerLine, CreatePostRequest as NewPost, PostRepository, UpdatePostRequest as PostChanges,
};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::types::{
    AnswerView, CreateAnswerRequest, CreatePostRequest, PostAuthor, PostCount, PostDetailView,
    PostError, PostResult, PostSummary, PostView, RecommendationView, UpdatePostRequest,
};

const MISSING_TITLE: &str = "*제목을 입력해주세요.";
const MISSING_CONTENT: &str = "*내용을 입력해주세요.";
const MISSING_ANSWER: &str = "*답변을 입력해주세요.";

fn title_field() -> Field {
    Field::new("title", InputKind::Text).required(MISSING_TITLE)
}

fn content_field() -> Field {
    Field::new("content", InputKind::Text).required(MISSING_CONTENT)
}

#[derive(Clone)]
pub struct PostService {
    posts: PostRepository,
    formatter: TimeFormatter,
}

impl PostService {
    pub fn new(pool: SqlitePool, formatter: TimeFormatter) -> Self {
        Self {
            posts: PostRepository::new(pool),
            formatter,
        }
    }

    /// Loads a post with its answers, as seen by `viewer_id`.
    pub async fn get_post(&self, post_id: i64, viewer_id: i64) -> PostResult<PostDetailView> {
        let detail = self
            .posts
            .find_detail(post_id)
            .await?
            .ok_or(PostError::PostNotFound)?;

        let answers = self
            .posts
            .answers_for(post_id)
            .await?
            .into_iter()
            .map(|line| self.answer_view(line))
            .collect();

        let is_recommend = self.posts.is_recommended(post_id, viewer_id).await?;

        Ok(PostDetailView {
            post: PostView {
                id: detail.id,
                title: detail.title,
                content: detail.content,
                created: detail.created_at,
                created_ago: self.formatter.time_interval_from_now(detail.created_at),
                user: PostAuthor {
                    id: detail.user_id,
                    name: detail.user_name,
                    avatar: detail.user_avatar,
                },
                answers,
                count: PostCount {
                    answers: detail.answer_count,
                    recommendations: detail.recommendation_count,
                },
            },
            is_recommend,
        })
    }

    pub async fn create_post(&self, user_id: i64, request: CreatePostRequest) -> PostResult<PostSummary> {
        title_field().check(Some(&request.title))?;
        content_field().check(Some(&request.content))?;

        let post = self
            .posts
            .create(
                user_id,
                &NewPost {
                    title: request.title.trim().to_string(),
                    content: request.content.trim().to_string(),
                },
            )
            .await?;
        Ok(post.into())
    }

    /// Only the author may edit. A missing post is reported the same way as a
    /// foreign one.
    pub async fn update_post(
        &self,
        post_id: i64,
        user_id: i64,
        request: UpdatePostRequest,
    ) -> PostResult<PostSummary> {
        match self.posts.find_owner(post_id).await? {
            Some(owner) if owner.user_id == user_id => {}
            _ => {
                warn!(post_id, user_id, "post edit refused");
                return Err(PostError::CannotEdit);
            }
        }

        if let Some(title) = request.title.as_deref() {
            title_field().check(Some(title))?;
        }
        if let Some(content) = request.content.as_deref() {
            content_field().check(Some(content))?;
        }

        let post = self
            .posts
            .update(
                post_id,
                &PostChanges {
                    title: request.title.map(|t| t.trim().to_string()),
                    content: request.content.map(|c| c.trim().to_string()),
                },
            )
            .await?;
        info!(post_id, user_id, "post updated");
        Ok(post.into())
    }

    pub async fn delete_post(&self, post_id: i64, user_id: i64) -> PostResult<()> {
        match self.posts.find_owner(post_id).await? {
            Some(owner) if owner.user_id == user_id => {}
            _ => {
                warn!(post_id, user_id, "post delete refused");
                return Err(PostError::CannotDelete);
            }
        }

        self.posts.delete(post_id).await?;
        info!(post_id, user_id, "post deleted");
        Ok(())
    }

    pub async fn toggle_recommendation(
        &self,
        post_id: i64,
        user_id: i64,
    ) -> PostResult<RecommendationView> {
        self.ensure_post(post_id).await?;

        let is_recommend = self.posts.toggle_recommendation(post_id, user_id).await?;
        let recommendations = self.posts.count_recommendations(post_id).await?;

        Ok(RecommendationView {
            is_recommend,
            recommendations,
        })
    }

    pub async fn create_answer(
        &self,
        post_id: i64,
        user_id: i64,
        request: CreateAnswerRequest,
    ) -> PostResult<AnswerView> {
        Field::new("answer", InputKind::Text)
            .required(MISSING_ANSWER)
            .check(Some(&request.answer))?;
        self.ensure_post(post_id).await?;

        let answer = self
            .posts
            .create_answer(post_id, user_id, request.answer.trim())
            .await?;
        info!(post_id, answer_id = answer.id, user_id, "answer created");

        let line = self
            .posts
            .find_answer_line(answer.id)
            .await?
            .ok_or(PostError::PostNotFound)?;
        Ok(self.answer_view(line))
    }

    async fn ensure_post(&self, post_id: i64) -> PostResult<()> {
        self.posts
            .find_owner(post_id)
            .await?
            .map(|_| ())
            .ok_or(PostError::PostNotFound)
    }

    fn answer_view(&self, line: AnswerLine) -> AnswerView {
        AnswerView {
            id: line.id,
            answer: line.answer,
            updated: line.updated_at,
            updated_ago: self.formatter.time_interval_from_now(line.updated_at),
            user: PostAuthor {
                id: line.user_id,
                name: line.user_name,
                avatar: line.user_avatar,
            },
        }
    }
}
