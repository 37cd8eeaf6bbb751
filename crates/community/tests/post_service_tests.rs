use neighborhood_common::TimeFormatter;
use neighborhood_community::{
    CreateAnswerRequest, CreatePostRequest, PostError, PostService, UpdatePostRequest,
};
use neighborhood_config::DatabaseConfig;
use neighborhood_database::{initialize_database, User, UserRepository};
use tempfile::TempDir;

struct TestContext {
    service: PostService,
    author: User,
    reader: User,
    _temp_dir: TempDir,
}

impl TestContext {
    async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", temp_dir.path().join("posts.db").display()),
            max_connections: 2,
        };
        let pool = initialize_database(&config).await.unwrap();
        let users = UserRepository::new(pool.clone());

        Self {
            service: PostService::new(pool.clone(), TimeFormatter::kst()),
            author: users.create("author", Some("author@example.com"), None).await.unwrap(),
            reader: users.create("reader", Some("reader@example.com"), None).await.unwrap(),
            _temp_dir: temp_dir,
        }
    }

    async fn post(&self) -> i64 {
        self.service
            .create_post(
                self.author.id,
                CreatePostRequest {
                    title: "동네 병원 추천".into(),
                    content: "주말에도 여는 소아과 있을까요?".into(),
                },
            )
            .await
            .unwrap()
            .id
    }
}

#[tokio::test]
async fn missing_post_is_not_found() {
    let ctx = TestContext::new().await;

    let err = ctx.service.get_post(404, ctx.reader.id).await.unwrap_err();
    assert!(matches!(err, PostError::PostNotFound));
    assert_eq!(err.to_string(), "포스트가 존재하지 않습니다.");
}

#[tokio::test]
async fn post_detail_carries_answers_counts_and_recommendation() {
    let ctx = TestContext::new().await;
    let post_id = ctx.post().await;

    ctx.service
        .create_answer(post_id, ctx.reader.id, CreateAnswerRequest { answer: "역 앞에 있어요".into() })
        .await
        .unwrap();
    let toggled = ctx.service.toggle_recommendation(post_id, ctx.reader.id).await.unwrap();
    assert!(toggled.is_recommend);
    assert_eq!(toggled.recommendations, 1);

    let seen_by_reader = ctx.service.get_post(post_id, ctx.reader.id).await.unwrap();
    assert!(seen_by_reader.is_recommend);
    assert_eq!(seen_by_reader.post.user.name, "author");
    assert_eq!(seen_by_reader.post.count.answers, 1);
    assert_eq!(seen_by_reader.post.count.recommendations, 1);
    assert_eq!(seen_by_reader.post.answers[0].user.name, "reader");
    assert_eq!(seen_by_reader.post.answers[0].updated_ago, "몇 초 전");
    assert_eq!(seen_by_reader.post.created_ago, "몇 초 전");

    let seen_by_author = ctx.service.get_post(post_id, ctx.author.id).await.unwrap();
    assert!(!seen_by_author.is_recommend);

    let json = serde_json::to_value(&seen_by_reader).unwrap();
    assert_eq!(json["isRecommend"], true);
    assert_eq!(json["post"]["_count"]["answers"], 1);
    assert_eq!(json["post"]["_count"]["recommendations"], 1);
    assert!(json["post"]["answers"][0]["updatedAgo"].is_string());
}

#[tokio::test]
async fn recommendation_toggles_off() {
    let ctx = TestContext::new().await;
    let post_id = ctx.post().await;

    ctx.service.toggle_recommendation(post_id, ctx.reader.id).await.unwrap();
    let toggled = ctx.service.toggle_recommendation(post_id, ctx.reader.id).await.unwrap();
    assert!(!toggled.is_recommend);
    assert_eq!(toggled.recommendations, 0);

    assert!(matches!(
        ctx.service.toggle_recommendation(post_id + 1, ctx.reader.id).await,
        Err(PostError::PostNotFound)
    ));
}

#[tokio::test]
async fn only_the_author_can_edit() {
    let ctx = TestContext::new().await;
    let post_id = ctx.post().await;
    let changes = || UpdatePostRequest {
        title: Some("수정된 제목".into()),
        content: None,
    };

    let err = ctx
        .service
        .update_post(post_id, ctx.reader.id, changes())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "포스트를 수정할 수 없습니다.");

    let err = ctx
        .service
        .update_post(post_id + 1, ctx.author.id, changes())
        .await
        .unwrap_err();
    assert!(matches!(err, PostError::CannotEdit));

    let updated = ctx
        .service
        .update_post(post_id, ctx.author.id, changes())
        .await
        .unwrap();
    assert_eq!(updated.title, "수정된 제목");
    assert_eq!(updated.content, "주말에도 여는 소아과 있을까요?");
}

#[tokio::test]
async fn only_the_author_can_delete() {
    let ctx = TestContext::new().await;
    let post_id = ctx.post().await;

    let err = ctx.service.delete_post(post_id, ctx.reader.id).await.unwrap_err();
    assert!(matches!(err, PostError::CannotDelete));
    assert_eq!(err.to_string(), "포스트를 삭제할 수 없습니다.");

    ctx.service.delete_post(post_id, ctx.author.id).await.unwrap();
    assert!(matches!(
        ctx.service.get_post(post_id, ctx.author.id).await,
        Err(PostError::PostNotFound)
    ));
    assert!(matches!(
        ctx.service.delete_post(post_id, ctx.author.id).await,
        Err(PostError::CannotDelete)
    ));
}

#[tokio::test]
async fn blank_fields_are_rejected() {
    let ctx = TestContext::new().await;

    let err = ctx
        .service
        .create_post(
            ctx.author.id,
            CreatePostRequest {
                title: " ".into(),
                content: "내용".into(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "*제목을 입력해주세요.");

    let post_id = ctx.post().await;
    let err = ctx
        .service
        .create_answer(post_id, ctx.reader.id, CreateAnswerRequest { answer: "".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, PostError::InvalidField(_)));

    let err = ctx
        .service
        .create_answer(post_id + 1, ctx.reader.id, CreateAnswerRequest { answer: "답".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, PostError::PostNotFound));
}
