use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, Request, StatusCode,
    },
    Router,
};
use http_body_util::BodyExt;
use neighborhood_config::AppConfig;
use neighborhood_database::{ChatRepository, CreateProductRequest, ProductRepository};
use neighborhood_gateway::{create_router, GatewayState};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    pool: SqlitePool,
    _db_dir: TempDir,
}

struct TestResponse {
    status: StatusCode,
    json: Value,
}

/// A signed-in user of the test app.
struct Session {
    user_id: i64,
    token: String,
}

impl TestApp {
    async fn new() -> Self {
        let db_dir = TempDir::new().expect("create temp dir");
        let mut config = AppConfig::default();
        config.database.url = format!("sqlite://{}", db_dir.path().join("gateway.db").display());
        config.database.max_connections = 5;

        let state = GatewayState::from_config(&config)
            .await
            .expect("initialise gateway state");

        Self {
            pool: state.pool.clone(),
            router: create_router(state),
            _db_dir: db_dir,
        }
    }

    async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = match body {
            Some(json_body) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json_body).expect("serialize request body"))
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("build request"))
            .await
            .expect("dispatch request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect response body")
            .to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, json }
    }

    async fn get(&self, uri: &str, session: &Session) -> TestResponse {
        self.request(Method::GET, uri, None, Some(&session.token)).await
    }

    async fn send(&self, method: Method, uri: &str, body: Value, session: &Session) -> TestResponse {
        self.request(method, uri, Some(body), Some(&session.token)).await
    }

    /// Goes through enter and confirm, reading the login token from the database
    /// the way a delivery provider would.
    async fn sign_in(&self, email: &str) -> Session {
        let entered = self
            .request(Method::POST, "/api/users/enter", Some(json!({ "email": email })), None)
            .await;
        assert_eq!(entered.status, StatusCode::OK);
        assert_eq!(entered.json, json!({ "ok": true }));

        let (payload, user_id): (String, i64) = sqlx::query_as(
            "SELECT t.payload, t.user_id FROM login_tokens t JOIN users u ON u.id = t.user_id
             WHERE u.email = ? ORDER BY t.id DESC LIMIT 1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .expect("login token stored");

        let confirmed = self
            .request(Method::POST, "/api/users/confirm", Some(json!({ "token": payload })), None)
            .await;
        assert_eq!(confirmed.status, StatusCode::OK);
        assert_eq!(confirmed.json["ok"], true);

        Session {
            user_id,
            token: confirmed.json["token"].as_str().expect("session token").to_string(),
        }
    }
}

fn assert_failure(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(response.status, status, "{}", response.json);
    assert_eq!(response.json["ok"], false);
    assert_eq!(response.json["error"], message);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json["status"], "ok");
}

#[tokio::test]
async fn login_round_trip_and_logout() {
    let app = TestApp::new().await;
    let session = app.sign_in("me@example.com").await;

    let me = app.get("/api/users/me", &session).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.json["profile"]["id"], session.user_id);
    assert_eq!(me.json["profile"]["name"], "익명");
    assert_eq!(me.json["profile"]["email"], "me@example.com");

    let logout = app
        .request(Method::POST, "/api/users/logout", None, Some(&session.token))
        .await;
    assert_eq!(logout.json, json!({ "ok": true }));

    let me = app.get("/api/users/me", &session).await;
    assert_failure(&me, StatusCode::UNAUTHORIZED, "session not found");
}

#[tokio::test]
async fn requests_without_session_are_unauthorized() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/users/me", None, None).await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "missing authorization header");

    let response = app
        .request(Method::GET, "/api/posts/1", None, Some("not-a-session"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn enter_requires_a_contact() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::POST, "/api/users/enter", Some(json!({})), None)
        .await;
    assert_failure(
        &response,
        StatusCode::BAD_REQUEST,
        "이메일 혹은 전화번호 중 하나를 입력하세요.",
    );

    let response = app
        .request(Method::POST, "/api/users/confirm", Some(json!({ "token": "123456" })), None)
        .await;
    assert_failure(&response, StatusCode::NOT_FOUND, "인증번호가 존재하지 않습니다.");
}

#[tokio::test]
async fn profile_edit_validates_and_updates() {
    let app = TestApp::new().await;
    let me = app.sign_in("me@example.com").await;
    app.sign_in("taken@example.com").await;

    let response = app
        .send(Method::PUT, "/api/users/me", json!({ "email": "", "phone": "" }), &me)
        .await;
    assert_failure(
        &response,
        StatusCode::BAD_REQUEST,
        "이메일 혹은 전화번호 중 하나를 입력하세요.",
    );

    let response = app
        .send(Method::PUT, "/api/users/me", json!({ "name": "" }), &me)
        .await;
    assert_failure(&response, StatusCode::BAD_REQUEST, "이름을 입력하세요.");

    let response = app
        .send(Method::PUT, "/api/users/me", json!({ "email": "taken@example.com" }), &me)
        .await;
    assert_failure(&response, StatusCode::BAD_REQUEST, "이미 사용중인 이메일입니다.");

    let response = app
        .send(
            Method::PUT,
            "/api/users/me",
            json!({ "name": "당근이", "avatarUrl": "https://imagedelivery.net/me" }),
            &me,
        )
        .await;
    assert_eq!(response.json, json!({ "ok": true }));

    let profile = app.get("/api/users/me", &me).await;
    assert_eq!(profile.json["profile"]["name"], "당근이");
    assert_eq!(profile.json["profile"]["avatar"], "https://imagedelivery.net/me");
}

#[tokio::test]
async fn deleting_account_ends_the_session() {
    let app = TestApp::new().await;
    let me = app.sign_in("me@example.com").await;

    let response = app.request(Method::DELETE, "/api/users/me", None, Some(&me.token)).await;
    assert_eq!(response.json, json!({ "ok": true }));

    let response = app.get("/api/users/me", &me).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sales_carry_wish_counts() {
    let app = TestApp::new().await;
    let seller = app.sign_in("seller@example.com").await;
    let fan = app.sign_in("fan@example.com").await;

    let products = ProductRepository::new(app.pool.clone());
    let product = products
        .create(
            seller.user_id,
            &CreateProductRequest {
                name: "자전거".into(),
                price: 50_000,
                image: None,
                description: "거의 새것".into(),
            },
        )
        .await
        .unwrap();
    products.add_wish(fan.user_id, product.id).await.unwrap();
    products.record_sale(seller.user_id, product.id).await.unwrap();

    let response = app.get("/api/users/me/sales", &seller).await;
    assert_eq!(response.status, StatusCode::OK);
    let sale = &response.json["sales"][0];
    assert_eq!(sale["productId"], product.id);
    assert_eq!(sale["product"]["name"], "자전거");
    assert_eq!(sale["product"]["_count"]["wishes"], 1);
}

#[tokio::test]
async fn reviews_shape_public_profile() {
    let app = TestApp::new().await;
    let seller = app.sign_in("seller@example.com").await;
    let buyer = app.sign_in("buyer@example.com").await;
    let reviews = format!("/api/users/{}/reviews", seller.user_id);

    let response = app
        .send(Method::POST, &reviews, json!({ "score": 5, "boxes": ["친절해요"] }), &buyer)
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json["review"]["boxes"], json!(["친절해요"]));

    let response = app
        .send(Method::POST, &reviews, json!({ "score": 3 }), &seller)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(Method::GET, &format!("/api/users/{}", seller.user_id), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json["profile"]["mannerDegree"], 37.25);
    assert_eq!(response.json["profile"]["reviews"][0]["createdBy"]["id"], buyer.user_id);

    let response = app.request(Method::GET, "/api/users/9999", None, None).await;
    assert_failure(&response, StatusCode::NOT_FOUND, "사용자가 존재하지 않습니다.");

    let response = app.request(Method::GET, "/api/users/abc", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json["ok"], false);
}

#[tokio::test]
async fn posts_enforce_ownership() {
    let app = TestApp::new().await;
    let author = app.sign_in("author@example.com").await;
    let reader = app.sign_in("reader@example.com").await;

    let created = app
        .send(
            Method::POST,
            "/api/posts",
            json!({ "title": "분실물", "content": "검은 우산 보신 분?" }),
            &author,
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let post_id = created.json["post"]["id"].as_i64().unwrap();
    let post_uri = format!("/api/posts/{post_id}");

    let response = app
        .send(Method::PUT, &post_uri, json!({ "title": "가로채기" }), &reader)
        .await;
    assert_failure(&response, StatusCode::NOT_FOUND, "포스트를 수정할 수 없습니다.");

    let response = app.request(Method::DELETE, &post_uri, None, Some(&reader.token)).await;
    assert_failure(&response, StatusCode::NOT_FOUND, "포스트를 삭제할 수 없습니다.");

    let response = app
        .send(Method::PUT, &post_uri, json!({ "title": "분실물 찾아요" }), &author)
        .await;
    assert_eq!(response.json["post"]["title"], "분실물 찾아요");

    let response = app.request(Method::DELETE, &post_uri, None, Some(&author.token)).await;
    assert_eq!(response.json, json!({ "ok": true }));

    let response = app.get(&post_uri, &author).await;
    assert_failure(&response, StatusCode::NOT_FOUND, "포스트가 존재하지 않습니다.");
}

#[tokio::test]
async fn post_detail_tracks_answers_and_recommendations() {
    let app = TestApp::new().await;
    let author = app.sign_in("author@example.com").await;
    let reader = app.sign_in("reader@example.com").await;

    let created = app
        .send(
            Method::POST,
            "/api/posts",
            json!({ "title": "맛집", "content": "근처 국밥집 추천해주세요" }),
            &author,
        )
        .await;
    let post_id = created.json["post"]["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::POST,
            &format!("/api/posts/{post_id}/recommendation"),
            None,
            Some(&reader.token),
        )
        .await;
    assert_eq!(response.json["ok"], true);
    assert_eq!(response.json["isRecommend"], true);

    let response = app
        .send(
            Method::POST,
            &format!("/api/posts/{post_id}/answers"),
            json!({ "answer": "시장 안쪽이요" }),
            &reader,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let detail = app.get(&format!("/api/posts/{post_id}"), &reader).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.json["isRecommend"], true);
    assert_eq!(detail.json["post"]["_count"]["answers"], 1);
    assert_eq!(detail.json["post"]["_count"]["recommendations"], 1);
    assert_eq!(detail.json["post"]["answers"][0]["answer"], "시장 안쪽이요");

    let detail = app.get(&format!("/api/posts/{post_id}"), &author).await;
    assert_eq!(detail.json["isRecommend"], false);
}

#[tokio::test]
async fn chat_rooms_are_private_to_participants() {
    let app = TestApp::new().await;
    let seller = app.sign_in("seller@example.com").await;
    let buyer = app.sign_in("buyer@example.com").await;
    let outsider = app.sign_in("outsider@example.com").await;

    let room = ChatRepository::new(app.pool.clone())
        .create_room(None, seller.user_id, buyer.user_id)
        .await
        .unwrap();
    let room_uri = format!("/api/chats/{}", room.id);

    let response = app.send(Method::POST, &room_uri, json!({ "chat": "안녕하세요" }), &buyer).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json["chat"]["chat"], "안녕하세요");

    let response = app.send(Method::POST, &room_uri, json!({ "chat": " " }), &buyer).await;
    assert_failure(&response, StatusCode::BAD_REQUEST, "*메시지를 입력해주세요.");

    let response = app.get(&room_uri, &seller).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json["chats"]["sellerId"], seller.user_id);
    assert_eq!(response.json["chats"]["chats"][0]["user"]["id"], buyer.user_id);
    assert_eq!(response.json["chats"]["sections"].as_array().unwrap().len(), 1);

    let response = app.get(&room_uri, &outsider).await;
    assert_failure(&response, StatusCode::NOT_FOUND, "채팅방이 존재하지 않습니다.");
}

#[tokio::test]
async fn streams_validate_and_page() {
    let app = TestApp::new().await;
    let me = app.sign_in("host@example.com").await;

    let response = app
        .send(
            Method::POST,
            "/api/streams",
            json!({ "name": "짧음", "price": 1000, "description": "충분히 긴 설명입니다" }),
            &me,
        )
        .await;
    assert_failure(&response, StatusCode::BAD_REQUEST, "*제목을 5글자 이상 입력해주세요.");

    let response = app
        .send(
            Method::POST,
            "/api/streams",
            json!({ "name": "주말 플리마켓 라이브", "description": "충분히 긴 설명입니다" }),
            &me,
        )
        .await;
    assert_failure(&response, StatusCode::BAD_REQUEST, "*가격을 입력해주세요.");

    let mut ids = Vec::new();
    for n in 0..11 {
        let response = app
            .send(
                Method::POST,
                "/api/streams",
                json!({
                    "name": format!("라이브 방송 {n}"),
                    "price": 1000 * n,
                    "description": "충분히 긴 설명입니다",
                }),
                &me,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        ids.push(response.json["stream"]["id"].as_i64().unwrap());
    }

    let response = app.get(&format!("/api/streams/{}", ids[0]), &me).await;
    assert_eq!(response.json["stream"]["name"], "라이브 방송 0");
    assert!(response.json["stream"]["createdLabel"].is_string());

    let first = app.get("/api/streams", &me).await;
    assert_eq!(first.json["page"], 1);
    assert_eq!(first.json["streams"].as_array().unwrap().len(), 10);
    assert_eq!(first.json["streams"][0]["id"], ids[10]);

    let second = app.get("/api/streams?page=2", &me).await;
    assert_eq!(second.json["streams"].as_array().unwrap().len(), 1);
    assert_eq!(second.json["streams"][0]["id"], ids[0]);

    let response = app.get("/api/streams/9999", &me).await;
    assert_failure(&response, StatusCode::NOT_FOUND, "스트림이 존재하지 않습니다.");
}
