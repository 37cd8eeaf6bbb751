//! Demo data for local development.

use anyhow::Context;
use neighborhood_database::{
    ChatRepository, CreatePostRequest, CreateProductRequest, CreateReviewRequest,
    CreateStreamRequest, PostRepository, ProductRepository, ReviewRepository, StreamRepository,
    User, UserRepository,
};
use neighborhood_runtime::BackendServices;
use tracing::info;

const SELLER_EMAIL: &str = "seller@neighborhood.test";
const BUYER_PHONE: &str = "01012345678";

pub async fn run(services: &BackendServices) -> anyhow::Result<()> {
    let pool = services.db_pool.clone();
    let users = UserRepository::new(pool.clone());

    if users.find_by_email(SELLER_EMAIL).await?.is_some() {
        info!("demo data already present, nothing to do");
        return Ok(());
    }

    let seller = users
        .create("당근판매자", Some(SELLER_EMAIL), None)
        .await
        .context("failed to insert seller")?;
    let buyer = users
        .create("동네주민", None, Some(BUYER_PHONE))
        .await
        .context("failed to insert buyer")?;

    seed_market(services, &seller, &buyer).await?;
    seed_community(services, &seller, &buyer).await?;

    let streams = StreamRepository::new(pool);
    for (name, price) in [("주말 플리마켓 라이브", 0), ("수제 쿠키 판매 방송", 5_000)] {
        streams
            .create(
                seller.id,
                &CreateStreamRequest {
                    name: name.to_string(),
                    price,
                    description: "동네 이웃과 함께하는 라이브 방송입니다.".to_string(),
                },
            )
            .await
            .with_context(|| format!("failed to insert stream {name}"))?;
    }

    for user in [&seller, &buyer] {
        let session = services
            .gateway
            .authenticator
            .issue_session(user.id)
            .await
            .context("failed to issue demo session")?;
        info!(user_id = user.id, name = %user.name, token = %session.token, "demo session");
    }

    info!("demo data seeded");
    Ok(())
}

async fn seed_market(services: &BackendServices, seller: &User, buyer: &User) -> anyhow::Result<()> {
    let products = ProductRepository::new(services.db_pool.clone());
    let chair = products
        .create(
            seller.id,
            &CreateProductRequest {
                name: "캠핑 의자".to_string(),
                price: 20_000,
                image: None,
                description: "두 번 사용했어요.".to_string(),
            },
        )
        .await
        .context("failed to insert product")?;
    products.add_wish(buyer.id, chair.id).await?;
    products.record_sale(seller.id, chair.id).await?;

    let chats = ChatRepository::new(services.db_pool.clone());
    let room = chats
        .create_room(Some(chair.id), seller.id, buyer.id)
        .await
        .context("failed to insert chat room")?;
    chats.create_chat(room.id, buyer.id, "아직 판매중인가요?").await?;
    chats.create_chat(room.id, seller.id, "네 판매중이에요!").await?;

    ReviewRepository::new(services.db_pool.clone())
        .create(&CreateReviewRequest {
            created_by_id: buyer.id,
            created_for_id: seller.id,
            score: 5,
            review: serde_json::to_string(&["친절하고 매너가 좋아요", "응답이 빨라요"])?,
        })
        .await
        .context("failed to insert review")?;

    Ok(())
}

async fn seed_community(services: &BackendServices, seller: &User, buyer: &User) -> anyhow::Result<()> {
    let posts = PostRepository::new(services.db_pool.clone());
    let post = posts
        .create(
            buyer.id,
            &CreatePostRequest {
                title: "동네 병원 추천".to_string(),
                content: "주말에도 여는 소아과 있을까요?".to_string(),
            },
        )
        .await
        .context("failed to insert post")?;
    posts
        .create_answer(post.id, seller.id, "역 앞 소아과가 토요일 오전에 열어요.")
        .await?;
    posts.toggle_recommendation(post.id, seller.id).await?;

    Ok(())
}
