//! # Neighborhood Gateway Crate
//!
//! HTTP layer of the Neighborhood backend. Requests are routed to the domain
//! services (auth, users, chats, community, streams) and their results are
//! wrapped in the `{ "ok": true, ... }` / `{ "ok": false, "error": ... }`
//! envelopes the web client expects.
//!
//! ## Architecture
//!
//! - **REST**: `/api` endpoints with OpenAPI documentation
//! - **State**: shared, read-only service handles
//! - **Middleware**: bearer sessions, CORS, request logging
//!
//! ## Usage
//!
//! ```rust,ignore
//! use neighborhood_gateway::{create_router, GatewayState};
//!
//! let state = GatewayState::from_config(&config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{ErrorResponse, GatewayError, GatewayResult};
pub use middleware::{require_bearer, CurrentUser};
pub use state::GatewayState;

use std::sync::Arc;

use axum::{http::Method, middleware as axum_middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let state = Arc::new(state);
    #[allow(unused_mut)]
    let mut router = Router::new()
        .route("/health", get(rest::health::health_check))
        .nest("/api", rest::create_rest_routes())
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers(Any),
        )
        .layer(middleware::create_trace_middleware())
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    #[cfg(debug_assertions)]
    {
        router = router.merge(docs::swagger_ui());
    }

    router
}

#[cfg(debug_assertions)]
mod docs {
    use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
    use utoipa::{Modify, OpenApi};
    use utoipa_swagger_ui::SwaggerUi;

    use crate::{error, rest};

    #[derive(OpenApi)]
    #[openapi(
        paths(
            rest::health::health_check,
            rest::auth::enter,
            rest::auth::confirm,
            rest::auth::logout,
            rest::users::me,
            rest::users::edit_profile,
            rest::users::delete_account,
            rest::users::sales,
            rest::users::profile,
            rest::users::create_review,
            rest::chats::get_room,
            rest::chats::send_chat,
            rest::posts::create_post,
            rest::posts::get_post,
            rest::posts::update_post,
            rest::posts::delete_post,
            rest::posts::toggle_recommendation,
            rest::posts::create_answer,
            rest::streams::create_stream,
            rest::streams::get_stream,
            rest::streams::list_streams,
        ),
        components(
            schemas(
                error::ErrorResponse,
                rest::OkResponse,
                rest::health::HealthResponse,
                rest::auth::EnterRequest,
                rest::auth::ConfirmRequest,
                rest::auth::SessionResponse,
                rest::users::MeResponse,
                rest::users::SalesResponse,
                rest::users::ProfileResponse,
                rest::users::ReviewResponse,
                rest::chats::ChatRoomResponse,
                rest::chats::ChatResponse,
                rest::posts::PostDetailResponse,
                rest::posts::PostResponse,
                rest::posts::RecommendationResponse,
                rest::posts::AnswerResponse,
                rest::streams::StreamResponse,
                rest::streams::StreamListResponse,
                neighborhood_users::EditProfileRequest,
                neighborhood_users::CreateReviewRequest,
                neighborhood_users::UserView,
                neighborhood_users::SaleView,
                neighborhood_users::SaleProductView,
                neighborhood_users::ProductCount,
                neighborhood_users::ProfileView,
                neighborhood_users::ReviewView,
                neighborhood_users::ReviewAuthor,
                neighborhood_chats::SendChatRequest,
                neighborhood_chats::ChatRoomView,
                neighborhood_chats::ChatView,
                neighborhood_chats::ChatMessageView,
                neighborhood_chats::ChatSection,
                neighborhood_chats::ChatSender,
                neighborhood_community::CreatePostRequest,
                neighborhood_community::UpdatePostRequest,
                neighborhood_community::CreateAnswerRequest,
                neighborhood_community::PostDetailView,
                neighborhood_community::PostView,
                neighborhood_community::PostSummary,
                neighborhood_community::PostAuthor,
                neighborhood_community::PostCount,
                neighborhood_community::AnswerView,
                neighborhood_community::RecommendationView,
                neighborhood_streams::CreateStreamRequest,
                neighborhood_streams::StreamView,
            )
        ),
        modifiers(&BearerAuth),
        tags(
            (name = "Health", description = "Liveness"),
            (name = "Auth", description = "Contact login and sessions"),
            (name = "Users", description = "Profiles, sales and reviews"),
            (name = "Chats", description = "Chat rooms"),
            (name = "Posts", description = "Community board"),
            (name = "Streams", description = "Live stream sales"),
        )
    )]
    struct ApiDoc;

    struct BearerAuth;

    impl Modify for BearerAuth {
        fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
            if let Some(components) = openapi.components.as_mut() {
                components.add_security_scheme(
                    "bearer",
                    SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
                );
            }
        }
    }

    pub(crate) fn swagger_ui() -> SwaggerUi {
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
    }
}
