//! Neighborhood Database Crate
//!
//! Connection management, migrations, row types and the repositories the
//! domain crates read and write through.

use neighborhood_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

pub use repos::{
    ChatRepository, PostRepository, ProductRepository, ReviewRepository, StreamRepository,
    UserRepository,
};

pub use entities::{
    Answer, AnswerLine, Chat, ChatLine, ChatRoom, CreatePostRequest, CreateProductRequest,
    CreateReviewRequest, CreateStreamRequest, Post, PostDetail, PostOwner, Product,
    ProfileChanges, Review, ReviewLine, SaleWithProduct, Stream, UpdatePostRequest, User,
};

pub use types::{DatabaseError, DatabaseResult};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}
