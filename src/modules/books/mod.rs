pub mod models;
pub mod repository;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use sqlx::SqlitePool;

use folio_http::envelope::{Envelope, MessageEnvelope};
use folio_http::error::ApiError;
use folio_kernel::{InitCtx, Migration, Module};

use models::{BookView, CreateBookRequest, UpdateBookRequest};

/// Books module: CRUD over the `books` table, mounted under `/api/books`.
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        Router::new()
            .route("/", get(list_books).post(create_book))
            .route(
                "/{id}",
                get(get_book).patch(update_book).delete(delete_book),
            )
            .with_state(ctx.db.clone())
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_create_books",
            up: r#"
                CREATE TABLE IF NOT EXISTS books (
                    id            INTEGER PRIMARY KEY AUTOINCREMENT,
                    title         TEXT    NOT NULL,
                    publisher     TEXT    NOT NULL,
                    author        TEXT    NOT NULL,
                    genre         TEXT    NOT NULL,
                    published_at  TEXT    NOT NULL,
                    amount_words  INTEGER NOT NULL,
                    price         REAL    NOT NULL,
                    created_at    TEXT    NOT NULL DEFAULT (datetime('now')),
                    updated_at    TEXT    NOT NULL DEFAULT (datetime('now'))
                );
                "#,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// GET / — all books, or 404 when the store is empty. An empty store is
/// deliberately reported the same way as a missing book.
async fn list_books(State(pool): State<SqlitePool>) -> Result<Envelope<Vec<BookView>>, ApiError> {
    let books = service::get_collection(&pool).await?;

    if books.is_empty() {
        return Err(ApiError::not_found("No books found"));
    }

    Ok(Envelope::success(books))
}

/// GET /{id}
async fn get_book(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Envelope<BookView>, ApiError> {
    service::get_by_id(&pool, id)
        .await?
        .map(Envelope::success)
        .ok_or_else(|| ApiError::not_found("Book not found"))
}

/// POST / — create a book. Responds 200 with the stored record.
async fn create_book(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateBookRequest>,
) -> Result<Envelope<BookView>, ApiError> {
    let new_book = payload.validate().map_err(ApiError::validation)?;

    let book = service::create(&pool, new_book).await?;

    Ok(Envelope::success(book))
}

/// PATCH /{id} — partial update; only present and truthy fields overwrite.
async fn update_book(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateBookRequest>,
) -> Result<Envelope<BookView>, ApiError> {
    payload.validate().map_err(ApiError::validation)?;

    service::update(&pool, id, &payload)
        .await?
        .map(Envelope::success)
        .ok_or_else(|| ApiError::not_found("Book not found"))
}

/// DELETE /{id}
async fn delete_book(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<MessageEnvelope, ApiError> {
    if service::delete(&pool, id).await? {
        Ok(MessageEnvelope::success("Book deleted successfully"))
    } else {
        Err(ApiError::not_found("Book not found"))
    }
}

/// Create a new instance of the books module.
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BooksModule::new())
}
