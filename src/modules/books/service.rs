//! Field mapping between request payloads, the `books` table, and the
//! response shape. The only policy here is the currency decoration and
//! the truthy partial-update filter.

use sqlx::SqlitePool;

use super::models::{BookView, NewBook, UpdateBookRequest};
use super::repository;

/// Fetch all books as response views. The caller decides how to render
/// an empty collection.
pub async fn get_collection(pool: &SqlitePool) -> sqlx::Result<Vec<BookView>> {
    let rows = repository::find_all(pool).await?;
    Ok(rows.into_iter().map(BookView::from).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<BookView>> {
    Ok(repository::find_by_id(pool, id).await?.map(BookView::from))
}

/// Insert a new book and return it as stored, id and all.
pub async fn create(pool: &SqlitePool, book: NewBook) -> sqlx::Result<BookView> {
    let id = repository::insert(pool, &book).await?;

    let row = repository::find_by_id(pool, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    Ok(row.into())
}

/// Apply the truthy fields of `changes` to an existing book. Returns
/// `None` when no row matches `id`.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    changes: &UpdateBookRequest,
) -> sqlx::Result<Option<BookView>> {
    let Some(mut row) = repository::find_by_id(pool, id).await? else {
        return Ok(None);
    };

    changes.apply_to(&mut row);
    repository::update(pool, &row).await?;

    Ok(Some(row.into()))
}

/// Hard-delete a book. Returns whether a row was actually removed.
pub async fn delete(pool: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    Ok(repository::delete_by_id(pool, id).await? > 0)
}
