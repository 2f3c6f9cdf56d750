//! Row-level access to the `books` table.

use sqlx::SqlitePool;

use super::models::{BookRow, NewBook};

const COLUMNS: &str =
    "id, title, publisher, author, genre, published_at, amount_words, price, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> sqlx::Result<Vec<BookRow>> {
    sqlx::query_as::<_, BookRow>(&format!("SELECT {COLUMNS} FROM books"))
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<BookRow>> {
    sqlx::query_as::<_, BookRow>(&format!("SELECT {COLUMNS} FROM books WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Insert a new row and return its assigned id.
pub async fn insert(pool: &SqlitePool, book: &NewBook) -> sqlx::Result<i64> {
    let result = sqlx::query(
        "INSERT INTO books (title, publisher, author, genre, published_at, amount_words, price)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&book.title)
    .bind(&book.publisher)
    .bind(&book.author)
    .bind(&book.genre)
    .bind(&book.published_at)
    .bind(book.amount_words)
    .bind(book.price)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Write the business fields of an existing row and bump `updated_at`.
pub async fn update(pool: &SqlitePool, row: &BookRow) -> sqlx::Result<()> {
    sqlx::query(
        "UPDATE books
         SET title = ?, publisher = ?, author = ?, genre = ?, published_at = ?,
             amount_words = ?, price = ?, updated_at = datetime('now')
         WHERE id = ?",
    )
    .bind(&row.title)
    .bind(&row.publisher)
    .bind(&row.author)
    .bind(&row.genre)
    .bind(&row.published_at)
    .bind(row.amount_words)
    .bind(row.price)
    .bind(row.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a row by id, returning how many rows were removed.
pub async fn delete_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
