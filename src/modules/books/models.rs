use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

/// The `currency` field is a presentation constant. No currency is
/// persisted; every response reports USD.
pub const CURRENCY: &str = "USD";

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Row shape of the `books` table. Timestamps never leave the service.
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub publisher: String,
    pub author: String,
    pub genre: String,
    pub published_at: String,
    pub amount_words: i64,
    pub price: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Response shape of a book: the business fields plus the constant
/// currency, minus the storage timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    pub id: i64,
    pub title: String,
    pub publisher: String,
    pub author: String,
    pub genre: String,
    pub published_at: String,
    pub amount_words: i64,
    pub price: f64,
    pub currency: &'static str,
}

impl From<BookRow> for BookView {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            publisher: row.publisher,
            author: row.author,
            genre: row.genre,
            published_at: row.published_at,
            amount_words: row.amount_words,
            price: row.price,
            currency: CURRENCY,
        }
    }
}

/// Validated create payload, ready for insertion.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub publisher: String,
    pub author: String,
    pub genre: String,
    pub published_at: String,
    pub amount_words: i64,
    pub price: f64,
}

/// Create payload as received. Every field is optional at the serde layer
/// so that missing fields surface as validation messages instead of
/// deserialization rejections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub publisher: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub published_at: Option<String>,
    pub amount_words: Option<i64>,
    pub price: Option<f64>,
}

impl CreateBookRequest {
    /// Enforce required-presence on all seven business fields and a
    /// parseable `published_at`. Returns the first failing message.
    pub fn validate(self) -> Result<NewBook, String> {
        let title = require_string(self.title, "title")?;
        let publisher = require_string(self.publisher, "publisher")?;
        let author = require_string(self.author, "author")?;
        let genre = require_string(self.genre, "genre")?;
        let published_at = require_string(self.published_at, "published at")?;
        parse_date(&published_at)?;
        let amount_words = self
            .amount_words
            .ok_or_else(|| required_message("amount words"))?;
        let price = self.price.ok_or_else(|| required_message("price"))?;

        Ok(NewBook {
            title,
            publisher,
            author,
            genre,
            published_at,
            amount_words,
            price,
        })
    }
}

/// Update payload. All fields are optional; a field only overwrites the
/// stored value when it is present and truthy (non-empty string, non-zero
/// number). An empty string or zero is treated as "not supplied".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub publisher: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub published_at: Option<String>,
    pub amount_words: Option<i64>,
    pub price: Option<f64>,
}

impl UpdateBookRequest {
    /// `published_at` only has to parse when it would actually overwrite.
    pub fn validate(&self) -> Result<(), String> {
        match self.published_at.as_deref() {
            Some(value) if !value.is_empty() => parse_date(value).map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Overwrite the truthy fields onto an existing row.
    pub fn apply_to(&self, row: &mut BookRow) {
        if let Some(title) = truthy_string(self.title.as_deref()) {
            row.title = title.to_string();
        }
        if let Some(publisher) = truthy_string(self.publisher.as_deref()) {
            row.publisher = publisher.to_string();
        }
        if let Some(author) = truthy_string(self.author.as_deref()) {
            row.author = author.to_string();
        }
        if let Some(genre) = truthy_string(self.genre.as_deref()) {
            row.genre = genre.to_string();
        }
        if let Some(published_at) = truthy_string(self.published_at.as_deref()) {
            row.published_at = published_at.to_string();
        }
        if let Some(amount_words) = self.amount_words.filter(|words| *words != 0) {
            row.amount_words = amount_words;
        }
        if let Some(price) = self.price.filter(|price| *price != 0.0) {
            row.price = price;
        }
    }
}

fn required_message(field: &str) -> String {
    format!("The {field} field is required.")
}

fn require_string(value: Option<String>, field: &str) -> Result<String, String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(required_message(field)),
    }
}

fn truthy_string(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value, DATE_FORMAT)
        .map_err(|_| "The published at field must be a valid date.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_create_request() -> CreateBookRequest {
        CreateBookRequest {
            title: Some("Test Book".to_string()),
            publisher: Some("Test Publisher".to_string()),
            author: Some("Test Author".to_string()),
            genre: Some("Fiction".to_string()),
            published_at: Some("2023-01-01".to_string()),
            amount_words: Some(50000),
            price: Some(9.99),
        }
    }

    fn stored_row() -> BookRow {
        BookRow {
            id: 1,
            title: "Original Title".to_string(),
            publisher: "Original Publisher".to_string(),
            author: "Original Author".to_string(),
            genre: "Fiction".to_string(),
            published_at: "2020-05-05".to_string(),
            amount_words: 10000,
            price: 5.0,
            created_at: "2024-01-01 00:00:00".to_string(),
            updated_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn complete_create_request_validates() {
        let book = full_create_request().validate().unwrap();
        assert_eq!(book.title, "Test Book");
        assert_eq!(book.amount_words, 50000);
    }

    #[test]
    fn missing_title_is_rejected() {
        let mut request = full_create_request();
        request.title = None;
        assert_eq!(
            request.validate().unwrap_err(),
            "The title field is required."
        );
    }

    #[test]
    fn empty_publisher_is_rejected() {
        let mut request = full_create_request();
        request.publisher = Some(String::new());
        assert_eq!(
            request.validate().unwrap_err(),
            "The publisher field is required."
        );
    }

    #[test]
    fn unparseable_published_at_is_rejected() {
        let mut request = full_create_request();
        request.published_at = Some("not-a-date".to_string());
        assert_eq!(
            request.validate().unwrap_err(),
            "The published at field must be a valid date."
        );
    }

    #[test]
    fn missing_amount_words_is_rejected() {
        let mut request = full_create_request();
        request.amount_words = None;
        assert_eq!(
            request.validate().unwrap_err(),
            "The amount words field is required."
        );
    }

    #[test]
    fn view_decorates_row_with_currency() {
        let view = BookView::from(stored_row());
        assert_eq!(view.currency, "USD");
        assert_eq!(view.title, "Original Title");
    }

    #[test]
    fn truthy_fields_overwrite_stored_values() {
        let mut row = stored_row();
        let changes = UpdateBookRequest {
            title: Some("Updated Title".to_string()),
            amount_words: Some(60000),
            ..Default::default()
        };

        changes.apply_to(&mut row);

        assert_eq!(row.title, "Updated Title");
        assert_eq!(row.amount_words, 60000);
        assert_eq!(row.publisher, "Original Publisher");
    }

    #[test]
    fn empty_string_and_zero_are_treated_as_absent() {
        let mut row = stored_row();
        let changes = UpdateBookRequest {
            title: Some(String::new()),
            amount_words: Some(0),
            price: Some(0.0),
            ..Default::default()
        };

        changes.apply_to(&mut row);

        assert_eq!(row.title, "Original Title");
        assert_eq!(row.amount_words, 10000);
        assert_eq!(row.price, 5.0);
    }

    #[test]
    fn update_skips_date_check_when_field_is_empty() {
        let changes = UpdateBookRequest {
            published_at: Some(String::new()),
            ..Default::default()
        };
        assert!(changes.validate().is_ok());
    }

    #[test]
    fn update_rejects_unparseable_date() {
        let changes = UpdateBookRequest {
            published_at: Some("January 2023".to_string()),
            ..Default::default()
        };
        assert_eq!(
            changes.validate().unwrap_err(),
            "The published at field must be a valid date."
        );
    }
}
