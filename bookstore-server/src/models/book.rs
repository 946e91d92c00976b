//! Book record and request draft

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Book record from the database.
///
/// `id` and both timestamps are assigned by the store; a `Book` value
/// never exists without them.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub year: i32,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The five caller-supplied business fields, used by create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub year: i32,
    pub price: f64,
}

impl BookDraft {
    /// Shape validation only: the text fields must be non-empty.
    /// Year range and price sign are deliberately unchecked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("isbn", &self.isbn),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::Empty { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> BookDraft {
        BookDraft {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            isbn: "978-0441013593".to_string(),
            year: 1965,
            price: 9.99,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn blank_text_fields_are_rejected() {
        let mut d = draft();
        d.title = "   ".to_string();
        assert!(matches!(
            d.validate(),
            Err(ValidationError::Empty { field: "title" })
        ));

        let mut d = draft();
        d.isbn = String::new();
        assert!(matches!(
            d.validate(),
            Err(ValidationError::Empty { field: "isbn" })
        ));
    }

    #[test]
    fn year_and_price_are_not_range_checked() {
        let mut d = draft();
        d.year = -500;
        d.price = -1.0;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn book_serializes_to_wire_shape() {
        let book = Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            isbn: "978-0441013593".to_string(),
            year: 1965,
            price: 9.99,
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            updated_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Dune");
        assert_eq!(json["year"], 1965);
        assert_eq!(json["price"], 9.99);
        assert_eq!(json["created_at"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn draft_deserializes_without_id_or_timestamps() {
        let d: BookDraft = serde_json::from_str(
            r#"{"title":"Dune","author":"Herbert","isbn":"978-0441013593","year":1965,"price":9.99}"#,
        )
        .unwrap();
        assert_eq!(d.title, "Dune");
        assert_eq!(d.price, 9.99);
    }
}
