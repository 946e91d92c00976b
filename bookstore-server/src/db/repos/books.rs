//! Book repository
//!
//! One method per catalog operation. Each method borrows a connection
//! from the pool for exactly the duration of its statement (plus commit
//! for mutations); the connection returns to the pool on drop whether
//! the operation succeeds or fails.

use sqlx::PgPool;

use crate::models::{Book, BookDraft};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} {id}")]
    NotFound { resource: &'static str, id: i32 },
}

/// Book repository
pub struct BookRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BookRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every book, ordered by id ascending.
    ///
    /// An empty catalog yields an empty vec, not an error.
    pub async fn list(&self) -> Result<Vec<Book>, DbError> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, isbn, year, price, created_at, updated_at
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(books)
    }

    /// Get a single book by id.
    pub async fn get(&self, id: i32) -> Result<Book, DbError> {
        sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, isbn, year, price, created_at, updated_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: "book",
            id,
        })
    }

    /// Insert a book, returning the stored row with its assigned id and
    /// timestamps.
    pub async fn create(&self, draft: &BookDraft) -> Result<Book, DbError> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn, year, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, author, isbn, year, price, created_at, updated_at
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.isbn)
        .bind(draft.year)
        .bind(draft.price)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(book)
    }

    /// Replace all five business fields of a book.
    ///
    /// `updated_at` is advanced by the statement itself rather than left
    /// to a store-side trigger. A missing id drops the transaction
    /// uncommitted and reports `NotFound`.
    pub async fn update(&self, id: i32, draft: &BookDraft) -> Result<Book, DbError> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, author = $2, isbn = $3, year = $4, price = $5,
                updated_at = now()
            WHERE id = $6
            RETURNING id, title, author, isbn, year, price, created_at, updated_at
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.isbn)
        .bind(draft.year)
        .bind(draft.price)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound {
            resource: "book",
            id,
        })?;

        tx.commit().await?;
        Ok(book)
    }

    /// Delete a book by id. Zero affected rows is `NotFound` and the
    /// transaction is never committed.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "book",
                id,
            });
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::{create_pool, DbConfig};

    // Integration tests - run with DB_* env vars pointing at a test database:
    // cargo test -p bookstore-server -- --ignored

    fn draft() -> BookDraft {
        BookDraft {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            isbn: "978-0441013593".to_string(),
            year: 1965,
            price: 9.99,
        }
    }

    async fn test_pool() -> PgPool {
        create_pool(&DbConfig::from_env().expect("invalid db config"))
            .await
            .expect("pool creation failed")
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get_round_trip() {
        let pool = test_pool().await;
        let repo = BookRepo::new(&pool);

        let created = repo.create(&draft()).await.expect("create failed");
        assert!(created.id > 0);
        assert_eq!(created.title, "Dune");
        assert_eq!(created.created_at, created.updated_at);

        let fetched = repo.get(created.id).await.expect("get failed");
        assert_eq!(fetched, created);

        repo.delete(created.id).await.expect("cleanup failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_replaces_fields_and_advances_updated_at() {
        let pool = test_pool().await;
        let repo = BookRepo::new(&pool);

        let created = repo.create(&draft()).await.expect("create failed");
        let mut changed = draft();
        changed.price = 12.50;

        let updated = repo
            .update(created.id, &changed)
            .await
            .expect("update failed");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.price, 12.50);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        repo.delete(created.id).await.expect("cleanup failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_ids_report_not_found() {
        let pool = test_pool().await;
        let repo = BookRepo::new(&pool);

        let created = repo.create(&draft()).await.expect("create failed");
        repo.delete(created.id).await.expect("delete failed");

        // Deleted id behaves the same as one never created
        assert!(matches!(
            repo.get(created.id).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.update(created.id, &draft()).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete(created.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_is_ordered_by_id() {
        let pool = test_pool().await;
        let repo = BookRepo::new(&pool);

        let first = repo.create(&draft()).await.expect("create failed");
        let second = repo.create(&draft()).await.expect("create failed");

        let books = repo.list().await.expect("list failed");
        let ids: Vec<i32> = books.iter().map(|b| b.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);

        repo.delete(first.id).await.expect("cleanup failed");
        repo.delete(second.id).await.expect("cleanup failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn no_connections_leak_after_concurrent_requests() {
        let pool = test_pool().await;

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let repo = BookRepo::new(&pool);
                    let book = repo.create(&draft()).await.expect("create failed");
                    repo.get(book.id).await.expect("get failed");
                    repo.delete(book.id).await.expect("delete failed");
                    // NotFound path releases its connection too
                    let _ = repo.get(book.id).await;
                })
            })
            .collect();

        for handle in handles {
            handle.await.expect("task panicked");
        }

        assert_eq!(pool.size() as usize - pool.num_idle(), 0);
    }
}
