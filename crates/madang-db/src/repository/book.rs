//! # Book Repository
//!
//! Read-only catalog queries. Books are never modified after seeding.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use madang_core::{Book, BookOption, PublisherCount};

/// Repository for book database operations.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookRepository { pool }
    }

    /// Gets a book by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Book))` - Book found
    /// * `Ok(None)` - Book not found
    pub async fn get_by_id(&self, bookid: i64) -> DbResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT bookid, bookname, publisher, price
            FROM Book
            WHERE bookid = ?1
            "#,
        )
        .bind(bookid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// The catalog as selector entries, ordered by id.
    pub async fn catalog(&self) -> DbResult<Vec<BookOption>> {
        let options = sqlx::query_as::<_, BookOption>(
            r#"
            SELECT bookid, bookname, price
            FROM Book
            ORDER BY bookid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = options.len(), "Loaded book catalog");
        Ok(options)
    }

    /// Number of books per publisher, largest first.
    ///
    /// Publishers with equal counts are ordered by name.
    pub async fn count_by_publisher(&self) -> DbResult<Vec<PublisherCount>> {
        let counts = sqlx::query_as::<_, PublisherCount>(
            r#"
            SELECT publisher, COUNT(*) AS count
            FROM Book
            GROUP BY publisher
            ORDER BY count DESC, publisher ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Counts catalog books.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Book")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_support::seeded_db;

    #[tokio::test]
    async fn test_catalog_ordered_by_id() {
        let db = seeded_db().await;
        let catalog = db.books().catalog().await.unwrap();

        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog[0].bookid, 1);
        assert_eq!(catalog[0].bookname, "축구의 역사");
        assert_eq!(catalog[0].price, 7000);
        assert_eq!(catalog[9].bookname, "Olympic Champions");
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = seeded_db().await;

        let book = db.books().get_by_id(4).await.unwrap().unwrap();
        assert_eq!(book.bookname, "골프 바이블");
        assert_eq!(book.publisher, "대한미디어");
        assert_eq!(book.price, 35000);

        assert!(db.books().get_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_count_by_publisher() {
        let db = seeded_db().await;
        let counts = db.books().count_by_publisher().await.unwrap();

        let pairs: Vec<(&str, i64)> = counts
            .iter()
            .map(|c| (c.publisher.as_str(), c.count))
            .collect();

        assert_eq!(pairs[0], ("굿스포츠", 3));
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs.iter().map(|p| p.1).sum::<i64>(), 10);
        assert!(pairs.windows(2).all(|w| w[0].1 >= w[1].1));
    }
}
