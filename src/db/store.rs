use crate::db::models::Book;
use crate::db::schema::SQLITE_INIT;
use crate::error::LibrisError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::info;

/// Gateway to the `books` table.
///
/// Cheap to clone; every operation executes exactly one parameterized
/// statement against the shared pool.
#[derive(Clone)]
pub struct BookStore {
    pool: SqlitePool,
}

impl BookStore {
    /// Opens the connection pool and applies the schema.
    pub async fn connect(database_url: &str) -> Result<Self, LibrisError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;

        apply_schema(&pool).await?;

        info!("book store initialized");
        Ok(Self { pool })
    }

    pub async fn list(&self) -> Result<Vec<Book>, LibrisError> {
        let rows = sqlx::query_as::<_, Book>(
            r#"
        SELECT id, title, author
        FROM books
        ORDER BY id
        "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Book>, LibrisError> {
        let row = sqlx::query_as::<_, Book>(
            r#"
        SELECT id, title, author
        FROM books
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn create(&self, title: &str, author: &str) -> Result<Book, LibrisError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
        INSERT INTO books (title, author)
        VALUES (?, ?)
        RETURNING id, title, author
        "#,
        )
        .bind(title)
        .bind(author)
        .fetch_one(&self.pool)
        .await?;

        Ok(book)
    }

    /// Absent fields keep their stored value. The whole update is one atomic
    /// statement, so a row deleted concurrently yields `None` instead of a
    /// silently lost write.
    pub async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        author: Option<&str>,
    ) -> Result<Option<Book>, LibrisError> {
        let row = sqlx::query_as::<_, Book>(
            r#"
        UPDATE books
        SET title = COALESCE(?, title),
            author = COALESCE(?, author)
        WHERE id = ?
        RETURNING id, title, author
        "#,
        )
        .bind(title)
        .bind(author)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Returns whether a row was actually deleted.
    pub async fn delete(&self, id: i64) -> Result<bool, LibrisError> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), LibrisError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
