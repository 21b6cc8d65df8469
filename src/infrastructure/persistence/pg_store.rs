//! PostgreSQL implementation of the store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink, NewUser, User};
use crate::domain::errors::StoreError;
use crate::domain::store::Store;

/// Unique constraint guarding `links.short_code`.
const LINKS_SHORT_CODE_KEY: &str = "links_short_code_key";

/// Unique constraint guarding `users.email`.
const USERS_EMAIL_KEY: &str = "users_email_key";

const LINK_COLUMNS: &str =
    "id, user_id, short_code, original_url, clicks, created_at, updated_at";

/// PostgreSQL store for users and links.
///
/// Uses bound parameters for every query. Uniqueness violations are
/// classified by constraint name, and click increments are a single
/// `UPDATE ... SET clicks = clicks + 1` so concurrent clicks are never lost.
pub struct PgStore {
    pool: Arc<PgPool>,
}

impl PgStore {
    /// Creates a new store over a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Closes the underlying pool, waiting for checked-out connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User::new(r.id, r.email, r.created_at, r.updated_at)
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    user_id: i64,
    short_code: String,
    original_url: String,
    clicks: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.user_id,
            r.short_code,
            r.original_url,
            r.clicks,
            r.created_at,
            r.updated_at,
        )
    }
}

/// Maps a sqlx error onto the store's closed error set.
fn classify(e: sqlx::Error) -> StoreError {
    if let Some(db_err) = e.as_database_error()
        && db_err.is_unique_violation()
    {
        match db_err.constraint() {
            Some(LINKS_SHORT_CODE_KEY) => return StoreError::CodeExists,
            Some(USERS_EMAIL_KEY) => return StoreError::EmailExists,
            _ => {}
        }
    }

    if matches!(e, sqlx::Error::RowNotFound) {
        return StoreError::NotFound;
    }

    StoreError::backend(e)
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email)
            VALUES ($1)
            RETURNING id, email, created_at, updated_at
            "#,
        )
        .bind(&new_user.email)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(classify)?;

        Ok(row.into())
    }

    async fn get_user_by_id(&self, id: i64) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(classify)?;

        row.map(User::from).ok_or(StoreError::NotFound)
    }

    async fn create_short_link(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let sql = format!(
            "INSERT INTO links (user_id, short_code, original_url) \
             VALUES ($1, $2, $3) RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(new_link.user_id)
            .bind(&new_link.short_code)
            .bind(&new_link.original_url)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(classify)?;

        Ok(row.into())
    }

    async fn get_by_short_code(&self, code: &str) -> Result<Link, StoreError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(classify)?;

        row.map(Link::from).ok_or(StoreError::NotFound)
    }

    async fn get_by_original_url(&self, user_id: i64, url: &str) -> Result<Link, StoreError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE user_id = $1 AND original_url = $2 \
             ORDER BY id LIMIT 1"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(user_id)
            .bind(url)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(classify)?;

        row.map(Link::from).ok_or(StoreError::NotFound)
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE links SET clicks = clicks + 1 WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await
            .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn get_links_by_user_id(&self, user_id: i64) -> Result<Vec<Link>, StoreError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(classify)?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(classify)?;

        Ok(())
    }
}
