//! Session storage.

use match_core::Session;
use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{NewSession, SessionRow};

/// Create a new session with a random id.
///
/// Filters are normalized before they are written, so a filter made of empty
/// lists is stored as NULL.
pub async fn create_session(pool: &SqlitePool, new: &NewSession) -> Result<Session> {
    let id = Uuid::new_v4().to_string();
    let filters = new.filters.clone().and_then(|f| f.normalized());

    sqlx::query(
        r#"
        INSERT INTO sessions (id, name, filters, created_at, expires_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&new.name)
    .bind(filters.as_ref().map(Json))
    .bind(new.created_at)
    .bind(new.expires_at)
    .execute(pool)
    .await?;

    tracing::info!(session_id = %id, "Created session");

    Ok(Session {
        id,
        name: new.name.clone(),
        filters,
        created_at: new.created_at,
        expires_at: new.expires_at,
    })
}

/// Get a session by ID.
pub async fn get_session(pool: &SqlitePool, id: &str) -> Result<Option<Session>> {
    let row = sqlx::query_as::<_, SessionRow>(
        r#"
        SELECT id, name, filters, created_at, expires_at
        FROM sessions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Session::from))
}
