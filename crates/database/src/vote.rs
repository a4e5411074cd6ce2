//! Vote storage.
//!
//! One vote per `(session_id, member_id, restaurant_id)`. A second attempt is
//! rejected, never merged into the first.

use chrono::Utc;
use match_core::Vote;
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::VoteRow;

/// Record a member's vote on a restaurant.
///
/// Fails with [`DatabaseError::AlreadyExists`] if this member already voted on
/// this restaurant in this session, and with [`DatabaseError::NotFound`] if the
/// restaurant is not in the catalog.
pub async fn insert_vote(
    pool: &SqlitePool,
    session_id: &str,
    member_id: &str,
    restaurant_id: i64,
    vote: bool,
) -> Result<Vote> {
    let created_at = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO votes (session_id, member_id, restaurant_id, vote, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(session_id)
    .bind(member_id)
    .bind(restaurant_id)
    .bind(vote)
    .bind(created_at)
    .execute(pool)
    .await
    .map_err(|e| {
        DatabaseError::from_insert(
            e,
            "Vote",
            format!("{}/{}", member_id, restaurant_id),
            ("Restaurant", restaurant_id.to_string()),
        )
    })?;

    Ok(Vote {
        id: result.last_insert_rowid(),
        session_id: session_id.to_string(),
        member_id: member_id.to_string(),
        restaurant_id,
        vote,
        created_at,
    })
}

/// List every vote cast in a session.
pub async fn list_votes(pool: &SqlitePool, session_id: &str) -> Result<Vec<Vote>> {
    let rows = sqlx::query_as::<_, VoteRow>(
        r#"
        SELECT id, session_id, member_id, restaurant_id, vote, created_at
        FROM votes
        WHERE session_id = ?
        ORDER BY id
        "#,
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Vote::from).collect())
}

/// Restaurants a member has already voted on in a session.
pub async fn list_voted_restaurant_ids(
    pool: &SqlitePool,
    session_id: &str,
    member_id: &str,
) -> Result<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT restaurant_id
        FROM votes
        WHERE session_id = ? AND member_id = ?
        ORDER BY id
        "#,
    )
    .bind(session_id)
    .bind(member_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}
