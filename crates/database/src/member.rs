//! Session member storage.
//!
//! `(session_id, name)` is unique. A member's id doubles as their bearer token.

use chrono::Utc;
use match_core::Member;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::MemberRow;

/// Insert a new member.
///
/// Fails with [`DatabaseError::AlreadyExists`] when the name is taken in this
/// session (including when a concurrent join won the race), and with
/// [`DatabaseError::NotFound`] when the session does not exist.
pub async fn insert_member(pool: &SqlitePool, session_id: &str, name: &str) -> Result<Member> {
    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO session_members (id, session_id, name, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(session_id)
    .bind(name)
    .bind(created_at)
    .execute(pool)
    .await
    .map_err(|e| {
        DatabaseError::from_insert(
            e,
            "Member",
            format!("{}/{}", session_id, name),
            ("Session", session_id.to_string()),
        )
    })?;

    Ok(Member {
        id,
        session_id: session_id.to_string(),
        name: name.to_string(),
        created_at,
    })
}

/// Get a member of a session by id (token).
pub async fn get_member(pool: &SqlitePool, session_id: &str, id: &str) -> Result<Option<Member>> {
    let row = sqlx::query_as::<_, MemberRow>(
        r#"
        SELECT id, session_id, name, created_at
        FROM session_members
        WHERE id = ? AND session_id = ?
        "#,
    )
    .bind(id)
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Member::from))
}

/// Get a member of a session by display name.
pub async fn get_member_by_name(
    pool: &SqlitePool,
    session_id: &str,
    name: &str,
) -> Result<Option<Member>> {
    let row = sqlx::query_as::<_, MemberRow>(
        r#"
        SELECT id, session_id, name, created_at
        FROM session_members
        WHERE session_id = ? AND name = ?
        "#,
    )
    .bind(session_id)
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Member::from))
}

/// List a session's members in join order.
pub async fn list_members(pool: &SqlitePool, session_id: &str) -> Result<Vec<Member>> {
    let rows = sqlx::query_as::<_, MemberRow>(
        r#"
        SELECT id, session_id, name, created_at
        FROM session_members
        WHERE session_id = ?
        ORDER BY created_at, rowid
        "#,
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Member::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_session, test_db};

    #[tokio::test]
    async fn test_insert_and_list_members() {
        let db = test_db().await;
        let session = seed_session(db.pool()).await;

        let alice = insert_member(db.pool(), &session.id, "Alice").await.unwrap();
        let bob = insert_member(db.pool(), &session.id, "Bob").await.unwrap();

        let members = list_members(db.pool(), &session.id).await.unwrap();
        let ids: Vec<&str> = members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec![alice.id.as_str(), bob.id.as_str()]);
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let db = test_db().await;
        let session = seed_session(db.pool()).await;

        let first = insert_member(db.pool(), &session.id, "Alice").await.unwrap();
        let second = insert_member(db.pool(), &session.id, "Alice").await;
        assert!(matches!(second, Err(DatabaseError::AlreadyExists { .. })));

        // The loser re-reads the winner's row.
        let existing = get_member_by_name(db.pool(), &session.id, "Alice")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(existing.id, first.id);
    }

    #[tokio::test]
    async fn test_same_name_in_different_sessions() {
        let db = test_db().await;
        let one = seed_session(db.pool()).await;
        let two = seed_session(db.pool()).await;

        insert_member(db.pool(), &one.id, "Alice").await.unwrap();
        insert_member(db.pool(), &two.id, "Alice").await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let db = test_db().await;
        let result = insert_member(db.pool(), "missing", "Alice").await;
        assert!(matches!(
            result,
            Err(DatabaseError::NotFound { entity: "Session", .. })
        ));
    }

    #[tokio::test]
    async fn test_get_member_is_scoped_to_session() {
        let db = test_db().await;
        let one = seed_session(db.pool()).await;
        let two = seed_session(db.pool()).await;

        let alice = insert_member(db.pool(), &one.id, "Alice").await.unwrap();

        assert!(get_member(db.pool(), &one.id, &alice.id).await.unwrap().is_some());
        assert!(get_member(db.pool(), &two.id, &alice.id).await.unwrap().is_none());
    }
}
