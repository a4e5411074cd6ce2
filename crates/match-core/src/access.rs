//! Session access guard.
//!
//! Every session-scoped operation runs [`check_access`] before touching
//! members, votes, or the catalog. Expiry is evaluated lazily here; nothing
//! sweeps expired sessions in the background.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::Session;

/// Why a session cannot be used.
///
/// The two variants are kept apart all the way to the caller: a session that
/// never existed and one that has lapsed render differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("Session not found")]
    NotFound,

    #[error("Session has expired")]
    Expired,
}

/// Classify a (possibly missing) session at time `now`.
///
/// A session whose expiry equals `now` is still alive.
pub fn check_access(session: Option<Session>, now: DateTime<Utc>) -> Result<Session, AccessDenied> {
    let session = session.ok_or(AccessDenied::NotFound)?;

    if session.expires_at < now {
        return Err(AccessDenied::Expired);
    }

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session_expiring_at(expires_at: DateTime<Utc>) -> Session {
        Session {
            id: "s-1".to_string(),
            name: "Date Night".to_string(),
            filters: None,
            created_at: expires_at - Duration::days(30),
            expires_at,
        }
    }

    #[test]
    fn test_missing_session_is_not_found() {
        assert_eq!(check_access(None, Utc::now()), Err(AccessDenied::NotFound));
    }

    #[test]
    fn test_lapsed_session_is_expired() {
        let now = Utc::now();
        let session = session_expiring_at(now - Duration::seconds(1));
        assert_eq!(check_access(Some(session), now), Err(AccessDenied::Expired));
    }

    #[test]
    fn test_live_session_passes_through() {
        let now = Utc::now();
        let session = session_expiring_at(now + Duration::days(1));
        let alive = check_access(Some(session.clone()), now).unwrap();
        assert_eq!(alive, session);
    }

    #[test]
    fn test_expiry_boundary_is_alive() {
        let now = Utc::now();
        let session = session_expiring_at(now);
        assert!(check_access(Some(session), now).is_ok());
    }
}
