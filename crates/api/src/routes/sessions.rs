//! Session routes: create, detail, join, vote, matches, my votes, and the
//! session's filtered catalog.
//!
//! Every session-scoped handler runs the access guard first. Detail and
//! matches each load roster, filtered catalog, and votes concurrently and
//! aggregate them independently.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{DateTime, Utc};
use database::{
    member, restaurant, session, vote, Catalog, Database, DatabaseError, NewSession,
};
use match_core::{
    aggregate, check_access, shuffle, swipe_queue, Match, Member, MemberProgress, Restaurant,
    Session, SessionFilters, Vote,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{storage, ApiError, Result};
use crate::state::AppState;
use crate::validation;

/// Header carrying a member's token (their member id).
pub const MEMBER_TOKEN_HEADER: &str = "x-member-token";

/// Response to session creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub id: String,
    pub name: String,
    pub share_url: String,
}

/// Session detail with per-member progress.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetailResponse {
    pub id: String,
    pub name: String,
    pub filters: Option<SessionFilters>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub members: Vec<MemberProgress>,
    pub total_restaurants: usize,
    pub match_count: usize,
}

/// Response to a join.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSessionResponse {
    pub member_id: String,
    pub token: String,
    pub name: String,
    pub session_id: String,
}

impl From<Member> for JoinSessionResponse {
    fn from(member: Member) -> Self {
        Self {
            token: member.id.clone(),
            member_id: member.id,
            name: member.name,
            session_id: member.session_id,
        }
    }
}

/// A recorded vote.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub id: i64,
    pub restaurant_id: i64,
    pub vote: bool,
}

/// Matches for a session.
///
/// While `all_members_complete` is false the match set may still shrink.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    pub matches: Vec<Match>,
    pub total_restaurants: usize,
    pub all_members_complete: bool,
}

/// Restaurants the caller has already voted on.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyVotesResponse {
    pub voted_restaurant_ids: Vec<i64>,
}

/// Query parameters for the session catalog.
#[derive(Debug, Default, Deserialize)]
pub struct RestaurantListParams {
    /// Shuffle the catalog with this seed.
    pub seed: Option<u64>,
}

/// Load a session and run the access guard on it.
async fn alive_session(state: &AppState, id: &str) -> Result<Session> {
    let found = session::get_session(state.db.pool(), id)
        .await
        .map_err(storage("Failed to fetch session"))?;

    check_access(found, Utc::now()).map_err(|denied| {
        warn!(session_id = %id, reason = %denied, "Session access denied");
        ApiError::from(denied)
    })
}

/// Everything aggregation needs, fetched concurrently.
///
/// A failure in any fetch fails the whole load.
async fn load_session_facts(
    state: &AppState,
    session: &Session,
    failure: &'static str,
) -> Result<(Vec<Member>, Catalog, Vec<Vote>)> {
    let pool = state.db.pool();

    tokio::try_join!(
        member::list_members(pool, &session.id),
        restaurant::list_restaurants(pool, session.filters.as_ref()),
        vote::list_votes(pool, &session.id),
    )
    .map_err(storage(failure))
}

fn member_token(headers: &HeaderMap) -> Result<&str> {
    headers
        .get(MEMBER_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("X-Member-Token header is required".to_string()))
}

/// Resolve a token to a member of this session.
async fn authenticate(state: &AppState, session_id: &str, token: &str) -> Result<Member> {
    member::get_member(state.db.pool(), session_id, token)
        .await
        .map_err(storage("Failed to validate member token"))?
        .ok_or_else(|| {
            warn!(session_id = %session_id, "Invalid member token");
            ApiError::Unauthorized("Invalid member token".to_string())
        })
}

/// Create a session.
pub async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateSessionResponse>)> {
    let body = validation::parse_body(&body)?;
    let name = validation::session_name(&body)?;
    let filters = validation::session_filters(&body)?;

    let now = Utc::now();
    let created = session::create_session(
        state.db.pool(),
        &NewSession {
            name,
            filters,
            created_at: now,
            expires_at: now + state.session_ttl,
        },
    )
    .await
    .map_err(storage("Failed to create session"))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            share_url: format!("/s/{}", created.id),
            id: created.id,
            name: created.name,
        }),
    ))
}

/// Session detail with member progress and match count.
pub async fn session_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionDetailResponse>> {
    let session = alive_session(&state, &id).await?;
    let (members, catalog, votes) =
        load_session_facts(&state, &session, "Failed to fetch session details").await?;

    let tally = aggregate(&members, &catalog.restaurants, &votes);

    Ok(Json(SessionDetailResponse {
        id: session.id,
        name: session.name,
        filters: session.filters,
        created_at: session.created_at,
        expires_at: session.expires_at,
        members: tally.members,
        total_restaurants: catalog.total,
        match_count: tally.match_count,
    }))
}

/// Join a session by display name.
///
/// Joining with a name already present returns that member (200) instead of
/// creating a new one (201). A concurrent join that loses the insert race
/// re-reads the winner's row.
pub async fn join_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<JoinSessionResponse>)> {
    let body = validation::parse_body(&body)?;
    let name = validation::member_name(&body)?;

    let session = alive_session(&state, &session_id).await?;
    let pool = state.db.pool();

    let existing = member::get_member_by_name(pool, &session.id, &name)
        .await
        .map_err(storage("Failed to join session"))?;
    if let Some(existing) = existing {
        return Ok((StatusCode::OK, Json(existing.into())));
    }

    let (status, joined) = insert_or_existing(&state.db, &session.id, &name).await?;
    Ok((status, Json(joined.into())))
}

/// Insert a member, or return the row that won a concurrent insert.
///
/// 201 for a new member, 200 when the name was already taken.
async fn insert_or_existing(
    db: &Database,
    session_id: &str,
    name: &str,
) -> Result<(StatusCode, Member)> {
    let pool = db.pool();

    match member::insert_member(pool, session_id, name).await {
        Ok(created) => {
            info!(session_id = %session_id, member_id = %created.id, "Member joined");
            Ok((StatusCode::CREATED, created))
        }
        Err(DatabaseError::AlreadyExists { .. }) => {
            let winner = member::get_member_by_name(pool, session_id, name)
                .await
                .map_err(storage("Failed to join session"))?;
            match winner {
                Some(winner) => Ok((StatusCode::OK, winner)),
                None => {
                    warn!(session_id = %session_id, "Join conflict but no existing member");
                    Err(ApiError::Storage("Failed to join session"))
                }
            }
        }
        Err(err) => Err(storage("Failed to join session")(err)),
    }
}

/// Record the caller's vote on one restaurant.
pub async fn cast_vote(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<VoteResponse>)> {
    let token = member_token(&headers)?;
    let body = validation::parse_body(&body)?;

    let session = alive_session(&state, &session_id).await?;
    let voter = authenticate(&state, &session.id, token).await?;
    let (restaurant_id, choice) = validation::vote_request(&body)?;

    let recorded = vote::insert_vote(state.db.pool(), &session.id, &voter.id, restaurant_id, choice)
        .await
        .map_err(|err| match err {
            DatabaseError::AlreadyExists { .. } => {
                ApiError::Conflict("Vote already recorded for this restaurant".to_string())
            }
            DatabaseError::NotFound { .. } => ApiError::NotFound("Restaurant not found".to_string()),
            other => storage("Failed to record vote")(other),
        })?;

    info!(
        session_id = %session.id,
        member_id = %voter.id,
        restaurant_id,
        vote = choice,
        "Vote recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(VoteResponse {
            id: recorded.id,
            restaurant_id: recorded.restaurant_id,
            vote: recorded.vote,
        }),
    ))
}

/// Matches for a session and whether everyone has finished voting.
pub async fn matches(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MatchesResponse>> {
    let session = alive_session(&state, &id).await?;
    let (members, catalog, votes) =
        load_session_facts(&state, &session, "Failed to fetch match data").await?;

    let tally = aggregate(&members, &catalog.restaurants, &votes);

    Ok(Json(MatchesResponse {
        matches: tally.matches,
        total_restaurants: catalog.total,
        all_members_complete: tally.all_members_complete,
    }))
}

/// Restaurant ids the caller has already voted on.
pub async fn my_votes(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<MyVotesResponse>> {
    let token = member_token(&headers)?;
    let session = alive_session(&state, &session_id).await?;
    let caller = authenticate(&state, &session.id, token).await?;

    let voted_restaurant_ids =
        vote::list_voted_restaurant_ids(state.db.pool(), &session.id, &caller.id)
            .await
            .map_err(storage("Failed to fetch votes"))?;

    Ok(Json(MyVotesResponse {
        voted_restaurant_ids,
    }))
}

/// The session's catalog after filters.
///
/// With `seed` the list is shuffled deterministically. With a member token it
/// becomes that member's swipe queue: restaurants they already voted on are
/// dropped and the rest shuffled.
pub async fn session_restaurants(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<RestaurantListParams>,
    headers: HeaderMap,
) -> Result<Json<Vec<Restaurant>>> {
    let session = alive_session(&state, &id).await?;

    let voter = if headers.contains_key(MEMBER_TOKEN_HEADER) {
        Some(authenticate(&state, &session.id, member_token(&headers)?).await?)
    } else {
        None
    };

    let catalog = restaurant::list_restaurants(state.db.pool(), session.filters.as_ref())
        .await
        .map_err(storage("Failed to fetch restaurants"))?;
    let mut restaurants = catalog.restaurants;

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if let Some(voter) = voter {
        let voted = vote::list_voted_restaurant_ids(state.db.pool(), &session.id, &voter.id)
            .await
            .map_err(storage("Failed to fetch votes"))?;
        return Ok(Json(swipe_queue(restaurants, &voted, &mut rng)));
    }

    if params.seed.is_some() {
        shuffle(&mut restaurants, &mut rng);
    }

    Ok(Json(restaurants))
}
