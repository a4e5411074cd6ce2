//! Database row types.
//!
//! Rows map one-to-one onto table columns and convert into the domain types
//! from `match_core`. JSON-valued columns (`filters`, `cuisine`, `menu`,
//! `features`) are stored as TEXT.

use chrono::{DateTime, Utc};
use match_core::{Member, Restaurant, RestaurantMenu, Session, SessionFilters, Vote};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub(crate) struct SessionRow {
    pub id: String,
    pub name: String,
    pub filters: Option<Json<SessionFilters>>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            name: row.name,
            filters: row.filters.map(|Json(f)| f),
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

/// Fields supplied when creating a session. The id is generated on insert.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub name: String,
    /// Stored normalized: empty lists dropped, empty filters stored as NULL.
    pub filters: Option<SessionFilters>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct MemberRow {
    pub id: String,
    pub session_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: row.id,
            session_id: row.session_id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct RestaurantRow {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub cuisine: Option<Json<Vec<String>>>,
    pub neighborhood: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub detail_url: Option<String>,
    pub image_url: Option<String>,
    pub lunch_price: Option<i64>,
    pub dinner_price: Option<i64>,
    pub brunch_price: Option<i64>,
    pub menu: Option<Json<RestaurantMenu>>,
    pub features: Option<Json<Vec<String>>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RestaurantRow> for Restaurant {
    fn from(row: RestaurantRow) -> Self {
        Restaurant {
            id: row.id,
            slug: row.slug,
            name: row.name,
            cuisine: row.cuisine.map(|Json(c)| c),
            neighborhood: row.neighborhood,
            address: row.address,
            phone: row.phone,
            website: row.website,
            detail_url: row.detail_url,
            image_url: row.image_url,
            lunch_price: row.lunch_price,
            dinner_price: row.dinner_price,
            brunch_price: row.brunch_price,
            menu: row.menu.map(|Json(m)| m),
            features: row.features.map(|Json(f)| f),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A catalog row as produced by the loader, keyed by `slug`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRestaurant {
    pub slug: String,
    pub name: String,
    pub cuisine: Option<Vec<String>>,
    pub neighborhood: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub detail_url: Option<String>,
    pub image_url: Option<String>,
    pub lunch_price: Option<i64>,
    pub dinner_price: Option<i64>,
    pub brunch_price: Option<i64>,
    pub menu: Option<RestaurantMenu>,
    pub features: Option<Vec<String>>,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct VoteRow {
    pub id: i64,
    pub session_id: String,
    pub member_id: String,
    pub restaurant_id: i64,
    pub vote: bool,
    pub created_at: DateTime<Utc>,
}

impl From<VoteRow> for Vote {
    fn from(row: VoteRow) -> Self {
        Vote {
            id: row.id,
            session_id: row.session_id,
            member_id: row.member_id,
            restaurant_id: row.restaurant_id,
            vote: row.vote,
            created_at: row.created_at,
        }
    }
}
