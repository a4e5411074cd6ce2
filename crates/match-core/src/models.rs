//! Domain records shared by the storage layer and the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session identifier (UUID v4 string).
pub type SessionId = String;

/// Member identifier. Doubles as the member's bearer token.
pub type MemberId = String;

/// Catalog restaurant identifier.
pub type RestaurantId = i64;

/// A time-boxed voting round over the restaurant catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    /// Catalog narrowing for this session. `None` means the full catalog.
    pub filters: Option<SessionFilters>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Optional any-of constraints on cuisine and neighborhood.
///
/// An empty list carries the same meaning as an absent one. Values written to
/// storage go through [`SessionFilters::normalized`] so readers only ever see
/// non-empty lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhoods: Option<Vec<String>>,
}

impl SessionFilters {
    /// Drop empty lists; return `None` when nothing constrains the catalog.
    pub fn normalized(self) -> Option<Self> {
        let cuisines = self.cuisines.filter(|c| !c.is_empty());
        let neighborhoods = self.neighborhoods.filter(|n| !n.is_empty());

        if cuisines.is_none() && neighborhoods.is_none() {
            return None;
        }

        Some(Self {
            cuisines,
            neighborhoods,
        })
    }

    /// Cuisine constraint, if it actually restricts anything.
    pub fn active_cuisines(&self) -> Option<&[String]> {
        self.cuisines.as_deref().filter(|c| !c.is_empty())
    }

    /// Neighborhood constraint, if it actually restricts anything.
    pub fn active_neighborhoods(&self) -> Option<&[String]> {
        self.neighborhoods.as_deref().filter(|n| !n.is_empty())
    }
}

/// A named participant in one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub session_id: SessionId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A single course of a prix-fixe menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCourse {
    pub name: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Menu for one meal type (lunch, dinner, brunch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealMenu {
    pub meal_type: String,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub courses: Vec<MenuCourse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantMenu {
    pub menus: Vec<MealMenu>,
}

/// A catalog entry. The catalog is shared by every session and read-only to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub slug: String,
    pub name: String,
    /// Cuisine tags (e.g. `["Italian", "Pizza"]`).
    pub cuisine: Option<Vec<String>>,
    pub neighborhood: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub detail_url: Option<String>,
    pub image_url: Option<String>,
    /// Prices in whole dollars.
    pub lunch_price: Option<i64>,
    pub dinner_price: Option<i64>,
    pub brunch_price: Option<i64>,
    pub menu: Option<RestaurantMenu>,
    pub features: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One member's yes/no decision on one restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: i64,
    pub session_id: SessionId,
    pub member_id: MemberId,
    pub restaurant_id: RestaurantId,
    pub vote: bool,
    pub created_at: DateTime<Utc>,
}
