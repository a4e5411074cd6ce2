//! Fixture builders for unit tests.

use chrono::{TimeZone, Utc};

use crate::models::{Member, Restaurant, Vote};

pub(crate) fn restaurant(id: i64, cuisine: Option<&[&str]>, neighborhood: Option<&str>) -> Restaurant {
    let stamp = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    Restaurant {
        id,
        slug: format!("restaurant-{}", id),
        name: format!("Restaurant {}", id),
        cuisine: cuisine.map(|tags| tags.iter().map(|t| t.to_string()).collect()),
        neighborhood: neighborhood.map(str::to_string),
        address: None,
        phone: None,
        website: None,
        detail_url: None,
        image_url: None,
        lunch_price: None,
        dinner_price: None,
        brunch_price: None,
        menu: None,
        features: None,
        created_at: stamp,
        updated_at: stamp,
    }
}

pub(crate) fn member(id: &str, name: &str) -> Member {
    Member {
        id: id.to_string(),
        session_id: "session".to_string(),
        name: name.to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub(crate) fn vote(id: i64, member_id: &str, restaurant_id: i64, yes: bool) -> Vote {
    Vote {
        id,
        session_id: "session".to_string(),
        member_id: member_id.to_string(),
        restaurant_id,
        vote: yes,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}
