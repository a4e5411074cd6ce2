//! Catalog routes not scoped to a session.

use axum::extract::State;
use axum::Json;
use database::restaurant;
use match_core::{filter_options as collect_filter_options, FilterOptions, Restaurant};

use crate::error::{storage, Result};
use crate::state::AppState;

/// The whole catalog, ordered by id.
pub async fn list_restaurants(State(state): State<AppState>) -> Result<Json<Vec<Restaurant>>> {
    let restaurants = restaurant::list_all(state.db.pool())
        .await
        .map_err(storage("Failed to fetch restaurants"))?;

    Ok(Json(restaurants))
}

/// Distinct cuisine tags and neighborhoods, sorted, for building filters.
pub async fn filter_options(State(state): State<AppState>) -> Result<Json<FilterOptions>> {
    let restaurants = restaurant::list_all(state.db.pool())
        .await
        .map_err(storage("Failed to fetch filter options"))?;

    Ok(Json(collect_filter_options(&restaurants)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{seed_catalog, test_state};

    #[tokio::test]
    async fn test_list_restaurants_returns_whole_catalog() {
        let state = test_state().await;
        let ids = seed_catalog(&state).await;

        let Json(all) = list_restaurants(State(state)).await.unwrap();
        assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), ids);
    }

    #[tokio::test]
    async fn test_filter_options_are_distinct_and_sorted() {
        let state = test_state().await;
        seed_catalog(&state).await;

        let Json(options) = filter_options(State(state)).await.unwrap();
        assert_eq!(options.cuisines, vec!["French", "Italian", "Japanese", "Sushi"]);
        assert_eq!(options.neighborhoods, vec!["Downtown", "Midtown"]);
    }

    #[tokio::test]
    async fn test_filter_options_on_empty_catalog() {
        let state = test_state().await;

        let Json(options) = filter_options(State(state)).await.unwrap();
        assert!(options.cuisines.is_empty());
        assert!(options.neighborhoods.is_empty());
    }
}
