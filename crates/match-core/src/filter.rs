//! Catalog narrowing by session filters.
//!
//! [`apply_filters`] works over anything implementing [`CatalogQuery`]: a
//! concrete in-memory list (implemented here) or a lazy storage query (the
//! `database` crate's `RestaurantQuery`). Both must narrow to the same set.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::{Restaurant, SessionFilters};

/// The two narrowing operations a catalog source must support.
pub trait CatalogQuery: Sized {
    /// Keep restaurants whose cuisine tags intersect `cuisines`.
    ///
    /// A restaurant without cuisine tags never matches.
    fn overlaps_cuisine(self, cuisines: &[String]) -> Self;

    /// Keep restaurants whose neighborhood is one of `neighborhoods`.
    ///
    /// A restaurant without a neighborhood never matches.
    fn neighborhood_in(self, neighborhoods: &[String]) -> Self;
}

/// Narrow `query` by `filters`. Absent or empty filter fields impose no constraint.
pub fn apply_filters<Q: CatalogQuery>(query: Q, filters: Option<&SessionFilters>) -> Q {
    let Some(filters) = filters else {
        return query;
    };

    let mut query = query;

    if let Some(cuisines) = filters.active_cuisines() {
        query = query.overlaps_cuisine(cuisines);
    }

    if let Some(neighborhoods) = filters.active_neighborhoods() {
        query = query.neighborhood_in(neighborhoods);
    }

    query
}

impl CatalogQuery for Vec<Restaurant> {
    fn overlaps_cuisine(mut self, cuisines: &[String]) -> Self {
        self.retain(|r| {
            r.cuisine
                .as_ref()
                .is_some_and(|tags| tags.iter().any(|tag| cuisines.contains(tag)))
        });
        self
    }

    fn neighborhood_in(mut self, neighborhoods: &[String]) -> Self {
        self.retain(|r| {
            r.neighborhood
                .as_ref()
                .is_some_and(|n| neighborhoods.contains(n))
        });
        self
    }
}

/// Distinct filter values present in a catalog, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub cuisines: Vec<String>,
    pub neighborhoods: Vec<String>,
}

/// Collect the cuisines and neighborhoods a host can filter on.
pub fn filter_options(catalog: &[Restaurant]) -> FilterOptions {
    let mut cuisines = BTreeSet::new();
    let mut neighborhoods = BTreeSet::new();

    for restaurant in catalog {
        if let Some(tags) = &restaurant.cuisine {
            cuisines.extend(tags.iter().filter(|t| !t.is_empty()).cloned());
        }
        if let Some(neighborhood) = restaurant.neighborhood.as_ref().filter(|n| !n.is_empty()) {
            neighborhoods.insert(neighborhood.clone());
        }
    }

    FilterOptions {
        cuisines: cuisines.into_iter().collect(),
        neighborhoods: neighborhoods.into_iter().collect(),
    }
}
