//! Restaurant catalog storage.
//!
//! Session filters are pushed down to SQL through [`RestaurantQuery`], the
//! storage-backed [`CatalogQuery`]. Cuisine tags are a JSON array, so the
//! overlap test runs over `json_each(cuisine)`.

use chrono::Utc;
use match_core::{apply_filters, CatalogQuery, Restaurant, SessionFilters};
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::Result;
use crate::models::{NewRestaurant, RestaurantRow};

const SELECT_RESTAURANTS: &str = r#"
    SELECT id, slug, name, cuisine, neighborhood, address, phone, website,
           detail_url, image_url, lunch_price, dinner_price, brunch_price,
           menu, features, created_at, updated_at
    FROM restaurants
"#;

/// A (possibly filtered) catalog and its exact size.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub restaurants: Vec<Restaurant>,
    pub total: usize,
}

#[derive(Debug, Clone)]
enum Condition {
    CuisineOverlaps(Vec<String>),
    NeighborhoodIn(Vec<String>),
}

/// Lazy restaurant query. Narrowing only records conditions; nothing runs
/// until [`RestaurantQuery::fetch_all`].
#[derive(Debug, Clone, Default)]
pub struct RestaurantQuery {
    conditions: Vec<Condition>,
}

impl RestaurantQuery {
    pub fn new() -> Self {
        Self::default()
    }

    fn build(&self) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new(SELECT_RESTAURANTS);

        for (i, condition) in self.conditions.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });

            let (prefix, values) = match condition {
                Condition::CuisineOverlaps(values) => (
                    "EXISTS (SELECT 1 FROM json_each(restaurants.cuisine) WHERE json_each.value IN (",
                    values,
                ),
                Condition::NeighborhoodIn(values) => ("(neighborhood IN (", values),
            };

            // IN () is not valid SQL; an empty set matches nothing.
            if values.is_empty() {
                builder.push("0");
                continue;
            }

            builder.push(prefix);
            let mut separated = builder.separated(", ");
            for value in values {
                separated.push_bind(value.clone());
            }
            separated.push_unseparated("))");
        }

        builder.push(" ORDER BY id");
        builder
    }

    /// Run the query.
    pub async fn fetch_all(&self, pool: &SqlitePool) -> Result<Vec<Restaurant>> {
        let rows = self
            .build()
            .build_query_as::<RestaurantRow>()
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Restaurant::from).collect())
    }
}

impl CatalogQuery for RestaurantQuery {
    fn overlaps_cuisine(mut self, cuisines: &[String]) -> Self {
        self.conditions.push(Condition::CuisineOverlaps(cuisines.to_vec()));
        self
    }

    fn neighborhood_in(mut self, neighborhoods: &[String]) -> Self {
        self.conditions
            .push(Condition::NeighborhoodIn(neighborhoods.to_vec()));
        self
    }
}

/// List the catalog narrowed by a session's filters.
///
/// `total` counts the filtered set, not the whole catalog.
pub async fn list_restaurants(
    pool: &SqlitePool,
    filters: Option<&SessionFilters>,
) -> Result<Catalog> {
    let restaurants = apply_filters(RestaurantQuery::new(), filters)
        .fetch_all(pool)
        .await?;

    Ok(Catalog {
        total: restaurants.len(),
        restaurants,
    })
}

/// List the whole catalog.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Restaurant>> {
    RestaurantQuery::new().fetch_all(pool).await
}

/// Insert or update restaurants by slug, one transaction per batch.
///
/// Returns the number of rows written.
pub async fn upsert_restaurants(
    pool: &SqlitePool,
    rows: &[NewRestaurant],
    batch_size: usize,
) -> Result<usize> {
    let mut written = 0;

    for batch in rows.chunks(batch_size.max(1)) {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        for row in batch {
            sqlx::query(
                r#"
                INSERT INTO restaurants (
                    slug, name, cuisine, neighborhood, address, phone, website,
                    detail_url, image_url, lunch_price, dinner_price, brunch_price,
                    menu, features, created_at, updated_at
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(slug) DO UPDATE SET
                    name = excluded.name,
                    cuisine = excluded.cuisine,
                    neighborhood = excluded.neighborhood,
                    address = excluded.address,
                    phone = excluded.phone,
                    website = excluded.website,
                    detail_url = excluded.detail_url,
                    image_url = excluded.image_url,
                    lunch_price = excluded.lunch_price,
                    dinner_price = excluded.dinner_price,
                    brunch_price = excluded.brunch_price,
                    menu = excluded.menu,
                    features = excluded.features,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(&row.slug)
            .bind(&row.name)
            .bind(row.cuisine.as_ref().map(Json))
            .bind(&row.neighborhood)
            .bind(&row.address)
            .bind(&row.phone)
            .bind(&row.website)
            .bind(&row.detail_url)
            .bind(&row.image_url)
            .bind(row.lunch_price)
            .bind(row.dinner_price)
            .bind(row.brunch_price)
            .bind(row.menu.as_ref().map(Json))
            .bind(row.features.as_ref().map(Json))
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        written += batch.len();
        tracing::debug!(written, total = rows.len(), "Upserted restaurant batch");
    }

    Ok(written)
}
