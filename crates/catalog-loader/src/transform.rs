//! Conversion from scraped restaurant records to catalog rows.

use std::fs;
use std::path::Path;

use database::NewRestaurant;
use match_core::RestaurantMenu;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors while reading or converting scraped records.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid scraped JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("Record {slug} has a malformed menu: {source}")]
    InvalidMenu {
        slug: String,
        source: serde_json::Error,
    },
}

/// Price per meal type as scraped.
#[derive(Debug, Default, Deserialize)]
pub struct RawPricing {
    pub lunch: Option<i64>,
    pub dinner: Option<i64>,
    pub brunch: Option<i64>,
}

/// One record from the scraper output. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct RawRestaurant {
    pub slug: Option<String>,
    pub name: Option<String>,
    /// Comma-separated cuisine tags.
    pub cuisine: Option<String>,
    pub neighborhood: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub detail_url: Option<String>,
    pub image_url: Option<String>,
    pub pricing: Option<RawPricing>,
    pub menu: Option<Value>,
    pub features: Option<Vec<String>>,
}

/// Read the scraper's JSON array from disk.
pub fn load_records(path: &Path) -> Result<Vec<RawRestaurant>, TransformError> {
    let text = fs::read_to_string(path).map_err(|source| TransformError::Read {
        path: path.display().to_string(),
        source,
    })?;

    Ok(serde_json::from_str(&text)?)
}

fn split_cuisine(cuisine: Option<&str>) -> Option<Vec<String>> {
    let tags: Vec<String> = cuisine?
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();

    (!tags.is_empty()).then_some(tags)
}

/// Keep a menu only when it lists at least one meal.
fn parse_menu(slug: &str, menu: Option<Value>) -> Result<Option<RestaurantMenu>, TransformError> {
    let Some(menu) = menu else {
        return Ok(None);
    };

    let has_menus = menu
        .get("menus")
        .and_then(Value::as_array)
        .is_some_and(|menus| !menus.is_empty());
    if !has_menus {
        return Ok(None);
    }

    serde_json::from_value(menu)
        .map(Some)
        .map_err(|source| TransformError::InvalidMenu {
            slug: slug.to_string(),
            source,
        })
}

/// Convert one scraped record. `index` is only used in error messages.
pub fn transform_record(index: usize, raw: RawRestaurant) -> Result<NewRestaurant, TransformError> {
    let slug = raw
        .slug
        .filter(|slug| !slug.is_empty())
        .ok_or(TransformError::MissingField { index, field: "slug" })?;
    let name = raw
        .name
        .filter(|name| !name.is_empty())
        .ok_or(TransformError::MissingField { index, field: "name" })?;

    let pricing = raw.pricing.unwrap_or_default();
    let menu = parse_menu(&slug, raw.menu)?;

    Ok(NewRestaurant {
        cuisine: split_cuisine(raw.cuisine.as_deref()),
        neighborhood: raw.neighborhood,
        address: raw.address,
        phone: raw.phone,
        website: raw.website,
        detail_url: raw.detail_url,
        image_url: raw.image_url,
        lunch_price: pricing.lunch,
        dinner_price: pricing.dinner,
        brunch_price: pricing.brunch,
        menu,
        features: raw.features.filter(|features| !features.is_empty()),
        slug,
        name,
    })
}

/// Convert every record, failing on the first bad one.
pub fn transform_all(records: Vec<RawRestaurant>) -> Result<Vec<NewRestaurant>, TransformError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, raw)| transform_record(index, raw))
        .collect()
}
