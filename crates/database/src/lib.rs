//! SQLite persistence layer for Tastebud.
//!
//! This crate provides async database operations for sessions, members, votes,
//! and the shared restaurant catalog using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use chrono::{Duration, Utc};
//! use database::{member, session, Database, NewSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:tastebud.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Open a session and join it
//!     let now = Utc::now();
//!     let session = session::create_session(
//!         db.pool(),
//!         &NewSession {
//!             name: "Date Night".to_string(),
//!             filters: None,
//!             created_at: now,
//!             expires_at: now + Duration::days(30),
//!         },
//!     )
//!     .await?;
//!     member::insert_member(db.pool(), &session.id, "Alice").await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod member;
pub mod models;
pub mod restaurant;
pub mod session;
pub mod vote;

pub use error::{DatabaseError, Result};
pub use models::{NewRestaurant, NewSession};
pub use restaurant::{Catalog, RestaurantQuery};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/tastebud.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing, use a single connection)
    /// let db = database::Database::connect_with_pool_size("sqlite::memory:", 1).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::{Duration, Utc};
    use match_core::Session;

    /// Each in-memory connection is its own database, so tests use one.
    pub async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        db
    }

    pub async fn seed_session(pool: &SqlitePool) -> Session {
        let now = Utc::now();
        session::create_session(
            pool,
            &NewSession {
                name: "Date Night".to_string(),
                filters: None,
                created_at: now,
                expires_at: now + Duration::days(30),
            },
        )
        .await
        .unwrap()
    }

    pub fn new_restaurant(
        slug: &str,
        cuisine: Option<&[&str]>,
        neighborhood: Option<&str>,
    ) -> NewRestaurant {
        NewRestaurant {
            slug: slug.to_string(),
            name: slug.replace('-', " "),
            cuisine: cuisine.map(|tags| tags.iter().map(|t| t.to_string()).collect()),
            neighborhood: neighborhood.map(str::to_string),
            address: None,
            phone: None,
            website: None,
            detail_url: None,
            image_url: None,
            lunch_price: Some(25),
            dinner_price: Some(42),
            brunch_price: None,
            menu: None,
            features: None,
        }
    }
}
