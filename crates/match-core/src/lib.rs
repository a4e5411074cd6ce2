//! Consensus core for Tastebud group sessions.
//!
//! Everything in this crate is a pure function of the data handed to it:
//!
//! - [`check_access`] - Gate a session on existence and expiry
//! - [`apply_filters`] / [`CatalogQuery`] - Narrow the restaurant catalog by session filters
//! - [`aggregate`] - Turn votes into matches, member progress, and a completion flag
//! - [`swipe_queue`] - Shuffle the restaurants a member still has to vote on
//! - [`IdentityStore`] - Remembered membership for returning clients
//!
//! # Example
//!
//! ```rust
//! use match_core::{aggregate, apply_filters, Member, Restaurant};
//!
//! let members: Vec<Member> = Vec::new();
//! let catalog: Vec<Restaurant> = apply_filters(Vec::new(), None);
//! let tally = aggregate(&members, &catalog, &[]);
//!
//! assert_eq!(tally.match_count, 0);
//! assert!(!tally.all_members_complete);
//! ```

pub mod access;
pub mod aggregate;
pub mod filter;
pub mod identity;
pub mod models;
pub mod queue;

#[cfg(test)]
mod testing;

pub use access::{check_access, AccessDenied};
pub use aggregate::{aggregate, Match, MemberProgress, Tally};
pub use filter::{apply_filters, filter_options, CatalogQuery, FilterOptions};
pub use identity::{Identity, IdentityStore, MemoryIdentityStore};
pub use models::{
    MealMenu, Member, MemberId, MenuCourse, Restaurant, RestaurantId, RestaurantMenu, Session,
    SessionFilters, SessionId, Vote,
};
pub use queue::{shuffle, swipe_queue};
