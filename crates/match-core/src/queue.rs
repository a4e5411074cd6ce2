//! Swipe queue ordering.
//!
//! Presentation only: the order a member sees restaurants in has no bearing
//! on how votes are stored or matched.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Restaurant, RestaurantId};

/// Shuffle a catalog in place.
pub fn shuffle<R: Rng + ?Sized>(catalog: &mut [Restaurant], rng: &mut R) {
    catalog.shuffle(rng);
}

/// Build a member's swipe queue: everything not yet voted on, shuffled.
pub fn swipe_queue<R: Rng + ?Sized>(
    catalog: Vec<Restaurant>,
    voted: &[RestaurantId],
    rng: &mut R,
) -> Vec<Restaurant> {
    let voted: HashSet<RestaurantId> = voted.iter().copied().collect();
    let mut queue: Vec<Restaurant> = catalog
        .into_iter()
        .filter(|r| !voted.contains(&r.id))
        .collect();
    shuffle(&mut queue, rng);
    queue
}
