//! Vote aggregation: matches, per-member progress, and session completion.
//!
//! Matches require strict unanimity among *all* current members. A member who
//! has not voted on a restaurant counts as a non-yes, so a match computed
//! before everyone finishes can be revoked by a late "no". Callers surface
//! [`Tally::all_members_complete`] so clients can warn that results may still
//! change; incomplete matches are not hidden.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::{Member, MemberId, Restaurant, RestaurantId, Vote};

/// A restaurant every current member voted yes on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub restaurant: Restaurant,
    /// Names of the members who liked it. Order is not part of the contract.
    pub liked_by: Vec<String>,
}

/// Voting progress of one member against the (filtered) catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProgress {
    pub id: MemberId,
    pub name: String,
    pub votes_count: usize,
    pub total_restaurants: usize,
    pub done: bool,
}

/// Result of [`aggregate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    /// Matches in catalog order.
    pub matches: Vec<Match>,
    /// Progress in roster order.
    pub members: Vec<MemberProgress>,
    /// Size of the filtered catalog.
    pub total_restaurants: usize,
    pub match_count: usize,
    pub all_members_complete: bool,
}

/// Aggregate a session's votes.
///
/// `restaurants` must already be narrowed by the session filters; its length
/// is the `total_restaurants` every member is measured against. Per-member
/// vote counts are taken over all of `votes`, so votes on restaurants outside
/// the filtered catalog still count towards progress but never produce a match.
pub fn aggregate(members: &[Member], restaurants: &[Restaurant], votes: &[Vote]) -> Tally {
    let total_restaurants = restaurants.len();

    let names: HashMap<&str, &str> = members
        .iter()
        .map(|m| (m.id.as_str(), m.name.as_str()))
        .collect();

    let mut likes: HashMap<RestaurantId, HashSet<&str>> = HashMap::new();
    let mut votes_per_member: HashMap<&str, usize> = HashMap::new();

    for vote in votes {
        *votes_per_member.entry(vote.member_id.as_str()).or_default() += 1;

        if vote.vote && names.contains_key(vote.member_id.as_str()) {
            likes
                .entry(vote.restaurant_id)
                .or_default()
                .insert(vote.member_id.as_str());
        }
    }

    let mut matches = Vec::new();
    if !members.is_empty() {
        for restaurant in restaurants {
            let Some(likers) = likes.get(&restaurant.id) else {
                continue;
            };
            if likers.len() != members.len() {
                continue;
            }

            let liked_by = members
                .iter()
                .filter(|m| likers.contains(m.id.as_str()))
                .map(|m| m.name.clone())
                .collect();

            matches.push(Match {
                restaurant: restaurant.clone(),
                liked_by,
            });
        }
    }

    let progress: Vec<MemberProgress> = members
        .iter()
        .map(|member| {
            let votes_count = votes_per_member
                .get(member.id.as_str())
                .copied()
                .unwrap_or(0);
            MemberProgress {
                id: member.id.clone(),
                name: member.name.clone(),
                votes_count,
                total_restaurants,
                done: votes_count >= total_restaurants,
            }
        })
        .collect();

    let all_members_complete = !progress.is_empty() && progress.iter().all(|p| p.done);

    Tally {
        match_count: matches.len(),
        matches,
        members: progress,
        total_restaurants,
        all_members_complete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{member, restaurant, vote};

    fn plain_catalog(ids: &[i64]) -> Vec<Restaurant> {
        ids.iter().map(|&id| restaurant(id, None, None)).collect()
    }

    fn match_ids(tally: &Tally) -> Vec<i64> {
        tally.matches.iter().map(|m| m.restaurant.id).collect()
    }

    fn sorted(mut names: Vec<String>) -> Vec<String> {
        names.sort();
        names
    }

    #[test]
    fn test_two_members_agree_on_two_of_three() {
        let members = vec![member("a", "Alice"), member("b", "Bob")];
        let catalog = plain_catalog(&[1, 2, 3]);
        let votes = vec![
            vote(1, "a", 1, true),
            vote(2, "b", 1, true),
            vote(3, "a", 2, true),
            vote(4, "b", 2, false),
            vote(5, "a", 3, true),
            vote(6, "b", 3, true),
        ];

        let tally = aggregate(&members, &catalog, &votes);

        assert_eq!(match_ids(&tally), vec![1, 3]);
        assert_eq!(tally.match_count, 2);
        assert_eq!(
            sorted(tally.matches[0].liked_by.clone()),
            vec!["Alice".to_string(), "Bob".to_string()]
        );
        assert!(tally.all_members_complete);
    }

    #[test]
    fn test_single_member_matches_every_yes() {
        let members = vec![member("a", "Alice")];
        let catalog = plain_catalog(&[1, 2]);
        let votes = vec![vote(1, "a", 1, true), vote(2, "a", 2, false)];

        let tally = aggregate(&members, &catalog, &votes);

        assert_eq!(match_ids(&tally), vec![1]);
        assert_eq!(tally.matches[0].liked_by, vec!["Alice".to_string()]);
        assert!(tally.all_members_complete);
        assert_eq!(tally.members[0].votes_count, 2);
        assert_eq!(tally.members[0].total_restaurants, 2);
    }

    #[test]
    fn test_straggler_keeps_session_incomplete() {
        let members = vec![member("a", "Alice"), member("b", "Bob")];
        let catalog = plain_catalog(&[1, 2]);
        let votes = vec![
            vote(1, "a", 1, true),
            vote(2, "a", 2, true),
            vote(3, "b", 1, true),
        ];

        let tally = aggregate(&members, &catalog, &votes);

        assert!(!tally.all_members_complete);
        assert!(tally.members[0].done);
        assert!(!tally.members[1].done);
        assert_eq!(tally.members[1].votes_count, 1);
        // Bob has not voted on 2 yet, so only 1 matches for now.
        assert_eq!(match_ids(&tally), vec![1]);
    }

    #[test]
    fn test_zero_members_never_match() {
        let catalog = plain_catalog(&[1, 2]);
        let votes = vec![vote(1, "ghost", 1, true)];

        let tally = aggregate(&[], &catalog, &votes);

        assert!(tally.matches.is_empty());
        assert_eq!(tally.match_count, 0);
        assert!(!tally.all_members_complete);
        assert!(tally.members.is_empty());
    }

    #[test]
    fn test_unanimity_requires_every_member() {
        let members = vec![member("a", "Alice"), member("b", "Bob"), member("c", "Cam")];
        let catalog = plain_catalog(&[1]);

        for yes_voters in 0..=3 {
            let votes: Vec<Vote> = members
                .iter()
                .take(yes_voters)
                .enumerate()
                .map(|(i, m)| vote(i as i64, &m.id, 1, true))
                .collect();
            let tally = aggregate(&members, &catalog, &votes);
            assert_eq!(tally.match_count == 1, yes_voters == members.len());
        }
    }

    #[test]
    fn test_late_no_vote_revokes_match() {
        let members = vec![member("a", "Alice"), member("b", "Bob")];
        let catalog = plain_catalog(&[1]);
        let mut votes = vec![vote(1, "a", 1, true)];

        // Bob joins after Alice voted; nothing matches until Bob says yes.
        assert_eq!(aggregate(&members[..1], &catalog, &votes).match_count, 1);
        assert_eq!(aggregate(&members, &catalog, &votes).match_count, 0);

        votes.push(vote(2, "b", 1, false));
        let tally = aggregate(&members, &catalog, &votes);
        assert_eq!(tally.match_count, 0);
        assert!(tally.all_members_complete);
    }

    #[test]
    fn test_votes_outside_catalog_count_for_progress_only() {
        let members = vec![member("a", "Alice")];
        let catalog = plain_catalog(&[1]);
        let votes = vec![vote(1, "a", 99, true)];

        let tally = aggregate(&members, &catalog, &votes);

        assert!(tally.matches.is_empty());
        assert_eq!(tally.members[0].votes_count, 1);
        assert!(tally.members[0].done);
    }

    #[test]
    fn test_yes_votes_from_departed_members_are_ignored() {
        let members = vec![member("a", "Alice")];
        let catalog = plain_catalog(&[1]);
        let votes = vec![vote(1, "zed", 1, true)];

        let tally = aggregate(&members, &catalog, &votes);
        assert_eq!(tally.match_count, 0);
    }

    #[test]
    fn test_match_count_agrees_with_matches() {
        let members = vec![member("a", "Alice"), member("b", "Bob")];
        let catalog = plain_catalog(&[1, 2, 3, 4]);
        let votes = vec![
            vote(1, "a", 1, true),
            vote(2, "b", 1, true),
            vote(3, "a", 4, true),
            vote(4, "b", 4, true),
            vote(5, "a", 2, true),
        ];

        let tally = aggregate(&members, &catalog, &votes);
        assert_eq!(tally.match_count, tally.matches.len());
        assert_eq!(match_ids(&tally), vec![1, 4]);
    }

    #[test]
    fn test_empty_catalog_marks_members_done() {
        let members = vec![member("a", "Alice")];
        let tally = aggregate(&members, &[], &[]);

        assert_eq!(tally.total_restaurants, 0);
        assert!(tally.members[0].done);
        assert!(tally.all_members_complete);
    }

    #[test]
    fn test_progress_serializes_camel_case() {
        let progress = MemberProgress {
            id: "a".to_string(),
            name: "Alice".to_string(),
            votes_count: 1,
            total_restaurants: 2,
            done: false,
        };
        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["votesCount"], 1);
        assert_eq!(json["totalRestaurants"], 2);
    }
}
