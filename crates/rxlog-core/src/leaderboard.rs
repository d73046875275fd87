//! Pharmacist leaderboard.
//!
//! Ranks every pharmacist by the number of interventions they have logged.
//! Ties are broken by acceptance rate (higher first), then by user id, so
//! the order is fully determined by the input snapshot.

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Intervention, Outcome, User};
use crate::stats::percentage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Medal for a zero-based leaderboard position; only the podium gets one.
    pub fn for_position(index: usize) -> Option<Self> {
        match index {
            0 => Some(Medal::Gold),
            1 => Some(Medal::Silver),
            2 => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn display_colour(self) -> &'static str {
        match self {
            Medal::Gold => "#FFD700",
            Medal::Silver => "#C0C0C0",
            Medal::Bronze => "#CD7F32",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// One-based position.
    pub rank: usize,
    pub medal: Option<Medal>,
    pub user: User,
    pub intervention_count: usize,
    pub accepted_count: usize,
    pub acceptance_rate: u8,
}

#[derive(Default)]
struct Tally {
    total: usize,
    accepted: usize,
}

/// Build the leaderboard from full user and intervention snapshots.
///
/// Only users with the `Pharmacist` role appear, each exactly once, whether
/// or not they have logged anything.
pub fn rank(users: &[User], interventions: &[Intervention]) -> Vec<LeaderboardEntry> {
    let mut tallies: HashMap<&str, Tally> = HashMap::new();
    for intervention in interventions {
        let tally = tallies.entry(intervention.user_id.as_str()).or_default();
        tally.total += 1;
        if intervention.outcome == Outcome::Accepted {
            tally.accepted += 1;
        }
    }

    let mut entries: Vec<LeaderboardEntry> = users
        .iter()
        .filter(|u| u.is_pharmacist())
        .map(|user| {
            let (total, accepted) = tallies
                .get(user.id.as_str())
                .map_or((0, 0), |t| (t.total, t.accepted));
            LeaderboardEntry {
                rank: 0,
                medal: None,
                user: user.clone(),
                intervention_count: total,
                accepted_count: accepted,
                acceptance_rate: percentage(accepted, total),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        Reverse(a.intervention_count)
            .cmp(&Reverse(b.intervention_count))
            .then(Reverse(a.acceptance_rate).cmp(&Reverse(b.acceptance_rate)))
            .then_with(|| a.user.id.cmp(&b.user.id))
    });

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index + 1;
        entry.medal = Medal::for_position(index);
    }

    entries
}
