//! Summary statistics over intervention snapshots.
//!
//! Every function here is a pure computation over an in-memory slice; the
//! caller decides when a snapshot is fetched and recomputes on each fetch.

use serde::Serialize;

use crate::models::{Category, Intervention, Outcome, RiskLevel, User};

/// `part / total` as a whole percentage, rounding halves up. An empty total
/// yields 0 rather than dividing by zero.
pub fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total);
    ((part * 200 + total) / (total * 2)) as u8
}

/// Share of interventions whose outcome is `Accepted`, in `[0, 100]`.
pub fn acceptance_rate(interventions: &[Intervention]) -> u8 {
    let accepted = interventions
        .iter()
        .filter(|i| i.outcome == Outcome::Accepted)
        .count();
    percentage(accepted, interventions.len())
}

pub fn high_risk_count(interventions: &[Intervention]) -> usize {
    interventions.iter().filter(|i| i.risk.is_high()).count()
}

pub fn outcome_distribution(interventions: &[Intervention]) -> Distribution<Outcome> {
    Distribution::tally(interventions.iter().map(|i| i.outcome))
}

pub fn risk_distribution(interventions: &[Intervention]) -> Distribution<RiskLevel> {
    Distribution::tally(interventions.iter().map(|i| i.risk))
}

/// The newest `n` interventions of a snapshot. Snapshots are ordered newest
/// first, so this is a prefix.
pub fn recent(interventions: &[Intervention], n: usize) -> &[Intervention] {
    &interventions[..n.min(interventions.len())]
}

/// Counts per label, one bucket for every label of `K` in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Distribution<K: Category> {
    buckets: Vec<Bucket<K>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bucket<K> {
    pub label: K,
    pub count: usize,
    pub colour: &'static str,
}

impl<K: Category> Distribution<K> {
    pub fn tally(values: impl IntoIterator<Item = K>) -> Self {
        let mut buckets: Vec<Bucket<K>> = K::ALL
            .iter()
            .map(|&label| Bucket {
                label,
                count: 0,
                colour: label.display_colour(),
            })
            .collect();

        for value in values {
            if let Some(bucket) = buckets.iter_mut().find(|b| b.label == value) {
                bucket.count += 1;
            }
        }

        Self { buckets }
    }

    pub fn count(&self, label: K) -> usize {
        self.buckets
            .iter()
            .find(|b| b.label == label)
            .map_or(0, |b| b.count)
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn buckets(&self) -> &[Bucket<K>] {
        &self.buckets
    }
}

/// Counters shown at the top of a dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_interventions: usize,
    pub acceptance_rate: u8,
    pub high_risk_count: usize,
}

impl Summary {
    pub fn of(interventions: &[Intervention]) -> Self {
        Self {
            total_interventions: interventions.len(),
            acceptance_rate: acceptance_rate(interventions),
            high_risk_count: high_risk_count(interventions),
        }
    }
}

/// System-wide counters for the administrator dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    #[serde(flatten)]
    pub interventions: Summary,
    pub total_pharmacists: usize,
    pub total_users: usize,
}

impl AdminSummary {
    pub fn of(interventions: &[Intervention], users: &[User]) -> Self {
        Self {
            interventions: Summary::of(interventions),
            total_pharmacists: users.iter().filter(|u| u.is_pharmacist()).count(),
            total_users: users.len(),
        }
    }
}
