use std::fmt;

use serde::{Deserialize, Serialize};

/// A closed set of labels that statistics are bucketed by.
///
/// `ALL` fixes the bucket order so charts keep stable categories even when
/// a label has no entries.
pub trait Category: Copy + Eq + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    /// Hex colour used when the label is drawn as a badge or chart slice.
    fn display_colour(self) -> &'static str;

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }
}

/// Assessed severity of an intervention. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Extreme,
}

impl RiskLevel {
    /// True for the two most severe tiers.
    pub fn is_high(self) -> bool {
        self >= RiskLevel::High
    }
}

impl Category for RiskLevel {
    const ALL: &'static [Self] = &[
        RiskLevel::Low,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::Extreme,
    ];

    fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Extreme => "Extreme",
        }
    }

    fn display_colour(self) -> &'static str {
        match self {
            RiskLevel::Low => "#10B981",
            RiskLevel::Moderate => "#F59E0B",
            RiskLevel::High => "#F97316",
            RiskLevel::Extreme => "#EF4444",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolution status of an intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Accepted,
    #[serde(rename = "Not Accepted")]
    NotAccepted,
    Pending,
}

impl Category for Outcome {
    const ALL: &'static [Self] = &[Outcome::Accepted, Outcome::NotAccepted, Outcome::Pending];

    fn label(self) -> &'static str {
        match self {
            Outcome::Accepted => "Accepted",
            Outcome::NotAccepted => "Not Accepted",
            Outcome::Pending => "Pending",
        }
    }

    fn display_colour(self) -> &'static str {
        match self {
            Outcome::Accepted => "#10B981",
            Outcome::NotAccepted => "#EF4444",
            Outcome::Pending => "#F59E0B",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A pharmacist-logged clinical event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intervention {
    pub id: String,
    pub user_id: String,
    pub problem: String,
    pub medication_ids: Vec<String>,
    pub risk: RiskLevel,
    pub outcome: Outcome,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

/// An intervention as submitted, before the backend assigns an identifier
/// and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIntervention {
    pub user_id: String,
    pub problem: String,
    pub medication_ids: Vec<String>,
    pub risk: RiskLevel,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionUpdate {
    pub problem: Option<String>,
    pub medication_ids: Option<Vec<String>>,
    pub risk: Option<RiskLevel>,
    pub outcome: Option<Outcome>,
}
