use jiff::Timestamp;
use rxlog_core::models::{Intervention, Outcome, RiskLevel, Role, User};
use rxlog_core::stats::{
    AdminSummary, Summary, acceptance_rate, high_risk_count, outcome_distribution, percentage,
    recent, risk_distribution,
};

fn intervention(n: usize, risk: RiskLevel, outcome: Outcome) -> Intervention {
    Intervention {
        id: format!("i{n}"),
        user_id: "u1".to_string(),
        problem: "duplicate therapy".to_string(),
        medication_ids: vec![],
        risk,
        outcome,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

fn with_outcomes(accepted: usize, other: usize) -> Vec<Intervention> {
    (0..accepted)
        .map(|n| intervention(n, RiskLevel::Low, Outcome::Accepted))
        .chain((0..other).map(|n| intervention(accepted + n, RiskLevel::Low, Outcome::Pending)))
        .collect()
}

fn user(id: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        email: format!("{id}@example.org"),
        full_name: id.to_uppercase(),
        role,
        profile_completed: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

#[test]
fn seven_of_ten_accepted_is_seventy_percent() {
    assert_eq!(acceptance_rate(&with_outcomes(7, 3)), 70);
}

#[test]
fn empty_snapshot_has_zero_rate_and_zero_high_risk() {
    assert_eq!(acceptance_rate(&[]), 0);
    assert_eq!(high_risk_count(&[]), 0);

    let outcomes = outcome_distribution(&[]);
    assert_eq!(outcomes.buckets().len(), 3);
    assert!(outcomes.buckets().iter().all(|b| b.count == 0));
    assert_eq!(outcomes.count(Outcome::NotAccepted), 0);
}

#[test]
fn rate_rounds_half_up() {
    assert_eq!(percentage(1, 8), 13);
    assert_eq!(percentage(1, 3), 33);
    assert_eq!(percentage(2, 3), 67);
    assert_eq!(percentage(1, 200), 1);
    assert_eq!(percentage(0, 5), 0);
    assert_eq!(percentage(5, 5), 100);
}

#[test]
fn high_and_extreme_count_as_high_risk() {
    let mut list = Vec::new();
    list.extend((0..3).map(|n| intervention(n, RiskLevel::High, Outcome::Pending)));
    list.extend((3..5).map(|n| intervention(n, RiskLevel::Extreme, Outcome::Pending)));
    list.extend((5..10).map(|n| intervention(n, RiskLevel::Low, Outcome::Pending)));
    assert_eq!(high_risk_count(&list), 5);

    list.push(intervention(10, RiskLevel::Moderate, Outcome::Pending));
    assert_eq!(high_risk_count(&list), 5);
}

#[test]
fn risk_distribution_keeps_every_level_in_order() {
    let list = vec![
        intervention(0, RiskLevel::Extreme, Outcome::Accepted),
        intervention(1, RiskLevel::Extreme, Outcome::NotAccepted),
        intervention(2, RiskLevel::Low, Outcome::Pending),
    ];
    let risks = risk_distribution(&list);
    let labels: Vec<_> = risks.buckets().iter().map(|b| b.label).collect();
    assert_eq!(
        labels,
        vec![RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High, RiskLevel::Extreme]
    );
    assert_eq!(risks.count(RiskLevel::Extreme), 2);
    assert_eq!(risks.count(RiskLevel::Moderate), 0);
    assert_eq!(risks.total(), 3);
    assert_eq!(risks.buckets()[3].colour, "#EF4444");
}

#[test]
fn outcome_distribution_serializes_with_wire_labels() {
    let list = vec![intervention(0, RiskLevel::Low, Outcome::NotAccepted)];
    let json = serde_json::to_value(outcome_distribution(&list)).unwrap();
    assert_eq!(json[1]["label"], "Not Accepted");
    assert_eq!(json[1]["count"], 1);
}

#[test]
fn recent_takes_newest_prefix() {
    let list = with_outcomes(2, 3);
    assert_eq!(recent(&list, 3).len(), 3);
    assert_eq!(recent(&list, 3)[0].id, "i0");
    assert_eq!(recent(&list[..1], 3).len(), 1);
}

#[test]
fn admin_summary_counts_pharmacists_and_users() {
    let users = vec![
        user("a", Role::Pharmacist),
        user("b", Role::Administrator),
        user("c", Role::Pharmacist),
    ];
    let list = with_outcomes(1, 1);
    let summary = AdminSummary::of(&list, &users);
    assert_eq!(summary.total_pharmacists, 2);
    assert_eq!(summary.total_users, 3);
    assert_eq!(summary.interventions, Summary::of(&list));
    assert_eq!(summary.interventions.acceptance_rate, 50);

    let json = serde_json::to_value(summary).unwrap();
    assert_eq!(json["totalInterventions"], 2);
    assert_eq!(json["totalPharmacists"], 2);
}
