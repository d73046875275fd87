use jiff::Timestamp;
use rxlog_core::leaderboard::{Medal, rank};
use rxlog_core::models::{Intervention, Outcome, RiskLevel, Role, User};

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

fn logged(user_id: &str, total: usize, accepted: usize) -> Vec<Intervention> {
    (0..total)
        .map(|n| Intervention {
            id: format!("{user_id}-{n}"),
            user_id: user_id.to_string(),
            problem: "renal dose adjustment".to_string(),
            medication_ids: vec!["m1".to_string()],
            risk: RiskLevel::Moderate,
            outcome: if n < accepted {
                Outcome::Accepted
            } else {
                Outcome::NotAccepted
            },
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        })
        .collect()
}

#[test]
fn busier_pharmacist_ranks_first() {
    let users = vec![user("a", Role::Pharmacist), user("b", Role::Pharmacist)];
    let mut interventions = logged("a", 5, 3);
    interventions.extend(logged("b", 8, 2));

    let board = rank(&users, &interventions);
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].user.id, "b");
    assert_eq!(board[0].intervention_count, 8);
    assert_eq!(board[0].acceptance_rate, 25);
    assert_eq!(board[1].user.id, "a");
    assert_eq!(board[1].accepted_count, 3);
    assert_eq!(board[1].acceptance_rate, 60);
}

#[test]
fn administrators_are_excluded_and_idle_pharmacists_included() {
    let users = vec![
        user("admin", Role::Administrator),
        user("idle", Role::Pharmacist),
        user("busy", Role::Pharmacist),
    ];
    let mut interventions = logged("busy", 2, 2);
    interventions.extend(logged("admin", 10, 10));

    let board = rank(&users, &interventions);
    let ids: Vec<_> = board.iter().map(|e| e.user.id.as_str()).collect();
    assert_eq!(ids, vec!["busy", "idle"]);
    assert_eq!(board[1].intervention_count, 0);
    assert_eq!(board[1].acceptance_rate, 0);
}

#[test]
fn ties_break_on_acceptance_rate_then_id() {
    let users = vec![
        user("c", Role::Pharmacist),
        user("b", Role::Pharmacist),
        user("a", Role::Pharmacist),
    ];
    let mut interventions = logged("a", 4, 1);
    interventions.extend(logged("b", 4, 3));
    interventions.extend(logged("c", 4, 1));

    let board = rank(&users, &interventions);
    let ids: Vec<_> = board.iter().map(|e| e.user.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
}

#[test]
fn podium_gets_medals_and_ranks_are_one_based() {
    let users: Vec<_> = ["p1", "p2", "p3", "p4"]
        .iter()
        .map(|id| user(id, Role::Pharmacist))
        .collect();
    let mut interventions = logged("p1", 4, 0);
    interventions.extend(logged("p2", 3, 0));
    interventions.extend(logged("p3", 2, 0));
    interventions.extend(logged("p4", 1, 0));

    let board = rank(&users, &interventions);
    let medals: Vec<_> = board.iter().map(|e| e.medal).collect();
    assert_eq!(
        medals,
        vec![Some(Medal::Gold), Some(Medal::Silver), Some(Medal::Bronze), None]
    );
    assert_eq!(board[3].rank, 4);
    assert_eq!(Medal::Gold.display_colour(), "#FFD700");
}
