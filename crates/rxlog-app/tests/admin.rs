mod common;

use common::harness;
use rxlog_app::AppError;
use rxlog_app::screens::{Screen, admin};
use rxlog_core::keys::Collection;
use rxlog_core::leaderboard::Medal;
use rxlog_core::models::{Outcome, RiskLevel, Role};

#[tokio::test]
async fn pharmacists_are_refused() {
    let h = harness();
    let me = h.pharmacist("me@example.org", "Me").await;

    let err = admin::authorize(&me).unwrap_err();
    assert!(matches!(
        err,
        AppError::AccessDenied {
            required: Role::Administrator
        }
    ));
}

#[tokio::test]
async fn dashboard_summarises_the_whole_system() {
    let h = harness();
    let boss = h.administrator("boss@example.org", "Boss").await;
    let a = h.pharmacist("a@example.org", "A").await;
    let b = h.pharmacist("b@example.org", "B").await;

    h.log(&a, RiskLevel::High, Outcome::Accepted).await;
    h.log(&a, RiskLevel::Low, Outcome::Pending).await;
    h.log(&b, RiskLevel::Extreme, Outcome::NotAccepted).await;

    let admin = admin::authorize(&boss).unwrap();
    let summary = admin::dashboard(&h.ctx.backend, &admin).await.unwrap();
    assert_eq!(summary.total_users, 3);
    assert_eq!(summary.total_pharmacists, 2);
    assert_eq!(summary.interventions.total_interventions, 3);
    assert_eq!(summary.interventions.acceptance_rate, 33);
    assert_eq!(summary.interventions.high_risk_count, 2);
}

#[tokio::test]
async fn intervention_rows_resolve_names() {
    let h = harness();
    let boss = h.administrator("boss@example.org", "Boss").await;
    let a = h.pharmacist("a@example.org", "Alice").await;
    let warfarin = h.ctx.backend.create_medication("Warfarin").await.unwrap();

    h.log_with(
        &a,
        RiskLevel::High,
        Outcome::Accepted,
        vec![warfarin, "deleted-medication".to_string()],
    )
    .await;
    let orphan = rxlog_core::models::NewIntervention {
        user_id: "departed-user".to_string(),
        problem: "Old entry".to_string(),
        medication_ids: Vec::new(),
        risk: RiskLevel::Low,
        outcome: Outcome::Pending,
    };
    h.ctx.backend.create_intervention(&orphan).await.unwrap();

    let admin = admin::authorize(&boss).unwrap();
    let rows = admin::interventions(&h.ctx.backend, &admin).await.unwrap();
    assert_eq!(rows.len(), 2);

    let alice = rows.iter().find(|r| r.intervention.user_id == a.user_id()).unwrap();
    assert_eq!(alice.pharmacist_name, "Alice");
    assert_eq!(alice.medication_names, vec!["Warfarin", admin::UNKNOWN]);

    let departed = rows.iter().find(|r| r.intervention.user_id == "departed-user").unwrap();
    assert_eq!(departed.pharmacist_name, admin::UNKNOWN);
    assert!(departed.medication_names.is_empty());
}

#[tokio::test]
async fn toggling_a_role_refetches_users() {
    let h = harness();
    let boss = h.administrator("boss@example.org", "Boss").await;
    let a = h.pharmacist("a@example.org", "A").await;

    let admin = admin::authorize(&boss).unwrap();
    let mut screen = Screen::new("users");
    assert!(screen.load(admin::users(&h.ctx.backend, &admin)).await);
    let listed = screen
        .snapshot()
        .unwrap()
        .iter()
        .find(|u| u.id == a.user_id())
        .cloned()
        .unwrap();
    assert_eq!(listed.role, Role::Pharmacist);

    let notice = admin::toggle_role(&h.ctx.backend, &admin, &mut screen, &listed).await;
    assert_eq!(notice.title, "Role Updated");
    assert_eq!(notice.message, "User role changed to Administrator");

    let promoted = screen
        .snapshot()
        .unwrap()
        .iter()
        .find(|u| u.id == a.user_id())
        .unwrap();
    assert_eq!(promoted.role, Role::Administrator);
}

#[tokio::test]
async fn failed_role_change_keeps_list() {
    let h = harness();
    let boss = h.administrator("boss@example.org", "Boss").await;
    h.pharmacist("a@example.org", "A").await;

    let admin = admin::authorize(&boss).unwrap();
    let mut screen = Screen::new("users");
    screen.load(admin::users(&h.ctx.backend, &admin)).await;
    let before = screen.snapshot().cloned().unwrap();

    let notice =
        admin::set_role(&h.ctx.backend, &admin, &mut screen, "no-such-user", Role::Administrator)
            .await;
    assert!(notice.is_error());
    assert_eq!(notice.message, "Failed to update role");
    assert_eq!(screen.snapshot(), Some(&before));
}

#[tokio::test]
async fn leaderboard_ranks_pharmacists_only() {
    let h = harness();
    let boss = h.administrator("boss@example.org", "Boss").await;
    let a = h.pharmacist("a@example.org", "A").await;
    let b = h.pharmacist("b@example.org", "B").await;
    let idle = h.pharmacist("idle@example.org", "Idle").await;

    for outcome in [
        Outcome::Accepted,
        Outcome::Accepted,
        Outcome::Accepted,
        Outcome::Pending,
        Outcome::NotAccepted,
    ] {
        h.log(&a, RiskLevel::Low, outcome).await;
    }
    for i in 0..8 {
        let outcome = if i < 2 { Outcome::Accepted } else { Outcome::Pending };
        h.log(&b, RiskLevel::Moderate, outcome).await;
    }
    h.log(&boss, RiskLevel::High, Outcome::Accepted).await;

    let admin = admin::authorize(&boss).unwrap();
    let board = admin::leaderboard(&h.ctx.backend, &admin).await.unwrap();

    assert_eq!(board.len(), 3);
    assert_eq!(board[0].user.id, b.user_id());
    assert_eq!(board[0].acceptance_rate, 25);
    assert_eq!(board[0].medal, Some(Medal::Gold));
    assert_eq!(board[1].user.id, a.user_id());
    assert_eq!(board[1].acceptance_rate, 60);
    assert_eq!(board[2].user.id, idle.user_id());
    assert_eq!(board[2].intervention_count, 0);
    assert_eq!(board[2].rank, 3);
}

#[tokio::test]
async fn failed_join_leaves_screen_empty() {
    let h = harness();
    let boss = h.administrator("boss@example.org", "Boss").await;
    let admin = admin::authorize(&boss).unwrap();

    let mut screen = Screen::new("leaderboard");
    h.store().set_unavailable(true);
    assert!(!screen.load(admin::leaderboard(&h.ctx.backend, &admin)).await);
    assert!(screen.snapshot().is_none());
}

#[tokio::test]
async fn one_failed_fetch_in_a_join_keeps_previous_snapshot() {
    let h = harness();
    let boss = h.administrator("boss@example.org", "Boss").await;
    let a = h.pharmacist("a@example.org", "A").await;
    h.log(&a, RiskLevel::High, Outcome::Accepted).await;
    let admin = admin::authorize(&boss).unwrap();

    let mut board = Screen::new("leaderboard");
    let mut rows = Screen::new("interventions");
    assert!(board.load(admin::leaderboard(&h.ctx.backend, &admin)).await);
    assert!(rows.load(admin::interventions(&h.ctx.backend, &admin)).await);
    let board_before = board.snapshot().cloned().unwrap();
    let rows_before = rows.snapshot().cloned().unwrap();

    h.log(&a, RiskLevel::Low, Outcome::Pending).await;
    h.store().set_unavailable_for(Collection::Users, true);
    assert!(h.ctx.backend.list_interventions(None).await.is_ok());

    assert!(!board.load(admin::leaderboard(&h.ctx.backend, &admin)).await);
    assert!(!rows.load(admin::interventions(&h.ctx.backend, &admin)).await);
    assert!(!board.is_loading());
    assert_eq!(board.snapshot(), Some(&board_before));
    assert_eq!(rows.snapshot(), Some(&rows_before));

    h.store().set_unavailable_for(Collection::Users, false);
    assert!(rows.load(admin::interventions(&h.ctx.backend, &admin)).await);
    assert_eq!(rows.snapshot().unwrap().len(), 2);
}

#[tokio::test]
async fn medications_need_a_name() {
    let h = harness();
    let boss = h.administrator("boss@example.org", "Boss").await;
    let admin = admin::authorize(&boss).unwrap();

    let (notice, id) = admin::add_medication(&h.ctx.backend, &admin, "  ").await;
    assert!(notice.is_error());
    assert!(id.is_none());

    let (notice, id) = admin::add_medication(&h.ctx.backend, &admin, " Metformin ").await;
    assert!(!notice.is_error());
    let id = id.unwrap();
    let medications = h.ctx.backend.list_medications().await.unwrap();
    assert_eq!(medications.len(), 1);
    assert_eq!(medications[0].id, id);
    assert_eq!(medications[0].name, "Metformin");
}
