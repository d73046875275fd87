#![allow(dead_code)]

use rxlog_app::AppContext;
use rxlog_auth::memory::MemoryAuth;
use rxlog_auth::{Session, SessionStore};
use rxlog_core::models::{NewIntervention, Outcome, RiskLevel, Role};
use rxlog_storage::MemoryStore;

pub const PASSWORD: &str = "hunter22";

pub struct Harness {
    pub ctx: AppContext<MemoryAuth, MemoryStore>,
    _dir: tempfile::TempDir,
}

pub fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let sessions = SessionStore::new(dir.path().join("session.json"));
    Harness {
        ctx: AppContext::new(MemoryAuth::new(), MemoryStore::new(), sessions),
        _dir: dir,
    }
}

impl Harness {
    pub fn store(&self) -> &MemoryStore {
        self.ctx.backend.store()
    }

    /// A pharmacist who has already completed their profile.
    pub async fn pharmacist(&self, email: &str, full_name: &str) -> Session {
        let mut session = self.ctx.sign_up(email, PASSWORD, full_name).await.unwrap();
        let update = rxlog_core::models::ProfileUpdate {
            full_name: None,
            profile_completed: Some(true),
        };
        self.ctx
            .backend
            .update_user_profile(session.user_id(), &update)
            .await
            .unwrap();
        session.user = self.ctx.backend.get_user(session.user_id()).await.unwrap();
        session
    }

    pub async fn administrator(&self, email: &str, full_name: &str) -> Session {
        let mut session = self.ctx.sign_up(email, PASSWORD, full_name).await.unwrap();
        self.ctx
            .backend
            .update_user_role(session.user_id(), Role::Administrator)
            .await
            .unwrap();
        session.user = self.ctx.backend.get_user(session.user_id()).await.unwrap();
        session
    }

    pub async fn log(&self, session: &Session, risk: RiskLevel, outcome: Outcome) -> String {
        self.log_with(session, risk, outcome, Vec::new()).await
    }

    pub async fn log_with(
        &self,
        session: &Session,
        risk: RiskLevel,
        outcome: Outcome,
        medication_ids: Vec<String>,
    ) -> String {
        let record = NewIntervention {
            user_id: session.user_id().to_string(),
            problem: format!("{risk} risk, {outcome}"),
            medication_ids,
            risk,
            outcome,
        };
        self.ctx.backend.create_intervention(&record).await.unwrap()
    }
}
