use rxlog_auth::Session;
use rxlog_core::models::{Medication, NewIntervention, Outcome, RiskLevel};
use rxlog_storage::{Backend, DocumentStore};

use crate::error::AppError;
use crate::notice::Notice;

/// Input state of the "log new intervention" form.
#[derive(Debug, Clone, PartialEq)]
pub struct InterventionForm {
    pub problem: String,
    pub risk: RiskLevel,
    pub outcome: Outcome,
    pub medication_ids: Vec<String>,
}

impl Default for InterventionForm {
    fn default() -> Self {
        Self {
            problem: String::new(),
            risk: RiskLevel::Low,
            outcome: Outcome::Pending,
            medication_ids: Vec::new(),
        }
    }
}

/// Medications offered by the form's picker, sorted by name.
pub async fn medications<S: DocumentStore>(
    backend: &Backend<S>,
) -> Result<Vec<Medication>, AppError> {
    Ok(backend.list_medications().await?)
}

impl InterventionForm {
    /// A blank form with the first available medication preselected.
    pub fn with_medications(medications: &[Medication]) -> Self {
        Self {
            medication_ids: medications.first().map(|m| m.id.clone()).into_iter().collect(),
            ..Self::default()
        }
    }

    /// Check the input and build the record to store. The problem text is
    /// trimmed and must not end up empty.
    pub fn validate(&self, session: &Session) -> Result<NewIntervention, AppError> {
        let problem = self.problem.trim();
        if problem.is_empty() {
            return Err(AppError::Validation("Please describe the problem".to_string()));
        }

        Ok(NewIntervention {
            user_id: session.user_id().to_string(),
            problem: problem.to_string(),
            medication_ids: self.medication_ids.clone(),
            risk: self.risk,
            outcome: self.outcome,
        })
    }

    /// Validate and store the intervention. On success the text, risk and
    /// outcome are reset and the new id is returned alongside the notice.
    pub async fn submit<S: DocumentStore>(
        &mut self,
        backend: &Backend<S>,
        session: &Session,
    ) -> (Notice, Option<String>) {
        let record = match self.validate(session) {
            Ok(record) => record,
            Err(e) => return (Notice::from_error(&e, "Failed to log intervention"), None),
        };

        match backend.create_intervention(&record).await {
            Ok(id) => {
                self.problem.clear();
                self.risk = RiskLevel::Low;
                self.outcome = Outcome::Pending;
                (
                    Notice::success("Success", "Intervention logged successfully"),
                    Some(id),
                )
            }
            Err(e) => (
                Notice::from_error(&AppError::from(e), "Failed to log intervention"),
                None,
            ),
        }
    }
}
