//! Typed access to the three collections.
//!
//! Every read is a full-collection fetch: there is no pagination, caching,
//! or incremental sync. Documents that fail schema validation are logged
//! and left out of the returned snapshot.

use jiff::Timestamp;
use rxlog_core::error::CoreError;
use rxlog_core::keys::{self, Collection};
use rxlog_core::models::{
    Intervention, InterventionUpdate, Medication, NewIntervention, ProfileUpdate, Role, User,
};
use rxlog_core::schema;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::StorageError;
use crate::store::{Document, DocumentStore};

#[derive(Clone)]
pub struct Backend<S> {
    store: S,
}

impl<S: DocumentStore> Backend<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Interventions newest first. `owner` scopes the list to one user;
    /// `None` returns every intervention in the system.
    pub async fn list_interventions(
        &self,
        owner: Option<&str>,
    ) -> Result<Vec<Intervention>, StorageError> {
        let mut interventions = self
            .decode_all(Collection::Interventions, schema::decode_intervention)
            .await?;
        if let Some(owner) = owner {
            interventions.retain(|i| i.user_id == owner);
        }
        interventions.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(interventions)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        let mut users = self
            .decode_all(Collection::Users, schema::decode_user)
            .await?;
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(users)
    }

    pub async fn list_medications(&self) -> Result<Vec<Medication>, StorageError> {
        let mut medications = self
            .decode_all(Collection::Medications, schema::decode_medication)
            .await?;
        medications.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(medications)
    }

    pub async fn get_user(&self, id: &str) -> Result<User, StorageError> {
        let doc = self.store.get(Collection::Users, id).await?;
        Ok(schema::decode_user(&doc.id, &doc.body)?)
    }

    /// Write the user record that accompanies a fresh sign-up. New accounts
    /// are pharmacists with an incomplete profile.
    pub async fn create_user(
        &self,
        id: &str,
        email: &str,
        full_name: &str,
    ) -> Result<User, StorageError> {
        let now = Timestamp::now();
        let user = User {
            id: id.to_string(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            role: Role::Pharmacist,
            profile_completed: false,
            created_at: now,
            updated_at: now,
        };
        self.store
            .put(Collection::Users, id, schema::encode_user(&user))
            .await?;
        info!(user_id = %id, "created user record");
        Ok(user)
    }

    /// Store a new intervention and return its assigned identifier.
    pub async fn create_intervention(
        &self,
        record: &NewIntervention,
    ) -> Result<String, StorageError> {
        let id = keys::new_id();
        let body = schema::encode_new_intervention(record, Timestamp::now());
        self.store.put(Collection::Interventions, &id, body).await?;
        info!(
            intervention_id = %id,
            user_id = %record.user_id,
            risk = %record.risk,
            outcome = %record.outcome,
            "created intervention"
        );
        Ok(id)
    }

    pub async fn update_intervention(
        &self,
        id: &str,
        update: &InterventionUpdate,
    ) -> Result<(), StorageError> {
        let fields = schema::intervention_update_fields(update, Timestamp::now());
        self.store
            .merge(Collection::Interventions, id, fields)
            .await?;
        info!(intervention_id = %id, "updated intervention");
        Ok(())
    }

    pub async fn delete_intervention(&self, id: &str) -> Result<(), StorageError> {
        self.store.delete(Collection::Interventions, id).await?;
        info!(intervention_id = %id, "deleted intervention");
        Ok(())
    }

    pub async fn create_medication(&self, name: &str) -> Result<String, StorageError> {
        let medication = Medication {
            id: keys::new_id(),
            name: name.to_string(),
            created_at: Timestamp::now(),
        };
        self.store
            .put(
                Collection::Medications,
                &medication.id,
                schema::encode_medication(&medication),
            )
            .await?;
        info!(medication_id = %medication.id, name = %medication.name, "created medication");
        Ok(medication.id)
    }

    pub async fn update_user_role(&self, id: &str, role: Role) -> Result<(), StorageError> {
        self.store
            .merge(Collection::Users, id, schema::role_update_fields(role, Timestamp::now()))
            .await?;
        info!(user_id = %id, role = %role, "updated user role");
        Ok(())
    }

    pub async fn update_user_profile(
        &self,
        id: &str,
        update: &ProfileUpdate,
    ) -> Result<(), StorageError> {
        let fields = schema::profile_update_fields(update, Timestamp::now());
        self.store.merge(Collection::Users, id, fields).await?;
        info!(user_id = %id, "updated user profile");
        Ok(())
    }

    async fn decode_all<T>(
        &self,
        collection: Collection,
        decode: fn(&str, &Value) -> Result<T, CoreError>,
    ) -> Result<Vec<T>, StorageError> {
        let docs = self.store.list(collection).await?;
        let total = docs.len();

        let records: Vec<T> = docs
            .iter()
            .filter_map(|Document { id, body }| match decode(id, body) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(collection = %collection, error = %e, "rejected document");
                    None
                }
            })
            .collect();

        if records.len() < total {
            warn!(
                collection = %collection,
                rejected = total - records.len(),
                total,
                "snapshot excludes documents that failed validation"
            );
        }

        Ok(records)
    }
}
