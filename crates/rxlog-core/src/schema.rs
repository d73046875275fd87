//! Document schema for the three collections.
//!
//! Stored bodies are untyped JSON objects written by several generations of
//! clients. Every document read from the store passes through `decode_*`,
//! which either yields a fully typed record or rejects the document with a
//! [`Violation`]. Optional fields are defaulted here and nowhere else:
//!
//! - `medicationIds` absent → empty list
//! - `profileCompleted` absent → `true`
//! - `updatedAt` absent → `createdAt`
//!
//! The identifier is the object key, never a field of the body.

use jiff::Timestamp;
use serde_json::{Map, Value};

use crate::error::{CoreError, Violation};
use crate::keys::Collection;
use crate::models::{
    Category, Intervention, InterventionUpdate, Medication, NewIntervention, Outcome,
    ProfileUpdate, RiskLevel, Role, User,
};

/// Field names used in stored documents.
pub mod field {
    pub const EMAIL: &str = "email";
    pub const FULL_NAME: &str = "fullName";
    pub const ROLE: &str = "role";
    pub const PROFILE_COMPLETED: &str = "profileCompleted";
    pub const USER_ID: &str = "userId";
    pub const PROBLEM: &str = "problem";
    pub const MEDICATION_IDS: &str = "medicationIds";
    pub const RISK: &str = "risk";
    pub const OUTCOME: &str = "outcome";
    pub const NAME: &str = "name";
    pub const CREATED_AT: &str = "createdAt";
    pub const UPDATED_AT: &str = "updatedAt";
}

pub fn decode_user(id: &str, body: &Value) -> Result<User, CoreError> {
    let doc = Reader::new(Collection::Users, id, body)?;
    let created_at = doc.timestamp(field::CREATED_AT)?;

    Ok(User {
        id: id.to_string(),
        email: doc.string(field::EMAIL)?,
        full_name: doc.string(field::FULL_NAME)?,
        role: doc.variant(field::ROLE, Role::from_label)?,
        profile_completed: doc.opt_bool(field::PROFILE_COMPLETED)?.unwrap_or(true),
        created_at,
        updated_at: doc.opt_timestamp(field::UPDATED_AT)?.unwrap_or(created_at),
    })
}

pub fn decode_intervention(id: &str, body: &Value) -> Result<Intervention, CoreError> {
    let doc = Reader::new(Collection::Interventions, id, body)?;
    let created_at = doc.timestamp(field::CREATED_AT)?;

    Ok(Intervention {
        id: id.to_string(),
        user_id: doc.string(field::USER_ID)?,
        problem: doc.string(field::PROBLEM)?,
        medication_ids: doc.opt_string_list(field::MEDICATION_IDS)?.unwrap_or_default(),
        risk: doc.variant(field::RISK, RiskLevel::from_label)?,
        outcome: doc.variant(field::OUTCOME, Outcome::from_label)?,
        created_at,
        updated_at: doc.opt_timestamp(field::UPDATED_AT)?.unwrap_or(created_at),
    })
}

pub fn decode_medication(id: &str, body: &Value) -> Result<Medication, CoreError> {
    let doc = Reader::new(Collection::Medications, id, body)?;

    Ok(Medication {
        id: id.to_string(),
        name: doc.string(field::NAME)?,
        created_at: doc.timestamp(field::CREATED_AT)?,
    })
}

pub fn encode_user(user: &User) -> Value {
    let mut body = Map::new();
    body.insert(field::EMAIL.into(), user.email.clone().into());
    body.insert(field::FULL_NAME.into(), user.full_name.clone().into());
    body.insert(field::ROLE.into(), user.role.label().into());
    body.insert(field::PROFILE_COMPLETED.into(), user.profile_completed.into());
    body.insert(field::CREATED_AT.into(), timestamp(user.created_at));
    body.insert(field::UPDATED_AT.into(), timestamp(user.updated_at));
    Value::Object(body)
}

pub fn encode_new_intervention(record: &NewIntervention, now: Timestamp) -> Value {
    let mut body = Map::new();
    body.insert(field::USER_ID.into(), record.user_id.clone().into());
    body.insert(field::PROBLEM.into(), record.problem.clone().into());
    body.insert(field::MEDICATION_IDS.into(), record.medication_ids.clone().into());
    body.insert(field::RISK.into(), record.risk.label().into());
    body.insert(field::OUTCOME.into(), record.outcome.label().into());
    body.insert(field::CREATED_AT.into(), timestamp(now));
    body.insert(field::UPDATED_AT.into(), timestamp(now));
    Value::Object(body)
}

pub fn encode_medication(medication: &Medication) -> Value {
    let mut body = Map::new();
    body.insert(field::NAME.into(), medication.name.clone().into());
    body.insert(field::CREATED_AT.into(), timestamp(medication.created_at));
    Value::Object(body)
}

/// Fields to merge into an existing intervention document.
pub fn intervention_update_fields(
    update: &InterventionUpdate,
    now: Timestamp,
) -> Map<String, Value> {
    let mut fields = Map::new();
    if let Some(problem) = &update.problem {
        fields.insert(field::PROBLEM.into(), problem.clone().into());
    }
    if let Some(ids) = &update.medication_ids {
        fields.insert(field::MEDICATION_IDS.into(), ids.clone().into());
    }
    if let Some(risk) = update.risk {
        fields.insert(field::RISK.into(), risk.label().into());
    }
    if let Some(outcome) = update.outcome {
        fields.insert(field::OUTCOME.into(), outcome.label().into());
    }
    fields.insert(field::UPDATED_AT.into(), timestamp(now));
    fields
}

/// Fields to merge into an existing user document.
pub fn profile_update_fields(update: &ProfileUpdate, now: Timestamp) -> Map<String, Value> {
    let mut fields = Map::new();
    if let Some(name) = &update.full_name {
        fields.insert(field::FULL_NAME.into(), name.clone().into());
    }
    if let Some(completed) = update.profile_completed {
        fields.insert(field::PROFILE_COMPLETED.into(), completed.into());
    }
    fields.insert(field::UPDATED_AT.into(), timestamp(now));
    fields
}

pub fn role_update_fields(role: Role, now: Timestamp) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert(field::ROLE.into(), role.label().into());
    fields.insert(field::UPDATED_AT.into(), timestamp(now));
    fields
}

fn timestamp(ts: Timestamp) -> Value {
    Value::String(ts.to_string())
}

/// Typed field access over one document body. JSON `null` counts as absent.
struct Reader<'a> {
    collection: Collection,
    id: &'a str,
    body: &'a Map<String, Value>,
}

impl<'a> Reader<'a> {
    fn new(collection: Collection, id: &'a str, body: &'a Value) -> Result<Self, CoreError> {
        match body.as_object() {
            Some(body) => Ok(Self {
                collection,
                id,
                body,
            }),
            None => Err(CoreError::Schema {
                collection,
                id: id.to_string(),
                violation: Violation::NotAnObject,
            }),
        }
    }

    fn reject(&self, violation: Violation) -> CoreError {
        CoreError::Schema {
            collection: self.collection,
            id: self.id.to_string(),
            violation,
        }
    }

    fn get(&self, name: &'static str) -> Option<&'a Value> {
        self.body.get(name).filter(|v| !v.is_null())
    }

    fn opt_str(&self, name: &'static str) -> Result<Option<&'a str>, CoreError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(self.reject(Violation::WrongType {
                field: name,
                expected: "a string",
            })),
        }
    }

    fn str(&self, name: &'static str) -> Result<&'a str, CoreError> {
        self.opt_str(name)?
            .ok_or_else(|| self.reject(Violation::MissingField(name)))
    }

    fn string(&self, name: &'static str) -> Result<String, CoreError> {
        self.str(name).map(str::to_string)
    }

    fn opt_bool(&self, name: &'static str) -> Result<Option<bool>, CoreError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(self.reject(Violation::WrongType {
                field: name,
                expected: "a boolean",
            })),
        }
    }

    fn opt_string_list(&self, name: &'static str) -> Result<Option<Vec<String>>, CoreError> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        let wrong_type = || {
            self.reject(Violation::WrongType {
                field: name,
                expected: "a list of strings",
            })
        };
        let items = value.as_array().ok_or_else(wrong_type)?;
        items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(wrong_type))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn opt_timestamp(&self, name: &'static str) -> Result<Option<Timestamp>, CoreError> {
        let Some(raw) = self.opt_str(name)? else {
            return Ok(None);
        };
        raw.parse::<Timestamp>().map(Some).map_err(|_| {
            self.reject(Violation::InvalidTimestamp {
                field: name,
                value: raw.to_string(),
            })
        })
    }

    fn timestamp(&self, name: &'static str) -> Result<Timestamp, CoreError> {
        self.opt_timestamp(name)?
            .ok_or_else(|| self.reject(Violation::MissingField(name)))
    }

    fn variant<T>(
        &self,
        name: &'static str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, CoreError> {
        let raw = self.str(name)?;
        parse(raw).ok_or_else(|| {
            self.reject(Violation::UnknownVariant {
                field: name,
                value: raw.to_string(),
            })
        })
    }
}
