use jiff::Timestamp;
use rxlog_core::error::{CoreError, Violation};
use rxlog_core::keys::{self, Collection};
use rxlog_core::models::{NewIntervention, Outcome, ProfileUpdate, RiskLevel, Role};
use rxlog_core::schema::{
    decode_intervention, decode_medication, decode_user, encode_new_intervention,
    profile_update_fields,
};
use serde_json::json;

fn violation(result: Result<impl std::fmt::Debug, CoreError>) -> Violation {
    match result {
        Err(CoreError::Schema { violation, .. }) => violation,
        other => panic!("expected schema violation, got {other:?}"),
    }
}

#[test]
fn full_intervention_document_decodes() {
    let body = json!({
        "userId": "u1",
        "problem": "QT prolongation risk",
        "medicationIds": ["m1", "m2"],
        "risk": "Extreme",
        "outcome": "Not Accepted",
        "createdAt": "2025-03-01T09:30:00Z",
        "updatedAt": "2025-03-02T10:00:00Z",
    });
    let intervention = decode_intervention("abc", &body).unwrap();
    assert_eq!(intervention.id, "abc");
    assert_eq!(intervention.risk, RiskLevel::Extreme);
    assert_eq!(intervention.outcome, Outcome::NotAccepted);
    assert_eq!(intervention.medication_ids, vec!["m1", "m2"]);
    assert!(intervention.updated_at > intervention.created_at);
}

#[test]
fn optional_fields_take_documented_defaults() {
    let body = json!({
        "userId": "u1",
        "problem": "allergy",
        "medicationIds": null,
        "risk": "Low",
        "outcome": "Pending",
        "createdAt": "2025-03-01T09:30:00Z",
    });
    let intervention = decode_intervention("abc", &body).unwrap();
    assert!(intervention.medication_ids.is_empty());
    assert_eq!(intervention.updated_at, intervention.created_at);

    let user = decode_user(
        "u1",
        &json!({
            "email": "p@example.org",
            "fullName": "P",
            "role": "Pharmacist",
            "createdAt": "2025-01-01T00:00:00Z",
        }),
    )
    .unwrap();
    assert!(user.profile_completed);
    assert_eq!(user.role, Role::Pharmacist);
}

#[test]
fn legacy_enumeration_labels_are_rejected() {
    let body = json!({
        "userId": "u1",
        "problem": "x",
        "risk": "Medium",
        "outcome": "Pending",
        "createdAt": "2025-03-01T09:30:00Z",
    });
    assert_eq!(
        violation(decode_intervention("abc", &body)),
        Violation::UnknownVariant {
            field: "risk",
            value: "Medium".to_string()
        }
    );

    let body = json!({
        "userId": "u1",
        "problem": "x",
        "risk": "Low",
        "outcome": "Rejected",
        "createdAt": "2025-03-01T09:30:00Z",
    });
    assert!(matches!(
        violation(decode_intervention("abc", &body)),
        Violation::UnknownVariant { field: "outcome", .. }
    ));
}

#[test]
fn missing_and_mistyped_fields_are_rejected() {
    let missing_owner = json!({
        "problem": "x",
        "risk": "Low",
        "outcome": "Pending",
        "createdAt": "2025-03-01T09:30:00Z",
    });
    assert_eq!(
        violation(decode_intervention("abc", &missing_owner)),
        Violation::MissingField("userId")
    );

    let numeric_ids = json!({
        "userId": "u1",
        "problem": "x",
        "medicationIds": [1, 2],
        "risk": "Low",
        "outcome": "Pending",
        "createdAt": "2025-03-01T09:30:00Z",
    });
    assert!(matches!(
        violation(decode_intervention("abc", &numeric_ids)),
        Violation::WrongType { field: "medicationIds", .. }
    ));

    let bad_time = json!({ "name": "Warfarin", "createdAt": "yesterday" });
    assert!(matches!(
        violation(decode_medication("m1", &bad_time)),
        Violation::InvalidTimestamp { field: "createdAt", .. }
    ));

    assert_eq!(
        violation(decode_medication("m1", &json!(["not", "an", "object"]))),
        Violation::NotAnObject
    );
}

#[test]
fn schema_error_names_the_document() {
    let err = decode_medication("m9", &json!({ "createdAt": "2025-01-01T00:00:00Z" })).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid document medications/m9: missing required field `name`"
    );
}

#[test]
fn encoded_new_intervention_decodes_back() {
    let now: Timestamp = "2025-04-01T12:00:00Z".parse().unwrap();
    let record = NewIntervention {
        user_id: "u1".to_string(),
        problem: "dose too high".to_string(),
        medication_ids: vec!["m1".to_string()],
        risk: RiskLevel::High,
        outcome: Outcome::Accepted,
    };
    let body = encode_new_intervention(&record, now);
    assert_eq!(body["outcome"], "Accepted");

    let decoded = decode_intervention("new", &body).unwrap();
    assert_eq!(decoded.problem, record.problem);
    assert_eq!(decoded.created_at, now);
}

#[test]
fn profile_update_only_touches_given_fields() {
    let now: Timestamp = "2025-04-01T12:00:00Z".parse().unwrap();
    let fields = profile_update_fields(
        &ProfileUpdate {
            full_name: Some("Dana".to_string()),
            profile_completed: None,
        },
        now,
    );
    assert_eq!(fields.len(), 2);
    assert_eq!(fields["fullName"], "Dana");
    assert_eq!(fields["updatedAt"], "2025-04-01T12:00:00Z");
}

#[test]
fn document_keys_round_trip_ids() {
    let key = keys::document(Collection::Interventions, "abc");
    assert_eq!(key, "interventions/abc.json");
    assert_eq!(keys::document_id(Collection::Interventions, &key), Some("abc"));
    assert_eq!(keys::document_id(Collection::Users, &key), None);
    assert_eq!(keys::document_id(Collection::Users, "users/nested/x.json"), None);
    assert_eq!(keys::new_id().len(), 32);
}
