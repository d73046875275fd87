pub mod intervention;
pub mod medication;
pub mod user;

pub use intervention::{
    Category, Intervention, InterventionUpdate, NewIntervention, Outcome, RiskLevel,
};
pub use medication::Medication;
pub use user::{ProfileUpdate, Role, User};
