//! Clinical vocabulary for opt-in allowed-values checks.
//!
//! Value sets follow HL7/FHIR codes. The patient metadata payloads are free
//! text and never bind these rules; callers that want coded input opt in
//! through [`CLINICAL_RULES`] or the `validate_*` helpers, e.g. as
//! `#[validate(custom(function = "validate_vaccine_route"))]` on their own
//! request types. The registry is built once and shared read-only.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use shared::allowed_values::{AllowedValuesError, AllowedValuesProvider, AllowedValuesRegistry};
use validator::ValidationError;

/// Vocabulary keys.
pub mod keys {
    pub const ROUTE: &str = "route";
    pub const DURATION_UNIT: &str = "duration_unit";
    pub const PERIOD: &str = "period";
    pub const LAB_STATUS: &str = "lab_status";
    pub const IMAGING_PRIORITY: &str = "imaging_priority";
    pub const IMAGING_CRITICALITY: &str = "imaging_criticality";
    pub const ORDER_STATUS: &str = "order_status";
}

const ROUTES: &[&str] = &["IM", "SC", "ID", "IN", "PO", "IV"];
const DURATION_UNITS: &[&str] = &["days", "weeks", "months", "years"];
const PERIODS: &[&str] = &["day", "week", "month", "year"];
const LAB_STATUSES: &[&str] = &[
    "registered",
    "preliminary",
    "final",
    "amended",
    "corrected",
    "cancelled",
];
const IMAGING_PRIORITIES: &[&str] = &["routine", "urgent", "asap", "stat"];
const IMAGING_CRITICALITIES: &[&str] = &["low", "high", "unable-to-assess"];
const ORDER_STATUSES: &[&str] = &[
    "draft",
    "active",
    "on-hold",
    "revoked",
    "completed",
    "entered-in-error",
    "unknown",
];

/// Field identifier to vocabulary key.
pub const FIELD_BINDINGS: &[(&str, &str)] = &[
    ("vaccine.route", keys::ROUTE),
    ("injection.route", keys::ROUTE),
    ("injection.durationUnits", keys::DURATION_UNIT),
    ("lab.status", keys::LAB_STATUS),
    ("imaging.priority", keys::IMAGING_PRIORITY),
    ("imaging.criticality", keys::IMAGING_CRITICALITY),
    ("imaging.orderStatus", keys::ORDER_STATUS),
    ("procedure.orderStatus", keys::ORDER_STATUS),
    ("socialHistory.consumesPer", keys::PERIOD),
    ("socialHistory.smokesPer", keys::PERIOD),
    ("socialHistory.alcoholPer", keys::PERIOD),
    ("socialHistory.exercisePer", keys::PERIOD),
    ("socialHistory.drugPer", keys::PERIOD),
];

/// Static provider for the clinical value sets.
#[derive(Debug, Clone)]
pub struct ClinicalVocabulary {
    sets: BTreeMap<&'static str, &'static [&'static str]>,
}

impl Default for ClinicalVocabulary {
    fn default() -> Self {
        let sets = BTreeMap::from([
            (keys::ROUTE, ROUTES),
            (keys::DURATION_UNIT, DURATION_UNITS),
            (keys::PERIOD, PERIODS),
            (keys::LAB_STATUS, LAB_STATUSES),
            (keys::IMAGING_PRIORITY, IMAGING_PRIORITIES),
            (keys::IMAGING_CRITICALITY, IMAGING_CRITICALITIES),
            (keys::ORDER_STATUS, ORDER_STATUSES),
        ]);
        Self { sets }
    }
}

impl AllowedValuesProvider for ClinicalVocabulary {
    fn allowed_values(&self, key: &str) -> Option<Vec<String>> {
        self.sets.allowed_values(key)
    }
}

/// Builds the registry for every bound field.
pub fn clinical_registry() -> Result<AllowedValuesRegistry, AllowedValuesError> {
    let vocabulary = ClinicalVocabulary::default();
    let mut registry = AllowedValuesRegistry::new();
    for (field, key) in FIELD_BINDINGS {
        registry.register(field, &vocabulary, key)?;
    }
    Ok(registry)
}

lazy_static! {
    /// Process-wide, read-only rules keyed by `FIELD_BINDINGS` field ids.
    pub static ref CLINICAL_RULES: AllowedValuesRegistry =
        clinical_registry().expect("clinical vocabulary covers every bound field");
}

macro_rules! field_validators {
    ($($name:ident => $field:literal),* $(,)?) => {
        $(
            pub fn $name(value: &str) -> Result<(), ValidationError> {
                CLINICAL_RULES.validate($field, Some(value))
            }
        )*
    };
}

field_validators! {
    validate_vaccine_route => "vaccine.route",
    validate_injection_route => "injection.route",
    validate_injection_duration_units => "injection.durationUnits",
    validate_lab_status => "lab.status",
    validate_imaging_priority => "imaging.priority",
    validate_imaging_criticality => "imaging.criticality",
    validate_imaging_order_status => "imaging.orderStatus",
    validate_procedure_order_status => "procedure.orderStatus",
    validate_consumes_per => "socialHistory.consumesPer",
    validate_smokes_per => "socialHistory.smokesPer",
    validate_alcohol_per => "socialHistory.alcoholPer",
    validate_exercise_per => "socialHistory.exercisePer",
    validate_drug_per => "socialHistory.drugPer",
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_registry_covers_all_bindings() {
        let registry = clinical_registry().unwrap();
        assert_eq!(registry.len(), FIELD_BINDINGS.len());
        for (field, _) in FIELD_BINDINGS {
            assert!(registry.get(field).is_some(), "missing rule for {field}");
        }
    }

    #[test]
    fn test_unknown_key() {
        assert!(ClinicalVocabulary::default()
            .allowed_values("blood_type")
            .is_none());
    }

    #[test]
    fn test_route_validator() {
        assert!(validate_vaccine_route("IM").is_ok());
        assert!(validate_injection_route("SC").is_ok());
        assert!(validate_vaccine_route("im").is_err());
    }

    #[test]
    fn test_route_message() {
        let err = validate_vaccine_route("oral").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "'oral' is not valid. Allowed values are: [IM,SC,ID,IN,PO,IV]"
        );
    }

    #[test]
    fn test_period_validators_share_value_set() {
        for validator in [
            validate_consumes_per,
            validate_smokes_per,
            validate_alcohol_per,
            validate_exercise_per,
            validate_drug_per,
        ] {
            assert!(validator("week").is_ok());
            assert!(validator("fortnight").is_err());
        }
    }

    #[test]
    fn test_order_status_validators() {
        assert!(validate_imaging_order_status("on-hold").is_ok());
        assert!(validate_procedure_order_status("completed").is_ok());
        assert!(validate_procedure_order_status("done").is_err());
    }

    #[test]
    fn test_imaging_and_lab_validators() {
        assert!(validate_imaging_priority("stat").is_ok());
        assert!(validate_imaging_criticality("unable-to-assess").is_ok());
        assert!(validate_lab_status("final").is_ok());
        assert!(validate_lab_status("Final").is_err());
        assert!(validate_injection_duration_units("weeks").is_ok());
        assert!(validate_injection_duration_units("week").is_err());
    }

    #[derive(Debug, Validate)]
    struct CodedVaccine {
        #[validate(custom(function = "validate_vaccine_route"))]
        route: Option<String>,
    }

    #[test]
    fn test_opt_in_binding_on_request_type() {
        let coded = CodedVaccine { route: Some("PO".into()) };
        assert!(coded.validate().is_ok());

        let coded = CodedVaccine { route: None };
        assert!(coded.validate().is_ok());

        let coded = CodedVaccine { route: Some("Intramuscular".into()) };
        let errors = coded.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("route"));
    }
}
