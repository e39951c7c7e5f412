//! Patient clinical metadata request payloads.
//!
//! Pure data: every field is optional and carries no constraint, and no
//! cross-field consistency is enforced. Binding only checks the JSON shape.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::impl_merge_non_null;

/// Root aggregate describing a patient's clinical metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatientMetaRequest {
    pub allergies: Option<Vec<String>>,
    pub vaccines_injections: Option<VaccinesInjections>,
    pub meds_supplements: Option<MedsSupplements>,
    pub labs_imagings_procedures: Option<LabsImagingsProcedures>,
    pub vitals: Option<Vec<Vitals>>,
    pub medical_history: Option<MedicalHistory>,
}

// ============================================================================
// Vaccines & injections
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinesInjections {
    pub vaccines: Option<Vec<Vaccine>>,
    pub injections: Option<Vec<Injection>>,
}

/// A single vaccine administration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccine {
    pub ordered_by: Option<String>,
    pub administered_by: Option<String>,
    pub administered_time: Option<String>,
    pub administered_date: Option<String>,
    pub facility: Option<String>,
    pub route: Option<String>,
    pub site: Option<String>,
    pub dose: Option<String>,
    pub units: Option<String>,
    pub vaccine_number: Option<String>,
    pub total_vaccines: Option<String>,
    pub vfc_class: Option<String>,
    pub vis_provided: Option<String>,
    pub funding: Option<String>,
    pub success_flag: Option<bool>,
    pub vaccine_info: Option<String>,
    pub vaccine_name: Option<String>,
    pub ndc: Option<String>,
    pub cvx: Option<String>,
    pub vaccine_info_flag: Option<String>,
    pub source: Option<String>,
    pub refusal_reason: Option<String>,
    pub refusal_note: Option<String>,
}

/// A single injection administration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Injection {
    pub ordered_by: Option<String>,
    pub administered_by: Option<String>,
    pub time: Option<String>,
    pub administered_on: Option<String>,
    pub expiration_date: Option<String>,
    pub location: Option<String>,
    pub route: Option<String>,
    pub site: Option<String>,
    pub dose: Option<String>,
    pub dose_units: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub duration_units: Option<String>,
    pub notes: Option<String>,
    pub injection_info_flag: Option<String>,
    pub injection_name: Option<String>,
}

// ============================================================================
// Medications & supplements
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedsSupplements {
    pub meds: Option<Vec<Med>>,
    pub supplements: Option<Vec<Supplement>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Med {
    pub direction: Option<String>,
    pub quantity: Option<String>,
    pub when_string: Option<String>,
    pub dispense: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub earliest_fill_date: Option<String>,
    pub additional_refills: Option<String>,
    pub active_flag: Option<bool>,
    pub drug_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplement {
    pub direction: Option<String>,
    pub quantity: Option<String>,
    pub when_string: Option<String>,
    pub dispense: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub earliest_fill_date: Option<String>,
    pub additional_refills: Option<String>,
    pub active_flag: Option<bool>,
    pub drug_name: Option<String>,
}

// ============================================================================
// Labs, imaging & procedures
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabsImagingsProcedures {
    pub labs: Option<Vec<Lab>>,
    pub imagings: Option<Vec<Imaging>>,
    pub procedures: Option<Vec<Procedure>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lab {
    pub lab_name: Option<String>,
    pub sent_to: Option<String>,
    pub expiration_date: Option<String>,
    pub created_date: Option<String>,
    pub note_for_lab: Option<String>,
    pub note_for_admin: Option<String>,
    pub status: Option<String>,
    pub interpretation: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Imaging {
    pub imaging_name: Option<String>,
    pub sent_to: Option<String>,
    pub expected_date: Option<String>,
    pub expiration_date: Option<String>,
    pub criticality: Option<String>,
    pub priority: Option<String>,
    pub order_status: Option<String>,
    pub reason_for_order: Option<String>,
    pub instructions_for_lab: Option<String>,
    pub note_for_lab: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub procedure_name: Option<String>,
    pub procedure_date: Option<String>,
    pub expiration_date: Option<String>,
    pub dx_code: Option<String>,
    pub order_status: Option<String>,
    pub note: Option<String>,
    pub source_of_service: Option<String>,
}

// ============================================================================
// Vitals
// ============================================================================

/// One vitals assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    pub patient_id: Option<i64>,
    pub assessment_date: Option<String>,
    pub weight: Option<f32>,
    pub height: Option<f32>,
    pub bmi: Option<f32>,
    pub blood_pressure: Option<f32>,
    pub pulse_rate: Option<f32>,
    pub o2_saturation: Option<f32>,
    pub temperature: Option<f32>,
    pub respiration_rate: Option<f32>,
}

// ============================================================================
// Medical, surgical & social history
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistory {
    pub social_history: Option<SocialHistory>,
    pub medical_history: Option<Vec<MedicalProblem>>,
    pub surgical_history: Option<Vec<SurgicalProcedure>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialHistory {
    // Tobacco
    pub tobacco_sachets: Option<String>,
    pub consumes_per: Option<String>,

    // Smoking
    pub packs: Option<String>,
    pub smokes_per: Option<String>,

    // Alcohol
    pub alcohol_type: Option<String>,
    pub alcohol_quantity: Option<i32>,
    pub alcohol_per: Option<String>,

    // Exercise
    pub exercise_type: Option<String>,
    pub exercise_times: Option<i32>,
    pub exercise_per: Option<String>,

    // Recreational drug use
    pub drug_type: Option<String>,
    pub drug_quantity: Option<i32>,
    pub drug_per: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalProblem {
    pub icd_code: Option<String>,
    pub date: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgicalProcedure {
    pub icd_code: Option<String>,
    pub date: Option<String>,
    pub active: Option<bool>,
}

impl_merge_non_null!(PatientMetaRequest {
    allergies,
    vaccines_injections,
    meds_supplements,
    labs_imagings_procedures,
    vitals,
    medical_history,
});
impl_merge_non_null!(VaccinesInjections { vaccines, injections });
impl_merge_non_null!(Vaccine {
    ordered_by,
    administered_by,
    administered_time,
    administered_date,
    facility,
    route,
    site,
    dose,
    units,
    vaccine_number,
    total_vaccines,
    vfc_class,
    vis_provided,
    funding,
    success_flag,
    vaccine_info,
    vaccine_name,
    ndc,
    cvx,
    vaccine_info_flag,
    source,
    refusal_reason,
    refusal_note,
});
impl_merge_non_null!(Injection {
    ordered_by,
    administered_by,
    time,
    administered_on,
    expiration_date,
    location,
    route,
    site,
    dose,
    dose_units,
    frequency,
    duration,
    duration_units,
    notes,
    injection_info_flag,
    injection_name,
});
impl_merge_non_null!(MedsSupplements { meds, supplements });
impl_merge_non_null!(Med {
    direction,
    quantity,
    when_string,
    dispense,
    frequency,
    duration,
    earliest_fill_date,
    additional_refills,
    active_flag,
    drug_name,
});
impl_merge_non_null!(Supplement {
    direction,
    quantity,
    when_string,
    dispense,
    frequency,
    duration,
    earliest_fill_date,
    additional_refills,
    active_flag,
    drug_name,
});
impl_merge_non_null!(LabsImagingsProcedures {
    labs,
    imagings,
    procedures,
});
impl_merge_non_null!(Lab {
    lab_name,
    sent_to,
    expiration_date,
    created_date,
    note_for_lab,
    note_for_admin,
    status,
    interpretation,
    comment,
});
impl_merge_non_null!(Imaging {
    imaging_name,
    sent_to,
    expected_date,
    expiration_date,
    criticality,
    priority,
    order_status,
    reason_for_order,
    instructions_for_lab,
    note_for_lab,
});
impl_merge_non_null!(Procedure {
    procedure_name,
    procedure_date,
    expiration_date,
    dx_code,
    order_status,
    note,
    source_of_service,
});
impl_merge_non_null!(Vitals {
    patient_id,
    assessment_date,
    weight,
    height,
    bmi,
    blood_pressure,
    pulse_rate,
    o2_saturation,
    temperature,
    respiration_rate,
});
impl_merge_non_null!(MedicalHistory {
    social_history,
    medical_history,
    surgical_history,
});
impl_merge_non_null!(SocialHistory {
    tobacco_sachets,
    consumes_per,
    packs,
    smokes_per,
    alcohol_type,
    alcohol_quantity,
    alcohol_per,
    exercise_type,
    exercise_times,
    exercise_per,
    drug_type,
    drug_quantity,
    drug_per,
});
impl_merge_non_null!(MedicalProblem { icd_code, date, active });
impl_merge_non_null!(SurgicalProcedure { icd_code, date, active });
