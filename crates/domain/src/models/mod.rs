//! Domain models for patient commons.

pub mod patient_meta;

pub use patient_meta::{
    Imaging, Injection, Lab, LabsImagingsProcedures, Med, MedicalHistory, MedicalProblem,
    MedsSupplements, PatientMetaRequest, Procedure, SocialHistory, Supplement, SurgicalProcedure,
    Vaccine, VaccinesInjections, Vitals,
};
