//! Development-mode seed data.
//!
//! Populates fixed reference and sample data once, before the service starts
//! accepting traffic. Each table is checked independently: a table that
//! already has rows is skipped, so re-running the routine is a no-op.
//!
//! Seed payloads go through the same DTO validation path as real requests.

use sqlx::SqlitePool;

use crate::dto::{CreateClinicalRecordDto, CreatePatientDto, CreateTumorTypeDto};
use crate::error::ClinicaResult;
use crate::repositories::{ClinicalRecordRepository, PatientRepository, TumorTypeRepository};

struct TumorTypeSeed {
    name: &'static str,
    system_affected: &'static str,
    description: &'static str,
}

const TUMOR_TYPES: [TumorTypeSeed; 5] = [
    TumorTypeSeed {
        name: "Cáncer de Mama",
        system_affected: "Glándulas",
        description: "Tumor maligno que se desarrolla en el tejido mamario",
    },
    TumorTypeSeed {
        name: "Cáncer de Pulmón",
        system_affected: "Respiratorio",
        description: "Tumor maligno que se origina en los pulmones",
    },
    TumorTypeSeed {
        name: "Cáncer de Colon",
        system_affected: "Digestivo",
        description: "Tumor maligno que se desarrolla en el intestino grueso",
    },
    TumorTypeSeed {
        name: "Cáncer de Próstata",
        system_affected: "Genitourinario",
        description: "Tumor maligno que se desarrolla en la glándula prostática",
    },
    TumorTypeSeed {
        name: "Leucemia",
        system_affected: "Hematológico",
        description: "Cáncer de los tejidos que forman la sangre",
    },
];

struct PatientSeed {
    first_name: &'static str,
    last_name: &'static str,
    birth_date: &'static str,
    gender: &'static str,
}

const PATIENTS: [PatientSeed; 3] = [
    PatientSeed {
        first_name: "Juan",
        last_name: "Pérez",
        birth_date: "1980-05-15",
        gender: "Masculino",
    },
    PatientSeed {
        first_name: "María",
        last_name: "González",
        birth_date: "1975-08-22",
        gender: "Femenino",
    },
    PatientSeed {
        first_name: "Carlos",
        last_name: "Rodríguez",
        birth_date: "1962-03-10",
        gender: "Masculino",
    },
];

struct ClinicalRecordSeed {
    diagnosis_date: &'static str,
    stage: &'static str,
    treatment_protocol: &'static str,
    notes: &'static str,
}

const CLINICAL_RECORDS: [ClinicalRecordSeed; 3] = [
    ClinicalRecordSeed {
        diagnosis_date: "2024-01-15",
        stage: "IIA",
        treatment_protocol: "Quimioterapia con doxorubicina y ciclofosfamida",
        notes: "Paciente responde bien al tratamiento inicial",
    },
    ClinicalRecordSeed {
        diagnosis_date: "2023-11-20",
        stage: "IIIB",
        treatment_protocol: "Radioterapia combinada con quimioterapia",
        notes: "Seguimiento cada 3 meses",
    },
    ClinicalRecordSeed {
        diagnosis_date: "2024-02-10",
        stage: "I",
        treatment_protocol: "Resección quirúrgica",
        notes: "Cirugía exitosa, pronóstico favorable",
    },
];

/// Seeds every empty table, in dependency order. Idempotent.
///
/// # Errors
///
/// Propagates validation or storage failures; a partial run leaves already
/// seeded tables in place, and the next run fills in the rest.
pub async fn seed_database(pool: &SqlitePool) -> ClinicaResult<()> {
    let tumor_types = TumorTypeRepository::new(pool.clone());
    let patients = PatientRepository::new(pool.clone());
    let records = ClinicalRecordRepository::new(pool.clone());

    if tumor_types.count().await? == 0 {
        tracing::info!("seeding tumor types");
        for seed in &TUMOR_TYPES {
            let new = CreateTumorTypeDto {
                name: seed.name.into(),
                system_affected: seed.system_affected.into(),
                description: Some(seed.description.into()),
            }
            .validate()?;
            tumor_types.insert(new).await?;
        }
        tracing::info!(count = TUMOR_TYPES.len(), "tumor types seeded");
    }

    if patients.count().await? == 0 {
        tracing::info!("seeding patients");
        for seed in &PATIENTS {
            let new = CreatePatientDto {
                first_name: seed.first_name.into(),
                last_name: seed.last_name.into(),
                birth_date: seed.birth_date.into(),
                gender: seed.gender.into(),
                status: None,
            }
            .validate()?;
            patients.insert(new).await?;
        }
        tracing::info!(count = PATIENTS.len(), "patients seeded");
    }

    if records.count().await? == 0 {
        let patient_list = patients.find_all().await?;
        let tumor_type_list = tumor_types.find_all().await?;

        if patient_list.len() >= CLINICAL_RECORDS.len()
            && tumor_type_list.len() >= CLINICAL_RECORDS.len()
        {
            tracing::info!("seeding clinical records");
            for (index, seed) in CLINICAL_RECORDS.iter().enumerate() {
                let new = CreateClinicalRecordDto {
                    patient_id: patient_list[index].id.to_string(),
                    tumor_type_id: tumor_type_list[index].id,
                    diagnosis_date: seed.diagnosis_date.into(),
                    stage: seed.stage.into(),
                    treatment_protocol: seed.treatment_protocol.into(),
                    notes: Some(seed.notes.into()),
                }
                .validate()?;
                records.insert(new).await?;
            }
            tracing::info!(count = CLINICAL_RECORDS.len(), "clinical records seeded");
        }
    }

    tracing::info!("database seeding completed");
    Ok(())
}
