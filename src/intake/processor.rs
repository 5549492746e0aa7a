//! Whole-submission processing: one webhook call, one unit of work.

use rusqlite::Connection;
use serde::Serialize;

use super::error::IntakeError;
use super::mapping::{self, LinkedRecords};
use super::payload::FormSubmission;
use super::fields;
use crate::db::{find_intake_by_submission, DatabaseError, UnitOfWork};

/// Outcome of one webhook call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessedSubmission {
    pub patient_id: i64,
    pub intake_id: i64,
    /// The submission id was already recorded; nothing was written.
    pub replayed: bool,
}

/// Map a submission onto the schema and persist it atomically.
///
/// Addresses, phones, images, the patient and the intake are written in
/// that order inside one unit of work. Any error rolls back every row of
/// the submission. A submission id seen before returns the stored ids.
pub fn process_submission(
    conn: &mut Connection,
    submission: &FormSubmission,
) -> Result<ProcessedSubmission, IntakeError> {
    let req = submission.raw()?;
    let submission_id = submission.submission_key().unwrap_or("-");
    let span = tracing::info_span!("intake", submission_id);
    let _entered = span.enter();

    let mut uow = UnitOfWork::begin(conn)?;

    if let Some(key) = submission.submission_key() {
        if let Some(existing) = find_intake_by_submission(uow.conn(), key)? {
            let patient_id = existing.patient_id.ok_or_else(|| {
                IntakeError::Storage(DatabaseError::ConstraintViolation(format!(
                    "intake {} has no patient",
                    existing.id
                )))
            })?;
            tracing::info!(patient_id, intake_id = existing.id, "Submission already processed");
            return Ok(ProcessedSubmission {
                patient_id,
                intake_id: existing.id,
                replayed: true,
            });
        }
    }

    let permanent = mapping::map_address(&mut uow, &req, fields::PERMANENT_ADDRESS)?;
    let temporary = mapping::map_address(&mut uow, &req, fields::TEMPORARY_ADDRESS)?;
    let phone_1 = mapping::map_phone(&mut uow, &req, fields::PHONE_1, fields::PHONE_1_TYPE)?;
    let phone_2 = mapping::map_phone(&mut uow, &req, fields::PHONE_2, fields::PHONE_2_TYPE)?;
    let front = mapping::map_image(&mut uow, &req, fields::INSURANCE_CARD_FRONT)?;
    let back = mapping::map_image(&mut uow, &req, fields::INSURANCE_CARD_BACK)?;

    let linked = LinkedRecords {
        permanent_address_id: permanent.id,
        temporary_address_id: temporary.id,
        phone_1_id: phone_1.id,
        phone_2_id: phone_2.id,
        insurance_card_front_id: front.id,
        insurance_card_back_id: back.id,
    };
    let patient = mapping::map_patient(&mut uow, &req, &linked)?;
    let intake = mapping::map_intake(&mut uow, submission, &req, patient.id)?;

    uow.commit()?;

    tracing::info!(patient_id = patient.id, intake_id = intake.id, "Submission stored");
    Ok(ProcessedSubmission {
        patient_id: patient.id,
        intake_id: intake.id,
        replayed: false,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::db::*;
    use crate::intake::fixtures::*;
    use crate::models::enums::{LookupTable, Table};
    use crate::models::*;

    fn rows(conn: &Connection, table: Table) -> i64 {
        count_rows(conn, table).unwrap()
    }

    #[test]
    fn complete_submission_creates_every_row() {
        let mut conn = open_memory_database().unwrap();
        let result = process_submission(&mut conn, &complete_submission()).unwrap();
        assert!(!result.replayed);

        assert_eq!(rows(&conn, Table::Address), 2);
        assert_eq!(rows(&conn, Table::Phone), 2);
        assert_eq!(rows(&conn, Table::Image), 2);
        assert_eq!(rows(&conn, Table::Patient), 1);
        assert_eq!(rows(&conn, Table::Intake), 1);

        let patient = get_patient(&conn, result.patient_id).unwrap().unwrap();
        assert_eq!(patient.permanent_address_id, Some(1));
        assert_eq!(patient.temporary_address_id, Some(2));
        assert_eq!(patient.phone_1_id, Some(1));
        assert_eq!(patient.phone_2_id, Some(2));
        assert_eq!(patient.insurance_card_front_id, Some(1));
        assert_eq!(patient.insurance_card_back_id, Some(2));

        let permanent = get_address(&conn, 1).unwrap().unwrap();
        assert_eq!(permanent.city, "Tegucigalpa");
        assert_eq!(permanent.street_2, None);
        let temporary = get_address(&conn, 2).unwrap().unwrap();
        assert_eq!(
            temporary.country_id,
            find_lookup_id(&conn, LookupTable::Country, "United States").unwrap()
        );
        assert_ne!(permanent.country_id, temporary.country_id);
    }

    #[test]
    fn patient_fields_are_mapped() {
        let mut conn = open_memory_database().unwrap();
        let result = process_submission(&mut conn, &complete_submission()).unwrap();
        let patient = get_patient(&conn, result.patient_id).unwrap().unwrap();

        assert_eq!(patient.prefix.as_deref(), Some("Ms."));
        assert_eq!(patient.first_name, "Ana");
        assert_eq!(patient.last_name, "Lopez");
        assert_eq!(patient.date_of_birth, NaiveDate::from_ymd_opt(2012, 3, 9).unwrap());
        assert_eq!(patient.age, 12);
        assert!(!patient.is_us_citizen);
        assert_eq!(patient.need_visa, Some(true));
        assert!(patient.need_interpretor);
        assert_eq!(patient.dates_available, NaiveDate::from_ymd_opt(2024, 7, 1));
        assert_eq!(patient.referral_first_name.as_deref(), Some("Paul"));
        assert_eq!(
            patient.preferred_contact_id,
            find_lookup_id(&conn, LookupTable::PreferredContact, "Email").unwrap()
        );
        assert_eq!(
            patient.language_id,
            Some(find_lookup_id(&conn, LookupTable::Language, "Spanish").unwrap())
        );
        assert_eq!(
            patient.coverage_type_id,
            Some(find_lookup_id(&conn, LookupTable::CoverageType, "Medicaid").unwrap())
        );
    }

    #[test]
    fn phones_images_and_intake_are_mapped() {
        let mut conn = open_memory_database().unwrap();
        let result = process_submission(&mut conn, &complete_submission()).unwrap();

        let phone = get_phone(&conn, 2).unwrap().unwrap();
        assert_eq!(phone.phone_number, "(504) 2222-0000");
        assert_eq!(
            phone.phone_type_id,
            Some(find_lookup_id(&conn, LookupTable::PhoneType, "Home").unwrap())
        );

        let front = get_image(&conn, 1).unwrap().unwrap();
        assert_eq!(front.image_name.as_deref(), Some("card-front.jpg"));
        assert_eq!(front.widget_type.as_deref(), Some(IMAGE_LINKS_WIDGET));

        let intake = get_intake(&conn, result.intake_id).unwrap().unwrap();
        assert_eq!(intake.patient_id, Some(result.patient_id));
        assert_eq!(intake.intake_date, NaiveDate::from_ymd_opt(2024, 5, 2));
        assert_eq!(intake.liason_last_name.as_deref(), Some("Park"));
        assert_eq!(intake.submission_id.as_deref(), Some("5790000000001"));
        assert_eq!(intake.form_title.as_deref(), Some("New Patient Intake"));
    }

    #[test]
    fn empty_front_card_still_creates_image() {
        let mut answers = complete_answers();
        answers["q83_typeA83"] = json!("");
        let mut conn = open_memory_database().unwrap();
        let result = process_submission(&mut conn, &submission_with(&answers, "s-2")).unwrap();

        assert_eq!(rows(&conn, Table::Image), 2);
        let patient = get_patient(&conn, result.patient_id).unwrap().unwrap();
        let front_id = patient.insurance_card_front_id.unwrap();
        assert_eq!(get_image(&conn, front_id).unwrap().unwrap(), Image::empty(front_id));
    }

    #[test]
    fn absent_back_card_still_creates_image() {
        let mut answers = complete_answers();
        answers.as_object_mut().unwrap().remove("q84_typeA84");
        let mut conn = open_memory_database().unwrap();
        process_submission(&mut conn, &submission_with(&answers, "s-3")).unwrap();
        assert_eq!(get_image(&conn, 2).unwrap().unwrap(), Image::empty(2));
    }

    #[test]
    fn unknown_country_rolls_back_everything() {
        let mut answers = complete_answers();
        answers["q26_temporaryStreet"]["country"] = json!("Atlantis");
        let mut conn = open_memory_database().unwrap();

        let err = process_submission(&mut conn, &submission_with(&answers, "s-4")).unwrap_err();
        assert!(matches!(
            err,
            IntakeError::UnknownReference { table: LookupTable::Country, ref value } if value == "Atlantis"
        ));
        for table in [Table::Address, Table::Phone, Table::Image, Table::Patient, Table::Intake] {
            assert_eq!(rows(&conn, table), 0, "{table} should be empty");
        }
    }

    #[test]
    fn unknown_language_is_reference_error() {
        let mut answers = complete_answers();
        answers["q70_If"] = json!("spanish");
        let mut conn = open_memory_database().unwrap();
        let err = process_submission(&mut conn, &submission_with(&answers, "s-5")).unwrap_err();
        assert!(matches!(err, IntakeError::UnknownReference { table: LookupTable::Language, .. }));
    }

    #[test]
    fn blank_optional_lookups_are_null() {
        let mut answers = complete_answers();
        answers["q70_If"] = json!("");
        answers["q50_typeA"] = json!("");
        answers["q34_phoneNumber34"] = json!("");
        let mut conn = open_memory_database().unwrap();
        let result = process_submission(&mut conn, &submission_with(&answers, "s-6")).unwrap();

        let patient = get_patient(&conn, result.patient_id).unwrap().unwrap();
        assert_eq!(patient.language_id, None);
        assert_eq!(patient.coverage_type_id, None);
        assert_eq!(get_phone(&conn, 2).unwrap().unwrap().phone_type_id, None);
    }

    #[test]
    fn invalid_birth_date_aborts_request() {
        let mut answers = complete_answers();
        answers["q90_dateOf90"]["month"] = json!("13");
        let mut conn = open_memory_database().unwrap();
        let err = process_submission(&mut conn, &submission_with(&answers, "s-7")).unwrap_err();
        assert!(err.is_bad_payload());
        assert_eq!(rows(&conn, Table::Address), 0);
    }

    #[test]
    fn missing_patient_name_aborts_request() {
        let mut answers = complete_answers();
        answers.as_object_mut().unwrap().remove("q18_patientName");
        let mut conn = open_memory_database().unwrap();
        let err = process_submission(&mut conn, &submission_with(&answers, "s-8")).unwrap_err();
        assert!(matches!(err, IntakeError::MissingField(ref f) if f == "q18_patientName"));
        assert_eq!(rows(&conn, Table::Image), 0);
    }

    #[test]
    fn replayed_submission_writes_nothing() {
        let mut conn = open_memory_database().unwrap();
        let first = process_submission(&mut conn, &complete_submission()).unwrap();
        let second = process_submission(&mut conn, &complete_submission()).unwrap();

        assert!(second.replayed);
        assert_eq!(second.patient_id, first.patient_id);
        assert_eq!(second.intake_id, first.intake_id);
        assert_eq!(rows(&conn, Table::Patient), 1);
        assert_eq!(rows(&conn, Table::Address), 2);
    }

    #[test]
    fn separate_submissions_get_fresh_ids() {
        let mut conn = open_memory_database().unwrap();
        let answers = complete_answers();
        let first = process_submission(&mut conn, &submission_with(&answers, "a")).unwrap();
        let second = process_submission(&mut conn, &submission_with(&answers, "b")).unwrap();

        assert_eq!(first.patient_id + 1, second.patient_id);
        let patient = get_patient(&conn, second.patient_id).unwrap().unwrap();
        assert_eq!(patient.permanent_address_id, Some(3));
        assert_eq!(patient.insurance_card_back_id, Some(4));
    }

    #[test]
    fn concurrent_writers_get_distinct_ids() {
        const WRITERS: usize = 4;
        const PER_WRITER: usize = 15;

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("intake.db");
        open_database(&path).unwrap();

        let handles: Vec<_> = (0..WRITERS)
            .map(|writer| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let mut conn = open_connection(&path).unwrap();
                    let answers = complete_answers();
                    (0..PER_WRITER)
                        .map(|n| {
                            let sid = format!("w{writer}-{n}");
                            process_submission(&mut conn, &submission_with(&answers, &sid))
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut patient_ids = std::collections::HashSet::new();
        for handle in handles {
            for result in handle.join().unwrap() {
                let processed = result.unwrap();
                assert!(!processed.replayed);
                assert!(patient_ids.insert(processed.patient_id));
            }
        }

        let total = (WRITERS * PER_WRITER) as i64;
        let conn = open_connection(&path).unwrap();
        assert_eq!(patient_ids.len() as i64, total);
        assert_eq!(rows(&conn, Table::Patient), total);
        assert_eq!(rows(&conn, Table::Address), total * 2);
        assert_eq!(max_id(&conn, Table::Address).unwrap(), total * 2);

        let mut address_ids = std::collections::HashSet::new();
        for id in patient_ids {
            let patient = get_patient(&conn, id).unwrap().unwrap();
            assert!(address_ids.insert(patient.permanent_address_id.unwrap()));
            assert!(address_ids.insert(patient.temporary_address_id.unwrap()));
        }
        assert_eq!(address_ids.len() as i64, total * 2);
    }

    #[test]
    fn missing_raw_request_is_bad_payload() {
        let mut conn = open_memory_database().unwrap();
        let submission = FormSubmission {
            raw_request: None,
            ..complete_submission()
        };
        let err = process_submission(&mut conn, &submission).unwrap_err();
        assert!(err.is_bad_payload());
    }
}
