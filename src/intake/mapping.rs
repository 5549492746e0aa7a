//! Per-entity mapping from form answers to rows.
//!
//! Each `map_*` function validates and resolves everything it needs
//! before allocating an id and adding the row to the unit of work.

use super::error::IntakeError;
use super::fields;
use super::parse::{self, NameParts};
use super::payload::{FormSubmission, RawRequest};
use crate::db::UnitOfWork;
use crate::models::enums::{LookupTable, Table};
use crate::models::*;

/// Ids of the rows a patient links to, produced earlier in the same request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkedRecords {
    pub permanent_address_id: i64,
    pub temporary_address_id: i64,
    pub phone_1_id: i64,
    pub phone_2_id: i64,
    pub insurance_card_front_id: i64,
    pub insurance_card_back_id: i64,
}

pub fn map_address(
    uow: &mut UnitOfWork<'_>,
    req: &RawRequest,
    key: &str,
) -> Result<Address, IntakeError> {
    let section = req.required_section(key)?;
    let street_1 = section.required_text(fields::ADDR_LINE_1)?;
    let street_2 = section.text(fields::ADDR_LINE_2)?;
    let city = section.required_text(fields::CITY)?;
    let state = section.text_or_empty(fields::STATE)?;
    let zip_code = section.text_or_empty(fields::POSTAL)?;
    let country = section.required_text(fields::COUNTRY)?;
    let country_id = uow.find_id(LookupTable::Country, &country)?;

    let address = Address {
        id: uow.next_id(Table::Address)?,
        street_1,
        street_2,
        city,
        state,
        zip_code,
        country_id,
    };
    uow.add(&address)?;
    Ok(address)
}

pub fn map_phone(
    uow: &mut UnitOfWork<'_>,
    req: &RawRequest,
    number_key: &str,
    type_key: &str,
) -> Result<Phone, IntakeError> {
    let phone_number = req.required_section(number_key)?.required_text(fields::FULL)?;
    let phone_type_id = resolve_optional(uow, req, LookupTable::PhoneType, type_key)?;

    let phone = Phone {
        id: uow.next_id(Table::Phone)?,
        phone_number,
        phone_type_id,
    };
    uow.add(&phone)?;
    Ok(phone)
}

/// Insurance card image. An empty upload still gets a row.
pub fn map_image(
    uow: &mut UnitOfWork<'_>,
    req: &RawRequest,
    key: &str,
) -> Result<Image, IntakeError> {
    let metadata = parse::parse_upload(req, key)?;
    let id = uow.next_id(Table::Image)?;

    let image = match metadata {
        Some(meta) => Image {
            id,
            image_name: Some(meta.name),
            image_url: Some(meta.url),
            widget_type: Some(IMAGE_LINKS_WIDGET.to_string()),
        },
        None => {
            tracing::debug!(field = key, image_id = id, "Upload left empty");
            Image::empty(id)
        }
    };
    uow.add(&image)?;
    Ok(image)
}

pub fn map_patient(
    uow: &mut UnitOfWork<'_>,
    req: &RawRequest,
    linked: &LinkedRecords,
) -> Result<Patient, IntakeError> {
    let name = NameParts::from_section(&req.required_section(fields::PATIENT_NAME)?)?;
    let first_name = name
        .first
        .ok_or_else(|| IntakeError::MissingField(format!("{}.{}", fields::PATIENT_NAME, fields::FIRST)))?;
    let last_name = name
        .last
        .ok_or_else(|| IntakeError::MissingField(format!("{}.{}", fields::PATIENT_NAME, fields::LAST)))?;
    let date_of_birth = parse::required_date(req, fields::DATE_OF_BIRTH)?;
    let gender = req.required_text(fields::GENDER)?;
    let age = parse::parse_age(req)?;
    let parent = NameParts::optional(req, fields::PARENT_NAME)?;
    let referral = NameParts::optional(req, fields::REFERRAL_NAME)?;
    let dates_available = parse::optional_date(req, fields::DATES_AVAILABLE)?;

    let need_visa = req
        .text(fields::NEED_VISA)?
        .map(|answer| parse::is_yes(Some(answer.as_str())));

    let preferred_contact = req.required_text(fields::PREFERRED_CONTACT)?;
    let preferred_contact_id = uow.find_id(LookupTable::PreferredContact, &preferred_contact)?;
    let language_id = resolve_optional(uow, req, LookupTable::Language, fields::LANGUAGE)?;
    let coverage_type_id =
        resolve_optional(uow, req, LookupTable::CoverageType, fields::COVERAGE_TYPE)?;
    let referral_type_id =
        resolve_optional(uow, req, LookupTable::ReferralType, fields::REFERRAL_TYPE)?;

    let patient = Patient {
        id: uow.next_id(Table::Patient)?,
        prefix: name.prefix,
        first_name,
        last_name,
        date_of_birth,
        gender,
        age,
        parent_first_name: parent.first,
        parent_last_name: parent.last,
        email: req.text(fields::EMAIL)?,
        is_us_citizen: parse::is_yes(req.text(fields::IS_US_CITIZEN)?.as_deref()),
        need_visa,
        dates_available,
        need_interpretor: parse::is_yes(req.text(fields::NEED_INTERPRETER)?.as_deref()),
        referral_first_name: referral.first,
        referral_last_name: referral.last,
        preferred_contact_id,
        language_id,
        coverage_type_id,
        referral_type_id,
        permanent_address_id: Some(linked.permanent_address_id),
        temporary_address_id: Some(linked.temporary_address_id),
        phone_1_id: Some(linked.phone_1_id),
        phone_2_id: Some(linked.phone_2_id),
        insurance_card_front_id: Some(linked.insurance_card_front_id),
        insurance_card_back_id: Some(linked.insurance_card_back_id),
    };
    uow.add(&patient)?;
    Ok(patient)
}

pub fn map_intake(
    uow: &mut UnitOfWork<'_>,
    submission: &FormSubmission,
    req: &RawRequest,
    patient_id: i64,
) -> Result<Intake, IntakeError> {
    let intake_date = parse::required_date(req, fields::INTAKE_DATE)?;
    let intake_by = NameParts::optional(req, fields::INTAKE_BY)?;
    let liaison = NameParts::optional(req, fields::LIAISON)?;

    let intake = Intake {
        id: uow.next_id(Table::Intake)?,
        intake_date: Some(intake_date),
        intake_by_first_name: intake_by.first,
        intake_by_last_name: intake_by.last,
        liason_first_name: liaison.first,
        liason_last_name: liaison.last,
        patient_id: Some(patient_id),
        form_id: submission.form_id.clone(),
        submission_id: submission.submission_key().map(str::to_string),
        form_title: submission.form_title.clone(),
    };
    uow.add(&intake)?;
    Ok(intake)
}

/// Resolve an optional reference answer. Blank is `None`; a non-blank
/// value that matches nothing is an error.
fn resolve_optional(
    uow: &UnitOfWork<'_>,
    req: &RawRequest,
    table: LookupTable,
    key: &str,
) -> Result<Option<i64>, IntakeError> {
    match req.text(key)? {
        Some(value) => Ok(Some(uow.find_id(table, &value)?)),
        None => Ok(None),
    }
}
