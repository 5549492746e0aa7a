use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{expect_one_row, Record};
use crate::db::DatabaseError;
use crate::models::enums::Table;
use crate::models::*;

const PATIENT_COLUMNS: &str = "id, prefix, first_name, last_name, date_of_birth, gender, age,
    parent_first_name, parent_last_name, email, is_us_citizen, need_visa, dates_available,
    need_interpretor, referral_first_name, referral_last_name, preferred_contact_id,
    language_id, coverage_type_id, referral_type_id, permanent_address_id,
    temporary_address_id, phone_1_id, phone_2_id, insurance_card_front_id,
    insurance_card_back_id";

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    let sql = format!(
        "INSERT INTO patients ({PATIENT_COLUMNS})
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                 ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26)"
    );
    conn.execute(
        &sql,
        params![
            patient.id,
            patient.prefix,
            patient.first_name,
            patient.last_name,
            patient.date_of_birth,
            patient.gender,
            patient.age,
            patient.parent_first_name,
            patient.parent_last_name,
            patient.email,
            patient.is_us_citizen as i32,
            patient.need_visa.map(|v| v as i32),
            patient.dates_available,
            patient.need_interpretor as i32,
            patient.referral_first_name,
            patient.referral_last_name,
            patient.preferred_contact_id,
            patient.language_id,
            patient.coverage_type_id,
            patient.referral_type_id,
            patient.permanent_address_id,
            patient.temporary_address_id,
            patient.phone_1_id,
            patient.phone_2_id,
            patient.insurance_card_front_id,
            patient.insurance_card_back_id,
        ],
    )?;
    Ok(())
}

pub fn update_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE patients SET prefix = ?2, first_name = ?3, last_name = ?4, date_of_birth = ?5,
         gender = ?6, age = ?7, parent_first_name = ?8, parent_last_name = ?9, email = ?10,
         is_us_citizen = ?11, need_visa = ?12, dates_available = ?13, need_interpretor = ?14,
         referral_first_name = ?15, referral_last_name = ?16, preferred_contact_id = ?17,
         language_id = ?18, coverage_type_id = ?19, referral_type_id = ?20,
         permanent_address_id = ?21, temporary_address_id = ?22, phone_1_id = ?23,
         phone_2_id = ?24, insurance_card_front_id = ?25, insurance_card_back_id = ?26
         WHERE id = ?1",
        params![
            patient.id,
            patient.prefix,
            patient.first_name,
            patient.last_name,
            patient.date_of_birth,
            patient.gender,
            patient.age,
            patient.parent_first_name,
            patient.parent_last_name,
            patient.email,
            patient.is_us_citizen as i32,
            patient.need_visa.map(|v| v as i32),
            patient.dates_available,
            patient.need_interpretor as i32,
            patient.referral_first_name,
            patient.referral_last_name,
            patient.preferred_contact_id,
            patient.language_id,
            patient.coverage_type_id,
            patient.referral_type_id,
            patient.permanent_address_id,
            patient.temporary_address_id,
            patient.phone_1_id,
            patient.phone_2_id,
            patient.insurance_card_front_id,
            patient.insurance_card_back_id,
        ],
    )?;
    expect_one_row(changed, Table::Patient, patient.id)
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, DatabaseError> {
    let sql = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1");
    let patient = conn.query_row(&sql, params![id], patient_from_row).optional()?;
    Ok(patient)
}

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        prefix: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        date_of_birth: row.get(4)?,
        gender: row.get(5)?,
        age: row.get(6)?,
        parent_first_name: row.get(7)?,
        parent_last_name: row.get(8)?,
        email: row.get(9)?,
        is_us_citizen: row.get::<_, i32>(10)? != 0,
        need_visa: row.get::<_, Option<i32>>(11)?.map(|v| v != 0),
        dates_available: row.get(12)?,
        need_interpretor: row.get::<_, i32>(13)? != 0,
        referral_first_name: row.get(14)?,
        referral_last_name: row.get(15)?,
        preferred_contact_id: row.get(16)?,
        language_id: row.get(17)?,
        coverage_type_id: row.get(18)?,
        referral_type_id: row.get(19)?,
        permanent_address_id: row.get(20)?,
        temporary_address_id: row.get(21)?,
        phone_1_id: row.get(22)?,
        phone_2_id: row.get(23)?,
        insurance_card_front_id: row.get(24)?,
        insurance_card_back_id: row.get(25)?,
    })
}

impl Record for Patient {
    const TABLE: Table = Table::Patient;

    fn id(&self) -> i64 {
        self.id
    }

    fn insert(&self, conn: &Connection) -> Result<(), DatabaseError> {
        insert_patient(conn, self)
    }

    fn update(&self, conn: &Connection) -> Result<(), DatabaseError> {
        update_patient(conn, self)
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Self>, DatabaseError> {
        get_patient(conn, id)
    }
}
