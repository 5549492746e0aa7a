use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{expect_one_row, Record};
use crate::db::DatabaseError;
use crate::models::enums::Table;
use crate::models::*;

const INTAKE_COLUMNS: &str = "id, intake_date, intake_by_first_name, intake_by_last_name,
    liason_first_name, liason_last_name, patient_id, form_id, submission_id, form_title";

pub fn insert_intake(conn: &Connection, intake: &Intake) -> Result<(), DatabaseError> {
    let sql = format!(
        "INSERT INTO intakes ({INTAKE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
    );
    conn.execute(
        &sql,
        params![
            intake.id,
            intake.intake_date,
            intake.intake_by_first_name,
            intake.intake_by_last_name,
            intake.liason_first_name,
            intake.liason_last_name,
            intake.patient_id,
            intake.form_id,
            intake.submission_id,
            intake.form_title,
        ],
    )?;
    Ok(())
}

pub fn update_intake(conn: &Connection, intake: &Intake) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE intakes SET intake_date = ?2, intake_by_first_name = ?3, intake_by_last_name = ?4,
         liason_first_name = ?5, liason_last_name = ?6, patient_id = ?7, form_id = ?8,
         submission_id = ?9, form_title = ?10 WHERE id = ?1",
        params![
            intake.id,
            intake.intake_date,
            intake.intake_by_first_name,
            intake.intake_by_last_name,
            intake.liason_first_name,
            intake.liason_last_name,
            intake.patient_id,
            intake.form_id,
            intake.submission_id,
            intake.form_title,
        ],
    )?;
    expect_one_row(changed, Table::Intake, intake.id)
}

pub fn get_intake(conn: &Connection, id: i64) -> Result<Option<Intake>, DatabaseError> {
    let sql = format!("SELECT {INTAKE_COLUMNS} FROM intakes WHERE id = ?1");
    let intake = conn.query_row(&sql, params![id], intake_from_row).optional()?;
    Ok(intake)
}

/// Find the intake recorded for a vendor submission id, if any.
pub fn find_intake_by_submission(
    conn: &Connection,
    submission_id: &str,
) -> Result<Option<Intake>, DatabaseError> {
    let sql = format!("SELECT {INTAKE_COLUMNS} FROM intakes WHERE submission_id = ?1");
    let intake = conn
        .query_row(&sql, params![submission_id], intake_from_row)
        .optional()?;
    Ok(intake)
}

fn intake_from_row(row: &Row<'_>) -> rusqlite::Result<Intake> {
    Ok(Intake {
        id: row.get(0)?,
        intake_date: row.get(1)?,
        intake_by_first_name: row.get(2)?,
        intake_by_last_name: row.get(3)?,
        liason_first_name: row.get(4)?,
        liason_last_name: row.get(5)?,
        patient_id: row.get(6)?,
        form_id: row.get(7)?,
        submission_id: row.get(8)?,
        form_title: row.get(9)?,
    })
}

impl Record for Intake {
    const TABLE: Table = Table::Intake;

    fn id(&self) -> i64 {
        self.id
    }

    fn insert(&self, conn: &Connection) -> Result<(), DatabaseError> {
        insert_intake(conn, self)
    }

    fn update(&self, conn: &Connection) -> Result<(), DatabaseError> {
        update_intake(conn, self)
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Self>, DatabaseError> {
        get_intake(conn, id)
    }
}
