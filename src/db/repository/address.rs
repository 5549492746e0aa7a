use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{expect_one_row, Record};
use crate::db::DatabaseError;
use crate::models::enums::Table;
use crate::models::*;

const ADDRESS_COLUMNS: &str = "id, street_1, street_2, city, state, zip_code, country_id";

pub fn insert_address(conn: &Connection, address: &Address) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO addresses (id, street_1, street_2, city, state, zip_code, country_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            address.id,
            address.street_1,
            address.street_2,
            address.city,
            address.state,
            address.zip_code,
            address.country_id,
        ],
    )?;
    Ok(())
}

pub fn update_address(conn: &Connection, address: &Address) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE addresses SET street_1 = ?2, street_2 = ?3, city = ?4, state = ?5,
         zip_code = ?6, country_id = ?7 WHERE id = ?1",
        params![
            address.id,
            address.street_1,
            address.street_2,
            address.city,
            address.state,
            address.zip_code,
            address.country_id,
        ],
    )?;
    expect_one_row(changed, Table::Address, address.id)
}

pub fn get_address(conn: &Connection, id: i64) -> Result<Option<Address>, DatabaseError> {
    let sql = format!("SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = ?1");
    let address = conn.query_row(&sql, params![id], address_from_row).optional()?;
    Ok(address)
}

fn address_from_row(row: &Row<'_>) -> rusqlite::Result<Address> {
    Ok(Address {
        id: row.get(0)?,
        street_1: row.get(1)?,
        street_2: row.get(2)?,
        city: row.get(3)?,
        state: row.get(4)?,
        zip_code: row.get(5)?,
        country_id: row.get(6)?,
    })
}

impl Record for Address {
    const TABLE: Table = Table::Address;

    fn id(&self) -> i64 {
        self.id
    }

    fn insert(&self, conn: &Connection) -> Result<(), DatabaseError> {
        insert_address(conn, self)
    }

    fn update(&self, conn: &Connection) -> Result<(), DatabaseError> {
        update_address(conn, self)
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Self>, DatabaseError> {
        get_address(conn, id)
    }
}
