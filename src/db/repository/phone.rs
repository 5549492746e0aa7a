use rusqlite::{params, Connection, OptionalExtension};

use super::{expect_one_row, Record};
use crate::db::DatabaseError;
use crate::models::enums::Table;
use crate::models::*;

pub fn insert_phone(conn: &Connection, phone: &Phone) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO phones (id, phone_number, phone_type_id) VALUES (?1, ?2, ?3)",
        params![phone.id, phone.phone_number, phone.phone_type_id],
    )?;
    Ok(())
}

pub fn update_phone(conn: &Connection, phone: &Phone) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE phones SET phone_number = ?2, phone_type_id = ?3 WHERE id = ?1",
        params![phone.id, phone.phone_number, phone.phone_type_id],
    )?;
    expect_one_row(changed, Table::Phone, phone.id)
}

pub fn get_phone(conn: &Connection, id: i64) -> Result<Option<Phone>, DatabaseError> {
    let phone = conn
        .query_row(
            "SELECT id, phone_number, phone_type_id FROM phones WHERE id = ?1",
            params![id],
            |row| {
                Ok(Phone {
                    id: row.get(0)?,
                    phone_number: row.get(1)?,
                    phone_type_id: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(phone)
}

impl Record for Phone {
    const TABLE: Table = Table::Phone;

    fn id(&self) -> i64 {
        self.id
    }

    fn insert(&self, conn: &Connection) -> Result<(), DatabaseError> {
        insert_phone(conn, self)
    }

    fn update(&self, conn: &Connection) -> Result<(), DatabaseError> {
        update_phone(conn, self)
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Self>, DatabaseError> {
        get_phone(conn, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn phone_insert_and_retrieve() {
        let conn = open_memory_database().unwrap();
        let phone = Phone {
            id: 1,
            phone_number: "(617) 555-0142".into(),
            phone_type_id: Some(1),
        };
        insert_phone(&conn, &phone).unwrap();
        assert_eq!(get_phone(&conn, 1).unwrap(), Some(phone));
    }

    #[test]
    fn phone_type_is_optional() {
        let conn = open_memory_database().unwrap();
        let phone = Phone {
            id: 2,
            phone_number: "555-0199".into(),
            phone_type_id: None,
        };
        insert_phone(&conn, &phone).unwrap();
        assert_eq!(get_phone(&conn, 2).unwrap().unwrap().phone_type_id, None);
    }
}
