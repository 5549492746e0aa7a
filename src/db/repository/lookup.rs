use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::enums::LookupTable;
use crate::models::LookupEntry;

pub fn insert_lookup(conn: &Connection, entry: &LookupEntry) -> Result<(), DatabaseError> {
    let sql = format!("INSERT INTO {} (id, name) VALUES (?1, ?2)", entry.table.as_str());
    conn.execute(&sql, params![entry.id, entry.name])?;
    Ok(())
}

/// Resolve a human-readable reference value to its row id.
///
/// Exact, case-sensitive match on `name`. A miss is an error, never a
/// default id.
pub fn find_lookup_id(
    conn: &Connection,
    table: LookupTable,
    value: &str,
) -> Result<i64, DatabaseError> {
    let sql = format!("SELECT id FROM {} WHERE name = ?1", table.as_str());
    let id = conn
        .query_row(&sql, params![value], |row| row.get::<_, i64>(0))
        .optional()?;

    id.ok_or_else(|| {
        tracing::warn!(%table, value, "Reference value not found");
        DatabaseError::UnknownReference {
            table,
            value: value.to_string(),
        }
    })
}

pub fn get_lookup(
    conn: &Connection,
    table: LookupTable,
    id: i64,
) -> Result<Option<LookupEntry>, DatabaseError> {
    let sql = format!("SELECT id, name FROM {} WHERE id = ?1", table.as_str());
    let entry = conn
        .query_row(&sql, params![id], |row| {
            Ok(LookupEntry {
                table,
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .optional()?;
    Ok(entry)
}

pub fn list_lookup(conn: &Connection, table: LookupTable) -> Result<Vec<LookupEntry>, DatabaseError> {
    let sql = format!("SELECT id, name FROM {} ORDER BY id", table.as_str());
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt.query_map([], |row| {
        Ok(LookupEntry {
            table,
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
