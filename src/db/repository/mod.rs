//! Repository layer: entity-scoped database operations.
//!
//! Each entity module exposes free functions over a `Connection`
//! (`insert_*`, `get_*`, `update_*`) and implements [`Record`] so the
//! intake processor can drive every table through one [`UnitOfWork`].

mod address;
mod image;
mod intake;
mod lookup;
mod patient;
mod phone;
mod unit_of_work;

use rusqlite::Connection;

use super::DatabaseError;
use crate::models::enums::Table;

/// Base repository operations for any intake entity.
pub trait Record: Sized {
    const TABLE: Table;

    fn id(&self) -> i64;
    fn insert(&self, conn: &Connection) -> Result<(), DatabaseError>;
    fn update(&self, conn: &Connection) -> Result<(), DatabaseError>;
    fn fetch(conn: &Connection, id: i64) -> Result<Option<Self>, DatabaseError>;
}

pub use address::*;
pub use image::*;
pub use intake::*;
pub use lookup::*;
pub use patient::*;
pub use phone::*;
pub use unit_of_work::*;

/// Largest stored id in `table`, 0 when the table is empty.
pub fn max_id(conn: &Connection, table: Table) -> Result<i64, DatabaseError> {
    let sql = format!("SELECT COALESCE(MAX(id), 0) FROM {}", table.as_str());
    let max = conn.query_row(&sql, [], |row| row.get::<_, i64>(0))?;
    Ok(max)
}

/// Number of rows in `table`.
pub fn count_rows(conn: &Connection, table: Table) -> Result<i64, DatabaseError> {
    let sql = format!("SELECT COUNT(*) FROM {}", table.as_str());
    let count = conn.query_row(&sql, [], |row| row.get::<_, i64>(0))?;
    Ok(count)
}

/// Map an `UPDATE` that touched no row to `NotFound`.
fn expect_one_row(changed: usize, table: Table, id: i64) -> Result<(), DatabaseError> {
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: table.as_str().into(),
            id: id.to_string(),
        });
    }
    Ok(())
}
