use std::collections::HashMap;

use rusqlite::{Connection, Transaction, TransactionBehavior};

use super::{find_lookup_id, insert_lookup, max_id, Record};
use crate::db::DatabaseError;
use crate::models::enums::{LookupTable, Table};
use crate::models::LookupEntry;

/// One request's worth of writes, applied atomically.
///
/// The transaction is opened `IMMEDIATE`, so the SQLite write lock is held
/// from the first statement: ids handed out by [`UnitOfWork::next_id`] cannot
/// be observed by another writer before this unit commits. Dropping the
/// unit without calling [`UnitOfWork::commit`] rolls everything back.
pub struct UnitOfWork<'conn> {
    tx: Transaction<'conn>,
    allocated: HashMap<Table, i64>,
}

impl<'conn> UnitOfWork<'conn> {
    pub fn begin(conn: &'conn mut Connection) -> Result<Self, DatabaseError> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        Ok(Self {
            tx,
            allocated: HashMap::new(),
        })
    }

    /// Read access to the uncommitted state.
    pub fn conn(&self) -> &Connection {
        &self.tx
    }

    /// Next unused id for `table`: one past the larger of the stored
    /// maximum and the last id this unit handed out.
    pub fn next_id(&mut self, table: Table) -> Result<i64, DatabaseError> {
        let stored = max_id(&self.tx, table)?;
        let reserved = self.allocated.get(&table).copied().unwrap_or(0);
        let next = stored.max(reserved) + 1;
        self.allocated.insert(table, next);
        Ok(next)
    }

    /// Resolve a reference value to its row id (exact, case-sensitive).
    pub fn find_id(&self, lookup: LookupTable, value: &str) -> Result<i64, DatabaseError> {
        find_lookup_id(&self.tx, lookup, value)
    }

    pub fn add<T: Record>(&self, record: &T) -> Result<(), DatabaseError> {
        record.insert(&self.tx).map_err(|e| {
            tracing::error!(table = %T::TABLE, id = record.id(), error = %e, "Insert failed");
            e
        })
    }

    pub fn update<T: Record>(&self, record: &T) -> Result<(), DatabaseError> {
        record.update(&self.tx).map_err(|e| {
            tracing::error!(table = %T::TABLE, id = record.id(), error = %e, "Update failed");
            e
        })
    }

    pub fn get<T: Record>(&self, id: i64) -> Result<Option<T>, DatabaseError> {
        T::fetch(&self.tx, id)
    }

    /// Allocate an id and insert a new reference value.
    pub fn add_lookup(
        &mut self,
        lookup: LookupTable,
        name: &str,
    ) -> Result<LookupEntry, DatabaseError> {
        let entry = LookupEntry {
            table: lookup,
            id: self.next_id(lookup.table())?,
            name: name.to_string(),
        };
        insert_lookup(&self.tx, &entry).map_err(|e| {
            tracing::error!(table = %lookup, name, error = %e, "Insert failed");
            e
        })?;
        Ok(entry)
    }

    pub fn commit(self) -> Result<(), DatabaseError> {
        self.tx.commit().map_err(|e| {
            tracing::error!(error = %e, "Commit failed");
            DatabaseError::from(e)
        })
    }
}
