use serde::{Deserialize, Serialize};

use super::enums::LookupTable;

/// A row of one of the reference tables (country, language, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub table: LookupTable,
    pub id: i64,
    pub name: String,
}
