pub mod health;
pub mod lookups;
pub mod process;
pub mod records;
