//! Reusable view components for the admin console.

pub mod data_table;

pub use data_table::{TableColumn, TableRow};
