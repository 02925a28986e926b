//! Data table component types.
//!
//! The admin CRUD tables are fetch-and-render: routes turn backend records
//! into plain string cells, and one template renders them all.

/// Column definition for a data table.
#[derive(Debug, Clone)]
pub struct TableColumn {
    /// Display label for the column header.
    pub label: String,
}

impl TableColumn {
    /// Create a new column.
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }

    /// Build a column set from labels.
    #[must_use]
    pub fn set(labels: &[&str]) -> Vec<Self> {
        labels.iter().map(|label| Self::new(label)).collect()
    }
}

/// One rendered row.
///
/// Rows with an `id` get edit/delete actions in the listings table; the
/// read-only tables leave it empty.
#[derive(Debug, Clone)]
pub struct TableRow {
    /// Entity id for action links, when the table supports actions.
    pub id: Option<String>,
    /// Cell values, one per column.
    pub cells: Vec<String>,
}

impl TableRow {
    /// Create a read-only row.
    #[must_use]
    pub fn new(cells: Vec<String>) -> Self {
        Self { id: None, cells }
    }

    /// Create a row with an action id.
    #[must_use]
    pub fn with_id(id: impl Into<String>, cells: Vec<String>) -> Self {
        Self {
            id: Some(id.into()),
            cells,
        }
    }
}

/// Render an optional string cell with the admin console's placeholder.
#[must_use]
pub fn cell(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_column_set() {
        let columns = TableColumn::set(&["User ID", "Phone Number"]);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[1].label, "Phone Number");
    }

    #[test]
    fn test_cell_placeholder() {
        assert_eq!(cell(Some("x")), "x");
        assert_eq!(cell(Some("")), "N/A");
        assert_eq!(cell(None), "N/A");
    }
}
