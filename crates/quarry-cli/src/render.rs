//! Grid rendering of query results.

use comfy_table::Table;
use quarry_core::Row;

/// Message printed when a query returns no rows.
pub const EMPTY_MESSAGE: &str = "Empty set.";

/// Formats rows as a grid with the output schema's column names as headers.
#[must_use]
pub fn render(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return EMPTY_MESSAGE.to_string();
    };

    let mut table = Table::new();
    table.set_header(
        first
            .schema()
            .columns()
            .iter()
            .map(|column| column.name().to_string()),
    );
    for row in rows {
        table.add_row(row.values().iter().map(ToString::to_string));
    }
    table.to_string()
}
