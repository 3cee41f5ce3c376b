use super::model::{NumericColumn, NumericTable, Table};

// ---------------------------------------------------------------------------
// Column-type filter: Table → NumericTable
// ---------------------------------------------------------------------------

/// Keep only the columns whose declared type is numeric, in their original
/// order. Missing cells become `None`.
pub fn select_numeric(table: &Table) -> NumericTable {
    let columns: Vec<NumericColumn> = table
        .columns()
        .iter()
        .filter(|col| col.dtype.is_numeric())
        .map(|col| NumericColumn {
            name: col.name.clone(),
            dtype: col.dtype,
            values: col.values.iter().map(|v| v.as_f64()).collect(),
        })
        .collect();

    log::debug!(
        "selected {} numeric of {} columns",
        columns.len(),
        table.n_columns()
    );

    NumericTable {
        columns,
        n_rows: table.n_rows(),
    }
}
