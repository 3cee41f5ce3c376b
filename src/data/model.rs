use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single parsed cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl CellValue {
    /// Build a float cell; NaN is treated as a missing value.
    pub fn float(v: f64) -> Self {
        if v.is_nan() {
            CellValue::Null
        } else {
            CellValue::Float(v)
        }
    }

    /// Interpret the value as an `f64`, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnType – declared type of a whole column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    Text,
}

impl ColumnType {
    /// Infer the declared type from a column's cells.
    ///
    /// * only integers, nothing missing → `Integer`
    /// * integers and/or floats, possibly with gaps → `Float`
    /// * only booleans → `Boolean`
    /// * anything else → `Text`
    ///
    /// A column without a single present cell is `Float` (all-missing) unless
    /// it has no rows at all, in which case there is nothing to call numeric.
    pub fn infer(values: &[CellValue]) -> Self {
        if values.is_empty() {
            return ColumnType::Text;
        }

        let mut has_null = false;
        let mut has_int = false;
        let mut has_float = false;
        let mut has_bool = false;
        let mut has_text = false;

        for v in values {
            match v {
                CellValue::Null => has_null = true,
                CellValue::Integer(_) => has_int = true,
                CellValue::Float(_) => has_float = true,
                CellValue::Bool(_) => has_bool = true,
                CellValue::Text(_) => has_text = true,
            }
        }

        if has_text || (has_bool && (has_int || has_float)) {
            ColumnType::Text
        } else if has_bool {
            ColumnType::Boolean
        } else if has_int && !has_float && !has_null {
            ColumnType::Integer
        } else {
            ColumnType::Float
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "int64",
            ColumnType::Float => "float64",
            ColumnType::Boolean => "bool",
            ColumnType::Text => "object",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded file
// ---------------------------------------------------------------------------

/// One named column of a [`Table`].
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
    pub values: Vec<CellValue>,
}

impl Column {
    /// Build a column, inferring its declared type from the cells.
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        let dtype = ColumnType::infer(&values);
        Column {
            name: name.into(),
            dtype,
            values,
        }
    }
}

/// An ordered collection of equal-length columns, rows aligned by position.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table from columns. Fails if the columns differ in length.
    pub fn new(columns: Vec<Column>) -> anyhow::Result<Self> {
        let n_rows = columns.first().map(|c| c.values.len()).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.values.len() != n_rows) {
            anyhow::bail!(
                "column '{}' has {} values, expected {n_rows}",
                bad.name,
                bad.values.len()
            );
        }
        Ok(Table { columns, n_rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }
}

// ---------------------------------------------------------------------------
// NumericTable – the numeric sub-table fed to the correlation step
// ---------------------------------------------------------------------------

/// A numeric column; `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    pub name: String,
    pub dtype: ColumnType,
    pub values: Vec<Option<f64>>,
}

impl NumericColumn {
    /// Render one cell the way the sample preview shows it.
    pub fn display(&self, row: usize) -> String {
        match self.values.get(row).copied().flatten() {
            None => "NaN".to_string(),
            Some(v) if self.dtype == ColumnType::Integer => format!("{}", v as i64),
            Some(v) => format!("{v}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericTable {
    pub columns: Vec<NumericColumn>,
    pub n_rows: usize,
}

impl NumericTable {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&NumericColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Row indices of the first `n` rows, for the sample preview.
    pub fn head(&self, n: usize) -> std::ops::Range<usize> {
        0..n.min(self.n_rows)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
