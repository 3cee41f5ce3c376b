use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float64Type, Int64Type, UInt64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CellValue, Column, Table};

/// Why a file could not be turned into a [`Table`].
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("unsupported file extension '.{extension}': {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Cell spellings read as missing values.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` / no extension – comma-separated, UTF-8, header row
/// * `.json`    – `[{ "col": value, ... }, ...]`
/// * `.parquet` – scalar columns (ints, floats, bools, strings)
pub fn load_table(path: &Path) -> Result<Table, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "csv" | "txt" | "" => load_csv(file),
        "json" => load_json(file),
        "parquet" | "pq" => load_parquet(file),
        other => {
            return Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: other.to_string(),
            })
        }
    };

    parsed.map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per row. Every
/// record must have as many fields as the header.
fn load_csv(file: File) -> Result<Table> {
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers().context("reading CSV headers")?;
    let names = normalize_headers(headers.iter());
    if names.is_empty() {
        anyhow::bail!("no columns to parse from file");
    }

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); names.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        for (col_idx, value) in record.iter().enumerate() {
            cells[col_idx].push(parse_cell(value));
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Column::new(name, values))
        .collect();
    Table::new(columns)
}

/// Name blank headers `Unnamed: {index}` and suffix repeats with `.1`, `.2`, …
fn normalize_headers<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (idx, header) in raw.into_iter().enumerate() {
        let header = header.trim_start_matches('\u{feff}');
        let base = if header.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header.to_string()
        };

        let mut name = base.clone();
        let mut k = 0;
        while names.contains(&name) {
            k += 1;
            name = format!("{base}.{k}");
        }
        names.push(name);
    }
    names
}

fn parse_cell(raw: &str) -> CellValue {
    let s = raw.trim();
    if NA_TOKENS.contains(&s) {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::float(f);
    }
    match s {
        "true" | "True" | "TRUE" => CellValue::Bool(true),
        "false" | "False" | "FALSE" => CellValue::Bool(false),
        _ => CellValue::Text(raw.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "age": 31, "weight_kg": 72.4, "sex": "F" },
///   ...
/// ]
/// ```
///
/// Keys missing from a record are missing values. Columns appear in the
/// order their keys are first seen in the file.
fn load_json(file: File) -> Result<Table> {
    let root: JsonValue =
        serde_json::from_reader(BufReader::new(file)).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut names: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
    }

    let columns = names
        .into_iter()
        .map(|name| {
            let values = records
                .iter()
                .map(|rec| rec.get(&name).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect();
            Column::new(name, values)
        })
        .collect();
    Table::new(columns)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with scalar columns.
///
/// Integer columns of any width become `Integer`, float columns `Float`,
/// booleans `Bool` and strings `Text`. Other Arrow types are rendered to text.
/// Works with files written by both **Pandas** and **Polars**.
fn load_parquet(file: File) -> Result<Table> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let schema = builder.schema().clone();
    let reader = builder.build().context("building parquet reader")?;

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); schema.fields().len()];

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for (col_idx, col) in batch.columns().iter().enumerate() {
            append_arrow_cells(col, &mut cells[col_idx])
                .with_context(|| format!("column '{}'", schema.field(col_idx).name()))?;
        }
    }

    let columns = schema
        .fields()
        .iter()
        .zip(cells)
        .map(|(field, values)| Column::new(field.name().clone(), values))
        .collect();
    Table::new(columns)
}

// -- Arrow helpers --

fn append_arrow_cells(col: &ArrayRef, out: &mut Vec<CellValue>) -> Result<()> {
    match col.data_type() {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => {
            let ints = arrow::compute::cast(col.as_ref(), &DataType::Int64)?;
            out.extend(
                ints.as_primitive::<Int64Type>()
                    .iter()
                    .map(|v| v.map_or(CellValue::Null, CellValue::Integer)),
            );
        }
        // Values past i64::MAX are kept as floats instead of being cast to null.
        DataType::UInt64 => {
            out.extend(col.as_primitive::<UInt64Type>().iter().map(|v| match v {
                None => CellValue::Null,
                Some(u) => i64::try_from(u).map_or(CellValue::Float(u as f64), CellValue::Integer),
            }));
        }
        DataType::Float16 | DataType::Float32 | DataType::Float64 => {
            let floats = arrow::compute::cast(col.as_ref(), &DataType::Float64)?;
            out.extend(
                floats
                    .as_primitive::<Float64Type>()
                    .iter()
                    .map(|v| v.map_or(CellValue::Null, CellValue::float)),
            );
        }
        DataType::Boolean => {
            out.extend(
                col.as_boolean()
                    .iter()
                    .map(|v| v.map_or(CellValue::Null, CellValue::Bool)),
            );
        }
        DataType::Utf8 => {
            out.extend(
                col.as_string::<i32>()
                    .iter()
                    .map(|v| v.map_or(CellValue::Null, |s| CellValue::Text(s.to_string()))),
            );
        }
        DataType::LargeUtf8 => {
            out.extend(
                col.as_string::<i64>()
                    .iter()
                    .map(|v| v.map_or(CellValue::Null, |s| CellValue::Text(s.to_string()))),
            );
        }
        _ => {
            for row in 0..col.len() {
                if col.is_null(row) {
                    out.push(CellValue::Null);
                } else {
                    out.push(CellValue::Text(array_value_to_string(col.as_ref(), row)?));
                }
            }
        }
    }
    Ok(())
}
