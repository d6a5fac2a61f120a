use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_CATEGORY_COLUMN: &str = "Booster Version Category";
pub const BOOSTER_VERSION_COLUMN: &str = "Booster Version";

const REQUIRED_COLUMNS: [&str; 3] = [SITE_COLUMN, PAYLOAD_COLUMN, CLASS_COLUMN];

/// The booster column the dataset will group by, if the file carries one.
/// The normalised category column wins over the raw version column.
fn pick_booster_column<'a>(headers: impl IntoIterator<Item = &'a str>) -> Option<&'static str> {
    let mut has_category = false;
    let mut has_version = false;
    for header in headers {
        match header {
            BOOSTER_CATEGORY_COLUMN => has_category = true,
            BOOSTER_VERSION_COLUMN => has_version = true,
            _ => {}
        }
    }
    if has_category {
        Some(BOOSTER_CATEGORY_COLUMN)
    } else if has_version {
        Some(BOOSTER_VERSION_COLUMN)
    } else {
        None
    }
}

/// NaN and infinite payload cells count as missing.
fn present_payload(mass: Option<f64>) -> Option<f64> {
    mass.filter(|m| m.is_finite())
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the launch columns (the usual container)
/// * `.json`    – records-oriented array of objects with the same keys
/// * `.parquet` – flat scalar columns with the same names
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV row. Unknown columns (flight number, orbit, ...) are ignored;
/// empty cells deserialize to `None`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass: Option<f64>,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Booster Version Category")]
    booster_category: Option<String>,
    #[serde(rename = "Booster Version")]
    booster_version: Option<String>,
}

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let file = File::open(path).context("opening CSV")?;
    read_csv(file)
}

fn read_csv<R: io::Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing required column '{required}'");
        }
    }
    let booster_column = pick_booster_column(headers.iter());

    let mut records = Vec::new();
    for (row_no, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row.with_context(|| format!("CSV row {row_no}"))?;
        let outcome = Outcome::try_from(row.class)
            .with_context(|| format!("CSV row {row_no}, column '{CLASS_COLUMN}'"))?;
        let booster = match booster_column {
            Some(BOOSTER_CATEGORY_COLUMN) => row.booster_category,
            Some(BOOSTER_VERSION_COLUMN) => row.booster_version,
            _ => None,
        };

        records.push(LaunchRecord {
            site: row.site,
            payload_mass: present_payload(row.payload_mass),
            outcome,
            booster: booster.filter(|b| !b.is_empty()),
        });
    }

    Ok(LaunchDataset::from_records(
        records,
        booster_column.map(str::to_string),
    ))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 2500.0,
///     "class": 1,
///     "Booster Version Category": "FT"
///   },
///   ...
/// ]
/// ```
///
/// A missing payload is written as `null`; the booster columns may be absent.
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<LaunchDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let booster_column = pick_booster_column(
        rows.iter()
            .filter_map(JsonValue::as_object)
            .flat_map(|obj| obj.keys().map(String::as_str)),
    );

    let mut records = Vec::with_capacity(rows.len());
    for (row_no, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {row_no} is not a JSON object"))?;

        let site = obj
            .get(SITE_COLUMN)
            .and_then(JsonValue::as_str)
            .with_context(|| format!("Row {row_no}: missing or non-string '{SITE_COLUMN}'"))?
            .to_string();

        let payload_mass = match obj.get(PAYLOAD_COLUMN) {
            Some(JsonValue::Null) => None,
            Some(value) => Some(value.as_f64().with_context(|| {
                format!("Row {row_no}: '{PAYLOAD_COLUMN}' is not a number")
            })?),
            None => bail!("Row {row_no}: missing '{PAYLOAD_COLUMN}'"),
        };

        let class = obj
            .get(CLASS_COLUMN)
            .and_then(JsonValue::as_i64)
            .with_context(|| format!("Row {row_no}: missing or non-integer '{CLASS_COLUMN}'"))?;
        let outcome = Outcome::try_from(class)
            .with_context(|| format!("Row {row_no}, column '{CLASS_COLUMN}'"))?;

        let booster = match booster_column.and_then(|col| obj.get(col)) {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(s)) if s.is_empty() => None,
            Some(JsonValue::String(s)) => Some(s.clone()),
            Some(other) => bail!("Row {row_no}: booster value {other} is not a string"),
        };

        records.push(LaunchRecord {
            site,
            payload_mass: present_payload(payload_mass),
            outcome,
            booster,
        });
    }

    Ok(LaunchDataset::from_records(
        records,
        booster_column.map(str::to_string),
    ))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat scalar launch columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): strings may be Utf8 or LargeUtf8,
/// numbers 32- or 64-bit.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let schema = builder.schema().clone();
    for required in REQUIRED_COLUMNS {
        schema
            .index_of(required)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{required}' column"))?;
    }
    let booster_column =
        pick_booster_column(schema.fields().iter().map(|f| f.name().as_str()));

    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_base = 0usize;
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let site_col = named_column(&batch, SITE_COLUMN)?;
        let payload_col = named_column(&batch, PAYLOAD_COLUMN)?;
        let class_col = named_column(&batch, CLASS_COLUMN)?;
        let booster_col = booster_column
            .map(|col| named_column(&batch, col))
            .transpose()?;

        for row in 0..batch.num_rows() {
            let row_no = row_base + row;

            let site = extract_string(site_col, row)
                .with_context(|| format!("Row {row_no}, column '{SITE_COLUMN}'"))?
                .with_context(|| format!("Row {row_no}: '{SITE_COLUMN}' is null"))?;

            let payload_mass = extract_f64(payload_col, row)
                .with_context(|| format!("Row {row_no}, column '{PAYLOAD_COLUMN}'"))?;

            let class = extract_i64(class_col, row)
                .with_context(|| format!("Row {row_no}, column '{CLASS_COLUMN}'"))?
                .with_context(|| format!("Row {row_no}: '{CLASS_COLUMN}' is null"))?;
            let outcome = Outcome::try_from(class)
                .with_context(|| format!("Row {row_no}, column '{CLASS_COLUMN}'"))?;

            let booster = match booster_col {
                Some(col) => extract_string(col, row)
                    .with_context(|| format!("Row {row_no}: failed to read booster column"))?
                    .filter(|b| !b.is_empty()),
                None => None,
            };

            records.push(LaunchRecord {
                site,
                payload_mass: present_payload(payload_mass),
                outcome,
                booster,
            });
        }
        row_base += batch.num_rows();
    }

    Ok(LaunchDataset::from_records(
        records,
        booster_column.map(str::to_string),
    ))
}

// -- Parquet / Arrow helpers --

fn named_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .with_context(|| format!("Parquet file missing '{name}' column"))
}

/// Read an optional string cell, accepting Utf8 and LargeUtf8 columns.
fn extract_string(col: &ArrayRef, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => Ok(Some(col.as_string::<i32>().value(row).to_string())),
        DataType::LargeUtf8 => Ok(Some(col.as_string::<i64>().value(row).to_string())),
        other => bail!("expected a string column, got {other:?}"),
    }
}

/// Read an optional numeric cell, accepting the common float and int widths.
fn extract_f64(col: &ArrayRef, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => {
            col.as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?
                .value(row)
        }
        DataType::Float32 => {
            col.as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?
                .value(row) as f64
        }
        DataType::Int64 => {
            col.as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?
                .value(row) as f64
        }
        DataType::Int32 => {
            col.as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?
                .value(row) as f64
        }
        other => bail!("expected a numeric column, got {other:?}"),
    };
    Ok(Some(value))
}

/// Read an optional integer cell, accepting Int64 and Int32 columns.
fn extract_i64(col: &ArrayRef, row: usize) -> Result<Option<i64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Int64 => {
            col.as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?
                .value(row)
        }
        DataType::Int32 => {
            col.as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?
                .value(row) as i64
        }
        other => bail!("expected an integer column, got {other:?}"),
    };
    Ok(Some(value))
}
