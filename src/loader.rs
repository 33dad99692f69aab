use std::{collections::HashMap, fs::File, io::Read, path::Path};

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{
  dates::{self, DEFAULT_TIMESTAMP_FORMAT},
  schema::ColumnSchema,
  table::{Row, SeriesTable},
  values,
};

#[derive(Clone, Debug, PartialEq)]
pub struct LoadOptions {
  pub schema: ColumnSchema,
  /// `None` means the first column
  pub timestamp_column: Option<String>,
  pub timestamp_format: String,
  pub discriminator_column: Option<String>,
  pub discriminator_value: Option<String>,
  pub skip_rows: usize,
}

impl Default for LoadOptions {
  fn default() -> LoadOptions {
    return LoadOptions {
      schema: ColumnSchema::Header,
      timestamp_column: None,
      timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
      discriminator_column: None,
      discriminator_value: None,
      skip_rows: 0,
    };
  }
}

struct ColumnLayout {
  timestamp_index: usize,
  discriminator_index: Option<usize>,
  value_columns: Vec<(usize, String)>,
}

fn find_column(columns: &[String], name: &str) -> Result<usize> {
  match columns.iter().position(|column| column == name) {
    Some(index) => Ok(index),
    None => bail!("column {:?} not found in {:?}", name, columns),
  }
}

fn resolve_layout(columns: &[String], options: &LoadOptions) -> Result<ColumnLayout> {
  if columns.is_empty() {
    bail!("no columns to load (empty header?)");
  }
  if options.discriminator_value.is_some() && options.discriminator_column.is_none() {
    bail!("discriminator value given without a discriminator column");
  }
  let timestamp_index = match &options.timestamp_column {
    Some(name) => find_column(columns, name)?,
    None => 0,
  };
  let discriminator_index = match &options.discriminator_column {
    Some(name) => Some(find_column(columns, name)?),
    None => None,
  };
  if discriminator_index == Some(timestamp_index) {
    bail!("timestamp and discriminator cannot share column {}", timestamp_index);
  }
  let value_columns = columns
    .iter()
    .enumerate()
    .filter(|(index, _)| *index != timestamp_index && Some(*index) != discriminator_index)
    .map(|(index, name)| (index, name.clone()))
    .collect();
  return Ok(ColumnLayout {
    timestamp_index,
    discriminator_index,
    value_columns,
  });
}

fn parse_row(record: &StringRecord, layout: &ColumnLayout, timestamp_format: &str) -> Result<Row> {
  let line = record.position().map(|position| position.line()).unwrap_or(0);
  let Some(timestamp) = record.get(layout.timestamp_index) else {
    bail!("line {} has no timestamp cell", line);
  };
  let date = dates::parse_date(timestamp, timestamp_format).with_context(|| format!("line {}", line))?;
  let discriminator = layout
    .discriminator_index
    .and_then(|index| record.get(index))
    .map(|value| value.to_string());
  // short rows read as nulls, same as a non-numeric cell
  let mut fields = HashMap::with_capacity(layout.value_columns.len());
  for (index, name) in &layout.value_columns {
    let value = record.get(*index).and_then(values::parse_value);
    fields.insert(name.clone(), value);
  }
  return Ok(Row {
    date,
    discriminator,
    fields,
  });
}

/// Single pass over `reader`: parse, filter on the discriminator, then drop the warm-up rows.
pub fn load_series_from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<SeriesTable> {
  if options.schema.is_legacy_long() {
    log::warn!("legacy long schema: relabeling WrongEnergy as FreeEnergy and FreeEnergy as Resistance");
  }
  // timestamp and discriminator cells are taken verbatim, only value cells are trimmed
  let mut csv_reader = ReaderBuilder::new()
    .has_headers(options.schema.has_header())
    .flexible(true)
    .trim(Trim::Headers)
    .from_reader(reader);
  // columns
  let columns: Vec<String> = match options.schema.canonical() {
    ColumnSchema::Header => csv_reader.headers()?.iter().map(|name| name.to_string()).collect(),
    ColumnSchema::Fixed(columns) => columns,
  };
  let layout = resolve_layout(&columns, options)?;
  let field_names: Vec<String> = layout.value_columns.iter().map(|(_, name)| name.clone()).collect();
  // rows
  let mut rows = vec![];
  for record in csv_reader.records() {
    let record = record?;
    rows.push(parse_row(&record, &layout, &options.timestamp_format)?);
  }
  let num_loaded = rows.len();
  let mut table = SeriesTable::new(field_names, rows);
  // filter
  if let Some(value) = &options.discriminator_value {
    table = table.filter_discriminator(value);
    if table.is_empty() {
      log::warn!("no rows match discriminator {:?} (loaded {} rows)", value, num_loaded);
    }
  }
  let num_filtered = table.len();
  // warm-up
  if options.skip_rows > 0 {
    table = table.skip_rows(options.skip_rows);
  }
  log::debug!(
    "loaded = {} filtered = {} skipped = {} kept = {}",
    num_loaded,
    num_filtered,
    options.skip_rows,
    table.len()
  );
  return Ok(table);
}

pub fn load_series_from_path<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<SeriesTable> {
  let path = path.as_ref();
  let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
  let table = load_series_from_reader(file, options).with_context(|| format!("failed to load {}", path.display()))?;
  log::info!("loaded {} rows from {}", table.len(), path.display());
  return Ok(table);
}
