use std::io::Write;

use anyhow::Result;
use csv::WriterBuilder;

use crate::{charts::ChartPlan, dates, table::SeriesTable};

pub const BASELINE_COLUMN: &str = "Baseline";

/// Writes `Date,<field>...` for the plan's fields, one line per row. Nulls are empty cells.
/// Plans with a reference line get a trailing `Baseline` column holding it on every row.
pub fn write_chart_data<W: Write>(writer: W, table: &SeriesTable, plan: &ChartPlan) -> Result<()> {
  let columns = plan
    .fields
    .iter()
    .map(|field| table.series(field))
    .collect::<Result<Vec<_>>>()?;
  let mut csv_writer = WriterBuilder::new().from_writer(writer);
  // header
  let mut header = vec!["Date".to_string()];
  header.extend(plan.fields.iter().cloned());
  if plan.baseline.is_some() {
    header.push(BASELINE_COLUMN.to_string());
  }
  csv_writer.write_record(&header)?;
  // rows
  for (index, row) in table.rows.iter().enumerate() {
    let mut record = vec![dates::format_date(&row.date)];
    for column in &columns {
      let cell = match column[index] {
        Some(value) => value.to_string(),
        None => String::new(),
      };
      record.push(cell);
    }
    if let Some(baseline) = plan.baseline {
      record.push(baseline.to_string());
    }
    csv_writer.write_record(&record)?;
  }
  csv_writer.flush()?;
  return Ok(());
}
