use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%m/%d/%y";

/// Strict parse of a calendar date. Anything that does not match `format` exactly is an error.
pub fn parse_date(value: &str, format: &str) -> Result<NaiveDate> {
  // chrono skips whitespace ahead of numeric fields
  if value.trim() != value && format.trim() == format {
    bail!("timestamp {:?} has surrounding whitespace, format is {:?}", value, format);
  }
  let parsed = NaiveDate::parse_from_str(value, format)
    .with_context(|| format!("timestamp {:?} does not match format {:?}", value, format))?;
  return Ok(parsed);
}

pub fn format_date(date: &NaiveDate) -> String {
  return date.format("%Y-%m-%d").to_string();
}
