use std::collections::HashMap;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use ordered_float::OrderedFloat;

#[derive(Clone, Debug, PartialEq)]
pub struct Row {
  pub date: NaiveDate,
  pub discriminator: Option<String>,
  pub fields: HashMap<String, Option<f64>>,
}

impl Row {
  /// `None` for both a null cell and a field the row doesn't carry.
  pub fn value(&self, field: &str) -> Option<f64> {
    return self.fields.get(field).copied().flatten();
  }
}

/// Rows in file order. Never sorted or deduplicated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesTable {
  pub field_names: Vec<String>,
  pub rows: Vec<Row>,
}

impl SeriesTable {
  pub fn new(field_names: Vec<String>, rows: Vec<Row>) -> SeriesTable {
    return SeriesTable { field_names, rows };
  }

  pub fn len(&self) -> usize {
    return self.rows.len();
  }

  pub fn is_empty(&self) -> bool {
    return self.rows.is_empty();
  }

  pub fn has_field(&self, field: &str) -> bool {
    return self.field_names.iter().any(|name| name == field);
  }

  pub fn filter_discriminator(&self, value: &str) -> SeriesTable {
    let rows = self
      .rows
      .iter()
      .filter(|row| row.discriminator.as_deref() == Some(value))
      .cloned()
      .collect();
    return SeriesTable::new(self.field_names.clone(), rows);
  }

  /// Drops the warm-up period: the suffix starting at row `count`.
  pub fn skip_rows(&self, count: usize) -> SeriesTable {
    let rows = self.rows.iter().skip(count).cloned().collect();
    return SeriesTable::new(self.field_names.clone(), rows);
  }

  pub fn dates(&self) -> Vec<NaiveDate> {
    return self.rows.iter().map(|row| row.date).collect();
  }

  pub fn series(&self, field: &str) -> Result<Vec<Option<f64>>> {
    if !self.has_field(field) {
      bail!("unknown field {:?}, table has {:?}", field, self.field_names);
    }
    return Ok(self.rows.iter().map(|row| row.value(field)).collect());
  }

  pub fn first_date(&self) -> Result<NaiveDate> {
    match self.rows.first() {
      Some(row) => Ok(row.date),
      None => bail!("first date requested from an empty table"),
    }
  }

  pub fn last_date(&self) -> Result<NaiveDate> {
    match self.rows.last() {
      Some(row) => Ok(row.date),
      None => bail!("last date requested from an empty table"),
    }
  }

  pub fn date_range(&self) -> Result<(NaiveDate, NaiveDate)> {
    return Ok((self.first_date()?, self.last_date()?));
  }

  /// Min and max over the non-null values of `field`, `None` if every value is null.
  pub fn value_range(&self, field: &str) -> Result<Option<(f64, f64)>> {
    let values = self.series(field)?;
    let present = values.iter().flatten().map(|value| OrderedFloat(*value));
    let min = present.clone().min();
    let max = present.max();
    match (min, max) {
      (Some(min), Some(max)) => Ok(Some((min.into_inner(), max.into_inner()))),
      _ => Ok(None),
    }
  }

  /// Distinct discriminator values in first-seen order.
  pub fn discriminators(&self) -> Vec<String> {
    let mut results: Vec<String> = vec![];
    for row in &self.rows {
      let Some(discriminator) = &row.discriminator else {
        continue;
      };
      if !results.contains(discriminator) {
        results.push(discriminator.clone());
      }
    }
    return results;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(day: u32, symbol: &str, close: Option<f64>) -> Row {
    let mut fields = HashMap::new();
    fields.insert("Close".to_string(), close);
    return Row {
      date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
      discriminator: Some(symbol.to_string()),
      fields,
    };
  }

  fn sample() -> SeriesTable {
    return SeriesTable::new(
      vec!["Close".to_string()],
      vec![
        row(3, "TSLA", Some(10.0)),
        row(3, "AAPL", Some(200.0)),
        row(4, "TSLA", None),
        row(5, "TSLA", Some(12.5)),
        row(5, "AAPL", Some(198.0)),
      ],
    );
  }

  #[test]
  fn filter_keeps_matching_rows_in_order() {
    let tsla = sample().filter_discriminator("TSLA");
    assert_eq!(tsla.len(), 3);
    assert!(tsla.rows.iter().all(|row| row.discriminator.as_deref() == Some("TSLA")));
    assert_eq!(tsla.dates(), vec![
      NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
      NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
      NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
    ]);
  }

  #[test]
  fn filter_with_no_match_is_empty() {
    assert!(sample().filter_discriminator("MSFT").is_empty());
  }

  #[test]
  fn skip_returns_suffix() {
    let table = sample();
    for count in 0..8 {
      let skipped = table.skip_rows(count);
      assert_eq!(skipped.len(), table.len().saturating_sub(count));
      assert_eq!(skipped.rows[..], table.rows[count.min(table.len())..]);
    }
  }

  #[test]
  fn series_keeps_nulls_in_place() {
    let tsla = sample().filter_discriminator("TSLA");
    assert_eq!(tsla.series("Close").unwrap(), vec![Some(10.0), None, Some(12.5)]);
  }

  #[test]
  fn series_rejects_unknown_field() {
    assert!(sample().series("Open").is_err());
  }

  #[test]
  fn date_range_of_table() {
    let (first, last) = sample().date_range().unwrap();
    assert_eq!(first, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
    assert_eq!(last, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
  }

  #[test]
  fn empty_table_fails_loudly() {
    let empty = sample().filter_discriminator("MSFT");
    assert!(empty.first_date().is_err());
    assert!(empty.last_date().is_err());
    assert!(empty.date_range().is_err());
  }

  #[test]
  fn value_range_ignores_nulls() {
    assert_eq!(sample().value_range("Close").unwrap(), Some((10.0, 200.0)));
    let nulls = SeriesTable::new(vec!["Close".to_string()], vec![row(3, "TSLA", None)]);
    assert_eq!(nulls.value_range("Close").unwrap(), None);
  }

  #[test]
  fn discriminators_in_first_seen_order() {
    assert_eq!(sample().discriminators(), vec!["TSLA".to_string(), "AAPL".to_string()]);
  }
}
