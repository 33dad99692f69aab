use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
  charts::{self, ChartPlan},
  dates::DEFAULT_TIMESTAMP_FORMAT,
  loader::LoadOptions,
  schema::{ColumnSchema, Layout, LONG_DISCRIMINATOR_COLUMN, LONG_TIMESTAMP_COLUMN},
  table::SeriesTable,
};

#[derive(Clone, Debug, PartialEq)]
pub struct ChartView {
  /// prefix of the view's output file names
  pub title: String,
  pub table: SeriesTable,
  pub plans: Vec<ChartPlan>,
}

fn default_timestamp_format() -> String {
  return DEFAULT_TIMESTAMP_FORMAT.to_string();
}

fn default_output_directory() -> String {
  return String::from(".");
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
  pub data_file: String,
  /// prefix of every output file name
  pub title: String,
  #[serde(default)]
  pub layout: Layout,
  #[serde(default = "default_timestamp_format")]
  pub timestamp_format: String,
  /// explicit column names for headerless files
  #[serde(default)]
  pub columns: Option<Vec<String>>,
  /// long layout only; without it every symbol in the file gets its own charts
  #[serde(default)]
  pub symbol: Option<String>,
  /// warm-up rows dropped from each symbol's series
  #[serde(default)]
  pub skip_rows: usize,
  #[serde(default = "default_output_directory")]
  pub output_directory: String,
}

impl Config {
  pub fn from_json(value: &str) -> Result<Config> {
    let config = serde_json::from_str(value)?;
    return Ok(config);
  }

  pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let stringified_value =
      std::fs::read_to_string(path).with_context(|| format!("failed to read config {}", path.display()))?;
    return Config::from_json(&stringified_value).with_context(|| format!("invalid config {}", path.display()));
  }

  pub fn load_options(&self) -> Result<LoadOptions> {
    let explicit_schema = self.columns.clone().map(ColumnSchema::Fixed);
    match self.layout {
      Layout::Wide => {
        if self.symbol.is_some() {
          bail!("symbol filter needs the long layout, wide files have one column per symbol");
        }
        return Ok(LoadOptions {
          schema: explicit_schema.unwrap_or(ColumnSchema::Header),
          timestamp_column: None,
          timestamp_format: self.timestamp_format.clone(),
          discriminator_column: None,
          discriminator_value: None,
          skip_rows: self.skip_rows,
        });
      }
      Layout::Long => {
        // unfiltered loads skip per symbol in chart_views
        let skip_rows = if self.symbol.is_some() { self.skip_rows } else { 0 };
        return Ok(LoadOptions {
          schema: explicit_schema.unwrap_or_else(ColumnSchema::long),
          timestamp_column: Some(LONG_TIMESTAMP_COLUMN.to_string()),
          timestamp_format: self.timestamp_format.clone(),
          discriminator_column: Some(LONG_DISCRIMINATOR_COLUMN.to_string()),
          discriminator_value: self.symbol.clone(),
          skip_rows,
        });
      }
    }
  }

  /// Splits a loaded table into the views the charts are drawn from. A long
  /// file loaded without a symbol yields one view per symbol, titled
  /// `<title> <symbol>`, each with its own warm-up skipped.
  pub fn chart_views(&self, table: &SeriesTable) -> Vec<ChartView> {
    match (self.layout, &self.symbol) {
      (Layout::Wide, _) => vec![ChartView {
        title: self.title.clone(),
        plans: charts::price_charts(&table.field_names),
        table: table.clone(),
      }],
      (Layout::Long, Some(symbol)) => vec![ChartView {
        title: self.title.clone(),
        plans: charts::analysis_charts(symbol),
        table: table.clone(),
      }],
      (Layout::Long, None) => table
        .discriminators()
        .iter()
        .map(|symbol| ChartView {
          title: format!("{} {}", self.title, symbol),
          plans: charts::analysis_charts(symbol),
          table: table.filter_discriminator(symbol).skip_rows(self.skip_rows),
        })
        .collect(),
    }
  }

  /// Where the data behind `plan` is written: the chart's file name with a `.csv` extension.
  pub fn output_path(&self, view: &ChartView, plan: &ChartPlan) -> PathBuf {
    let filename = plan.filename(&view.title);
    return Path::new(&self.output_directory).join(filename).with_extension("csv");
  }
}
