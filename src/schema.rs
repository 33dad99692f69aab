use serde::{Deserialize, Serialize};

/// Authoritative column layout of the long (per-symbol analysis) files.
pub const LONG_COLUMNS: [&str; 13] = [
  "Symbol",
  "Timestamp",
  "Close",
  "UpProbability",
  "DownProbability",
  "DisplacementEnergy",
  "FreeEnergy",
  "Temp",
  "Noise",
  "Resistance",
  "Trend",
  "ProbUp",
  "ProbDown",
];

/// Older naming of the same files. Columns 6 and 10 are mislabeled here
/// (`WrongEnergy` holds free energy, `FreeEnergy` holds resistance), so
/// loads using it are relabeled to `LONG_COLUMNS`.
pub const LEGACY_LONG_COLUMNS: [&str; 13] = [
  "Symbol",
  "Timestamp",
  "Close",
  "UpProbability",
  "DownProbability",
  "DisplacementEnergy",
  "WrongEnergy",
  "Temp",
  "Noise",
  "FreeEnergy",
  "Trend",
  "ProbUp",
  "ProbDown",
];

pub const LONG_TIMESTAMP_COLUMN: &str = "Timestamp";
pub const LONG_DISCRIMINATOR_COLUMN: &str = "Symbol";

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
  /// `Timestamp,AAPL,MSFT,...` with a header row, one row per date
  #[default]
  Wide,
  /// headerless, one row per (symbol, date)
  Long,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ColumnSchema {
  Header,
  Fixed(Vec<String>),
}

impl ColumnSchema {
  pub fn long() -> ColumnSchema {
    return ColumnSchema::Fixed(LONG_COLUMNS.iter().map(|name| name.to_string()).collect());
  }

  pub fn has_header(&self) -> bool {
    return *self == ColumnSchema::Header;
  }

  pub fn is_legacy_long(&self) -> bool {
    match self {
      ColumnSchema::Fixed(columns) => columns.iter().map(String::as_str).eq(LEGACY_LONG_COLUMNS.iter().copied()),
      ColumnSchema::Header => false,
    }
  }

  /// Same schema with the legacy long labels replaced by the authoritative ones.
  pub fn canonical(&self) -> ColumnSchema {
    if self.is_legacy_long() {
      return ColumnSchema::long();
    }
    return self.clone();
  }
}
