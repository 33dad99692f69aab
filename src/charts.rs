//! The fixed chart set the portfolio reports are built from. Only which
//! fields feed which chart lives here; drawing is left to the consumer.

pub const PRICES_SUFFIX: &str = "_prices.png";
pub const PROBABILITIES_SUFFIX: &str = "_probabilities_with_baseline.png";
pub const DISPLACEMENT_ENERGY_SUFFIX: &str = "_displacement_energy_with_baseline.png";
pub const TEMP_FREE_ENERGY_SUFFIX: &str = "_temp_free_energy.png";

#[derive(Clone, Debug, PartialEq)]
pub struct ChartPlan {
  pub heading: String,
  pub fields: Vec<String>,
  /// horizontal reference line, e.g. 0.5 for probabilities
  pub baseline: Option<f64>,
  pub suffix: String,
}

impl ChartPlan {
  pub fn filename(&self, title: &str) -> String {
    return chart_filename(title, &self.suffix);
  }
}

/// `My Portfolio` + `_prices.png` -> `My_Portfolio_prices.png`
pub fn chart_filename(title: &str, suffix: &str) -> String {
  return format!("{}{}", title.replace(' ', "_"), suffix);
}

fn plan(heading: String, fields: &[&str], baseline: Option<f64>, suffix: &str) -> ChartPlan {
  return ChartPlan {
    heading,
    fields: fields.iter().map(|field| field.to_string()).collect(),
    baseline,
    suffix: suffix.to_string(),
  };
}

/// One chart with every series of a wide file.
pub fn price_charts(symbols: &[String]) -> Vec<ChartPlan> {
  return vec![ChartPlan {
    heading: "Stock Closing Prices Over Time".to_string(),
    fields: symbols.to_vec(),
    baseline: None,
    suffix: PRICES_SUFFIX.to_string(),
  }];
}

/// Per-symbol charts over the long analysis columns.
pub fn analysis_charts(symbol: &str) -> Vec<ChartPlan> {
  return vec![
    plan(
      format!("{} Up and Down Probabilities Over Time", symbol),
      &["UpProbability", "DownProbability"],
      Some(0.5),
      PROBABILITIES_SUFFIX,
    ),
    plan(
      format!("{} Displacement Energy Over Time", symbol),
      &["DisplacementEnergy"],
      Some(0.0),
      DISPLACEMENT_ENERGY_SUFFIX,
    ),
    plan(
      format!("{} Temperature and Free Energy Over Time", symbol),
      &["Temp", "FreeEnergy"],
      None,
      TEMP_FREE_ENERGY_SUFFIX,
    ),
  ];
}
