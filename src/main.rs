use std::fs::File;

use anyhow::{Context, Result};
use portfolio_series::{config::Config, dates, export, loader};

fn main() -> Result<()> {
  // logger
  simple_logger::SimpleLogger::new().with_level(log::LevelFilter::Info).env().init()?;
  // config
  let config_filename = std::env::args().nth(1).context("usage: portfolio_series <config.json>")?;
  let config = Config::load(&config_filename)?;
  // load table
  let options = config.load_options()?;
  let table = loader::load_series_from_path(&config.data_file, &options)?;
  // write the data behind each chart
  for view in config.chart_views(&table) {
    let (first_date, last_date) = view.table.date_range().with_context(|| format!("no rows for {:?}", view.title))?;
    log::info!(
      "{}: {} rows from {} to {}",
      view.title,
      view.table.len(),
      dates::format_date(&first_date),
      dates::format_date(&last_date)
    );
    for plan in &view.plans {
      for field in &plan.fields {
        if let Some((min, max)) = view.table.value_range(field)? {
          log::info!("{} {} range = [{}, {}]", view.title, field, min, max);
        } else {
          log::warn!("{} {} has no values", view.title, field);
        }
      }
      let output_path = config.output_path(&view, plan);
      let file = File::create(&output_path).with_context(|| format!("failed to create {}", output_path.display()))?;
      export::write_chart_data(file, &view.table, plan).with_context(|| format!("failed to write {}", output_path.display()))?;
      log::info!("wrote {:?} to {}", plan.heading, output_path.display());
    }
  }
  return Ok(());
}
