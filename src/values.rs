/// Numeric coercion for value cells. Anything that is not a number becomes `None`.
pub fn parse_value(cell: &str) -> Option<f64> {
  let trimmed = cell.trim();
  if trimmed.is_empty() {
    return None;
  }
  let parsed = trimmed.parse::<f64>().ok()?;
  // NaN is how the upstream files spell "missing"
  if parsed.is_nan() {
    return None;
  }
  return Some(parsed);
}
