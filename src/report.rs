//! Rendering an [`AccuracyReport`] for people and for scripts.

use std::fmt;

use crate::compare::AccuracyReport;
use crate::error::Result;

impl fmt::Display for AccuracyReport {
    /// Fixed-order text report, one `Label: value` line per field.
    ///
    /// Accuracy is printed as the shortest decimal that round-trips, always
    /// with a fractional part (`1.0`, `0.9285714285714286`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Queries: {}", self.queries)?;
        writeln!(f, "Misses: {}", self.misses)?;
        writeln!(f, "Total hits in gold-standard: {}", self.total_gold_hits)?;
        writeln!(f, "Overall accuracy: {:?}", self.overall_accuracy)?;
        writeln!(f, "Queries with perfect accuracy: {}", self.perfect_queries)?;
        writeln!(
            f,
            "Queries with greater than 90% of hits: {}",
            self.queries_above_90_pct
        )?;
        write!(
            f,
            "Queries with greater than 80% of hits: {}",
            self.queries_above_80_pct
        )
    }
}

impl AccuracyReport {
    /// Pretty-printed JSON object with the same fields as the text report.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
