//! Accuracy of a candidate result set measured against a gold standard.
//!
//! Only queries present in both result sets are compared. For each shared
//! query the number of gold-standard hits the candidate failed to report is
//! taken as the count difference; the per-query figures are then summed into
//! an [`AccuracyReport`].
//!
//! Contributions of different queries are independent and additive, so the
//! report does not depend on the order queries appear in either file.

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::result::ResultSet;

/// Figures for one query present in both result sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerQueryOutcome {
    /// Query identifier.
    pub query_id: String,
    /// Hits in the gold standard.
    pub gold_hits: usize,
    /// Hits in the candidate.
    pub candidate_hits: usize,
    /// Gold-standard hits the candidate is missing.
    pub misses: usize,
}

impl PerQueryOutcome {
    /// Build the outcome, rejecting a candidate with more hits than gold.
    pub fn new(query_id: impl Into<String>, gold_hits: usize, candidate_hits: usize) -> Result<Self> {
        let query_id = query_id.into();
        let Some(misses) = gold_hits.checked_sub(candidate_hits) else {
            return Err(Error::CandidateExceedsGold {
                query_id,
                gold: gold_hits,
                candidate: candidate_hits,
            });
        };
        Ok(Self {
            query_id,
            gold_hits,
            candidate_hits,
            misses,
        })
    }

    /// Fraction of gold hits missed; `0.0` when gold has no hits.
    #[must_use]
    pub fn miss_fraction(&self) -> f64 {
        if self.gold_hits == 0 {
            0.0
        } else {
            self.misses as f64 / self.gold_hits as f64
        }
    }

    /// No gold hit was missed.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.misses == 0
    }

    /// At most 10% of gold hits missed (exactly 10% passes).
    #[must_use]
    pub fn retains_90_pct(&self) -> bool {
        self.misses * 10 <= self.gold_hits
    }

    /// At most 20% of gold hits missed (exactly 20% passes).
    #[must_use]
    pub fn retains_80_pct(&self) -> bool {
        self.misses * 5 <= self.gold_hits
    }
}

/// Aggregate accuracy of a candidate against a gold standard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccuracyReport {
    /// Queries present in both result sets.
    pub queries: usize,
    /// Gold hits missing from the candidate, over all shared queries.
    pub misses: usize,
    /// Gold hits over all shared queries.
    pub total_gold_hits: usize,
    /// `1 - misses / total_gold_hits`.
    pub overall_accuracy: f64,
    /// Queries with no missed hit.
    pub perfect_queries: usize,
    /// Queries missing at most 10% of their gold hits.
    pub queries_above_90_pct: usize,
    /// Queries missing at most 20% of their gold hits.
    pub queries_above_80_pct: usize,
}

impl AccuracyReport {
    /// Sum per-query outcomes into a report.
    ///
    /// Fails with [`Error::NoOverlap`] when there are no outcomes and with
    /// [`Error::EmptyGoldStandard`] when they hold no gold hits at all.
    pub fn from_outcomes(outcomes: &[PerQueryOutcome]) -> Result<Self> {
        if outcomes.is_empty() {
            return Err(Error::NoOverlap);
        }

        let mut report = Self {
            queries: outcomes.len(),
            misses: 0,
            total_gold_hits: 0,
            overall_accuracy: 0.0,
            perfect_queries: 0,
            queries_above_90_pct: 0,
            queries_above_80_pct: 0,
        };

        for outcome in outcomes {
            report.total_gold_hits += outcome.gold_hits;
            report.misses += outcome.misses;
            report.perfect_queries += usize::from(outcome.is_perfect());
            report.queries_above_90_pct += usize::from(outcome.retains_90_pct());
            report.queries_above_80_pct += usize::from(outcome.retains_80_pct());
        }

        if report.total_gold_hits == 0 {
            return Err(Error::EmptyGoldStandard);
        }
        report.overall_accuracy = 1.0 - report.misses as f64 / report.total_gold_hits as f64;

        Ok(report)
    }
}

/// Per-query outcomes for the queries shared by both result sets, sorted by id.
///
/// Queries found in only one of the sets are left out.
pub fn outcomes(gold: &ResultSet, candidate: &ResultSet) -> Result<Vec<PerQueryOutcome>> {
    let mut scope: Vec<&str> = gold
        .query_ids()
        .filter(|id| candidate.contains(id))
        .collect();
    scope.sort_unstable();

    debug!(
        shared = scope.len(),
        gold_only = gold.len() - scope.len(),
        candidate_only = candidate.len() - scope.len(),
        "computed comparison scope"
    );

    if scope.is_empty() {
        return Err(Error::NoOverlap);
    }

    scope
        .into_iter()
        .map(|id| {
            let gold_hits = gold.hit_count(id).unwrap_or_default();
            let candidate_hits = candidate.hit_count(id).unwrap_or_default();
            PerQueryOutcome::new(id, gold_hits, candidate_hits)
        })
        .collect()
}

/// Compare a candidate result set against a gold standard.
///
/// # Example
///
/// ```
/// use blast_accuracy::{compare, Hit, QueryResult, ResultSet};
///
/// fn query(id: &str, hits: usize) -> QueryResult {
///     QueryResult {
///         hits: (0..hits).map(|i| Hit::new(format!("s{i}"))).collect(),
///         ..QueryResult::new(id)
///     }
/// }
///
/// let gold: ResultSet = [query("Q1", 10), query("Q2", 4)].into_iter().collect();
/// let candidate: ResultSet = [query("Q1", 9), query("Q2", 4)].into_iter().collect();
///
/// let report = compare(&gold, &candidate)?;
/// assert_eq!(report.misses, 1);
/// assert_eq!(report.total_gold_hits, 14);
/// assert_eq!(report.queries_above_90_pct, 2);
/// # Ok::<(), blast_accuracy::Error>(())
/// ```
pub fn compare(gold: &ResultSet, candidate: &ResultSet) -> Result<AccuracyReport> {
    let outcomes = outcomes(gold, candidate)?;
    AccuracyReport::from_outcomes(&outcomes)
}
