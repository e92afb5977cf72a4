//! In-memory model of BLAST search results.
//!
//! A [`ResultSet`] holds one [`QueryResult`] per query identifier. Each query
//! owns an ordered list of [`Hit`]s, and each hit one or more [`Hsp`]s. The
//! comparison engine only looks at the number of hits per query; the remaining
//! fields exist so that conversion between formats is lossless where the
//! formats allow it.

use std::collections::HashMap;

/// One high-scoring segment pair of an alignment.
///
/// Fields that one of the two BLAST encodings does not carry are optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hsp {
    /// Bit score.
    pub bit_score: f64,
    /// Raw alignment score (XML only).
    pub score: Option<f64>,
    /// Expectation value.
    pub evalue: f64,
    /// Percentage of identical positions (tabular `pident`).
    pub percent_identity: Option<f64>,
    /// Number of identical positions (XML `Hsp_identity`).
    pub identity: Option<usize>,
    /// Number of positive-scoring positions (XML only).
    pub positive: Option<usize>,
    /// Alignment length.
    pub align_len: usize,
    /// Number of mismatches (tabular only).
    pub mismatches: Option<usize>,
    /// Number of gap openings (tabular only).
    pub gap_opens: Option<usize>,
    /// Total number of gap positions (XML only).
    pub gaps: Option<usize>,
    /// Start of the alignment on the query (1-based).
    pub query_from: usize,
    /// End of the alignment on the query.
    pub query_to: usize,
    /// Start of the alignment on the subject (1-based).
    pub hit_from: usize,
    /// End of the alignment on the subject.
    pub hit_to: usize,
    /// Aligned query sequence.
    pub query_seq: Option<String>,
    /// Aligned subject sequence.
    pub hit_seq: Option<String>,
    /// Midline between the aligned sequences.
    pub midline: Option<String>,
}

/// One database sequence matched by a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hit {
    /// Subject sequence identifier.
    pub id: String,
    /// Subject description (XML `Hit_def`).
    pub description: String,
    /// Subject accession.
    pub accession: Option<String>,
    /// Subject sequence length.
    pub len: Option<usize>,
    /// Aligned segments, in file order.
    pub hsps: Vec<Hsp>,
}

impl Hit {
    /// Create a hit with no HSPs.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// All hits reported for a single query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Query identifier.
    pub id: String,
    /// Query description.
    pub description: String,
    /// Query sequence length.
    pub len: Option<usize>,
    /// Hits in file order.
    pub hits: Vec<Hit>,
}

impl QueryResult {
    /// Create a query with no hits.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Number of hits reported for this query.
    #[must_use]
    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }
}

/// Search results keyed by query identifier.
///
/// Iteration follows the order in which each query id was first inserted.
/// Inserting a query id that is already present replaces the earlier result
/// in place (last write wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// Search program named in the file header (e.g. `BLASTP`).
    pub program: Option<String>,
    /// Program version named in the file header.
    pub version: Option<String>,
    queries: Vec<QueryResult>,
    index: HashMap<String, usize>,
}

impl ResultSet {
    /// Create an empty result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a query result, returning the one it replaced, if any.
    pub fn insert(&mut self, query: QueryResult) -> Option<QueryResult> {
        if let Some(&slot) = self.index.get(&query.id) {
            return Some(std::mem::replace(&mut self.queries[slot], query));
        }
        self.index.insert(query.id.clone(), self.queries.len());
        self.queries.push(query);
        None
    }

    /// Look up a query by identifier.
    #[must_use]
    pub fn get(&self, query_id: &str) -> Option<&QueryResult> {
        self.index.get(query_id).map(|&slot| &self.queries[slot])
    }

    /// Whether the query identifier is present.
    #[must_use]
    pub fn contains(&self, query_id: &str) -> bool {
        self.index.contains_key(query_id)
    }

    /// Number of hits for a query, or `None` if the query is absent.
    #[must_use]
    pub fn hit_count(&self, query_id: &str) -> Option<usize> {
        self.get(query_id).map(QueryResult::hit_count)
    }

    /// Number of queries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Whether the set holds no queries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Iterate over queries in first-insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, QueryResult> {
        self.queries.iter()
    }

    /// Iterate over query identifiers in first-insertion order.
    pub fn query_ids(&self) -> impl Iterator<Item = &str> {
        self.queries.iter().map(|q| q.id.as_str())
    }
}

impl FromIterator<QueryResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = QueryResult>>(iter: I) -> Self {
        let mut set = Self::new();
        for query in iter {
            set.insert(query);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a QueryResult;
    type IntoIter = std::slice::Iter<'a, QueryResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
