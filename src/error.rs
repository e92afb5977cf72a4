//! Error types for blast-accuracy.
//!
//! Every failure, whether it comes from reading a result file or from
//! comparing two result sets, is reported through the single [`Error`] enum.

use std::path::PathBuf;

/// Error type for parsing, comparison and conversion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file extension does not name a known BLAST output format.
    #[error("Unsupported result format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The gold standard and the candidate share no query identifiers.
    #[error("No overlap: the result sets share no query identifiers")]
    NoOverlap,

    /// A candidate reports more hits for a query than the gold standard.
    #[error("Candidate exceeds gold standard for query {query_id}: {candidate} hits vs {gold}")]
    CandidateExceedsGold {
        /// Offending query.
        query_id: String,
        /// Hits reported by the gold standard.
        gold: usize,
        /// Hits reported by the candidate.
        candidate: usize,
    },

    /// The shared queries have no gold-standard hits, so accuracy is undefined.
    #[error("Empty gold standard: the shared queries have no gold-standard hits, accuracy is undefined")]
    EmptyGoldStandard,

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A tabular row could not be decoded.
    #[error("Tabular parse error at line {line}: {message}")]
    Tabular {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the row.
        message: String,
    },

    /// An XML document could not be read or written.
    #[error("XML error: {0}")]
    Xml(String),

    /// A report could not be serialized as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn tabular(line: usize, message: impl Into<String>) -> Self {
        Self::Tabular {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for blast-accuracy operations.
pub type Result<T> = std::result::Result<T, Error>;
