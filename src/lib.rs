//! # blast-accuracy
//!
//! Measure how closely one set of BLAST search results reproduces another.
//!
//! A *gold standard* result file (typically from an exhaustive search) and a
//! *candidate* result file (from a faster or approximate search over the same
//! queries) are loaded into [`ResultSet`]s and compared query by query. The
//! [`AccuracyReport`] says how many gold-standard hits the candidate missed.
//!
//! ## Quick Start
//!
//! ```no_run
//! use blast_accuracy::compare_files;
//!
//! let report = compare_files("gold.xml", "fast.txt")?;
//! println!("{report}");
//! # Ok::<(), blast_accuracy::Error>(())
//! ```
//!
//! ## Accuracy model
//!
//! - Only queries present in both files are compared; the rest are ignored.
//! - A query's misses are `gold hits - candidate hits`. A candidate with more
//!   hits than the gold standard for any query is an error, not a bonus.
//! - A query counts towards "greater than 90% of hits" when at most 10% of
//!   its gold hits are missed (exactly 10% counts), likewise for 80%.
//!
//! ## Formats
//!
//! BLAST tabular (`-outfmt 6`/`7`, extensions `.txt`, `.tab`, `.tsv`,
//! `.blasttab`) and BLAST XML (`-outfmt 5`, extension `.xml`) are read and
//! written; [`convert`] turns one into the other.

mod compare;
mod convert;
mod error;
mod format;
mod options;
mod report;
mod result;

/// Reading result files.
pub mod parser;

/// Writing result files.
pub mod writer;

/// Log setup for the binaries.
pub mod logging;

use std::path::Path;

// Public API - re-exports
pub use compare::{compare, outcomes, AccuracyReport, PerQueryOutcome};
pub use convert::{convert, default_output_path, output_path_for};
pub use error::{Error, Result};
pub use format::Format;
pub use options::Options;
pub use parser::{parse, parse_str, parse_with_options};
pub use result::{Hit, Hsp, QueryResult, ResultSet};

/// Parses both files with default options and compares them.
///
/// # Arguments
///
/// * `gold` - Path of the gold-standard result file
/// * `candidate` - Path of the result file being evaluated
///
/// # Returns
///
/// Returns `Ok(AccuracyReport)` on success. Returns an `Error` if either file
/// cannot be read or parsed, or if the comparison itself is undefined (no
/// shared queries, no gold hits) or invalid (candidate exceeds gold).
pub fn compare_files(gold: impl AsRef<Path>, candidate: impl AsRef<Path>) -> Result<AccuracyReport> {
    compare_files_with_options(gold, candidate, &Options::default())
}

/// Parses both files with custom options and compares them.
///
/// The same options apply to both files, so a forced format only makes sense
/// when the two files share an encoding.
pub fn compare_files_with_options(
    gold: impl AsRef<Path>,
    candidate: impl AsRef<Path>,
    options: &Options,
) -> Result<AccuracyReport> {
    let gold = parse_with_options(gold, options)?;
    let candidate = parse_with_options(candidate, options)?;
    compare(&gold, &candidate)
}
