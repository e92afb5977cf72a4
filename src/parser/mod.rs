//! Reading BLAST result files into a [`ResultSet`].
//!
//! Two encodings are supported: tabular (`-outfmt 6`, or `-outfmt 7` with
//! comment lines) and XML (`-outfmt 5`). The encoding is picked from the file
//! extension unless [`Options::format`] forces one.

mod tabular;
mod xml;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::format::Format;
use crate::options::Options;
use crate::result::{QueryResult, ResultSet};

/// Parse a result file with default options.
///
/// # Example
///
/// ```no_run
/// let gold = blast_accuracy::parse("gold.xml")?;
/// println!("{} queries", gold.len());
/// # Ok::<(), blast_accuracy::Error>(())
/// ```
pub fn parse(path: impl AsRef<Path>) -> Result<ResultSet> {
    parse_with_options(path, &Options::default())
}

/// Parse a result file with custom options.
///
/// The format is resolved before the file is opened, so an unsupported
/// extension is reported even when the file does not exist.
pub fn parse_with_options(path: impl AsRef<Path>, options: &Options) -> Result<ResultSet> {
    let path = path.as_ref();
    let format = match options.format {
        Some(format) => format,
        None => Format::from_path(path)?,
    };

    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let set = parse_str(&content, format, options)?;

    debug!(
        path = %path.display(),
        %format,
        queries = set.len(),
        "parsed result file"
    );
    Ok(set)
}

/// Parse result data already held in memory.
///
/// # Example
///
/// ```
/// use blast_accuracy::{parse_str, Format, Options};
///
/// let tab = "q1\ts1\t100.0\t50\t0\t0\t1\t50\t1\t50\t1e-20\t99.5\n";
/// let set = parse_str(tab, Format::Tabular, &Options::default())?;
/// assert_eq!(set.hit_count("q1"), Some(1));
/// # Ok::<(), blast_accuracy::Error>(())
/// ```
pub fn parse_str(content: &str, format: Format, options: &Options) -> Result<ResultSet> {
    match format {
        Format::Tabular => tabular::parse(content),
        Format::Xml => xml::parse(content, options),
    }
}

/// Insert a finished query, logging when it overwrites an earlier one.
fn insert_query(set: &mut ResultSet, query: QueryResult) {
    let id = query.id.clone();
    if let Some(previous) = set.insert(query) {
        tracing::warn!(
            query_id = %id,
            dropped_hits = previous.hit_count(),
            "query id repeated in result file, keeping the later occurrence"
        );
    }
}

/// Split a FASTA-style definition line into its first word and the rest.
fn split_definition(definition: &str) -> (String, String) {
    let definition = definition.trim();
    match definition.split_once(char::is_whitespace) {
        Some((id, rest)) => (id.to_string(), rest.trim_start().to_string()),
        None => (definition.to_string(), String::new()),
    }
}
