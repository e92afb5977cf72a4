//! Configuration options for reading result files.
//!
//! The `Options` struct controls how a result file is decoded. The defaults
//! reproduce the keys BLAST itself prints in tabular output, so that an XML
//! run and a tabular run of the same search compare query-for-query.

use crate::format::Format;

/// Configuration options for parsing BLAST result files.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use blast_accuracy::{Format, Options};
///
/// // Use defaults
/// let options = Options::default();
///
/// // Read a file with an unusual extension as XML, keeping BLAST's own ids
/// let options = Options {
///     format: Some(Format::Xml),
///     raw_ids: true,
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Force the input encoding instead of detecting it from the extension.
    ///
    /// Default: `None`
    pub format: Option<Format>,

    /// Keep XML query and hit ids exactly as BLAST wrote them.
    ///
    /// BLAST replaces ids it could not parse with generated ones
    /// (`Query_1`, `lcl|1`, `gnl|BL_ORD_ID|42`) and moves the real id to the
    /// definition line. By default the first word of the definition is used
    /// as the id in that case, which matches the `qseqid`/`sseqid` columns of
    /// tabular output.
    ///
    /// Default: `false`
    pub raw_ids: bool,
}
