//! Conversion between BLAST tabular and BLAST XML files.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::format::Format;
use crate::options::Options;
use crate::parser;
use crate::writer;

/// Read `input` as `input_format` and write it to `output` as `output_format`.
///
/// # Example
///
/// ```no_run
/// use blast_accuracy::{convert, Format};
///
/// convert("hits.txt", Format::Tabular, "hits.xml", Format::Xml)?;
/// # Ok::<(), blast_accuracy::Error>(())
/// ```
pub fn convert(
    input: impl AsRef<Path>,
    input_format: Format,
    output: impl AsRef<Path>,
    output_format: Format,
) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let options = Options {
        format: Some(input_format),
        ..Options::default()
    };
    let set = parser::parse_with_options(input, &options)?;
    writer::write_file(&set, output_format, output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        queries = set.len(),
        "converted {input_format} to {output_format}"
    );
    Ok(())
}

/// Output path used when none is given: the input with its extension replaced by `xml`.
///
/// ```
/// use std::path::Path;
/// use blast_accuracy::default_output_path;
///
/// assert_eq!(default_output_path("runs/q.v2.txt"), Path::new("runs/q.v2.xml"));
/// assert_eq!(default_output_path("hits"), Path::new("hits.xml"));
/// ```
#[must_use]
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    output_path_for(input, Format::Xml)
}

/// Output path for writing `input` as `format`: the input with its extension
/// replaced by that format's canonical one.
///
/// ```
/// use std::path::Path;
/// use blast_accuracy::{output_path_for, Format};
///
/// assert_eq!(output_path_for("hits.xml", Format::Tabular), Path::new("hits.txt"));
/// ```
#[must_use]
pub fn output_path_for(input: impl AsRef<Path>, format: Format) -> PathBuf {
    input.as_ref().with_extension(format.extension())
}
