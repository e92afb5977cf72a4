//! Serializing a [`ResultSet`] as BLAST tabular or BLAST XML.
//!
//! Output is built in memory and written in one go, matching the
//! load-everything model of the parser.

mod tabular;
mod xml;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::format::Format;
use crate::result::{Hsp, ResultSet};

/// Render a result set in the given format.
pub fn to_string(set: &ResultSet, format: Format) -> Result<String> {
    match format {
        Format::Tabular => Ok(tabular::render(set)),
        Format::Xml => xml::render(set),
    }
}

/// Write a result set to a file in the given format.
pub fn write_file(set: &ResultSet, format: Format, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let rendered = to_string(set, format)?;
    fs::write(path, rendered).map_err(|e| Error::io(path, e))?;

    debug!(path = %path.display(), %format, queries = set.len(), "wrote result file");
    Ok(())
}

/// Identical positions, derived from percent identity when not recorded.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn identity_count(hsp: &Hsp) -> Option<usize> {
    hsp.identity.or_else(|| {
        hsp.percent_identity
            .map(|pct| (pct * hsp.align_len as f64 / 100.0).round().max(0.0) as usize)
    })
}

/// Percent identity, derived from the identical count when not recorded.
fn percent_identity(hsp: &Hsp) -> f64 {
    match (hsp.percent_identity, hsp.identity) {
        (Some(pct), _) => pct,
        (None, Some(ident)) if hsp.align_len > 0 => ident as f64 * 100.0 / hsp.align_len as f64,
        _ => 0.0,
    }
}

/// Float formatting that `str::parse::<f64>` reads back exactly.
///
/// Very small and very large values use exponent notation (`1e-100`).
fn float(value: f64) -> String {
    format!("{value:?}")
}
