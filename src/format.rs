//! BLAST output encodings and file-extension detection.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Extensions recognized as BLAST tabular output (`-outfmt 6` / `-outfmt 7`).
const TABULAR_EXTENSIONS: &[&str] = &["txt", "tab", "tsv", "blasttab"];

/// Extensions recognized as BLAST XML output (`-outfmt 5`).
const XML_EXTENSIONS: &[&str] = &["xml"];

/// A BLAST result encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Tab-separated, 12 columns, optional `#` comment lines.
    Tabular,
    /// `BlastOutput` XML document.
    Xml,
}

impl Format {
    /// Pick the format from the file extension (case-insensitive).
    ///
    /// An unknown or missing extension is an error rather than a guess.
    ///
    /// # Examples
    ///
    /// ```
    /// use blast_accuracy::Format;
    ///
    /// assert_eq!(Format::from_path("run1.xml")?, Format::Xml);
    /// assert_eq!(Format::from_path("run1.TXT")?, Format::Tabular);
    /// assert!(Format::from_path("run1.fasta").is_err());
    /// # Ok::<(), blast_accuracy::Error>(())
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if XML_EXTENSIONS.contains(&ext.as_str()) {
            Ok(Self::Xml)
        } else if TABULAR_EXTENSIONS.contains(&ext.as_str()) {
            Ok(Self::Tabular)
        } else {
            Err(Error::UnsupportedFormat(path.to_path_buf()))
        }
    }

    /// Canonical file extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Tabular => "txt",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tabular => f.write_str("blast-tab"),
            Self::Xml => f.write_str("blast-xml"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blast-tab" | "tab" | "tabular" => Ok(Self::Tabular),
            "blast-xml" | "xml" => Ok(Self::Xml),
            other => Err(format!("unknown format '{other}' (expected blast-tab or blast-xml)")),
        }
    }
}
