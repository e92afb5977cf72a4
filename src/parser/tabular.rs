//! BLAST tabular decoding (`-outfmt 6` and the commented `-outfmt 7`).

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use super::{insert_query, split_definition};
use crate::error::{Error, Result};
use crate::result::{Hit, Hsp, QueryResult, ResultSet};

/// Columns of the default tabular layout, in order.
const COLUMNS: [&str; 12] = [
    "qseqid", "sseqid", "pident", "length", "mismatch", "gapopen", "qstart", "qend", "sstart",
    "send", "evalue", "bitscore",
];

/// `# BLASTP 2.2.28+` program banner of a commented block.
#[allow(clippy::expect_used)]
static PROGRAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#\s*([A-Z-]*BLAST[A-Z]*)\s+(\d\S*)").expect("valid regex")
});

/// Accumulates rows into queries and hits.
#[derive(Default)]
struct Builder {
    set: ResultSet,
    current: Option<QueryResult>,
    /// Subject id to position in `current.hits`.
    hit_index: HashMap<String, usize>,
}

impl Builder {
    fn start_query(&mut self, id: String, description: String) {
        self.finish_query();
        self.hit_index.clear();
        self.current = Some(QueryResult {
            description,
            ..QueryResult::new(id)
        });
    }

    fn finish_query(&mut self) {
        if let Some(query) = self.current.take() {
            insert_query(&mut self.set, query);
        }
    }

    /// Add one row. All rows for one subject within a query block become HSPs
    /// of a single hit, whether or not they are adjacent.
    fn push_row(&mut self, query_id: &str, subject_id: &str, hsp: Hsp) {
        if self.current.as_ref().is_none_or(|q| q.id != query_id) {
            self.start_query(query_id.to_string(), String::new());
        }
        let Some(query) = self.current.as_mut() else {
            return;
        };

        match self.hit_index.get(subject_id) {
            Some(&idx) => query.hits[idx].hsps.push(hsp),
            None => {
                self.hit_index
                    .insert(subject_id.to_string(), query.hits.len());
                query.hits.push(Hit {
                    hsps: vec![hsp],
                    ..Hit::new(subject_id)
                });
            }
        }
    }

    fn finish(mut self) -> ResultSet {
        self.finish_query();
        self.set
    }
}

pub(super) fn parse(content: &str) -> Result<ResultSet> {
    let mut builder = Builder::default();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end_matches('\r');

        if line.trim().is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim();
            if let Some(query) = comment.strip_prefix("Query:") {
                let (id, description) = split_definition(query);
                builder.start_query(id, description);
            } else if comment.starts_with("BLAST processed") {
                break;
            } else if let Some(caps) = PROGRAM_RE.captures(line) {
                builder.set.program = Some(caps[1].to_string());
                builder.set.version = Some(caps[2].to_string());
            }
            continue;
        }

        let (query_id, subject_id, hsp) = parse_row(line, line_no)?;
        builder.push_row(query_id, subject_id, hsp);
    }

    Ok(builder.finish())
}

fn parse_row(line: &str, line_no: usize) -> Result<(&str, &str, Hsp)> {
    let cols: Vec<&str> = line.split('\t').map(str::trim).collect();
    if cols.len() != COLUMNS.len() {
        return Err(Error::tabular(
            line_no,
            format!("expected {} columns, found {}", COLUMNS.len(), cols.len()),
        ));
    }

    let hsp = Hsp {
        percent_identity: Some(field(&cols, 2, line_no)?),
        align_len: field(&cols, 3, line_no)?,
        mismatches: Some(field(&cols, 4, line_no)?),
        gap_opens: Some(field(&cols, 5, line_no)?),
        query_from: field(&cols, 6, line_no)?,
        query_to: field(&cols, 7, line_no)?,
        hit_from: field(&cols, 8, line_no)?,
        hit_to: field(&cols, 9, line_no)?,
        evalue: field(&cols, 10, line_no)?,
        bit_score: field(&cols, 11, line_no)?,
        ..Hsp::default()
    };

    Ok((cols[0], cols[1], hsp))
}

fn field<T: FromStr>(cols: &[&str], idx: usize, line_no: usize) -> Result<T> {
    cols[idx].parse().map_err(|_| {
        Error::tabular(
            line_no,
            format!("invalid {} value '{}'", COLUMNS[idx], cols[idx]),
        )
    })
}
