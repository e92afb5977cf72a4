//! BLAST tabular output (`-outfmt 6`), one row per HSP.

use super::{float, identity_count, percent_identity};
use crate::result::{Hsp, ResultSet};

pub(super) fn render(set: &ResultSet) -> String {
    let mut out = String::new();

    for query in set {
        for hit in &query.hits {
            for hsp in &hit.hsps {
                out.push_str(&format!(
                    "{}\t{}\t{:.2}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
                    query.id,
                    hit.id,
                    percent_identity(hsp),
                    hsp.align_len,
                    mismatches(hsp),
                    gap_opens(hsp),
                    hsp.query_from,
                    hsp.query_to,
                    hsp.hit_from,
                    hsp.hit_to,
                    float(hsp.evalue),
                    float(hsp.bit_score),
                ));
            }
        }
    }

    out
}

fn mismatches(hsp: &Hsp) -> usize {
    hsp.mismatches.unwrap_or_else(|| {
        identity_count(hsp).map_or(0, |ident| {
            hsp.align_len
                .saturating_sub(ident)
                .saturating_sub(hsp.gaps.unwrap_or(0))
        })
    })
}

/// Gap openings, counted as runs of `-` in the aligned sequences when not recorded.
fn gap_opens(hsp: &Hsp) -> usize {
    hsp.gap_opens.unwrap_or_else(|| {
        [&hsp.query_seq, &hsp.hit_seq]
            .into_iter()
            .flatten()
            .map(|seq| gap_runs(seq))
            .sum()
    })
}

fn gap_runs(seq: &str) -> usize {
    let mut runs = 0;
    let mut in_gap = false;
    for c in seq.chars() {
        let gap = c == '-';
        if gap && !in_gap {
            runs += 1;
        }
        in_gap = gap;
    }
    runs
}
