//! BLAST XML output (`-outfmt 5`).

use std::fmt::Display;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{float, identity_count};
use crate::error::{Error, Result};
use crate::result::{Hit, Hsp, QueryResult, ResultSet};

const DOCTYPE: &str = r#"BlastOutput PUBLIC "-//NCBI//NCBI BlastOutput/EN" "http://www.ncbi.nlm.nih.gov/dtd/NCBI_BlastOutput.dtd""#;

/// Thin wrapper mapping every writer failure to [`Error::Xml`].
struct XmlOut {
    inner: Writer<Vec<u8>>,
}

impl XmlOut {
    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.inner
            .write_event(event)
            .map_err(|e| Error::Xml(format!("failed to write XML: {e}")))
    }

    fn start(&mut self, name: &str) -> Result<()> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    /// `<name>value</name>`, text escaped.
    fn element(&mut self, name: &str, value: impl Display) -> Result<()> {
        self.start(name)?;
        self.event(Event::Text(BytesText::new(&value.to_string())))?;
        self.end(name)
    }

    fn optional(&mut self, name: &str, value: Option<impl Display>) -> Result<()> {
        match value {
            Some(value) => self.element(name, value),
            None => Ok(()),
        }
    }
}

pub(super) fn render(set: &ResultSet) -> Result<String> {
    let mut out = XmlOut {
        inner: Writer::new_with_indent(Vec::new(), b' ', 2),
    };

    out.event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
    out.event(Event::DocType(BytesText::from_escaped(DOCTYPE)))?;

    out.start("BlastOutput")?;
    let program = set
        .program
        .as_deref()
        .map_or_else(|| "blast".to_string(), str::to_ascii_lowercase);
    out.element("BlastOutput_program", program)?;
    out.optional("BlastOutput_version", set.version.as_deref())?;

    out.start("BlastOutput_iterations")?;
    for (idx, query) in set.iter().enumerate() {
        write_iteration(&mut out, idx + 1, query)?;
    }
    out.end("BlastOutput_iterations")?;
    out.end("BlastOutput")?;

    let mut bytes = out.inner.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| Error::Xml(format!("writer produced invalid UTF-8: {e}")))
}

fn write_iteration(out: &mut XmlOut, num: usize, query: &QueryResult) -> Result<()> {
    out.start("Iteration")?;
    out.element("Iteration_iter-num", num)?;
    out.element("Iteration_query-ID", &query.id)?;
    out.element("Iteration_query-def", &query.description)?;
    out.optional("Iteration_query-len", query.len)?;

    out.start("Iteration_hits")?;
    for (idx, hit) in query.hits.iter().enumerate() {
        write_hit(out, idx + 1, hit)?;
    }
    out.end("Iteration_hits")?;

    if query.hits.is_empty() {
        out.element("Iteration_message", "No hits found")?;
    }
    out.end("Iteration")
}

fn write_hit(out: &mut XmlOut, num: usize, hit: &Hit) -> Result<()> {
    out.start("Hit")?;
    out.element("Hit_num", num)?;
    out.element("Hit_id", &hit.id)?;
    out.element("Hit_def", &hit.description)?;
    out.optional("Hit_accession", hit.accession.as_deref())?;
    out.optional("Hit_len", hit.len)?;

    out.start("Hit_hsps")?;
    for (idx, hsp) in hit.hsps.iter().enumerate() {
        write_hsp(out, idx + 1, hsp)?;
    }
    out.end("Hit_hsps")?;
    out.end("Hit")
}

fn write_hsp(out: &mut XmlOut, num: usize, hsp: &Hsp) -> Result<()> {
    out.start("Hsp")?;
    out.element("Hsp_num", num)?;
    out.element("Hsp_bit-score", float(hsp.bit_score))?;
    out.optional("Hsp_score", hsp.score.map(float))?;
    out.element("Hsp_evalue", float(hsp.evalue))?;
    out.element("Hsp_query-from", hsp.query_from)?;
    out.element("Hsp_query-to", hsp.query_to)?;
    out.element("Hsp_hit-from", hsp.hit_from)?;
    out.element("Hsp_hit-to", hsp.hit_to)?;
    out.optional("Hsp_identity", identity_count(hsp))?;
    out.optional("Hsp_positive", hsp.positive)?;
    out.optional("Hsp_gaps", hsp.gaps)?;
    out.element("Hsp_align-len", hsp.align_len)?;
    out.optional("Hsp_qseq", hsp.query_seq.as_deref())?;
    out.optional("Hsp_hseq", hsp.hit_seq.as_deref())?;
    out.optional("Hsp_midline", hsp.midline.as_deref())?;
    out.end("Hsp")
}
