//! BLAST XML decoding (`-outfmt 5`).
//!
//! Handles the `BlastOutput` document BLAST+ and legacy BLAST write:
//! - one `Iteration` per query, each with `Iteration_hits/Hit/Hit_hsps/Hsp`
//! - query information on the `Iteration`, or only on the `BlastOutput`
//!   header for single-query legacy output
//!
//! Elements the data model does not use (parameters, statistics) are skipped.

use std::str::FromStr;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::{insert_query, split_definition};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::result::{Hit, Hsp, QueryResult, ResultSet};

/// Query id prefixes BLAST generates when it could not parse the defline.
const GENERATED_QUERY_PREFIXES: &[&str] = &["Query_", "lcl|"];

/// Hit id prefix BLAST generates for databases built without parsed ids.
const GENERATED_HIT_PREFIX: &str = "gnl|BL_ORD_ID|";

/// Query fields collected while inside an `Iteration`.
#[derive(Default)]
struct IterationState {
    raw_id: Option<String>,
    definition: Option<String>,
    len: Option<usize>,
    hits: Vec<Hit>,
}

/// Header-level query fields used when an `Iteration` lacks its own.
#[derive(Default)]
struct HeaderQuery {
    raw_id: Option<String>,
    definition: Option<String>,
    len: Option<usize>,
}

pub(super) fn parse(content: &str, options: &Options) -> Result<ResultSet> {
    let mut reader = Reader::from_str(content);

    let mut set = ResultSet::new();
    let mut header = HeaderQuery::default();
    let mut iteration: Option<IterationState> = None;
    let mut hit: Option<Hit> = None;
    let mut hsp: Option<Hsp> = None;
    let mut text_buf = String::new();
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                text_buf.clear();
                match e.local_name().as_ref() {
                    b"BlastOutput" => saw_root = true,
                    b"Iteration" => iteration = Some(IterationState::default()),
                    b"Hit" => hit = Some(Hit::default()),
                    b"Hsp" => hsp = Some(Hsp::default()),
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::Xml(format!("failed to unescape text: {err}")))?;
                text_buf.push_str(&text);
            }
            Ok(Event::CData(ref e)) => {
                let text = std::str::from_utf8(e)
                    .map_err(|err| Error::Xml(format!("CDATA is not UTF-8: {err}")))?;
                text_buf.push_str(text);
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                let text = std::mem::take(&mut text_buf);
                let text = text.trim();

                match name.as_str() {
                    "Hsp" => {
                        if let (Some(done), Some(parent)) = (hsp.take(), hit.as_mut()) {
                            parent.hsps.push(done);
                        }
                    }
                    "Hit" => {
                        if let (Some(done), Some(parent)) = (hit.take(), iteration.as_mut()) {
                            parent.hits.push(normalize_hit(done, options));
                        }
                    }
                    "Iteration" => {
                        if let Some(done) = iteration.take() {
                            insert_query(&mut set, finish_iteration(done, &header, options));
                        }
                    }
                    _ if name.starts_with("Hsp_") => {
                        if let Some(current) = hsp.as_mut() {
                            set_hsp_field(current, &name, text)?;
                        }
                    }
                    _ if name.starts_with("Hit_") => {
                        if let Some(current) = hit.as_mut() {
                            set_hit_field(current, &name, text)?;
                        }
                    }
                    _ if name.starts_with("Iteration_") => {
                        if let Some(current) = iteration.as_mut() {
                            match name.as_str() {
                                "Iteration_query-ID" => current.raw_id = Some(text.to_string()),
                                "Iteration_query-def" => {
                                    current.definition = Some(text.to_string());
                                }
                                "Iteration_query-len" => {
                                    current.len = Some(number(&name, text)?);
                                }
                                _ => {}
                            }
                        }
                    }
                    "BlastOutput_program" => set.program = Some(text.to_string()),
                    "BlastOutput_version" => set.version = Some(text.to_string()),
                    "BlastOutput_query-ID" => header.raw_id = Some(text.to_string()),
                    "BlastOutput_query-def" => header.definition = Some(text.to_string()),
                    "BlastOutput_query-len" => header.len = Some(number(&name, text)?),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!(
                    "parse error at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    if !saw_root {
        return Err(Error::Xml("missing <BlastOutput> root element".to_string()));
    }
    Ok(set)
}

fn finish_iteration(state: IterationState, header: &HeaderQuery, options: &Options) -> QueryResult {
    let raw_id = state
        .raw_id
        .or_else(|| header.raw_id.clone())
        .unwrap_or_default();
    let definition = state
        .definition
        .or_else(|| header.definition.clone())
        .unwrap_or_default();

    let generated = GENERATED_QUERY_PREFIXES
        .iter()
        .any(|prefix| raw_id.starts_with(prefix));

    let (id, description) = if raw_id.is_empty() || (generated && !options.raw_ids) {
        split_definition(&definition)
    } else {
        (raw_id, definition)
    };

    QueryResult {
        id,
        description,
        len: state.len.or(header.len),
        hits: state.hits,
    }
}

fn normalize_hit(mut hit: Hit, options: &Options) -> Hit {
    if !options.raw_ids && hit.id.starts_with(GENERATED_HIT_PREFIX) && !hit.description.is_empty() {
        let (id, description) = split_definition(&hit.description);
        hit.id = id;
        hit.description = description;
    }
    hit
}

fn set_hit_field(hit: &mut Hit, name: &str, text: &str) -> Result<()> {
    match name {
        "Hit_id" => hit.id = text.to_string(),
        "Hit_def" => hit.description = text.to_string(),
        "Hit_accession" => hit.accession = Some(text.to_string()),
        "Hit_len" => hit.len = Some(number(name, text)?),
        _ => {}
    }
    Ok(())
}

fn set_hsp_field(hsp: &mut Hsp, name: &str, text: &str) -> Result<()> {
    match name {
        "Hsp_bit-score" => hsp.bit_score = number(name, text)?,
        "Hsp_score" => hsp.score = Some(number(name, text)?),
        "Hsp_evalue" => hsp.evalue = number(name, text)?,
        "Hsp_query-from" => hsp.query_from = number(name, text)?,
        "Hsp_query-to" => hsp.query_to = number(name, text)?,
        "Hsp_hit-from" => hsp.hit_from = number(name, text)?,
        "Hsp_hit-to" => hsp.hit_to = number(name, text)?,
        "Hsp_identity" => hsp.identity = Some(number(name, text)?),
        "Hsp_positive" => hsp.positive = Some(number(name, text)?),
        "Hsp_gaps" => hsp.gaps = Some(number(name, text)?),
        "Hsp_align-len" => hsp.align_len = number(name, text)?,
        "Hsp_qseq" => hsp.query_seq = Some(text.to_string()),
        "Hsp_hseq" => hsp.hit_seq = Some(text.to_string()),
        "Hsp_midline" => hsp.midline = Some(text.to_string()),
        _ => {}
    }
    Ok(())
}

fn number<T: FromStr>(element: &str, text: &str) -> Result<T> {
    text.parse()
        .map_err(|_| Error::Xml(format!("invalid value '{text}' in <{element}>")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_QUERIES: &str = r#"<?xml version="1.0"?>
<!DOCTYPE BlastOutput PUBLIC "-//NCBI//NCBI BlastOutput/EN" "http://www.ncbi.nlm.nih.gov/dtd/NCBI_BlastOutput.dtd">
<BlastOutput>
  <BlastOutput_program>blastp</BlastOutput_program>
  <BlastOutput_version>BLASTP 2.2.28+</BlastOutput_version>
  <BlastOutput_iterations>
    <Iteration>
      <Iteration_iter-num>1</Iteration_iter-num>
      <Iteration_query-ID>Query_1</Iteration_query-ID>
      <Iteration_query-def>gi|16080617|ref|NP_391444.1| membrane bound lipoprotein</Iteration_query-def>
      <Iteration_query-len>102</Iteration_query-len>
      <Iteration_hits>
        <Hit>
          <Hit_num>1</Hit_num>
          <Hit_id>gnl|BL_ORD_ID|7</Hit_id>
          <Hit_def>sp|P34567|ABC_BACSU Putative transporter &amp; permease</Hit_def>
          <Hit_accession>7</Hit_accession>
          <Hit_len>102</Hit_len>
          <Hit_hsps>
            <Hsp>
              <Hsp_num>1</Hsp_num>
              <Hsp_bit-score>139.428</Hsp_bit-score>
              <Hsp_score>350</Hsp_score>
              <Hsp_evalue>1.05e-43</Hsp_evalue>
              <Hsp_query-from>1</Hsp_query-from>
              <Hsp_query-to>102</Hsp_query-to>
              <Hsp_hit-from>1</Hsp_hit-from>
              <Hsp_hit-to>102</Hsp_hit-to>
              <Hsp_identity>69</Hsp_identity>
              <Hsp_positive>81</Hsp_positive>
              <Hsp_gaps>0</Hsp_gaps>
              <Hsp_align-len>102</Hsp_align-len>
            </Hsp>
          </Hit_hsps>
        </Hit>
        <Hit>
          <Hit_num>2</Hit_num>
          <Hit_id>sp|Q99999|XYZ_ECOLI</Hit_id>
          <Hit_def>Another protein</Hit_def>
          <Hit_hsps>
            <Hsp><Hsp_bit-score>30.1</Hsp_bit-score><Hsp_evalue>0.5</Hsp_evalue><Hsp_align-len>40</Hsp_align-len></Hsp>
            <Hsp><Hsp_bit-score>22.0</Hsp_bit-score><Hsp_evalue>4.1</Hsp_evalue><Hsp_align-len>12</Hsp_align-len></Hsp>
          </Hit_hsps>
        </Hit>
      </Iteration_hits>
    </Iteration>
    <Iteration>
      <Iteration_iter-num>2</Iteration_iter-num>
      <Iteration_query-ID>Query_2</Iteration_query-ID>
      <Iteration_query-def>orphan</Iteration_query-def>
      <Iteration_query-len>61</Iteration_query-len>
      <Iteration_hits></Iteration_hits>
      <Iteration_message>No hits found</Iteration_message>
    </Iteration>
  </BlastOutput_iterations>
</BlastOutput>
"#;

    #[test]
    fn generated_query_ids_come_from_definition() {
        let set = parse(TWO_QUERIES, &Options::default()).unwrap();
        let ids: Vec<_> = set.query_ids().collect();
        assert_eq!(ids, vec!["gi|16080617|ref|NP_391444.1|", "orphan"]);

        let q1 = set.get("gi|16080617|ref|NP_391444.1|").unwrap();
        assert_eq!(q1.description, "membrane bound lipoprotein");
        assert_eq!(q1.len, Some(102));
        assert_eq!(q1.hit_count(), 2);
        assert_eq!(set.hit_count("orphan"), Some(0));
    }

    #[test]
    fn generated_hit_ids_come_from_definition() {
        let set = parse(TWO_QUERIES, &Options::default()).unwrap();
        let hits = &set.get("gi|16080617|ref|NP_391444.1|").unwrap().hits;
        assert_eq!(hits[0].id, "sp|P34567|ABC_BACSU");
        assert_eq!(hits[0].description, "Putative transporter & permease");
        assert_eq!(hits[1].id, "sp|Q99999|XYZ_ECOLI");
        assert_eq!(hits[1].hsps.len(), 2);
    }

    #[test]
    fn raw_ids_keep_blast_generated_ids() {
        let options = Options {
            raw_ids: true,
            ..Options::default()
        };
        let set = parse(TWO_QUERIES, &options).unwrap();
        assert!(set.contains("Query_1"));
        assert!(set.contains("Query_2"));
        assert_eq!(set.get("Query_1").unwrap().hits[0].id, "gnl|BL_ORD_ID|7");
    }

    #[test]
    fn hsp_values_are_decoded() {
        let set = parse(TWO_QUERIES, &Options::default()).unwrap();
        let hsp = &set.iter().next().unwrap().hits[0].hsps[0];
        assert_eq!(hsp.bit_score, 139.428);
        assert_eq!(hsp.score, Some(350.0));
        assert_eq!(hsp.evalue, 1.05e-43);
        assert_eq!(hsp.identity, Some(69));
        assert_eq!(hsp.positive, Some(81));
        assert_eq!(hsp.gaps, Some(0));
        assert_eq!(hsp.align_len, 102);
        assert_eq!(set.program.as_deref(), Some("blastp"));
    }

    #[test]
    fn legacy_single_query_uses_header_fields() {
        let xml = r"<BlastOutput>
  <BlastOutput_query-ID>lcl|1_0</BlastOutput_query-ID>
  <BlastOutput_query-def>seqA sample</BlastOutput_query-def>
  <BlastOutput_query-len>88</BlastOutput_query-len>
  <BlastOutput_iterations><Iteration>
    <Iteration_hits><Hit><Hit_id>s1</Hit_id><Hit_def>d</Hit_def></Hit></Iteration_hits>
  </Iteration></BlastOutput_iterations>
</BlastOutput>";
        let set = parse(xml, &Options::default()).unwrap();
        let query = set.get("seqA").unwrap();
        assert_eq!(query.description, "sample");
        assert_eq!(query.len, Some(88));
        assert_eq!(query.hit_count(), 1);
    }

    #[test]
    fn cdata_text_is_read_like_plain_text() {
        let xml = "<BlastOutput><BlastOutput_iterations><Iteration>\
            <Iteration_query-ID>q</Iteration_query-ID>\
            <Iteration_hits><Hit><Hit_id>s1</Hit_id>\
            <Hit_def><![CDATA[protein <putative> & co]]></Hit_def>\
            <Hit_hsps><Hsp><Hsp_qseq><![CDATA[MKV]]>LA</Hsp_qseq></Hsp></Hit_hsps>\
            </Hit></Iteration_hits></Iteration></BlastOutput_iterations></BlastOutput>";
        let set = parse(xml, &Options::default()).unwrap();
        let hit = &set.get("q").unwrap().hits[0];
        assert_eq!(hit.description, "protein <putative> & co");
        assert_eq!(hit.hsps[0].query_seq.as_deref(), Some("MKVLA"));
    }

    #[test]
    fn invalid_number_is_xml_error() {
        let xml = "<BlastOutput><BlastOutput_iterations><Iteration>\
            <Iteration_query-ID>q</Iteration_query-ID>\
            <Iteration_hits><Hit><Hit_id>s</Hit_id><Hit_len>long</Hit_len></Hit></Iteration_hits>\
            </Iteration></BlastOutput_iterations></BlastOutput>";
        match parse(xml, &Options::default()) {
            Err(Error::Xml(message)) => assert!(message.contains("Hit_len")),
            other => panic!("expected Xml error, got {other:?}"),
        }
    }

    #[test]
    fn mismatched_tags_are_xml_error() {
        let xml = "<BlastOutput><Iteration></Hit></BlastOutput>";
        assert!(matches!(parse(xml, &Options::default()), Err(Error::Xml(_))));
    }

    #[test]
    fn document_without_root_is_rejected() {
        assert!(matches!(
            parse("<Something/>", &Options::default()),
            Err(Error::Xml(_))
        ));
    }
}
