use blast_accuracy::{compare, compare_files, outcomes, Error, Hit, QueryResult, ResultSet};
use std::fs;

fn query(id: &str, hits: usize) -> QueryResult {
    QueryResult {
        hits: (0..hits).map(|i| Hit::new(format!("{id}_s{i}"))).collect(),
        ..QueryResult::new(id)
    }
}

fn set(queries: &[(&str, usize)]) -> ResultSet {
    queries.iter().map(|&(id, hits)| query(id, hits)).collect()
}

#[test]
fn one_query_missing_exactly_ten_percent() {
    let gold = set(&[("Q1", 10), ("Q2", 4)]);
    let candidate = set(&[("Q1", 9), ("Q2", 4)]);

    let report = compare(&gold, &candidate).unwrap();
    assert_eq!(report.queries, 2);
    assert_eq!(report.misses, 1);
    assert_eq!(report.total_gold_hits, 14);
    assert!((report.overall_accuracy - 13.0 / 14.0).abs() < 1e-12);
    assert_eq!(report.perfect_queries, 1);
    assert_eq!(report.queries_above_90_pct, 2);
    assert_eq!(report.queries_above_80_pct, 2);
}

#[test]
fn candidate_with_extra_hits_names_the_query() {
    let gold = set(&[("Q1", 5)]);
    let candidate = set(&[("Q1", 6)]);

    match compare(&gold, &candidate) {
        Err(Error::CandidateExceedsGold {
            query_id,
            gold,
            candidate,
        }) => {
            assert_eq!(query_id, "Q1");
            assert_eq!(gold, 5);
            assert_eq!(candidate, 6);
        }
        other => panic!("expected CandidateExceedsGold, got {other:?}"),
    }
}

#[test]
fn empty_gold_has_no_overlap() {
    let gold = ResultSet::new();
    let candidate = set(&[("Q1", 3)]);
    assert!(matches!(compare(&gold, &candidate), Err(Error::NoOverlap)));
}

#[test]
fn shared_queries_without_gold_hits_are_undefined() {
    let gold = set(&[("Q1", 0), ("Q2", 0)]);
    let candidate = set(&[("Q1", 0), ("Q2", 0)]);
    assert!(matches!(
        compare(&gold, &candidate),
        Err(Error::EmptyGoldStandard)
    ));
}

#[test]
fn queries_in_only_one_set_are_ignored() {
    let gold = set(&[("shared", 8), ("gold_only", 100)]);
    let candidate = set(&[("shared", 8), ("candidate_only", 3)]);

    let report = compare(&gold, &candidate).unwrap();
    assert_eq!(report.queries, 1);
    assert_eq!(report.total_gold_hits, 8);
    assert_eq!(report.overall_accuracy, 1.0);
}

#[test]
fn zero_hit_gold_query_counts_as_perfect() {
    let gold = set(&[("empty", 0), ("full", 5)]);
    let candidate = set(&[("empty", 0), ("full", 4)]);

    let report = compare(&gold, &candidate).unwrap();
    assert_eq!(report.queries, 2);
    assert_eq!(report.perfect_queries, 1);
    assert_eq!(report.queries_above_90_pct, 1);
    assert_eq!(report.queries_above_80_pct, 2);
}

#[test]
fn outcomes_are_sorted_by_query_id() {
    let gold = set(&[("b", 2), ("c", 3), ("a", 1)]);
    let candidate = set(&[("c", 1), ("a", 1), ("b", 2)]);

    let outcomes = outcomes(&gold, &candidate).unwrap();
    let ids: Vec<_> = outcomes.iter().map(|o| o.query_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(outcomes[2].misses, 2);
}

#[test]
fn report_text_matches_expected_layout() {
    let gold = set(&[("Q1", 10), ("Q2", 4)]);
    let candidate = set(&[("Q1", 9), ("Q2", 4)]);

    let text = compare(&gold, &candidate).unwrap().to_string();
    let labels: Vec<_> = text
        .lines()
        .map(|line| line.split(':').next().unwrap_or_default())
        .collect();
    assert_eq!(
        labels,
        vec![
            "Queries",
            "Misses",
            "Total hits in gold-standard",
            "Overall accuracy",
            "Queries with perfect accuracy",
            "Queries with greater than 90% of hits",
            "Queries with greater than 80% of hits",
        ]
    );
}

const GOLD_XML: &str = r#"<?xml version="1.0"?>
<BlastOutput>
  <BlastOutput_program>blastp</BlastOutput_program>
  <BlastOutput_iterations>
    <Iteration>
      <Iteration_query-ID>Query_1</Iteration_query-ID>
      <Iteration_query-def>Q1 first</Iteration_query-def>
      <Iteration_hits>
        <Hit><Hit_id>s1</Hit_id><Hit_def>a</Hit_def></Hit>
        <Hit><Hit_id>s2</Hit_id><Hit_def>b</Hit_def></Hit>
        <Hit><Hit_id>s3</Hit_id><Hit_def>c</Hit_def></Hit>
        <Hit><Hit_id>s4</Hit_id><Hit_def>d</Hit_def></Hit>
      </Iteration_hits>
    </Iteration>
    <Iteration>
      <Iteration_query-ID>Query_2</Iteration_query-ID>
      <Iteration_query-def>Q2 second</Iteration_query-def>
      <Iteration_hits>
        <Hit><Hit_id>s1</Hit_id><Hit_def>a</Hit_def></Hit>
      </Iteration_hits>
    </Iteration>
  </BlastOutput_iterations>
</BlastOutput>
"#;

const CANDIDATE_TAB: &str = "\
Q1\ts1\t100.00\t50\t0\t0\t1\t50\t1\t50\t1e-20\t99.0
Q1\ts1\t90.00\t20\t2\t0\t60\t79\t60\t79\t1e-3\t30.0
Q1\ts2\t95.00\t50\t2\t0\t1\t50\t1\t50\t1e-15\t80.0
Q1\ts3\t80.00\t50\t10\t0\t1\t50\t1\t50\t1e-10\t60.0
Q2\ts1\t100.00\t50\t0\t0\t1\t50\t1\t50\t1e-20\t99.0
";

#[test]
fn xml_gold_against_tabular_candidate() {
    let dir = tempfile::tempdir().unwrap();
    let gold_path = dir.path().join("gold.xml");
    let candidate_path = dir.path().join("fast.txt");
    fs::write(&gold_path, GOLD_XML).unwrap();
    fs::write(&candidate_path, CANDIDATE_TAB).unwrap();

    let report = compare_files(&gold_path, &candidate_path).unwrap();
    assert_eq!(report.queries, 2);
    assert_eq!(report.total_gold_hits, 5);
    assert_eq!(report.misses, 1);
    assert_eq!(report.perfect_queries, 1);
    assert_eq!(report.queries_above_90_pct, 1);
    assert_eq!(report.queries_above_80_pct, 1);
    assert!((report.overall_accuracy - 0.8).abs() < 1e-12);
}

#[test]
fn unsupported_candidate_extension_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let gold_path = dir.path().join("gold.xml");
    fs::write(&gold_path, GOLD_XML).unwrap();

    match compare_files(&gold_path, dir.path().join("fast.out")) {
        Err(Error::UnsupportedFormat(path)) => assert!(path.ends_with("fast.out")),
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

#[test]
fn score_sorted_candidate_with_interleaved_hsps_matches_gold() {
    let dir = tempfile::tempdir().unwrap();
    let gold_path = dir.path().join("gold.txt");
    let cand_path = dir.path().join("candidate.tsv");
    fs::write(
        &gold_path,
        "q\ts1\t100\t50\t0\t0\t1\t50\t1\t50\t1e-20\t90\n\
         q\ts2\t95\t40\t2\t0\t1\t40\t1\t40\t1e-15\t70\n",
    )
    .unwrap();
    fs::write(
        &cand_path,
        "q\ts1\t100\t50\t0\t0\t1\t50\t1\t50\t1e-20\t90\n\
         q\ts2\t95\t40\t2\t0\t1\t40\t1\t40\t1e-15\t70\n\
         q\ts1\t90\t30\t3\t0\t60\t89\t60\t89\t1e-8\t40\n",
    )
    .unwrap();

    let report = compare_files(&gold_path, &cand_path).unwrap();
    assert_eq!(report.misses, 0);
    assert_eq!(report.overall_accuracy, 1.0);
}
