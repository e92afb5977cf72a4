//! Compare a BLAST result file against a gold-standard result file.
//!
//! Usage: `compare <gold-standard> <comparison> [--json] [--per-query] [--raw-ids]`

use std::path::PathBuf;
use std::process::ExitCode;

use blast_accuracy::logging::init_subscriber;
use blast_accuracy::{outcomes, parse_with_options, AccuracyReport, Options, Result};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "compare",
    about = "Measure how many gold-standard BLAST hits a comparison result file retains"
)]
struct CompareArgs {
    /// Gold-standard result file (.xml, .txt, .tab, .tsv)
    gold_standard: PathBuf,

    /// Result file to evaluate against the gold standard
    comparison: PathBuf,

    /// Print the report as a JSON object
    #[arg(long)]
    json: bool,

    /// Print hit counts of every shared query before the report
    #[arg(long = "per-query")]
    per_query: bool,

    /// Keep BLAST-generated XML ids (Query_1, gnl|BL_ORD_ID|7) as they are
    #[arg(long = "raw-ids")]
    raw_ids: bool,
}

fn run(args: &CompareArgs) -> Result<()> {
    let options = Options {
        raw_ids: args.raw_ids,
        ..Options::default()
    };

    let gold = parse_with_options(&args.gold_standard, &options)?;
    tracing::info!("Parsed {}", args.gold_standard.display());
    let candidate = parse_with_options(&args.comparison, &options)?;
    tracing::info!("Parsed {}", args.comparison.display());

    let outcomes = outcomes(&gold, &candidate)?;
    let report = AccuracyReport::from_outcomes(&outcomes)?;

    if args.per_query && !args.json {
        println!("query\tgold\tcandidate\tmisses");
        for outcome in &outcomes {
            println!(
                "{}\t{}\t{}\t{}",
                outcome.query_id, outcome.gold_hits, outcome.candidate_hits, outcome.misses
            );
        }
        println!();
    }

    if args.json && args.per_query {
        let body = serde_json::json!({ "report": report, "queries": outcomes });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn main() -> ExitCode {
    init_subscriber();
    let args = CompareArgs::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
