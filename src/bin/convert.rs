//! Convert a BLAST tabular result file to BLAST XML (or back with `--from`/`--to`).
//!
//! Usage: `convert <input.txt> [output.xml] [--from FORMAT] [--to FORMAT]`
//! Without an output path the input's extension is replaced by the one of
//! the `--to` format (`.xml` by default).

use std::path::PathBuf;
use std::process::ExitCode;

use blast_accuracy::logging::init_subscriber;
use blast_accuracy::{convert, output_path_for, Format};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "convert", about = "Convert BLAST tabular output to BLAST XML")]
struct ConvertArgs {
    /// BLAST tabular file (-outfmt 6 or 7)
    input: PathBuf,

    /// Where to write the result (default: input path with the --to format's extension)
    output: Option<PathBuf>,

    /// Encoding of the input file
    #[arg(long = "from", default_value = "blast-tab")]
    from: Format,

    /// Encoding of the output file
    #[arg(long = "to", default_value = "blast-xml")]
    to: Format,
}

fn main() -> ExitCode {
    init_subscriber();
    let args = ConvertArgs::parse();

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| output_path_for(&args.input, args.to));

    if output == args.input {
        eprintln!(
            "Error: output path {} would overwrite the input",
            output.display()
        );
        return ExitCode::FAILURE;
    }

    match convert(&args.input, args.from, &output, args.to) {
        Ok(()) => {
            eprintln!("Wrote: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
