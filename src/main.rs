use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{ArgAction, ArgMatches, ValueHint};
use env_logger::Env;

use fastq_quantize::{
    Config, ErrorPolicy, PHRED33_OFFSET, PHRED64_OFFSET, QualityLevels, ReaderOptions,
};

fn cli() -> clap::Command {
    clap::command!("fastq-quantize")
        .about("Strip read names and quantize quality strings to improve FASTQ compressibility")
        .long_about(
            "Strip read names and quantize quality strings to improve FASTQ compressibility.\n\n\
            WARNING: sequence names and qualities are lost or modified in the process. This may \
            be fine for some applications but potentially catastrophic for others.",
        )
        .arg(clap::arg!(<"input"> "FASTQ to read (.gz is decompressed transparently)")
            .value_name("input_fastq")
            .value_parser(clap::value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath))
        .arg(clap::arg!(<"num_qual_levels"> "number of quality levels to keep (1 to 40)")
            .value_parser(QualityLevels::from_str))
        .arg(clap::arg!(<"output"> "FASTQ to write (.gz is compressed)")
            .value_name("output_fastq")
            .value_parser(clap::value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath))
        .arg(clap::arg!(--"phred64" "qualities use the legacy phred64 encoding (score 0 = \"@\") \
        instead of phred33 (score 0 = \"!\")"))
        .arg(clap::arg!(--"lenient" "tolerate truncated records and out-of-range quality characters \
        instead of stopping at the first one"))
        .arg(clap::arg!(-'v' --"verbose" "log debug messages")
            .action(ArgAction::SetTrue)
            .conflicts_with("quiet"))
        .arg(clap::arg!(-'q' --"quiet" "only log warnings and errors")
            .action(ArgAction::SetTrue))
}

/// Translate parsed arguments into a run configuration.
fn config_from(args: &ArgMatches) -> Config {
    let levels = *args
        .get_one::<QualityLevels>("num_qual_levels")
        .expect("required by clap");
    let offset = if args.get_flag("phred64") {
        PHRED64_OFFSET
    } else {
        PHRED33_OFFSET
    };
    let error_policy = if args.get_flag("lenient") {
        ErrorPolicy::Lenient
    } else {
        ErrorPolicy::Strict
    };

    Config {
        input: args
            .get_one::<PathBuf>("input")
            .expect("required by clap")
            .clone(),
        output: args
            .get_one::<PathBuf>("output")
            .expect("required by clap")
            .clone(),
        options: ReaderOptions::new(levels)
            .with_offset(offset)
            .with_error_policy(error_policy),
    }
}

fn main() -> ExitCode {
    let args = cli().get_matches();

    let default_level = if args.get_flag("verbose") {
        "debug"
    } else if args.get_flag("quiet") {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let config = config_from(&args);

    match fastq_quantize::run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
