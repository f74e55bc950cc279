//! `sort` command-line front end for the linesort library

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::process;
use tracing_subscriber::EnvFilter;

use linesort::{
    config::{SortConfig, SortConfigBuilder, SortMode},
    error::SortResult,
    sort,
};

fn main() {
    let matches = build_cli().get_matches();

    let result = parse_config_from_matches(&matches).and_then(|config| {
        init_logging(config.debug);
        sort(&config)
    });
    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("sort: {e}");
            process::exit(e.exit_code());
        }
    }
}

/// Diagnostics go to stderr. `RUST_LOG` wins over `--debug`.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_cli() -> Command {
    Command::new("sort")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("sort [OPTION]... [FILE]...")
        .about("Write sorted concatenation of all FILE(s) to standard output")
        .long_about("Write sorted concatenation of all FILE(s) to standard output.\n\nWith no FILE, or when FILE is -, read standard input. Ordering options shape the key each line is compared on; the line itself is always printed unchanged.")

        // Input files
        .arg(Arg::new("files")
            .help("Input files to sort (use '-' or omit for stdin)")
            .num_args(0..)
            .value_name("FILE"))

        // Sort modes
        .arg(Arg::new("numeric-sort")
            .short('n')
            .long("numeric-sort")
            .help("Compare according to string numerical value")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("sort")
            .long("sort")
            .help("Sort according to WORD: lexicographic, numeric -n")
            .value_name("WORD")
            .value_parser(["lexicographic", "numeric"]))

        // Ordering options
        .arg(Arg::new("ignore-leading-blanks")
            .short('b')
            .long("ignore-leading-blanks")
            .help("Ignore leading blanks")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("dictionary-order")
            .short('d')
            .long("dictionary-order")
            .help("Consider only blanks and alphanumeric characters")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("ignore-case")
            .short('f')
            .long("ignore-case")
            .help("Fold lower case to upper case characters")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("ignore-nonprinting")
            .short('i')
            .long("ignore-nonprinting")
            .help("Consider only printable characters")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("reverse")
            .short('r')
            .long("reverse")
            .help("Reverse the result of comparisons")
            .action(ArgAction::SetTrue))

        // Other options
        .arg(Arg::new("check")
            .short('c')
            .long("check")
            .help("Check for sorted input; do not sort")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("unique")
            .short('u')
            .long("unique")
            .help("Output only the first of an equal run")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("stable")
            .short('s')
            .long("stable")
            .help("Stabilize sort by disabling last-resort comparison")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .help("Write result to FILE instead of standard output")
            .value_name("FILE"))
        .arg(Arg::new("zero-terminated")
            .short('z')
            .long("zero-terminated")
            .help("Line delimiter is NUL, not newline")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("parallel")
            .long("parallel")
            .help("Read up to N input files concurrently")
            .value_name("N"))
        .arg(Arg::new("debug")
            .long("debug")
            .help("Log input, key and ordering decisions to stderr")
            .action(ArgAction::SetTrue))
}

/// Parse configuration from command line matches
fn parse_config_from_matches(matches: &ArgMatches) -> SortResult<SortConfig> {
    let mut builder = SortConfigBuilder::new();

    let sort_mode = if matches.get_flag("numeric-sort") {
        SortMode::Numeric
    } else if let Some(sort_word) = matches.get_one::<String>("sort") {
        sort_word.parse::<SortMode>()?
    } else {
        SortMode::Lexicographic
    };
    builder = builder.mode(sort_mode);

    if matches.get_flag("reverse") {
        builder = builder.reverse();
    }
    if matches.get_flag("unique") {
        builder = builder.unique();
    }
    if matches.get_flag("stable") {
        builder = builder.stable();
    }
    if matches.get_flag("check") {
        builder = builder.check();
    }
    if matches.get_flag("zero-terminated") {
        builder = builder.zero_terminated();
    }
    if matches.get_flag("ignore-leading-blanks") {
        builder = builder.ignore_leading_blanks();
    }
    if matches.get_flag("dictionary-order") {
        builder = builder.dictionary_order();
    }
    if matches.get_flag("ignore-case") {
        builder = builder.ignore_case();
    }
    if matches.get_flag("ignore-nonprinting") {
        builder = builder.ignore_nonprinting();
    }
    if let Some(output) = matches.get_one::<String>("output") {
        builder = builder.output_file(output.clone());
    }
    if let Some(parallel_str) = matches.get_one::<String>("parallel") {
        let threads: usize = parallel_str.parse().map_err(|_| {
            linesort::SortError::parse_error(&format!("invalid thread count: {parallel_str}"))
        })?;
        builder = builder.parallel_threads(threads);
    }

    let input_files: Vec<String> = matches
        .get_many::<String>("files")
        .unwrap_or_default()
        .cloned()
        .collect();

    let config = builder
        .build()?
        .with_input_files(input_files)
        .with_debug(matches.get_flag("debug"));

    Ok(config)
}
