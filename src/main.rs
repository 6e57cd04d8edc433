//! # chatstats CLI
//!
//! Command-line interface for the chatstats library. The report goes to
//! stdout (or `--output`); logs and diagnostics go to stderr.

use std::io::Write;
use std::process;

use clap::Parser as ClapParser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use chatstats::analyze::Analysis;
use chatstats::cli::Args;
use chatstats::config::AnonymizeConfig;
use chatstats::core::anonymize::anonymize_with;
use chatstats::format::{to_format_string, write_to_format};
use chatstats::ChatstatsError;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<(), ChatstatsError> {
    let analysis = Analysis::with_configs(args.parser_config(), args.analyzer_config()?);
    info!(input = %args.input, "analyzing transcript");
    let mut record = analysis.run_file(&args.input)?;

    if args.anonymize {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (names, anonymized) = anonymize_with(&record, &mut rng, &AnonymizeConfig::default())?;
        if args.verbose {
            for (real, pseudonym) in names.iter() {
                eprintln!("{real} -> {pseudonym}");
            }
        }
        record = anonymized;
    }

    let format = args.output_format();
    let config = args.output_config();

    match &args.output {
        Some(path) => {
            write_to_format(&record, path, format, &config)?;
            debug!(path = %path, %format, "report written");
        }
        None => {
            let payload = to_format_string(&record, format, &config)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(payload.as_bytes())?;
            if !payload.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }

    Ok(())
}
