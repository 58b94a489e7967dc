use clap::{Parser, ValueEnum};
use std::error::Error;
use std::io::{self, BufWriter, Write};
use tnf::{
    enumerate, enumerate_sharded, write_json, write_text, SearchConfig, Summary,
    DEFAULT_STEP_LIMIT,
};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// One transition table per line
    Text,
    /// One JSON object per line, with outcome and step count
    Json,
}

/// Enumerates N-state, M-symbol Turing machines in tree normal form.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  tnf-cli -n 2 -m 2
  tnf-cli -n 3 -m 2 --summary
  tnf-cli -n 4 -m 2 -j 8 -l debug > machines.txt")]
struct Cli {
    /// Number of states
    #[clap(short = 'n', long, default_value_t = 2)]
    states: usize,

    /// Number of symbols, including the blank
    #[clap(short = 'm', long, default_value_t = 2)]
    symbols: usize,

    /// Machines running longer than this are left undetermined
    #[clap(short = 's', long, default_value_t = DEFAULT_STEP_LIMIT)]
    step_limit: u64,

    /// Number of worker threads
    #[clap(short = 'j', long, default_value_t = 1)]
    jobs: usize,

    /// Output format
    #[clap(short = 'f', long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print the number of machines per outcome instead of the machines
    #[clap(long)]
    summary: bool,

    /// Log filter, e.g. `info` or `tnf=debug`. Logs go to stderr.
    #[clap(short = 'l', long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = SearchConfig::new(cli.states, cli.symbols).with_step_limit(cli.step_limit);

    let results = if cli.jobs == 1 {
        enumerate(&config)?
    } else {
        enumerate_sharded(&config, cli.jobs)?
    };

    info!(machines = results.len(), "writing results");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.summary {
        let summary = Summary::from_results(&results);
        match cli.format {
            Format::Text => writeln!(out, "{}", summary)?,
            Format::Json => writeln!(out, "{}", summary.to_json()?)?,
        }
    } else {
        match cli.format {
            Format::Text => write_text(&mut out, &results)?,
            Format::Json => write_json(&mut out, &results)?,
        }
    }

    out.flush()?;
    Ok(())
}
