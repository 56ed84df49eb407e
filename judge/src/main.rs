use std::path::PathBuf;

use clap::Parser;
use kalah_judge::{run_session, Config, Recorder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Referees Kalah games. Reads one JSON request per line from stdin and
/// writes one JSON response per line to stdout. Logs go to stderr.
#[derive(Parser)]
struct Args {
    /// RNG seed for generating game ids
    #[arg(long)]
    seed: Option<u64>,

    /// Base URL used to build the `url` of each game
    #[arg(short, long, default_value = "http://localhost:8080")]
    base_url: String,

    /// Record the session's requests and responses as a JSON file into this directory
    #[arg(short, long)]
    record_session_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let rng = StdRng::seed_from_u64(seed);

    let recorder = if let Some(dir_path) = args.record_session_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let config = Config {
        rng,
        base_url: String::from(args.base_url.trim_end_matches('/')),
        recorder,
    };

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    run_session(config, stdin, stdout)
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Stdout carries the responses
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
