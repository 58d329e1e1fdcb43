use std::path::PathBuf;

use clap::{ArgAction, Parser};
use color_eyre::{eyre::eyre, Result};
use wheelhouse_core::{
    generate_matrix, load_matrix_config, PypiIndex, S3Store, DEFAULT_BUCKET, DEFAULT_INDEX_URL,
    DEFAULT_KEY_PREFIX,
};

mod emit;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compute the CI wheel build matrix: one job per platform with missing wheels"
)]
struct WheelhouseCli {
    /// Wheel matrix document to read
    #[arg(long, default_value = "wheel_matrix.yml")]
    config: PathBuf,
    /// Bucket holding previously published wheels
    #[arg(long, default_value = DEFAULT_BUCKET)]
    bucket: String,
    /// Key prefix the wheels are published under
    #[arg(long, default_value = DEFAULT_KEY_PREFIX)]
    prefix: String,
    /// Base URL of the package index JSON API
    #[arg(long, default_value = DEFAULT_INDEX_URL)]
    index_url: String,
    #[arg(short, long, help = "Only log warnings and errors")]
    quiet: bool,
    #[arg(short, long, action = ArgAction::Count, help = "Increase logging (-vv reaches trace)")]
    verbose: u8,
    #[arg(long, help = "Force trace logging regardless of -v/-q")]
    trace: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = WheelhouseCli::parse();
    init_tracing(cli.trace, cli.quiet, cli.verbose);

    run(&cli).map_err(|err| eyre!("{err:?}"))
}

fn run(cli: &WheelhouseCli) -> anyhow::Result<()> {
    let config = load_matrix_config(&cli.config)?;
    let index = PypiIndex::new(&cli.index_url)?;
    let store = S3Store::connect(&cli.bucket)?;

    let matrix = generate_matrix(&config, &cli.prefix, &index, &store)?;
    emit::emit_variables(&mut std::io::stdout().lock(), &matrix)
}

fn init_tracing(trace: bool, quiet: bool, verbose: u8) {
    let level = if trace {
        "trace"
    } else if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = format!("wheelhouse={level},wheelhouse_core={level},wheelhouse_domain={level}");
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
