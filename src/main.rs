use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;
use clap::Parser;
use levelwidth::ProfileConfig;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "levelwidth", about = "Width of a sampled profile at evenly spaced y-levels")]
struct Cli {
    /// Input CSV with `x` and `y` columns
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV path, or an existing directory for a timestamped file
    /// (timestamped file in the working directory if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Distance between y-levels
    #[arg(long, default_value = "0.1")]
    step: f64,

    /// Decimal places kept in the y_level column
    #[arg(long, default_value = "1")]
    decimals: u32,

    /// Append log lines to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log the level grid and other detail (per-level progress needs
    /// RUST_LOG=levelwidth=trace)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = ProfileConfig {
        step: cli.step,
        decimals: cli.decimals,
    };
    let output = levelwidth::resolve_output(cli.output.as_deref(), Local::now().naive_local());

    info!("");
    info!("  levelwidth \u{00b7} {}", cli.input.display());
    info!("");

    match levelwidth::profile_file(&cli.input, &output, &config) {
        Ok(_) => {
            info!("");
            info!("  \u{2713} {}", output.display());
            println!("{}", output.display());
            Ok(())
        }
        Err(e) => {
            error!("{}: {}", cli.input.display(), e);
            Err(e.into())
        }
    }
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "levelwidth=debug"
    } else {
        "levelwidth=info"
    }
}

/// `RUST_LOG` wins over `--verbose` when set.
fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(cli.verbose)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &cli.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => {
            builder
                .without_time()
                .with_level(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_to_debug() {
        assert_eq!(default_filter(false), "levelwidth=info");
        assert_eq!(default_filter(true), "levelwidth=debug");
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from(["levelwidth", "-i", "in.csv", "-v", "--step", "0.5"]);
        assert!(cli.verbose);
        assert_eq!(cli.step, 0.5);
        assert_eq!(cli.decimals, 1);
        assert!(cli.output.is_none());
    }
}
