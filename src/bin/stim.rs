//! Stim CLI - Command-line interface for cardiostim
//!
//! Commands:
//! - generate: Synthesize an asynchronous schedule from recorded R-peak timings
//! - validate: Validate trigger-definition and block-parameter documents

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cardiostim::{AsyncTimingGenerator, ExperimentConfig, ScheduleRecord, TriggerDef};
use cardiostim::{CARDIOSTIM_VERSION, DEFAULT_EDGE_PERC};

/// Stim - Stimulus-timing engine for cardio-audio sleep experiments
#[derive(Parser)]
#[command(name = "stim")]
#[command(author = "FCBG Human Neuroscience Platform")]
#[command(version = CARDIOSTIM_VERSION)]
#[command(about = "Generate stimulus-timing schedules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize an asynchronous schedule from recorded R-peak timings
    Generate {
        /// Input file with a JSON array of R-peak timings (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the schedule record (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Bottom and top percentage of intervals removed
        #[arg(long, default_value_t = DEFAULT_EDGE_PERC)]
        edge_perc: f64,

        /// Seed for the random source; sampled from OS entropy when omitted
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,
    },

    /// Validate trigger-definition and block-parameter documents
    Validate {
        /// Trigger-definition file
        #[arg(long)]
        triggers: Option<PathBuf>,

        /// Block-parameter file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.message());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), StimCliError> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            edge_perc,
            seed,
            output_format,
        } => cmd_generate(&input, &output, edge_perc, seed, output_format),

        Commands::Validate { triggers, config } => {
            cmd_validate(triggers.as_deref(), config.as_deref())
        }
    }
}

fn cmd_generate(
    input: &Path,
    output: &Path,
    edge_perc: f64,
    seed: Option<u64>,
    output_format: OutputFormat,
) -> Result<(), StimCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("reading R-peak timings from terminal; pipe a JSON array or press Ctrl-D");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let sequence_timings: Vec<f64> = serde_json::from_str(&input_data)?;

    let seed = seed.unwrap_or_else(rand::random);
    let mut generator = AsyncTimingGenerator::from_seed(seed);
    let timings = generator.generate(&sequence_timings, edge_perc)?;

    let record = ScheduleRecord::asynchronous(seed, edge_perc, timings);
    let rendered = match output_format {
        OutputFormat::Json => serde_json::to_string(&record)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&record)?,
    };

    if output.to_string_lossy() == "-" {
        println!("{rendered}");
    } else {
        fs::write(output, rendered + "\n")?;
    }

    Ok(())
}

fn cmd_validate(triggers: Option<&Path>, config: Option<&Path>) -> Result<(), StimCliError> {
    if triggers.is_none() && config.is_none() {
        return Err(StimCliError::NothingToValidate);
    }

    if let Some(path) = triggers {
        let data = fs::read_to_string(path)?;
        TriggerDef::from_json(&data)?;
        println!("[OK] triggers: {}", path.display());
    }

    if let Some(path) = config {
        let data = fs::read_to_string(path)?;
        ExperimentConfig::from_json(&data)?;
        println!("[OK] config: {}", path.display());
    }

    Ok(())
}

enum StimCliError {
    Io(io::Error),
    Json(serde_json::Error),
    Timing(cardiostim::TimingError),
    NothingToValidate,
}

impl StimCliError {
    fn message(&self) -> String {
        match self {
            StimCliError::Io(e) => format!("I/O error: {e}"),
            StimCliError::Json(e) => format!("Invalid JSON: {e}"),
            StimCliError::Timing(e) => e.to_string(),
            StimCliError::NothingToValidate => {
                "nothing to validate; pass --triggers and/or --config".to_string()
            }
        }
    }
}

impl From<io::Error> for StimCliError {
    fn from(e: io::Error) -> Self {
        StimCliError::Io(e)
    }
}

impl From<serde_json::Error> for StimCliError {
    fn from(e: serde_json::Error) -> Self {
        StimCliError::Json(e)
    }
}

impl From<cardiostim::TimingError> for StimCliError {
    fn from(e: cardiostim::TimingError) -> Self {
        StimCliError::Timing(e)
    }
}
