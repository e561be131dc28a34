//! Build Labeller CLI

use std::path::PathBuf;
use std::process::ExitCode;

use build_labeller::{
    BuildDetail, BuildHistory, DateVersionLabeller, IntegrationResult, LabellerConfig, Result,
    UpdateBuildNumber,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "build_labeller=info";

#[derive(Parser)]
#[command(name = "build-labeller")]
#[command(about = "Date-based build labels and version numbers", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file with labeller defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the next label from the previous integration's label
    Label {
        /// Major version (overrides config)
        #[arg(long)]
        major: Option<u32>,
        /// Minor version (overrides config)
        #[arg(long)]
        minor: Option<u32>,
        /// Label of the previous integration
        #[arg(short, long, conflicts_with = "history")]
        previous: Option<String>,
        /// Ignore a previous label that is not a valid version
        #[arg(long)]
        initialise: bool,
        /// Build date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// History file to read the previous label from and record the new one in
        #[arg(long)]
        history: Option<PathBuf>,
        /// Team project owning the history
        #[arg(long, default_value = "default")]
        project: String,
    },
    /// Generate the next build number from previous build numbers
    BuildNumber {
        /// Build number format containing {0}
        #[arg(short, long)]
        format: Option<String>,
        /// Major version (overrides config)
        #[arg(long)]
        major: Option<u32>,
        /// Minor version (overrides config)
        #[arg(long)]
        minor: Option<u32>,
        /// Previous build number, most recent first (repeatable)
        #[arg(short, long = "candidate", conflicts_with = "history")]
        candidates: Vec<String>,
        /// Build date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// History file to read previous build numbers from and record the new one in
        #[arg(long)]
        history: Option<PathBuf>,
        /// Team project owning the history
        #[arg(long, default_value = "default")]
        project: String,
        /// Print build and version number as JSON
        #[arg(long)]
        json: bool,
    },
}

/// A single previous label given on the command line
struct PreviousLabel(Option<String>);

impl IntegrationResult for PreviousLabel {
    fn label(&self) -> Option<String> {
        self.0.clone()
    }

    fn set_label(&mut self, label: String) -> Result<()> {
        self.0 = Some(label);
        Ok(())
    }
}

/// Previous build numbers of a team project given on the command line
struct Candidates {
    team_project: String,
    build_numbers: Vec<String>,
}

impl BuildDetail for Candidates {
    fn team_project(&self) -> String {
        self.team_project.clone()
    }

    fn latest_build_numbers(&self, _team_project: &str, max: usize) -> Result<Vec<String>> {
        Ok(self.build_numbers.iter().take(max).cloned().collect())
    }

    fn record_build_number(&mut self, _build_number: &str) -> Result<()> {
        Ok(())
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` directives when given and valid, `build_labeller=info` otherwise
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => LabellerConfig::from_file(path)?,
        None => LabellerConfig::default(),
    };

    match cli.command {
        Commands::Label { major, minor, previous, initialise, date, history, project } => {
            let labeller = DateVersionLabeller::new(
                major.unwrap_or(config.major),
                minor.unwrap_or(config.minor),
            )
            .initialise(initialise || config.initialise);
            cmd_label(&labeller, previous, date.unwrap_or_else(today), history, &project)
        }
        Commands::BuildNumber { format, major, minor, candidates, date, history, project, json } => {
            let step = UpdateBuildNumber::new(
                format.unwrap_or(config.build_number_format),
                major.unwrap_or(config.major),
                minor.unwrap_or(config.minor),
            );
            cmd_build_number(&step, candidates, date.unwrap_or_else(today), history, &project, json)
        }
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn cmd_label(
    labeller: &DateVersionLabeller,
    previous: Option<String>,
    today: NaiveDate,
    history: Option<PathBuf>,
    project: &str,
) -> Result<()> {
    let version = match history {
        Some(path) => {
            let mut history = BuildHistory::open(path, project)?;
            labeller.run(Some(&mut history), today)?
        }
        None => labeller.generate(Some(&PreviousLabel(previous)), today)?,
    };

    println!("{}", version);
    Ok(())
}

fn cmd_build_number(
    step: &UpdateBuildNumber,
    candidates: Vec<String>,
    today: NaiveDate,
    history: Option<PathBuf>,
    project: &str,
    json: bool,
) -> Result<()> {
    let outcome = match history {
        Some(path) => {
            let mut history = BuildHistory::open(path, project)?;
            step.execute(Some(&mut history), today)?
        }
        None => {
            let mut detail = Candidates {
                team_project: project.to_string(),
                build_numbers: candidates,
            };
            step.execute(Some(&mut detail), today)?
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.build_number);
    }
    Ok(())
}
