use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, LevelFilter, Log, Metadata, Record};

use pandash::dashboard::{self, ApiResponse, ChartData, FilterState, SurveyData};
use pandash::{AggFunc, DashboardConfig, Result};

/// Render survey questions as chart-ready JSON series
#[derive(Debug, Parser)]
#[command(name = "pandash", version, about)]
struct Args {
    /// Survey JSON document (bare or wrapped in an API response)
    #[arg(long)]
    data: Option<PathBuf>,

    /// TOML or YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Question ids to render; all questions when omitted
    #[arg(long = "question")]
    questions: Vec<String>,

    #[arg(long = "company-size")]
    company_size: Vec<String>,

    #[arg(long)]
    industry: Vec<String>,

    #[arg(long)]
    quarter: Vec<String>,

    /// Override the configured aggregation (sum, mean, count)
    #[arg(long)]
    aggregation: Option<AggFunc>,

    /// Wrap the output in a `{success, data, timestamp}` envelope
    #[arg(long)]
    envelope: bool,

    #[arg(long)]
    pretty: bool,
}

/// Minimal stderr backend for the `log` facade
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn render(args: &Args, config: &DashboardConfig) -> Result<Vec<ChartData>> {
    let data = SurveyData::load(&config.data_path)?;
    let filters = FilterState {
        company_size: args.company_size.clone(),
        industry: args.industry.clone(),
        quarter: args.quarter.clone(),
    };
    let options = config.chart_options();

    if args.questions.is_empty() {
        return dashboard::process_all(&data, &filters, &options);
    }

    args.questions
        .iter()
        .map(|id| {
            let question = data.question(id).ok_or_else(|| {
                pandash::Error::Config(format!("unknown question '{}'", id))
            })?;
            dashboard::process_chart_data(question, &filters, &options)
        })
        .collect()
}

fn run(args: &Args) -> Result<String> {
    let mut config = DashboardConfig::load(args.config.as_deref())?;
    if let Some(path) = &args.data {
        config.data_path = path.clone();
    }
    if let Some(aggregation) = args.aggregation {
        config.aggregation = aggregation;
    }
    init_logging(config.level_filter()?);
    info!("reading survey data from {}", config.data_path.display());

    let charts = render(args, &config);
    let value = if args.envelope {
        let response = match charts {
            Ok(charts) => ApiResponse::ok(charts),
            Err(e) => ApiResponse::failure(e),
        };
        serde_json::to_value(response)?
    } else {
        serde_json::to_value(charts?)?
    };

    let text = if args.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(text)
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
