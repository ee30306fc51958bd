//! Runs the university-town housing analysis from the command line.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use housing_core::{Baseline, Config, DeclineMeasure, InputPaths};
use housing_hypothesis::{Analysis, AnalysisReport};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Are university-town housing prices less affected by recessions?
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Quarterly GDP table (CSV).
    #[arg(long)]
    gdp: PathBuf,

    /// University-town listing (text).
    #[arg(long)]
    towns: PathBuf,

    /// City-level monthly housing prices (CSV).
    #[arg(long)]
    housing: PathBuf,

    /// JSON configuration file. Flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Decline measure.
    #[arg(long, value_enum)]
    measure: Option<MeasureArg>,

    /// Quarter the decline is measured from.
    #[arg(long, value_enum)]
    baseline: Option<BaselineArg>,

    /// Use Welch's unequal-variance t-test.
    #[arg(long, default_value_t = false)]
    welch: bool,

    /// Significance level for rejecting the null hypothesis.
    #[arg(long)]
    alpha: Option<f64>,

    /// Print the full report as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MeasureArg {
    Ratio,
    Difference,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BaselineArg {
    Start,
    BeforeStart,
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(measure) = self.measure {
            config.test.measure = match measure {
                MeasureArg::Ratio => DeclineMeasure::Ratio,
                MeasureArg::Difference => DeclineMeasure::Difference,
            };
        }
        if let Some(baseline) = self.baseline {
            config.test.baseline = match baseline {
                BaselineArg::Start => Baseline::RecessionStart,
                BaselineArg::BeforeStart => Baseline::QuarterBeforeStart,
            };
        }
        if self.welch {
            config.test.equal_variance = false;
        }
        if let Some(alpha) = self.alpha {
            config.test.significance = alpha;
        }
        Ok(config)
    }

    fn paths(&self) -> InputPaths {
        InputPaths {
            gdp: self.gdp.clone(),
            university_towns: self.towns.clone(),
            housing: self.housing.clone(),
        }
    }
}

fn print_summary(report: &AnalysisReport) {
    let r = &report.recession;
    let o = &report.outcome;
    println!("university towns:   {}", report.university_towns);
    println!("recession start:    {}", r.start.quarter);
    println!("recession end:      {}", r.end.quarter);
    println!("recession bottom:   {}", r.bottom.quarter);
    println!(
        "housing table:      {} rows x {} columns",
        report.housing_shape.0, report.housing_shape.1
    );
    println!(
        "university towns:   n={} mean={:.6}",
        o.university.observations, o.university.mean
    );
    println!(
        "other towns:        n={} mean={:.6}",
        o.non_university.observations, o.non_university.mean
    );
    let (different, p, better) = o.as_tuple();
    println!("result:             ({different}, {p}, {better:?})");
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let analysis = Analysis::new(cli.config()?).context("invalid configuration")?;
    info!("measure {:?}", analysis.config().test.measure);

    let report = analysis.run(&cli.paths()).context("analysis failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}
