//! Run built-in scenarios against a live FITON instance in Chrome.
//!
//! ```bash
//! # Everything, against the default local app
//! fiton-e2e
//!
//! # Only the measurement form, headless, against staging
//! fiton-e2e run --headless --base-url https://staging.fiton.app -s 'measurements-*'
//! ```

use crate::OutputFormat;
use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use fiton_browser::{BrowserSession, ChromePage, DEFAULT_DEBUGGING_PORT, LaunchOptions, SessionOptions};
use fiton_core::config::DEFAULT_BASE_URL;
use fiton_core::{RunConfig, Scenario, ScenarioOutcome, ScenarioRunner, SuiteReport, catalog, filter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Base URL of the FITON app under test
    #[arg(long, value_name = "URL", env = "FITON_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seconds to wait for an element before failing a scenario
    #[arg(long, value_name = "SECS", env = "FITON_WAIT_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,

    /// Milliseconds between checks while waiting for an element
    #[arg(long, value_name = "MS", default_value_t = 500)]
    pub poll_interval: u64,

    /// Only run scenarios matching this name or glob (repeatable)
    #[arg(short = 's', long = "scenario", value_name = "PATTERN")]
    pub scenarios: Vec<String>,

    /// Path to the Chrome or Chromium binary
    #[arg(long, value_name = "PATH", env = "FITON_CHROME")]
    pub chrome_path: Option<PathBuf>,

    /// Run Chrome without a visible window
    #[arg(long)]
    pub headless: bool,

    /// Accept invalid TLS certificates (e.g. a local dev certificate)
    #[arg(long)]
    pub insecure: bool,

    /// Reuse a named Chrome profile stored in ~/.fiton-e2e/profiles
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Use a temporary profile that is deleted afterwards (overrides --profile)
    #[arg(long)]
    pub temp: bool,

    /// Chrome remote debugging port
    #[arg(long, value_name = "PORT", default_value_t = DEFAULT_DEBUGGING_PORT)]
    pub debugging_port: u16,

    /// Also write the JSON report to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

/// Validate settings and pick scenarios before any browser is launched
pub fn prepare(args: &RunArgs) -> Result<(RunConfig, Vec<Scenario>)> {
    let config = RunConfig::new(&args.base_url)?
        .with_timeout(Duration::from_secs(args.timeout))
        .with_poll_interval(Duration::from_millis(args.poll_interval))?;

    let patterns = filter::parse_patterns(&args.scenarios)?;
    let all = catalog::builtin();
    let selected: Vec<Scenario> = filter::select(&all, &patterns)
        .into_iter()
        .cloned()
        .collect();

    if selected.is_empty() {
        bail!("No scenarios match: {}", args.scenarios.join(", "));
    }

    Ok((config, selected))
}

fn session_options(args: &RunArgs) -> SessionOptions {
    let profile = if args.temp {
        if args.profile.is_some() {
            tracing::warn!("--temp overrides --profile; using a temporary profile");
        }
        None
    } else {
        args.profile.clone()
    };

    SessionOptions {
        chrome_path: args.chrome_path.clone(),
        profile,
        launch: LaunchOptions {
            debugging_port: args.debugging_port,
            headless: args.headless,
            maximized: true,
            ignore_certificate_errors: args.insecure,
        },
    }
}

pub fn execute(args: RunArgs, format: OutputFormat) -> Result<()> {
    let (config, scenarios) = prepare(&args)?;
    tracing::debug!(
        "Running {} scenario(s) against {} (format: {})",
        scenarios.len(),
        config.base_url(),
        format.as_str()
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(run_in_browser(&config, &scenarios, session_options(&args), format));

    // Explicitly shutdown runtime with timeout to prevent hanging on blocking tasks
    runtime.shutdown_timeout(Duration::from_millis(100));

    let report = result?;

    if let Some(path) = &args.report {
        write_report(&report, path)?;
    }

    match format {
        OutputFormat::Json => output_json(&report)?,
        OutputFormat::Table => output_table(&report),
        OutputFormat::Pretty => output_summary(&report),
    }

    if !report.is_success() {
        return Err(anyhow!(
            "{} of {} scenario(s) failed",
            report.failed,
            report.total
        ));
    }

    Ok(())
}

/// One browser session for all scenarios, closed whatever the outcome
async fn run_in_browser(
    config: &RunConfig,
    scenarios: &[Scenario],
    options: SessionOptions,
    format: OutputFormat,
) -> Result<SuiteReport> {
    let session = BrowserSession::start(options).await?;

    let selected: Vec<&Scenario> = scenarios.iter().collect();
    let report = match format {
        OutputFormat::Pretty => run_with_progress(session.page(), config, &selected).await,
        _ => ScenarioRunner::new(session.page(), config).run_all(&selected).await,
    };

    if let Err(e) = session.close().await {
        tracing::warn!("Browser did not close cleanly: {}", e);
    }

    Ok(report)
}

async fn run_with_progress(page: &ChromePage, config: &RunConfig, scenarios: &[&Scenario]) -> SuiteReport {
    use console::style;
    use indicatif::{ProgressBar, ProgressStyle};

    let runner = ScenarioRunner::new(page, config);
    let mut report = SuiteReport::new(config.base_url().as_str());
    let start = Instant::now();

    println!("\n{}", style(format!("FITON E2E: {}", config.base_url())).bold().cyan());
    println!();

    for scenario in scenarios {
        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::with_template("  {spinner} {msg} {elapsed}") {
            spinner.set_style(spinner_style);
        }
        spinner.set_message(scenario.name.clone());
        spinner.enable_steady_tick(Duration::from_millis(100));

        let outcome = runner.run(scenario).await;
        spinner.finish_and_clear();

        print_outcome(&outcome);
        report.record(outcome);
    }

    report.duration_ms = start.elapsed().as_millis() as u64;
    report
}

fn print_outcome(outcome: &ScenarioOutcome) {
    use console::style;

    if outcome.passed {
        println!(
            "  {} {} {}",
            style("✓").green(),
            outcome.name,
            style(format!("({} ms)", outcome.duration_ms)).dim()
        );
        return;
    }

    println!(
        "  {} {} {}",
        style("✗").red(),
        style(&outcome.name).red(),
        style(format!("({} ms)", outcome.duration_ms)).dim()
    );
    if let Some(step) = &outcome.failed_step {
        println!("      at: {}", step);
    }
    if let Some(error) = &outcome.error {
        println!("      {}", style(error).red());
    }
}

fn output_summary(report: &SuiteReport) {
    use console::style;

    let passed = style(format!("{} passed", report.passed)).green();
    let failed = if report.failed > 0 {
        style(format!("{} failed", report.failed)).red()
    } else {
        style(format!("{} failed", report.failed)).dim()
    };

    println!(
        "\n{} {}, {}, {} total ({:.1} s)\n",
        style("Summary:").bold(),
        passed,
        failed,
        report.total,
        report.duration_ms as f64 / 1000.0
    );
}

fn output_json(report: &SuiteReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn output_table(report: &SuiteReport) {
    println!("Scenario,Result,Duration (ms),Error");
    for outcome in &report.results {
        println!(
            "{},{},{},{}",
            outcome.name,
            if outcome.passed { "pass" } else { "fail" },
            outcome.duration_ms,
            csv_field(outcome.error.as_deref().unwrap_or(""))
        );
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn write_report(report: &SuiteReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    tracing::info!("Report written to: {}", path.display());
    Ok(())
}
