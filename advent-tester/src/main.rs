mod common;
mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use advent_core::CalendarConfig;
use common::scenario::{LogicScenario, ScenarioCtx, catalog_scenarios, get_scenario, list_scenarios};
use common::{FileSource, load_config, parse_day_list, parse_instant, split_csv};
use logic::{
    ContentReport, LogicTester, ScenarioResult, TimelinePlan, TimelineReport, check_content,
    run_timeline,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestMode {
    /// Built-in logic scenarios (fast, no browser)
    Scenarios,
    /// Step through a time range and print every unlock
    Timeline,
    /// Validate a question document on disk
    Content,
}

#[derive(Debug, Parser)]
#[command(name = "advent-tester", version)]
#[command(about = "QA tooling for the advent calendar - logic scenarios, timelines and content checks")]
struct Args {
    /// What to run
    #[arg(long, value_enum, default_value_t = TestMode::Scenarios)]
    mode: TestMode,

    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Calendar config JSON (unlock hour, storage key, document name)
    #[arg(long)]
    config: Option<PathBuf>,

    // Timeline options
    /// Timeline start, YYYY-MM-DDTHH:MM
    #[arg(long, default_value = "2025-11-30T00:00")]
    from: String,

    /// Timeline end, YYYY-MM-DDTHH:MM
    #[arg(long, default_value = "2025-12-25T00:00")]
    to: String,

    /// Minutes between timeline passes
    #[arg(long, default_value_t = 60)]
    step_minutes: i64,

    /// Days already revealed (comma-separated)
    #[arg(long, default_value = "")]
    revealed: String,

    // Content options
    /// Directory holding the question document
    #[arg(long, default_value = ".")]
    content_dir: PathBuf,

    /// Document name; defaults to the config's content document
    #[arg(long)]
    content_name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();
    let config = load_config(args.config.as_deref())?;
    let start_time = Instant::now();

    let passed = match args.mode {
        TestMode::Scenarios => {
            let results = run_logic_scenarios(&args, &config);
            write_scenario_reports(&args, &results, start_time)?;
            results.iter().all(|r| r.passed)
        }
        TestMode::Timeline => {
            let report = build_timeline(&args, &config)?;
            write_timeline_report(&args, &report)?;
            true
        }
        TestMode::Content => {
            let report = run_content_check(&args, &config).await;
            write_content_report(&args, &report)?;
            report.accepted
        }
    };

    if !passed {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:28} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎄 Advent Calendar Tester".bright_cyan().bold());
    println!("{}", "=========================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<LogicScenario> {
    let requested = split_csv(scenarios_arg);
    if requested.iter().any(|s| s == "all") {
        return catalog_scenarios();
    }
    requested
        .iter()
        .filter_map(|name| {
            let scenario = get_scenario(name);
            if scenario.is_none() {
                eprintln!("⚠️  Unknown scenario: {}", name.yellow());
            }
            scenario
        })
        .collect()
}

fn run_logic_scenarios(args: &Args, config: &CalendarConfig) -> Vec<ScenarioResult> {
    println!("{}", "🧠 Running Logic Scenarios".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let scenarios = expand_scenarios(&args.scenarios);
    let tester = LogicTester::new(ScenarioCtx {
        config: config.clone(),
        verbose: args.verbose,
    });
    tester.run_scenarios(&scenarios)
}

fn build_timeline(args: &Args, config: &CalendarConfig) -> Result<TimelineReport> {
    let plan = TimelinePlan {
        from: parse_instant(&args.from)?,
        to: parse_instant(&args.to)?,
        step_minutes: args.step_minutes,
        revealed: parse_day_list(&args.revealed)?,
    };
    if args.verbose {
        println!("🗓️  Timeline plan: {plan:?}");
    }
    run_timeline(config, &plan).context("invalid timeline")
}

async fn run_content_check(args: &Args, config: &CalendarConfig) -> ContentReport {
    let document = args
        .content_name
        .clone()
        .unwrap_or_else(|| config.content_document.clone());
    if args.verbose {
        println!(
            "📄 Checking {} in {}",
            document.bright_white(),
            args.content_dir.display()
        );
    }
    let source = FileSource::new(&args.content_dir);
    check_content(&source, &document).await
}

fn write_scenario_reports(
    args: &Args,
    results: &[ScenarioResult],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Advent Logic Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No logic scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

fn write_timeline_report(args: &Args, report: &TimelineReport) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, report)?,
        "markdown" => logic::reports::generate_timeline_markdown(&mut output_target, report)?,
        _ => logic::reports::generate_timeline_console(&mut output_target, report)?,
    }
    output_target.flush_inner()?;
    Ok(())
}

fn write_content_report(args: &Args, report: &ContentReport) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, report)?,
        "markdown" => logic::reports::generate_content_markdown(&mut output_target, report)?,
        _ => logic::reports::generate_content_console(&mut output_target, report)?,
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
