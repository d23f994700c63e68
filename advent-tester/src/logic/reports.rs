use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::{ContentReport, ScenarioResult, TimelineReport};

fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = (passed as f64 / total as f64) * 100.0;
    rate
}

fn day_list<T: std::fmt::Display>(days: &[T]) -> String {
    if days.is_empty() {
        return "none".to_string();
    }
    days.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn generate_console_report(
    writer: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "📊 Logic Test Results Summary".bright_cyan().bold())?;
    writeln!(writer, "{}", "==============================".cyan())?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();
    let failed_tests = total_tests - passed_tests;

    writeln!(writer, "Total scenarios: {total_tests}")?;
    writeln!(writer, "Passed: {}", passed_tests.to_string().green())?;
    writeln!(writer, "Failed: {}", failed_tests.to_string().red())?;
    writeln!(
        writer,
        "Success rate: {:.1}%",
        success_rate(passed_tests, total_tests)
    )?;
    writeln!(writer, "Total time: {total_duration:?}")?;
    writeln!(writer)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(writer, "{} {}", status, result.scenario_name.bold())?;
        writeln!(writer, "   {}", result.description)?;
        writeln!(writer, "   Time: {:?}", result.duration)?;
        if !result.failures.is_empty() {
            writeln!(writer, "   Failures:")?;
            for failure in &result.failures {
                writeln!(writer, "     • {}", failure.red())?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn generate_json_report<T: serde::Serialize + ?Sized>(
    writer: &mut dyn Write,
    report: &T,
) -> Result<()> {
    let json_output = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(writer: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(writer, "# Advent Logic Test Results\n")?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();
    let failed_tests = total_tests - passed_tests;

    writeln!(writer, "## Summary\n")?;
    writeln!(writer, "- **Total scenarios**: {total_tests}")?;
    writeln!(writer, "- **Passed**: {passed_tests}")?;
    writeln!(writer, "- **Failed**: {failed_tests}")?;
    writeln!(
        writer,
        "- **Success rate**: {:.1}%\n",
        success_rate(passed_tests, total_tests)
    )?;

    writeln!(writer, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(writer, "### {} {}\n", status, result.scenario_name)?;
        writeln!(writer, "{}\n", result.description)?;
        writeln!(writer, "- **Time**: {:?}", result.duration)?;
        if !result.failures.is_empty() {
            writeln!(writer, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(writer, "  - {failure}")?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn generate_timeline_console(writer: &mut dyn Write, report: &TimelineReport) -> Result<()> {
    writeln!(writer, "{}", "🗓️  Unlock Timeline".bright_cyan().bold())?;
    writeln!(
        writer,
        "{} → {} every {} min ({} passes)",
        report.from, report.to, report.step_minutes, report.passes
    )?;
    writeln!(writer, "Revealed: {}", day_list(&report.revealed))?;
    writeln!(writer)?;
    if report.events.is_empty() {
        writeln!(writer, "No days unlocked in range.")?;
    }
    for event in &report.events {
        writeln!(
            writer,
            "{}  unlocked day {} ({} open)",
            event.at.to_string().bold(),
            day_list(&event.unlocked).green(),
            event.unlocked_total
        )?;
    }
    if let Some((day, at)) = report.next_unlock {
        writeln!(writer)?;
        writeln!(writer, "Next unlock: day {day} at {at}")?;
    }
    Ok(())
}

pub fn generate_timeline_markdown(writer: &mut dyn Write, report: &TimelineReport) -> Result<()> {
    writeln!(writer, "# Advent Unlock Timeline\n")?;
    writeln!(
        writer,
        "- **Range**: {} to {} (step {} min, {} passes)",
        report.from, report.to, report.step_minutes, report.passes
    )?;
    writeln!(writer, "- **Revealed**: {}\n", day_list(&report.revealed))?;
    writeln!(writer, "| Time | Unlocked | Open |")?;
    writeln!(writer, "|---|---|---|")?;
    for event in &report.events {
        writeln!(
            writer,
            "| {} | {} | {} |",
            event.at,
            day_list(&event.unlocked),
            event.unlocked_total
        )?;
    }
    Ok(())
}

pub fn generate_content_console(writer: &mut dyn Write, report: &ContentReport) -> Result<()> {
    let verdict = if report.accepted {
        "✅ ACCEPTED".green()
    } else {
        "❌ REJECTED".red()
    };
    writeln!(writer, "{} {}", verdict, report.status.bold())?;
    if let Some(error) = &report.error {
        writeln!(writer, "   Error: {}", error.red())?;
    }
    writeln!(writer, "   Filled slots: {}", report.filled_slots)?;
    writeln!(writer, "   Misplaced days: {}", day_list(&report.misplaced_days))?;
    writeln!(
        writer,
        "   Placeholder days: {}",
        day_list(&report.placeholder_days)
    )?;
    Ok(())
}

pub fn generate_content_markdown(writer: &mut dyn Write, report: &ContentReport) -> Result<()> {
    writeln!(writer, "# Content Check: {}\n", report.document)?;
    writeln!(writer, "- **Status**: {}", report.status)?;
    writeln!(writer, "- **Accepted**: {}", report.accepted)?;
    if let Some(error) = &report.error {
        writeln!(writer, "- **Error**: {error}")?;
    }
    writeln!(writer, "- **Filled slots**: {}", report.filled_slots)?;
    writeln!(writer, "- **Misplaced days**: {}", day_list(&report.misplaced_days))?;
    writeln!(
        writer,
        "- **Placeholder days**: {}",
        day_list(&report.placeholder_days)
    )?;
    Ok(())
}
