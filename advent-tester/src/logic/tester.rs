use colored::Colorize;
use serde::{Serialize, Serializer};
use std::time::{Duration, Instant};

use crate::common::scenario::{LogicScenario, ScenarioCtx};

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub description: String,
    pub passed: bool,
    pub failures: Vec<String>,
    #[serde(serialize_with = "serialize_duration_ms")]
    pub duration: Duration,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_duration_ms<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

pub struct LogicTester {
    ctx: ScenarioCtx,
}

impl LogicTester {
    pub const fn new(ctx: ScenarioCtx) -> Self {
        Self { ctx }
    }

    pub fn run_scenarios(&self, scenarios: &[LogicScenario]) -> Vec<ScenarioResult> {
        scenarios
            .iter()
            .map(|scenario| self.run_scenario(scenario))
            .collect()
    }

    pub fn run_scenario(&self, scenario: &LogicScenario) -> ScenarioResult {
        if self.ctx.verbose {
            println!("🧪 Testing scenario: {}", scenario.key().bright_white());
        }
        let started = Instant::now();
        let outcome = scenario.run(&self.ctx);
        let duration = started.elapsed();
        let failures = match outcome {
            Ok(()) => Vec::new(),
            Err(err) => {
                log::debug!("scenario {} failed: {err:#}", scenario.key());
                vec![format!("{err:#}")]
            }
        };
        ScenarioResult {
            scenario_name: scenario.key().to_string(),
            description: scenario.description().to_string(),
            passed: failures.is_empty(),
            failures,
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_core::CalendarConfig;
    use anyhow::bail;

    fn tester() -> LogicTester {
        LogicTester::new(ScenarioCtx {
            config: CalendarConfig::default(),
            verbose: false,
        })
    }

    #[test]
    fn failing_expectation_is_recorded() {
        let scenario = LogicScenario::new("always-fails", "fails", |_| bail!("boom"));
        let result = tester().run_scenario(&scenario);
        assert!(!result.passed);
        assert_eq!(result.failures, vec!["boom".to_string()]);
    }

    #[test]
    fn passing_expectation_serializes_duration_in_ms() {
        let scenario = LogicScenario::new("always-passes", "passes", |_| Ok(()));
        let result = tester().run_scenario(&scenario);
        assert!(result.passed);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["duration"].is_f64());
        assert_eq!(json["scenario_name"], "always-passes");
    }
}
