use advent_core::{CalendarConfig, UnlockSchedule};
use anyhow::Result;

pub mod catalog;

pub use catalog::{catalog_scenarios, get_scenario, list_scenarios};

/// Inputs shared by every logic scenario.
#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    pub config: CalendarConfig,
    pub verbose: bool,
}

impl ScenarioCtx {
    pub fn schedule(&self) -> UnlockSchedule {
        UnlockSchedule::new(self.config.unlock_hour)
    }
}

pub type Expectation = fn(&ScenarioCtx) -> Result<()>;

#[derive(Clone)]
pub struct LogicScenario {
    key: &'static str,
    description: &'static str,
    expectation: Expectation,
}

impl LogicScenario {
    pub const fn new(key: &'static str, description: &'static str, expectation: Expectation) -> Self {
        Self {
            key,
            description,
            expectation,
        }
    }

    pub const fn key(&self) -> &'static str {
        self.key
    }

    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// # Errors
    ///
    /// Returns the first violated expectation.
    pub fn run(&self, ctx: &ScenarioCtx) -> Result<()> {
        (self.expectation)(ctx)
    }
}

impl std::fmt::Debug for LogicScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogicScenario")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
