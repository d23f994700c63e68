pub mod content_check;
pub mod reports;
pub mod tester;
pub mod timeline;

pub use content_check::{ContentReport, check_content};
pub use tester::{LogicTester, ScenarioResult};
pub use timeline::{TimelinePlan, TimelineReport, run_timeline};
