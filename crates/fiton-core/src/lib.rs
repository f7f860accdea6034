pub mod catalog;
pub mod config;
pub mod data_uri;
pub mod driver;
pub mod error;
pub mod filter;
pub mod locator;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod wait;

#[cfg(test)]
mod fake;

pub use config::RunConfig;
pub use driver::{Element, Page};
pub use error::{Error, Result};
pub use locator::{Condition, Locator};
pub use report::{ScenarioOutcome, SuiteReport};
pub use runner::ScenarioRunner;
pub use scenario::{Scenario, Step};
pub use wait::{WaitPolicy, wait_until};
