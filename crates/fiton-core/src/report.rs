use serde::{Deserialize, Serialize};

/// A step that completed successfully
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub index: usize,
    pub description: String,
    pub duration_ms: u64,
}

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub passed: bool,
    pub duration_ms: u64,
    pub steps: Vec<StepRecord>,
    /// Step that failed, if any
    pub failed_step: Option<String>,
    pub error: Option<String>,
}

/// Result of running a set of scenarios against one application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub base_url: String,
    pub started_at: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            started_at: chrono::Utc::now().to_rfc3339(),
            total: 0,
            passed: 0,
            failed: 0,
            duration_ms: 0,
            results: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: ScenarioOutcome) {
        self.total += 1;
        if outcome.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(outcome);
    }

    /// True when every recorded scenario passed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.results.iter().filter(|r| !r.passed)
    }
}
