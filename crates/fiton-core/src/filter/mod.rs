mod pattern;

pub use pattern::ScenarioPattern;

use crate::Scenario;

/// Parse a list of pattern strings
pub fn parse_patterns(patterns: &[String]) -> crate::Result<Vec<ScenarioPattern>> {
    patterns.iter().map(|p| ScenarioPattern::parse(p)).collect()
}

/// Scenarios matching any of `patterns`, in their original order
///
/// An empty pattern list selects every scenario.
pub fn select<'a>(scenarios: &'a [Scenario], patterns: &[ScenarioPattern]) -> Vec<&'a Scenario> {
    scenarios
        .iter()
        .filter(|s| patterns.is_empty() || patterns.iter().any(|p| p.matches(&s.name)))
        .collect()
}
