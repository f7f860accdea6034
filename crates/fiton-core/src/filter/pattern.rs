use glob::Pattern;

/// Pattern selecting scenarios by name
#[derive(Debug, Clone)]
pub enum ScenarioPattern {
    /// Exact name match (case-insensitive)
    Exact(String),
    /// Glob pattern match (e.g., measurements-*)
    Glob(Pattern),
}

impl ScenarioPattern {
    /// Parse a pattern string into a ScenarioPattern
    ///
    /// If the pattern contains '*', '?' or '[', it's treated as a glob pattern.
    /// Otherwise, it's treated as an exact match (case-insensitive).
    pub fn parse(pattern: &str) -> crate::Result<Self> {
        if pattern.contains(['*', '?', '[']) {
            let pattern_lower = pattern.to_lowercase();
            let glob_pattern = Pattern::new(&pattern_lower).map_err(|e| {
                crate::Error::InvalidPattern(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;
            Ok(ScenarioPattern::Glob(glob_pattern))
        } else {
            Ok(ScenarioPattern::Exact(pattern.to_lowercase()))
        }
    }

    /// Check if a scenario name matches this pattern
    pub fn matches(&self, name: &str) -> bool {
        let name_lower = name.to_lowercase();
        match self {
            ScenarioPattern::Exact(pattern) => &name_lower == pattern,
            ScenarioPattern::Glob(pattern) => pattern.matches(&name_lower),
        }
    }
}
