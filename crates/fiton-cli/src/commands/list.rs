use crate::OutputFormat;
use anyhow::Result;
use fiton_core::{Scenario, catalog};

/// Scenario listing entry for structured output
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub description: String,
    pub steps: Vec<String>,
}

impl From<&Scenario> for ScenarioSummary {
    fn from(scenario: &Scenario) -> Self {
        Self {
            name: scenario.name.clone(),
            description: scenario.description.clone(),
            steps: scenario.steps.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Built-in scenarios in run order
pub fn summaries() -> Vec<ScenarioSummary> {
    catalog::builtin().iter().map(ScenarioSummary::from).collect()
}

pub fn execute(show_steps: bool, format: OutputFormat) -> Result<()> {
    let summaries = summaries();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        OutputFormat::Table => {
            println!("Scenario,Steps,Description");
            for summary in &summaries {
                println!(
                    "{},{},{}",
                    summary.name,
                    summary.steps.len(),
                    summary.description
                );
            }
        }
        OutputFormat::Pretty => output_pretty(&summaries, show_steps),
    }

    Ok(())
}

fn output_pretty(summaries: &[ScenarioSummary], show_steps: bool) {
    use console::style;

    println!("\n{}", style("Built-in scenarios:").bold());
    println!();

    for summary in summaries {
        println!("  {}", style(&summary.name).cyan());
        println!("    {}", summary.description);
        if show_steps {
            for (i, step) in summary.steps.iter().enumerate() {
                println!("      {}. {}", i + 1, step);
            }
        }
    }

    println!();
}
