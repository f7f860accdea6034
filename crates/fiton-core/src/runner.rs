use crate::config::RunConfig;
use crate::data_uri::DataUri;
use crate::driver::{Element, Page};
use crate::report::{ScenarioOutcome, StepRecord, SuiteReport};
use crate::scenario::{Expectation, Lookup, Scenario, Step, Target};
use crate::wait::wait_until;
use crate::{Error, Result};
use std::time::Instant;

const IMAGE_DATA_PREFIX: &str = "data:image";

/// Executes scenarios step by step on a single page
pub struct ScenarioRunner<'a, P: Page> {
    page: &'a P,
    config: &'a RunConfig,
}

impl<'a, P: Page> ScenarioRunner<'a, P> {
    pub fn new(page: &'a P, config: &'a RunConfig) -> Self {
        Self { page, config }
    }

    /// Run every scenario in order on the shared page
    pub async fn run_all(&self, scenarios: &[&Scenario]) -> SuiteReport {
        let start = Instant::now();
        let mut report = SuiteReport::new(self.config.base_url().as_str());

        tracing::info!("Running {} scenario(s)...", scenarios.len());

        for scenario in scenarios {
            report.record(self.run(scenario).await);
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        report
    }

    /// Run one scenario, stopping at the first failing step
    pub async fn run(&self, scenario: &Scenario) -> ScenarioOutcome {
        let start = Instant::now();
        let mut steps = Vec::with_capacity(scenario.steps.len());

        tracing::info!("Scenario {}: {}", scenario.name, scenario.description);

        for (index, step) in scenario.steps.iter().enumerate() {
            let step_start = Instant::now();
            tracing::debug!("  [{}] {}", index + 1, step);

            if let Err(e) = self.run_step(step).await {
                tracing::warn!("Scenario {} failed at step {}: {}", scenario.name, index + 1, e);
                return ScenarioOutcome {
                    name: scenario.name.clone(),
                    passed: false,
                    duration_ms: start.elapsed().as_millis() as u64,
                    steps,
                    failed_step: Some(step.to_string()),
                    error: Some(e.to_string()),
                };
            }

            steps.push(StepRecord {
                index,
                description: step.to_string(),
                duration_ms: step_start.elapsed().as_millis() as u64,
            });
        }

        tracing::info!("Scenario {} passed", scenario.name);

        ScenarioOutcome {
            name: scenario.name.clone(),
            passed: true,
            duration_ms: start.elapsed().as_millis() as u64,
            steps,
            failed_step: None,
            error: None,
        }
    }

    async fn run_step(&self, step: &Step) -> Result<()> {
        match step {
            Step::Navigate { path } => {
                let url = self.config.url_for(path)?;
                self.page.goto(url.as_str()).await
            }
            Step::Fill { target, value } => {
                let element = self.locate(target).await?;
                element.clear().await?;
                element.type_text(value).await
            }
            Step::Click { target } => self.locate(target).await?.click().await,
            Step::Expect {
                target,
                expectation,
            } => {
                let element = self.locate(target).await?;
                check(&element, target, expectation).await
            }
        }
    }

    async fn locate(&self, target: &Target) -> Result<P::Element> {
        match target.lookup {
            Lookup::Immediate => self
                .page
                .query(&target.locator)
                .await?
                .ok_or_else(|| Error::ElementNotFound(target.locator.to_string())),
            Lookup::WaitFor(condition) => {
                wait_until(self.page, &target.locator, condition, self.config.wait).await
            }
        }
    }
}

async fn check<E: Element>(element: &E, target: &Target, expectation: &Expectation) -> Result<()> {
    match expectation {
        Expectation::TextContains { text } => {
            let actual = element.text().await?;
            if actual.contains(text.as_str()) {
                Ok(())
            } else {
                Err(Error::Assertion(format!(
                    "expected text of {} to contain {:?}, got {:?}",
                    target.locator, text, actual
                )))
            }
        }
        Expectation::AttributeStartsWith { name, prefix } => {
            let actual = required_attribute(element, target, name).await?;
            if actual.starts_with(prefix.as_str()) {
                Ok(())
            } else {
                Err(Error::Assertion(format!(
                    "expected {} of {} to start with {:?}, got {:?}",
                    name,
                    target.locator,
                    prefix,
                    abbreviate(&actual)
                )))
            }
        }
        Expectation::ValueEquals { value } => {
            let actual = element.value().await?;
            if actual == *value {
                Ok(())
            } else {
                Err(Error::Assertion(format!(
                    "expected value of {} to be {:?}, got {:?}",
                    target.locator, value, actual
                )))
            }
        }
        Expectation::ImageDataUri { attribute } => {
            let actual = required_attribute(element, target, attribute).await?;
            if !actual.starts_with(IMAGE_DATA_PREFIX) {
                return Err(Error::Assertion(format!(
                    "expected {} of {} to start with {:?}, got {:?}",
                    attribute,
                    target.locator,
                    IMAGE_DATA_PREFIX,
                    abbreviate(&actual)
                )));
            }

            describe_payload(target, &actual);
            Ok(())
        }
    }
}

/// Log what the image payload holds; the prefix alone decides the outcome
fn describe_payload(target: &Target, src: &str) {
    match DataUri::parse(src) {
        Ok(uri) if uri.is_image() => {
            tracing::debug!("{} holds {} bytes of {}", target.locator, uri.data.len(), uri.mime)
        }
        Ok(uri) => tracing::debug!("{} holds a non-image {} payload", target.locator, uri.mime),
        Err(e) => tracing::debug!("{} payload not decodable: {}", target.locator, e),
    }
}

async fn required_attribute<E: Element>(element: &E, target: &Target, name: &str) -> Result<String> {
    element.attribute(name).await?.ok_or_else(|| {
        Error::Assertion(format!("{} has no {} attribute", target.locator, name))
    })
}

/// Data URIs can be megabytes long; keep messages readable
fn abbreviate(value: &str) -> String {
    const MAX_CHARS: usize = 64;
    if value.chars().count() <= MAX_CHARS {
        value.to_string()
    } else {
        let head: String = value.chars().take(MAX_CHARS).collect();
        format!("{}...", head)
    }
}
