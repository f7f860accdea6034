use crate::{Condition, Locator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an element is located before use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "lookup", content = "condition", rename_all = "snake_case")]
pub enum Lookup {
    /// Query once; absence is an error
    Immediate,
    /// Poll until the condition holds or the wait budget runs out
    WaitFor(Condition),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub locator: Locator,
    #[serde(flatten)]
    pub lookup: Lookup,
}

impl Target {
    pub fn immediate(locator: Locator) -> Self {
        Self {
            locator,
            lookup: Lookup::Immediate,
        }
    }

    pub fn present(locator: Locator) -> Self {
        Self {
            locator,
            lookup: Lookup::WaitFor(Condition::Present),
        }
    }

    pub fn clickable(locator: Locator) -> Self {
        Self {
            locator,
            lookup: Lookup::WaitFor(Condition::Clickable),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lookup {
            Lookup::Immediate => write!(f, "{}", self.locator),
            Lookup::WaitFor(condition) => write!(f, "{} (wait until {})", self.locator, condition),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expectation {
    TextContains { text: String },
    AttributeStartsWith { name: String, prefix: String },
    /// Live value of a form control, e.g. what an input kept after typing
    ValueEquals { value: String },
    /// Attribute holds an inline image: it starts with `data:image`
    ImageDataUri { attribute: String },
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::TextContains { text } => write!(f, "text contains {:?}", text),
            Expectation::AttributeStartsWith { name, prefix } => {
                write!(f, "{} starts with {:?}", name, prefix)
            }
            Expectation::ValueEquals { value } => write!(f, "value is {:?}", value),
            Expectation::ImageDataUri { attribute } => {
                write!(f, "{} is an image data URI", attribute)
            }
        }
    }
}

/// One UI interaction or assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Navigate {
        path: String,
    },
    /// Clear the field, then type `value`
    Fill {
        target: Target,
        value: String,
    },
    Click {
        target: Target,
    },
    Expect {
        target: Target,
        expectation: Expectation,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Navigate { path } => write!(f, "navigate to {}", path),
            Step::Fill { target, value } => write!(f, "fill {} with {:?}", target, value),
            Step::Click { target } => write!(f, "click {}", target),
            Step::Expect {
                target,
                expectation,
            } => write!(f, "expect {} {}", target, expectation),
        }
    }
}

/// A named, linear sequence of steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            steps: Vec::new(),
        }
    }

    pub fn navigate(mut self, path: &str) -> Self {
        self.steps.push(Step::Navigate {
            path: path.to_string(),
        });
        self
    }

    pub fn fill(mut self, target: Target, value: &str) -> Self {
        self.steps.push(Step::Fill {
            target,
            value: value.to_string(),
        });
        self
    }

    pub fn click(mut self, target: Target) -> Self {
        self.steps.push(Step::Click { target });
        self
    }

    pub fn expect(mut self, target: Target, expectation: Expectation) -> Self {
        self.steps.push(Step::Expect {
            target,
            expectation,
        });
        self
    }
}
