use serde::{Deserialize, Serialize};
use std::fmt;

/// Search strategy plus value identifying zero or more page elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum Locator {
    /// Matches the `name` attribute
    Name(String),
    /// Matches a single CSS class
    ClassName(String),
    /// Matches the element tag
    TagName(String),
    /// Raw CSS selector
    Css(String),
    /// XPath expression
    #[serde(rename = "xpath")]
    XPath(String),
}

impl Locator {
    pub fn name(value: impl Into<String>) -> Self {
        Locator::Name(value.into())
    }

    pub fn class_name(value: impl Into<String>) -> Self {
        Locator::ClassName(value.into())
    }

    pub fn tag_name(value: impl Into<String>) -> Self {
        Locator::TagName(value.into())
    }

    pub fn css(value: impl Into<String>) -> Self {
        Locator::Css(value.into())
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Locator::XPath(value.into())
    }

    /// A `<button>` whose own text contains `text`
    pub fn button_text(text: &str) -> Self {
        Locator::XPath(format!("//button[contains(text(),'{}')]", text))
    }

    /// CSS selector equivalent, or `None` for XPath locators
    pub fn to_css(&self) -> Option<String> {
        match self {
            Locator::Name(name) => Some(format!("[name=\"{}\"]", escape_css_string(name))),
            Locator::ClassName(class) => Some(format!(".{}", escape_css_ident(class))),
            Locator::TagName(tag) => Some(tag.clone()),
            Locator::Css(selector) => Some(selector.clone()),
            Locator::XPath(_) => None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Name(v) => write!(f, "name={:?}", v),
            Locator::ClassName(v) => write!(f, "class={:?}", v),
            Locator::TagName(v) => write!(f, "tag={:?}", v),
            Locator::Css(v) => write!(f, "css={:?}", v),
            Locator::XPath(v) => write!(f, "xpath={:?}", v),
        }
    }
}

fn escape_css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn escape_css_ident(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        let leading_digit = i == 0 && c.is_ascii_digit();
        if leading_digit || !(c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()) {
            if leading_digit {
                out.push_str(&format!("\\{:x} ", c as u32));
            } else {
                out.push('\\');
                out.push(c);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Predicate family used by the explicit wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Exists in the page structure
    Present,
    /// Present, visible and enabled for interaction
    Clickable,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Present => f.write_str("present"),
            Condition::Clickable => f.write_str("clickable"),
        }
    }
}
