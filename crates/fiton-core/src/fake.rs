//! In-memory page used by unit tests in place of a browser.

use crate::driver::{Element, Page};
use crate::{Error, Locator, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub(crate) struct FakeNode {
    locator: Locator,
    path: Option<String>,
    text: String,
    attributes: HashMap<String, String>,
    misses_remaining: u32,
    unclickable_checks: u32,
    disabled: bool,
    revealed_by: Option<Locator>,
    numeric: bool,
    value: String,
}

impl FakeNode {
    pub(crate) fn new(locator: Locator) -> Self {
        Self {
            locator,
            path: None,
            text: String::new(),
            attributes: HashMap::new(),
            misses_remaining: 0,
            unclickable_checks: 0,
            disabled: false,
            revealed_by: None,
            numeric: false,
            value: String::new(),
        }
    }

    /// Only rendered while the current URL ends with `path`
    pub(crate) fn on_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    pub(crate) fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub(crate) fn attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Missing for the first `misses` queries
    pub(crate) fn appears_after(mut self, misses: u32) -> Self {
        self.misses_remaining = misses;
        self
    }

    /// Not clickable for the first `checks` clickability checks
    pub(crate) fn clickable_after(mut self, checks: u32) -> Self {
        self.unclickable_checks = checks;
        self
    }

    pub(crate) fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Behaves like `<input type="number">`: non-numeric text is dropped
    pub(crate) fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    /// Hidden until an element matching `locator` is clicked
    pub(crate) fn revealed_by(mut self, locator: Locator) -> Self {
        self.revealed_by = Some(locator);
        self
    }
}

#[derive(Default)]
struct State {
    nodes: Vec<FakeNode>,
    url: Option<String>,
    queries: usize,
    actions: Vec<String>,
    goto_error: Option<String>,
}

impl State {
    fn rendered(&self, node: &FakeNode) -> bool {
        if node.revealed_by.is_some() {
            return false;
        }
        match (&node.path, &self.url) {
            (Some(path), Some(url)) => url.ends_with(path.as_str()),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakePage {
    state: Arc<Mutex<State>>,
}

impl FakePage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&self, node: FakeNode) {
        self.state.lock().unwrap().nodes.push(node);
    }

    pub(crate) fn fail_navigation(&self, message: &str) {
        self.state.lock().unwrap().goto_error = Some(message.to_string());
    }

    pub(crate) fn query_count(&self) -> usize {
        self.state.lock().unwrap().queries
    }

    /// Mutating calls in the order they happened
    pub(crate) fn actions(&self) -> Vec<String> {
        self.state.lock().unwrap().actions.clone()
    }

    /// Current value typed into the first node matching `locator`
    pub(crate) fn value_of(&self, locator: &Locator) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .nodes
            .iter()
            .find(|n| &n.locator == locator)
            .map(|n| n.value.clone())
    }
}

#[async_trait]
impl Page for FakePage {
    type Element = FakeElement;

    async fn goto(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.goto_error {
            return Err(Error::Driver(message.clone()));
        }
        state.actions.push(format!("goto {}", url));
        state.url = Some(url.to_string());
        Ok(())
    }

    async fn query(&self, locator: &Locator) -> Result<Option<FakeElement>> {
        let mut state = self.state.lock().unwrap();
        state.queries += 1;

        let index = (0..state.nodes.len())
            .find(|&i| state.nodes[i].locator == *locator && state.rendered(&state.nodes[i]));

        let Some(index) = index else {
            return Ok(None);
        };

        let node = &mut state.nodes[index];
        if node.misses_remaining > 0 {
            node.misses_remaining -= 1;
            return Ok(None);
        }

        Ok(Some(FakeElement {
            state: Arc::clone(&self.state),
            index,
        }))
    }
}

pub(crate) struct FakeElement {
    state: Arc<Mutex<State>>,
    index: usize,
}

impl FakeElement {
    fn with_node<T>(&self, f: impl FnOnce(&mut FakeNode) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut state.nodes[self.index])
    }

    fn record(&self, action: String) {
        self.state.lock().unwrap().actions.push(action);
    }
}

#[async_trait]
impl Element for FakeElement {
    async fn clear(&self) -> Result<()> {
        let locator = self.with_node(|n| {
            n.value.clear();
            n.locator.clone()
        });
        self.record(format!("clear {}", locator));
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        let locator = self.with_node(|n| {
            let typed = format!("{}{}", n.value, text);
            if !n.numeric || typed.parse::<f64>().is_ok() {
                n.value = typed;
            }
            n.locator.clone()
        });
        self.record(format!("type {} {}", locator, text));
        Ok(())
    }

    async fn click(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let locator = state.nodes[self.index].locator.clone();
        for node in state.nodes.iter_mut() {
            if node.revealed_by.as_ref() == Some(&locator) {
                node.revealed_by = None;
            }
        }
        state.actions.push(format!("click {}", locator));
        Ok(())
    }

    async fn text(&self) -> Result<String> {
        Ok(self.with_node(|n| n.text.clone()))
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.with_node(|n| n.attributes.get(name).cloned()))
    }

    async fn value(&self) -> Result<String> {
        Ok(self.with_node(|n| n.value.clone()))
    }

    async fn is_clickable(&self) -> Result<bool> {
        Ok(self.with_node(|n| {
            if n.disabled {
                return false;
            }
            if n.unclickable_checks > 0 {
                n.unclickable_checks -= 1;
                return false;
            }
            true
        }))
    }
}
