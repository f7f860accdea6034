//! Seam between the scenario runner and a concrete browser driver.
//!
//! The runner and [`wait_until`](crate::wait::wait_until) only need a page
//! that can navigate and answer "first element matching this locator", plus
//! a handful of element operations. `fiton-browser` implements these on top
//! of the Chrome DevTools Protocol.

use crate::{Locator, Result};
use async_trait::async_trait;

/// A live page in a browser session
#[async_trait]
pub trait Page: Send + Sync {
    type Element: Element;

    /// Navigate to an absolute URL and wait for the load to finish
    async fn goto(&self, url: &str) -> Result<()>;

    /// First element matching `locator`, or `None` if nothing matches yet
    async fn query(&self, locator: &Locator) -> Result<Option<Self::Element>>;
}

/// Handle to a single DOM element, valid until the page changes under it
#[async_trait]
pub trait Element: Send + Sync {
    /// Empty an input's value
    async fn clear(&self) -> Result<()>;

    /// Type `text` into the element as keystrokes
    async fn type_text(&self, text: &str) -> Result<()>;

    async fn click(&self) -> Result<()>;

    /// Rendered text content
    async fn text(&self) -> Result<String>;

    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Current `value` property of a form control, empty if it has none
    async fn value(&self) -> Result<String>;

    /// Visible and enabled for interaction
    async fn is_clickable(&self) -> Result<bool>;
}
