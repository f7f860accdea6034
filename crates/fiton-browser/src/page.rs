use crate::Error;
use async_trait::async_trait;
use chromiumoxide::cdp::js_protocol::runtime::CallFunctionOnReturns;
use fiton_core::{Locator, Result};

/// Empties inputs through the native setter so framework-controlled
/// fields (React and friends) observe the change
const CLEAR_VALUE_JS: &str = r#"function() {
    const proto = this instanceof HTMLTextAreaElement
        ? HTMLTextAreaElement.prototype
        : HTMLInputElement.prototype;
    Object.getOwnPropertyDescriptor(proto, 'value').set.call(this, '');
    this.dispatchEvent(new Event('input', { bubbles: true }));
    this.dispatchEvent(new Event('change', { bubbles: true }));
}"#;

const IS_CLICKABLE_JS: &str = r#"function() {
    if (!this.isConnected || this.disabled) return false;
    const style = window.getComputedStyle(this);
    if (style.visibility === 'hidden' || style.display === 'none') return false;
    const rect = this.getBoundingClientRect();
    return rect.width > 0 && rect.height > 0;
}"#;

/// A Chrome tab driven over CDP
#[derive(Clone)]
pub struct ChromePage {
    inner: chromiumoxide::Page,
}

impl ChromePage {
    pub(crate) fn new(inner: chromiumoxide::Page) -> Self {
        Self { inner }
    }

    async fn find_all(&self, locator: &Locator) -> crate::Result<Vec<chromiumoxide::Element>> {
        if let Locator::XPath(xpath) = locator {
            return Ok(self.inner.find_xpaths(xpath.as_str()).await?);
        }

        let selector = locator
            .to_css()
            .ok_or_else(|| Error::Browser(format!("No CSS selector for {}", locator)))?;
        Ok(self.inner.find_elements(selector).await?)
    }
}

#[async_trait]
impl fiton_core::Page for ChromePage {
    type Element = ChromeElement;

    async fn goto(&self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        self.inner.goto(url).await.map_err(Error::from)?;
        Ok(())
    }

    async fn query(&self, locator: &Locator) -> Result<Option<ChromeElement>> {
        // Lookups race page rendering; a failed lookup means "not there yet"
        match self.find_all(locator).await {
            Ok(elements) => Ok(elements.into_iter().next().map(ChromeElement::new)),
            Err(e) => {
                tracing::debug!("Lookup of {} failed: {}", locator, e);
                Ok(None)
            }
        }
    }
}

pub struct ChromeElement {
    inner: chromiumoxide::Element,
}

impl ChromeElement {
    fn new(inner: chromiumoxide::Element) -> Self {
        Self { inner }
    }

    async fn call(&self, function: &str) -> crate::Result<CallFunctionOnReturns> {
        let returns = self.inner.call_js_fn(function, false).await?;
        if let Some(details) = &returns.exception_details {
            let message = details
                .exception
                .as_ref()
                .and_then(|e| e.description.clone())
                .unwrap_or_else(|| details.text.clone());
            return Err(Error::Script(message));
        }
        Ok(returns)
    }
}

#[async_trait]
impl fiton_core::Element for ChromeElement {
    async fn clear(&self) -> Result<()> {
        self.call(CLEAR_VALUE_JS).await?;
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        self.inner.focus().await.map_err(Error::from)?;
        self.inner.type_str(text).await.map_err(Error::from)?;
        Ok(())
    }

    async fn click(&self) -> Result<()> {
        self.inner.click().await.map_err(Error::from)?;
        Ok(())
    }

    async fn text(&self) -> Result<String> {
        let text = self.inner.inner_text().await.map_err(Error::from)?;
        Ok(text.unwrap_or_default())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.inner.attribute(name).await.map_err(Error::from)?)
    }

    async fn value(&self) -> Result<String> {
        let value = self.inner.property("value").await.map_err(Error::from)?;
        Ok(value
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    async fn is_clickable(&self) -> Result<bool> {
        let returns = self.call(IS_CLICKABLE_JS).await?;
        Ok(returns
            .result
            .value
            .as_ref()
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false))
    }
}
