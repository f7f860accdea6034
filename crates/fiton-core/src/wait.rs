//! Explicit wait: poll the page until an element satisfies a condition.

use crate::driver::{Element, Page};
use crate::{Condition, Error, Locator, Result};
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Polling budget for [`wait_until`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl WaitPolicy {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// Wait until the first element matching `locator` satisfies `condition`.
///
/// The page is checked at least once, then every `poll_interval` until
/// `timeout` has elapsed, at which point [`Error::Timeout`] is returned.
/// The interval is fixed; there is no backoff.
pub async fn wait_until<P>(
    page: &P,
    locator: &Locator,
    condition: Condition,
    policy: WaitPolicy,
) -> Result<P::Element>
where
    P: Page + ?Sized,
{
    let start = Instant::now();
    let mut polls = 0u32;

    loop {
        polls += 1;

        if let Some(element) = page.query(locator).await? {
            if satisfies(&element, condition).await {
                tracing::debug!(
                    "{} became {} after {} poll(s)",
                    locator,
                    condition,
                    polls
                );
                return Ok(element);
            }
        }

        let elapsed = start.elapsed();
        if elapsed >= policy.timeout {
            return Err(Error::Timeout {
                locator: locator.to_string(),
                condition,
                timeout_ms: policy.timeout.as_millis(),
            });
        }

        let remaining = policy.timeout - elapsed;
        tokio::time::sleep(policy.poll_interval.min(remaining)).await;
    }
}

async fn satisfies<E: Element>(element: &E, condition: Condition) -> bool {
    match condition {
        Condition::Present => true,
        // An element detached mid-check simply isn't clickable yet
        Condition::Clickable => element.is_clickable().await.unwrap_or_else(|e| {
            tracing::debug!("Clickability check failed: {}", e);
            false
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeNode, FakePage};

    fn policy() -> WaitPolicy {
        WaitPolicy::new(Duration::from_secs(10), Duration::from_millis(500))
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_immediately_when_present() {
        let page = FakePage::new();
        page.add(FakeNode::new(Locator::name("height")));

        let start = Instant::now();
        let found = wait_until(&page, &Locator::name("height"), Condition::Present, policy()).await;

        assert!(found.is_ok());
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(page.query_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_until_element_appears() {
        let page = FakePage::new();
        page.add(FakeNode::new(Locator::class_name("alert-success")).appears_after(3));

        let start = Instant::now();
        let found = wait_until(
            &page,
            &Locator::class_name("alert-success"),
            Condition::Present,
            policy(),
        )
        .await;

        assert!(found.is_ok());
        // Three misses, each followed by one poll interval
        assert_eq!(start.elapsed(), Duration::from_millis(1500));
        assert_eq!(page.query_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_when_never_present() {
        let page = FakePage::new();

        let start = Instant::now();
        let err = wait_until(&page, &Locator::class_name("error"), Condition::Present, policy())
            .await
            .err()
            .unwrap();

        assert!(matches!(err, Error::Timeout { .. }));
        assert_eq!(start.elapsed(), Duration::from_secs(10));
        assert!(err.to_string().contains("class=\"error\""));
        assert!(err.to_string().contains("10000 ms"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_sleep_is_clamped_to_remaining_budget() {
        let page = FakePage::new();
        let policy = WaitPolicy::new(Duration::from_millis(1200), Duration::from_millis(500));

        let start = Instant::now();
        let result = wait_until(&page, &Locator::tag_name("img"), Condition::Present, policy).await;

        assert!(result.is_err());
        assert_eq!(start.elapsed(), Duration::from_millis(1200));
        // Checks at 0, 500, 1000 and 1200 ms
        assert_eq!(page.query_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timeout_checks_once() {
        let page = FakePage::new();
        let policy = WaitPolicy::new(Duration::ZERO, Duration::from_millis(500));

        let result = wait_until(&page, &Locator::tag_name("img"), Condition::Present, policy).await;

        assert!(matches!(result, Err(Error::Timeout { .. })));
        assert_eq!(page.query_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clickable_waits_for_enabled_element() {
        let page = FakePage::new();
        let button = Locator::button_text("Generate Avatar");
        page.add(FakeNode::new(button.clone()).clickable_after(2));

        let start = Instant::now();
        let found = wait_until(&page, &button, Condition::Clickable, policy()).await;

        assert!(found.is_ok());
        assert_eq!(start.elapsed(), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_present_ignores_clickability() {
        let page = FakePage::new();
        let button = Locator::button_text("Save");
        page.add(FakeNode::new(button.clone()).disabled());

        assert!(wait_until(&page, &button, Condition::Present, policy()).await.is_ok());

        let short = WaitPolicy::new(Duration::from_secs(1), Duration::from_millis(500));
        let err = wait_until(&page, &button, Condition::Clickable, short)
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("clickable"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_is_read_only() {
        let page = FakePage::new();
        page.add(FakeNode::new(Locator::name("height")));

        wait_until(&page, &Locator::name("height"), Condition::Clickable, policy())
            .await
            .unwrap();

        assert!(page.actions().is_empty());
    }
}
