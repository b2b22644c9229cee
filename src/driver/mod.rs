//! Browser session control.
//!
//! Two implementations sit behind the [`Driver`] trait:
//!
//! - [`ChromeDriver`]: local headless Chrome via chromiumoxide, with element
//!   queries expressed as JavaScript evaluated in the page.
//! - [`RemoteDriver`]: a remote cloud browser spoken to over the W3C
//!   WebDriver wire protocol.
//!
//! All waits are bounded: a query polls the page until it produces a value
//! or its deadline passes. Expiry is reported as absence (`None`, `false`,
//! or an empty list), never as an error. Whether absence is fatal is the
//! caller's decision.

pub mod capabilities;
mod chrome;
mod remote;

pub use capabilities::RemoteCapabilities;
pub use chrome::ChromeDriver;
pub use remote::RemoteDriver;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::SessionStatus;

/// Interval between element-presence probes during a bounded wait.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// One browser session: navigation, bounded element queries, and release.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate the session to `url` and wait for the page to load.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Wait for the first element matching `selector` and return its visible
    /// text, trimmed. `None` if nothing with non-empty text appears in time.
    async fn wait_for_text(&self, selector: &str, timeout: Duration) -> Result<Option<String>>;

    /// Wait for the first element matching `selector` and return `attr`
    /// (resolved property value preferred, e.g. absolute `href`/`src`).
    async fn wait_for_attr(
        &self,
        selector: &str,
        attr: &str,
        timeout: Duration,
    ) -> Result<Option<String>>;

    /// Wait until at least one element matches `selector`, then return
    /// `attr` for every match. Empty if none appear in time.
    async fn wait_for_attrs(
        &self,
        selector: &str,
        attr: &str,
        timeout: Duration,
    ) -> Result<Vec<String>>;

    /// Visible text of every element currently matching `selector`,
    /// empty entries dropped. No wait.
    async fn texts(&self, selector: &str) -> Result<Vec<String>>;

    /// Wait for an element matching `selector` and click it. `false` if it
    /// never appeared; absence is not an error.
    async fn click(&self, selector: &str, timeout: Duration) -> Result<bool>;

    /// Report the session's terminal status to the execution endpoint.
    /// Local sessions have nowhere to report to and ignore this.
    async fn set_status(&self, status: SessionStatus, reason: &str) -> Result<()>;

    /// Release the underlying browser session. Idempotent.
    async fn close(&self) -> Result<()>;
}

/// Run `probe` every [`POLL_INTERVAL`] until it yields a value or `timeout`
/// expires. The probe always runs at least once.
pub(crate) async fn poll_until<T, F, Fut>(timeout: Duration, mut probe: F) -> Result<Option<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if let Some(value) = probe().await? {
            return Ok(Some(value));
        }
        if tokio::time::Instant::now() >= deadline {
            return Ok(None);
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted in-memory driver for exercising the extractor and the
    //! session state machine without a browser.

    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::Driver;
    use crate::app::{PrensaError, Result};
    use crate::domain::SessionStatus;

    #[derive(Default)]
    pub struct StubDriver {
        /// selector → text returned by `wait_for_text`
        pub texts: HashMap<String, String>,
        /// (selector, attr) → value returned by `wait_for_attr`
        pub attrs: HashMap<(String, String), String>,
        /// (selector, attr) → values returned by `wait_for_attrs`
        pub attr_lists: HashMap<(String, String), Vec<String>>,
        /// selector → texts returned by `texts`
        pub text_lists: HashMap<String, Vec<String>>,
        /// selectors that respond to `click`
        pub clickable: HashSet<String>,
        /// URLs whose navigation fails
        pub unreachable: HashSet<String>,
        pub visited: Mutex<Vec<String>>,
        pub close_count: Arc<AtomicUsize>,
        pub reported: Arc<Mutex<Vec<(SessionStatus, String)>>>,
    }

    #[async_trait]
    impl Driver for StubDriver {
        async fn navigate(&self, url: &str) -> Result<()> {
            if self.unreachable.contains(url) {
                return Err(PrensaError::Driver(format!("navigation failed: {url}")));
            }
            self.visited.lock().unwrap().push(url.to_string());
            Ok(())
        }

        async fn wait_for_text(&self, selector: &str, _: Duration) -> Result<Option<String>> {
            Ok(self.texts.get(selector).cloned())
        }

        async fn wait_for_attr(
            &self,
            selector: &str,
            attr: &str,
            _: Duration,
        ) -> Result<Option<String>> {
            Ok(self.attrs.get(&(selector.into(), attr.into())).cloned())
        }

        async fn wait_for_attrs(
            &self,
            selector: &str,
            attr: &str,
            _: Duration,
        ) -> Result<Vec<String>> {
            Ok(self
                .attr_lists
                .get(&(selector.into(), attr.into()))
                .cloned()
                .unwrap_or_default())
        }

        async fn texts(&self, selector: &str) -> Result<Vec<String>> {
            Ok(self.text_lists.get(selector).cloned().unwrap_or_default())
        }

        async fn click(&self, selector: &str, _: Duration) -> Result<bool> {
            Ok(self.clickable.contains(selector))
        }

        async fn set_status(&self, status: SessionStatus, reason: &str) -> Result<()> {
            self.reported
                .lock()
                .unwrap()
                .push((status, reason.to_string()));
            Ok(())
        }

        async fn close(&self) -> Result<()> {
            self.close_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_poll_until_returns_first_value() {
        let calls = AtomicUsize::new(0);
        let result = poll_until(Duration::from_secs(1), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(Some(42)) }
        })
        .await
        .unwrap();
        assert_eq!(result, Some(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_poll_until_times_out_as_absence() {
        let result: Option<i32> = poll_until(Duration::from_millis(1), || async { Ok(None) })
            .await
            .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_poll_until_probes_at_least_once_with_zero_timeout() {
        let calls = AtomicUsize::new(0);
        let result = poll_until(Duration::ZERO, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(Some("hit")) }
        })
        .await
        .unwrap();
        assert_eq!(result, Some("hit"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
