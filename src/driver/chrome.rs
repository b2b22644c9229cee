use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::sync::Mutex;

use crate::app::{PrensaError, Result};
use crate::domain::SessionStatus;
use crate::driver::{poll_until, Driver};

struct ChromeSession {
    browser: Browser,
    page: Page,
}

/// Local Chrome session driven over CDP via chromiumoxide.
///
/// Element queries are small generated JavaScript snippets evaluated in the
/// page; a query that finds nothing returns `null`/`[]` and the bounded
/// wait re-probes until its deadline.
pub struct ChromeDriver {
    session: Mutex<Option<ChromeSession>>,
}

impl ChromeDriver {
    /// Launch a local Chrome and open a blank page for the session.
    pub async fn launch(headless: bool) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer");

        if !headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| PrensaError::Driver(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            PrensaError::Driver(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        // Drive the browser's event loop for the lifetime of the session
        tokio::spawn(async move {
            while let Some(_event) = handler.next().await {
                // Handle browser events
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| PrensaError::Driver(format!("Failed to create page: {}", e)))?;

        Ok(Self {
            session: Mutex::new(Some(ChromeSession { browser, page })),
        })
    }

    async fn evaluate(&self, script: String) -> Result<serde_json::Value> {
        let guard = self.session.lock().await;
        let session = guard
            .as_ref()
            .ok_or_else(|| PrensaError::Driver("session already closed".to_string()))?;

        let value: serde_json::Value = session
            .page
            .evaluate(script)
            .await
            .map_err(|e| PrensaError::Driver(format!("Script execution failed: {}", e)))?
            .into_value()
            .map_err(|e| PrensaError::Driver(format!("Failed to parse result: {:?}", e)))?;

        Ok(value)
    }

    fn string_or_none(value: serde_json::Value) -> Option<String> {
        value
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    }

    fn string_list(value: serde_json::Value) -> Vec<String> {
        value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn js_str(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn text_script(selector: &str) -> String {
    format!(
        r#"
        (() => {{
            const el = document.querySelector({sel});
            if (!el) return null;
            const text = el.innerText;
            return text && text.trim() ? text.trim() : null;
        }})()
        "#,
        sel = js_str(selector)
    )
}

fn attr_script(selector: &str, attr: &str) -> String {
    format!(
        r#"
        (() => {{
            const el = document.querySelector({sel});
            if (!el) return null;
            return el[{attr}] || el.getAttribute({attr}) || null;
        }})()
        "#,
        sel = js_str(selector),
        attr = js_str(attr)
    )
}

fn attrs_script(selector: &str, attr: &str) -> String {
    format!(
        r#"
        (() => Array.from(document.querySelectorAll({sel}))
            .map(el => el[{attr}] || el.getAttribute({attr}))
            .filter(Boolean))()
        "#,
        sel = js_str(selector),
        attr = js_str(attr)
    )
}

fn texts_script(selector: &str) -> String {
    format!(
        r#"
        (() => Array.from(document.querySelectorAll({sel}))
            .map(el => el.innerText.trim())
            .filter(t => t.length > 0))()
        "#,
        sel = js_str(selector)
    )
}

fn click_script(selector: &str) -> String {
    format!(
        r#"
        (() => {{
            const el = document.querySelector({sel});
            if (!el) return false;
            el.click();
            return true;
        }})()
        "#,
        sel = js_str(selector)
    )
}

#[async_trait]
impl Driver for ChromeDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        let guard = self.session.lock().await;
        let session = guard
            .as_ref()
            .ok_or_else(|| PrensaError::Driver("session already closed".to_string()))?;

        session
            .page
            .goto(url)
            .await
            .map_err(|e| PrensaError::Driver(format!("Navigation to {} failed: {}", url, e)))?;

        session
            .page
            .wait_for_navigation()
            .await
            .map_err(|e| PrensaError::Driver(format!("Navigation to {} failed: {}", url, e)))?;

        Ok(())
    }

    async fn wait_for_text(&self, selector: &str, timeout: Duration) -> Result<Option<String>> {
        let script = text_script(selector);
        poll_until(timeout, || {
            let script = script.clone();
            async move { Ok(Self::string_or_none(self.evaluate(script).await?)) }
        })
        .await
    }

    async fn wait_for_attr(
        &self,
        selector: &str,
        attr: &str,
        timeout: Duration,
    ) -> Result<Option<String>> {
        let script = attr_script(selector, attr);
        poll_until(timeout, || {
            let script = script.clone();
            async move { Ok(Self::string_or_none(self.evaluate(script).await?)) }
        })
        .await
    }

    async fn wait_for_attrs(
        &self,
        selector: &str,
        attr: &str,
        timeout: Duration,
    ) -> Result<Vec<String>> {
        let script = attrs_script(selector, attr);
        let found = poll_until(timeout, || {
            let script = script.clone();
            async move {
                let values = Self::string_list(self.evaluate(script).await?);
                Ok((!values.is_empty()).then_some(values))
            }
        })
        .await?;
        Ok(found.unwrap_or_default())
    }

    async fn texts(&self, selector: &str) -> Result<Vec<String>> {
        Ok(Self::string_list(self.evaluate(texts_script(selector)).await?))
    }

    async fn click(&self, selector: &str, timeout: Duration) -> Result<bool> {
        let script = click_script(selector);
        let clicked = poll_until(timeout, || {
            let script = script.clone();
            async move {
                let value = self.evaluate(script).await?;
                Ok(value.as_bool().unwrap_or(false).then_some(true))
            }
        })
        .await?;
        Ok(clicked.unwrap_or(false))
    }

    async fn set_status(&self, _status: SessionStatus, _reason: &str) -> Result<()> {
        // Local sessions have no execution endpoint to report to
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let mut guard = self.session.lock().await;
        if let Some(mut session) = guard.take() {
            if let Err(e) = session.page.close().await {
                tracing::debug!("Failed to close page: {}", e);
            }
            session
                .browser
                .close()
                .await
                .map_err(|e| PrensaError::Driver(format!("Failed to close browser: {}", e)))?;
        }
        Ok(())
    }
}
