use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use url::Url;

use crate::app::{PrensaError, Result};
use crate::domain::SessionStatus;
use crate::driver::{poll_until, Driver, RemoteCapabilities};

/// W3C element identifier key in WebDriver responses.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// A remote browser session spoken to over the W3C WebDriver wire protocol.
///
/// The hub URL carries the account credentials as userinfo; they are lifted
/// off the URL and sent as basic auth on every request. Element absence
/// ("no such element") is a normal answer, not an error.
pub struct RemoteDriver {
    client: Client,
    endpoint: Url,
    username: String,
    password: Option<String>,
    session_id: String,
    closed: AtomicBool,
}

impl RemoteDriver {
    /// Create a session on the hub with the given capabilities.
    pub async fn connect(hub: Url, capabilities: &RemoteCapabilities) -> Result<Self> {
        let mut endpoint = hub.clone();
        let username = hub.username().to_string();
        let password = hub.password().map(String::from);
        endpoint
            .set_username("")
            .and_then(|_| endpoint.set_password(None))
            .map_err(|_| PrensaError::Config("hub URL cannot carry credentials".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("prensa/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let body = json!({
            "capabilities": { "alwaysMatch": capabilities.to_always_match() }
        });

        let url = join_path(&endpoint, "session")?;
        let mut request = client.request(Method::POST, url).json(&body);
        if !username.is_empty() {
            request = request.basic_auth(&username, password.as_deref());
        }

        let response = request.send().await?;
        let status = response.status();
        let value: Value = response.json().await?;

        if !status.is_success() {
            return Err(PrensaError::Driver(format!(
                "Session creation failed ({}): {}",
                status,
                wire_error(&value)
            )));
        }

        let session_id = value["value"]["sessionId"]
            .as_str()
            .ok_or_else(|| {
                PrensaError::Driver("Session creation response missing sessionId".to_string())
            })?
            .to_string();

        Ok(Self {
            client,
            endpoint,
            username,
            password,
            session_id,
            closed: AtomicBool::new(false),
        })
    }

    fn session_url(&self, path: &str) -> Result<Url> {
        let mut full = format!("session/{}", self.session_id);
        if !path.is_empty() {
            full.push('/');
            full.push_str(path);
        }
        join_path(&self.endpoint, &full)
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let mut request = self.client.request(method, self.session_url(path)?);
        if !self.username.is_empty() {
            request = request.basic_auth(&self.username, self.password.as_deref());
        }
        // WebDriver POST bodies are mandatory, `{}` when there are no params
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let value: Value = response.json().await?;

        if !status.is_success() {
            let error = wire_error(&value);
            if error == "no such element" {
                return Ok(Value::Null);
            }
            return Err(PrensaError::Driver(format!(
                "WebDriver {} failed ({}): {}",
                path, status, error
            )));
        }

        Ok(value)
    }

    /// Find the first element matching `selector`. `None` when absent.
    async fn find_element(&self, selector: &str) -> Result<Option<String>> {
        let body = json!({ "using": "css selector", "value": selector });
        let value = self.send(Method::POST, "element", Some(body)).await?;
        Ok(value["value"][ELEMENT_KEY].as_str().map(String::from))
    }

    /// All elements matching `selector`.
    async fn find_elements(&self, selector: &str) -> Result<Vec<String>> {
        let body = json!({ "using": "css selector", "value": selector });
        let value = self.send(Method::POST, "elements", Some(body)).await?;
        let ids = value["value"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item[ELEMENT_KEY].as_str())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Ok(ids)
    }

    async fn element_text(&self, element_id: &str) -> Result<Option<String>> {
        let value = self
            .send(Method::GET, &format!("element/{}/text", element_id), None)
            .await?;
        Ok(value["value"]
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from))
    }

    /// Resolved property value first (absolute `href`/`src`), falling back
    /// to the raw attribute.
    async fn element_attr(&self, element_id: &str, attr: &str) -> Result<Option<String>> {
        let value = self
            .send(
                Method::GET,
                &format!("element/{}/property/{}", element_id, attr),
                None,
            )
            .await?;
        if let Some(s) = value["value"].as_str().filter(|s| !s.is_empty()) {
            return Ok(Some(s.to_string()));
        }

        let value = self
            .send(
                Method::GET,
                &format!("element/{}/attribute/{}", element_id, attr),
                None,
            )
            .await?;
        Ok(value["value"]
            .as_str()
            .filter(|s| !s.is_empty())
            .map(String::from))
    }

    async fn execute(&self, script: &str) -> Result<Value> {
        let body = json!({ "script": script, "args": [] });
        self.send(Method::POST, "execute/sync", Some(body)).await
    }
}

fn join_path(endpoint: &Url, path: &str) -> Result<Url> {
    let base = endpoint.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!("{}/{}", base, path))?)
}

fn wire_error(value: &Value) -> String {
    match value["value"]["error"].as_str() {
        Some(error) => {
            let message = value["value"]["message"].as_str().unwrap_or("");
            if message.is_empty() {
                error.to_string()
            } else {
                format!("{}: {}", error, message)
            }
        }
        None => value.to_string(),
    }
}

/// Vendor script marking the session passed or failed on the remote
/// dashboard, with a human-readable reason.
fn status_script(status: SessionStatus, reason: &str) -> String {
    let payload = json!({
        "action": "setSessionStatus",
        "arguments": { "status": status.as_str(), "reason": reason }
    });
    format!("browserstack_executor: {}", payload)
}

#[async_trait]
impl Driver for RemoteDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.send(Method::POST, "url", Some(json!({ "url": url })))
            .await?;
        Ok(())
    }

    async fn wait_for_text(&self, selector: &str, timeout: Duration) -> Result<Option<String>> {
        poll_until(timeout, || async move {
            match self.find_element(selector).await? {
                Some(id) => self.element_text(&id).await,
                None => Ok(None),
            }
        })
        .await
    }

    async fn wait_for_attr(
        &self,
        selector: &str,
        attr: &str,
        timeout: Duration,
    ) -> Result<Option<String>> {
        poll_until(timeout, || async move {
            match self.find_element(selector).await? {
                Some(id) => self.element_attr(&id, attr).await,
                None => Ok(None),
            }
        })
        .await
    }

    async fn wait_for_attrs(
        &self,
        selector: &str,
        attr: &str,
        timeout: Duration,
    ) -> Result<Vec<String>> {
        let ids = poll_until(timeout, || async move {
            let ids = self.find_elements(selector).await?;
            Ok((!ids.is_empty()).then_some(ids))
        })
        .await?
        .unwrap_or_default();

        let mut values = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(value) = self.element_attr(&id, attr).await? {
                values.push(value);
            }
        }
        Ok(values)
    }

    async fn texts(&self, selector: &str) -> Result<Vec<String>> {
        let ids = self.find_elements(selector).await?;
        let mut texts = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(text) = self.element_text(&id).await? {
                texts.push(text);
            }
        }
        Ok(texts)
    }

    async fn click(&self, selector: &str, timeout: Duration) -> Result<bool> {
        let id = poll_until(timeout, || async move { self.find_element(selector).await }).await?;
        match id {
            Some(id) => {
                self.send(
                    Method::POST,
                    &format!("element/{}/click", id),
                    Some(json!({})),
                )
                .await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_status(&self, status: SessionStatus, reason: &str) -> Result<()> {
        self.execute(&status_script(status, reason)).await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.send(Method::DELETE, "", None).await?;
        Ok(())
    }
}
