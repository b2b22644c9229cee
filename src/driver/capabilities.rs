use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One remote browser environment: what to run on and the label its session
/// reports under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteCapabilities {
    /// Browser name as the hub expects it (e.g. "Chrome", "Safari")
    pub browser: String,

    /// Browser version, usually "latest"
    #[serde(default)]
    pub browser_version: Option<String>,

    /// Desktop OS name; unset for device entries
    #[serde(default)]
    pub os: Option<String>,

    /// OS version name or number
    #[serde(default)]
    pub os_version: Option<String>,

    /// Mobile device name; replaces `os` for device entries
    #[serde(default)]
    pub device: Option<String>,

    /// Human-readable session label, also used in image filenames
    pub label: String,
}

impl RemoteCapabilities {
    pub fn desktop(browser: &str, os: &str, os_version: &str, label: &str) -> Self {
        Self {
            browser: browser.to_string(),
            browser_version: Some("latest".to_string()),
            os: Some(os.to_string()),
            os_version: Some(os_version.to_string()),
            device: None,
            label: label.to_string(),
        }
    }

    pub fn device(browser: &str, device: &str, os_version: &str, label: &str) -> Self {
        Self {
            browser: browser.to_string(),
            browser_version: None,
            os: None,
            os_version: Some(os_version.to_string()),
            device: Some(device.to_string()),
            label: label.to_string(),
        }
    }

    /// W3C `alwaysMatch` object for session creation, vendor options under
    /// `bstack:options`.
    pub fn to_always_match(&self) -> Value {
        let mut options = serde_json::Map::new();
        if let Some(ref os) = self.os {
            options.insert("os".to_string(), json!(os));
        }
        if let Some(ref os_version) = self.os_version {
            options.insert("osVersion".to_string(), json!(os_version));
        }
        if let Some(ref device) = self.device {
            options.insert("deviceName".to_string(), json!(device));
        }
        options.insert("sessionName".to_string(), json!(self.label));

        let mut caps = serde_json::Map::new();
        caps.insert("browserName".to_string(), json!(self.browser));
        if let Some(ref version) = self.browser_version {
            caps.insert("browserVersion".to_string(), json!(version));
        }
        caps.insert("bstack:options".to_string(), Value::Object(options));
        Value::Object(caps)
    }
}

/// The stock fleet: the five environments every run targets unless the
/// config file overrides them.
pub fn default_fleet() -> Vec<RemoteCapabilities> {
    vec![
        RemoteCapabilities::desktop("Chrome", "Windows", "11", "Windows Chrome"),
        RemoteCapabilities::desktop("Firefox", "OS X", "Ventura", "Mac Firefox"),
        RemoteCapabilities::desktop("Edge", "Windows", "10", "Windows Edge"),
        RemoteCapabilities::desktop("Chrome", "OS X", "Monterey", "Mac Chrome"),
        RemoteCapabilities::desktop("Safari", "OS X", "Ventura", "Mac Safari"),
    ]
}
