//! Configuration management.
//!
//! Configuration is read from `~/.config/prensa/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is
//! created. Remote credentials never live in the file: they come from the
//! `BROWSERSTACK_USERNAME` / `BROWSERSTACK_ACCESS_KEY` environment
//! variables and are embedded into the hub URL at runtime.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::analyzer::AnalyzerConfig;
use crate::fleet::FleetConfig;
use crate::session::ScrapeConfig;
use crate::translator::TranslationConfig;

/// Environment variable holding the remote hub username.
pub const USERNAME_VAR: &str = "BROWSERSTACK_USERNAME";

/// Environment variable holding the remote hub access key.
pub const ACCESS_KEY_VAR: &str = "BROWSERSTACK_ACCESS_KEY";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub translation: TranslationConfig,
    pub analyzer: AnalyzerConfig,
    pub fleet: FleetConfig,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/prensa/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("prensa").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let default_config = Self::default_config_content();

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(default_config.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Prensa configuration
#
# Remote credentials are never read from this file. Export
# BROWSERSTACK_USERNAME and BROWSERSTACK_ACCESS_KEY before running
# the fleet.

[scrape]
# Listing page the session starts from
listing_url = "https://elpais.com/opinion/"

# Articles scraped per session
article_limit = 5

# Cookie-consent button; absence is not an error
cookie_selector = "#didomi-notice-agree-button"

# Article links on the listing page
link_selector = "article header h2 a"

# Article heading element
heading_selector = "h1"

# "summary" reads one designated paragraph; "lead-paragraphs" concatenates
# the first excerpt_paragraphs non-empty body paragraphs
excerpt_mode = "summary"
excerpt_selector = "p.a_st"
paragraph_selector = "article p"
excerpt_paragraphs = 3

# Cover image element
image_selector = "article img, figure img"

# Directory cover images are saved under
images_dir = "article_images"

# Bounded waits, in seconds
cookie_timeout_secs = 5
discovery_timeout_secs = 10
field_timeout_secs = 10

# Run the local browser headless
headless = true

[translation]
source = "es"
target = "en"
endpoint = "https://translate.googleapis.com/translate_a/single"
timeout_secs = 10

[analyzer]
# Report words occurring strictly more than this many times
threshold = 2

# Minimum token length; 0 disables the filter
min_word_len = 3

# Drop tokens containing digits or underscores
alphabetic_only = true

stop_words = ["the", "and", "for", "with", "that", "this", "will", "are", "but", "not"]

[fleet]
# Worker pool size
workers = 5

# Remote execution hub, without credentials
hub_url = "https://hub-cloud.browserstack.com/wd/hub"

[[fleet.sessions]]
browser = "Chrome"
browser_version = "latest"
os = "Windows"
os_version = "11"
label = "Windows Chrome"

[[fleet.sessions]]
browser = "Firefox"
browser_version = "latest"
os = "OS X"
os_version = "Ventura"
label = "Mac Firefox"

[[fleet.sessions]]
browser = "Edge"
browser_version = "latest"
os = "Windows"
os_version = "10"
label = "Windows Edge"

[[fleet.sessions]]
browser = "Chrome"
browser_version = "latest"
os = "OS X"
os_version = "Monterey"
label = "Mac Chrome"

[[fleet.sessions]]
browser = "Safari"
browser_version = "latest"
os = "OS X"
os_version = "Ventura"
label = "Mac Safari"
"##
        .to_string()
    }
}

/// Remote hub credentials, sourced from the environment.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub access_key: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        let username = std::env::var(USERNAME_VAR)
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingCredentials)?;
        let access_key = std::env::var(ACCESS_KEY_VAR)
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingCredentials)?;

        Ok(Self {
            username,
            access_key,
        })
    }

    /// Embed the credentials into the hub URL as userinfo.
    pub fn hub_url(&self, base: &str) -> Result<Url, ConfigError> {
        let mut url =
            Url::parse(base).map_err(|e| ConfigError::InvalidHubUrl(format!("{base}: {e}")))?;
        url.set_username(&self.username)
            .and_then(|_| url.set_password(Some(&self.access_key)))
            .map_err(|_| {
                ConfigError::InvalidHubUrl(format!("{base}: cannot carry credentials"))
            })?;
        Ok(url)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Remote credentials not set; export {USERNAME_VAR} and {ACCESS_KEY_VAR}")]
    MissingCredentials,

    #[error("Invalid hub URL: {0}")]
    InvalidHubUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ExcerptMode;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.scrape.article_limit, 5);
        assert_eq!(config.scrape.excerpt_mode, ExcerptMode::Summary);
        assert_eq!(config.translation.source, "es");
        assert_eq!(config.analyzer.threshold, 2);
        assert_eq!(config.fleet.sessions.len(), 5);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[scrape]
article_limit = 3
excerpt_mode = "lead-paragraphs"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        // Custom values
        assert_eq!(config.scrape.article_limit, 3);
        assert_eq!(config.scrape.excerpt_mode, ExcerptMode::LeadParagraphs);
        // Default values
        assert_eq!(config.scrape.heading_selector, "h1");
        assert_eq!(config.fleet.workers, 5);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert_eq!(config.scrape.article_limit, 5);
        assert_eq!(config.analyzer.threshold, 2);
        assert_eq!(config.fleet.sessions.len(), 5);
    }

    #[test]
    fn test_hub_url_embeds_credentials() {
        let credentials = Credentials {
            username: "alice".to_string(),
            access_key: "s3cret".to_string(),
        };
        let url = credentials
            .hub_url("https://hub-cloud.browserstack.com/wd/hub")
            .unwrap();
        assert_eq!(url.username(), "alice");
        assert_eq!(url.password(), Some("s3cret"));
        assert_eq!(url.host_str(), Some("hub-cloud.browserstack.com"));
    }

    #[test]
    fn test_hub_url_rejects_garbage() {
        let credentials = Credentials {
            username: "alice".to_string(),
            access_key: "s3cret".to_string(),
        };
        assert!(credentials.hub_url("not a url").is_err());
    }
}
