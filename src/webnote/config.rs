use crate::error::{Result, WebnoteError};
use crate::model::Priority;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_SUMMARIZE_URL: &str = "http://localhost:5000/summarize";
const DEFAULT_SUMMARIZE_TIMEOUT_SECS: u64 = 60;

/// Keys accepted by [`WebnoteConfig::get`] and [`WebnoteConfig::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "summarize-url",
    "summarize-timeout",
    "speak-summaries",
    "default-priority",
];

/// Configuration for webnote, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebnoteConfig {
    /// Endpoint receiving `POST {title, content}` and answering `{summary}`
    #[serde(default = "default_summarize_url")]
    pub summarize_url: String,

    /// Seconds to wait for the summarization service
    #[serde(default = "default_summarize_timeout")]
    pub summarize_timeout_secs: u64,

    /// Read summaries aloud after they are saved
    #[serde(default = "default_true")]
    pub speak_summaries: bool,

    /// Priority for notes created without an explicit one
    #[serde(default)]
    pub default_priority: Priority,
}

fn default_summarize_url() -> String {
    DEFAULT_SUMMARIZE_URL.to_string()
}

fn default_summarize_timeout() -> u64 {
    DEFAULT_SUMMARIZE_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

impl Default for WebnoteConfig {
    fn default() -> Self {
        Self {
            summarize_url: default_summarize_url(),
            summarize_timeout_secs: DEFAULT_SUMMARIZE_TIMEOUT_SECS,
            speak_summaries: true,
            default_priority: Priority::Medium,
        }
    }
}

impl WebnoteConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(WebnoteError::Io)?;
        let config: WebnoteConfig =
            serde_json::from_str(&content).map_err(WebnoteError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(WebnoteError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(WebnoteError::Serialization)?;
        fs::write(config_path, content).map_err(WebnoteError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "summarize-url" => Some(self.summarize_url.clone()),
            "summarize-timeout" => Some(self.summarize_timeout_secs.to_string()),
            "speak-summaries" => Some(self.speak_summaries.to_string()),
            "default-priority" => Some(self.default_priority.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "summarize-url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(WebnoteError::Config(format!(
                        "summarize-url must be an http(s) URL, got {}",
                        value
                    )));
                }
                self.summarize_url = value.to_string();
            }
            "summarize-timeout" => {
                self.summarize_timeout_secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| {
                        WebnoteError::Config(format!(
                            "summarize-timeout must be a positive number of seconds, got {}",
                            value
                        ))
                    })?;
            }
            "speak-summaries" => {
                self.speak_summaries = match value.to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => {
                        return Err(WebnoteError::Config(format!(
                            "speak-summaries must be true or false, got {}",
                            value
                        )))
                    }
                };
            }
            "default-priority" => {
                self.default_priority = value.parse().map_err(WebnoteError::Config)?;
            }
            other => {
                return Err(WebnoteError::Config(format!(
                    "Unknown config key: {} (known keys: {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}
