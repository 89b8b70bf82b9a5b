use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PollSettings {
    pub interval_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        PollSettings {
            interval_ms: 5000,
            request_timeout_ms: 30_000,
        }
    }
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatSettings {
    pub indent_width: u8,
    /// `Some(true)` uppercases keywords, `Some(false)` lowercases them, `None` keeps the source casing
    pub uppercase_keywords: Option<bool>,
}

impl Default for FormatSettings {
    fn default() -> Self {
        FormatSettings {
            indent_width: 2,
            uppercase_keywords: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct NoticeSettings {
    pub copied_ms: u64,
}

impl Default for NoticeSettings {
    fn default() -> Self {
        NoticeSettings { copied_ms: 1000 }
    }
}

impl NoticeSettings {
    pub fn copied(&self) -> Duration {
        Duration::from_millis(self.copied_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewSettings {
    pub api_base_url: String,
    /// Where the "return to queries list" link points
    pub back_href: String,
    pub poll: PollSettings,
    pub format: FormatSettings,
    pub notice: NoticeSettings,
}

impl Default for ViewSettings {
    fn default() -> Self {
        ViewSettings {
            api_base_url: "http://localhost:8000".to_string(),
            back_href: "/slow_queries/".to_string(),
            poll: PollSettings::default(),
            format: FormatSettings::default(),
            notice: NoticeSettings::default(),
        }
    }
}

impl ViewSettings {
    /// Load settings from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let settings: ViewSettings = serde_json::from_str(raw)
            .map_err(|e| Error::Settings(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would make the poller spin or never fire
    pub fn validate(&self) -> Result<()> {
        if self.poll.interval_ms == 0 {
            return Err(Error::Settings("poll interval must be greater than zero".to_string()));
        }
        if self.poll.request_timeout_ms == 0 {
            return Err(Error::Settings("request timeout must be greater than zero".to_string()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(Error::Settings("api base url must not be empty".to_string()));
        }
        Ok(())
    }
}
