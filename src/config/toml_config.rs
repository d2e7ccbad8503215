use crate::utils::error::{BotError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TIMEZONE: &str = "America/Chicago";
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";
pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_NEWS_FEED: &str = "http://feeds.bbci.co.uk/news/rss.xml";

/// Optional settings file. Every section and field may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    pub bot: BotSection,
    pub slack: SlackSection,
    pub weather: WeatherSection,
    pub news: NewsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSection {
    pub timezone: String,
}

impl Default for BotSection {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackSection {
    pub api_url: String,
}

impl Default for SlackSection {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_SLACK_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSection {
    pub endpoint: String,
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Zone used for the daily aggregates. Falls back to the bot timezone.
    pub timezone: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for WeatherSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
            location_name: "Evanston".to_string(),
            latitude: 42.0451,
            longitude: -87.6877,
            timezone: None,
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSection {
    pub feed_url: String,
    pub limit: usize,
    pub timeout_seconds: u64,
}

impl Default for NewsSection {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_NEWS_FEED.to_string(),
            limit: 5,
            timeout_seconds: 10,
        }
    }
}

impl BotSettings {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BotError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${SLACK_API_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BotError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Zone name handed to the weather API.
    pub fn weather_timezone(&self) -> &str {
        self.weather
            .timezone
            .as_deref()
            .unwrap_or(self.bot.timezone.as_str())
    }
}

impl Validate for BotSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_timezone("bot.timezone", &self.bot.timezone)?;
        validation::validate_url("slack.api_url", &self.slack.api_url)?;

        validation::validate_url("weather.endpoint", &self.weather.endpoint)?;
        validation::validate_non_empty_string("weather.location_name", &self.weather.location_name)?;
        validation::validate_range("weather.latitude", self.weather.latitude, -90.0, 90.0)?;
        validation::validate_range("weather.longitude", self.weather.longitude, -180.0, 180.0)?;
        if let Some(tz) = &self.weather.timezone {
            validation::validate_timezone("weather.timezone", tz)?;
        }
        validation::validate_positive_number(
            "weather.timeout_seconds",
            self.weather.timeout_seconds as usize,
            1,
        )?;

        validation::validate_url("news.feed_url", &self.news.feed_url)?;
        validation::validate_range("news.limit", self.news.limit, 1, 50)?;
        validation::validate_positive_number(
            "news.timeout_seconds",
            self.news.timeout_seconds as usize,
            1,
        )?;

        Ok(())
    }
}
