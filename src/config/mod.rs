#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{BriefingConfig, ServerConfig};
pub use toml_config::BotSettings;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{parse_timezone, Validate};
use chrono_tz::Tz;
use std::fmt;
use std::path::Path;

/// Stand-in printed instead of a credential.
pub(crate) fn redacted(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// Settings after flags, environment and the optional settings file have
/// been merged. Flags and environment win over the file.
#[derive(Clone)]
pub struct BotConfig {
    pub signing_secret: String,
    pub bot_token: String,
    pub timezone: Tz,
    pub settings: BotSettings,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("signing_secret", &redacted(&self.signing_secret))
            .field("bot_token", &redacted(&self.bot_token))
            .field("timezone", &self.timezone)
            .field("settings", &self.settings)
            .finish()
    }
}

impl BotConfig {
    pub fn resolve(
        settings_path: Option<&Path>,
        signing_secret: String,
        bot_token: String,
        timezone: Option<String>,
        slack_api_url: Option<String>,
    ) -> Result<Self> {
        let mut settings = match settings_path {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path.display());
                BotSettings::from_file(path)?
            }
            None => BotSettings::default(),
        };

        if let Some(tz) = timezone {
            settings.bot.timezone = tz;
        }
        if let Some(url) = slack_api_url {
            settings.slack.api_url = url;
        }
        settings.validate()?;

        let timezone = parse_timezone(&settings.bot.timezone)?;

        Ok(Self {
            signing_secret,
            bot_token,
            timezone,
            settings,
        })
    }
}

impl ConfigProvider for BotConfig {
    fn signing_secret(&self) -> &str {
        &self.signing_secret
    }

    fn bot_token(&self) -> &str {
        &self.bot_token
    }

    fn slack_api_url(&self) -> &str {
        &self.settings.slack.api_url
    }

    fn initial_timezone(&self) -> Tz {
        self.timezone
    }
}
