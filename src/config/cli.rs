use crate::config::{redacted, BotConfig};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Parser)]
#[command(name = "snuffles")]
#[command(about = "Slack mention bot serving the Events API")]
pub struct ServerConfig {
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Threads handling requests concurrently.
    #[arg(long, env = "WORKER_THREADS", default_value_t = 8)]
    pub worker_threads: usize,

    /// Per-request timeout in seconds, 0 disables it.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 0)]
    pub request_timeout_secs: u64,

    #[arg(long, env = "SLACK_SIGNING_SECRET", default_value = "", hide_env_values = true)]
    pub signing_secret: String,

    #[arg(long, env = "SLACK_BOT_TOKEN", default_value = "", hide_env_values = true)]
    pub bot_token: String,

    #[arg(long, env = "SLACK_API_URL")]
    pub slack_api_url: Option<String>,

    #[arg(long, env = "BOT_TIMEZONE")]
    pub timezone: Option<String>,

    /// Optional TOML settings file.
    #[arg(long, env = "SNUFFLES_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, env = "JSON_LOGS", help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ServerConfig {
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn bot_config(&self) -> Result<BotConfig> {
        BotConfig::resolve(
            self.config.as_deref(),
            self.signing_secret.clone(),
            self.bot_token.clone(),
            self.timezone.clone(),
            self.slack_api_url.clone(),
        )
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("worker_threads", &self.worker_threads)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("signing_secret", &redacted(&self.signing_secret))
            .field("bot_token", &redacted(&self.bot_token))
            .field("slack_api_url", &self.slack_api_url)
            .field("timezone", &self.timezone)
            .field("config", &self.config)
            .field("verbose", &self.verbose)
            .field("json_logs", &self.json_logs)
            .finish()
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_positive_number("port", self.port as usize, 1)?;
        validation::validate_positive_number("worker_threads", self.worker_threads, 1)?;
        if let Some(url) = &self.slack_api_url {
            validation::validate_url("slack_api_url", url)?;
        }
        if let Some(tz) = &self.timezone {
            validation::validate_timezone("timezone", tz)?;
        }
        Ok(())
    }
}

#[derive(Clone, Parser)]
#[command(name = "daily_briefing")]
#[command(about = "Build the daily briefing and print it or post it to Slack")]
pub struct BriefingConfig {
    /// Post to this channel instead of printing.
    #[arg(long, env = "BRIEFING_CHANNEL")]
    pub channel: Option<String>,

    #[arg(long, env = "SLACK_BOT_TOKEN", default_value = "", hide_env_values = true)]
    pub bot_token: String,

    #[arg(long, env = "SLACK_API_URL")]
    pub slack_api_url: Option<String>,

    #[arg(long, env = "BOT_TIMEZONE")]
    pub timezone: Option<String>,

    #[arg(long, env = "SNUFFLES_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl BriefingConfig {
    pub fn bot_config(&self) -> Result<BotConfig> {
        BotConfig::resolve(
            self.config.as_deref(),
            String::new(),
            self.bot_token.clone(),
            self.timezone.clone(),
            self.slack_api_url.clone(),
        )
    }
}

impl fmt::Debug for BriefingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BriefingConfig")
            .field("channel", &self.channel)
            .field("bot_token", &redacted(&self.bot_token))
            .field("slack_api_url", &self.slack_api_url)
            .field("timezone", &self.timezone)
            .field("config", &self.config)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl Validate for BriefingConfig {
    fn validate(&self) -> Result<()> {
        if let Some(channel) = &self.channel {
            validation::validate_non_empty_string("channel", channel)?;
            validation::validate_non_empty_string("bot_token", &self.bot_token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_defaults_match_deployment() {
        let config = ServerConfig::try_parse_from(["snuffles"]).unwrap();

        assert_eq!(config.bind_address().to_string(), "0.0.0.0:8080");
        assert_eq!(config.worker_threads, 8);
        assert_eq!(config.request_timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_request_timeout_flag() {
        let config =
            ServerConfig::try_parse_from(["snuffles", "--request-timeout-secs", "30"]).unwrap();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_workers_is_invalid() {
        let config = ServerConfig::try_parse_from(["snuffles", "--worker-threads", "0"]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_output_redacts_credentials() {
        let config = ServerConfig::try_parse_from([
            "snuffles",
            "--signing-secret",
            "TOPSECRET",
            "--bot-token",
            "xoxb-SECRET",
        ])
        .unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("TOPSECRET"));
        assert!(!rendered.contains("xoxb-SECRET"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("worker_threads: 8"));

        let briefing = BriefingConfig::try_parse_from([
            "daily_briefing",
            "--channel",
            "C123",
            "--bot-token",
            "xoxb-SECRET",
        ])
        .unwrap();
        assert!(!format!("{:?}", briefing).contains("xoxb-SECRET"));
    }

    #[test]
    fn test_briefing_channel_requires_token() {
        let config = BriefingConfig::try_parse_from([
            "daily_briefing",
            "--channel",
            "C123",
            "--bot-token",
            "",
        ])
        .unwrap();
        assert!(config.validate().is_err());

        let printing = BriefingConfig::try_parse_from(["daily_briefing"]).unwrap();
        assert!(printing.validate().is_ok());
    }
}
