use crate::domain::model::{Headline, WeatherReport};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono_tz::Tz;

pub trait ConfigProvider: Send + Sync {
    fn signing_secret(&self) -> &str;
    fn bot_token(&self) -> &str;
    fn slack_api_url(&self) -> &str;
    fn initial_timezone(&self) -> Tz;
}

/// Outbound chat messages.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn post_message(&self, channel: &str, text: &str) -> Result<()>;
}

#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current_weather(&self) -> Result<WeatherReport>;
}

#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn headlines(&self, limit: usize) -> Result<Vec<Headline>>;
}
