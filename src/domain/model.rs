use serde::{Deserialize, Serialize};

/// The `event` object of a Slack `event_callback` envelope. Only the fields
/// the bot reacts to are kept; everything else in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlackEvent {
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

impl SlackEvent {
    pub fn is_bot_message(&self) -> bool {
        self.subtype.as_deref() == Some("bot_message")
    }

    pub fn is_app_mention(&self) -> bool {
        self.event_type.as_deref() == Some("app_mention")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current_temp: Option<f64>,
    pub max_temp: f64,
    pub min_temp: f64,
    pub precip_prob: Option<f64>,
    /// WMO weather interpretation code.
    pub weather_code: u16,
}

impl WeatherReport {
    pub fn is_raining(&self) -> bool {
        matches!(self.weather_code, 51..=67 | 80..=82 | 95..=99)
    }

    pub fn is_snowing(&self) -> bool {
        matches!(self.weather_code, 71..=77)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub link: String,
}

impl Headline {
    /// Slack mrkdwn bullet with an inline link.
    pub fn to_slack(&self) -> String {
        format!("• <{}|{}>", self.link, self.title)
    }
}
