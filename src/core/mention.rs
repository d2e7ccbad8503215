use crate::core::timezone::TimezoneState;
use crate::domain::model::SlackEvent;
use crate::domain::ports::ChatClient;
use crate::utils::validation::parse_timezone;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::{Arc, OnceLock};

pub const GREETING: &str = "Hi there! I am Snuffles.";

/// What a mention asks for: the replies to post, in order, and a timezone
/// to switch to once they are computed.
#[derive(Debug, Clone, PartialEq)]
pub struct MentionResponse {
    pub replies: Vec<String>,
    pub new_timezone: Option<Tz>,
}

fn user_mention_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[@#!][^>]*>").expect("static pattern is valid"))
}

/// Lower-cased message text without `<@U123>` style references, so user
/// ids never trigger keywords.
pub fn normalize_text(text: &str) -> String {
    user_mention_pattern()
        .replace_all(text, "")
        .trim()
        .to_lowercase()
}

pub fn format_current_time(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz)
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string()
}

/// Keywords are substring matches and are checked independently, so one
/// message can produce several replies. The time reply uses the timezone
/// in effect before any `timezone` change in the same message.
pub fn respond(text: &str, current: Tz, now: DateTime<Utc>) -> MentionResponse {
    let text = normalize_text(text);
    let mut replies = Vec::new();
    let mut new_timezone = None;

    if text.contains("hi") || text.contains("hello") {
        replies.push(GREETING.to_string());
    }

    if text.contains("date") || text.contains("time") || text.contains("day") {
        replies.push(format!(
            "The current date and time is: {}",
            format_current_time(now, current)
        ));
    }

    if let Some(idx) = text.rfind("timezone") {
        let candidate = text[idx + "timezone".len()..].trim();
        match parse_timezone(candidate) {
            Ok(tz) => {
                replies.push(format!("Timezone updated to: {}", tz.name()));
                new_timezone = Some(tz);
            }
            Err(_) => replies.push(format!(
                "Error: '{}' is not a valid timezone. Use format like 'America/New_York', 'China/Shanghai'",
                candidate
            )),
        }
    }

    MentionResponse {
        replies,
        new_timezone,
    }
}

/// Runs mention commands against the shared timezone and posts the replies.
pub struct MentionHandler {
    chat: Arc<dyn ChatClient>,
    timezone: TimezoneState,
}

impl MentionHandler {
    pub fn new(chat: Arc<dyn ChatClient>, timezone: TimezoneState) -> Self {
        Self { chat, timezone }
    }

    pub fn timezone(&self) -> &TimezoneState {
        &self.timezone
    }

    /// Returns the number of replies Slack accepted. Posting failures are
    /// logged, never propagated.
    pub async fn handle(&self, event: &SlackEvent, now: DateTime<Utc>) -> usize {
        let Some(channel) = event.channel.as_deref() else {
            tracing::warn!("app_mention without a channel, ignoring");
            return 0;
        };

        let text = event.text.as_deref().unwrap_or_default();
        let response = respond(text, self.timezone.get(), now);

        if let Some(tz) = response.new_timezone {
            tracing::info!("Timezone changed to {}", tz.name());
            self.timezone.set(tz);
        }

        let mut posted = 0;
        for reply in &response.replies {
            match self.chat.post_message(channel, reply).await {
                Ok(()) => posted += 1,
                Err(e) => tracing::error!(
                    "❌ Failed to post reply to {}: {} (Category: {:?})",
                    channel,
                    e,
                    e.category()
                ),
            }
        }

        tracing::debug!("Answered mention in {} with {} replies", channel, posted);
        posted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{BotError, Result};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingChat {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl ChatClient for RecordingChat {
        async fn post_message(&self, channel: &str, text: &str) -> Result<()> {
            if self.fail {
                return Err(BotError::SlackApiError {
                    message: "not_in_channel".to_string(),
                });
            }
            self.sent
                .lock()
                .await
                .push((channel.to_string(), text.to_string()));
            Ok(())
        }
    }

    fn noon_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 4, 17, 30, 5).unwrap()
    }

    #[test]
    fn test_greeting() {
        let response = respond("<@U0BOT> Hello there", chrono_tz::UTC, noon_utc());
        assert_eq!(response.replies, vec![GREETING.to_string()]);
        assert_eq!(response.new_timezone, None);
    }

    #[test]
    fn test_user_ids_do_not_trigger_keywords() {
        let response = respond("<@UHIDAY> ok", chrono_tz::UTC, noon_utc());
        assert!(response.replies.is_empty());
    }

    #[test]
    fn test_time_reply_uses_current_timezone() {
        let response = respond("what time is it", chrono_tz::America::Chicago, noon_utc());
        assert_eq!(
            response.replies,
            vec!["The current date and time is: 2024-07-04 12:30:05 CDT".to_string()]
        );
    }

    #[test]
    fn test_timezone_change() {
        let response = respond(
            "<@U0BOT> timezone America/New_York",
            chrono_tz::America::Chicago,
            noon_utc(),
        );

        // "timezone" contains "time", so the old zone's time is reported first.
        assert_eq!(response.replies.len(), 2);
        assert_eq!(
            response.replies[0],
            "The current date and time is: 2024-07-04 12:30:05 CDT"
        );
        assert_eq!(response.replies[1], "Timezone updated to: America/New_York");
        assert_eq!(response.new_timezone, Some(chrono_tz::America::New_York));
    }

    #[test]
    fn test_invalid_timezone() {
        let response = respond("timezone Narnia/Cair_Paravel", chrono_tz::UTC, noon_utc());
        assert_eq!(response.new_timezone, None);
        assert_eq!(
            response.replies.last().unwrap(),
            "Error: 'narnia/cair_paravel' is not a valid timezone. Use format like 'America/New_York', 'China/Shanghai'"
        );
    }

    #[test]
    fn test_text_after_last_timezone_keyword_is_used() {
        let response = respond("timezone please, timezone asia/tokyo", chrono_tz::UTC, noon_utc());
        assert_eq!(response.new_timezone, Some(chrono_tz::Asia::Tokyo));
    }

    #[test]
    fn test_unrelated_text_gets_no_reply() {
        let response = respond("<@U0BOT> ok cool", chrono_tz::UTC, noon_utc());
        assert!(response.replies.is_empty());
    }

    #[tokio::test]
    async fn test_handler_posts_replies_and_updates_state() {
        let chat = Arc::new(RecordingChat::default());
        let state = TimezoneState::new(chrono_tz::America::Chicago);
        let handler = MentionHandler::new(chat.clone(), state.clone());

        let event = SlackEvent {
            event_type: Some("app_mention".to_string()),
            text: Some("<@U0BOT> hi! timezone Europe/Paris".to_string()),
            channel: Some("C1".to_string()),
            ..Default::default()
        };

        let posted = handler.handle(&event, noon_utc()).await;

        assert_eq!(posted, 3);
        assert_eq!(state.get(), chrono_tz::Europe::Paris);
        let sent = chat.sent.lock().await;
        assert_eq!(sent[0], ("C1".to_string(), GREETING.to_string()));
        assert_eq!(sent[2].1, "Timezone updated to: Europe/Paris");
    }

    #[tokio::test]
    async fn test_handler_survives_chat_failures() {
        let chat = Arc::new(RecordingChat {
            fail: true,
            ..Default::default()
        });
        let handler = MentionHandler::new(chat, TimezoneState::new(chrono_tz::UTC));

        let event = SlackEvent {
            event_type: Some("app_mention".to_string()),
            text: Some("hello".to_string()),
            channel: Some("C1".to_string()),
            ..Default::default()
        };

        assert_eq!(handler.handle(&event, noon_utc()).await, 0);
    }

    #[tokio::test]
    async fn test_handler_ignores_mentions_without_channel() {
        let chat = Arc::new(RecordingChat::default());
        let handler = MentionHandler::new(chat.clone(), TimezoneState::new(chrono_tz::UTC));

        let event = SlackEvent {
            event_type: Some("app_mention".to_string()),
            text: Some("hello".to_string()),
            ..Default::default()
        };

        assert_eq!(handler.handle(&event, noon_utc()).await, 0);
        assert!(chat.sent.lock().await.is_empty());
    }
}
