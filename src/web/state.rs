use crate::adapters::SlackWebClient;
use crate::core::{ChatClient, ConfigProvider, MentionHandler, SignatureVerifier, TimezoneState};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<SignatureVerifier>,
    pub mentions: Arc<MentionHandler>,
}

impl AppState {
    pub fn new(verifier: SignatureVerifier, chat: Arc<dyn ChatClient>, timezone: TimezoneState) -> Self {
        Self {
            verifier: Arc::new(verifier),
            mentions: Arc::new(MentionHandler::new(chat, timezone)),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        if config.signing_secret().is_empty() {
            tracing::error!("SLACK_SIGNING_SECRET not configured, signed events will be rejected");
        }
        if config.bot_token().is_empty() {
            tracing::warn!("SLACK_BOT_TOKEN not configured, replies cannot be posted");
        }

        Self::new(
            SignatureVerifier::new(config.signing_secret()),
            Arc::new(SlackWebClient::from_config(config)),
            TimezoneState::new(config.initial_timezone()),
        )
    }

    pub fn timezone(&self) -> &TimezoneState {
        self.mentions.timezone()
    }
}
