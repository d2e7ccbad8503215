use clap::Parser;
use snuffles::adapters::{OpenMeteoClient, RssFeedClient, SlackWebClient};
use snuffles::core::ChatClient;
use snuffles::utils::{logger, validation::Validate};
use snuffles::{BriefingConfig, BriefingService};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BriefingConfig::parse();

    logger::init_stderr_logger(config.verbose);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let bot_config = match config.bot_config() {
        Ok(bot_config) => bot_config,
        Err(e) => {
            tracing::error!("❌ Failed to load settings: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };
    let settings = &bot_config.settings;

    let service = BriefingService::new(
        Arc::new(OpenMeteoClient::from_settings(
            &settings.weather,
            settings.weather_timezone(),
        )),
        Arc::new(RssFeedClient::from_settings(&settings.news)),
        settings.weather.location_name.clone(),
        settings.news.limit,
    );

    let today = chrono::Utc::now()
        .with_timezone(&bot_config.timezone)
        .date_naive();
    tracing::info!("📰 Building briefing for {}", today);
    let message = service.generate(today).await;

    match &config.channel {
        Some(channel) => {
            let client = SlackWebClient::from_config(&bot_config);
            if let Err(e) = client.post_message(channel, &message).await {
                tracing::error!(
                    "❌ Failed to post briefing: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(e.exit_code());
            }
            tracing::info!("✅ Briefing posted to {}", channel);
        }
        None => println!("{}", message),
    }

    Ok(())
}
