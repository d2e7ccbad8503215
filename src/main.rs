use clap::Parser;
use snuffles::utils::{logger, validation::Validate};
use snuffles::{build_router, server, AppState, ServerConfig};

fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    logger::init(config.verbose, config.json_logs);

    tracing::info!("Starting snuffles");
    if config.verbose {
        tracing::debug!("Server config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
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

    tracing::info!(
        "⚙️ {} worker threads, request timeout {}, timezone {}",
        config.worker_threads,
        config
            .request_timeout()
            .map(|t| format!("{}s", t.as_secs()))
            .unwrap_or_else(|| "disabled".to_string()),
        bot_config.timezone.name()
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let state = AppState::from_config(&bot_config);
        let router = build_router(state, config.request_timeout());

        let listener = server::bind(config.bind_address()).await?;
        server::serve(listener, router).await?;
        Ok::<(), anyhow::Error>(())
    })
}
