//! Process wiring: liveness server, price service and the Discord client

use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info};

use crate::bot::discord::{build_framework, Data};
use crate::bot::{CommandHandler, DiscordNotifier};
use crate::common::errors::{BotError, Result};
use crate::common::traits::{SharedNotifier, SharedProvider};
use crate::config::types::AppConfig;
use crate::liveness;
use crate::market::{MarketState, PriceService, ServiceIntervals};
use crate::yahoo::YahooFinanceClient;

/// Run the bot until the gateway closes or Ctrl-C is received
///
/// Fails before connecting anywhere when the configuration is invalid.
pub async fn run(config: AppConfig) -> Result<()> {
    config.validate()?;
    let token = config.require_token()?.to_string();

    let port = config.settings.liveness_port;
    let liveness = tokio::spawn(async move {
        if let Err(e) = liveness::serve(port).await {
            error!("Liveness server stopped: {}", e);
        }
    });

    let provider: SharedProvider = Arc::new(YahooFinanceClient::from_config(&config.provider)?);
    let market = MarketState::new();

    let data = Data {
        handler: CommandHandler::new(market.clone(), provider.clone(), &config.settings),
        executive_role: config.discord.executive_role.clone(),
    };
    let framework = build_framework(data, config.discord.prefix.clone());

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await?;

    let notifier: SharedNotifier = Arc::new(DiscordNotifier::new(client.http.clone()));
    let service = PriceService::start(
        market,
        provider,
        notifier,
        ServiceIntervals::from(&config.settings),
    );

    let shard_manager = client.shard_manager.clone();
    let result = tokio::select! {
        result = client.start() => result.map_err(BotError::from),
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal, cleaning up...");
            shard_manager.shutdown_all().await;
            Ok(())
        }
    };

    service.shutdown().await;
    liveness.abort();
    result
}
