use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use intent_chat::adapters::ai::{OpenAIConfig, OpenAIReplyGenerator};
use intent_chat::adapters::console::ConsoleChat;
use intent_chat::adapters::http::{self, ChatAppState};
use intent_chat::adapters::services::{
    JokeApiClient, NewsApiClient, OpenTriviaDbClient, OpenWeatherClient,
};
use intent_chat::adapters::storage::InMemoryConversationStore;
use intent_chat::application::{ConversationLocks, Dispatcher, SendMessageHandler};
use intent_chat::config::{AppConfig, Interface, LogFormat, ServerConfig};
use intent_chat::ports::ServiceError;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load()?;
    // `intent-chat console` / `intent-chat http` overrides the configured interface.
    if let Some(arg) = std::env::args().nth(1) {
        config.server.interface = arg.parse()?;
    }
    config.validate()?;

    init_tracing(&config.server);
    if !config.ai.has_api_key() {
        tracing::warn!("no ai.api_key configured; fallback replies will be apologies");
    }

    let dispatcher = Arc::new(build_dispatcher(&config)?);

    match config.server.interface {
        Interface::Console => {
            ConsoleChat::new(dispatcher).run_stdio().await?;
        }
        Interface::Http => {
            let store = InMemoryConversationStore::new()
                .with_max_conversations(config.server.max_conversations)
                .with_idle_ttl(config.server.conversation_ttl());
            let handler =
                SendMessageHandler::new(dispatcher, Arc::new(store), ConversationLocks::new());
            let router = http::build_router(ChatAppState::new(Arc::new(handler)), &config.server);
            http::serve(router, config.server.socket_addr()?).await?;
        }
    }

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match server.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }
}

fn build_dispatcher(config: &AppConfig) -> Result<Dispatcher, ServiceError> {
    let services = &config.services;
    let timeout = services.timeout();

    let jokes = JokeApiClient::new(&services.joke_url, timeout)?;
    let weather = OpenWeatherClient::new(
        &services.weather_url,
        services.weather_api_key.clone(),
        timeout,
    )?;
    let news = NewsApiClient::new(
        &services.news_url,
        services.news_api_key.clone(),
        &services.news_country,
        timeout,
    )?;
    let trivia = OpenTriviaDbClient::new(&services.trivia_url, timeout)?;
    let generator = OpenAIReplyGenerator::new(OpenAIConfig::from(&config.ai))?;

    Ok(Dispatcher::new(
        Arc::new(jokes),
        Arc::new(weather),
        Arc::new(news),
        Arc::new(trivia),
        Arc::new(generator),
    )
    .with_news_count(services.news_count)
    .with_trivia_amount(services.trivia_amount))
}
