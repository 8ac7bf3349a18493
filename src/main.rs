use clap::Parser;
use oracle_bot::{
    AnswerConfig, AnswerGenerator, BotConfig, ConversationLoop, GoogleTranslateProvider,
    MachineTranslator, MockMode, MockTranslator, TelegramClient,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = BotConfig::parse();

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let messenger = TelegramClient::new(&config.telegram_api_url, &config.telegram_token)?;

    if config.mock_translator {
        serve(messenger, MockTranslator::new(MockMode::Suffix), rng).await
    } else {
        let translator = GoogleTranslateProvider::from_key(config.google_api_key)?;
        serve(messenger, translator, rng).await
    }
}

async fn serve<T: MachineTranslator>(
    messenger: TelegramClient,
    translator: T,
    rng: StdRng,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(translator = translator.provider_name(), "🔮 Starting oracle bot");

    let oracle = AnswerGenerator::new(translator, AnswerConfig::default())?;
    let mut bot = ConversationLoop::new(messenger, oracle, rng);

    let cursor = bot.initial_cursor().await?;
    bot.run(cursor).await?;
    Ok(())
}
