// Авторские права (c) 2025 savichev. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
mod notify;
mod watcher;

use anyhow::{Context, Result};
use config::BotConfig;
use notify::TelegramNotifier;
use practicum::PracticumClient;
use telegram::TelegramClient;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use watcher::Watcher;

fn setup_logging() -> tracing_appender::non_blocking::WorkerGuard {
  let file_appender = tracing_appender::rolling::daily("logs", "homework-bot.log");
  let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with(fmt::layer().with_writer(std::io::stdout))
    .with(fmt::layer().with_ansi(false).with_writer(file_writer))
    .init();

  guard
}

// Неполная конфигурация фатальна; сбой попадает и в лог-файл, не
// только в stderr.
fn load_config() -> Result<BotConfig> {
  BotConfig::from_env().map_err(|e| {
    error!("Configuration is incomplete, refusing to start: {}", e);
    anyhow::Error::from(e)
  })
}

#[tokio::main]
async fn main() -> Result<()> {
  #[cfg(debug_assertions)]
  dotenvy::dotenv().ok();

  // Guard держит фоновый writer лог-файла до конца main.
  let _guard = setup_logging();

  let config = load_config()?;

  let api = PracticumClient::new(&config.practicum_token);
  let tg = TelegramClient::builder()
    .token(config.telegram_token.clone())
    .build()
    .context("Failed to create Telegram client")?;
  let notifier = TelegramNotifier::new(tg, config.telegram_chat_id);

  info!("Bot started, polling every {:?}", config.poll_interval);

  let mut watcher = Watcher::new(Box::new(api), Box::new(notifier), config.poll_interval);
  watcher.run().await;

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn startup_fails_without_required_env() {
    std::env::remove_var("PRACTICUM_TOKEN");
    std::env::remove_var("TELEGRAM_TOKEN");
    std::env::remove_var("TELEGRAM_CHAT_ID");

    let result = load_config();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("PRACTICUM_TOKEN"));
  }
}
