// Авторские права (c) 2025 savichev. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use std::env;
use std::time::Duration;
use tracing::{debug, instrument};

pub(crate) const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

pub(crate) const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub(crate) const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub(crate) const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";
pub(crate) const POLL_INTERVAL_VAR: &str = "POLL_INTERVAL_SECS";

/// Конфигурация бота, собранная из переменных окружения при старте.
///
/// Отсутствие любого обязательного значения фатально: бот не должен
/// входить в цикл опроса с неполной конфигурацией.
#[derive(Debug, Clone)]
pub struct BotConfig {
  pub practicum_token: String,
  pub telegram_token: String,
  pub telegram_chat_id: i64,
  pub poll_interval: Duration,
}

impl BotConfig {
  #[instrument]
  pub fn from_env() -> Result<Self, Error> {
    let config = Self {
      practicum_token: required_var(PRACTICUM_TOKEN_VAR)?,
      telegram_token: required_var(TELEGRAM_TOKEN_VAR)?,
      telegram_chat_id: required_var(TELEGRAM_CHAT_ID_VAR)?
        .parse()
        .map_err(|_| {
          Error::ConfigError(format!("{} must be an integer chat id", TELEGRAM_CHAT_ID_VAR))
        })?,
      poll_interval: poll_interval_from_env()?,
    };
    debug!("Loaded configuration successfully");
    Ok(config)
  }
}

fn required_var(name: &str) -> Result<String, Error> {
  match env::var(name) {
    Ok(value) if !value.trim().is_empty() => Ok(value),
    _ => Err(Error::MissingEnvVar(name.to_string())),
  }
}

fn poll_interval_from_env() -> Result<Duration, Error> {
  match env::var(POLL_INTERVAL_VAR) {
    Ok(value) => {
      let secs: u64 = value.parse().map_err(|_| {
        Error::ConfigError(format!("{} must be a number of seconds", POLL_INTERVAL_VAR))
      })?;
      if secs == 0 {
        return Err(Error::ConfigError(format!(
          "{} must be greater than zero",
          POLL_INTERVAL_VAR
        )));
      }
      Ok(Duration::from_secs(secs))
    }
    Err(_) => Ok(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)),
  }
}
