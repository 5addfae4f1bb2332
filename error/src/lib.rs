// Авторские права (c) 2025 savichev. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
  #[error("Missing required environment variable: {0}")]
  MissingEnvVar(String),
  #[error("Configuration error: {0}")]
  ConfigError(String),
  #[error("API request failed with status code {0}")]
  StatusCode(u16),
  #[error("API response is not a JSON object (got {0})")]
  InvalidResponseType(String),
  #[error("API response has no 'homeworks' key")]
  MissingHomeworksKey,
  #[error("'homeworks' is not a list (got {0})")]
  WrongHomeworksType(String),
  #[error("'current_date' is not an integer (got {0})")]
  WrongCursorType(String),
  #[error("Homework record has no 'status' key")]
  MissingStatusKey,
  #[error("Homework record has no 'homework_name' key")]
  MissingHomeworkName,
  #[error("Unknown homework status: {0}")]
  UnknownStatus(String),
  #[error("HTTP error: {0}")]
  HttpError(#[from] reqwest::Error),
  #[error("Request timed out")]
  TimeoutError,
  #[error("Failed to parse response: {0}")]
  ParseError(String),
  #[error("Telegram API error: {0}")]
  ApiError(String),
  #[error("Rate limit exceeded")]
  RateLimitExceeded,
}
