// Авторские права (c) 2025 savichev. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  builders::{MessageBuilder, TelegramClientBuilder},
  config::{TelegramConfig, TELEGRAM_API_BASE},
  types::{Message, TelegramResponse},
};
use error::Error;
use reqwest::Client;
use tracing::{debug, error, instrument, warn};

#[derive(Clone)]
pub struct TelegramClient {
  pub(crate) config: TelegramConfig,
  pub(crate) client: Client,
}

impl TelegramClient {
  pub fn builder() -> TelegramClientBuilder {
    TelegramClientBuilder::default()
  }

  pub fn message(&self) -> MessageBuilder {
    MessageBuilder::new()
  }

  #[instrument(skip(self, message), fields(chat_id = message.chat_id))]
  pub(crate) async fn send_message(&self, message: Message<'_>) -> Result<(), Error> {
    let url = format!("{}{}/sendMessage", TELEGRAM_API_BASE, self.config.token);

    for attempt in 0..=self.config.retry_attempts {
      match self.try_send_message(&url, &message).await {
        Ok(_) => {
          debug!("Message sent successfully");
          return Ok(());
        }
        Err(e) => {
          if attempt == self.config.retry_attempts {
            error!("All retry attempts failed");
            return Err(e);
          }
          warn!("Attempt {} failed: {}. Retrying...", attempt + 1, e);
          tokio::time::sleep(self.config.retry_delay).await;
        }
      }
    }

    Err(Error::ApiError("Max retry attempts reached".into()))
  }

  async fn try_send_message(&self, url: &str, message: &Message<'_>) -> Result<(), Error> {
    let response = self
      .client
      .post(url)
      .json(message)
      .send()
      .await
      .map_err(Error::HttpError)?;

    let status = response.status();

    if status.as_u16() == 429 {
      return Err(Error::RateLimitExceeded);
    }

    let telegram_response: TelegramResponse = response.json().await.map_err(Error::HttpError)?;

    if !telegram_response.ok {
      return Err(Error::ApiError(format!(
        "{}: {}",
        status, telegram_response.description
      )));
    }

    Ok(())
  }
}
