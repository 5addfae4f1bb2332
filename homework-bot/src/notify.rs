// Авторские права (c) 2025 savichev. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use async_trait::async_trait;
use error::Error;
use telegram::TelegramClient;
use tracing::{error, info, instrument};

#[async_trait]
pub trait Notify: Send + Sync {
  async fn notify(&self, text: &str) -> Result<(), Error>;
}

pub struct TelegramNotifier {
  client: TelegramClient,
  chat_id: i64,
}

impl TelegramNotifier {
  pub fn new(client: TelegramClient, chat_id: i64) -> Self {
    Self { client, chat_id }
  }
}

#[async_trait]
impl Notify for TelegramNotifier {
  #[instrument(skip(self, text))]
  async fn notify(&self, text: &str) -> Result<(), Error> {
    match self
      .client
      .message()
      .chat_id(self.chat_id)
      .text(text)
      .send(&self.client)
      .await
    {
      Ok(()) => {
        info!("Sent message \"{}\"", text);
        Ok(())
      }
      Err(e) => {
        error!("Failed to send message \"{}\": {}", text, e);
        Err(e)
      }
    }
  }
}
