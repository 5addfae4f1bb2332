// Авторские права (c) 2025 savichev. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{API_BASE_URL, API_TIMEOUT};
use async_trait::async_trait;
use error::Error;
use serde_json::Value;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{error, instrument};

#[async_trait]
pub trait HomeworkApi: Send + Sync {
  async fn poll(&self, from_date: i64) -> Result<Value, Error>;
}

#[derive(Debug, Clone)]
pub struct PracticumClient {
  client: Arc<reqwest::Client>,
  token: String,
  base_url: String,
}

impl PracticumClient {
  pub fn new(token: &str) -> Self {
    let client = reqwest::Client::builder()
      .timeout(API_TIMEOUT)
      .build()
      .expect("Failed to create HTTP client");

    Self {
      client: Arc::new(client),
      token: token.to_string(),
      base_url: API_BASE_URL.into(),
    }
  }

  fn build_headers(&self) -> Result<reqwest::header::HeaderMap, Error> {
    let mut headers = reqwest::header::HeaderMap::new();

    headers.insert(
      reqwest::header::AUTHORIZATION,
      reqwest::header::HeaderValue::from_str(&format!("OAuth {}", self.token))
        .map_err(|e| Error::ConfigError(format!("Invalid API token: {}", e)))?,
    );

    Ok(headers)
  }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
  #[instrument(skip(self))]
  async fn poll(&self, from_date: i64) -> Result<Value, Error> {
    let url = format!("{}/homework_statuses/", self.base_url);
    let headers = self.build_headers()?;

    let request = self
      .client
      .get(&url)
      .headers(headers)
      .query(&[("from_date", from_date)])
      .send();

    let response = timeout(API_TIMEOUT, request)
      .await
      .map_err(|_| Error::TimeoutError)??;

    let status = response.status();
    if !status.is_success() {
      error!("API request failed with status: {}", status);
      return Err(Error::StatusCode(status.as_u16()));
    }

    response
      .json()
      .await
      .map_err(|e| Error::ParseError(format!("Failed to deserialize response: {}", e)))
  }
}
