// Авторские права (c) 2025 savichev. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::notify::Notify;
use error::Error;
use practicum::{check_response, parse_status, HomeworkApi};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Маркеры дедупликации: последние успешно отправленные тексты.
#[derive(Debug, Default)]
struct NotifyState {
  last_status: String,
  last_error: String,
}

pub struct Watcher {
  api: Box<dyn HomeworkApi>,
  notifier: Box<dyn Notify>,
  interval: Duration,
  timestamp: i64,
  state: NotifyState,
}

impl Watcher {
  pub fn new(api: Box<dyn HomeworkApi>, notifier: Box<dyn Notify>, interval: Duration) -> Self {
    Self {
      api,
      notifier,
      interval,
      timestamp: chrono::Utc::now().timestamp(),
      state: NotifyState::default(),
    }
  }

  #[cfg(test)]
  fn with_start_timestamp(mut self, timestamp: i64) -> Self {
    self.timestamp = timestamp;
    self
  }

  /// Бесконечный цикл опроса. Завершается только вместе с процессом.
  pub async fn run(&mut self) {
    loop {
      self.tick().await;
      info!("Waiting {:?} until the next poll", self.interval);
      tokio::time::sleep(self.interval).await;
    }
  }

  /// Один цикл: опрос, разбор, уведомление. Ошибки не покидают tick —
  /// они логируются и (однократно на текст) пересылаются в чат.
  #[instrument(skip(self))]
  async fn tick(&mut self) {
    match self.poll().await {
      Ok(Some(message)) => {
        if message != self.state.last_status {
          if self.notifier.notify(&message).await.is_ok() {
            self.state.last_status = message;
          }
        } else {
          debug!("Homework status has not changed");
        }
      }
      Ok(None) => {}
      Err(e) => {
        error!("Poll cycle failed: {}", e);
        let text = e.to_string();
        if text != self.state.last_error {
          let report = format!("Сбой в работе программы: {}", text);
          if self.notifier.notify(&report).await.is_ok() {
            self.state.last_error = text;
          }
        }
      }
    }
  }

  /// Опрашивает API и возвращает текст уведомления, если в ответе есть
  /// хотя бы одна работа. Курсор сдвигается и на пустом списке; при
  /// ошибке разбора записи курсор остаётся прежним, чтобы следующий
  /// опрос увидел ту же запись.
  async fn poll(&mut self) -> Result<Option<String>, Error> {
    let response = self.api.poll(self.timestamp).await?;
    let update = check_response(&response)?;

    let Some(homework) = update.homeworks.first() else {
      info!("API returned an empty homework list");
      self.timestamp = update.current_date;
      return Ok(None);
    };

    let message = parse_status(homework)?;
    self.timestamp = update.current_date;
    Ok(Some(message))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use serde_json::{json, Value};
  use std::sync::{Arc, Mutex};

  struct FakeApi {
    responses: Mutex<Vec<Result<Value, Error>>>,
    polled_from: Mutex<Vec<i64>>,
  }

  impl FakeApi {
    fn new(responses: Vec<Result<Value, Error>>) -> Self {
      Self {
        responses: Mutex::new(responses),
        polled_from: Mutex::new(Vec::new()),
      }
    }
  }

  #[async_trait]
  impl HomeworkApi for FakeApi {
    async fn poll(&self, from_date: i64) -> Result<Value, Error> {
      self.polled_from.lock().unwrap().push(from_date);
      let mut responses = self.responses.lock().unwrap();
      if responses.is_empty() {
        Ok(json!({"homeworks": [], "current_date": from_date}))
      } else {
        responses.remove(0)
      }
    }
  }

  #[derive(Default)]
  struct FakeNotifier {
    sent: Mutex<Vec<String>>,
    fail: Mutex<bool>,
  }

  impl FakeNotifier {
    fn sent(&self) -> Vec<String> {
      self.sent.lock().unwrap().clone()
    }

    fn set_fail(&self, fail: bool) {
      *self.fail.lock().unwrap() = fail;
    }
  }

  #[async_trait]
  impl Notify for FakeNotifier {
    async fn notify(&self, text: &str) -> Result<(), Error> {
      if *self.fail.lock().unwrap() {
        return Err(Error::ApiError("sendMessage failed".into()));
      }
      self.sent.lock().unwrap().push(text.to_string());
      Ok(())
    }
  }

  // Watcher владеет Box-ами, поэтому наружу отдаём вторые Arc-хэндлы.
  fn watcher(
    responses: Vec<Result<Value, Error>>,
  ) -> (Watcher, Arc<FakeApi>, Arc<FakeNotifier>) {
    let api = Arc::new(FakeApi::new(responses));
    let notifier = Arc::new(FakeNotifier::default());
    let watcher = Watcher::new(
      Box::new(ArcApi(api.clone())),
      Box::new(ArcNotifier(notifier.clone())),
      Duration::from_secs(600),
    )
    .with_start_timestamp(0);
    (watcher, api, notifier)
  }

  struct ArcApi(Arc<FakeApi>);

  #[async_trait]
  impl HomeworkApi for ArcApi {
    async fn poll(&self, from_date: i64) -> Result<Value, Error> {
      self.0.poll(from_date).await
    }
  }

  struct ArcNotifier(Arc<FakeNotifier>);

  #[async_trait]
  impl Notify for ArcNotifier {
    async fn notify(&self, text: &str) -> Result<(), Error> {
      self.0.notify(text).await
    }
  }

  #[tokio::test]
  async fn notifies_on_new_status_and_advances_cursor() {
    let (mut watcher, _api, notifier) = watcher(vec![Ok(json!({
      "homeworks": [{"homework_name": "task1", "status": "approved"}],
      "current_date": 100
    }))]);

    watcher.tick().await;

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("task1"));
    assert!(sent[0].contains("Ура!"));
    assert_eq!(watcher.timestamp, 100);
  }

  #[tokio::test]
  async fn empty_list_advances_cursor_without_notification() {
    let (mut watcher, _api, notifier) =
      watcher(vec![Ok(json!({"homeworks": [], "current_date": 200}))]);

    watcher.tick().await;

    assert!(notifier.sent().is_empty());
    assert_eq!(watcher.timestamp, 200);
  }

  #[tokio::test]
  async fn repeated_status_is_sent_once() {
    let response = json!({
      "homeworks": [{"homework_name": "task1", "status": "reviewing"}],
      "current_date": 100
    });
    let (mut watcher, _api, notifier) = watcher(vec![Ok(response.clone()), Ok(response)]);

    watcher.tick().await;
    watcher.tick().await;

    assert_eq!(notifier.sent().len(), 1);
  }

  #[tokio::test]
  async fn unknown_status_is_reported_once() {
    let response = json!({
      "homeworks": [{"homework_name": "task1", "status": "bogus"}],
      "current_date": 100
    });
    let (mut watcher, _api, notifier) = watcher(vec![Ok(response.clone()), Ok(response)]);

    watcher.tick().await;
    watcher.tick().await;

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("Сбой в работе программы:"));
    assert!(sent[0].contains("bogus"));
    // Курсор не двигается, пока запись не разобрана.
    assert_eq!(watcher.timestamp, 0);
  }

  #[tokio::test]
  async fn server_error_is_relayed_and_retried_independently() {
    let (mut watcher, _api, notifier) = watcher(vec![
      Err(Error::StatusCode(500)),
      Ok(json!({
        "homeworks": [{"homework_name": "task1", "status": "approved"}],
        "current_date": 100
      })),
    ]);

    watcher.tick().await;
    watcher.tick().await;

    let sent = notifier.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].contains("500"));
    assert!(sent[1].contains("task1"));
  }

  #[tokio::test]
  async fn missing_homeworks_key_is_a_reported_error() {
    let (mut watcher, _api, notifier) = watcher(vec![Ok(json!({"current_date": 100}))]);

    watcher.tick().await;

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("Сбой в работе программы:"));
    assert_eq!(watcher.timestamp, 0);
  }

  #[tokio::test]
  async fn failed_notification_keeps_dedup_marker_for_retry() {
    let response = json!({
      "homeworks": [{"homework_name": "task1", "status": "rejected"}],
      "current_date": 100
    });
    let (mut watcher, _api, notifier) = watcher(vec![Ok(response.clone()), Ok(response)]);

    notifier.set_fail(true);
    watcher.tick().await;
    assert!(notifier.sent().is_empty());

    notifier.set_fail(false);
    watcher.tick().await;

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("task1"));
  }

  #[tokio::test]
  async fn distinct_errors_are_each_reported() {
    let (mut watcher, _api, notifier) = watcher(vec![
      Err(Error::StatusCode(500)),
      Err(Error::StatusCode(502)),
    ]);

    watcher.tick().await;
    watcher.tick().await;

    let sent = notifier.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].contains("500"));
    assert!(sent[1].contains("502"));
  }

  #[tokio::test]
  async fn next_poll_uses_advanced_cursor() {
    let (mut watcher, api, _notifier) = watcher(vec![
      Ok(json!({"homeworks": [], "current_date": 300})),
      Ok(json!({"homeworks": [], "current_date": 400})),
    ]);

    watcher.tick().await;
    watcher.tick().await;

    assert_eq!(*api.polled_from.lock().unwrap(), vec![0, 300]);
    assert_eq!(watcher.timestamp, 400);
  }
}
