// Авторские права (c) 2025 savichev. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

/// Одна запись о домашней работе из ответа API.
///
/// Поля необязательные: отсутствие ключей обрабатывает
/// [`crate::parse_status`], а не десериализатор.
#[derive(Debug, Clone, Deserialize)]
pub struct Homework {
  #[serde(default)]
  pub homework_name: Option<String>,
  #[serde(default)]
  pub status: Option<String>,
}

/// Проверенный ответ API: список работ и курсор для следующего опроса.
#[derive(Debug, Clone)]
pub struct PollUpdate {
  pub homeworks: Vec<Homework>,
  pub current_date: i64,
}

fn json_type(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "bool",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

/// Проверяет форму ответа API и возвращает типизированный результат.
#[instrument(skip(response))]
pub fn check_response(response: &Value) -> Result<PollUpdate, Error> {
  let object = response
    .as_object()
    .ok_or_else(|| Error::InvalidResponseType(json_type(response).to_string()))?;

  let homeworks = object.get("homeworks").ok_or(Error::MissingHomeworksKey)?;

  let entries = homeworks
    .as_array()
    .ok_or_else(|| Error::WrongHomeworksType(json_type(homeworks).to_string()))?;

  let current_date = object
    .get("current_date")
    .and_then(Value::as_i64)
    .ok_or_else(|| {
      let observed = object.get("current_date").map_or("missing", json_type);
      Error::WrongCursorType(observed.to_string())
    })?;

  let homeworks = entries
    .iter()
    .map(|entry| {
      serde_json::from_value(entry.clone())
        .map_err(|e| Error::ParseError(format!("Malformed homework record: {}", e)))
    })
    .collect::<Result<Vec<Homework>, Error>>()?;

  Ok(PollUpdate {
    homeworks,
    current_date,
  })
}
