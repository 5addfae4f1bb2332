// Авторские права (c) 2025 savichev. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::response::Homework;
use error::Error;

fn verdict_for(status: &str) -> Option<&'static str> {
  match status {
    "approved" => Some("Работа проверена: ревьюеру всё понравилось. Ура!"),
    "reviewing" => Some("Работа взята на проверку ревьюером."),
    "rejected" => Some("Работа проверена: у ревьюера есть замечания."),
    _ => None,
  }
}

/// Собирает текст уведомления по записи о домашней работе.
pub fn parse_status(homework: &Homework) -> Result<String, Error> {
  let status = homework.status.as_deref().ok_or(Error::MissingStatusKey)?;

  let name = homework
    .homework_name
    .as_deref()
    .ok_or(Error::MissingHomeworkName)?;

  let verdict =
    verdict_for(status).ok_or_else(|| Error::UnknownStatus(status.to_string()))?;

  Ok(format!(
    "Изменился статус проверки работы \"{}\". {}",
    name, verdict
  ))
}
