// Авторские права (c) 2025 savichev. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod client;
pub mod response;
pub mod status;

pub use client::{HomeworkApi, PracticumClient};
pub use response::{check_response, Homework, PollUpdate};
pub use status::parse_status;

pub(crate) const API_BASE_URL: &str = "https://practicum.yandex.ru/api/user_api";
pub(crate) const API_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);
