//! Собственные типы ошибок приложения.
//!
//! Для поддержки функциональности применяется крейт `thiserror`.

use thiserror::Error;

/// Дерево ошибок приложений Duka.
#[derive(Error, Debug)]
pub enum DukaError {
    /// Файл инвентаря отсутствует или содержит некорректный JSON.
    ///
    /// Без инвентаря работа приложения невозможна.
    #[error("файл инвентаря {path} недоступен: {reason}")]
    Format { path: String, reason: String },

    /// Некорректное значение, полученное от пользователя.
    ///
    /// Например, количество товара `"abc"` или пустое название.
    #[error("неверное значение: {0}")]
    Validation(String),

    /// Запрошенное количество превышает остаток на складе.
    #[error("недостаточно товара '{name}': запрошено {requested}, в наличии {available}")]
    InsufficientStock {
        name: String,
        requested: i64,
        available: i64,
    },

    /// Товар с указанным идентификатором отсутствует в инвентаре.
    #[error("товар с id {0} не найден")]
    ProductNotFound(u64),

    /// Свободные идентификаторы закончились: в данных уже записан
    /// максимально возможный id.
    #[error("идентификаторы в {0} исчерпаны")]
    IdsExhausted(String),

    /// Ошибка чтения или записи файла.
    #[error("ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка сериализации данных в JSON.
    #[error("ошибка JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Ошибка инициализации логгера.
    #[error("ошибка логгера: {0}")]
    Logger(String),
}

impl DukaError {
    /// Конструктор для ошибки [`DukaError::Format`].
    pub fn format_err(path: impl Into<String>, reason: impl ToString) -> DukaError {
        Self::Format {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Конструктор для ошибки [`DukaError::Validation`].
    pub fn validation(message: impl Into<String>) -> DukaError {
        Self::Validation(message.into())
    }

    /// Ошибка вызвана данными пользователя, а не состоянием хранилища.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InsufficientStock { .. } | Self::ProductNotFound(_)
        )
    }
}
