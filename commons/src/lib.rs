use crate::errors::DukaError;
use log::*;
use simplelog::{CombinedLogger, Config, WriteLogger};
use std::fs;
use std::fs::OpenOptions;
use std::path::PathBuf;

pub mod errors;
pub mod models;
pub mod traits;
pub mod utils;

/// Фабрика по созданию индивидуальных логгеров для приложений.
///
/// Инициализация требуется один раз при запуске приложения. Далее используются
/// стандартные макросы [`log::info`], [`log::warn`], [`log::error`] для
/// логирования событий.
///
/// Файл открывается на дозапись: история операций с инвентарём сохраняется
/// между запусками.
///
/// ## Args
///
/// - `app_name` — название приложения (будет использовано для создания файла)
/// - `log_dir` — путь к директории расположения log-файлов (при отсутствии
///   пытается создать)
///
/// ## Пример
///
/// ```no_run
/// use log::*;
/// use commons::init_simple_logger;
/// use commons::utils::get_workspace_root;
///
/// let log_dir = get_workspace_root().join("log");
/// init_simple_logger("duka", log_dir).unwrap();
///
/// info!("Продажа оформлена");
/// warn!("Недостаточно товара на складе");
/// ```
///
/// ## Ошибки
///
/// Возвращает [`DukaError::Io`] при ошибке создания директории и (или)
/// log-файла, и [`DukaError::Logger`] при повторной инициализации логгера.
pub fn init_simple_logger(app_name: &str, log_dir: PathBuf) -> Result<PathBuf, DukaError> {
    let config = Config::default();
    let log_file_path = log_dir.join(format!("{}.log", app_name));

    if !log_dir.exists() {
        fs::create_dir_all(&log_dir)?;
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    let logger = WriteLogger::new(LevelFilter::Info, config, log_file);

    CombinedLogger::init(vec![logger]).map_err(|e| DukaError::Logger(e.to_string()))?;

    Ok(log_file_path)
}
