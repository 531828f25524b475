//! Конфигурационный файл Duka CLI.

/// Название директории для log-файлов.
pub const LOG_FOLDER: &str = "log";

/// Файл инвентаря по умолчанию (в текущем каталоге).
pub const DEFAULT_DATA_FILE: &str = "data.txt";

/// Файл журнала продаж по умолчанию (в текущем каталоге).
pub const DEFAULT_SALES_FILE: &str = "sales.txt";

/// Приветствие перед таблицей инвентаря.
pub const WELCOME_BANNER: &str = "Welcome to Duka Sales Management System";
