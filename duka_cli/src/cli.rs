//! Обработка аргументов командной строки при запуске приложения.
//!
//! ## Пример
//!
//! ```text
//! $ duka --data data.txt sell 1 3
//! $ duka add --name Brush --quantity 5 --selling-price 20 --buying-price 10
//! ```

use crate::config::{DEFAULT_DATA_FILE, DEFAULT_SALES_FILE};
use clap::{Parser, Subcommand};
use commons::errors::DukaError;
use duka_core::ProductForm;
use log::error;
use std::path::PathBuf;
use std::process::exit;

/// Перечисление ошибок при завершении приложения.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Файл инвентаря отсутствует или повреждён.
    InventoryFile = 1,
    /// Операция отклонена: неверный ввод, нет товара, не хватает остатка.
    Rejected,
    /// Ошибка чтения или записи данных.
    Storage,
    /// Логгер не инициализирован.
    Logger,
}

impl ExitCode {
    /// Предоставить цифровое значение выбранного перечисления (`u8`).
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Подобрать код завершения для ошибки.
    pub fn for_error(err: &DukaError) -> Self {
        match err {
            DukaError::Format { .. } => ExitCode::InventoryFile,
            DukaError::Logger(_) => ExitCode::Logger,
            e if e.is_rejection() => ExitCode::Rejected,
            _ => ExitCode::Storage,
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Duka Sales Management System. Inventory and sales from the console.")]
#[command(author, version, long_about = None)]
struct CliArgs {
    /// Inventory file (JSON array of products).
    #[arg(short, long, global = true, default_value = DEFAULT_DATA_FILE, value_name = "FILE")]
    data: PathBuf,

    /// Sales log file (JSON array of sale records).
    #[arg(short, long, global = true, default_value = DEFAULT_SALES_FILE, value_name = "FILE")]
    sales: PathBuf,

    /// Supported commands.
    #[command(subcommand)]
    command: Commands,
}

/// Supported commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Create an empty inventory file if it does not exist yet.
    Init,
    /// Show the inventory table.
    List,
    /// Add a new product. Numbers must be non-negative integers.
    Add {
        /// Product name.
        #[arg(long)]
        name: String,
        /// Quantity in stock.
        #[arg(long, allow_hyphen_values = true)]
        quantity: String,
        /// Selling price.
        #[arg(long, allow_hyphen_values = true)]
        selling_price: String,
        /// Buying price.
        #[arg(long, allow_hyphen_values = true)]
        buying_price: String,
    },
    /// Sell a product: decrement stock and append a sale record.
    Sell {
        /// Product id.
        product_id: u64,
        /// Quantity to sell (positive integer).
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Show the sales history of a product.
    Sales {
        /// Product id.
        product_id: u64,
    },
}

/// Действие, выбранное пользователем.
#[derive(Debug, Clone)]
pub enum Action {
    /// Создать пустой инвентарь.
    Init,
    /// Показать инвентарь.
    List,
    /// Добавить товар.
    Add(ProductForm),
    /// Продать товар.
    Sell { product_id: u64, quantity: String },
    /// Показать продажи товара.
    Sales { product_id: u64 },
}

/// Параметры, полученные из командной строки при запуске приложения.
#[derive(Debug, Clone)]
pub struct AppSet {
    /// Путь к файлу инвентаря.
    pub data_path: PathBuf,
    /// Путь к журналу продаж.
    pub sales_path: PathBuf,
    /// Выбранное действие.
    pub action: Action,
}

impl AppSet {
    /// Сформировать экземпляр [`AppSet`] на основе данных из командной
    /// строки.
    fn new(args: CliArgs) -> Self {
        let action = match args.command {
            Commands::Init => Action::Init,
            Commands::List => Action::List,
            Commands::Add {
                name,
                quantity,
                selling_price,
                buying_price,
            } => Action::Add(ProductForm::new(name, quantity, selling_price, buying_price)),
            Commands::Sell {
                product_id,
                quantity,
            } => Action::Sell {
                product_id,
                quantity,
            },
            Commands::Sales { product_id } => Action::Sales { product_id },
        };

        Self {
            data_path: args.data,
            sales_path: args.sales,
            action,
        }
    }
}

/// Получить от пользователя параметры запуска.
///
/// Числовые значения товара и количество продажи передаются дальше как
/// строки: их проверяет ядро, как проверяло бы ввод в форме.
pub fn parse_cli_args() -> AppSet {
    AppSet::new(CliArgs::parse())
}

/// Опубликовать сообщение об ошибке и завершить работу приложения.
pub fn exit_err(message: &str, code: ExitCode) -> ! {
    error!("Ошибка: {} (код {})", message, code.value());
    eprintln!("Ошибка: {}", message);
    exit(code.value() as i32);
}
