//! Duka CLI. Консольный интерфейс учёта товаров и продаж: таблица
//! инвентаря, добавление товара, продажа и история продаж товара.

#![warn(missing_docs)]

use commons::errors::DukaError;
use commons::init_simple_logger;
use commons::traits::WriteExt;
use commons::utils::get_workspace_root;
use duka_core::{InventoryStore, JsonFile, Shop};
use log::info;
use std::io;

mod cli;
mod config;
mod views;

use cli::{Action, AppSet, ExitCode, exit_err, parse_cli_args};
use config::{LOG_FOLDER, WELCOME_BANNER};

fn main() {
    let settings = parse_cli_args();

    // Инициализация логгера.
    if let Err(err) = init_logger() {
        exit_err(&err.to_string(), ExitCode::Logger);
    }

    info!("Duka CLI запущен: {:?}", settings.action);

    match run(&settings) {
        Ok(output) => io::stdout().write_line(output),
        Err(err) => exit_err(&err.to_string(), ExitCode::for_error(&err)),
    }
}

/// Выполнить выбранное действие и вернуть текст для вывода.
fn run(settings: &AppSet) -> Result<String, DukaError> {
    match &settings.action {
        Action::Init => {
            let created = InventoryStore::init(&JsonFile::new(&settings.data_path))?;
            let path = settings.data_path.display();
            Ok(match created {
                true => format!("Created empty inventory: {path}"),
                false => format!("Inventory already exists: {path}"),
            })
        }
        Action::List => {
            let shop = open_shop(settings)?;
            Ok(format!(
                "{WELCOME_BANNER}\n\n{}",
                views::render_inventory(shop.inventory().products())
            ))
        }
        Action::Add(form) => {
            let product = open_shop(settings)?.add_product(form)?;
            Ok(format!("Added '{}' with id {}", product.name, product.id))
        }
        Action::Sell {
            product_id,
            quantity,
        } => {
            let mut shop = open_shop(settings)?;
            let sale = shop.make_sale(*product_id, quantity)?;
            let stock = shop
                .inventory()
                .get(*product_id)
                .map_or(0, |product| product.st);
            Ok(format!(
                "Sold {} of '{}' at {} (sale #{}), {} left in stock",
                sale.quantity, sale.product_name, sale.sold_at, sale.sales_id, stock
            ))
        }
        Action::Sales { product_id } => {
            let shop = open_shop(settings)?;
            let product = shop
                .inventory()
                .get(*product_id)
                .ok_or(DukaError::ProductNotFound(*product_id))?;
            let history = shop.sales_history(*product_id);
            Ok(views::render_sales(product, &history))
        }
    }
}

/// Открыть инвентарь и журнал продаж по путям из настроек.
fn open_shop(settings: &AppSet) -> Result<Shop, DukaError> {
    Shop::open(&settings.data_path, &settings.sales_path)
}

/// Инициализировать логгер приложения.
///
/// Используется метод [`init_simple_logger`] из крейта [`commons`].
fn init_logger() -> Result<(), DukaError> {
    let log_folder = get_workspace_root().join(LOG_FOLDER);
    let app_name = env!("CARGO_PKG_NAME");
    init_simple_logger(app_name, log_folder).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use duka_core::ProductForm;
    use std::fs;
    use std::path::Path;

    fn settings(dir: &Path, action: Action) -> AppSet {
        AppSet {
            data_path: dir.join("data.txt"),
            sales_path: dir.join("sales.txt"),
            action,
        }
    }

    #[test]
    fn init_then_add_then_sell() {
        let tmp = tempfile::tempdir().unwrap();

        let out = run(&settings(tmp.path(), Action::Init)).unwrap();
        assert!(out.starts_with("Created empty inventory"));
        let out = run(&settings(tmp.path(), Action::Init)).unwrap();
        assert!(out.starts_with("Inventory already exists"));

        let form = ProductForm::new("Brush", "5", "20", "10");
        let out = run(&settings(tmp.path(), Action::Add(form))).unwrap();
        assert_eq!(out, "Added 'Brush' with id 1");

        let sell = Action::Sell {
            product_id: 1,
            quantity: "2".to_string(),
        };
        let out = run(&settings(tmp.path(), sell)).unwrap();
        assert!(out.ends_with("3 left in stock"));

        let out = run(&settings(tmp.path(), Action::List)).unwrap();
        assert!(out.starts_with(WELCOME_BANNER));
        assert!(out.contains("Brush"));

        let out = run(&settings(tmp.path(), Action::Sales { product_id: 1 })).unwrap();
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn list_without_inventory_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let err = run(&settings(tmp.path(), Action::List)).unwrap_err();

        assert_eq!(ExitCode::for_error(&err), ExitCode::InventoryFile);
    }

    #[test]
    fn sales_of_unknown_product_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("data.txt"), "[]").unwrap();

        let err = run(&settings(tmp.path(), Action::Sales { product_id: 3 })).unwrap_err();
        assert_eq!(ExitCode::for_error(&err), ExitCode::Rejected);
    }
}
