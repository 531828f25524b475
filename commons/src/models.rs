//! Модели данных для приложений.
//!
//! Имена полей совпадают с ключами JSON в файлах `data.txt` и `sales.txt`,
//! поэтому переименовывать их нельзя.

use macros::{LabelDisplay, RowDisplay};
use serde::{Deserialize, Serialize};

/// Товар в инвентаре.
#[derive(Debug, Clone, PartialEq, Eq, RowDisplay, Serialize, Deserialize)]
pub struct Product {
    /// Уникальный идентификатор товара.
    pub id: u64,
    /// Наименование.
    pub name: String,
    /// Остаток на складе.
    pub st: i64,
    /// Цена продажи.
    pub sp: i64,
    /// Цена закупки.
    pub bp: i64,
}

/// Запись о совершённой продаже.
#[derive(Debug, Clone, PartialEq, Eq, RowDisplay, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Уникальный идентификатор продажи.
    pub sales_id: u64,
    /// Идентификатор проданного товара.
    pub product_id: u64,
    /// Количество проданных единиц.
    pub quantity: i64,
    /// Время продажи в формате `YYYY-MM-DD HH:MM:SS`.
    pub sold_at: String,
    /// Наименование товара на момент продажи.
    pub product_name: String,
}

/// Поля формы добавления товара.
#[derive(Debug, Clone, Copy, PartialEq, Eq, LabelDisplay)]
pub enum ProductField {
    /// Наименование.
    Name,
    /// Количество на складе.
    Quantity,
    /// Цена продажи.
    SellingPrice,
    /// Цена закупки.
    BuyingPrice,
}
