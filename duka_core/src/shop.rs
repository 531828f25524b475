//! Операции магазина: продажа и добавление товара.
//!
//! Обе операции сначала полностью проверяют ввод и только затем меняют
//! состояние, поэтому отклонённая операция не трогает ни память, ни файлы.

use crate::inventory::InventoryStore;
use crate::sales::SalesLog;
use crate::storage::{JsonFile, RecordStorage};
use commons::errors::DukaError;
use commons::models::{Product, ProductField, SaleRecord};
use commons::utils::{TIMESTAMP_FORMAT, now_timestamp, parse_timestamp};
use log::{info, warn};
use std::path::Path;

/// Данные формы добавления товара в том виде, в котором их ввёл
/// пользователь.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub quantity: String,
    pub selling_price: String,
    pub buying_price: String,
}

impl ProductForm {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        selling_price: impl Into<String>,
        buying_price: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            selling_price: selling_price.into(),
            buying_price: buying_price.into(),
        }
    }
}

/// Разобрать количество для продажи: целое число больше нуля.
///
/// Пробелы по краям допускаются.
pub fn parse_sale_quantity(s: &str) -> Result<i64, DukaError> {
    let quantity: i64 = s
        .trim()
        .parse()
        .map_err(|_| DukaError::validation(format!("количество '{s}' не является числом")))?;
    if quantity <= 0 {
        return Err(DukaError::validation(format!(
            "количество должно быть больше нуля, получено {quantity}"
        )));
    }
    Ok(quantity)
}

/// Разобрать неотрицательное целое поле формы товара.
///
/// Допускаются только цифры ASCII: без знака и пробелов.
pub fn parse_form_number(field: ProductField, s: &str) -> Result<i64, DukaError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DukaError::validation(format!(
            "поле '{field}' должно содержать только цифры, получено '{s}'"
        )));
    }
    s.parse()
        .map_err(|_| DukaError::validation(format!("поле '{field}' слишком велико: {s}")))
}

/// Магазин: инвентарь и журнал продаж.
///
/// ## Пример
///
/// ```no_run
/// use duka_core::shop::{ProductForm, Shop};
///
/// let mut shop = Shop::open("data.txt", "sales.txt").unwrap();
/// let brush = shop
///     .add_product(&ProductForm::new("Brush", "5", "20", "10"))
///     .unwrap();
/// let sale = shop.make_sale(brush.id, "3").unwrap();
///
/// println!("{}", sale);
/// ```
#[derive(Debug)]
pub struct Shop<S: RecordStorage = JsonFile> {
    inventory: InventoryStore<S>,
    sales: SalesLog<S>,
}

impl Shop<JsonFile> {
    /// Открыть файлы инвентаря и журнала продаж.
    ///
    /// Отсутствие файла инвентаря фатально, отсутствие журнала — нет.
    pub fn open(
        data_path: impl AsRef<Path>,
        sales_path: impl AsRef<Path>,
    ) -> Result<Self, DukaError> {
        let inventory = InventoryStore::open(data_path)?;
        let sales = SalesLog::open(sales_path);
        Ok(Self::new(inventory, sales))
    }
}

impl<S: RecordStorage> Shop<S> {
    pub fn new(inventory: InventoryStore<S>, sales: SalesLog<S>) -> Self {
        Self { inventory, sales }
    }

    pub fn inventory(&self) -> &InventoryStore<S> {
        &self.inventory
    }

    pub fn sales(&self) -> &SalesLog<S> {
        &self.sales
    }

    /// Продать товар, отметив продажу текущим временем.
    pub fn make_sale(&mut self, product_id: u64, quantity: &str) -> Result<SaleRecord, DukaError> {
        self.make_sale_at(product_id, quantity, now_timestamp())
    }

    /// Продать товар с заданной временной меткой.
    ///
    /// Порядок действий: проверка ввода, запись продажи в журнал, списание
    /// остатка, перезапись инвентаря.
    ///
    /// ## Ошибки
    ///
    /// - [`DukaError::Validation`] — количество не является целым числом
    ///   больше нуля, либо метка `sold_at` не в формате [`TIMESTAMP_FORMAT`]
    /// - [`DukaError::ProductNotFound`] — товара нет в инвентаре
    /// - [`DukaError::InsufficientStock`] — остатка не хватает
    /// - [`DukaError::IdsExhausted`] — в журнале нет свободного `sales_id`
    ///
    /// Во всех этих случаях состояние не меняется.
    pub fn make_sale_at(
        &mut self,
        product_id: u64,
        quantity: &str,
        sold_at: String,
    ) -> Result<SaleRecord, DukaError> {
        let quantity = self
            .validate_sale(product_id, quantity, &sold_at)
            .inspect_err(|err| warn!("Продажа товара {product_id} отклонена: {err}"))?;

        let product = self
            .inventory
            .get(product_id)
            .cloned()
            .ok_or(DukaError::ProductNotFound(product_id))?;
        let record = self.sales.record_sale(&product, quantity, sold_at)?;

        let stock = match self.inventory.get_mut(product_id) {
            Some(product) => {
                product.st -= quantity;
                product.st
            }
            None => return Err(DukaError::ProductNotFound(product_id)),
        };
        self.inventory.persist()?;

        info!(
            "Продано {} ед. товара {} ({}), остаток {}",
            quantity, product.name, record.sold_at, stock
        );
        Ok(record)
    }

    /// Проверить продажу без изменения состояния.
    fn validate_sale(
        &self,
        product_id: u64,
        quantity: &str,
        sold_at: &str,
    ) -> Result<i64, DukaError> {
        let quantity = parse_sale_quantity(quantity)?;
        if parse_timestamp(sold_at).is_none() {
            return Err(DukaError::validation(format!(
                "время продажи '{sold_at}' не в формате {TIMESTAMP_FORMAT}"
            )));
        }
        let product = self
            .inventory
            .get(product_id)
            .ok_or(DukaError::ProductNotFound(product_id))?;

        if quantity > product.st {
            return Err(DukaError::InsufficientStock {
                name: product.name.clone(),
                requested: quantity,
                available: product.st,
            });
        }
        Ok(quantity)
    }

    /// Добавить товар из формы и перезаписать инвентарь.
    ///
    /// ## Ошибки
    ///
    /// [`DukaError::Validation`], если название пустое или одно из числовых
    /// полей содержит не только цифры, и [`DukaError::IdsExhausted`], если
    /// свободных id не осталось. Инвентарь при этом не меняется.
    pub fn add_product(&mut self, form: &ProductForm) -> Result<Product, DukaError> {
        let (st, sp, bp) = Self::validate_form(form)
            .inspect_err(|err| warn!("Товар '{}' не добавлен: {err}", form.name))?;

        let product = Product {
            id: self.inventory.allocate_id()?,
            name: form.name.clone(),
            st,
            sp,
            bp,
        };
        self.inventory.append(product.clone());
        self.inventory.persist()?;

        info!("Добавлен товар: {}", product);
        Ok(product)
    }

    fn validate_form(form: &ProductForm) -> Result<(i64, i64, i64), DukaError> {
        if form.name.is_empty() {
            return Err(DukaError::validation(format!(
                "поле '{}' не может быть пустым",
                ProductField::Name
            )));
        }
        let st = parse_form_number(ProductField::Quantity, &form.quantity)?;
        let sp = parse_form_number(ProductField::SellingPrice, &form.selling_price)?;
        let bp = parse_form_number(ProductField::BuyingPrice, &form.buying_price)?;
        Ok((st, sp, bp))
    }

    /// История продаж товара в порядке записи.
    pub fn sales_history(&self, product_id: u64) -> Vec<SaleRecord> {
        self.sales.history(product_id)
    }
}
