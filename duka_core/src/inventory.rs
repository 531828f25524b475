//! Инвентарь: список товаров, зеркалируемый в файл данных.

use crate::storage::{JsonFile, RecordStorage};
use commons::errors::DukaError;
use commons::models::Product;
use log::info;
use std::path::Path;

/// Следующий свободный идентификатор товара.
///
/// `1 + max(id)` по переданным товарам или `1` для пустого списка.
/// `None`, если максимальный id уже равен `u64::MAX`.
pub fn next_id(products: &[Product]) -> Option<u64> {
    products
        .iter()
        .map(|p| p.id)
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
}

/// Инвентарь товаров.
///
/// ## Доступные методы
///
/// - [`InventoryStore::load`] — загрузка из хранилища (ошибка фатальна)
/// - [`InventoryStore::append`] — добавление товара в конец списка
/// - [`InventoryStore::persist`] — полная перезапись хранилища
///
/// Каждое изменение должно сопровождаться вызовом `persist`.
#[derive(Debug)]
pub struct InventoryStore<S: RecordStorage = JsonFile> {
    storage: S,
    products: Vec<Product>,
    /// `None`: свободных идентификаторов не осталось.
    next_id: Option<u64>,
}

impl InventoryStore<JsonFile> {
    /// Загрузить инвентарь из JSON-файла.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DukaError> {
        Self::load(JsonFile::new(path))
    }
}

impl<S: RecordStorage> InventoryStore<S> {
    /// Загрузить инвентарь из хранилища.
    ///
    /// ## Ошибки
    ///
    /// [`DukaError::Format`], если хранилище отсутствует, его содержимое
    /// не является JSON-массивом товаров или в нём записан id `u64::MAX`.
    pub fn load(storage: S) -> Result<Self, DukaError> {
        let products: Vec<Product> = storage
            .read_all()
            .map_err(|err| DukaError::format_err(storage.location(), err))?;
        let next_id = next_id(&products).ok_or_else(|| {
            DukaError::format_err(storage.location(), "id товара достиг предельного значения")
        })?;

        info!(
            "Инвентарь загружен из {}: товаров {}, следующий id {}",
            storage.location(),
            products.len(),
            next_id
        );

        Ok(Self {
            storage,
            products,
            next_id: Some(next_id),
        })
    }

    /// Создать пустой инвентарь, если хранилище ещё не существует.
    ///
    /// Существующие данные не перезаписываются.
    ///
    /// ## Returns
    ///
    /// `true`, если хранилище было создано.
    pub fn init(storage: &S) -> Result<bool, DukaError> {
        if storage.exists() {
            return Ok(false);
        }
        storage.write_all::<Product>(&[])?;
        info!("Создан пустой инвентарь: {}", storage.location());
        Ok(true)
    }

    /// Все товары в порядке хранения.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Найти товар по идентификатору.
    pub fn get(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: u64) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Идентификатор, который получит следующий новый товар.
    pub fn next_id(&self) -> Option<u64> {
        self.next_id
    }

    /// Выдать идентификатор для нового товара.
    ///
    /// ## Ошибки
    ///
    /// [`DukaError::IdsExhausted`], если выданный ранее id был последним.
    pub fn allocate_id(&mut self) -> Result<u64, DukaError> {
        let id = self
            .next_id
            .ok_or_else(|| DukaError::IdsExhausted(self.storage.location()))?;
        self.next_id = id.checked_add(1);
        Ok(id)
    }

    /// Добавить товар в конец списка (без записи в хранилище).
    pub fn append(&mut self, product: Product) {
        if self.next_id.is_some_and(|next| product.id >= next) {
            self.next_id = product.id.checked_add(1);
        }
        self.products.push(product);
    }

    /// Перезаписать хранилище всем списком товаров.
    pub fn persist(&self) -> Result<(), DukaError> {
        self.storage.write_all(&self.products)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
