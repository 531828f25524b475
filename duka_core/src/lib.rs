//! Ядро Duka Sales Management System.
//!
//! Инвентарь и журнал продаж хранятся в двух JSON-файлах (`data.txt` и
//! `sales.txt`) и перезаписываются целиком после каждого изменения. Ядро
//! не зависит от интерфейса: любые экраны, консоль или тесты вызывают
//! синхронные методы [`shop::Shop`].
//!
//! ## Модули
//!
//! - [`storage`] — трейт хранилища и его реализации (файл, память)
//! - [`inventory`] — инвентарь товаров
//! - [`sales`] — журнал продаж
//! - [`shop`] — операции продажи и добавления товара

pub mod inventory;
pub mod sales;
pub mod shop;
pub mod storage;

pub use inventory::InventoryStore;
pub use sales::SalesLog;
pub use shop::{ProductForm, Shop};
pub use storage::{JsonFile, MemoryStorage, RecordStorage};
