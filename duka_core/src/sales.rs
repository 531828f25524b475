//! Журнал продаж: только дозапись.

use crate::storage::{JsonFile, RecordStorage};
use commons::errors::DukaError;
use commons::models::{Product, SaleRecord};
use log::{info, warn};
use std::path::Path;

/// Следующий свободный идентификатор продажи: `1 + max(sales_id)` или `1`.
/// `None`, если в журнале уже записан `u64::MAX`.
pub fn next_sales_id(records: &[SaleRecord]) -> Option<u64> {
    records
        .iter()
        .map(|r| r.sales_id)
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
}

/// Отобрать продажи одного товара, сохранив порядок записи.
pub fn filter_by_product(records: &[SaleRecord], product_id: u64) -> Vec<SaleRecord> {
    records
        .iter()
        .filter(|r| r.product_id == product_id)
        .cloned()
        .collect()
}

/// Журнал продаж.
///
/// Содержимое хранилища не кэшируется: каждая операция заново читает журнал
/// целиком. Отсутствующий или повреждённый журнал считается пустым.
/// Журнал с исчерпанными идентификаторами читается, но новые продажи
/// в него не записываются.
#[derive(Debug)]
pub struct SalesLog<S: RecordStorage = JsonFile> {
    storage: S,
    /// `None`: свободных идентификаторов не осталось.
    next_sales_id: Option<u64>,
}

impl SalesLog<JsonFile> {
    /// Открыть журнал продаж в JSON-файле.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::new(JsonFile::new(path))
    }
}

impl<S: RecordStorage> SalesLog<S> {
    /// Подключить журнал и вычислить следующий идентификатор продажи по уже
    /// записанным данным.
    pub fn new(storage: S) -> Self {
        let mut log = Self {
            storage,
            next_sales_id: Some(1),
        };
        log.next_sales_id = next_sales_id(&log.load());
        if log.next_sales_id.is_none() {
            warn!(
                "В журнале продаж {} записан предельный sales_id, новые продажи невозможны",
                log.storage.location()
            );
        }
        log
    }

    /// Прочитать все продажи.
    ///
    /// Ошибки чтения не пробрасываются: вместо них возвращается пустой
    /// список, а причина пишется в лог.
    pub fn load(&self) -> Vec<SaleRecord> {
        if !self.storage.exists() {
            return Vec::new();
        }
        self.storage.read_all().unwrap_or_else(|err| {
            warn!(
                "Журнал продаж {} не прочитан, считаем пустым: {}",
                self.storage.location(),
                err
            );
            Vec::new()
        })
    }

    /// Идентификатор, который получит следующая продажа.
    pub fn next_sales_id(&self) -> Option<u64> {
        self.next_sales_id
    }

    /// Дописать готовую запись о продаже и перезаписать журнал.
    pub fn append(&mut self, record: SaleRecord) -> Result<(), DukaError> {
        let mut records = self.load();
        let bumped = self
            .next_sales_id
            .zip(record.sales_id.checked_add(1))
            .map(|(next, after)| next.max(after));
        records.push(record);
        self.storage.write_all(&records)?;
        self.next_sales_id = bumped;
        Ok(())
    }

    /// Сформировать запись о продаже товара и дописать её в журнал.
    ///
    /// Идентификатор выдаётся больше любого уже записанного, даже если
    /// журнал изменился после открытия.
    ///
    /// ## Ошибки
    ///
    /// [`DukaError::IdsExhausted`], если свободного идентификатора нет.
    /// Журнал при этом не перезаписывается.
    pub fn record_sale(
        &mut self,
        product: &Product,
        quantity: i64,
        sold_at: String,
    ) -> Result<SaleRecord, DukaError> {
        let mut records = self.load();
        let sales_id = self
            .next_sales_id
            .zip(next_sales_id(&records))
            .map(|(ours, persisted)| ours.max(persisted))
            .ok_or_else(|| DukaError::IdsExhausted(self.storage.location()))?;

        let record = SaleRecord {
            sales_id,
            product_id: product.id,
            quantity,
            sold_at,
            product_name: product.name.clone(),
        };
        records.push(record.clone());
        self.storage.write_all(&records)?;
        self.next_sales_id = sales_id.checked_add(1);

        info!("Продажа записана: {}", record);
        Ok(record)
    }

    /// История продаж товара.
    pub fn history(&self, product_id: u64) -> Vec<SaleRecord> {
        filter_by_product(&self.load(), product_id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::fs;

    fn sale(sales_id: u64, product_id: u64) -> SaleRecord {
        SaleRecord {
            sales_id,
            product_id,
            quantity: 1,
            sold_at: "2024-05-01 10:00:00".to_string(),
            product_name: format!("p{product_id}"),
        }
    }

    fn soap() -> Product {
        Product {
            id: 1,
            name: "Soap".to_string(),
            st: 10,
            sp: 50,
            bp: 30,
        }
    }

    #[test]
    fn missing_file_is_empty_log() {
        let tmp = tempfile::tempdir().unwrap();
        let log = SalesLog::open(tmp.path().join("sales.txt"));

        assert!(log.load().is_empty());
        assert_eq!(log.next_sales_id(), Some(1));
    }

    #[test]
    fn malformed_file_is_empty_log() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sales.txt");
        fs::write(&path, "garbage").unwrap();

        let mut log = SalesLog::open(&path);
        assert!(log.load().is_empty());

        // Дозапись поверх повреждённого файла начинает журнал заново.
        log.append(sale(1, 1)).unwrap();
        assert_eq!(log.load(), vec![sale(1, 1)]);
    }

    #[test]
    fn filter_keeps_order_and_matches_only() {
        let records = vec![sale(1, 2), sale(2, 1), sale(3, 2), sale(4, 3), sale(5, 2)];
        let filtered = filter_by_product(&records, 2);

        let ids: Vec<u64> = filtered.iter().map(|r| r.sales_id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert!(filter_by_product(&records, 9).is_empty());
    }

    #[test]
    fn next_id_continues_from_persisted_max() {
        let content = serde_json::to_string(&vec![sale(4, 1), sale(9, 1)]).unwrap();
        let mut log = SalesLog::new(MemoryStorage::with_content(content));
        assert_eq!(log.next_sales_id(), Some(10));

        let record = log
            .record_sale(&soap(), 2, "2024-05-02 09:00:00".to_string())
            .unwrap();
        assert_eq!(record.sales_id, 10);
        assert_eq!(record.product_name, "Soap");
        assert_eq!(log.next_sales_id(), Some(11));
    }

    #[test]
    fn record_sale_skips_ids_written_by_others() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sales.txt");
        let mut log = SalesLog::open(&path);

        // Журнал изменён в обход открытого экземпляра.
        let content = serde_json::to_string(&vec![sale(5, 1)]).unwrap();
        fs::write(&path, content).unwrap();

        let record = log
            .record_sale(&soap(), 1, "2024-05-02 09:00:00".to_string())
            .unwrap();
        assert_eq!(record.sales_id, 6);
        assert_eq!(log.load().len(), 2);
    }

    #[test]
    fn history_reads_current_file() {
        let mut log = SalesLog::new(MemoryStorage::new());
        log.append(sale(1, 1)).unwrap();
        log.append(sale(2, 2)).unwrap();
        log.append(sale(3, 1)).unwrap();

        assert_eq!(log.history(1), vec![sale(1, 1), sale(3, 1)]);
        assert_eq!(log.storage().writes(), 3);
        assert_eq!(log.next_sales_id(), Some(4));
    }

    #[test]
    fn max_sales_id_still_loads() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sales.txt");
        let content = serde_json::to_string(&vec![sale(3, 1), sale(u64::MAX, 2)]).unwrap();
        fs::write(&path, &content).unwrap();

        let mut log = SalesLog::open(&path);
        assert_eq!(log.next_sales_id(), None);
        assert_eq!(log.history(2), vec![sale(u64::MAX, 2)]);

        let err = log
            .record_sale(&soap(), 1, "2024-05-02 09:00:00".to_string())
            .unwrap_err();
        assert!(matches!(err, DukaError::IdsExhausted(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn append_of_max_sales_id_exhausts_log() {
        let mut log = SalesLog::new(MemoryStorage::new());
        log.append(sale(u64::MAX, 1)).unwrap();

        assert_eq!(log.next_sales_id(), None);
        assert!(
            log.record_sale(&soap(), 1, "2024-05-02 09:00:00".to_string())
                .is_err()
        );
        assert_eq!(log.storage().writes(), 1);
    }
}
