//! Хранилища записей.
//!
//! Все данные приложения хранятся как JSON-массив плоских объектов и
//! перезаписываются целиком при каждом изменении. Политика записи спрятана
//! за трейтом [`RecordStorage`]: инвентарь и журнал продаж работают только
//! с ним.

use commons::errors::DukaError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Отступ JSON в файлах данных.
const JSON_INDENT: &[u8] = b"    ";

/// Хранилище последовательности однотипных записей.
pub trait RecordStorage {
    /// Описание расположения данных для сообщений и логов.
    fn location(&self) -> String;

    /// Существует ли хранилище (например, файл на диске).
    fn exists(&self) -> bool;

    /// Прочитать все записи.
    ///
    /// ## Ошибки
    ///
    /// - [`DukaError::Io`] — хранилище отсутствует или недоступно
    /// - [`DukaError::Json`] — содержимое не является массивом записей
    fn read_all<T: DeserializeOwned>(&self) -> Result<Vec<T>, DukaError>;

    /// Перезаписать хранилище переданной последовательностью целиком.
    fn write_all<T: Serialize>(&self, records: &[T]) -> Result<(), DukaError>;
}

/// Сериализовать записи в JSON с отступом в четыре пробела.
pub fn to_pretty_json<T: Serialize>(records: &[T]) -> Result<Vec<u8>, DukaError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    Ok(buf)
}

/// JSON-файл на диске.
///
/// Запись идёт напрямую в файл, без временного файла и блокировок.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RecordStorage for JsonFile {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read_all<T: DeserializeOwned>(&self) -> Result<Vec<T>, DukaError> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_all<T: Serialize>(&self, records: &[T]) -> Result<(), DukaError> {
        let json = to_pretty_json(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Хранилище в памяти.
///
/// Хранит тот же JSON, что записывался бы в файл, и считает количество
/// перезаписей. Подходит для тестовых стендов и альтернативных интерфейсов.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    content: RefCell<Option<String>>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    /// Пустое хранилище (аналог отсутствующего файла).
    pub fn new() -> Self {
        Self::default()
    }

    /// Хранилище с готовым содержимым.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: RefCell::new(Some(content.into())),
            writes: Cell::new(0),
        }
    }

    /// Текущее содержимое.
    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    /// Количество выполненных перезаписей.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl RecordStorage for MemoryStorage {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn exists(&self) -> bool {
        self.content.borrow().is_some()
    }

    fn read_all<T: DeserializeOwned>(&self) -> Result<Vec<T>, DukaError> {
        match self.content.borrow().as_deref() {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "хранилище пусто").into()),
        }
    }

    fn write_all<T: Serialize>(&self, records: &[T]) -> Result<(), DukaError> {
        let json = String::from_utf8_lossy(&to_pretty_json(records)?).into_owned();
        self.content.replace(Some(json));
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commons::models::Product;

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
    fn pretty_json_uses_four_spaces() {
        let json = String::from_utf8(to_pretty_json(&[soap()]).unwrap()).unwrap();

        assert!(json.starts_with("[\n    {\n        \"id\": 1,"));
        assert!(json.ends_with("    }\n]"));
    }

    #[test]
    fn empty_sequence_is_empty_array() {
        let json = to_pretty_json::<Product>(&[]).unwrap();
        assert_eq!(json, b"[]");
    }

    #[test]
    fn json_file_missing_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let file = JsonFile::new(tmp.path().join("absent.txt"));

        assert!(!file.exists());
        assert!(matches!(
            file.read_all::<Product>(),
            Err(DukaError::Io(_))
        ));
    }

    #[test]
    fn json_file_malformed_is_json_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("data.txt");
        fs::write(&path, "{not json").unwrap();

        let file = JsonFile::new(&path);
        assert!(matches!(
            file.read_all::<Product>(),
            Err(DukaError::Json(_))
        ));
    }

    #[test]
    fn json_file_overwrites_in_place() {
        let tmp = tempfile::tempdir().unwrap();
        let file = JsonFile::new(tmp.path().join("data.txt"));

        file.write_all(&[soap(), soap()]).unwrap();
        file.write_all(&[soap()]).unwrap();

        let back: Vec<Product> = file.read_all().unwrap();
        assert_eq!(back, vec![soap()]);
    }

    #[test]
    fn memory_storage_counts_writes() {
        let storage = MemoryStorage::new();
        assert!(!storage.exists());
        assert!(storage.read_all::<Product>().is_err());

        storage.write_all(&[soap()]).unwrap();

        assert!(storage.exists());
        assert_eq!(storage.writes(), 1);
        assert_eq!(storage.read_all::<Product>().unwrap(), vec![soap()]);
    }
}
