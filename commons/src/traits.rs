//! Универсальные трейты для приложений Duka.

use std::io::Write;

pub trait WriteExt {
    /// Отправляет в `Write` текстовую строку с завершающим переводом
    /// строки.
    fn write_line(&mut self, s: impl AsRef<str>);
    /// Обёртка для `writer.flush()`, скрывающая обработку `Result`.
    fn flush_ext(&mut self);
}

impl<W: Write> WriteExt for W {
    fn write_line(&mut self, s: impl AsRef<str>) {
        let _ = self.write_all(s.as_ref().as_bytes());
        let _ = self.write_all(b"\n");
        self.flush_ext()
    }

    fn flush_ext(&mut self) {
        let _ = self.flush();
    }
}
