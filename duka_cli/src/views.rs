//! Текстовые таблицы для вывода в консоль.

use commons::models::{Product, SaleRecord};

/// Заголовки таблицы инвентаря.
const INVENTORY_HEADER: [&str; 5] = [
    "Id",
    "Product Name",
    "Quantity",
    "Selling Price",
    "Buying Price",
];

/// Заголовки таблицы продаж товара.
const SALES_HEADER: [&str; 3] = ["Sales ID", "Quantity", "Sold At"];

/// Сформировать таблицу с выравниванием по самой длинной ячейке столбца.
fn render_table<const N: usize>(header: [&str; N], rows: Vec<[String; N]>) -> String {
    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(header.to_vec())];
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

/// Таблица инвентаря.
pub fn render_inventory(products: &[Product]) -> String {
    let rows = products
        .iter()
        .map(|p| {
            [
                p.id.to_string(),
                p.name.clone(),
                p.st.to_string(),
                p.sp.to_string(),
                p.bp.to_string(),
            ]
        })
        .collect();
    render_table(INVENTORY_HEADER, rows)
}

/// Таблица продаж одного товара.
pub fn render_sales(product: &Product, records: &[SaleRecord]) -> String {
    let rows = records
        .iter()
        .map(|r| [r.sales_id.to_string(), r.quantity.to_string(), r.sold_at.clone()])
        .collect();
    let title = format!("Sales of '{}' (id {})", product.name, product.id);
    format!("{title}\n{}", render_table(SALES_HEADER, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soap() -> Product {
        Product {
            id: 1,
            name: "Soap".to_string(),
            st: 7,
            sp: 50,
            bp: 30,
        }
    }

    #[test]
    fn inventory_table_lists_every_product() {
        let table = render_inventory(&[soap()]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Id  Product Name  Quantity"));
        assert!(lines[1].starts_with("--  ------------"));
        assert_eq!(lines[2], "1   Soap          7         50             30");
    }

    #[test]
    fn empty_inventory_has_header_only() {
        let table = render_inventory(&[]);
        assert_eq!(table.lines().count(), 2);
    }

    #[test]
    fn sales_table_columns() {
        let sale = SaleRecord {
            sales_id: 12,
            product_id: 1,
            quantity: 3,
            sold_at: "2024-05-01 10:00:00".to_string(),
            product_name: "Soap".to_string(),
        };
        let table = render_sales(&soap(), &[sale]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Sales of 'Soap' (id 1)");
        assert_eq!(lines[1], "Sales ID  Quantity  Sold At");
        assert_eq!(lines[3], "12        3         2024-05-01 10:00:00");
    }
}
