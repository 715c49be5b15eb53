use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};

use crate::errors::AppError;
use crate::models::PriceRow;

pub const EXPORT_MIME: &str = "application/vnd.ms-excel";
pub const SHEET_NAME: &str = "Sheet1";
pub const HEADER: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(&'static str),
    Date(NaiveDate),
    Number(f64),
}

pub struct Export {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub fn file_name(query: &str) -> String {
    format!("{}_주가.xlsx", query)
}

/// Header row followed by one row per price row, date first.
pub fn build_table(rows: &[PriceRow]) -> Vec<Vec<Cell>> {
    let mut table = Vec::with_capacity(rows.len() + 1);
    table.push(HEADER.into_iter().map(Cell::Text).collect());
    for row in rows {
        table.push(vec![
            Cell::Date(row.date),
            Cell::Number(row.open),
            Cell::Number(row.high),
            Cell::Number(row.low),
            Cell::Number(row.close),
            Cell::Number(row.volume as f64),
        ]);
    }
    table
}

pub fn export(query: &str, rows: &[PriceRow]) -> Result<Export, AppError> {
    let bytes = write_workbook(&build_table(rows)).map_err(|e| AppError::Export(e.to_string()))?;
    Ok(Export {
        file_name: file_name(query),
        bytes,
    })
}

fn write_workbook(table: &[Vec<Cell>]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    sheet.set_column_width(0, 12)?;

    for (r, cells) in table.iter().enumerate() {
        let r = r as u32;
        for (c, cell) in cells.iter().enumerate() {
            let c = c as u16;
            match cell {
                Cell::Text(text) => {
                    sheet.write_string_with_format(r, c, *text, &header_format)?;
                }
                Cell::Date(date) => {
                    let value = ExcelDateTime::from_ymd(date.year() as u16, date.month() as u8, date.day() as u8)?;
                    sheet.write_datetime_with_format(r, c, &value, &date_format)?;
                }
                Cell::Number(n) => {
                    sheet.write_number(r, c, *n)?;
                }
            }
        }
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_rows;

    #[test]
    fn test_table_has_header_plus_one_row_per_price_row() {
        let rows = sample_rows(3);
        let table = build_table(&rows);

        assert_eq!(table.len(), 4);
        assert_eq!(table[0], HEADER.into_iter().map(Cell::Text).collect::<Vec<_>>());
        assert_eq!(table[1][0], Cell::Date(rows[0].date));
        assert_eq!(table[3][4], Cell::Number(rows[2].close));
        assert_eq!(table[3][5], Cell::Number(rows[2].volume as f64));
    }

    #[test]
    fn test_export_produces_xlsx_named_after_query() {
        let export = export("삼성전자", &sample_rows(3)).unwrap();
        assert_eq!(export.file_name, "삼성전자_주가.xlsx");
        // xlsx is a zip container
        assert!(export.bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_workbook_reads_back_header_and_rows() {
        use calamine::{open_workbook_from_rs, DataType, Reader, Xlsx};

        let rows = sample_rows(3);
        let export = export("005930", &rows).unwrap();

        let mut workbook: Xlsx<_> = open_workbook_from_rs(std::io::Cursor::new(export.bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);

        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        assert_eq!(range.get_size(), (4, HEADER.len()));

        let header: Vec<String> = (0..HEADER.len())
            .map(|c| range.get((0, c)).unwrap().to_string())
            .collect();
        assert_eq!(header, HEADER);

        assert_eq!(range.get((3, 4)).unwrap().get_float(), Some(rows[2].close));
        assert_eq!(range.get((3, 5)).unwrap().get_float(), Some(rows[2].volume as f64));
        assert!(range.get((1, 0)).unwrap().is_datetime());
    }
}
