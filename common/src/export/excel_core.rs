//! Excel出力（共通ライブラリ）
//!
//! 処理済みシートを rust_xlsxwriter のワークブックに書き込み、
//! すべてのシートが確定した後にバッファとして取り出す。

use crate::error::{Error, Result};
use crate::processor::RowSink;
use crate::sheet::{CellValue, Sheet, FIXED_COL, REASON_COL};
use rust_xlsxwriter::*;

/// 修正後の訳文列の幅
const FIXED_COL_WIDTH: f64 = 40.0;
/// 注記列の幅
const REASON_COL_WIDTH: f64 = 60.0;

/// xlsx を生成する RowSink
pub struct XlsxSink {
    workbook: Workbook,
    header_format: Format,
    sheet_count: usize,
}

impl Default for XlsxSink {
    fn default() -> Self {
        Self::new()
    }
}

impl XlsxSink {
    pub fn new() -> Self {
        Self {
            workbook: Workbook::new(),
            header_format: Format::new().set_bold(),
            sheet_count: 0,
        }
    }

    /// 確定済みシート数
    pub fn sheet_count(&self) -> usize {
        self.sheet_count
    }
}

impl RowSink for XlsxSink {
    type Output = Vec<u8>;

    fn commit_sheet(&mut self, sheet: &Sheet) -> Result<()> {
        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| Error::sheet(&sheet.name, format!("invalid sheet name: {}", e)))?;

        for (col, width) in [(FIXED_COL, FIXED_COL_WIDTH), (REASON_COL, REASON_COL_WIDTH)] {
            worksheet
                .set_column_width(col as ColNum, width)
                .map_err(|e| Error::sheet(&sheet.name, format!("cannot set column width: {}", e)))?;
        }

        for (row_idx, cells) in sheet.rows.iter().enumerate() {
            let row = RowNum::try_from(row_idx)
                .map_err(|_| Error::row(&sheet.name, row_idx + 1, "row exceeds the Excel row limit"))?;

            for (col_idx, cell) in cells.iter().enumerate() {
                let col = ColNum::try_from(col_idx)
                    .map_err(|_| Error::row(&sheet.name, row_idx + 1, "column exceeds the Excel column limit"))?;

                let written = match cell {
                    CellValue::Empty => continue,
                    CellValue::Text(s) | CellValue::Other(s) if s.is_empty() => continue,
                    CellValue::Text(s) if row == 0 && (col_idx == FIXED_COL || col_idx == REASON_COL) => {
                        worksheet.write_string_with_format(row, col, s, &self.header_format)
                    }
                    CellValue::Text(s) | CellValue::Other(s) => worksheet.write_string(row, col, s),
                    CellValue::Number(n) => worksheet.write_number(row, col, *n),
                    CellValue::Bool(b) => worksheet.write_boolean(row, col, *b),
                };

                written.map_err(|e| Error::row(&sheet.name, row_idx + 1, format!("cannot write cell: {}", e)))?;
            }
        }

        self.sheet_count += 1;
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<u8>> {
        self.workbook
            .save_to_buffer()
            .map_err(|e| Error::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xlsx_buffer_is_zip() {
        let mut sink = XlsxSink::new();
        let sheet = Sheet::new("Sheet1")
            .with_row(["English", "Japanese", "Fixed Japanese"])
            .with_row(vec![CellValue::Text("a".into()), CellValue::Number(1.5), CellValue::Bool(true)]);
        sink.commit_sheet(&sheet).unwrap();
        assert_eq!(sink.sheet_count(), 1);

        let buffer = sink.finalize().unwrap();
        assert!(buffer.len() > 0);
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_cell_write_failure_reports_row() {
        let mut sink = XlsxSink::new();
        // Excelのセル文字数上限（32767）を超える
        let too_long = "あ".repeat(40_000);
        let sheet = Sheet::new("訳文")
            .with_row(["src", "dst"])
            .with_row(vec![CellValue::Text("ok".into()), CellValue::Text(too_long)]);

        let err = sink.commit_sheet(&sheet).unwrap_err();
        match err {
            Error::Row { sheet, row, .. } => {
                assert_eq!(sheet, "訳文");
                assert_eq!(row, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_sheet_name_reports_sheet() {
        let mut sink = XlsxSink::new();
        let err = sink.commit_sheet(&Sheet::new("bad[name]")).unwrap_err();
        assert!(matches!(err, Error::Sheet { ref sheet, .. } if sheet == "bad[name]"));
    }
}
