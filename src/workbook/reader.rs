//! ワークブック読み込み（calamine）

use crate::error::{Result, ValidatorError};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use punct_validator_common::{CellValue, RowSource, Sheet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// calamine で開いたワークブックをシート単位で供給する
pub struct CalamineSource {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
}

impl CalamineSource {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ValidatorError::FileNotFound(path.display().to_string()));
        }
        if !crate::scanner::is_supported_workbook(path) {
            return Err(ValidatorError::UnsupportedFormat(path.display().to_string()));
        }

        let workbook = open_workbook_auto(path).map_err(|e| ValidatorError::WorkbookOpen {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            workbook,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSource for CalamineSource {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> punct_validator_common::Result<Sheet> {
        let range = self
            .workbook
            .worksheet_range(name)
            .map_err(|e| punct_validator_common::Error::sheet(name, e))?;
        Ok(sheet_from_range(name, &range))
    }
}

/// Range をA1起点のグリッドに変換する
///
/// calamine の Range は最初の使用セルが起点なので、絶対位置に戻す。
fn sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);

    let Some((start_row, start_col)) = range.start() else {
        return sheet;
    };

    for (row, col, data) in range.used_cells() {
        let row = start_row as usize + row;
        let col = start_col as usize + col;
        sheet.set_cell(row, col, cell_value(data));
    }

    sheet
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Float(v) => CellValue::Number(*v),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(v) => CellValue::Number(v.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Other(s.clone()),
        Data::Error(e) => CellValue::Other(e.to_string()),
    }
}
