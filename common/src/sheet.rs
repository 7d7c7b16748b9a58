//! シート・行・セルの型定義

use serde::{Deserialize, Serialize};

/// 原文列（A列）
pub const SOURCE_COL: usize = 0;
/// 訳文列（B列）
pub const TARGET_COL: usize = 1;
/// 修正後の訳文列（C列）
pub const FIXED_COL: usize = 2;
/// 注記列（D列）
pub const REASON_COL: usize = 3;

pub const FIXED_HEADER: &str = "Fixed Japanese";
pub const REASON_HEADER: &str = "Reason for Change / Validation";

/// セル値
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// 表示用の値（エラー値・ISO日付など）。テキストとしては扱わない
    Other(String),
}

impl CellValue {
    /// テキストセルならその文字列、それ以外は空文字列
    pub fn as_text(&self) -> &str {
        match self {
            CellValue::Text(s) => s,
            _ => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// 検証対象の1行（A列・B列）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub source_text: String,
    pub target_text: String,
}

impl Row {
    pub fn new(source_text: impl Into<String>, target_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            target_text: target_text.into(),
        }
    }

    /// セル列から読み取る。欠けたセル・非テキストは空文字列
    pub fn from_cells(cells: &[CellValue]) -> Self {
        let text = |col: usize| cells.get(col).map(CellValue::as_text).unwrap_or("");
        Self::new(text(SOURCE_COL), text(TARGET_COL))
    }
}

/// 1シート分のセルグリッド
///
/// `rows[0]` がExcelの1行目（ヘッダー）、データは `rows[1]` 以降。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// 行を追加（ビルダー形式）
    pub fn with_row<I, C>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CellValue>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// セルを取得（0始まり）
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(EMPTY)
    }

    /// セルを設定（0始まり）。足りない行・列は空セルで埋める
    pub fn set_cell(&mut self, row: usize, col: usize, value: CellValue) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Empty);
        }
        cells[col] = value;
    }

    /// データ行数（ヘッダー除く）
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

/// シートごとの処理結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSummary {
    pub name: String,
    /// データ行数
    pub rows: usize,
    /// 全角化で訳文が変わった行数
    pub fixed_rows: usize,
    /// 注記が付いた行数
    pub annotated_rows: usize,
}
