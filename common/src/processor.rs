//! シート処理
//!
//! シートの各データ行を検証し、C列（修正後の訳文）・D列（注記）と
//! ヘッダーラベルを書き込んだ新しいシートを生成する。入力シートは変更しない。
//!
//! 読み込み・書き出しは `RowSource` / `RowSink` としてホスト側が実装する。

use crate::charmap::CharacterMap;
use crate::error::Result;
use crate::sheet::{
    CellValue, Row, Sheet, SheetSummary, FIXED_COL, FIXED_HEADER, REASON_COL, REASON_HEADER,
};
use crate::validator::{validate, ValidationResult};
use rayon::prelude::*;

/// シート単位で行を供給する
pub trait RowSource {
    /// シート名（処理順）
    fn sheet_names(&self) -> Vec<String>;

    /// シートを読み込む。失敗はシート名付きで返す
    fn read_sheet(&mut self, name: &str) -> Result<Sheet>;
}

/// 処理済みシートを受け取り、最終的な出力を生成する
pub trait RowSink {
    type Output;

    /// 処理済みシートを確定する
    fn commit_sheet(&mut self, sheet: &Sheet) -> Result<()>;

    /// 出力を生成する
    fn finalize(self) -> Result<Self::Output>;
}

/// シートプロセッサ
#[derive(Debug, Clone, Copy)]
pub struct SheetProcessor<'a> {
    map: &'a CharacterMap,
    parallel: bool,
}

impl<'a> SheetProcessor<'a> {
    pub fn new(map: &'a CharacterMap) -> Self {
        Self {
            map,
            parallel: false,
        }
    }

    /// 行の検証を並列化する（結果は逐次処理と同一）
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn map(&self) -> &CharacterMap {
        self.map
    }

    /// 1シートを処理して注記済みのシートを返す
    pub fn process_sheet(&self, sheet: &Sheet) -> (Sheet, SheetSummary) {
        let data_rows = sheet.rows.get(1..).unwrap_or(&[]);

        let results: Vec<(Row, ValidationResult)> = if self.parallel {
            data_rows.par_iter().map(|cells| self.check(cells)).collect()
        } else {
            data_rows.iter().map(|cells| self.check(cells)).collect()
        };

        let mut output = sheet.clone();
        output.set_cell(0, FIXED_COL, FIXED_HEADER.into());
        output.set_cell(0, REASON_COL, REASON_HEADER.into());

        let mut summary = SheetSummary {
            name: sheet.name.clone(),
            rows: results.len(),
            ..Default::default()
        };

        for (index, (row, result)) in results.into_iter().enumerate() {
            let row_index = index + 1;

            if result.fixed_text != row.target_text {
                summary.fixed_rows += 1;
            }
            if let Some(annotation) = result.annotation() {
                summary.annotated_rows += 1;
                output.set_cell(row_index, REASON_COL, CellValue::Text(annotation));
            }
            output.set_cell(row_index, FIXED_COL, CellValue::Text(result.fixed_text));
        }

        (output, summary)
    }

    fn check(&self, cells: &[CellValue]) -> (Row, ValidationResult) {
        let row = Row::from_cells(cells);
        let result = validate(&row.source_text, &row.target_text, self.map);
        (row, result)
    }
}

/// 全シートを順に読み込み・処理・確定する
///
/// 途中のシートで失敗した場合はそこで停止してエラーを返す。
/// それまでに確定したシートは `sink` に残る。
pub fn process_workbook<S, K>(
    processor: &SheetProcessor<'_>,
    source: &mut S,
    sink: &mut K,
) -> Result<Vec<SheetSummary>>
where
    S: RowSource + ?Sized,
    K: RowSink,
{
    let mut summaries = Vec::new();

    for name in source.sheet_names() {
        let sheet = source.read_sheet(&name)?;
        let (annotated, summary) = processor.process_sheet(&sheet);
        sink.commit_sheet(&annotated)?;
        summaries.push(summary);
    }

    Ok(summaries)
}
