//! メモリ上の RowSource / RowSink

use crate::error::{Error, Result};
use crate::processor::{RowSink, RowSource};
use crate::sheet::Sheet;

/// メモリ上のシート列を供給する
///
/// 読み込み失敗を再現するため、シートの代わりにエラーメッセージを置ける。
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: Vec<(String, std::result::Result<Sheet, String>)>,
}

impl MemorySource {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        let sheets = sheets.into_iter().map(|s| (s.name.clone(), Ok(s))).collect();
        Self { sheets }
    }

    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.sheets.push((sheet.name.clone(), Ok(sheet)));
        self
    }

    /// 読み込みに失敗するシートを追加
    pub fn with_failing_sheet(mut self, name: &str, message: &str) -> Self {
        self.sheets.push((name.to_string(), Err(message.to_string())));
        self
    }
}

impl RowSource for MemorySource {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Sheet> {
        match self.sheets.iter().find(|(n, _)| n == name) {
            Some((_, Ok(sheet))) => Ok(sheet.clone()),
            Some((_, Err(message))) => Err(Error::sheet(name, message)),
            None => Err(Error::sheet(name, "no such sheet")),
        }
    }
}

/// 確定したシートを保持する
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    sheets: Vec<Sheet>,
}

impl MemorySink {
    /// これまでに確定したシート
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }
}

impl RowSink for MemorySink {
    type Output = Vec<Sheet>;

    fn commit_sheet(&mut self, sheet: &Sheet) -> Result<()> {
        self.sheets.push(sheet.clone());
        Ok(())
    }

    fn finalize(self) -> Result<Vec<Sheet>> {
        Ok(self.sheets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sheet() {
        let mut source = MemorySource::default();
        let err = source.read_sheet("missing").unwrap_err();
        assert_eq!(err.to_string(), "Sheet 'missing': no such sheet");
    }

    #[test]
    fn test_sheet_names_in_order() {
        let source = MemorySource::new(vec![Sheet::new("b"), Sheet::new("a")])
            .with_failing_sheet("c", "boom");
        assert_eq!(source.sheet_names(), vec!["b", "a", "c"]);
    }
}
