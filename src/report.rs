//! 実行レポート（JSON）

use crate::error::Result;
use punct_validator_common::SheetSummary;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 1ファイル分の結果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub input: String,
    /// 失敗時は出力なし
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub sheets: Vec<SheetSummary>,
}

impl FileReport {
    pub fn succeeded(input: &Path, output: &Path, sheets: Vec<SheetSummary>) -> Self {
        Self {
            input: input.display().to_string(),
            output: Some(output.display().to_string()),
            error: None,
            sheets,
        }
    }

    pub fn failed(input: &Path, error: &dyn std::fmt::Display) -> Self {
        Self {
            input: input.display().to_string(),
            output: None,
            error: Some(error.to_string()),
            sheets: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(|s| s.rows).sum()
    }

    pub fn annotated_rows(&self) -> usize {
        self.sheets.iter().map(|s| s.annotated_rows).sum()
    }
}

/// 実行全体のレポート
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// 生成日時（RFC 3339）
    pub generated_at: String,
    pub files: Vec<FileReport>,
}

impl RunReport {
    pub fn new(files: Vec<FileReport>) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            files,
        }
    }

    pub fn failed_count(&self) -> usize {
        self.files.iter().filter(|f| !f.is_success()).count()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
