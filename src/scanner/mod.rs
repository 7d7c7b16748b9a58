use crate::error::{Result, ValidatorError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct WorkbookInfo {
    pub path: PathBuf,
    pub file_name: String,
}

pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Excelのロックファイル接頭辞
const LOCK_FILE_PREFIX: &str = "~$";

/// フォルダ直下のワークブックを列挙する
///
/// `output_suffix` 付きのファイル（前回の出力）とロックファイルは除外する。
pub fn scan_folder(folder: &Path, output_suffix: &str) -> Result<Vec<WorkbookInfo>> {
    if !folder.is_dir() {
        return Err(ValidatorError::FileNotFound(folder.display().to_string()));
    }

    let mut workbooks = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() || !is_supported_workbook(path) {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if file_name.starts_with(LOCK_FILE_PREFIX) {
            continue;
        }
        if !output_suffix.is_empty() && stem.ends_with(output_suffix) {
            tracing::debug!(file = %file_name, "skipping previous output");
            continue;
        }

        workbooks.push(WorkbookInfo {
            path: path.to_path_buf(),
            file_name,
        });
    }

    // ファイル名でソート
    workbooks.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(workbooks)
}

/// 読み込み可能な拡張子か
pub fn is_supported_workbook(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            WORKBOOK_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
