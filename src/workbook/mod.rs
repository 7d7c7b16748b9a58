//! ワークブック単位の検証
//!
//! calamine で読み込んだシートを共通ライブラリで処理し、xlsx としてメモリ上に生成する。
//! 全シートが成功した場合のみ出力ファイルを書き込む。

pub mod reader;

pub use reader::CalamineSource;

use crate::error::{Result, ValidatorError};
use crate::report::FileReport;
use indicatif::{ProgressBar, ProgressStyle};
use punct_validator_common::{
    process_workbook, CharacterMap, RowSink, RowSource, Sheet, SheetProcessor, SheetSummary,
    XlsxSink,
};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// 実行オプション
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// 行の並列処理
    pub parallel: bool,
    /// 進捗バーを表示
    pub show_progress: bool,
}

/// 出力パスを決定する
///
/// `<stem><suffix>.xlsx`。`output_dir` がなければ入力と同じフォルダ。
pub fn output_path_for(input: &Path, suffix: &str, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let file_name = format!("{}{}.xlsx", stem, suffix);

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

/// 拡張子を含めた出力パス（`<stem>_<ext><suffix>.xlsx`）
///
/// 同名で拡張子違いの入力が同じフォルダにあるときに使う。
pub fn output_path_with_extension(input: &Path, suffix: &str, output_dir: Option<&Path>) -> PathBuf {
    let ext = input
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if ext.is_empty() {
        return output_path_for(input, suffix, output_dir);
    }
    output_path_for(input, &format!("_{}{}", ext, suffix), output_dir)
}

/// 入力1件と出力先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// 入力ごとの出力先を決める
///
/// 出力名が衝突する入力（`a.xlsx` と `a.xlsm` など）は拡張子を名前に含める。
pub fn plan_outputs(inputs: &[PathBuf], suffix: &str, output_dir: Option<&Path>) -> Vec<BatchJob> {
    let defaults: Vec<PathBuf> = inputs
        .iter()
        .map(|input| output_path_for(input, suffix, output_dir))
        .collect();

    let mut counts: HashMap<&PathBuf, usize> = HashMap::new();
    for path in &defaults {
        *counts.entry(path).or_insert(0) += 1;
    }

    inputs
        .iter()
        .zip(&defaults)
        .map(|(input, default)| {
            let output = if counts[default] > 1 {
                output_path_with_extension(input, suffix, output_dir)
            } else {
                default.clone()
            };
            BatchJob {
                input: input.clone(),
                output,
            }
        })
        .collect()
}

/// 複数のワークブックを順に検証する
///
/// 各ファイルは独立して成功・失敗する。`confirm` は既存の出力を上書きしてよいかを返し、
/// `false` のファイルはスキップ（レポートに含めない）、エラーはそのファイルの失敗になる。
/// 先行するジョブと同じ出力先を持つジョブは失敗扱いにする。
pub fn validate_batch<F>(
    jobs: &[BatchJob],
    map: &CharacterMap,
    options: &RunOptions,
    mut confirm: F,
) -> Vec<FileReport>
where
    F: FnMut(&Path) -> Result<bool>,
{
    let mut reports = Vec::new();
    let mut claimed: HashSet<&Path> = HashSet::new();

    for job in jobs {
        if !claimed.insert(job.output.as_path()) {
            let err = ValidatorError::DuplicateOutput(job.output.display().to_string());
            tracing::error!(input = %job.input.display(), error = %err, "output collision");
            reports.push(FileReport::failed(&job.input, &err));
            continue;
        }

        match confirm(&job.output) {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!(input = %job.input.display(), "skipped by user");
                continue;
            }
            Err(err) => {
                tracing::error!(input = %job.input.display(), error = %err, "cannot write output");
                reports.push(FileReport::failed(&job.input, &err));
                continue;
            }
        }

        match validate_file(&job.input, &job.output, map, options) {
            Ok(report) => reports.push(report),
            Err(err) => {
                tracing::error!(input = %job.input.display(), error = %err, "validation failed");
                reports.push(FileReport::failed(&job.input, &err));
            }
        }
    }

    reports
}

/// ワークブックを検証し、出力xlsxのバイト列とシートごとの集計を返す
pub fn validate_workbook(
    input: &Path,
    map: &CharacterMap,
    options: &RunOptions,
) -> Result<(Vec<u8>, Vec<SheetSummary>)> {
    let mut source = CalamineSource::open(input)?;
    let processor = SheetProcessor::new(map).parallel(options.parallel);

    let progress = if options.show_progress {
        sheet_progress_bar(source.sheet_names().len() as u64)
    } else {
        ProgressBar::hidden()
    };

    let mut sink = ProgressSink::new(XlsxSink::new(), progress);
    let summaries = process_workbook(&processor, &mut source, &mut sink)?;
    let buffer = sink.finalize()?;

    Ok((buffer, summaries))
}

/// ワークブックを検証して出力ファイルを書き込む
pub fn validate_file(
    input: &Path,
    output: &Path,
    map: &CharacterMap,
    options: &RunOptions,
) -> Result<FileReport> {
    if is_same_file(input, output) {
        return Err(ValidatorError::OutputExists(output.display().to_string()));
    }

    tracing::info!(input = %input.display(), "validating workbook");
    let (buffer, sheets) = validate_workbook(input, map, options)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output, buffer)?;
    tracing::info!(output = %output.display(), "wrote annotated workbook");

    Ok(FileReport::succeeded(input, output, sheets))
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn sheet_progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} シート {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar
}

/// シートの確定ごとに進捗を進める RowSink
pub struct ProgressSink<K> {
    inner: K,
    progress: ProgressBar,
}

impl<K: RowSink> ProgressSink<K> {
    pub fn new(inner: K, progress: ProgressBar) -> Self {
        Self { inner, progress }
    }
}

impl<K: RowSink> RowSink for ProgressSink<K> {
    type Output = K::Output;

    fn commit_sheet(&mut self, sheet: &Sheet) -> punct_validator_common::Result<()> {
        self.progress.set_message(sheet.name.clone());
        self.inner.commit_sheet(sheet)?;
        tracing::debug!(sheet = %sheet.name, rows = sheet.data_row_count(), "sheet committed");
        self.progress.inc(1);
        Ok(())
    }

    fn finalize(self) -> punct_validator_common::Result<K::Output> {
        self.progress.finish_and_clear();
        self.inner.finalize()
    }
}
