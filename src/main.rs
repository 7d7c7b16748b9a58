use anyhow::Context;
use clap::Parser;
use dialoguer::Confirm;
use jp_punct_validator::{cli, config, error, report, scanner, workbook};
use cli::{Cli, Commands};
use config::Config;
use error::ValidatorError;
use punct_validator_common::validate;
use report::{FileReport, RunReport};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use workbook::{BatchJob, RunOptions};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::Validate { input, output, map, parallel, report, yes } => {
            println!("📝 punct-validator - 句読点検証\n");

            let map = config
                .character_map(map.as_deref())
                .context("文字マップの読み込みに失敗しました")?;
            let options = RunOptions {
                parallel: parallel || config.parallel,
                show_progress: true,
            };

            let (jobs, step_label) = if input.is_dir() {
                // 1. ワークブック検索
                println!("[1/2] ワークブックを検索中...");
                let workbooks = scanner::scan_folder(&input, &config.output_suffix)?;
                if workbooks.is_empty() {
                    return Err(ValidatorError::NoWorkbooksFound(input.display().to_string()).into());
                }
                println!("✔ {}件のワークブックを検出\n", workbooks.len());

                let output_dir = output.unwrap_or_else(|| input.clone());
                let inputs: Vec<PathBuf> = workbooks.into_iter().map(|w| w.path).collect();
                let jobs = workbook::plan_outputs(&inputs, &config.output_suffix, Some(&output_dir));
                (jobs, "[2/2] 検証中...")
            } else {
                let output_path = match output {
                    Some(path) if path.is_dir() => {
                        workbook::output_path_for(&input, &config.output_suffix, Some(&path))
                    }
                    Some(path) => path,
                    None => workbook::output_path_for(&input, &config.output_suffix, None),
                };
                (vec![BatchJob { input: input.clone(), output: output_path }], "[1/1] 検証中...")
            };

            // 2. 検証（ファイルごとに成功・失敗）
            println!("{}", step_label);
            let files = workbook::validate_batch(&jobs, &map, &options, |path| {
                let accepted = confirm_overwrite(path, yes)?;
                if !accepted {
                    println!("- スキップ: {}", path.display());
                }
                Ok(accepted)
            });

            for file in &files {
                match &file.error {
                    None => print_file_summary(file),
                    Some(e) => eprintln!("✖ {}: {}", file.input, e),
                }
            }

            let run = RunReport::new(files);
            if let Some(report_path) = report {
                run.save(&report_path)?;
                println!("✔ レポートを保存: {}", report_path.display());
            }

            let failed = run.failed_count();
            if failed > 0 {
                return Err(ValidatorError::BatchFailed { failed }.into());
            }

            println!("\n✅ 検証完了");
        }

        Commands::Check { source, target, map } => {
            let map = config.character_map(map.as_deref())?;
            let result = validate(&source, &target, &map);

            println!("修正後: {}", result.fixed_text);
            match result.annotation() {
                Some(annotation) => println!("理由:   {}", annotation),
                None => println!("理由:   (なし)"),
            }
        }

        Commands::Map { map, export } => {
            let map = config.character_map(map.as_deref())?;

            if let Some(path) = export {
                std::fs::write(&path, map.to_json()?)?;
                println!("✔ 文字マップを書き出し: {}", path.display());
            } else {
                println!("文字マップ ({}件、適用順):", map.len());
                for (half, full) in map.pairs() {
                    println!("  {}  →  {}", half, full);
                }
            }
        }

        Commands::Config { set_map, clear_map, set_suffix, show } => {
            let mut config = config;

            if let Some(path) = set_map {
                config.set_map_path(Some(path))?;
                println!("✔ 文字マップを設定しました");
            }

            if clear_map {
                config.set_map_path(None)?;
                println!("✔ 組み込みの文字マップに戻しました");
            }

            if let Some(suffix) = set_suffix {
                config.output_suffix = suffix;
                config.save()?;
                println!("✔ 出力接尾辞を設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!(
                    "  文字マップ: {}",
                    config
                        .resolve_map_path(None)
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込み".into())
                );
                println!("  出力接尾辞: {}", config.output_suffix);
                println!("  並列処理: {}", if config.parallel { "有効" } else { "無効" });
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 既存の出力を上書きしてよいか確認する
fn confirm_overwrite(path: &Path, assume_yes: bool) -> error::Result<bool> {
    if assume_yes || !path.exists() {
        return Ok(true);
    }

    if !std::io::stdin().is_terminal() {
        return Err(ValidatorError::OutputExists(path.display().to_string()));
    }

    Confirm::new()
        .with_prompt(format!("{} は既に存在します。上書きしますか?", path.display()))
        .default(false)
        .interact()
        .map_err(|e| ValidatorError::Io(std::io::Error::other(e.to_string())))
}

fn print_file_summary(file: &FileReport) {
    println!("✔ {}", file.output.as_deref().unwrap_or(&file.input));
    for sheet in &file.sheets {
        println!(
            "  - {}: {}行 / 修正 {}行 / 注記 {}行",
            sheet.name, sheet.rows, sheet.fixed_rows, sheet.annotated_rows
        );
    }
}
