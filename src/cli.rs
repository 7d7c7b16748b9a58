use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "punct-validator")]
#[command(about = "翻訳Excelの句読点（半角/全角）を検証・注記するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ワークブック（またはフォルダ内の全ワークブック）を検証して注記付きのコピーを出力
    Validate {
        /// 入力ワークブック、またはワークブックを含むフォルダ
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル（フォルダ入力時は出力フォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 文字マップJSONファイル
        #[arg(short, long)]
        map: Option<PathBuf>,

        /// 行を並列処理する
        #[arg(long)]
        parallel: bool,

        /// 実行レポート（JSON）の出力先
        #[arg(long)]
        report: Option<PathBuf>,

        /// 既存の出力を確認なしで上書き
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// 原文と訳文の1組を検証
    Check {
        /// 原文
        #[arg(short, long, default_value = "")]
        source: String,

        /// 訳文
        #[arg(short, long, default_value = "")]
        target: String,

        /// 文字マップJSONファイル
        #[arg(short, long)]
        map: Option<PathBuf>,
    },

    /// 使用する文字マップを表示/書き出し
    Map {
        /// 文字マップJSONファイル
        #[arg(short, long)]
        map: Option<PathBuf>,

        /// JSONとして書き出す
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 既定の文字マップファイルを設定
        #[arg(long, conflicts_with = "clear_map")]
        set_map: Option<PathBuf>,

        /// 既定の文字マップ設定を解除（組み込みマップに戻す）
        #[arg(long)]
        clear_map: bool,

        /// 出力ファイル名の接尾辞を設定
        #[arg(long)]
        set_suffix: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
