use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pasiulymas")]
#[command(about = "複数のExcelから行を選んで提案書(pasiūlymas)を作るツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話式で行を選んで出力
    Session {
        /// Excelファイルまたはフォルダ（フォルダは直下のブックを読み込む）
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 見出しテンプレートJSON
        #[arg(long)]
        templates: Option<PathBuf>,
    },

    /// 行番号を指定して一括出力
    Export {
        /// Excelファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 追加する行（FILE[#SHEET]=0,2,5-7）。複数指定可、指定順に追加
        #[arg(short, long = "pick", required = true)]
        picks: Vec<String>,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 見出しテンプレートJSON
        #[arg(long)]
        templates: Option<PathBuf>,
    },

    /// ブックのシートと行数を表示
    Sheets {
        /// Excelファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// 見出しテンプレートを表示
    Templates {
        /// 見出しテンプレートJSON（省略時は設定または組み込み）
        #[arg(long)]
        templates: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 出力ディレクトリを設定
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// タイムゾーンを設定（例: Europe/Vilnius）
        #[arg(long)]
        set_timezone: Option<String>,

        /// 見出しテンプレートJSONを設定
        #[arg(long)]
        set_templates: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
