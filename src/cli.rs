use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "property-map")]
#[command(about = "自治体別 物件マップビューア", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 物件データJSON（省略時は同梱データ）
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 自治体の一覧（フィルタ選択肢）を表示
    Councils,

    /// 物件（地図ピン）の一覧を表示
    List {
        /// 自治体で絞り込み（省略時は全件）
        #[arg(short, long, default_value = "")]
        council: String,

        /// 出力形式 (table/json)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// 物件の詳細パネルを表示
    Show {
        /// 物件ID
        #[arg(required = true)]
        property_id: String,
    },

    /// 対話式でフィルタ・ピン選択・パネル操作を行う
    Browse,

    /// 設定を表示/編集
    Config {
        /// 地図APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "t" => Ok(OutputFormat::Table),
            "json" | "j" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
