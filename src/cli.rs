use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cotacao")]
#[command(about = "価格表キーワード見積検索ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// データディレクトリ（価格表・お気に入りの保存先）
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 価格表を取り込み（CSV / XLSX / JSON、既存の価格表は置き換え）
    Import {
        /// 価格表ファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// キーワードで検索（キーワードごとに結果をまとめる）
    Search {
        /// 検索キーワード（品名の一部）
        keywords: Vec<String>,

        /// キーワードファイル（1行1キーワード）
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// JSONで出力
        #[arg(long)]
        json: bool,

        /// 結果をExcelに出力
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// キーワードごとの表示件数
        #[arg(short, long)]
        limit: Option<usize>,

        /// キーワード数の上限チェックを無効化
        #[arg(long)]
        no_max: bool,
    },

    /// 単品見積（5%列、無ければLimite Tabela）
    Quote {
        /// 品名
        #[arg(required = true)]
        item: String,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 価格表の内容を表示
    Items {
        /// 表示件数
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// 価格表の件数を表示
    Count,

    /// 価格表の読み込み状況を表示
    Status {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// お気に入り管理
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },

    /// 設定を表示/編集
    Config {
        /// キーワード数の上限を設定（0 = 無制限）
        #[arg(long)]
        set_max_keywords: Option<usize>,

        /// データディレクトリを設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum FavoriteAction {
    /// お気に入りに追加（品名は完全一致）
    Add { name: String },
    /// お気に入りから削除
    Remove { name: String },
    /// お気に入り一覧
    List,
}
