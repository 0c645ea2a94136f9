use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "variant-grid")]
#[command(about = "商品バリアント表エディタ", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（デフォルト: ~/.config/variant-grid/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 初期グリッドを表示
    Show {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// カタログを検索（大文字小文字を区別しない部分一致）
    Catalog {
        /// 検索語（省略時は全件）
        #[arg(default_value = "")]
        query: String,
    },

    /// アクションのJSON配列を順に適用
    Replay {
        /// アクションスクリプト（JSON）
        #[arg(required = true)]
        script: PathBuf,

        /// ビジー待ちを省略
        #[arg(long)]
        no_delay: bool,

        /// 最終グリッドをJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 対話式で編集（保存はしない）
    Edit,

    /// 設定の表示・初期化
    Config {
        /// 現在の設定を表示
        #[arg(long)]
        show: bool,

        /// デフォルト設定ファイルを書き出す
        #[arg(long)]
        init: bool,
    },
}
