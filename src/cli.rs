use clap::{Args, Parser, Subcommand, ValueEnum};
use passport_common::FormInput;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "passport-wall")]
#[command(about = "デジタル製品パスポート作成・ウォール管理ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// パスポート保存ファイル（設定より優先）
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 入力からパスポートのプレビューを表示
    Preview {
        #[command(flatten)]
        fields: PassportArgs,
    },

    /// パスポートを保存してウォールに追加
    Save {
        #[command(flatten)]
        fields: PassportArgs,

        /// フォーム値の代わりにランダムなデモデータを使う
        #[arg(long)]
        random: bool,
    },

    /// ランダムなデモデータでプレビュー
    Random {
        /// そのまま保存する
        #[arg(long)]
        save: bool,
    },

    /// ウォール（保存済みパスポート）を一覧表示
    List {
        /// 出力形式 (text/json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// パスポートの詳細とQRペイロードを表示
    Show {
        /// パスポートID
        #[arg(required = true)]
        id: String,

        /// 出力形式 (text/json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// パスポートをウォールから削除
    Delete {
        /// パスポートID
        #[arg(required = true)]
        id: String,

        /// 確認せずに削除
        #[arg(short, long)]
        yes: bool,
    },

    /// ウォールを静的HTMLとして出力
    Export {
        /// 出力HTMLファイル
        #[arg(short, long, default_value = "wall.html")]
        output: PathBuf,

        /// 詳細パネルを展開した状態で出力（QRペイロード付き）
        #[arg(long)]
        expanded: bool,
    },

    /// 設定の表示・変更
    Config {
        /// 保存ファイルのパスを設定
        #[arg(long)]
        set_store: Option<PathBuf>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// フォームの7項目
#[derive(Args, Debug, Clone, Default)]
pub struct PassportArgs {
    /// 製品名
    #[arg(short = 'n', long, default_value = "")]
    pub product_name: String,

    /// カテゴリ (battery/textile/furniture/electronics/metal/toy/other)
    #[arg(short, long, default_value = "")]
    pub category: String,

    /// 素材 (steel/aluminium/plastic/textile/lithium/mixed など)
    #[arg(short, long, default_value = "")]
    pub material: String,

    /// 産地
    #[arg(short, long, default_value = "")]
    pub origin: String,

    /// CO2スコア (0-100)
    #[arg(long, default_value = "50")]
    pub co2: String,

    /// リサイクル率 (0-100)
    #[arg(short, long, default_value = "50")]
    pub recyclability: String,

    /// 豆知識（任意）
    #[arg(short, long, default_value = "")]
    pub fun_fact: String,
}

impl PassportArgs {
    pub fn to_form_input(&self) -> FormInput {
        FormInput {
            product_name: self.product_name.clone(),
            category: self.category.clone(),
            material: self.material.clone(),
            origin: self.origin.clone(),
            co2: self.co2.clone(),
            recyclability: self.recyclability.clone(),
            fun_fact: self.fun_fact.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preview_fields() {
        let cli = Cli::try_parse_from([
            "passport-wall",
            "preview",
            "--product-name",
            "Genk Battery Pack",
            "--category",
            "battery",
            "--material",
            "lithium",
            "--origin",
            "Genk, Belgium",
            "--co2",
            "40",
            "--recyclability",
            "72",
        ])
        .expect("引数解析失敗");

        let Commands::Preview { fields } = cli.command else {
            panic!("previewではない");
        };
        let input = fields.to_form_input();
        assert_eq!(input.product_name, "Genk Battery Pack");
        assert_eq!(input.co2, "40");
        assert_eq!(input.fun_fact, "");
    }

    #[test]
    fn test_global_store_flag() {
        let cli = Cli::try_parse_from(["passport-wall", "list", "--store", "/tmp/p.json"])
            .expect("引数解析失敗");
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/p.json")));
        assert!(matches!(cli.command, Commands::List { format: OutputFormat::Text }));
    }

    #[test]
    fn test_delete_requires_id() {
        assert!(Cli::try_parse_from(["passport-wall", "delete"]).is_err());
    }
}
