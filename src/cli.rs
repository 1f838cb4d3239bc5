use clap::{Parser, Subcommand};
use preml_common::Band;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "preml")]
#[command(about = "PREML photometric redshift dashboard: command-line client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 座標の近傍にある天体を検索
    Search {
        /// 座標（例: "α=150.100000° δ=2.200000°"）
        coords: String,

        /// 検索半径（秒角、既定は設定値）
        #[arg(long)]
        radius_arcsec: Option<f64>,
    },

    /// 天体の詳細を表示
    Details {
        object_id: String,
    },

    /// 5バンドの切り出し画像を取得
    Cutouts {
        /// 赤経（度）
        #[arg(long, allow_negative_numbers = true)]
        ra: f64,

        /// 赤緯（度）
        #[arg(long, allow_negative_numbers = true)]
        dec: f64,

        /// バンド（カンマ区切り）
        #[arg(long, value_delimiter = ',', default_value = "g,r,i,z,y")]
        bands: Vec<Band>,

        /// 画像の保存先
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },

    /// 赤方偏移を推定
    Predict {
        /// g r i z y の等級
        #[arg(
            num_args = 5,
            value_names = ["G", "R", "I", "Z", "Y"],
            required_unless_present = "object_id",
            conflicts_with = "object_id",
            allow_negative_numbers = true
        )]
        magnitudes: Vec<f64>,

        /// 天体の詳細から等級を取得
        #[arg(long)]
        object_id: Option<String>,
    },

    /// 検索結果から天体を選んで詳細・画像・推定値をまとめて表示
    Inspect {
        coords: String,

        #[arg(long)]
        radius_arcsec: Option<f64>,

        /// 画像の保存先
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },

    /// 設定を管理
    Config {
        /// カタログ/ウィンドウAPIのURL
        #[arg(long)]
        set_api_url: Option<String>,

        /// 推論APIのURL
        #[arg(long)]
        set_inference_url: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
