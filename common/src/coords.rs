//! 天球座標の入力パーサー
//!
//! スカイマップが表示する `α=75.194502° δ=-33.193044°` 形式の文字列から
//! 赤経・赤緯（度）を取り出す。

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 近傍検索の既定半径（秒角）
pub const DEFAULT_SEARCH_RADIUS_ARCSEC: f64 = 10.0;

/// 入力エラー時にパネルへ出す案内文
pub const COORDINATE_HINT: &str =
    "Please enter valid RA and Dec (e.g., α=75.194502° δ=-33.193044°)";

/// 赤経・赤緯（度）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyCoord {
    pub ra: f64,
    pub dec: f64,
}

impl SkyCoord {
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }
}

/// 秒角を度に変換
pub fn arcsec_to_deg(arcsec: f64) -> f64 {
    arcsec / 3600.0
}

/// 座標文字列をパース
///
/// 数値は「符号（任意）・整数部・小数点・小数部」の形のみ受け付ける。
/// 赤経は0〜360度、赤緯は-90〜90度の範囲外ならエラー。
///
/// # Examples
/// ```
/// use preml_common::parse_ra_dec;
///
/// let coord = parse_ra_dec("α=75.194502° δ=-33.193044°").unwrap();
/// assert_eq!(coord.ra, 75.194502);
/// assert_eq!(coord.dec, -33.193044);
/// assert!(parse_ra_dec("garbage").is_err());
/// ```
pub fn parse_ra_dec(input: &str) -> Result<SkyCoord> {
    lazy_static::lazy_static! {
        static ref RA_RE: Regex = Regex::new(r"α=(-?\d+\.\d+)°").unwrap();
        static ref DEC_RE: Regex = Regex::new(r"δ=(-?\d+\.\d+)°").unwrap();
    }

    log::debug!("parse_ra_dec: Action=Parsing input, input={:?}", input);

    let ra_text = RA_RE
        .captures(input)
        .and_then(|c| c.get(1))
        .ok_or_else(|| Error::InvalidCoordinates(format!("right ascension not found in {:?}", input)))?;
    let dec_text = DEC_RE
        .captures(input)
        .and_then(|c| c.get(1))
        .ok_or_else(|| Error::InvalidCoordinates(format!("declination not found in {:?}", input)))?;

    let ra: f64 = ra_text
        .as_str()
        .parse()
        .map_err(|_| Error::InvalidCoordinates(format!("not a number: {}", ra_text.as_str())))?;
    let dec: f64 = dec_text
        .as_str()
        .parse()
        .map_err(|_| Error::InvalidCoordinates(format!("not a number: {}", dec_text.as_str())))?;

    if !(0.0..=360.0).contains(&ra) {
        return Err(Error::InvalidCoordinates(format!("RA out of range: {}", ra)));
    }
    if !(-90.0..=90.0).contains(&dec) {
        return Err(Error::InvalidCoordinates(format!("Dec out of range: {}", dec)));
    }

    log::debug!("parse_ra_dec: Action=Parsed RA={:.6}, Dec={:.6}", ra, dec);
    Ok(SkyCoord { ra, dec })
}
