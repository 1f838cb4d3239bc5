//! 表示用フォーマット
//!
//! Webパネルと CLI の出力で同じ表記を使う。

use crate::types::{Cutout, CutoutOutcome};

/// 空のエラー文字列のときの代替表示
pub const SENSOR_FAILURE: &str = "Sensor_Failure";

pub const NO_GALAXIES_FOUND: &str = "No galaxies found.";

/// 赤方偏移（小数4桁）
pub fn format_redshift(z: f64) -> String {
    format!("{:.4}", z)
}

/// 欠損しうる値を固定小数で、欠損なら `missing`
pub fn format_optional(value: Option<f64>, decimals: usize, missing: &str) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => missing.to_string(),
    }
}

/// 角度（度記号つき）
pub fn format_degrees(value: f64, decimals: usize) -> String {
    format!("{:.*}°", decimals, value)
}

/// 検索結果の見出し
pub fn found_label(count: usize) -> String {
    format!(
        "Found {} object{} nearby",
        count,
        if count == 1 { "" } else { "s" }
    )
}

/// 検索結果が0件のときの案内（1件以上なら `None`）
pub fn empty_result_label(count: usize) -> Option<&'static str> {
    (count == 0).then_some(NO_GALAXIES_FOUND)
}

/// 切り出し画像のエラー表示（空なら Sensor_Failure）
pub fn cutout_error_label(cutout: &Cutout) -> Option<&str> {
    match &cutout.outcome {
        CutoutOutcome::Image(_) => None,
        CutoutOutcome::Error(e) if e.trim().is_empty() => Some(SENSOR_FAILURE),
        CutoutOutcome::Error(e) => Some(e),
    }
}

/// 数値入力欄の値（解釈できなければ0）
pub fn parse_magnitude_input(text: &str) -> f64 {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_redshift() {
        assert_eq!(format_redshift(0.4123), "0.4123");
        assert_eq!(format_redshift(0.87), "0.8700");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(75.1945021), 6, "N/A"), "75.194502");
        assert_eq!(format_optional(None, 4, "N/A"), "N/A");
    }

    #[test]
    fn test_format_degrees() {
        assert_eq!(format_degrees(150.123456, 4), "150.1235°");
    }

    #[test]
    fn test_found_label_plural() {
        assert_eq!(found_label(0), "Found 0 objects nearby");
        assert_eq!(found_label(1), "Found 1 object nearby");
        assert_eq!(found_label(5), "Found 5 objects nearby");
    }

    #[test]
    fn test_zero_results_still_get_header_and_notice() {
        assert_eq!(found_label(0), "Found 0 objects nearby");
        assert_eq!(empty_result_label(0), Some("No galaxies found."));
        assert_eq!(empty_result_label(3), None);
    }

    #[test]
    fn test_cutout_error_label() {
        assert_eq!(cutout_error_label(&Cutout::image("HSC-G", "data:x")), None);
        assert_eq!(cutout_error_label(&Cutout::failed("HSC-G", "")), Some(SENSOR_FAILURE));
        assert_eq!(cutout_error_label(&Cutout::failed("HSC-G", "timeout")), Some("timeout"));
    }

    #[test]
    fn test_parse_magnitude_input() {
        assert_eq!(parse_magnitude_input("21.5"), 21.5);
        assert_eq!(parse_magnitude_input(""), 0.0);
        assert_eq!(parse_magnitude_input("abc"), 0.0);
        assert_eq!(parse_magnitude_input("NaN"), 0.0);
    }
}
