//! 切り出し画像（data URL）のデコードと保存

use crate::error::{PremlError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageReader;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// `data:image/jpeg;base64,...` からバイト列を取り出す
///
/// `data:` で始まらなければ全体をBase64として扱う。
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let payload = match data_url.strip_prefix("data:") {
        Some(rest) => {
            let (header, body) = rest
                .split_once(',')
                .ok_or_else(|| PremlError::Decode("data URL without payload".into()))?;
            if !header.ends_with(";base64") {
                return Err(PremlError::Decode(format!("unsupported encoding: {}", header)));
            }
            body
        }
        None => data_url,
    };

    STANDARD
        .decode(payload.trim())
        .map_err(|e| PremlError::Decode(e.to_string()))
}

/// 画素サイズ（幅, 高さ）
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    Ok(reader.into_dimensions()?)
}

/// ファイル名の一部に使えない文字（パス区切りなど）を `_` に置き換える
fn file_name_part(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+') { c } else { '_' })
        .collect()
}

/// `{prefix}_{filter}.{拡張子}` で `dir` 直下に保存
pub fn save_cutout(dir: &Path, prefix: &str, filter: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let extension = image::guess_format(bytes)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("jpg");
    let file_name = format!("{}_{}.{}", file_name_part(prefix), file_name_part(filter), extension);
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        RgbImage::new(width, height)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_decode_data_url_and_dimensions() {
        let data_url = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(4, 3)));
        let bytes = decode_data_url(&data_url).unwrap();
        assert_eq!(image_dimensions(&bytes).unwrap(), (4, 3));
    }

    #[test]
    fn test_decode_raw_base64() {
        let bytes = decode_data_url(&STANDARD.encode(b"abc")).unwrap();
        assert_eq!(bytes, b"abc");
    }

    #[test]
    fn test_decode_rejects_non_base64_data_url() {
        assert!(matches!(
            decode_data_url("data:text/plain,hello"),
            Err(PremlError::Decode(_))
        ));
        assert!(matches!(decode_data_url("data:image/png;base64"), Err(PremlError::Decode(_))));
    }

    #[test]
    fn test_save_cutout_uses_detected_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_cutout(dir.path(), "42", "HSC-G", &png_bytes(2, 2)).unwrap();
        assert_eq!(path.file_name().unwrap(), "42_HSC-G.png");
        assert!(path.exists());
    }

    #[test]
    fn test_save_cutout_stays_inside_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_cutout(dir.path(), "../42", "../../HSC-G", &png_bytes(2, 2)).unwrap();
        assert_eq!(path.parent().unwrap(), dir.path());
        assert_eq!(path.file_name().unwrap(), ".._42_.._.._HSC-G.png");
        assert!(!dir.path().parent().unwrap().join("42_HSC-G.png").exists());
    }

    #[test]
    fn test_save_cutout_replaces_backslash() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_cutout(dir.path(), "42", "a\\b", &png_bytes(2, 2)).unwrap();
        assert_eq!(path.file_name().unwrap(), "42_a_b.png");
    }
}
