//! エラーケーステスト

use preml::commands::magnitudes_from_args;
use preml::cutout_image::decode_data_url;
use preml::error::PremlError;
use preml_common::{parse_ra_dec, Error, COORDINATE_HINT};

/// 座標の書式違反は共通エラーとして伝わる
#[test]
fn test_invalid_coordinates_convert() {
    let err: PremlError = parse_ra_dec("garbage").unwrap_err().into();
    assert!(matches!(err, PremlError::Service(Error::InvalidCoordinates(_))));
}

#[test]
fn test_coordinate_hint_mentions_format() {
    assert!(COORDINATE_HINT.contains("α=75.194502° δ=-33.193044°"));
}

#[test]
fn test_bad_cutout_payload() {
    assert!(matches!(decode_data_url("data:image/jpeg;base64,@@@"), Err(PremlError::Decode(_))));
}

#[test]
fn test_wrong_number_of_magnitudes() {
    assert!(matches!(magnitudes_from_args(&[20.0; 4]), Err(PremlError::InvalidInput(_))));
}

/// PremlErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        PremlError::Config("missing home".to_string()),
        PremlError::Decode("bad base64".to_string()),
        PremlError::InvalidInput("expected 5 magnitudes".to_string()),
        PremlError::NoGalaxiesFound("α=1.0° δ=1.0°".to_string()),
        PremlError::Prompt("not a terminal".to_string()),
        PremlError::Service(Error::Timeout),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "Error display should not be empty");
    }
}

/// バックエンドのメッセージはそのまま表示される
#[test]
fn test_service_error_is_transparent() {
    let err = PremlError::Service(Error::Backend {
        status: 404,
        message: "Window not found".into(),
    });
    assert_eq!(err.to_string(), "Backend error (status 404): Window not found");
}
