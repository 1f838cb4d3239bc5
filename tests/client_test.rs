//! サービスクライアントの結合テスト
//!
//! axum で立てた偽バックエンドに対して型付きクライアントを検証

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use preml_common::display::{cutout_error_label, format_redshift};
use preml_common::{
    Band, Error, HttpClient, JumpToRequest, MagnitudeValues, RequestSequencer, SelectionEvent,
    SkyCoord, SkyServiceClient,
};
use serde_json::{json, Value};
use std::time::Duration;

/// ルーターを空きポートで起動してベースURLを返す
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn catalog_router() -> Router {
    Router::new()
        .route(
            "/api/window/new",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["title"], "My HSC Map");
                Json(json!({"id": "w1", "url": "/hscmap/index.html?window=w1"}))
            }),
        )
        .route(
            "/api/window/:id/jump_to",
            post(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                Json(json!({"window": id, "fov": body["fov"]}))
            }),
        )
        .route(
            "/api/window/:id/callback/:cbid",
            post(|Path((id, cbid)): Path<(String, String)>, Json(body): Json<Value>| async move {
                Json(json!({"window": id, "cbid": cbid, "args": body["args"]}))
            }),
        )
        .route(
            "/api/window/:id/selection",
            post(|Json(body): Json<Value>| async move { Json(json!({"received": body})) }),
        )
        .route(
            "/api/queryGalaxies",
            post(|Json(body): Json<Value>| async move {
                let radius = body["radius"].as_f64().unwrap();
                assert!((radius - 10.0 / 3600.0).abs() < 1e-12);
                Json(json!({
                    "galaxies": [
                        {"id": "300", "ra": 150.3, "dec": 2.3, "distance": 0.002},
                        {"id": "100", "ra": 150.1, "dec": 2.1, "distance": 0.001, "magnitude": 21.2},
                        {"id": "200", "ra": 150.2, "dec": 2.2, "distance": 0.0015}
                    ]
                }))
            }),
        )
        .route(
            "/api/queryGalaxyDetails",
            post(|Json(body): Json<Value>| async move {
                match body["object_id"].as_str() {
                    Some("42") => Json(json!({
                        "details": {
                            "object_id": "42",
                            "g_mag": 22.1, "r_mag": 21.4, "i_mag": 21.0, "z_mag": 20.8, "y_mag": 20.7,
                            "redshift": 0.53,
                            "morphology": "elliptical"
                        }
                    })),
                    _ => Json(json!({"details": {}, "warning": "No data rows found"})),
                }
            }),
        )
        .route(
            "/api/fetchCutout",
            post(|Json(body): Json<Value>| async move {
                let bands = body["bands"].as_array().unwrap().clone();
                let cutouts: Vec<Value> = bands
                    .iter()
                    .map(|band| {
                        if band == "HSC-Y" {
                            json!({"filter": band, "error": ""})
                        } else {
                            json!({"filter": band, "image": "data:image/jpeg;base64,AAAA"})
                        }
                    })
                    .collect();
                Json(json!({"cutouts": cutouts}))
            }),
        )
}

fn inference_router(prediction: Value) -> Router {
    Router::new().route(
        "/predict",
        post(move |Json(body): Json<Value>| {
            let prediction = prediction.clone();
            async move {
                assert_eq!(body["data"].as_array().unwrap().len(), 5);
                Json(json!({"prediction": prediction}))
            }
        }),
    )
}

async fn client_with_prediction(prediction: Value) -> SkyServiceClient {
    let api = spawn_backend(catalog_router()).await;
    let inference = spawn_backend(inference_router(prediction)).await;
    SkyServiceClient::new(&api, &inference)
}

// ============================================
// ウィンドウ管理
// ============================================

#[tokio::test]
async fn test_new_window_resolves_url() {
    let client = client_with_prediction(json!(0.5)).await;
    let session = client.new_window("My HSC Map").await.unwrap();

    assert_eq!(session.id, "w1");
    assert_eq!(
        session.url,
        format!("{}/hscmap/index.html?window=w1", client.api_base_url())
    );
}

#[tokio::test]
async fn test_window_paths_carry_ids() {
    let client = client_with_prediction(json!(0.5)).await;

    let ack = client.jump_to("w1", &JumpToRequest::default()).await.unwrap();
    assert_eq!(ack, json!({"window": "w1", "fov": 1.0}));

    let ack = client
        .forward_callback("w1", "cb-7", json!({"x": 1}))
        .await
        .unwrap();
    assert_eq!(ack["cbid"], "cb-7");
    assert_eq!(ack["args"], json!({"x": 1}));

    let selection = SelectionEvent::Point {
        catalog_id: json!(3),
        index: 0,
        ra: 150.0,
        dec: 1.0,
    };
    let ack = client.send_selection("w1", &selection).await.unwrap();
    assert_eq!(ack["received"]["type"], "point");
}

// ============================================
// カタログ検索
// ============================================

#[tokio::test]
async fn test_query_galaxies_sorted_by_id() {
    let client = client_with_prediction(json!(0.5)).await;
    let galaxies = client
        .query_galaxies(SkyCoord::new(150.2, 2.2), 10.0 / 3600.0)
        .await
        .unwrap();

    let ids: Vec<&str> = galaxies.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["100", "200", "300"]);
    assert_eq!(galaxies[0].magnitude, Some(21.2));
}

#[tokio::test]
async fn test_galaxy_details_found_and_missing() {
    let client = client_with_prediction(json!(0.5)).await;

    let details = client.query_galaxy_details("42").await.unwrap().unwrap();
    assert_eq!(details.redshift, Some(0.53));
    assert_eq!(MagnitudeValues::from(&details).to_array(), [22.1, 21.4, 21.0, 20.8, 20.7]);

    assert_eq!(client.query_galaxy_details("nope").await.unwrap(), None);
}

#[tokio::test]
async fn test_cutouts_with_one_failed_band() {
    let client = client_with_prediction(json!(0.5)).await;
    let cutouts = client
        .fetch_cutouts(SkyCoord::new(150.1, 2.1), &Band::ALL)
        .await
        .unwrap();

    assert_eq!(cutouts.len(), 5);
    assert_eq!(cutouts.iter().filter(|c| c.image_ref().is_some()).count(), 4);
    let failed = cutouts.iter().find(|c| c.filter == "HSC-Y").unwrap();
    assert_eq!(cutout_error_label(failed), Some("Sensor_Failure"));
}

// ============================================
// 推論
// ============================================

#[tokio::test]
async fn test_predict_list_shape() {
    let client = client_with_prediction(json!([0.4123])).await;
    let z = client.predict(&MagnitudeValues::default()).await.unwrap();
    assert_eq!(format_redshift(z), "0.4123");
}

#[tokio::test]
async fn test_predict_scalar_shape() {
    let client = client_with_prediction(json!(0.87)).await;
    let z = client.predict(&MagnitudeValues::default()).await.unwrap();
    assert_eq!(format_redshift(z), "0.8700");
}

#[tokio::test]
async fn test_predict_nested_shape() {
    let client = client_with_prediction(json!([[1.25]])).await;
    let z = client.predict(&MagnitudeValues::default()).await.unwrap();
    assert_eq!(z, 1.25);
}

// ============================================
// エラー
// ============================================

#[tokio::test]
async fn test_backend_error_payload() {
    let router = Router::new().route(
        "/api/queryGalaxies",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Catalog file not found"})),
            )
        }),
    );
    let api = spawn_backend(router).await;
    let client = SkyServiceClient::new(&api, &api);

    let err = client
        .query_galaxies(SkyCoord::new(1.0, 1.0), 0.001)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Backend { status: 500, .. }));
    assert_eq!(err.user_message("Failed to query galaxies"), "Catalog file not found");
}

#[tokio::test]
async fn test_connection_refused() {
    // 起動直後に閉じたポート
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base = format!("http://{}", addr);
    let client = SkyServiceClient::new(&base, &base);
    let err = client.predict(&MagnitudeValues::default()).await.unwrap_err();
    assert!(matches!(err, Error::Connection(_)));
    assert_eq!(err.user_message("Failed to calculate redshift"), "Failed to calculate redshift");
}

#[tokio::test]
async fn test_request_timeout() {
    let router = Router::new().route(
        "/predict",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"prediction": 0.1}))
        }),
    );
    let base = spawn_backend(router).await;
    let inference = HttpClient::with_timeout(&base, Duration::from_millis(200)).unwrap();
    let client = SkyServiceClient::from_clients(HttpClient::new(&base), inference);

    let err = client.predict(&MagnitudeValues::default()).await.unwrap_err();
    assert!(matches!(err, Error::Timeout));
}

// ============================================
// 応答順序
// ============================================

/// 先に出した要求の応答が後から届いても、新しい選択を上書きしない
#[tokio::test]
async fn test_stale_details_are_discarded() {
    let router = Router::new().route(
        "/api/queryGalaxyDetails",
        post(|Json(body): Json<Value>| async move {
            let id = body["object_id"].as_str().unwrap_or_default().to_string();
            if id == "slow" {
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
            Json(json!({"details": {"object_id": id}}))
        }),
    );
    let api = spawn_backend(router).await;
    let client = SkyServiceClient::new(&api, &api);
    let sequencer = RequestSequencer::new();

    let slow_ticket = sequencer.issue();
    let fast_ticket = sequencer.issue();

    let (slow, fast) = tokio::join!(
        async {
            let result = client.query_galaxy_details("slow").await;
            sequencer.accept(slow_ticket, result)
        },
        async {
            let result = client.query_galaxy_details("fast").await;
            sequencer.accept(fast_ticket, result)
        }
    );

    assert!(slow.is_none());
    let applied = fast.unwrap().unwrap().unwrap();
    assert_eq!(applied.object_id, "fast");
}
