//! サブコマンドの処理

use crate::config::Config;
use crate::cutout_image::{decode_data_url, image_dimensions, save_cutout};
use crate::error::{PremlError, Result};
use crate::report;
use dialoguer::Select;
use preml_common::{
    parse_ra_dec, Band, Cutout, GalaxyDetails, GalaxySummary, MagnitudeValues,
    SkyCoord, SkyServiceClient,
};
use std::path::Path;

/// `radius_deg` は度単位
pub async fn search(client: &SkyServiceClient, coords: &str, radius_deg: f64) -> Result<Vec<GalaxySummary>> {
    let center = parse_ra_dec(coords)?;
    let galaxies = client.query_galaxies(center, radius_deg).await?;
    println!("{}", report::galaxy_table(&galaxies));
    Ok(galaxies)
}

pub async fn details(client: &SkyServiceClient, object_id: &str) -> Result<GalaxyDetails> {
    let details = client
        .query_galaxy_details(object_id)
        .await?
        .ok_or_else(|| preml_common::Error::MissingData(format!("no details for {}", object_id)))?;
    println!("{}", report::details_report(&details));
    Ok(details)
}

/// 取得した画像のサイズを表示し、`save_dir` があれば保存
pub async fn cutouts(
    client: &SkyServiceClient,
    position: SkyCoord,
    bands: &[Band],
    save_dir: Option<&Path>,
    prefix: &str,
) -> Result<Vec<Cutout>> {
    let cutouts = client.fetch_cutouts(position, bands).await?;

    for cutout in &cutouts {
        let Some(data_url) = cutout.image_ref() else {
            println!("{}", report::cutout_line(cutout, None));
            continue;
        };

        // 1枚壊れていても残りは表示する
        let bytes = match decode_data_url(data_url) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("cutouts: Action=Decode failed, filter={}, error={}", cutout.filter, e);
                println!("✘ {:<6} {}", cutout.filter, e);
                continue;
            }
        };
        let dimensions = image_dimensions(&bytes)
            .map_err(|e| log::warn!("cutouts: Action=Unreadable image, filter={}, error={}", cutout.filter, e))
            .ok();
        println!("{}", report::cutout_line(cutout, dimensions));

        if let Some(dir) = save_dir {
            let path = save_cutout(dir, prefix, &cutout.filter, &bytes)?;
            println!("    saved: {}", path.display());
        }
    }

    Ok(cutouts)
}

pub async fn predict(client: &SkyServiceClient, magnitudes: &MagnitudeValues) -> Result<f64> {
    let z = client.predict(magnitudes).await?;
    println!("{}", report::redshift_line(z));
    Ok(z)
}

/// コマンドライン引数の等級（g r i z y の順）
pub fn magnitudes_from_args(values: &[f64]) -> Result<MagnitudeValues> {
    let array: [f64; 5] = values
        .try_into()
        .map_err(|_| PremlError::InvalidInput(format!("expected 5 magnitudes, got {}", values.len())))?;
    Ok(MagnitudeValues::from(array))
}

/// 検索 → 選択 → 詳細・画像・推定
pub async fn inspect(
    client: &SkyServiceClient,
    coords: &str,
    radius_deg: f64,
    save_dir: Option<&Path>,
) -> Result<()> {
    let galaxies = search(client, coords, radius_deg).await?;
    if galaxies.is_empty() {
        return Err(PremlError::NoGalaxiesFound(coords.to_string()));
    }

    let items: Vec<String> = galaxies.iter().map(report::galaxy_choice).collect();
    let selection = Select::new()
        .with_prompt("Select a galaxy")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| PremlError::Prompt(e.to_string()))?;
    let galaxy = &galaxies[selection];

    println!();
    let galaxy_details = details(client, &galaxy.id)
        .await?
        .with_position(galaxy.ra, galaxy.dec);

    println!();
    cutouts(
        client,
        SkyCoord::new(galaxy.ra, galaxy.dec),
        &Band::ALL,
        save_dir,
        &galaxy_details.object_id,
    )
    .await?;

    println!();
    predict(client, &MagnitudeValues::from(&galaxy_details)).await?;
    Ok(())
}

/// 設定の更新と表示（更新があれば保存）
pub fn configure(
    config: &mut Config,
    set_api_url: Option<&str>,
    set_inference_url: Option<&str>,
    show: bool,
) -> Result<bool> {
    let mut changed = false;

    if let Some(url) = set_api_url {
        config.set_api_url(url)?;
        println!("✔ API URL set to {}", config.api_base_url);
        changed = true;
    }

    if let Some(url) = set_inference_url {
        config.set_inference_url(url)?;
        println!("✔ Inference URL set to {}", config.inference_base_url);
        changed = true;
    }

    if show || !changed {
        println!("Settings:");
        println!("  API URL:        {}", config.api_base_url);
        println!("  Inference URL:  {}", config.inference_base_url);
        println!("  Search radius:  {}\"", config.search_radius_arcsec);
        println!("  Timeout:        {}s", config.timeout_seconds);
    }

    Ok(changed)
}
