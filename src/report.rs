//! 端末向けの表示

use preml_common::display::{
    cutout_error_label, empty_result_label, format_degrees, format_optional, format_redshift, found_label,
};
use preml_common::{Band, Cutout, GalaxyDetails, GalaxySummary};

/// 検索結果一覧
pub fn galaxy_table(galaxies: &[GalaxySummary]) -> String {
    let mut lines = vec![found_label(galaxies.len())];
    lines.extend(empty_result_label(galaxies.len()).map(|notice| format!("  {}", notice)));
    for (index, galaxy) in galaxies.iter().enumerate() {
        lines.push(format!(
            "  [{}] {:<20} RA: {:>12}  Dec: {:>12}  mag: {}",
            index + 1,
            galaxy.id,
            format_degrees(galaxy.ra, 4),
            format_degrees(galaxy.dec, 4),
            format_optional(galaxy.magnitude, 2, "-"),
        ));
    }
    lines.join("\n")
}

/// 選択肢の表示文字列
pub fn galaxy_choice(galaxy: &GalaxySummary) -> String {
    format!(
        "{}  (RA {}, Dec {})",
        galaxy.id,
        format_degrees(galaxy.ra, 4),
        format_degrees(galaxy.dec, 4)
    )
}

pub fn details_report(details: &GalaxyDetails) -> String {
    let mut lines = vec![
        format!("Object ID:  {}", details.object_id),
        format!("RA:         {}", format_optional(details.ra, 6, "N/A")),
        format!("Dec:        {}", format_optional(details.dec, 6, "N/A")),
        format!("Redshift:   {}", format_optional(details.redshift, 4, "N/A")),
        format!(
            "Morphology: {}",
            details
                .morphology
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or("UNKNOWN")
        ),
    ];
    for band in Band::ALL {
        lines.push(format!(
            "  {}-mag:    {}",
            band,
            format_optional(details.magnitude(band), 3, "N/A")
        ));
    }
    lines.join("\n")
}

/// 画像が取れたバンドはサイズ、取れなかったバンドはエラーを表示
pub fn cutout_line(cutout: &Cutout, dimensions: Option<(u32, u32)>) -> String {
    match (cutout_error_label(cutout), dimensions) {
        (Some(error), _) => format!("✘ {:<6} {}", cutout.filter, error),
        (None, Some((width, height))) => format!("✔ {:<6} {}x{} px", cutout.filter, width, height),
        (None, None) => format!("✔ {:<6} image", cutout.filter),
    }
}

pub fn redshift_line(z: f64) -> String {
    format!("Estimated redshift z = {}", format_redshift(z))
}
