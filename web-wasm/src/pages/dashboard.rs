//! ダッシュボード
//!
//! 選択中の天体・切り出し画像・読み込み状態はここで保持し、
//! 子パネルへはシグナルとコールバックで渡す。

use crate::components::{
    galaxy_details::GalaxyDetailsPanel, redshift_calculator::RedshiftCalculator, sky_map::SkyMap,
};
use crate::config::AppConfig;
use leptos::prelude::*;
use leptos::task::spawn_local;
use preml_common::{Band, Cutout, GalaxyDetails, RequestSequencer, SkyCoord, SkyServiceClient};

const CUTOUT_FAILURE: &str = "Failed to load cutout";

#[component]
pub fn Dashboard(client: SkyServiceClient, config: AppConfig) -> impl IntoView {
    let (selected, set_selected) = signal(None::<GalaxyDetails>);
    let (details_loading, set_details_loading) = signal(false);
    let (cutouts, set_cutouts) = signal(Vec::<Cutout>::new());
    let (cutouts_loading, set_cutouts_loading) = signal(false);
    let cutout_seq = RequestSequencer::new();

    let on_galaxy_select = {
        let client = client.clone();
        move |details: Option<GalaxyDetails>, loading: bool| {
            let position = details.as_ref().and_then(GalaxyDetails::position);
            set_selected.set(details);
            set_details_loading.set(loading);
            set_cutouts.set(Vec::new());
            let ticket = cutout_seq.issue();

            let Some((ra, dec)) = position.filter(|_| !loading) else {
                set_cutouts_loading.set(false);
                return;
            };

            set_cutouts_loading.set(true);
            let client = client.clone();
            let cutout_seq = cutout_seq.clone();
            spawn_local(async move {
                let cutouts = match client.fetch_cutouts(SkyCoord::new(ra, dec), &Band::ALL).await {
                    Ok(cutouts) => cutouts,
                    Err(e) => {
                        log::error!("Dashboard: Action=Fetch cutouts failed, error={}", e);
                        Cutout::failed_all(&Band::ALL, CUTOUT_FAILURE)
                    }
                };
                if let Some(cutouts) = cutout_seq.accept(ticket, cutouts) {
                    set_cutouts.set(cutouts);
                    set_cutouts_loading.set(false);
                }
            });
        }
    };

    view! {
        <div class="dashboard">
            <section class="dashboard-intro">
                <h1>"Photometric Redshift Explorer"</h1>
                <p class="text-muted">
                    "Search the HSC sky map, inspect nearby galaxies and estimate their redshift from five-band photometry."
                </p>
            </section>

            <div class="dashboard-grid">
                <SkyMap
                    client=client.clone()
                    window_title=config.window_title.clone()
                    fallback_url=config.fallback_map_url.clone()
                    search_radius_deg=config.search_radius_deg()
                    on_galaxy_select=on_galaxy_select
                />
                <div class="dashboard-side">
                    <GalaxyDetailsPanel
                        galaxy=selected
                        cutouts=cutouts
                        is_loading=details_loading
                        is_cutouts_loading=cutouts_loading
                    />
                    <RedshiftCalculator
                        client=client
                        galaxy=selected
                        details_loading=details_loading
                    />
                </div>
            </div>
        </div>
    }
}
