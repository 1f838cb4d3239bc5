//! 選択天体の詳細と5バンドの切り出し画像

use leptos::prelude::*;
use preml_common::display::{cutout_error_label, format_optional};
use preml_common::{Cutout, GalaxyDetails};

#[component]
pub fn GalaxyDetailsPanel(
    galaxy: ReadSignal<Option<GalaxyDetails>>,
    cutouts: ReadSignal<Vec<Cutout>>,
    is_loading: ReadSignal<bool>,
    is_cutouts_loading: ReadSignal<bool>,
) -> impl IntoView {
    view! {
        <div class="panel galaxy-details">
            <h2 class="panel-title">"Galaxy Details"</h2>
            {move || {
                if is_loading.get() {
                    return view! { <div class="panel-loading">"Loading details..."</div> }.into_any();
                }
                match galaxy.get() {
                    None => view! {
                        <div class="empty-state">
                            <p class="empty-title">"No Galaxy Selected"</p>
                            <p class="text-muted">"Search the sky map and pick an object to inspect it."</p>
                        </div>
                    }
                    .into_any(),
                    Some(details) => view! {
                        <DetailsTable details=details />
                        <CutoutGrid cutouts=cutouts is_loading=is_cutouts_loading />
                    }
                    .into_any(),
                }
            }}
        </div>
    }
}

#[component]
fn DetailsTable(details: GalaxyDetails) -> impl IntoView {
    let redshift = format_optional(details.redshift, 4, "N/A");
    let morphology = details
        .morphology
        .clone()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    view! {
        <dl class="details-table">
            <dt>"Object ID"</dt>
            <dd class="mono">{details.object_id.clone()}</dd>
            <dt>"RA"</dt>
            <dd class="mono">{format_optional(details.ra, 6, "N/A")}</dd>
            <dt>"Dec"</dt>
            <dd class="mono">{format_optional(details.dec, 6, "N/A")}</dd>
            <dt>"Redshift (z)"</dt>
            <dd class="mono">{redshift}</dd>
            <dt>"Morphology"</dt>
            <dd>{morphology}</dd>
        </dl>
    }
}

#[component]
fn CutoutGrid(cutouts: ReadSignal<Vec<Cutout>>, is_loading: ReadSignal<bool>) -> impl IntoView {
    view! {
        <div class="cutouts">
            <h3>"HSC Cutouts"</h3>
            <Show
                when=move || !is_loading.get()
                fallback=|| view! { <div class="panel-loading">"Loading cutouts..."</div> }
            >
                <div class="cutout-grid">
                    {move || {
                        cutouts
                            .get()
                            .into_iter()
                            .map(|cutout| view! { <CutoutTile cutout=cutout /> })
                            .collect_view()
                    }}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn CutoutTile(cutout: Cutout) -> impl IntoView {
    let filter = cutout.filter.clone();
    let body = match cutout.image_ref() {
        Some(src) => view! { <img src=src.to_string() alt=filter.clone() /> }.into_any(),
        None => {
            let label = cutout_error_label(&cutout).unwrap_or_default().to_string();
            view! { <div class="cutout-error">{label}</div> }.into_any()
        }
    };

    view! {
        <figure class="cutout-tile">
            {body}
            <figcaption>{filter}</figcaption>
        </figure>
    }
}
