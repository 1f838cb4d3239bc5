//! データセットの説明ページ

use leptos::prelude::*;
use preml_common::Band;

#[component]
pub fn Dataset() -> impl IntoView {
    view! {
        <article class="page dataset">
            <h1>"Dataset"</h1>
            <p>
                "Training and evaluation use the Hyper Suprime-Cam Subaru Strategic Program public data release, "
                "cross-matched with spectroscopic catalogues for ground truth."
            </p>
            <h2>"Filters"</h2>
            <ul class="band-list">
                {Band::ALL
                    .into_iter()
                    .map(|band| view! { <li class="mono">{band.filter_name()}</li> })
                    .collect_view()}
            </ul>
            <h2>"Catalogue fields"</h2>
            <p>
                "Each object carries an identifier, sky position, per-band magnitudes, a spectroscopic redshift "
                "where available and a morphology label."
            </p>
        </article>
    }
}
