use leptos::prelude::*;

#[component]
pub fn Publications() -> impl IntoView {
    view! {
        <article class="page publications">
            <h1>"Publications"</h1>
            <ul class="publication-list">
                <li>
                    <p class="publication-title">"The Hyper Suprime-Cam SSP Survey: Overview and survey design"</p>
                    <p class="text-muted">"Publications of the Astronomical Society of Japan, 2018"</p>
                </li>
                <li>
                    <p class="publication-title">"Photometric redshifts for the Hyper Suprime-Cam Subaru Strategic Program"</p>
                    <p class="text-muted">"Publications of the Astronomical Society of Japan, 2018"</p>
                </li>
            </ul>
        </article>
    }
}
