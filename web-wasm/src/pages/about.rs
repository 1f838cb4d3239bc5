use leptos::prelude::*;

#[component]
pub fn About() -> impl IntoView {
    view! {
        <article class="page about">
            <h1>"About PREML"</h1>
            <p>
                "PREML is a research dashboard for exploring photometric redshift estimates. It combines an "
                "interactive sky map, catalogue lookups, multi-band image cutouts and a machine-learning "
                "redshift estimator in one view."
            </p>
            <p class="text-muted">
                "The catalogue service, the inference service and the sky viewer run as separate backends."
            </p>
        </article>
    }
}
