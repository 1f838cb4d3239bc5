//! 手法の説明ページ

use leptos::prelude::*;

#[component]
pub fn Methodology() -> impl IntoView {
    view! {
        <article class="page methodology">
            <h1>"Methodology"</h1>
            <section>
                <h2>"Photometric redshifts"</h2>
                <p>
                    "Spectroscopic redshifts are precise but expensive. Photometric redshifts estimate the distance "
                    "of a galaxy from its brightness in a handful of broad filters, which makes it possible to "
                    "survey millions of objects."
                </p>
            </section>
            <section>
                <h2>"Model inputs"</h2>
                <p>
                    "The model takes the g, r, i, z and y magnitudes measured by Hyper Suprime-Cam. "
                    "Colours between adjacent bands trace the redshifted spectral breaks that the network learns to locate."
                </p>
            </section>
            <section>
                <h2>"Inference"</h2>
                <p>
                    "The trained network is exported to ONNX and served behind a small prediction endpoint. "
                    "The dashboard sends five magnitudes and displays the returned redshift."
                </p>
            </section>
        </article>
    }
}
