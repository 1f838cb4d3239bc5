//! 5バンド等級から赤方偏移を推定する計算パネル

use leptos::prelude::*;
use leptos::task::spawn_local;
use preml_common::display::{format_redshift, parse_magnitude_input};
use preml_common::{Band, GalaxyDetails, LoadState, MagnitudeValues, RequestSequencer, SkyServiceClient};

#[component]
pub fn RedshiftCalculator(
    client: SkyServiceClient,
    galaxy: ReadSignal<Option<GalaxyDetails>>,
    details_loading: ReadSignal<bool>,
) -> impl IntoView {
    let (magnitudes, set_magnitudes) = signal(MagnitudeValues::default());
    let (result, set_result) = signal(LoadState::<f64>::Idle);
    let predict_seq = RequestSequencer::new();

    // 新しい天体が届いたら入力を上書きして結果をリセット
    Effect::new({
        let predict_seq = predict_seq.clone();
        move |_| {
            if details_loading.get() {
                return;
            }
            if let Some(details) = galaxy.get() {
                set_magnitudes.set(MagnitudeValues::from(&details));
                set_result.set(LoadState::Idle);
                predict_seq.invalidate();
            }
        }
    });

    let edit_seq = predict_seq.clone();
    let on_calculate = move |_| {
        let values = magnitudes.get_untracked();
        let ticket = predict_seq.issue();
        set_result.set(LoadState::Loading);

        let client = client.clone();
        let predict_seq = predict_seq.clone();
        spawn_local(async move {
            let outcome = client.predict(&values).await;
            let Some(outcome) = predict_seq.accept(ticket, outcome) else {
                return;
            };
            set_result.set(LoadState::from_result(outcome, |e| {
                log::error!("RedshiftCalculator: Action=Prediction failed, error={}", e);
                e.user_message("Failed to calculate redshift")
            }));
        });
    };

    view! {
        <div class="panel redshift-calculator">
            <h2 class="panel-title">"Redshift Calculator"</h2>
            <div class="magnitude-grid">
                {Band::ALL
                    .into_iter()
                    .map(|band| {
                        let id = format!("mag-{}", band.as_str());
                        let edit_seq = edit_seq.clone();
                        view! {
                            <div class="form-group">
                                <label for=id.clone()>{format!("{}-band", band.as_str())}</label>
                                <input
                                    type="number"
                                    step="0.1"
                                    id=id
                                    prop:value=move || magnitudes.get().get(band).to_string()
                                    on:input=move |ev| {
                                        let value = parse_magnitude_input(&event_target_value(&ev));
                                        set_magnitudes.update(|m| m.set(band, value));
                                        set_result.set(LoadState::Idle);
                                        edit_seq.invalidate();
                                    }
                                />
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <button
                class="btn btn-primary"
                disabled=move || result.get().is_loading()
                on:click=on_calculate
            >
                {move || if result.get().is_loading() { "Calculating..." } else { "Calculate Redshift" }}
            </button>

            {move || match result.get() {
                LoadState::Ready(z) => view! {
                    <div class="redshift-result">
                        <span class="result-label">"Estimated z"</span>
                        <span class="result-value mono">{format_redshift(z)}</span>
                    </div>
                }
                .into_any(),
                LoadState::Failed(message) => {
                    view! { <div class="panel-error">{message}</div> }.into_any()
                }
                LoadState::Idle | LoadState::Loading => ().into_any(),
            }}
        </div>
    }
}
