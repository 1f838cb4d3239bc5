//! スカイマップパネル
//!
//! 埋め込みビューアのセッション作成、フレームとのブリッジ、
//! 座標入力による近傍検索と天体の選択を扱う。
//! 選択結果は `on_galaxy_select(詳細, 読み込み中か)` で親へ通知する。

use crate::bridge::MessageChannelTransport;
use leptos::prelude::*;
use leptos::task::spawn_local;
use preml_common::display::{empty_result_label, format_degrees, found_label};
use preml_common::{
    parse_ra_dec, FrameBridge, FrameEvent, GalaxyDetails, GalaxySummary, JumpToRequest, MapSource,
    NewCatalogRequest, Relay, SearchSequencer, SkyServiceClient, COORDINATE_HINT,
};
use wasm_bindgen::JsCast;
use web_sys::{HtmlIFrameElement, KeyboardEvent};

const MAP_WIDTH: &str = "800";
const MAP_HEIGHT: &str = "600";

#[component]
pub fn SkyMap<F>(
    client: SkyServiceClient,
    window_title: String,
    fallback_url: String,
    search_radius_deg: f64,
    on_galaxy_select: F,
) -> impl IntoView
where
    F: Fn(Option<GalaxyDetails>, bool) + 'static + Clone + Send + Sync,
{
    let (map_source, set_map_source) = signal(None::<MapSource>);
    let (input_text, set_input_text) = signal(String::new());
    let (galaxies, set_galaxies) = signal(Vec::<GalaxySummary>::new());
    let (selected_id, set_selected_id) = signal(None::<String>);
    let (is_searching, set_is_searching) = signal(false);
    let (has_searched, set_has_searched) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (selection_label, set_selection_label) = signal(None::<String>);

    let sequencer = SearchSequencer::new();
    let bridge = StoredValue::new_local(None::<FrameBridge<MessageChannelTransport>>);

    // セッション作成（失敗時は固定URLを表示し、ブリッジは張らない）
    {
        let client = client.clone();
        spawn_local(async move {
            match client.new_window(&window_title).await {
                Ok(session) => set_map_source.set(Some(MapSource::Session(session))),
                Err(e) => {
                    log::error!("SkyMap: Action=Create window failed, error={}", e);
                    set_error.set(Some("Failed to initialize SkyMap".to_string()));
                    set_map_source.set(Some(MapSource::Fixed(fallback_url)));
                }
            }
        });
    }

    on_cleanup(move || {
        bridge.try_update_value(|current| {
            if let Some(current) = current.as_mut() {
                current.close();
            }
        });
    });

    let on_frame_load = {
        let client = client.clone();
        move |ev: web_sys::Event| {
            let Some(window_id) = map_source
                .get_untracked()
                .and_then(|source| source.window_id().map(str::to_string))
            else {
                return;
            };
            let Some(frame) = ev
                .target()
                .and_then(|target| target.dyn_into::<HtmlIFrameElement>().ok())
            else {
                return;
            };

            // 再読み込み時は古いチャネルを閉じてから張り直す
            bridge.update_value(|current| {
                if let Some(old) = current.as_mut() {
                    old.close();
                }
            });

            let handler = {
                let client = client.clone();
                let window_id = window_id.clone();
                move |message: serde_json::Value| {
                    let mut received = None;
                    bridge.update_value(|current| {
                        if let Some(current) = current.as_mut() {
                            received = Some(current.receive(&message));
                        }
                    });
                    match received {
                        Some(Ok(Some(event))) => {
                            relay_frame_event(event, &client, &window_id, set_selection_label)
                        }
                        Some(Err(e)) => {
                            log::warn!("SkyMap: Action=Invalid frame message, error={}", e)
                        }
                        Some(Ok(None)) | None => {}
                    }
                }
            };

            let opened = MessageChannelTransport::new(frame, handler)
                .and_then(|transport| FrameBridge::open(transport, &window_id));
            match opened {
                Ok(opened) => {
                    bridge.set_value(Some(opened));
                    log::info!("SkyMap: Action=Bridge opened, window_id={}", window_id);

                    let client = client.clone();
                    spawn_local(async move {
                        if let Err(e) = client.add_catalog(&window_id, &NewCatalogRequest::sample()).await {
                            log::error!("SkyMap: Action=Add catalog failed, error={}", e);
                        }
                        if let Err(e) = client.jump_to(&window_id, &JumpToRequest::default()).await {
                            log::error!("SkyMap: Action=Jump failed, error={}", e);
                        }
                    });
                }
                Err(e) => {
                    log::error!("SkyMap: Action=Bridge setup failed, error={}", e);
                    set_error.set(Some(format!("Failed to connect to SkyMap: {}", e)));
                }
            }
        }
    };

    let run_search = {
        let client = client.clone();
        let on_galaxy_select = on_galaxy_select.clone();
        let sequencer = sequencer.clone();
        move || {
            let center = match parse_ra_dec(&input_text.get_untracked()) {
                Ok(center) => center,
                Err(e) => {
                    log::warn!("SkyMap: Action=Invalid coordinates, error={}", e);
                    set_error.set(Some(COORDINATE_HINT.to_string()));
                    return;
                }
            };

            set_error.set(None);
            set_is_searching.set(true);
            let ticket = sequencer.begin_search();

            let client = client.clone();
            let on_galaxy_select = on_galaxy_select.clone();
            let sequencer = sequencer.clone();
            spawn_local(async move {
                let outcome = client.query_galaxies(center, search_radius_deg).await;
                let Some(outcome) = sequencer.finish_search(ticket, outcome) else {
                    return;
                };
                set_is_searching.set(false);
                set_selected_id.set(None);
                on_galaxy_select(None, false);
                match outcome {
                    Ok(list) => {
                        set_galaxies.set(list);
                        set_has_searched.set(true);
                    }
                    Err(e) => {
                        log::error!("SkyMap: Action=Query galaxies failed, error={}", e);
                        set_galaxies.set(Vec::new());
                        set_has_searched.set(false);
                        set_error.set(Some(e.user_message("Failed to query galaxies")));
                    }
                }
            });
        }
    };

    let select_galaxy = {
        let client = client.clone();
        let on_galaxy_select = on_galaxy_select.clone();
        let sequencer = sequencer.clone();
        move |galaxy: GalaxySummary| {
            set_selected_id.set(Some(galaxy.id.clone()));
            on_galaxy_select(None, true);
            let ticket = sequencer.begin_details();

            let client = client.clone();
            let on_galaxy_select = on_galaxy_select.clone();
            let sequencer = sequencer.clone();
            spawn_local(async move {
                let outcome = client.query_galaxy_details(&galaxy.id).await;
                let Some(outcome) = sequencer.finish_details(ticket, outcome) else {
                    return;
                };
                match outcome {
                    Ok(Some(details)) => {
                        on_galaxy_select(Some(details.with_position(galaxy.ra, galaxy.dec)), false)
                    }
                    Ok(None) => {
                        on_galaxy_select(None, false);
                        set_error.set(Some(format!("No details found for {}", galaxy.id)));
                    }
                    Err(e) => {
                        log::error!("SkyMap: Action=Query details failed, error={}", e);
                        on_galaxy_select(None, false);
                        set_error.set(Some(e.user_message("Failed to query galaxy details")));
                    }
                }
            });
        }
    };

    view! {
        <div class="panel sky-map">
            <div class="map-frame">
                {move || match map_source.get() {
                    Some(source) => {
                        let on_load = on_frame_load.clone();
                        view! {
                            <iframe
                                title="HSC Map"
                                src=source.url().to_string()
                                width=MAP_WIDTH
                                height=MAP_HEIGHT
                                allow="fullscreen"
                                on:load=on_load
                            />
                        }
                        .into_any()
                    }
                    None => view! { <div class="map-placeholder">"Initializing SkyMap..."</div> }.into_any(),
                }}
                <div class="map-reticle" />
                {move || selection_label.get().map(|label| view! { <div class="map-selection">{label}</div> })}
            </div>

            <div class="map-search">
                <input
                    type="text"
                    class="coord-input mono"
                    placeholder="α=75.194502° δ=-33.193044°"
                    prop:value=move || input_text.get()
                    on:input=move |ev| set_input_text.set(event_target_value(&ev))
                    on:keydown={
                        let run_search = run_search.clone();
                        move |ev: KeyboardEvent| {
                            if ev.key() == "Enter" {
                                run_search();
                            }
                        }
                    }
                />
                <button
                    class="btn btn-primary"
                    disabled=move || is_searching.get()
                    on:click={
                        let run_search = run_search.clone();
                        move |_| run_search()
                    }
                >
                    {move || if is_searching.get() { "Searching..." } else { "Search" }}
                </button>
            </div>

            {move || error.get().map(|message| view! { <div class="panel-error">{message}</div> })}

            <Show when=move || has_searched.get()>
                <h3 class="list-title">{move || found_label(galaxies.get().len())}</h3>
                {move || {
                    empty_result_label(galaxies.get().len())
                        .map(|notice| view! { <p class="list-empty">{notice}</p> })
                }}
            </Show>
            <ul class="galaxy-list">
                <For
                    each=move || galaxies.get()
                    key=|galaxy| galaxy.id.clone()
                    children=move |galaxy| {
                        let select_galaxy = select_galaxy.clone();
                        let is_selected = {
                            let id = galaxy.id.clone();
                            move || selected_id.get().as_deref() == Some(id.as_str())
                        };
                        view! {
                            <li
                                class="galaxy-item"
                                class:selected=is_selected
                                on:click={
                                    let galaxy = galaxy.clone();
                                    move |_| select_galaxy(galaxy.clone())
                                }
                            >
                                <span class="galaxy-id mono">{galaxy.id.clone()}</span>
                                <span class="mono">"RA: "{format_degrees(galaxy.ra, 4)}</span>
                                <span class="mono">"Dec: "{format_degrees(galaxy.dec, 4)}</span>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}

/// フレームのイベントをバックエンドへ転送
fn relay_frame_event(
    event: FrameEvent,
    client: &SkyServiceClient,
    window_id: &str,
    set_selection_label: WriteSignal<Option<String>>,
) {
    log::debug!("SkyMap: Action=Frame event, event={:?}", event);

    match event.relay() {
        Some(Relay::Callback { cbid, args }) => {
            let client = client.clone();
            let window_id = window_id.to_string();
            spawn_local(async move {
                if let Err(e) = client.forward_callback(&window_id, &cbid, args).await {
                    log::error!("SkyMap: Action=Forward callback failed, cbid={}, error={}", cbid, e);
                }
            });
        }
        Some(Relay::Selection(selection)) => {
            set_selection_label.set(Some(selection.label()));
            let client = client.clone();
            let window_id = window_id.to_string();
            spawn_local(async move {
                if let Err(e) = client.send_selection(&window_id, &selection).await {
                    log::error!("SkyMap: Action=Send selection failed, error={}", e);
                }
            });
        }
        None => {
            if let FrameEvent::Unknown { kind, .. } = &event {
                log::warn!("SkyMap: Action=Unknown frame message, type={}", kind);
            }
        }
    }
}
