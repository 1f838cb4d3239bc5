//! ヘッダー・ナビゲーション・フッター

use crate::app::Page;
use leptos::prelude::*;

#[component]
pub fn Layout(
    page: ReadSignal<Page>,
    set_page: WriteSignal<Page>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="layout">
            <header class="header">
                <div class="brand">
                    <span class="brand-mark">"PREML"</span>
                    <span class="brand-sub">"Photometric Redshift Estimation"</span>
                </div>
                <nav class="nav">
                    {Page::ALL
                        .into_iter()
                        .map(|item| {
                            view! {
                                <button
                                    class="nav-item"
                                    class:active=move || page.get() == item
                                    on:click=move |_| set_page.set(item)
                                >
                                    {item.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </nav>
            </header>

            <main class="main">{children()}</main>

            <footer class="footer">
                <p>"PREML · Hyper Suprime-Cam photometric redshift research"</p>
            </footer>
        </div>
    }
}
