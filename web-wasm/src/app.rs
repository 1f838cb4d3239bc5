//! メインアプリケーションコンポーネント

use crate::components::layout::Layout;
use crate::config::AppConfig;
use crate::pages::{
    about::About, dashboard::Dashboard, dataset::Dataset, methodology::Methodology,
    publications::Publications,
};
use leptos::prelude::*;

/// 表示中のページ（ルーターは使わずローカル状態で切り替える）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Methodology,
    Dataset,
    Publications,
    About,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Methodology,
        Page::Dataset,
        Page::Publications,
        Page::About,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Methodology => "Methodology",
            Page::Dataset => "Dataset",
            Page::Publications => "Publications",
            Page::About => "About",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_build_env();
    let client = config.client();
    let (page, set_page) = signal(Page::Dashboard);

    log::info!(
        "App: Action=Start, api_base={:?}, inference_base={:?}",
        config.api_base_url,
        config.inference_base_url
    );

    view! {
        <Layout page=page set_page=set_page>
            {move || match page.get() {
                Page::Dashboard => {
                    view! { <Dashboard client=client.clone() config=config.clone() /> }.into_any()
                }
                Page::Methodology => view! { <Methodology /> }.into_any(),
                Page::Dataset => view! { <Dataset /> }.into_any(),
                Page::Publications => view! { <Publications /> }.into_any(),
                Page::About => view! { <About /> }.into_any(),
            }}
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_labels() {
        let labels: Vec<&str> = Page::ALL.iter().map(Page::label).collect();
        assert_eq!(
            labels,
            vec!["Dashboard", "Methodology", "Dataset", "Publications", "About"]
        );
    }
}
