use std::rc::Rc;

use yew::prelude::*;

use super::{QuizGenerator, QuizHistory};
use crate::api::ApiClient;
use crate::config::ApiConfig;

#[derive(Clone, Copy, PartialEq)]
enum Page {
    Generate,
    History,
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: ApiConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let client = use_memo(props.config.clone(), |config| {
        ApiClient::new(config.clone())
    });
    let page = use_state(|| Page::Generate);

    let tab = |target: Page, label: &'static str| {
        let page = page.clone();
        let class = if *page == target {
            "nav-tab nav-tab-active"
        } else {
            "nav-tab"
        };
        let onclick = Callback::from(move |_: MouseEvent| page.set(target));
        html! { <button class={class} {onclick}>{ label }</button> }
    };

    html! {
        <ContextProvider<Rc<ApiClient>> context={client}>
            <div class="app-shell">
                <header>
                    <h1>{"QuizGen AI"}</h1>
                    <p class="sub">
                        {"Transform any content into an interactive quiz instantly."}
                    </p>
                    <nav class="nav">
                        { tab(Page::Generate, "Generate") }
                        { tab(Page::History, "Past Quizzes") }
                    </nav>
                </header>

                <main>
                    {
                        match *page {
                            Page::Generate => html! { <QuizGenerator /> },
                            Page::History => html! { <QuizHistory /> },
                        }
                    }
                </main>

                <footer class="footer">
                    <span>{ format!("v{} – Rust + Yew + WASM", env!("CARGO_PKG_VERSION")) }</span>
                </footer>
            </div>
        </ContextProvider<Rc<ApiClient>>>
    }
}
