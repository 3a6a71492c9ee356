mod api;
mod components;
mod config;
mod error;
mod form;
mod history;
mod models;
mod quiz;

use components::{App, AppProps};
use config::ApiConfig;

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let config = ApiConfig::from_env();
    tracing::info!("quiz service at {}", config.base_url);

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
