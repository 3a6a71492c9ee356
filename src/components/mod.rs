use std::rc::Rc;

use yew::prelude::*;

use crate::api::ApiClient;
use crate::config::ApiConfig;

mod app;
mod generator;
mod history;
mod quiz_card;

pub use app::{App, AppProps};
pub use generator::QuizGenerator;
pub use history::QuizHistory;
pub use quiz_card::{QuizCard, QuizDetail};

/// The client provided by `App`; falls back to the build-time config when a
/// component is mounted on its own.
#[hook]
pub fn use_api() -> Rc<ApiClient> {
    let provided = use_context::<Rc<ApiClient>>();
    let fallback = use_memo((), |_| ApiClient::new(ApiConfig::from_env()));
    provided.unwrap_or(fallback)
}
