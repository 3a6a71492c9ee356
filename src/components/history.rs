use wasm_bindgen_futures::spawn_local;
use yew::events::MouseEvent;
use yew::prelude::*;

use super::{use_api, QuizDetail};
use crate::history::{DetailView, HistoryAction, HistoryList, HistoryRows, HistoryState, EMPTY_MESSAGE};
use crate::models::QuizHistoryEntry;

#[function_component(QuizHistory)]
pub fn quiz_history() -> Html {
    let api = use_api();
    let state = use_reducer(HistoryState::default);

    // Fetch the list once on mount.
    {
        let api = api.clone();
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            spawn_local(async move {
                dispatcher.dispatch(HistoryAction::ListLoaded(api.list_quizzes().await));
            });
            || ()
        });
    }

    let on_open = {
        let api = api.clone();
        let dispatcher = state.dispatcher();
        Callback::from(move |id: i64| {
            dispatcher.dispatch(HistoryAction::Open(id));
            let api = api.clone();
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                let outcome = api.get_quiz(id).await;
                dispatcher.dispatch(HistoryAction::DetailLoaded(id, outcome));
            });
        })
    };

    let on_close = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(HistoryAction::Close))
    };

    let body = match state.list() {
        HistoryList::Loading => html! {
            <div class="loading">{"Loading past quizzes..."}</div>
        },
        HistoryList::Failed(message) => html! {
            <div class="error">{ message }</div>
        },
        HistoryList::Loaded(_) => render_table(state.rows(), &on_open),
    };

    html! {
        <section class="history">
            <h2>{"Past Quizzes"}</h2>
            { body }
            { render_detail(&state, &on_close) }
        </section>
    }
}

fn render_table(rows: Option<HistoryRows<'_>>, on_open: &Callback<i64>) -> Html {
    let rows = match rows {
        Some(HistoryRows::Entries(entries)) => entries
            .iter()
            .map(|entry| render_row(entry, on_open))
            .collect::<Html>(),
        _ => html! {
            <tr>
                <td colspan="3" class="empty-row">{ EMPTY_MESSAGE }</td>
            </tr>
        },
    };

    html! {
        <table class="history-table">
            <thead>
                <tr>
                    <th>{"Topic"}</th>
                    <th>{"URL"}</th>
                    <th>{"Actions"}</th>
                </tr>
            </thead>
            <tbody>
                { rows }
            </tbody>
        </table>
    }
}

fn render_row(entry: &QuizHistoryEntry, on_open: &Callback<i64>) -> Html {
    let id = entry.id;
    let onclick = on_open.reform(move |_: MouseEvent| id);
    html! {
        <tr key={id.to_string()}>
            <td>{ &entry.title }</td>
            <td>
                if let Some(url) = &entry.url {
                    <a href={url.clone()} target="_blank" rel="noopener noreferrer">{ url }</a>
                }
            </td>
            <td>
                <button class="btn btn-secondary" {onclick}>{"Details"}</button>
            </td>
        </tr>
    }
}

fn render_detail(state: &HistoryState, on_close: &Callback<MouseEvent>) -> Html {
    let content = match state.detail() {
        DetailView::Closed => return html! {},
        DetailView::Loading { id } => {
            let title = state
                .entry(*id)
                .map(|e| e.title.clone())
                .unwrap_or_default();
            html! { <div class="loading">{"Loading "}{ title }{"..."}</div> }
        }
        DetailView::Loaded { quiz, .. } => html! { <QuizDetail quiz={quiz.clone()} /> },
        DetailView::Missing { message, .. } | DetailView::Failed { message, .. } => html! {
            <div class="error">{ message }</div>
        },
    };

    html! {
        <div class="detail-panel">
            { content }
            <button class="btn btn-secondary" onclick={on_close.clone()}>{"Close"}</button>
        </div>
    }
}
