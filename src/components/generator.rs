use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, File, HtmlInputElement};
use yew::events::{InputEvent, MouseEvent, SubmitEvent};
use yew::prelude::*;
use yew::TargetCast;

use super::{use_api, QuizCard};
use crate::api::UploadFile;
use crate::form::{FormAction, InputMode, Outbound, SubmissionForm};

const STAGE_DELAY_MS: u32 = 2_000;

#[function_component(QuizGenerator)]
pub fn quiz_generator() -> Html {
    let api = use_api();
    let form = use_reducer(SubmissionForm::<File>::default);
    let stage_timer = use_mut_ref(|| Option::<Timeout>::None);

    // Sends whatever the form queued on its last submit. A settled request
    // clears `outbound`, which also cancels the timer.
    {
        let dispatcher = form.dispatcher();
        let outbound = form.outbound().cloned();
        use_effect_with(outbound, move |outbound| {
            stage_timer.borrow_mut().take();
            if let Some(Outbound { epoch, payload }) = outbound.clone() {
                let relabel = dispatcher.clone();
                *stage_timer.borrow_mut() = Some(Timeout::new(STAGE_DELAY_MS, move || {
                    relabel.dispatch(FormAction::StageElapsed(epoch));
                }));

                spawn_local(async move {
                    let outcome = api.submit_generation(&payload).await;
                    if let Err(e) = &outcome {
                        tracing::warn!("quiz generation failed: {e:?}");
                    }
                    dispatcher.dispatch(FormAction::Finished(epoch, outcome));
                });
            }
            || ()
        });
    }

    let on_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.dispatch(FormAction::SetInput(input.value()));
        })
    };

    let on_file_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|list| list.get(0)) {
                form.dispatch(FormAction::SetFile(Some(file)));
            }
        })
    };

    let on_submit = {
        let form = form.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            form.dispatch(FormAction::Submit);
        })
    };

    let mode = form.mode();

    html! {
        <div class="generator">
            <section>
                <div class="tabs">
                    {
                        for InputMode::ALL.iter().map(|&m| {
                            let form = form.clone();
                            let onclick = Callback::from(move |_: MouseEvent| {
                                form.dispatch(FormAction::SelectMode(m));
                            });
                            let class = if m == mode { "tab tab-active" } else { "tab" };
                            html! {
                                <button type="button" class={class} {onclick}>{ m.label() }</button>
                            }
                        })
                    }
                </div>

                <form onsubmit={on_submit}>
                    {
                        match mode {
                            InputMode::File => render_upload(form.selected_file(), &on_file_change),
                            InputMode::Url | InputMode::Topic => html! {
                                <input
                                    type={ if mode == InputMode::Url { "url" } else { "text" } }
                                    placeholder={mode.placeholder()}
                                    value={form.input_value().to_string()}
                                    oninput={on_input}
                                    required=true
                                />
                            },
                        }
                    }

                    <button
                        type="submit"
                        class={ if mode == InputMode::Topic { "btn btn-generate btn-topic" } else { "btn btn-generate" } }
                        disabled={!form.can_submit()}
                    >
                        {
                            if form.is_loading() {
                                html! { <span class="spinner-label">{ form.loading_stage() }</span> }
                            } else {
                                html! { "Generate Quiz" }
                            }
                        }
                    </button>
                </form>

                if let Some(err) = form.error() {
                    <div class="error">
                        { err }
                    </div>
                }
            </section>

            if let Some(quiz) = form.result() {
                <section class="quiz-area">
                    <QuizCard key={form.epoch().to_string()} quiz={quiz.clone()} />
                </section>
            }
        </div>
    }
}

fn render_upload(selected: Option<&File>, on_change: &Callback<Event>) -> Html {
    let caption = selected
        .map(|f| f.file_name())
        .unwrap_or_else(|| "Click to upload a PDF file".to_string());

    html! {
        <label class="upload-area" for="file-upload">
            <input
                id="file-upload"
                type="file"
                accept=".pdf"
                class="hidden"
                onchange={on_change.clone()}
            />
            <p class="upload-caption">{ caption }</p>
            <p class="sub">{"Maximum size 10MB"}</p>
        </label>
    }
}
