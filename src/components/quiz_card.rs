use std::rc::Rc;

use yew::events::MouseEvent;
use yew::prelude::*;

use crate::models::{Quiz, QuizQuestion};
use crate::quiz::{AttemptPhase, OptionMark, QuizAction, QuizSession};

#[derive(Properties, PartialEq)]
pub struct QuizCardProps {
    pub quiz: Rc<Quiz>,
}

/// Interactive attempt at a freshly generated quiz.
#[function_component(QuizCard)]
pub fn quiz_card(props: &QuizCardProps) -> Html {
    let session = {
        let quiz = props.quiz.clone();
        use_reducer(move || QuizSession::new(quiz))
    };

    let on_next = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| session.dispatch(QuizAction::Advance))
    };

    let on_restart = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| session.dispatch(QuizAction::Restart))
    };

    match session.phase() {
        AttemptPhase::Complete { score } => render_results(session.quiz(), *score, &on_restart),
        AttemptPhase::InProgress(_) => render_question(&session, &on_next),
    }
}

fn render_question(session: &UseReducerHandle<QuizSession>, on_next: &Callback<MouseEvent>) -> Html {
    let (Some(progress), Some(q)) = (session.progress(), session.current_question()) else {
        return html! {};
    };

    html! {
        <div class="quiz-card">
            <div class="quiz-header">
                <span class="quiz-counter">
                    {"Question "}{ progress.current_index + 1 }{" of "}{ session.total() }
                </span>
                <span class={q.difficulty.badge_class()}>{ q.difficulty.label() }</span>
            </div>

            <div class="quiz-body">
                <h3>{ &q.question }</h3>
                <div class="choices">
                    {
                        for q.options.iter().map(|option| {
                            let mark = session.option_mark(option);
                            let onclick = {
                                let session = session.clone();
                                let option = option.clone();
                                Callback::from(move |_: MouseEvent| {
                                    session.dispatch(QuizAction::Select(option.clone()))
                                })
                            };
                            html! {
                                <button
                                    type="button"
                                    class={mark.class()}
                                    disabled={progress.is_answered}
                                    {onclick}
                                >
                                    <span>{ option }</span>
                                    {
                                        match mark {
                                            OptionMark::Correct => html! { <span class="mark">{"✓"}</span> },
                                            OptionMark::Incorrect => html! { <span class="mark">{"✗"}</span> },
                                            _ => html! {},
                                        }
                                    }
                                </button>
                            }
                        })
                    }
                </div>

                if progress.is_answered {
                    <div class="explanation-row">
                        <div class="explanation">
                            <strong>{"Why? "}</strong>
                            { &q.explanation }
                        </div>
                        <button class="btn btn-primary" onclick={on_next.clone()}>
                            { if session.is_last_question() { "View Results" } else { "Next Question" } }
                        </button>
                    </div>
                }
            </div>
        </div>
    }
}

fn render_results(quiz: &Quiz, score: usize, on_restart: &Callback<MouseEvent>) -> Html {
    html! {
        <div class="quiz-card results">
            <h2>{"Quiz Completed!"}</h2>
            <p class="sub">{"You scored"}</p>
            <div class="score">
                { score }<span class="score-total">{" / "}{ quiz.len() }</span>
            </div>

            <div class="results-grid">
                <div class="results-box">
                    <h3>{"Key Topics"}</h3>
                    { render_topics(&quiz.related_topics) }
                </div>
                <div class="results-box">
                    <h3>{"Summary"}</h3>
                    <p>{ &quiz.summary }</p>
                </div>
            </div>

            <button class="btn btn-primary" onclick={on_restart.clone()}>
                {"Take Again"}
            </button>
        </div>
    }
}

fn render_topics(topics: &[String]) -> Html {
    html! {
        <div class="topics">
            { for topics.iter().map(|t| html! { <span class="pill">{ t }</span> }) }
        </div>
    }
}

// --- Read-only detail ----------------------------------------------------------

#[derive(Properties, PartialEq)]
pub struct QuizDetailProps {
    pub quiz: Rc<Quiz>,
}

/// Full quiz with answers revealed, used by the history view.
#[function_component(QuizDetail)]
pub fn quiz_detail(props: &QuizDetailProps) -> Html {
    let quiz = &props.quiz;
    html! {
        <div class="quiz-detail">
            <h3>{ quiz.title.clone().unwrap_or_else(|| "Untitled quiz".into()) }</h3>
            if let Some(url) = &quiz.url {
                <p class="sub">{ url }</p>
            }
            <p>{ &quiz.summary }</p>
            { render_topics(&quiz.related_topics) }
            if !quiz.sections.is_empty() {
                <h4>{"Sections"}</h4>
                { render_topics(&quiz.sections) }
            }
            { render_entities(&quiz.entity_groups()) }
            <ol>
                { for quiz.quiz.iter().map(render_answered_question) }
            </ol>
        </div>
    }
}

fn render_entities(groups: &[(String, Vec<String>)]) -> Html {
    if groups.is_empty() {
        return html! {};
    }
    html! {
        <div class="entities">
            <h4>{"Key Entities"}</h4>
            {
                for groups.iter().map(|(group, names)| html! {
                    <p class="entity-group">
                        <strong>{ group }{": "}</strong>
                        { names.join(", ") }
                    </p>
                })
            }
        </div>
    }
}

fn render_answered_question(q: &QuizQuestion) -> Html {
    html! {
        <li class="detail-question">
            <p>
                <strong>{ &q.question }</strong>
                {" "}
                <span class={q.difficulty.badge_class()}>{ q.difficulty.label() }</span>
            </p>
            <ul>
                {
                    for q.options.iter().map(|o| {
                        let class = if q.is_correct(o) { "option-correct" } else { "" };
                        html! { <li class={class}>{ o }</li> }
                    })
                }
            </ul>
            <p class="explanation"><strong>{"Why? "}</strong>{ &q.explanation }</p>
        </li>
    }
}
