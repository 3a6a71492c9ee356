use std::rc::Rc;

use yew::Reducible;

use crate::error::ClientError;
use crate::models::{Quiz, QuizHistoryEntry};

pub const LIST_FAILED_MESSAGE: &str = "Failed to load past quizzes.";
pub const EMPTY_MESSAGE: &str = "No quizzes generated yet.";

#[derive(Clone, PartialEq, Debug)]
pub enum HistoryList {
    Loading,
    Failed(String),
    Loaded(Vec<QuizHistoryEntry>),
}

/// What the table body shows once the list has arrived.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum HistoryRows<'a> {
    Empty,
    Entries(&'a [QuizHistoryEntry]),
}

#[derive(Clone, PartialEq, Debug)]
pub enum DetailView {
    Closed,
    Loading { id: i64 },
    Loaded { id: i64, quiz: Rc<Quiz> },
    Missing { id: i64, message: String },
    Failed { id: i64, message: String },
}

impl DetailView {
    pub fn id(&self) -> Option<i64> {
        match self {
            DetailView::Closed => None,
            DetailView::Loading { id }
            | DetailView::Loaded { id, .. }
            | DetailView::Missing { id, .. }
            | DetailView::Failed { id, .. } => Some(*id),
        }
    }
}

pub enum HistoryAction {
    ListLoaded(Result<Vec<QuizHistoryEntry>, ClientError>),
    Open(i64),
    DetailLoaded(i64, Result<Quiz, ClientError>),
    Close,
}

#[derive(Clone, PartialEq, Debug)]
pub struct HistoryState {
    list: HistoryList,
    detail: DetailView,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self {
            list: HistoryList::Loading,
            detail: DetailView::Closed,
        }
    }
}

impl HistoryState {
    pub fn list(&self) -> &HistoryList {
        &self.list
    }

    pub fn detail(&self) -> &DetailView {
        &self.detail
    }

    pub fn rows(&self) -> Option<HistoryRows<'_>> {
        match &self.list {
            HistoryList::Loaded(entries) if entries.is_empty() => Some(HistoryRows::Empty),
            HistoryList::Loaded(entries) => Some(HistoryRows::Entries(entries)),
            _ => None,
        }
    }

    pub fn entry(&self, id: i64) -> Option<&QuizHistoryEntry> {
        match &self.list {
            HistoryList::Loaded(entries) => entries.iter().find(|e| e.id == id),
            _ => None,
        }
    }

    pub fn list_loaded(&mut self, outcome: Result<Vec<QuizHistoryEntry>, ClientError>) {
        self.list = match outcome {
            Ok(entries) => HistoryList::Loaded(entries),
            Err(err) => {
                tracing::warn!("history list failed: {err:?}");
                HistoryList::Failed(LIST_FAILED_MESSAGE.into())
            }
        };
    }

    pub fn open(&mut self, id: i64) {
        self.detail = DetailView::Loading { id };
    }

    /// Ignores responses for a detail view that is no longer the open one.
    pub fn detail_loaded(&mut self, id: i64, outcome: Result<Quiz, ClientError>) {
        if self.detail != (DetailView::Loading { id }) {
            return;
        }
        self.detail = match outcome {
            Ok(quiz) => DetailView::Loaded {
                id,
                quiz: Rc::new(quiz),
            },
            Err(err @ ClientError::NotFound { .. }) => DetailView::Missing {
                id,
                message: err.user_message(),
            },
            Err(err) => DetailView::Failed {
                id,
                message: err.user_message(),
            },
        };
    }

    pub fn close(&mut self) {
        self.detail = DetailView::Closed;
    }
}

impl Reducible for HistoryState {
    type Action = HistoryAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            HistoryAction::ListLoaded(outcome) => next.list_loaded(outcome),
            HistoryAction::Open(id) => next.open(id),
            HistoryAction::DetailLoaded(id, outcome) => next.detail_loaded(id, outcome),
            HistoryAction::Close => next.close(),
        }
        Rc::new(next)
    }
}
