use std::rc::Rc;

use yew::Reducible;

use crate::api::{GenerationPayload, UploadFile};
use crate::error::ClientError;
use crate::models::Quiz;

pub const STAGE_ANALYZING: &str = "Analyzing content...";
pub const STAGE_GENERATING: &str = "Generating questions...";
pub const NO_FILE_MESSAGE: &str = "Please select a PDF file.";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Url,
    File,
    Topic,
}

impl InputMode {
    pub const ALL: [InputMode; 3] = [InputMode::Url, InputMode::File, InputMode::Topic];

    pub fn label(self) -> &'static str {
        match self {
            InputMode::Url => "Web URL",
            InputMode::File => "Upload PDF",
            InputMode::Topic => "Topic",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            InputMode::Url => "Paste a Wikipedia URL (e.g., https://en.wikipedia.org/wiki/AI)",
            InputMode::File => "",
            InputMode::Topic => "Enter any topic (e.g., Quantum Physics, The Roman Empire)",
        }
    }

    pub fn takes_text(self) -> bool {
        !matches!(self, InputMode::File)
    }
}

/// A request the view still has to send, tagged with the epoch it belongs to.
#[derive(Clone, PartialEq, Debug)]
pub struct Outbound<F> {
    pub epoch: u64,
    pub payload: GenerationPayload<F>,
}

pub enum FormAction<F> {
    SelectMode(InputMode),
    SetInput(String),
    SetFile(Option<F>),
    Submit,
    StageElapsed(u64),
    Finished(u64, Result<Quiz, ClientError>),
}

/// State of the generation form.
///
/// Only one generation request is ever in flight. Switching tabs while it
/// runs keeps the form loading but marks the outcome as abandoned, so the
/// response only clears the spinner. Each submission bumps `epoch` and a
/// response for any other epoch is ignored.
#[derive(Clone, PartialEq, Debug)]
pub struct SubmissionForm<F> {
    mode: InputMode,
    input_value: String,
    selected_file: Option<F>,
    loading: bool,
    loading_stage: String,
    error: Option<String>,
    result: Option<Rc<Quiz>>,
    epoch: u64,
    outbound: Option<Outbound<F>>,
    abandoned: bool,
}

impl<F> Default for SubmissionForm<F> {
    fn default() -> Self {
        Self {
            mode: InputMode::Url,
            input_value: String::new(),
            selected_file: None,
            loading: false,
            loading_stage: String::new(),
            error: None,
            result: None,
            epoch: 0,
            outbound: None,
            abandoned: false,
        }
    }
}

impl<F: UploadFile> SubmissionForm<F> {
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn selected_file(&self) -> Option<&F> {
        self.selected_file.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn loading_stage(&self) -> &str {
        &self.loading_stage
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&Rc<Quiz>> {
        self.result.as_ref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn outbound(&self) -> Option<&Outbound<F>> {
        self.outbound.as_ref()
    }

    /// Whether the generate button is enabled. File mode stays enabled
    /// without a file so the missing-file message can be shown.
    pub fn can_submit(&self) -> bool {
        !self.loading && (!self.mode.takes_text() || !self.input_value.trim().is_empty())
    }

    /// Clears input and output. A request already in flight keeps running
    /// (and keeps the trigger disabled) but its outcome will be discarded.
    pub fn select_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        self.input_value.clear();
        self.selected_file = None;
        self.error = None;
        self.result = None;
        if self.loading {
            self.abandoned = true;
        }
    }

    pub fn set_input(&mut self, text: String) {
        if self.mode.takes_text() {
            self.input_value = text;
        }
    }

    pub fn set_file(&mut self, file: Option<F>) {
        if self.mode == InputMode::File {
            self.selected_file = file;
        }
    }

    /// Starts a submission. Returns the new epoch when a request must be
    /// sent, `Ok(None)` when the submission is disallowed, and a validation
    /// error (also stored for display) when local input is missing.
    pub fn submit(&mut self) -> Result<Option<u64>, ClientError> {
        if self.loading {
            return Ok(None);
        }
        let payload = match self.mode {
            InputMode::File => match &self.selected_file {
                Some(file) => GenerationPayload::File(file.clone()),
                None => {
                    let err = ClientError::Validation(NO_FILE_MESSAGE.into());
                    self.error = Some(err.user_message());
                    self.result = None;
                    return Err(err);
                }
            },
            _ if self.input_value.trim().is_empty() => return Ok(None),
            InputMode::Url => GenerationPayload::Url(self.input_value.trim().to_string()),
            InputMode::Topic => GenerationPayload::Topic(self.input_value.trim().to_string()),
        };

        self.epoch += 1;
        self.abandoned = false;
        self.loading = true;
        self.loading_stage = STAGE_ANALYZING.into();
        self.error = None;
        self.result = None;
        self.outbound = Some(Outbound {
            epoch: self.epoch,
            payload,
        });
        Ok(Some(self.epoch))
    }

    /// Cosmetic only: relabels the spinner, never touches the outcome.
    pub fn stage_elapsed(&mut self, epoch: u64) {
        if self.loading && epoch == self.epoch {
            self.loading_stage = STAGE_GENERATING.into();
        }
    }

    /// Settles the in-flight request. Returns `false` when the outcome was
    /// not shown: unknown epoch, or abandoned by a mode switch.
    pub fn finish(&mut self, epoch: u64, outcome: Result<Quiz, ClientError>) -> bool {
        if !self.loading || epoch != self.epoch {
            return false;
        }
        self.loading = false;
        self.loading_stage.clear();
        self.outbound = None;
        if std::mem::take(&mut self.abandoned) {
            return false;
        }
        match outcome {
            Ok(quiz) => self.result = Some(Rc::new(quiz)),
            Err(err) => self.error = Some(err.user_message()),
        }
        true
    }
}

impl<F: UploadFile + 'static> Reducible for SubmissionForm<F> {
    type Action = FormAction<F>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FormAction::SelectMode(mode) => next.select_mode(mode),
            FormAction::SetInput(text) => next.set_input(text),
            FormAction::SetFile(file) => next.set_file(file),
            FormAction::Submit => {
                if let Err(err) = next.submit() {
                    tracing::debug!("submission rejected locally: {err}");
                }
            }
            FormAction::StageElapsed(epoch) => next.stage_elapsed(epoch),
            FormAction::Finished(epoch, outcome) => {
                if !next.finish(epoch, outcome) {
                    tracing::debug!("dropped response for abandoned request #{epoch}");
                }
            }
        }
        Rc::new(next)
    }
}
