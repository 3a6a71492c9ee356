use std::rc::Rc;

use yew::Reducible;

use crate::models::{Quiz, QuizQuestion};

/// Where one attempt currently stands while questions remain.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct QuizProgress {
    pub current_index: usize,
    pub selected_option: Option<String>,
    pub is_answered: bool,
    pub score: usize,
}

#[derive(Clone, PartialEq, Debug)]
pub enum AttemptPhase {
    InProgress(QuizProgress),
    Complete { score: usize },
}

/// How an option button should look for the current question.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OptionMark {
    Open,
    Correct,
    Incorrect,
    Dimmed,
}

impl OptionMark {
    pub fn class(self) -> &'static str {
        match self {
            OptionMark::Open => "option",
            OptionMark::Correct => "option option-correct",
            OptionMark::Incorrect => "option option-incorrect",
            OptionMark::Dimmed => "option option-dimmed",
        }
    }
}

pub enum QuizAction {
    Select(String),
    Advance,
    Restart,
}

/// One attempt at a quiz. The quiz itself is shared and never modified.
#[derive(Clone, PartialEq, Debug)]
pub struct QuizSession {
    quiz: Rc<Quiz>,
    phase: AttemptPhase,
}

impl QuizSession {
    pub fn new(quiz: Rc<Quiz>) -> Self {
        Self {
            quiz,
            phase: AttemptPhase::InProgress(QuizProgress::default()),
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn phase(&self) -> &AttemptPhase {
        &self.phase
    }

    pub fn total(&self) -> usize {
        self.quiz.len()
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, AttemptPhase::Complete { .. })
    }

    pub fn progress(&self) -> Option<&QuizProgress> {
        match &self.phase {
            AttemptPhase::InProgress(p) => Some(p),
            AttemptPhase::Complete { .. } => None,
        }
    }

    /// Final score; `None` until the attempt is complete.
    pub fn final_score(&self) -> Option<usize> {
        match self.phase {
            AttemptPhase::Complete { score } => Some(score),
            AttemptPhase::InProgress(_) => None,
        }
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.progress()
            .and_then(|p| self.quiz.quiz.get(p.current_index))
    }

    pub fn is_last_question(&self) -> bool {
        self.progress()
            .map(|p| p.current_index + 1 >= self.total())
            .unwrap_or(false)
    }

    /// First answer is final: later calls on the same question are ignored.
    pub fn select_option(&mut self, option: &str) {
        let Some(correct) = self.current_question().map(|q| q.is_correct(option)) else {
            return;
        };
        let AttemptPhase::InProgress(progress) = &mut self.phase else {
            return;
        };
        if progress.is_answered {
            return;
        }
        progress.selected_option = Some(option.to_string());
        progress.is_answered = true;
        if correct {
            progress.score += 1;
        }
    }

    pub fn advance(&mut self) {
        let total = self.total();
        let AttemptPhase::InProgress(progress) = &mut self.phase else {
            return;
        };
        if !progress.is_answered {
            return;
        }
        if progress.current_index + 1 >= total {
            let score = progress.score;
            self.phase = AttemptPhase::Complete { score };
        } else {
            progress.current_index += 1;
            progress.selected_option = None;
            progress.is_answered = false;
        }
    }

    pub fn restart(&mut self) {
        if self.is_complete() {
            self.phase = AttemptPhase::InProgress(QuizProgress::default());
        }
    }

    pub fn option_mark(&self, option: &str) -> OptionMark {
        let (Some(progress), Some(question)) = (self.progress(), self.current_question()) else {
            return OptionMark::Open;
        };
        if !progress.is_answered {
            OptionMark::Open
        } else if question.is_correct(option) {
            OptionMark::Correct
        } else if progress.selected_option.as_deref() == Some(option) {
            OptionMark::Incorrect
        } else {
            OptionMark::Dimmed
        }
    }
}

impl Reducible for QuizSession {
    type Action = QuizAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            QuizAction::Select(option) => next.select_option(&option),
            QuizAction::Advance => next.advance(),
            QuizAction::Restart => next.restart(),
        }
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{question, quiz_of};

    fn paris_quiz() -> QuizSession {
        QuizSession::new(Rc::new(quiz_of(vec![
            question("Capital of France?", &["Paris", "Lyon", "Nice"], "Paris"),
            question("2 + 2?", &["3", "4", "5"], "4"),
        ])))
    }

    #[test]
    fn one_right_one_wrong_scores_one_of_two() {
        let mut s = paris_quiz();
        s.select_option("Paris");
        s.advance();
        s.select_option("5");
        assert_eq!(s.option_mark("4"), OptionMark::Correct);
        assert_eq!(s.option_mark("5"), OptionMark::Incorrect);
        assert_eq!(s.option_mark("3"), OptionMark::Dimmed);
        s.advance();
        assert!(s.is_complete());
        assert_eq!(s.final_score(), Some(1));
        assert_eq!(s.total(), 2);
    }

    #[test]
    fn n_answers_and_advances_complete_with_correct_count() {
        let answers = ["a", "b", "c", "d", "e"];
        let picks = ["a", "x", "c", "x", "e"];
        let quiz = quiz_of(
            answers
                .iter()
                .map(|a| question("q", &[*a, "x"], a))
                .collect(),
        );
        let mut s = QuizSession::new(Rc::new(quiz));
        for (i, pick) in picks.iter().enumerate() {
            assert!(!s.is_complete(), "completed early at {i}");
            s.select_option(pick);
            s.advance();
        }
        assert_eq!(s.final_score(), Some(3));
    }

    #[test]
    fn second_selection_is_ignored() {
        let mut s = paris_quiz();
        s.select_option("Lyon");
        let before = s.clone();
        s.select_option("Paris");
        assert_eq!(s, before);
        let p = s.progress().unwrap();
        assert_eq!(p.selected_option.as_deref(), Some("Lyon"));
        assert_eq!(p.score, 0);
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut s = paris_quiz();
        s.advance();
        assert_eq!(s.progress().unwrap().current_index, 0);
        assert_eq!(s.option_mark("Paris"), OptionMark::Open);
    }

    #[test]
    fn advancing_resets_selection() {
        let mut s = paris_quiz();
        s.select_option("Paris");
        assert!(!s.is_last_question());
        s.advance();
        let p = s.progress().unwrap();
        assert_eq!(p.current_index, 1);
        assert_eq!(p.selected_option, None);
        assert!(!p.is_answered);
        assert!(s.is_last_question());
        assert_eq!(s.final_score(), None);
    }

    #[test]
    fn restart_after_complete_resets_everything() {
        let mut s = paris_quiz();
        s.select_option("Paris");
        s.advance();
        s.select_option("4");
        s.advance();
        assert_eq!(s.final_score(), Some(2));
        s.restart();
        assert_eq!(s.progress(), Some(&QuizProgress::default()));
        assert_eq!(s.quiz().len(), 2);
    }

    #[test]
    fn restart_mid_attempt_is_ignored() {
        let mut s = paris_quiz();
        s.select_option("Paris");
        s.restart();
        assert_eq!(s.progress().unwrap().score, 1);
    }

    #[test]
    fn reducer_keeps_same_rc_on_noop() {
        let s = Rc::new(paris_quiz());
        let next = s.clone().reduce(QuizAction::Advance);
        assert!(Rc::ptr_eq(&s, &next));
        let next = next.reduce(QuizAction::Select("Paris".into()));
        assert_eq!(next.progress().unwrap().score, 1);
    }
}
