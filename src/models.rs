use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::ClientError;

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Debug)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
    const NAMES: &'static [&'static str] = &["Easy", "Medium", "Hard"];

    /// Case-insensitive; the backend stores whatever the model wrote.
    pub fn parse(raw: &str) -> Option<Difficulty> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(raw))
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            Difficulty::Easy => "badge badge-easy",
            Difficulty::Medium => "badge badge-medium",
            Difficulty::Hard => "badge badge-hard",
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Difficulty::parse(&raw).ok_or_else(|| de::Error::unknown_variant(&raw, Self::NAMES))
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
    pub difficulty: Difficulty,
}

impl QuizQuestion {
    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }
}

/// A generated quiz as returned by `/generate` and `/quizzes/{id}`.
///
/// Only `quiz`, `summary` and `related_topics` are guaranteed; the record
/// fields are filled in once the backend has stored the quiz.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Quiz {
    pub quiz: Vec<QuizQuestion>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub related_topics: Vec<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub sections: Vec<String>,
    #[serde(default)]
    pub key_entities: serde_json::Value,
}

impl Quiz {
    pub fn len(&self) -> usize {
        self.quiz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quiz.is_empty()
    }

    /// `key_entities` as (group, names) pairs, for objects shaped like
    /// `{"people": ["Ada"], "places": [...]}`. Non-string names are skipped
    /// and other shapes yield nothing.
    pub fn entity_groups(&self) -> Vec<(String, Vec<String>)> {
        let Some(groups) = self.key_entities.as_object() else {
            return Vec::new();
        };
        groups
            .iter()
            .filter_map(|(group, names)| {
                let names: Vec<String> = match names {
                    serde_json::Value::Array(items) => items
                        .iter()
                        .filter_map(|n| n.as_str().map(str::to_string))
                        .collect(),
                    serde_json::Value::String(s) => vec![s.clone()],
                    _ => Vec::new(),
                };
                (!names.is_empty()).then(|| (group.clone(), names))
            })
            .collect()
    }

    /// Rejects quizzes the quiz-taking flow cannot run: no questions, or a
    /// question whose answer is not one of its options.
    pub fn validate(self) -> Result<Quiz, ClientError> {
        if self.is_empty() {
            return Err(ClientError::Malformed(
                "the generated quiz has no questions".into(),
            ));
        }
        if let Some((i, _)) = self
            .quiz
            .iter()
            .enumerate()
            .find(|(_, q)| !q.options.iter().any(|o| q.is_correct(o)))
        {
            return Err(ClientError::Malformed(format!(
                "question {} has an answer that is not one of its options",
                i + 1
            )));
        }
        Ok(self)
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct QuizHistoryEntry {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

// -----------------------------------------------------------------------------

#[cfg(test)]
pub(crate) fn question(text: &str, options: &[&str], answer: &str) -> QuizQuestion {
    QuizQuestion {
        question: text.into(),
        options: options.iter().map(|o| o.to_string()).collect(),
        answer: answer.into(),
        explanation: String::new(),
        difficulty: Difficulty::Medium,
    }
}

#[cfg(test)]
pub(crate) fn quiz_of(questions: Vec<QuizQuestion>) -> Quiz {
    Quiz {
        quiz: questions,
        summary: "summary".into(),
        related_topics: vec!["topic".into()],
        id: None,
        title: None,
        url: None,
        sections: Vec::new(),
        key_entities: serde_json::Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_record_with_lowercase_difficulty() {
        let body = r#"{
            "id": 7,
            "url": "https://en.wikipedia.org/wiki/Paris",
            "title": "Paris",
            "summary": "Capital of France",
            "key_entities": {"people": []},
            "sections": ["History"],
            "quiz": [{
                "question": "Capital of France?",
                "options": ["Paris", "Rome"],
                "answer": "Paris",
                "difficulty": "medium",
                "explanation": "It is."
            }],
            "related_topics": ["France"]
        }"#;
        let quiz: Quiz = serde_json::from_str(body).unwrap();
        assert_eq!(quiz.id, Some(7));
        assert_eq!(quiz.quiz[0].difficulty, Difficulty::Medium);
        assert_eq!(quiz.related_topics, vec!["France".to_string()]);
        assert!(quiz.validate().is_ok());
    }

    #[test]
    fn decodes_minimal_generation_body() {
        let body = r#"{"quiz":[{"question":"q","options":["a","b"],"answer":"b","difficulty":"Hard","explanation":""}],"summary":"s","related_topics":[]}"#;
        let quiz: Quiz = serde_json::from_str(body).unwrap();
        assert_eq!(quiz.title, None);
        assert_eq!(quiz.quiz[0].difficulty, Difficulty::Hard);
    }

    #[test]
    fn validate_rejects_empty_quiz() {
        let err = quiz_of(Vec::new()).validate().unwrap_err();
        assert!(matches!(err, ClientError::Malformed(_)));
    }

    #[test]
    fn validate_rejects_answer_outside_options() {
        let quiz = quiz_of(vec![
            question("ok", &["a", "b"], "a"),
            question("bad", &["a", "b"], "c"),
        ]);
        let err = quiz.validate().unwrap_err();
        assert_eq!(
            err,
            ClientError::Malformed(
                "question 2 has an answer that is not one of its options".into()
            )
        );
    }

    #[test]
    fn difficulty_ignores_case_and_whitespace() {
        for raw in ["\"mEdium\"", "\"MEDIUM\"", "\" medium \""] {
            let d: Difficulty = serde_json::from_str(raw).unwrap();
            assert_eq!(d, Difficulty::Medium, "{raw}");
        }
        assert_eq!(Difficulty::parse("hArD"), Some(Difficulty::Hard));
        assert!(serde_json::from_str::<Difficulty>("\"extreme\"").is_err());
    }

    #[test]
    fn mixed_case_difficulty_keeps_quiz_valid() {
        let body = r#"{"quiz":[{"question":"q","options":["a"],"answer":"a","difficulty":"eAsY"}],"summary":"s"}"#;
        let quiz: Quiz = serde_json::from_str(body).unwrap();
        assert_eq!(quiz.quiz[0].difficulty, Difficulty::Easy);
        assert!(quiz.validate().is_ok());
    }

    #[test]
    fn entity_groups_from_object() {
        let mut quiz = quiz_of(vec![question("q", &["a"], "a")]);
        quiz.key_entities = serde_json::json!({
            "people": ["Ada Lovelace", 3],
            "places": "London",
            "dates": []
        });
        assert_eq!(
            quiz.entity_groups(),
            vec![
                ("people".to_string(), vec!["Ada Lovelace".to_string()]),
                ("places".to_string(), vec!["London".to_string()]),
            ]
        );
        quiz.key_entities = serde_json::Value::Null;
        assert!(quiz.entity_groups().is_empty());
    }

    #[test]
    fn history_entry_ignores_extra_fields() {
        let body = r#"[{"id":1,"title":"Rust","url":"file_upload","summary":"x","quiz":[]}]"#;
        let entries: Vec<QuizHistoryEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(entries[0].title, "Rust");
        assert_eq!(entries[0].url.as_deref(), Some("file_upload"));
    }
}
