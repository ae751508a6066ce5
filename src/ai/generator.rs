use crate::models::QuizQuestion;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Questions per generated quiz.
pub const QUESTION_COUNT: usize = 4;
const OPTION_COUNT: usize = 4;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("AI request failed: {0}")]
    Api(String),
    #[error("Failed to parse quiz response: {0}")]
    Parse(String),
    #[error("Expected 4 questions, got {0}")]
    WrongQuestionCount(usize),
    #[error("Question {index} is invalid: {reason}")]
    InvalidQuestion { index: usize, reason: String },
    #[error("Title response was empty")]
    EmptyTitle,
}

/// The AI-backed collaborators behind the upload flow.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate_quiz(&self, document: &str) -> Result<Vec<QuizQuestion>, QuizError>;
    async fn generate_title(&self, file_name: &str) -> Result<String, QuizError>;
}

fn clean_json_response(response: &str) -> String {
    let mut cleaned = response.trim().to_string();

    if cleaned.starts_with("```") {
        let lines: Vec<&str> = cleaned.lines().collect();
        if lines.len() > 2 {
            cleaned = lines[1..lines.len() - 1].join("\n");
        }
    }

    if let Some(start) = cleaned.find(['{', '['])
        && let Some(end) = cleaned.rfind(if cleaned[start..].starts_with('{') { '}' } else { ']' })
        && end > start
    {
        cleaned = cleaned[start..=end].to_string();
    }

    cleaned.trim().to_string()
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuizPayload {
    Wrapped { questions: Vec<QuizQuestion> },
    Bare(Vec<QuizQuestion>),
}

pub fn parse_quiz_questions(response: &str) -> Result<Vec<QuizQuestion>, QuizError> {
    let cleaned = clean_json_response(response);
    let payload: QuizPayload = serde_json::from_str(&cleaned).map_err(|e| {
        QuizError::Parse(format!("{}\nRaw: {}\nCleaned: {}", e, response, cleaned))
    })?;

    let questions = match payload {
        QuizPayload::Wrapped { questions } | QuizPayload::Bare(questions) => questions,
    };

    if questions.len() != QUESTION_COUNT {
        return Err(QuizError::WrongQuestionCount(questions.len()));
    }

    for (index, q) in questions.iter().enumerate() {
        if q.question.trim().is_empty() {
            return Err(QuizError::InvalidQuestion {
                index,
                reason: "empty question text".to_string(),
            });
        }
        if q.options.len() != OPTION_COUNT {
            return Err(QuizError::InvalidQuestion {
                index,
                reason: format!("expected {} options, got {}", OPTION_COUNT, q.options.len()),
            });
        }
    }

    Ok(questions)
}

/// First non-empty line with surrounding quotes removed.
pub fn parse_title(response: &str) -> Option<String> {
    let line = response.lines().map(str::trim).find(|l| !l.is_empty())?;
    let title = line
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`' || c == '*')
        .trim();
    (!title.is_empty()).then(|| title.to_string())
}

#[cfg(test)]
use std::time::Duration;
#[cfg(test)]
use tokio::time::sleep;

/// Mock generator for testing - canned quiz and title with an optional delay
#[cfg(test)]
pub struct MockQuizGenerator {
    pub quiz: Result<Vec<QuizQuestion>, String>,
    pub title: Result<String, String>,
    pub delay: Duration,
}

#[cfg(test)]
impl MockQuizGenerator {
    pub fn new() -> Self {
        Self {
            quiz: Ok(sample_questions()),
            title: Ok("Cell Biology".to_string()),
            delay: Duration::from_millis(10),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl QuizGenerator for MockQuizGenerator {
    async fn generate_quiz(&self, _document: &str) -> Result<Vec<QuizQuestion>, QuizError> {
        sleep(self.delay).await;
        self.quiz.clone().map_err(QuizError::Api)
    }

    async fn generate_title(&self, _file_name: &str) -> Result<String, QuizError> {
        sleep(self.delay).await;
        self.title.clone().map_err(QuizError::Api)
    }
}

#[cfg(test)]
pub fn sample_questions() -> Vec<QuizQuestion> {
    let json = r#"[
        {"question": "The mitochondria is the powerhouse of the cell", "options": ["mitochondria", "nucleus", "ribosome", "ATP"], "answer": "A"},
        {"question": "Which organelle contains the genetic material?", "options": ["Golgi", "Nucleus", "Vacuole", "Lysosome"], "answer": "B"},
        {"question": "Where are proteins assembled in the cell?", "options": ["Membrane", "Cytoplasm", "Ribosomes", "Nucleolus"], "answer": "C"},
        {"question": "What molecule stores energy for cellular work?", "options": ["DNA", "RNA", "Glucose", "ATP"], "answer": "D"}
    ]"#;
    serde_json::from_str(json).unwrap()
}
