use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Letter of the correct option, `A` being the first option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    pub fn index(self) -> usize {
        match self {
            AnswerLetter::A => 0,
            AnswerLetter::B => 1,
            AnswerLetter::C => 2,
            AnswerLetter::D => 3,
        }
    }
}

/// A multiple-choice question as produced by the quiz generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: AnswerLetter,
}

impl QuizQuestion {
    /// Resolve the answer letter to the text of the matching option.
    pub fn answer_text(&self) -> Option<&str> {
        self.options.get(self.answer.index()).map(String::as_str)
    }
}

/// Question/answer pair held in session state and shown by the study modes.
///
/// `options` keeps the original choices around so fill-in-the-blank can use
/// them as distractors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyCard {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl StudyCard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            options: Vec::new(),
        }
    }
}

impl From<&QuizQuestion> for StudyCard {
    fn from(q: &QuizQuestion) -> Self {
        Self {
            question: q.question.clone(),
            answer: q.answer_text().unwrap_or_default().to_string(),
            options: q.options.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillInBlankExercise {
    pub question: String,
    pub answer: String,
    pub options: Vec<String>,
}

impl FillInBlankExercise {
    pub fn answer_words(&self) -> Vec<&str> {
        self.answer.split(' ').filter(|w| !w.is_empty()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    ModeSelect,
    Flashcards,
    Matching,
    FillInBlank,
}

impl Route {
    pub fn name(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::ModeSelect => "mode-select",
            Route::Flashcards => "flashcards",
            Route::Matching => "matching",
            Route::FillInBlank => "fill-in-blank",
        }
    }

    pub fn is_study_mode(self) -> bool {
        matches!(
            self,
            Route::Flashcards | Route::Matching | Route::FillInBlank
        )
    }
}

#[derive(Debug)]
pub enum AiRequest {
    GenerateQuiz {
        path: PathBuf,
    },
    FillBlank {
        ticket: u64,
        questions: Vec<StudyCard>,
    },
}

#[derive(Debug)]
pub enum AiResponse {
    QuizReady {
        questions: Vec<QuizQuestion>,
        title: Option<String>,
    },
    QuizFailed {
        error: String,
    },
    FillBlank {
        ticket: u64,
        result: Result<FillInBlankExercise, String>,
    },
}
