pub mod client;
pub mod generator;

// Public API exports
pub use client::{
    ModelConfig, OpenRouterClient, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
pub use generator::{parse_quiz_questions, parse_title, QuizError, QuizGenerator, QUESTION_COUNT};
