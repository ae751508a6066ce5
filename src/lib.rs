pub mod ai;
pub mod ai_worker;
pub mod app;
pub mod blanks;
pub mod config;
pub mod logger;
pub mod models;
pub mod modes;
pub mod pdf;
pub mod service;
pub mod store;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use ai::{ModelConfig, OpenRouterClient, QuizGenerator, DEFAULT_MODEL};
pub use app::{App, AppCommand};
pub use blanks::{synthesize, SynthesisError};
pub use models::{FillInBlankExercise, QuizQuestion, Route, StudyCard};
pub use store::{SessionState, SessionStore};
