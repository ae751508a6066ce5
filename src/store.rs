use crate::models::{QuizQuestion, StudyCard};
use std::sync::Arc;
use tokio::sync::watch;

/// What every study mode reads: the active quiz, its title and the score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub questions: Vec<StudyCard>,
    pub title: Option<String>,
    pub points: u32,
}

/// Shared handle to the session state.
///
/// Clones share the same state. Writes go through the watch channel and are
/// visible to the next read from any clone; subscribers are notified.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionState>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn questions(&self) -> Vec<StudyCard> {
        self.tx.borrow().questions.clone()
    }

    pub fn has_questions(&self) -> bool {
        !self.tx.borrow().questions.is_empty()
    }

    pub fn title(&self) -> Option<String> {
        self.tx.borrow().title.clone()
    }

    pub fn points(&self) -> u32 {
        self.tx.borrow().points
    }

    pub fn set_questions(&self, questions: Vec<StudyCard>) {
        self.tx.send_modify(|state| state.questions = questions);
    }

    pub fn set_title(&self, title: Option<String>) {
        self.tx.send_modify(|state| state.title = title);
    }

    pub fn set_points(&self, points: u32) {
        self.tx.send_modify(|state| state.points = points);
    }

    pub fn award_point(&self) {
        self.tx
            .send_modify(|state| state.points = state.points.saturating_add(1));
    }

    /// Replace the active quiz after a successful generation.
    pub fn load_quiz(&self, questions: &[QuizQuestion], title: Option<String>) {
        let cards: Vec<StudyCard> = questions.iter().map(StudyCard::from).collect();
        self.tx.send_modify(|state| {
            state.questions = cards;
            state.title = title;
        });
    }

    /// Back to the empty state, as when a new PDF is about to be uploaded.
    pub fn reset(&self) {
        self.tx.send_replace(SessionState::default());
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }
}
