use crate::ai::QUESTION_COUNT;
use crate::logger;
use crate::models::{AiResponse, Route, StudyCard};
use crate::modes::{FetchOutcome, FillBlankRound, FlashcardDeck, MatchingGame};
use crate::pdf::{file_label, get_pdf_files, validate_pdf};
use crate::store::SessionStore;
use crate::utils::option_index;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::Instant;

pub const STUDY_MODES: [Route; 3] = [Route::Flashcards, Route::Matching, Route::FillInBlank];

const QUIZ_FAILED_MESSAGE: &str = "Failed to generate quiz. Please try again.";
const WORKER_STOPPED_MESSAGE: &str =
    "The AI worker stopped. Restart the app to generate quizzes or fill-in-the-blank questions.";

/// What the event loop has to do after a key or worker response.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    None,
    Quit,
    GenerateQuiz(PathBuf),
    FetchFillBlank {
        ticket: u64,
        questions: Vec<StudyCard>,
    },
}

#[derive(Debug)]
pub struct App {
    pub route: Route,
    pub store: SessionStore,
    pub pdf_dir: PathBuf,
    pub pdf_files: Vec<PathBuf>,
    pub selected_file_index: usize,
    /// File handed to the generator; cleared when generation fails.
    pub chosen_file: Option<PathBuf>,
    pub generating: bool,
    /// Model used for quiz generation; `None` when no API key is configured.
    pub ai_model: Option<String>,
    /// Opaque identifier of the active quiz (the PDF's name).
    pub session_id: Option<String>,
    pub mode_index: usize,
    pub flashcards: FlashcardDeck,
    pub matching: MatchingGame,
    pub fill_blank: FillBlankRound,
    pub notification: Option<String>,
    /// False once the AI worker thread is gone.
    pub worker_alive: bool,
    rng: StdRng,
}

impl App {
    pub fn new(store: SessionStore, pdf_dir: PathBuf, mut rng: StdRng) -> Self {
        let pdf_files = get_pdf_files(&pdf_dir);
        Self {
            route: Route::Home,
            store,
            pdf_dir,
            pdf_files,
            selected_file_index: 0,
            chosen_file: None,
            generating: false,
            ai_model: None,
            session_id: None,
            mode_index: 0,
            flashcards: FlashcardDeck::new(),
            matching: MatchingGame::new(&[], &mut rng),
            fill_blank: FillBlankRound::new(),
            notification: None,
            worker_alive: true,
            rng,
        }
    }

    pub fn refresh_files(&mut self) {
        self.pdf_files = get_pdf_files(&self.pdf_dir);
        self.selected_file_index = self
            .selected_file_index
            .min(self.pdf_files.len().saturating_sub(1));
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        logger::log(&format!("Notification: {}", message));
        self.notification = Some(message);
    }

    /// The worker channel closed. Anything waiting on it is abandoned and
    /// further AI work is refused; the loaded quiz stays usable.
    pub fn worker_stopped(&mut self) {
        if !self.worker_alive {
            return;
        }
        self.worker_alive = false;
        self.generating = false;
        self.chosen_file = None;
        if self.route == Route::FillInBlank && self.fill_blank.exercise.is_none() {
            self.navigate(Route::ModeSelect);
        }
        self.fill_blank.clear();
        self.notify(WORKER_STOPPED_MESSAGE);
    }

    /// Switch views. Study views need questions; without them the user
    /// lands back on the home view.
    pub fn navigate(&mut self, route: Route) -> AppCommand {
        let route = if route.is_study_mode() && !self.store.has_questions() {
            logger::log(&format!(
                "No questions loaded, redirecting {} to home",
                route.name()
            ));
            Route::Home
        } else if route == Route::FillInBlank && !self.worker_alive {
            self.notify(WORKER_STOPPED_MESSAGE);
            Route::ModeSelect
        } else {
            route
        };

        if self.route == Route::FillInBlank && route != Route::FillInBlank {
            self.fill_blank.clear();
        }
        self.route = route;

        match route {
            Route::Flashcards => {
                self.flashcards.reset();
                AppCommand::None
            }
            Route::Matching => {
                let questions = self.store.questions();
                self.matching = MatchingGame::new(&questions, &mut self.rng);
                AppCommand::None
            }
            Route::FillInBlank => {
                self.fill_blank.clear();
                self.request_fill_blank()
            }
            Route::Home | Route::ModeSelect => AppCommand::None,
        }
    }

    /// Leave the active quiz to upload another PDF.
    pub fn return_home(&mut self) -> AppCommand {
        self.store.reset();
        self.chosen_file = None;
        self.session_id = None;
        self.mode_index = 0;
        self.refresh_files();
        self.navigate(Route::Home)
    }

    fn request_fill_blank(&mut self) -> AppCommand {
        match self.fill_blank.begin_request() {
            Some(ticket) => AppCommand::FetchFillBlank {
                ticket,
                questions: self.store.questions(),
            },
            None => AppCommand::None,
        }
    }

    pub fn handle_ai_response(&mut self, response: AiResponse) -> AppCommand {
        match response {
            AiResponse::QuizReady { questions, title } => {
                self.generating = false;
                if questions.len() != QUESTION_COUNT {
                    self.chosen_file = None;
                    self.notify(QUIZ_FAILED_MESSAGE);
                    return AppCommand::None;
                }
                self.store.load_quiz(&questions, title);
                self.session_id = self.chosen_file.as_deref().map(file_label);
                self.navigate(Route::ModeSelect)
            }
            AiResponse::QuizFailed { error } => {
                self.generating = false;
                self.chosen_file = None;
                logger::log(&format!("Quiz generation failed: {}", error));
                self.notify(QUIZ_FAILED_MESSAGE);
                AppCommand::None
            }
            AiResponse::FillBlank { ticket, result } => {
                let error = result.as_ref().err().cloned();
                match self.fill_blank.apply_response(ticket, result) {
                    FetchOutcome::Applied | FetchOutcome::Stale => AppCommand::None,
                    FetchOutcome::KeptPrevious => {
                        self.notify("Could not load a new question. Keeping the current one.");
                        AppCommand::None
                    }
                    FetchOutcome::Unavailable => {
                        self.notify(format!(
                            "Could not build a fill-in-the-blank question: {}",
                            error.unwrap_or_default()
                        ));
                        self.navigate(Route::ModeSelect)
                    }
                }
            }
        }
    }

    /// Time-driven updates. Returns true when a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.route == Route::Matching && self.matching.tick(now)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppCommand {
        if key.kind != KeyEventKind::Press {
            return AppCommand::None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return AppCommand::Quit;
        }
        if self.notification.take().is_some() {
            return AppCommand::None;
        }

        match self.route {
            Route::Home => self.handle_home_key(key.code),
            Route::ModeSelect => self.handle_mode_select_key(key.code),
            Route::Flashcards => self.handle_flashcards_key(key.code),
            Route::Matching => self.handle_matching_key(key.code),
            Route::FillInBlank => self.handle_fill_blank_key(key.code),
        }
    }

    fn handle_home_key(&mut self, code: KeyCode) -> AppCommand {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => AppCommand::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_file_index = self.selected_file_index.saturating_sub(1);
                AppCommand::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_file_index < self.pdf_files.len().saturating_sub(1) {
                    self.selected_file_index += 1;
                }
                AppCommand::None
            }
            KeyCode::Char('r') if !self.generating => {
                self.refresh_files();
                AppCommand::None
            }
            KeyCode::Enter if !self.generating => {
                if self.ai_model.is_none() {
                    self.notify("AI is disabled. Set OPENROUTER_API_KEY to generate quizzes.");
                    return AppCommand::None;
                }
                if !self.worker_alive {
                    self.notify(WORKER_STOPPED_MESSAGE);
                    return AppCommand::None;
                }
                let Some(path) = self.pdf_files.get(self.selected_file_index).cloned() else {
                    return AppCommand::None;
                };
                if let Err(e) = validate_pdf(&path) {
                    self.chosen_file = None;
                    self.notify(format!("Only PDF files under 5MB are allowed. ({})", e));
                    return AppCommand::None;
                }
                self.chosen_file = Some(path.clone());
                self.generating = true;
                AppCommand::GenerateQuiz(path)
            }
            _ => AppCommand::None,
        }
    }

    fn handle_mode_select_key(&mut self, code: KeyCode) -> AppCommand {
        match code {
            KeyCode::Char('q') => AppCommand::Quit,
            KeyCode::Esc | KeyCode::Char('b') => self.return_home(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.mode_index = self.mode_index.saturating_sub(1);
                AppCommand::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.mode_index < STUDY_MODES.len() - 1 {
                    self.mode_index += 1;
                }
                AppCommand::None
            }
            KeyCode::Enter => self.navigate(STUDY_MODES[self.mode_index]),
            _ => AppCommand::None,
        }
    }

    fn handle_flashcards_key(&mut self, code: KeyCode) -> AppCommand {
        let total = self.store.questions().len();
        match code {
            KeyCode::Esc | KeyCode::Char('b') => return self.navigate(Route::ModeSelect),
            KeyCode::Char(' ') | KeyCode::Enter => self.flashcards.flip(&self.store),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => {
                self.flashcards.next(&self.store, total);
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => {
                self.flashcards.previous(&self.store);
            }
            KeyCode::Char('r') => self.flashcards.reset(),
            _ => {}
        }
        AppCommand::None
    }

    fn handle_matching_key(&mut self, code: KeyCode) -> AppCommand {
        match code {
            KeyCode::Esc | KeyCode::Char('b') => return self.navigate(Route::ModeSelect),
            KeyCode::Char('r') => {
                let questions = self.store.questions();
                self.matching.reset(&questions, &mut self.rng);
            }
            KeyCode::Char(c) => {
                if let Some(index) = option_index(c) {
                    self.matching.click(index, &self.store, Instant::now());
                }
            }
            _ => {}
        }
        AppCommand::None
    }

    fn handle_fill_blank_key(&mut self, code: KeyCode) -> AppCommand {
        match code {
            KeyCode::Esc | KeyCode::Char('b') => self.navigate(Route::ModeSelect),
            KeyCode::Char('r') => self.request_fill_blank(),
            KeyCode::Char('n') | KeyCode::Enter if self.fill_blank.is_correct() => {
                self.request_fill_blank()
            }
            KeyCode::Char(c) => {
                let word = option_index(c).and_then(|i| {
                    self.fill_blank
                        .exercise
                        .as_ref()
                        .and_then(|e| e.options.get(i).cloned())
                });
                if let Some(word) = word {
                    self.fill_blank.click(&word);
                }
                AppCommand::None
            }
            _ => AppCommand::None,
        }
    }
}
