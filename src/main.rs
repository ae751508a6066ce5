use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pdf_study::{
    ai::{OpenRouterClient, QuizGenerator},
    ai_worker::spawn_ai_worker,
    app::{App, AppCommand},
    config::AppConfig,
    logger,
    models::{AiRequest, AiResponse},
    store::SessionStore,
    ui,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

const TICK_RATE: Duration = Duration::from_millis(100);

fn main() -> anyhow::Result<()> {
    logger::init();
    let config = AppConfig::from_env().map_err(anyhow::Error::msg)?;

    let generator: Option<Arc<dyn QuizGenerator>> =
        match OpenRouterClient::new(config.model.clone()) {
            Ok(client) => Some(Arc::new(client) as Arc<dyn QuizGenerator>),
            Err(e) => {
                logger::log(&format!("AI disabled: {}", e));
                None
            }
        };

    let (req_tx, req_rx) = mpsc::channel::<AiRequest>();
    let (resp_tx, resp_rx) = mpsc::channel::<AiResponse>();
    let ai_enabled = generator.is_some();
    spawn_ai_worker(resp_tx, req_rx, generator).context("Failed to start AI worker")?;

    let mut app = App::new(
        SessionStore::new(),
        config.pdf_dir.clone(),
        StdRng::from_entropy(),
    );
    if ai_enabled {
        app.ai_model = Some(config.model.model.clone());
    }
    logger::log(&format!(
        "Starting with {} PDF files in {}",
        app.pdf_files.len(),
        config.pdf_dir.display()
    ));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Panics on the worker thread are turned into failure responses; keep their
    // reports in the log instead of on top of the alternate screen.
    panic::set_hook(Box::new(|info| logger::log(&format!("Panic: {}", info))));

    let result = run(&mut terminal, &mut app, &req_tx, &resp_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    let _ = panic::take_hook();

    if let Err(e) = &result {
        logger::log(&format!("Exited with error: {:#}", e));
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    req_tx: &Sender<AiRequest>,
    resp_rx: &Receiver<AiResponse>,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(TICK_RATE)?
            && let Event::Key(key) = event::read()?
        {
            let command = app.handle_key(key);
            if !dispatch(command, req_tx, app) {
                return Ok(());
            }
        }

        loop {
            match resp_rx.try_recv() {
                Ok(response) => {
                    let command = app.handle_ai_response(response);
                    dispatch(command, req_tx, app);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    app.worker_stopped();
                    break;
                }
            }
        }

        app.tick(Instant::now());
    }
}

/// Forward a command to the worker. Returns false when the app should exit.
fn dispatch(command: AppCommand, req_tx: &Sender<AiRequest>, app: &mut App) -> bool {
    let request = match command {
        AppCommand::None => return true,
        AppCommand::Quit => return false,
        AppCommand::GenerateQuiz(path) => AiRequest::GenerateQuiz { path },
        AppCommand::FetchFillBlank { ticket, questions } => {
            AiRequest::FillBlank { ticket, questions }
        }
    };

    if req_tx.send(request).is_err() {
        app.worker_stopped();
    }
    true
}
