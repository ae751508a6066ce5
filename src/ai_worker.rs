use crate::ai::QuizGenerator;
use crate::blanks::synthesize;
use crate::logger;
use crate::models::{AiRequest, AiResponse, QuizQuestion};
use crate::pdf;
use std::future::Future;
use std::path::Path;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread;

pub fn spawn_ai_worker(
    ai_tx: Sender<AiResponse>,
    ai_rx: Receiver<AiRequest>,
    generator: Option<Arc<dyn QuizGenerator>>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("pdf-study::ai_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    logger::log(&format!("Worker failed to start runtime: {}", e));
                    return;
                }
            };

            while let Ok(request) = ai_rx.recv() {
                let response = rt.block_on(handle_request_isolated(generator.clone(), request));
                if ai_tx.send(response).is_err() {
                    break;
                }
            }
            // Channel disconnected, exit worker
            logger::log("Worker channel disconnected, exiting");
        })
}

pub async fn handle_request(
    generator: Option<&dyn QuizGenerator>,
    request: AiRequest,
) -> AiResponse {
    match request {
        AiRequest::GenerateQuiz { path } => {
            logger::log(&format!("Worker received quiz request for {}", path.display()));
            let Some(generator) = generator else {
                return AiResponse::QuizFailed {
                    error: "AI is disabled".to_string(),
                };
            };
            quiz_response(generate_from_pdf(generator, &path).await)
        }
        AiRequest::FillBlank { ticket, questions } => {
            let result =
                synthesize(&questions, &mut rand::thread_rng()).map_err(|e| e.to_string());
            if let Err(e) = &result {
                logger::log(&format!("Fill-in-the-blank request {} failed: {}", ticket, e));
            }
            AiResponse::FillBlank { ticket, result }
        }
    }
}

/// Run one request as its own task so a panic inside it (a broken PDF, a
/// misbehaving client) becomes a failure response instead of killing the worker.
pub async fn handle_request_isolated(
    generator: Option<Arc<dyn QuizGenerator>>,
    request: AiRequest,
) -> AiResponse {
    let fallback = failure_for(&request, "AI worker crashed while handling the request");
    isolate(fallback, async move { handle_request(generator.as_deref(), request).await }).await
}

async fn isolate<F>(fallback: AiResponse, work: F) -> AiResponse
where
    F: Future<Output = AiResponse> + Send + 'static,
{
    match tokio::spawn(work).await {
        Ok(response) => response,
        Err(e) => {
            logger::log(&format!("Worker task failed: {}", e));
            fallback
        }
    }
}

fn failure_for(request: &AiRequest, error: &str) -> AiResponse {
    match request {
        AiRequest::GenerateQuiz { .. } => AiResponse::QuizFailed {
            error: error.to_string(),
        },
        AiRequest::FillBlank { ticket, .. } => AiResponse::FillBlank {
            ticket: *ticket,
            result: Err(error.to_string()),
        },
    }
}

fn quiz_response(result: Result<(Vec<QuizQuestion>, Option<String>), String>) -> AiResponse {
    match result {
        Ok((questions, title)) => AiResponse::QuizReady { questions, title },
        Err(error) => {
            logger::log(&format!("Worker error: {}", error));
            AiResponse::QuizFailed { error }
        }
    }
}

async fn generate_from_pdf(
    generator: &dyn QuizGenerator,
    path: &Path,
) -> Result<(Vec<QuizQuestion>, Option<String>), String> {
    let document = pdf::extract_text(path).map_err(|e| e.to_string())?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    build_quiz(generator, &document, &file_name).await
}

/// Ask for the quiz, then its title. A failed title is not fatal.
pub async fn build_quiz(
    generator: &dyn QuizGenerator,
    document: &str,
    file_name: &str,
) -> Result<(Vec<QuizQuestion>, Option<String>), String> {
    let questions = generator
        .generate_quiz(document)
        .await
        .map_err(|e| e.to_string())?;

    let title = match generator.generate_title(file_name).await {
        Ok(title) => Some(title),
        Err(e) => {
            logger::log(&format!("Title generation failed for {}: {}", file_name, e));
            None
        }
    };

    Ok((questions, title))
}
