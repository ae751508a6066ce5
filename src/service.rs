//! HTTP boundary for the fill-in-the-blank synthesizer.

use crate::blanks::{synthesize, SynthesisError};
use crate::logger;
use crate::models::{FillInBlankExercise, StudyCard};
use axum::{http::StatusCode, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};

pub const FILL_BLANK_PATH: &str = "/api/get-fillintheblanks";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillBlankRequest {
    pub questions: Vec<StudyCard>,
}

pub fn router() -> Router {
    Router::new().route(FILL_BLANK_PATH, post(get_fill_in_the_blanks))
}

/// POST /api/get-fillintheblanks
pub async fn get_fill_in_the_blanks(
    Json(request): Json<FillBlankRequest>,
) -> Result<Json<FillInBlankExercise>, (StatusCode, String)> {
    let result = synthesize(&request.questions, &mut rand::thread_rng());
    match result {
        Ok(exercise) => Ok(Json(exercise)),
        Err(e) => {
            logger::log(&format!(
                "Rejected fill-in-the-blank request with {} questions: {}",
                request.questions.len(),
                e
            ));
            Err((status_for(&e), e.to_string()))
        }
    }
}

fn status_for(error: &SynthesisError) -> StatusCode {
    match error {
        SynthesisError::EmptyPool | SynthesisError::NoQualifyingQuestion => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> FillBlankRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_request_accepts_wire_shape() {
        let req = request(
            r#"{"questions":[{"question":"The mitochondria is the powerhouse of the cell","options":["mitochondria","nucleus","ribosome","ATP"],"answer":"A"}]}"#,
        );
        assert_eq!(req.questions[0].options.len(), 4);
        assert_eq!(req.questions[0].answer, "A");
    }

    #[tokio::test]
    async fn test_handler_success() {
        let req = request(
            r#"{"questions":[{"question":"The mitochondria is the powerhouse of the cell","options":["mitochondria","nucleus","ribosome","ATP"],"answer":"A"}]}"#,
        );
        let Json(exercise) = get_fill_in_the_blanks(Json(req)).await.unwrap();
        assert_eq!(exercise.answer, "mitochondria powerhouse");
        assert_eq!(exercise.question.matches("___").count(), 2);

        let body = serde_json::to_value(&exercise).unwrap();
        assert!(body.get("question").is_some());
        assert!(body.get("answer").is_some());
        assert!(body["options"].is_array());
    }

    #[tokio::test]
    async fn test_handler_empty_pool() {
        let req = FillBlankRequest { questions: vec![] };
        let (status, message) = get_fill_in_the_blanks(Json(req)).await.unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(message.contains("no questions"));
    }

    #[tokio::test]
    async fn test_handler_no_qualifying_question() {
        let req = request(r#"{"questions":[{"question":"A cat sat","options":[],"answer":"A"}]}"#);
        let (status, _) = get_fill_in_the_blanks(Json(req)).await.unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_router_builds() {
        let _ = router();
    }
}
