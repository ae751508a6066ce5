use crate::ai::generator::{parse_quiz_questions, parse_title, QuizError, QuizGenerator};
use crate::models::QuizQuestion;
use async_trait::async_trait;
use openrouter_api::{
    models::provider_preferences::ProviderPreferences,
    models::provider_preferences::ProviderSort,
    types::chat::{ChatCompletionRequest, Message},
};
use serde::Serialize;

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

const QUIZ_SYSTEM_PROMPT: &str = "You are a teacher. Your job is to take a document and create a \
multiple choice test with 4 questions based on its content. Each question has 4 options of \
roughly equal length and exactly one of them is correct.";

const TITLE_SYSTEM_PROMPT: &str = "You name quizzes. Reply with the title only.";

#[derive(Debug)]
pub struct OpenRouterClient {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
    config: ModelConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelConfig {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }
}

fn quiz_prompt(document: &str) -> String {
    format!(
        r#"Create a multiple choice quiz from the document below and respond ONLY with valid JSON.

Document:
{}

IMPORTANT:

- Respond ONLY with this exact JSON structure (no markdown, no extra text):
{{
    "questions": [
        {{
            "question": "question text",
            "options": ["option A", "option B", "option C", "option D"],
            "answer": "A"
        }}
    ]
}}
- There must be exactly 4 questions, each with exactly 4 options.
- "answer" is the letter of the correct option: "A" for the first, "B" for the second, and so on.
"#,
        document
    )
}

fn title_prompt(file_name: &str) -> String {
    format!(
        "Generate a quiz title based on the following file name. Try to extract as much info \
from the file name as possible. If the file name is just numbers or incoherent, return \"Quiz\". \
Use at most three words.\n\nFile name: {}",
        file_name
    )
}

impl OpenRouterClient {
    /// Reads the API key from `OPENROUTER_API_KEY`.
    pub fn new(config: ModelConfig) -> Result<Self, QuizError> {
        let client = openrouter_api::OpenRouterClient::quick()
            .map_err(|e| QuizError::Api(format!("Failed to create OpenRouter client: {}", e)))?;

        Ok(Self { client, config })
    }

    async fn complete(&self, system: &str, prompt: &str) -> Result<String, QuizError> {
        let messages = vec![Message::text("system", system), Message::text("user", prompt)];

        let provider = ProviderPreferences::new().with_sort(ProviderSort::Throughput);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            provider: Some(provider),
            stream: None,
            response_format: None,
            tools: None,
            tool_choice: None,
            models: None,
            transforms: None,
            route: None,
            user: None,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: None,
            top_k: None,
            frequency_penalty: None,
            presence_penalty: None,
            repetition_penalty: None,
            min_p: None,
            top_a: None,
            seed: None,
            stop: None,
            logit_bias: None,
            logprobs: None,
            top_logprobs: None,
            prediction: None,
            parallel_tool_calls: None,
            verbosity: None,
        };

        let response = self
            .client
            .chat()
            .map_err(|e| QuizError::Api(e.to_string()))?
            .chat_completion(request)
            .await
            .map_err(|e| QuizError::Api(format!("OpenRouter API error: {}", e)))?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| QuizError::Api("No response choices received".to_string()))?;

        match &choice.message.content {
            openrouter_api::MessageContent::Text(text) => Ok(text.clone()),
            openrouter_api::MessageContent::Parts(parts) => {
                let text_parts: Vec<String> = parts
                    .iter()
                    .filter_map(|p| {
                        if let openrouter_api::ContentPart::Text(tc) = p {
                            Some(tc.text.clone())
                        } else {
                            None
                        }
                    })
                    .collect();
                Ok(text_parts.join("\n"))
            }
        }
    }
}

#[async_trait]
impl QuizGenerator for OpenRouterClient {
    async fn generate_quiz(&self, document: &str) -> Result<Vec<QuizQuestion>, QuizError> {
        crate::logger::log(&format!(
            "Requesting quiz from {} ({} characters)",
            self.config.model,
            document.len()
        ));
        let response = self.complete(QUIZ_SYSTEM_PROMPT, &quiz_prompt(document)).await?;
        crate::logger::log(&format!("Raw quiz response: {}", response));
        parse_quiz_questions(&response)
    }

    async fn generate_title(&self, file_name: &str) -> Result<String, QuizError> {
        let response = self
            .complete(TITLE_SYSTEM_PROMPT, &title_prompt(file_name))
            .await?;
        parse_title(&response).ok_or(QuizError::EmptyTitle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_prompt_embeds_document() {
        let prompt = quiz_prompt("Cells are the basic unit of life.");
        assert!(prompt.contains("Cells are the basic unit of life."));
        assert!(prompt.contains("exactly 4 questions"));
        assert!(prompt.contains(r#""answer": "A""#));
    }

    #[test]
    fn test_title_prompt_embeds_file_name() {
        assert!(title_prompt("cell-biology-ch3.pdf").contains("File name: cell-biology-ch3.pdf"));
    }

    #[test]
    fn test_model_config_serialization_skips_none() {
        let config = ModelConfig {
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            max_tokens: Some(100),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("temperature"));
        assert!(json.contains("\"max_tokens\":100"));
    }
}
