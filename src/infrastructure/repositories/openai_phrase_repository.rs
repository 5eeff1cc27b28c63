use super::phrase_repository::PhraseRepository;
use crate::domain::speaker::Language;
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Moderate temperature keeps sentences varied without drifting off the reading-time target
const TEMPERATURE: f32 = 0.6;

const SYSTEM_PROMPT: &str = "You are a creative assistant generating short, natural-sounding \
sentences for a voice recording application. Reply with the sentence only.";

/// OpenAI chat-completions implementation of the phrase repository
pub struct OpenAiPhraseRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiPhraseRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }
}

/// Prompt asking for one sentence readable aloud in 8-15 seconds
pub fn build_prompt(language: Language) -> String {
    let example = match language {
        Language::Sinhala => {
            "අහස නිල් පාටයි, සමහර වලාකුළු සුදු පාටයි, ඒ වගේම හිරු එළිය දීප්තිමත්ව බබලනවා."
        }
        Language::Tamil => {
            "வானம் நீல நிறமாகவும், சில மேகங்கள் வெண்மையாகவும், சூரியன் பிரகாசமாகவும் பிரகாசிக்கிறது."
        }
        Language::English => {
            "The sky is blue, a few clouds drift slowly past, and the morning sun shines brightly."
        }
    };

    format!(
        "Write one sentence in {language}.\n\
         It must be suitable for a native speaker to read aloud in approximately 8 to 15 seconds.\n\
         It should be grammatically correct, common and easy to understand. Avoid complex jargon, \
         proper nouns (unless very common like a country name) and overly specific topics.\n\
         Generate only one sentence.\n\n\
         Example: \"{example}\"",
        language = language,
        example = example
    )
}

#[async_trait]
impl PhraseRepository for OpenAiPhraseRepository {
    async fn generate(&self, language: Language) -> Result<String, String> {
        tracing::info!(model = %self.model, language = %language, "Requesting reading phrase");

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(TEMPERATURE)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_PROMPT)
                    .build()
                    .map_err(|e| format!("Failed to build prompt: {}", e))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(build_prompt(language))
                    .build()
                    .map_err(|e| format!("Failed to build prompt: {}", e))?
                    .into(),
            ])
            .build()
            .map_err(|e| format!("Failed to build request: {}", e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(error = %e, "OpenAI phrase generation failed");
            format!("OpenAI API error: {}", e)
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| "OpenAI returned no phrase".to_string())
    }
}
