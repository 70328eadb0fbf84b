use async_trait::async_trait;
use log::{ debug, info };
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };

use super::{ ChatClient, CompletionMessage, CompletionResponse };
use crate::llm::{ LlmConfig, LlmError, LlmType };

const COMPLETIONS_ROUTE: &str = "/v1/chat/completions";

pub struct OpenAIChatClient {
    http: HttpClient,
    provider: LlmType,
    model: String,
    base_url: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: &'a [CompletionMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct OpenAIChatResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIResponseMessage>,
}

#[derive(Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIErrorEnvelope {
    error: Option<OpenAIErrorBody>,
}

#[derive(Deserialize)]
struct OpenAIErrorBody {
    message: Option<String>,
}

impl OpenAIChatClient {
    pub fn new(
        provider: LlmType,
        api_key: &str,
        model: Option<String>,
        base_url: Option<String>,
        max_tokens: u32,
        temperature: f32
    ) -> Result<Self, LlmError> {
        let chat_model = model.unwrap_or_else(|| provider.default_model().to_string());
        let api_url = base_url.unwrap_or_else(|| provider.default_base_url().to_string());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e|
                LlmError::InvalidApiKey(e.to_string())
            )?
        );

        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            provider,
            model: chat_model,
            base_url: api_url,
            max_tokens,
            temperature,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config
            .usable_api_key()
            .ok_or(LlmError::MissingApiKey(config.llm_type))?;

        Self::new(
            config.llm_type,
            api_key,
            config.completion_model.clone(),
            config.base_url.clone(),
            config.max_tokens,
            config.temperature
        )
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), COMPLETIONS_ROUTE)
    }
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn complete(
        &self,
        messages: &[CompletionMessage]
    ) -> Result<CompletionResponse, LlmError> {
        let url = self.endpoint();
        let req = OpenAIChatRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        info!("Sending {} chat completion ({} messages) to {}", self.provider, messages.len(), url);
        let resp = self.http.post(&url).json(&req).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            debug!("{} error body: {}", self.provider, body);
            let message = serde_json
                ::from_str::<OpenAIErrorEnvelope>(&body)
                .ok()
                .and_then(|env| env.error)
                .and_then(|err| err.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("{} API error", self.provider));
            return Err(LlmError::Api { status: status.as_u16(), message });
        }

        let bytes = resp.bytes().await?;
        let parsed: OpenAIChatResponse = serde_json::from_slice(&bytes)?;
        let content = parsed.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|text| text.trim().to_string())
            .unwrap_or_default();

        Ok(CompletionResponse { response: content })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_has_the_expected_shape() {
        let messages = vec![
            CompletionMessage::new("system", "be brief"),
            CompletionMessage::new("user", "hi")
        ];
        let req = OpenAIChatRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
            max_tokens: 500,
            temperature: 0.5,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn defaults_follow_the_provider() {
        let config = LlmConfig {
            llm_type: LlmType::Groq,
            api_key: Some("gsk".into()),
            ..LlmConfig::default()
        };
        let client = OpenAIChatClient::from_config(&config).unwrap();
        assert_eq!(client.get_model(), "llama-3.1-8b-instant");
        assert_eq!(client.endpoint(), "https://api.groq.com/openai/v1/chat/completions");
    }

    #[test]
    fn trailing_slash_on_base_url_is_ignored() {
        let client = OpenAIChatClient::new(
            LlmType::OpenAI,
            "sk",
            None,
            Some("http://127.0.0.1:9999/".into()),
            500,
            0.7
        ).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9999/v1/chat/completions");
    }

    #[test]
    fn missing_key_is_rejected() {
        let err = OpenAIChatClient::from_config(&LlmConfig::default()).err().unwrap();
        assert_eq!(err.to_string(), "OpenAI API key is required");
    }
}
