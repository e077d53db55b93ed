//! Caption generation via the OpenAI chat completions API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capabilities::CaptionGenerator;
use crate::error::{ApiError, ApiResult};

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = r#"You are a viral social media copywriter for TikTok and Instagram Reels.
Your job: write short, engaging captions that maximize views, shares, and engagement.

Rules:
- Generate:
  - "es": caption in Spanish (1-2 sentences + line break + 5-8 viral hashtags in Spanish)
  - "en": caption in English (1-2 sentences + line break + 5-8 viral hashtags in English)
  - "title": a short catchy title for TikTok (max 70 chars, in English, no hashtags)
- Use emojis naturally (2-4 per caption)
- Hashtags must be SEO-optimized, mixing high-volume and niche tags
- Never use generic filler — every word should hook the viewer
- Keep captions under 200 characters (before hashtags)
- Respond with JSON: { "es": "...", "en": "...", "title": "..." }"#;

/// One generated caption set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCaption {
    #[serde(default)]
    pub es: String,
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub title: String,
}

/// OpenAI-backed caption generator.
#[derive(Debug, Clone)]
pub struct OpenAiCaptionClient {
    http: Client,
    api_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: &'static str,
    temperature: f64,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiCaptionClient {
    /// Create a client with an explicit key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from `OPENAI_API_KEY`.
    pub fn from_env() -> ApiResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| ApiError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    fn build_user_prompt(title: &str, existing: &[String]) -> String {
        let mut prompt = format!(
            "Generate a unique viral caption (ES + EN) and TikTok title for this video: \"{}\"",
            title
        );
        if !existing.is_empty() {
            prompt.push_str(
                "\nIMPORTANT: These captions were already used for this same video. \
                 You MUST write something completely different — different wording, \
                 different angle, different hashtags:\n",
            );
            for (i, caption) in existing.iter().enumerate() {
                prompt.push_str(&format!("{}. {}\n", i + 1, caption));
            }
        }
        prompt
    }
}

#[async_trait]
impl CaptionGenerator for OpenAiCaptionClient {
    async fn generate(
        &self,
        display_name: &str,
        existing: &[String],
    ) -> ApiResult<GeneratedCaption> {
        let title = build_video_title(display_name);
        let request = ChatRequest {
            model: MODEL,
            temperature: 0.9,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::build_user_prompt(&title, existing),
                },
            ],
        };

        let resp = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::from_status_body(status.as_u16(), &body));
        }

        let chat: ChatResponse = resp.json().await?;
        let content = chat
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .unwrap_or("{}");

        let caption: GeneratedCaption = serde_json::from_str(content)
            .map_err(|e| ApiError::InvalidResponse(format!("caption JSON: {}", e)))?;

        debug!(title = %title, "Caption generated");
        Ok(caption)
    }
}

/// Normalize a filename into a prompt title: strip the extension, turn
/// dashes/underscores into spaces.
pub fn build_video_title(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains(' ') => stem,
        _ => file_name,
    };
    stem.chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
