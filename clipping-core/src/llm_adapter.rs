use crate::types::{ClassifierConfig, ClippingError, Result, SentimentLabel};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// Backend able to label a piece of text with a sentiment.
#[async_trait]
pub trait SentimentBackend: Send + Sync {
    /// Get the name of this backend
    fn backend_name(&self) -> String;

    /// Return the raw label chosen by the backend. Mapping the label onto the
    /// domain enumeration is the caller's job.
    async fn classify_label(&self, text: &str) -> Result<String>;
}

/// Build the instruction sent with every request.
pub fn sentiment_prompt(text: &str) -> String {
    let labels: Vec<&str> = SentimentLabel::ALL.iter().map(|label| label.label()).collect();
    format!(
        "Analise o sentimento do seguinte texto. Responda APENAS com um objeto JSON no formato \
         {{\"sentiment\": \"Sentimento\"}}, onde \"Sentimento\" pode ser {}. Se o sentimento for \
         ambíguo ou não puder ser determinado, responda com '{}'.\n\nTexto para análise:\n```\n{}\n```",
        labels
            .iter()
            .map(|label| format!("'{}'", label))
            .collect::<Vec<_>>()
            .join(", "),
        SentimentLabel::Neutral.label(),
        text
    )
}

/// JSON schema restricting the response to `{"sentiment": <label>}`.
pub fn response_schema() -> Value {
    let labels: Vec<&str> = SentimentLabel::ALL.iter().map(|label| label.label()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "sentiment": {
                "type": "STRING",
                "enum": labels,
                "description": "O sentimento do texto."
            }
        },
        "required": ["sentiment"]
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// The structured verdict the schema asks for.
#[derive(Debug, Deserialize)]
struct SentimentVerdict {
    sentiment: String,
}

/// Google Generative Language backend (`models/{model}:generateContent`).
pub struct GeminiBackend {
    client: Client,
    config: ClassifierConfig,
}

impl GeminiBackend {
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        let config = config.validated()?;
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model_name
        )
    }

    fn build_request(&self, text: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: sentiment_prompt(text),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
                temperature: self.config.temperature,
            },
        }
    }
}

#[async_trait]
impl SentimentBackend for GeminiBackend {
    fn backend_name(&self) -> String {
        format!("Gemini ({})", self.config.model_name)
    }

    async fn classify_label(&self, text: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ClippingError::MissingApiKey)?;

        debug!("Requesting sentiment from {} ({} chars)", self.endpoint(), text.len());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&self.build_request(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClippingError::BackendStatus {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ClippingError::MalformedResponse(e.to_string()))?;

        let raw = payload
            .candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .find_map(|part| part.text)
            .ok_or_else(|| ClippingError::MalformedResponse("response has no text part".to_string()))?;

        parse_verdict(&raw)
    }
}

/// Extract the label from the JSON text the model produced.
pub fn parse_verdict(raw: &str) -> Result<String> {
    let verdict: SentimentVerdict = serde_json::from_str(raw.trim())
        .map_err(|e| ClippingError::MalformedResponse(format!("{}: {}", e, raw.trim())))?;
    Ok(verdict.sentiment)
}

/// Offline backend for development and testing
pub struct MockSentimentBackend {
    name: String,
    response_delay_ms: u64,
    calls: AtomicUsize,
}

impl MockSentimentBackend {
    pub fn new(name: String) -> Self {
        Self {
            name,
            response_delay_ms: 100, // Simulate network latency
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.response_delay_ms = delay_ms;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn simulate_processing(&self) {
        if self.response_delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.response_delay_ms)).await;
        }
    }
}

const POSITIVE_CUES: &[&str] = &[
    "ótimo", "otimo", "excelente", "sucesso", "recorde", "crescimento", "parabéns", "amei",
    "inovação", "conquista", "great", "growth", "success",
];
const NEGATIVE_CUES: &[&str] = &[
    "péssimo", "pessimo", "crise", "queda", "prejuízo", "falha", "reclamação", "problema",
    "denúncia", "multa", "bad", "failure", "loss",
];

#[async_trait]
impl SentimentBackend for MockSentimentBackend {
    fn backend_name(&self) -> String {
        format!("Mock Sentiment Backend ({})", self.name)
    }

    async fn classify_label(&self, text: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_processing().await;

        let lowered = text.to_lowercase();
        let positive = POSITIVE_CUES.iter().filter(|cue| lowered.contains(*cue)).count();
        let negative = NEGATIVE_CUES.iter().filter(|cue| lowered.contains(*cue)).count();

        let label = if positive > negative {
            SentimentLabel::Positive
        } else if negative > positive {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        info!("Mock backend labelled text as {}", label.label());
        Ok(label.label().to_string())
    }
}
