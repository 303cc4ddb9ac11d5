use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::VerifierConfig;
use crate::models::SentimentLabel;
use crate::sentiment::{SentimentVerifier, Verification};

/// Confidence assumed when the model replies with a label only.
pub const DEFAULT_REPLY_CONFIDENCE: f64 = 0.7;

const SYSTEM_PROMPT: &str = "You are a sentiment analysis expert. Analyze the sentiment of the given text \
and respond ONLY with one of these exact labels: 'Very Positive', 'Positive', 'Neutral', 'Negative', \
or 'Very Negative'. Also provide a confidence score between 0 and 1 on a new line. \
Format: SENTIMENT\\nCONFIDENCE";

/// Why a verification attempt produced no answer. Never leaves this module;
/// every variant is logged and turned into [`Verification::failed`].
#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("no verifier credential configured")]
    NotConfigured,
    #[error("verifier rejected the credential (HTTP {0})")]
    Unauthorized(u16),
    #[error("verifier returned HTTP {0}")]
    Status(u16),
    #[error("verifier request timed out")]
    Timeout,
    #[error("verifier request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("malformed verifier response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for VerifierError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            VerifierError::Timeout
        } else if err.is_decode() {
            VerifierError::Malformed(err.to_string())
        } else {
            VerifierError::Transport(err)
        }
    }
}

/// Build the verifier described by `config`.
///
/// A disabled verifier, an empty model or an absent credential selects
/// [`DisabledVerifier`]; only a client that cannot be constructed is an error.
pub fn from_config(config: &VerifierConfig) -> Result<Box<dyn SentimentVerifier>> {
    if !config.enabled {
        info!("sentiment verifier disabled by configuration");
        return Ok(Box::new(DisabledVerifier));
    }

    if config.model.trim().is_empty() {
        info!("no verifier model configured; low-confidence results will not be escalated");
        return Ok(Box::new(DisabledVerifier));
    }

    match config.credential() {
        Some(api_key) => {
            let verifier = OpenAiVerifier::new(config, api_key)?;
            info!(model = %config.model, endpoint = %verifier.endpoint, "sentiment verifier configured");
            Ok(Box::new(verifier))
        }
        None => {
            info!("{}; low-confidence results will not be escalated", VerifierError::NotConfigured);
            Ok(Box::new(DisabledVerifier))
        }
    }
}

/// Verifier that always fails; stands in when escalation is not configured.
pub struct DisabledVerifier;

#[async_trait]
impl SentimentVerifier for DisabledVerifier {
    async fn verify(&self, _text: &str) -> Verification {
        debug!("{}", VerifierError::NotConfigured);
        Verification::failed()
    }
}

/// LLM verifier speaking the OpenAI chat-completions protocol.
pub struct OpenAiVerifier {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenAiVerifier {
    pub fn new(config: &VerifierConfig, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base = config.api_url.trim_end_matches('/');
        let base = base.strip_suffix("/v1").unwrap_or(base);

        Ok(Self {
            client,
            endpoint: format!("{base}/v1/chat/completions"),
            model: config.model.clone(),
            api_key: api_key.to_string(),
        })
    }

    async fn request(&self, text: &str) -> Result<Verification, VerifierError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": format!("Analyze the sentiment of this text: {text}") },
            ],
            "temperature": 0.3,
            "max_tokens": 50,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(VerifierError::Unauthorized(status.as_u16()));
        }
        if !status.is_success() {
            return Err(VerifierError::Status(status.as_u16()));
        }

        let data: Value = response.json().await?;
        let content = data
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| VerifierError::Malformed("missing choices[0].message.content".to_string()))?;

        parse_reply(content)
    }
}

#[async_trait]
impl SentimentVerifier for OpenAiVerifier {
    async fn verify(&self, text: &str) -> Verification {
        match self.request(text).await {
            Ok(verification) => {
                info!(
                    label = %verification.label,
                    confidence = verification.confidence,
                    "verifier answered"
                );
                verification
            }
            Err(err) => {
                warn!(error = %err, "sentiment verification failed");
                Verification::failed()
            }
        }
    }
}

/// Parse a `SENTIMENT\nCONFIDENCE` reply.
///
/// The label line is normalized leniently; the confidence line is optional
/// but, when present, must be a number within `[0, 1]`.
pub fn parse_reply(content: &str) -> Result<Verification, VerifierError> {
    let mut lines = content.lines().map(str::trim).filter(|l| !l.is_empty());

    let label_line = lines
        .next()
        .ok_or_else(|| VerifierError::Malformed("empty reply".to_string()))?;
    let label = SentimentLabel::from_free_text(label_line);

    let confidence = match lines.next() {
        Some(raw) => raw
            .parse::<f64>()
            .map_err(|_| VerifierError::Malformed(format!("confidence is not a number: {raw:?}")))?,
        None => DEFAULT_REPLY_CONFIDENCE,
    };

    if !(0.0..=1.0).contains(&confidence) {
        return Err(VerifierError::Malformed(format!(
            "confidence out of range: {confidence}"
        )));
    }

    Ok(Verification::confirmed(label, confidence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> VerifierConfig {
        VerifierConfig {
            api_url: server.uri(),
            api_key: Some("sk-test".to_string()),
            timeout_secs: 1,
            ..VerifierConfig::default()
        }
    }

    fn completion(content: &str) -> Value {
        json!({ "choices": [ { "message": { "role": "assistant", "content": content } } ] })
    }

    #[test]
    fn test_parse_label_and_confidence() {
        let v = parse_reply("Very Negative\n0.92").unwrap();
        assert!(v.success);
        assert_eq!(v.label, SentimentLabel::VeryNegative);
        assert_eq!(v.confidence, 0.92);
    }

    #[test]
    fn test_parse_label_only_uses_default_confidence() {
        let v = parse_reply("  Positive  ").unwrap();
        assert_eq!(v.label, SentimentLabel::Positive);
        assert_eq!(v.confidence, DEFAULT_REPLY_CONFIDENCE);
    }

    #[test]
    fn test_parse_rejects_bad_confidence() {
        assert!(matches!(parse_reply("Neutral\nhigh"), Err(VerifierError::Malformed(_))));
        assert!(matches!(parse_reply("Neutral\n1.4"), Err(VerifierError::Malformed(_))));
        assert!(matches!(parse_reply("Neutral\nNaN"), Err(VerifierError::Malformed(_))));
        assert!(matches!(parse_reply("   \n  "), Err(VerifierError::Malformed(_))));
    }

    #[test]
    fn test_endpoint_normalization() {
        let config = VerifierConfig {
            api_url: "http://localhost:11434/v1/".to_string(),
            ..VerifierConfig::default()
        };
        let verifier = OpenAiVerifier::new(&config, "k").unwrap();
        assert_eq!(verifier.endpoint, "http://localhost:11434/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_verify_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("Negative\n0.81")))
            .expect(1)
            .mount(&server)
            .await;

        let verifier = OpenAiVerifier::new(&config_for(&server), "sk-test").unwrap();
        let v = verifier.verify("The service is okay.").await;
        assert_eq!(v, Verification::confirmed(SentimentLabel::Negative, 0.81));
    }

    #[tokio::test]
    async fn test_verify_unauthorized_fails_softly() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let verifier = OpenAiVerifier::new(&config_for(&server), "sk-test").unwrap();
        assert!(matches!(
            verifier.request("text").await,
            Err(VerifierError::Unauthorized(401))
        ));
        assert!(!verifier.verify("text").await.success);
    }

    #[tokio::test]
    async fn test_verify_malformed_body_fails_softly() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let verifier = OpenAiVerifier::new(&config_for(&server), "sk-test").unwrap();
        assert!(matches!(
            verifier.request("text").await,
            Err(VerifierError::Malformed(_))
        ));
        assert!(!verifier.verify("text").await.success);
    }

    #[tokio::test]
    async fn test_verify_timeout_fails_softly() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("Positive\n0.9"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let verifier = OpenAiVerifier::new(&config_for(&server), "sk-test").unwrap();
        assert!(matches!(verifier.request("text").await, Err(VerifierError::Timeout)));
    }

    #[tokio::test]
    async fn test_disabled_verifier_always_fails() {
        assert!(!DisabledVerifier.verify("anything").await.success);
    }

    #[tokio::test]
    async fn test_from_config_without_credential_is_disabled() {
        let verifier = from_config(&VerifierConfig::default()).unwrap();
        assert_eq!(verifier.verify("text").await, Verification::failed());

        let placeholder = VerifierConfig {
            api_key: Some("your-api-key-here".to_string()),
            ..VerifierConfig::default()
        };
        let verifier = from_config(&placeholder).unwrap();
        assert!(!verifier.verify("text").await.success);
    }

    #[tokio::test]
    async fn test_from_config_with_empty_model_is_disabled() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("Positive\n0.9")))
            .expect(0)
            .mount(&server)
            .await;

        let config = VerifierConfig {
            model: "  ".to_string(),
            ..config_for(&server)
        };
        let verifier = from_config(&config).unwrap();
        assert_eq!(verifier.verify("text").await, Verification::failed());
    }
}
