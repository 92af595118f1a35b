//! HTTP client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::AssistError;
use crate::types::{Content, GenerateRequest, GenerateResponse};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Returned by [`AssistClient::suggest`] when the request fails for any reason.
pub const APOLOGY: &str = "Lo siento, no puedo procesar tu solicitud en este momento.";

/// Returned by [`AssistClient::suggest`] when no API key is configured.
pub const MISSING_KEY_ADVISORY: &str =
    "El asistente no está disponible: configura GEMINI_API_KEY para habilitarlo.";

const SYSTEM_INSTRUCTION: &str = "Eres un asistente de seguros y asistencia vial experto en \
Ecuador. Recomienda solo las categorías: Grúa, Médica, Auxilio Vial, Dental o Seguro.";

fn prompt_for(query: &str) -> String {
    format!(
        "Ayuda al usuario a encontrar el mejor tipo de proveedor para este problema en \
         Ecuador: \"{query}\". Responde de forma muy breve y profesional."
    )
}

/// Client for provider-type suggestions.
///
/// Use [`AssistClient::from_config`] in the binary or
/// [`AssistClient::with_base_url`] to point at a mock server in tests.
pub struct AssistClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    endpoint: Url,
}

impl std::fmt::Debug for AssistClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistClient")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl AssistClient {
    /// Creates a client for `model` served under `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AssistError::InvalidUrl`] if the endpoint
    /// built from `base_url` and `model` does not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        model: &str,
        base_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, AssistError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("asistencia/0.1 (provider-directory)")
            .build()?;

        let raw = format!(
            "{}/v1beta/models/{model}:generateContent",
            base_url.trim_end_matches('/')
        );
        let endpoint = Url::parse(&raw).map_err(|e| AssistError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            model: model.to_owned(),
            endpoint,
        })
    }

    /// Builds a client from application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`AssistClient::with_base_url`].
    pub fn from_config(config: &asistencia_core::AppConfig) -> Result<Self, AssistError> {
        Self::with_base_url(
            config.gemini_api_key.as_deref(),
            &config.assist_model,
            &config.assist_base_url,
            config.assist_timeout_secs,
        )
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Asks the model which provider type fits `query`.
    ///
    /// # Errors
    ///
    /// - [`AssistError::MissingApiKey`] without a key (no request is made).
    /// - [`AssistError::Http`] on network failure.
    /// - [`AssistError::UnexpectedStatus`] for any non-2xx status.
    /// - [`AssistError::Deserialize`] if the body is not the expected JSON.
    /// - [`AssistError::EmptyResponse`] if no candidate carries text.
    pub async fn try_suggest(&self, query: &str) -> Result<String, AssistError> {
        let api_key = self.api_key.as_deref().ok_or(AssistError::MissingApiKey)?;

        let prompt = prompt_for(query);
        let request = GenerateRequest {
            contents: vec![Content::text(&prompt)],
            system_instruction: Content::text(SYSTEM_INSTRUCTION),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        parsed.into_text().ok_or(AssistError::EmptyResponse)
    }

    /// Like [`AssistClient::try_suggest`] but never fails.
    pub async fn suggest(&self, query: &str) -> String {
        match self.try_suggest(query).await {
            Ok(text) => text,
            Err(AssistError::MissingApiKey) => {
                tracing::debug!("assist requested without an API key");
                MISSING_KEY_ADVISORY.to_string()
            }
            Err(e) => {
                tracing::warn!(model = %self.model, error = %e, "assist request failed");
                APOLOGY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_query() {
        let prompt = prompt_for("se me pinchó una llanta");
        assert!(prompt.contains("\"se me pinchó una llanta\""));
        assert!(prompt.starts_with("Ayuda al usuario"));
    }

    #[test]
    fn endpoint_includes_model() {
        let client =
            AssistClient::with_base_url(Some("k"), "gemini-3-flash-preview", DEFAULT_BASE_URL, 5)
                .unwrap();
        assert_eq!(
            client.endpoint.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let client = AssistClient::with_base_url(Some("  "), "m", DEFAULT_BASE_URL, 5).unwrap();
        assert!(!client.has_api_key());
    }

    #[test]
    fn debug_redacts_key() {
        let client = AssistClient::with_base_url(Some("secret-key"), "m", DEFAULT_BASE_URL, 5)
            .unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("secret-key"));
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = AssistClient::with_base_url(None, "m", "not a url", 5).unwrap_err();
        assert!(matches!(err, AssistError::InvalidUrl { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn missing_key_returns_advisory_without_request() {
        // Unroutable base URL: any request attempt would surface as the apology.
        let client = AssistClient::with_base_url(None, "m", "http://127.0.0.1:9", 1).unwrap();
        assert_eq!(client.suggest("grúa").await, MISSING_KEY_ADVISORY);
    }
}
