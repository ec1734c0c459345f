use crate::lead_prompt::build_lead_prompt;
use crate::llm::{GenerateContentRequest, GenerateContentResponse, LlmClient};
use extractors::{normalize_leads, ResponseExtractor};
use shared_types::{LeadGenError, LeadSearchResult, SearchParams, Source};
use std::sync::Arc;

/// Low temperature keeps the structured output stable between runs.
pub const LEAD_SEARCH_TEMPERATURE: f64 = 0.1;

/// Runs one search-grounded lead request and turns the answer into typed results.
pub struct LeadGenerator {
    llm_client: Arc<dyn LlmClient>,
    model: String,
    extractor: ResponseExtractor,
}

impl LeadGenerator {
    pub fn new(llm_client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            llm_client,
            model: model.into(),
            extractor: ResponseExtractor::with_defaults(),
        }
    }

    /// Issues exactly one request. Niche, city and country are validated by the caller.
    pub async fn generate_leads(
        &self,
        params: &SearchParams,
        credential: &str,
    ) -> Result<LeadSearchResult, LeadGenError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(LeadGenError::MissingCredential);
        }

        let request =
            GenerateContentRequest::grounded(build_lead_prompt(params), LEAD_SEARCH_TEMPERATURE);

        tracing::info!(
            niche = %params.niche,
            city = %params.city,
            country = %params.country,
            count = params.number_of_leads,
            model = %self.model,
            "Requesting leads"
        );

        let response = self
            .llm_client
            .generate_content(&self.model, credential, &request)
            .await
            .map_err(|e| {
                tracing::error!("Error generating leads from Gemini: {}", e);
                classify_service_error(&e.to_string())
            })?;

        let sources = collect_sources(&response);

        let text = response.text().ok_or(LeadGenError::EmptyResponse)?;
        let value = self.extractor.extract(&text).inspect_err(|_| {
            tracing::error!("Final parsing attempt failed. Response was: {}", text);
        })?;
        let leads = normalize_leads(&value)?;

        tracing::info!(
            leads = leads.len(),
            sources = sources.len(),
            "Lead search completed"
        );

        Ok(LeadSearchResult { leads, sources })
    }
}

/// Citations with both a uri and a title, in service order.
pub fn collect_sources(response: &GenerateContentResponse) -> Vec<Source> {
    response
        .web_chunks()
        .filter_map(|web| Source::from_parts(web.uri.as_deref(), web.title.as_deref()))
        .collect()
}

/// Maps a service failure onto a user-facing error by looking at its message.
///
/// Gemini reports these conditions only in human-readable text, so this matching can break
/// when the service rewords its errors; anything unrecognised becomes a communication failure.
pub fn classify_service_error(message: &str) -> LeadGenError {
    if message.contains("API key is invalid") || message.contains("API key not valid") {
        return LeadGenError::InvalidCredential;
    }
    if message.to_lowercase().contains("quota") {
        return LeadGenError::QuotaExceeded;
    }
    LeadGenError::CommunicationFailure {
        details: message.to_string(),
    }
}
