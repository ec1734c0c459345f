use crate::credential_store::{CredentialStore, StoreError};
use crate::generator::LeadGenerator;
use extractors::{ExportError, LeadCsvExporter};
use shared_types::{Lead, LeadFilter, LeadGenError, SearchNotice, SearchParams, Source};
use std::io::Write;
use std::sync::Arc;

/// Owns everything a lead search touches: the credential, the current parameters and the
/// results of the last search.
///
/// `submit` takes `&mut self`, so a second search cannot start while one is pending.
pub struct LeadSearchSession {
    store: Arc<dyn CredentialStore>,
    generator: LeadGenerator,
    credential: String,
    params: SearchParams,
    leads: Vec<Lead>,
    sources: Vec<Source>,
    notice: Option<SearchNotice>,
    message: Option<String>,
    loading: bool,
}

impl LeadSearchSession {
    /// Reads the stored credential once; later edits go through [`Self::set_credential`].
    pub fn open(
        store: Arc<dyn CredentialStore>,
        generator: LeadGenerator,
        params: SearchParams,
    ) -> Result<Self, StoreError> {
        let credential = store.load()?.unwrap_or_default();
        tracing::debug!(
            location = %store.location(),
            has_credential = !credential.is_empty(),
            "Opened lead search session"
        );

        Ok(Self {
            store,
            generator,
            credential,
            params,
            leads: Vec::new(),
            sources: Vec::new(),
            notice: None,
            message: None,
            loading: false,
        })
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn set_credential(&mut self, credential: &str) -> Result<(), StoreError> {
        self.credential = credential.to_string();
        self.store.save(credential)
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SearchParams) {
        self.params = params;
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn notice(&self) -> Option<SearchNotice> {
        self.notice
    }

    /// True while a request is in flight. Stays set if the `submit` future is dropped mid-request.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The single user-visible message of the last search: an error or a notice.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Runs one search with the current parameters.
    ///
    /// Validation failures leave the previous results untouched. Once a request is about to
    /// be issued, previous results are cleared and only replaced on success.
    pub async fn submit(&mut self) -> Result<Option<SearchNotice>, LeadGenError> {
        if self.credential.trim().is_empty() {
            return Err(self.fail(LeadGenError::MissingCredential));
        }
        if !self.params.empty_fields().is_empty() {
            return Err(self.fail(LeadGenError::EmptyInputFields));
        }

        self.leads.clear();
        self.sources.clear();
        self.notice = None;
        self.message = None;
        self.loading = true;

        match self
            .generator
            .generate_leads(&self.params, &self.credential)
            .await
        {
            Ok(result) => {
                self.loading = false;
                if result.leads.is_empty() {
                    self.notice = Some(SearchNotice::NoResultsFound);
                    self.message = Some(SearchNotice::NoResultsFound.to_string());
                }
                self.leads = result.leads;
                self.sources = result.sources;
                Ok(self.notice)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn fail(&mut self, err: LeadGenError) -> LeadGenError {
        tracing::warn!(kind = err.kind(), "Lead search failed: {}", err);
        self.loading = false;
        self.notice = None;
        self.message = Some(err.to_string());
        err
    }

    /// Leads that pass `filter`, in their original order.
    pub fn filtered(&self, filter: &LeadFilter) -> Vec<&Lead> {
        filter.apply(&self.leads)
    }

    /// Writes the filtered view as CSV and returns the number of data rows.
    pub fn export_csv<W: Write>(
        &self,
        filter: &LeadFilter,
        writer: W,
    ) -> Result<usize, ExportError> {
        LeadCsvExporter::new().write(self.filtered(filter), writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential_store::MemoryCredentialStore;
    use crate::llm::mock::{response_with, MockLlmClient};
    use crate::llm::LlmError;
    use shared_types::Presence;

    const TWO_BAKERIES: &str = r#"```json
[
  {"name": "Sunrise Bakery", "address": "1 Main St, Austin, USA", "website": "https://sunrise.example"},
  {"name": "Crumb & Co", "address": "9 Lamar Blvd, Austin, USA", "email": "hi@crumb.example"}
]
```"#;

    fn session_with(
        client: &Arc<MockLlmClient>,
        store: Arc<dyn CredentialStore>,
    ) -> LeadSearchSession {
        let generator = LeadGenerator::new(client.clone(), "gemini-2.5-flash");
        LeadSearchSession::open(
            store,
            generator,
            SearchParams::new("bakeries", "Austin", "USA", 5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_successful_search_end_to_end() {
        let client = Arc::new(MockLlmClient::answering(
            TWO_BAKERIES,
            &[("https://maps.example/austin-bakeries", "Austin bakeries")],
        ));
        let store = Arc::new(MemoryCredentialStore::with_credential("valid-key"));
        let mut session = session_with(&client, store);

        let notice = session.submit().await.unwrap();

        assert_eq!(notice, None);
        assert_eq!(session.message(), None);
        assert_eq!(session.leads().len(), 2);
        assert_eq!(session.leads()[1].website, "");
        assert_eq!(session.sources().len(), 1);

        let mut csv = Vec::new();
        let rows = session
            .export_csv(&LeadFilter::default(), &mut csv)
            .unwrap();
        assert_eq!(rows, 2);
        assert_eq!(String::from_utf8(csv).unwrap().lines().count(), 3);
    }

    #[tokio::test]
    async fn test_missing_credential_never_calls_the_service() {
        let client = Arc::new(MockLlmClient::answering(TWO_BAKERIES, &[]));
        let mut session = session_with(&client, Arc::new(MemoryCredentialStore::new()));

        let result = session.submit().await;

        assert_eq!(result, Err(LeadGenError::MissingCredential));
        assert_eq!(
            session.message(),
            Some("Please enter your Gemini API key to generate leads.")
        );
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_fields_are_rejected_before_the_request() {
        let client = Arc::new(MockLlmClient::answering(TWO_BAKERIES, &[]));
        let store = Arc::new(MemoryCredentialStore::with_credential("valid-key"));
        let mut session = session_with(&client, store);
        session.set_params(SearchParams::new("bakeries", "", "USA", 5));

        assert_eq!(session.submit().await, Err(LeadGenError::EmptyInputFields));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_clears_previous_results() {
        let client = Arc::new(MockLlmClient::new(vec![
            Ok(response_with(TWO_BAKERIES, &[("https://a.example", "A")])),
            Ok(response_with("No structured data, sorry.", &[])),
        ]));
        let store = Arc::new(MemoryCredentialStore::with_credential("valid-key"));
        let mut session = session_with(&client, store);

        session.submit().await.unwrap();
        assert_eq!(session.leads().len(), 2);

        let result = session.submit().await;
        assert!(matches!(result, Err(LeadGenError::MalformedResponse { .. })));
        assert!(session.leads().is_empty());
        assert!(session.sources().is_empty());
        assert_eq!(
            session.message(),
            Some("The AI returned an invalid response format. Please try again.")
        );
    }

    #[tokio::test]
    async fn test_zero_leads_is_a_notice() {
        let client = Arc::new(MockLlmClient::answering("```json\n[]\n```", &[]));
        let store = Arc::new(MemoryCredentialStore::with_credential("valid-key"));
        let mut session = session_with(&client, store);

        let notice = session.submit().await.unwrap();

        assert_eq!(notice, Some(SearchNotice::NoResultsFound));
        assert_eq!(
            session.message(),
            Some("No leads found. Try broadening your search criteria.")
        );
    }

    #[tokio::test]
    async fn test_quota_error_is_surfaced() {
        let client = Arc::new(MockLlmClient::failing(LlmError::Api {
            status: 429,
            message: "Resource has been exhausted (e.g. check quota).".to_string(),
        }));
        let store = Arc::new(MemoryCredentialStore::with_credential("valid-key"));
        let mut session = session_with(&client, store);

        assert_eq!(session.submit().await, Err(LeadGenError::QuotaExceeded));
    }

    #[tokio::test]
    async fn test_credential_edits_are_persisted() {
        let client = Arc::new(MockLlmClient::answering(TWO_BAKERIES, &[]));
        let store = Arc::new(MemoryCredentialStore::new());
        let mut session = session_with(&client, store.clone());

        session.set_credential("new-key").unwrap();

        assert_eq!(session.credential(), "new-key");
        assert_eq!(store.load().unwrap().as_deref(), Some("new-key"));

        session.submit().await.unwrap();
        assert_eq!(client.calls()[0].api_key, "new-key");
    }

    #[tokio::test]
    async fn test_loading_is_cleared_on_success_and_failure() {
        let client = Arc::new(MockLlmClient::new(vec![
            Ok(response_with(TWO_BAKERIES, &[])),
            Ok(response_with("no json here", &[])),
        ]));
        let store = Arc::new(MemoryCredentialStore::with_credential("valid-key"));
        let mut session = session_with(&client, store);
        assert!(!session.is_loading());

        session.submit().await.unwrap();
        assert!(!session.is_loading());

        assert!(session.submit().await.is_err());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_interrupted_search_stays_loading() {
        let client = Arc::new(MockLlmClient::hanging());
        let store = Arc::new(MemoryCredentialStore::with_credential("valid-key"));
        let mut session = session_with(&client, store);

        let outcome =
            tokio::time::timeout(std::time::Duration::from_millis(20), session.submit()).await;

        assert!(outcome.is_err());
        assert!(session.is_loading());
        assert!(session.leads().is_empty());
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_validation_failure_never_sets_loading() {
        let client = Arc::new(MockLlmClient::answering(TWO_BAKERIES, &[]));
        let mut session = session_with(&client, Arc::new(MemoryCredentialStore::new()));

        assert!(session.submit().await.is_err());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_filtering_does_not_mutate_results() {
        let client = Arc::new(MockLlmClient::answering(TWO_BAKERIES, &[]));
        let store = Arc::new(MemoryCredentialStore::with_credential("valid-key"));
        let mut session = session_with(&client, store);
        session.submit().await.unwrap();

        let with_website = LeadFilter {
            website: Presence::Yes,
            ..Default::default()
        };
        let view = session.filtered(&with_website);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Sunrise Bakery");

        let mut csv = Vec::new();
        assert_eq!(session.export_csv(&with_website, &mut csv).unwrap(), 1);

        let everything = session.filtered(&LeadFilter::default());
        let names: Vec<&str> = everything.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Sunrise Bakery", "Crumb & Co"]);
    }
}
