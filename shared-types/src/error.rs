/// Every way a lead search can fail, with the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadGenError {
    #[error("Please enter your Gemini API key to generate leads.")]
    MissingCredential,

    #[error("Please fill in all search fields.")]
    EmptyInputFields,

    #[error("The AI returned an invalid response format. Please try again.")]
    MalformedResponse { reason: String },

    #[error("The AI response was not a valid list of leads.")]
    UnexpectedShape,

    #[error("The AI returned an empty response. Please try refining your search.")]
    EmptyResponse,

    #[error("The provided API key is invalid. Please double-check the key and try again.")]
    InvalidCredential,

    #[error("You have exceeded your API quota. Please check your Google AI account for usage limits.")]
    QuotaExceeded,

    #[error("Communication with the AI failed. Please verify your API key and check your network connection.")]
    CommunicationFailure { details: String },
}

impl LeadGenError {
    /// Stable, machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            LeadGenError::MissingCredential => "missing-credential",
            LeadGenError::EmptyInputFields => "empty-input-fields",
            LeadGenError::MalformedResponse { .. } => "malformed-response",
            LeadGenError::UnexpectedShape => "unexpected-shape",
            LeadGenError::EmptyResponse => "empty-response",
            LeadGenError::InvalidCredential => "invalid-credential",
            LeadGenError::QuotaExceeded => "quota-exceeded",
            LeadGenError::CommunicationFailure { .. } => "communication-failure",
        }
    }
}
