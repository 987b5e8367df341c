use rst_common::standard::async_trait::async_trait;
use rst_common::with_errors::thiserror::{self, Error};

use crate::trust::connection::{ConnectionID, Partner};

use super::credential::IssuedCredential;
use super::document::PublishedDocument;
use super::fragment::VerifiablePresentation;
use super::record::PresentationRecord;
use super::worker::RebuildHandle;

pub const VP_TYPE: &str = "VerifiablePresentation";

/// The only key a stored presentation may live under
pub const SINGLE_PRESENTATION_KEY: &str = "presentation:self";

#[derive(Debug, PartialEq, Error, Clone)]
pub enum PresentationError {
    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("source error: {0}")]
    SourceError(String),

    #[error("repo error: {0}")]
    RepoError(String),

    #[error("malformed payload at {source_id}: {reason}")]
    MalformedPayload { source_id: String, reason: String },

    #[error("signer error: {0}")]
    SignerError(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("singleton violation: {0}")]
    SingletonViolation(String),

    #[error("rebuild lane closed")]
    LaneClosed,
}

impl PresentationError {
    /// A fatal error means the stored state can't be trusted anymore, no rebuild should run
    /// after it
    pub fn is_fatal(&self) -> bool {
        matches!(self, PresentationError::SingletonViolation(_))
    }
}

/// `VisibilityChange` is a mutation of the organization's own documents or credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityChange {
    DocumentPublished,
    DocumentUnpublished,
    DocumentUpdated { is_public: bool },
    DocumentDeleted { was_public: bool },
    CredentialReceived { is_public: bool },
    CredentialVisibilityChanged,
    CredentialDeleted { was_public: bool },
}

impl VisibilityChange {
    /// affects_presentation tells if the public set may have changed
    pub fn affects_presentation(&self) -> bool {
        match self {
            VisibilityChange::DocumentPublished
            | VisibilityChange::DocumentUnpublished
            | VisibilityChange::CredentialVisibilityChanged => true,
            VisibilityChange::DocumentUpdated { is_public }
            | VisibilityChange::CredentialReceived { is_public } => *is_public,
            VisibilityChange::DocumentDeleted { was_public }
            | VisibilityChange::CredentialDeleted { was_public } => *was_public,
        }
    }
}

/// `PresentationAPI` is the entrypoint of the `Presentation` domain
#[async_trait]
pub trait PresentationAPI: Clone {
    /// rebuild_presentation schedules a rebuild and returns immediately
    async fn rebuild_presentation(&self) -> Result<(), PresentationError>;

    /// rebuild_presentation_and_wait schedules a rebuild and waits until the rebuild which
    /// covers it has been published. The output is the number of `VC` fragments published
    async fn rebuild_presentation_and_wait(&self) -> Result<usize, PresentationError>;

    /// notify schedules exactly one rebuild when the change affects the public set.
    /// The output tells if a rebuild has been scheduled
    async fn notify(&self, change: VisibilityChange) -> Result<bool, PresentationError>;

    async fn get_current_presentation(
        &self,
    ) -> Result<Option<VerifiablePresentation>, PresentationError>;
}

/// `SourceRepoBuilder` reads the sources aggregated into the presentation
#[async_trait]
pub trait SourceRepoBuilder: Clone + Sync + Send {
    async fn list_public_documents(&self) -> Result<Vec<PublishedDocument>, PresentationError>;
    async fn list_public_credentials(&self) -> Result<Vec<IssuedCredential>, PresentationError>;

    async fn find_partner_by_connection_id(
        &self,
        connection_id: ConnectionID,
    ) -> Result<Option<Partner>, PresentationError>;
}

/// `RepoBuilder` persists the signed presentation
///
/// Implementers must count every stored presentation row, not only the one living under
/// [`SINGLE_PRESENTATION_KEY`], otherwise a violated singleton can't be detected
#[async_trait]
pub trait RepoBuilder: Clone + Sync + Send {
    async fn count_presentations(&self) -> Result<usize, PresentationError>;

    async fn get_presentation(
        &self,
        key: String,
    ) -> Result<Option<PresentationRecord>, PresentationError>;

    async fn save_presentation(&self, record: &PresentationRecord)
        -> Result<(), PresentationError>;

    async fn update_presentation(
        &self,
        record: &PresentationRecord,
    ) -> Result<(), PresentationError>;
}

/// `SignerBuilder` hands an unsigned presentation to the external signer
#[async_trait]
pub trait SignerBuilder: Clone + Sync + Send {
    async fn sign(
        &self,
        presentation: VerifiablePresentation,
    ) -> Result<VerifiablePresentation, PresentationError>;
}

pub trait UsecaseBuilder: PresentationAPI {
    type RepoImplementer: RepoBuilder;

    fn repo(&self) -> &Self::RepoImplementer;
    fn lane(&self) -> &RebuildHandle;
}
